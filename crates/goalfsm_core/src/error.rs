use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Convenient result alias for goalfsm_core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Log/handling importance. Maps onto `tracing` levels in [`crate::logging`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Where an error came from (helps triage and routing).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Registry,
    Search,
    Tick,
    Config,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Registry is full on `add`.
    CapacityExceeded,
    /// `remove` of a transition that is not registered.
    NotFound,
    /// Current node cannot reach the target through enabled transitions.
    NoPathFound,
    /// Search ran out of scratch space: the node domain is larger than configured.
    ScratchExhausted,
    InvalidArgument,
    Other,
}

/// Optional structured payload. Every variant is allocation-free so errors can be
/// raised from the tick path.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Generic key/value context (usually no heap alloc if using &str).
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// Registry occupancy at the time of the error.
    Registry { registered: usize, capacity: usize },

    /// Size of the scratch region a search overflowed.
    Scratch { capacity: usize },
}

/// The one error type that crosses module boundaries in goalfsm_core.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl CoreError {
    // ---------------- Fluent entry points ----------------

    #[inline]
    pub fn trace() -> ErrB {
        ErrB::new(Severity::Trace)
    }
    #[inline]
    pub fn debug() -> ErrB {
        ErrB::new(Severity::Debug)
    }
    #[inline]
    pub fn info() -> ErrB {
        ErrB::new(Severity::Info)
    }
    #[inline]
    pub fn warn() -> ErrB {
        ErrB::new(Severity::Warn)
    }
    #[inline]
    pub fn error() -> ErrB {
        ErrB::new(Severity::Error)
    }

    /// Registry already holds `capacity` transitions.
    pub fn capacity_exceeded(capacity: usize) -> Self {
        CoreError::warn()
            .domain(Domain::Registry)
            .kind(ErrorKind::CapacityExceeded)
            .msg("transition registry is full")
            .payload(Payload::Registry {
                registered: capacity,
                capacity,
            })
            .build()
    }

    /// `remove` was given a transition the registry does not hold.
    pub fn not_registered(label: Option<&'static str>) -> Self {
        let payload = match label {
            Some(label) => Payload::Context {
                key: "transition",
                value: Cow::Borrowed(label),
            },
            None => Payload::None,
        };
        CoreError::warn()
            .domain(Domain::Registry)
            .kind(ErrorKind::NotFound)
            .msg("transition is not registered")
            .payload(payload)
            .build()
    }

    /// Target is unreachable from the current node through enabled transitions.
    pub fn no_path() -> Self {
        CoreError::warn()
            .domain(Domain::Tick)
            .kind(ErrorKind::NoPathFound)
            .msg("no enabled path from current node to target")
            .build()
    }

    /// Search visited more nodes than the scratch region can hold.
    pub fn scratch_exhausted(capacity: usize) -> Self {
        CoreError::error()
            .domain(Domain::Search)
            .kind(ErrorKind::ScratchExhausted)
            .msg("search scratch region smaller than node domain")
            .payload(Payload::Scratch { capacity })
            .build()
    }

    /// True for errors the caller is expected to recover from by changing
    /// the goal or the graph and ticking again.
    pub fn is_no_path(&self) -> bool {
        self.kind == ErrorKind::NoPathFound
    }
}

/// Fluent builder that behaves like iterator chains (takes self, returns Self).
/// Defaults:
/// - domain = Other
/// - kind = Other
/// - message = ""
/// - payload = None
#[derive(Debug, Clone)]
pub struct ErrB {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrB {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    /// Set/override the domain (defaults to Domain::Other).
    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    /// Set/override the kind (defaults to ErrorKind::Other).
    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    /// Set/override the message (defaults to "").
    #[inline]
    pub fn msg(mut self, m: impl Into<Cow<'static, str>>) -> Self {
        self.message = m.into();
        self
    }

    /// Formatting-friendly message setter. Allocates; keep it off the tick path.
    #[inline]
    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    /// Only one payload: this replaces any previous payload (default is None).
    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    #[inline]
    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}
