use std::env;
use std::time::Duration;

use goalfsm_core::error::{CoreError, Domain, ErrorKind, Payload, Result};

pub const DEFAULT_PERIOD_MS: u64 = 100;
pub const DEFAULT_MAX_TICKS: u64 = 1_000;

/// One `--edge` argument: `S:D[:fail=K][:blocked]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EdgeSpec {
    pub source: u16,
    pub destination: u16,
    /// Attempts that fail before the edge's action starts succeeding.
    pub failures: u32,
    pub blocked: bool,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SimConfig {
    /// Size of the node domain; defaults to the highest node named plus one.
    pub nodes: usize,
    /// Registry capacity; defaults to the number of edges.
    pub capacity: usize,
    pub edges: Vec<EdgeSpec>,
    pub start: u16,
    pub target: u16,
    pub period: Duration,
    pub max_ticks: u64,
}

impl SimConfig {
    pub fn from_args() -> Result<Self> {
        Self::from_args_iter(env::args())
    }

    pub fn from_args_iter<I, S>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nodes: Option<usize> = None;
        let mut capacity: Option<usize> = None;
        let mut edges = Vec::new();
        let mut start: u16 = 0;
        let mut target: Option<u16> = None;
        let mut period_ms = env::var("GOALFSM_PERIOD_MS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PERIOD_MS);
        let mut max_ticks = env::var("GOALFSM_MAX_TICKS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_TICKS);

        let mut args = iter.into_iter();
        let _ = args.next();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
                _ => (arg, None),
            };
            let mut value = |name: &'static str| -> Result<String> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => args
                        .next()
                        .map(|v| v.as_ref().to_string())
                        .ok_or_else(|| invalid("missing value", name, "")),
                }
            };

            match flag {
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                "--nodes" => nodes = Some(parse_number(&value("nodes")?, "nodes")?),
                "--capacity" => capacity = Some(parse_number(&value("capacity")?, "capacity")?),
                "--edge" => edges.push(parse_edge(&value("edge")?)?),
                "--start" => start = parse_number(&value("start")?, "start")?,
                "--target" => target = Some(parse_number(&value("target")?, "target")?),
                "--period-ms" => period_ms = parse_number(&value("period-ms")?, "period-ms")?,
                "--max-ticks" => max_ticks = parse_number(&value("max-ticks")?, "max-ticks")?,
                _ => {}
            }
        }

        let highest = edges
            .iter()
            .flat_map(|e| [e.source, e.destination])
            .chain([start])
            .chain(target)
            .max()
            .unwrap_or(0);
        let nodes = nodes.unwrap_or(usize::from(highest) + 1);
        if usize::from(highest) >= nodes {
            return Err(invalid(
                "node outside the configured domain",
                "nodes",
                highest.to_string(),
            ));
        }

        let capacity = match capacity {
            Some(0) => return Err(invalid("registry capacity must be at least 1", "capacity", "0")),
            Some(capacity) => capacity,
            None => edges.len().max(1),
        };
        if capacity < edges.len() {
            return Err(invalid(
                "more edges than registry capacity",
                "capacity",
                capacity.to_string(),
            ));
        }

        Ok(Self {
            nodes,
            capacity,
            edges,
            start,
            target: target.unwrap_or(start),
            period: Duration::from_millis(period_ms),
            max_ticks,
        })
    }
}

fn print_usage() {
    println!(
        "goalfsm_sim --edge S:D[:fail=K][:blocked]... [--start N] [--target N] [--nodes N] [--capacity N] [--period-ms MS] [--max-ticks N]"
    );
}

fn parse_number<T: std::str::FromStr>(value: &str, field: &'static str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid("not a valid number", field, value.to_string()))
}

fn parse_edge(value: &str) -> Result<EdgeSpec> {
    let mut parts = value.split(':');
    let source = parse_number(parts.next().unwrap_or(""), "edge")?;
    let destination = match parts.next() {
        Some(d) => parse_number(d, "edge")?,
        None => return Err(invalid("edge needs SOURCE:DESTINATION", "edge", value.to_string())),
    };

    let mut edge = EdgeSpec {
        source,
        destination,
        failures: 0,
        blocked: false,
    };
    for option in parts {
        match option.split_once('=') {
            Some(("fail", count)) => edge.failures = parse_number(count, "edge")?,
            None if option == "blocked" => edge.blocked = true,
            _ => return Err(invalid("unknown edge option", "edge", option.to_string())),
        }
    }
    Ok(edge)
}

fn invalid(message: &'static str, field: &'static str, value: impl Into<String>) -> CoreError {
    let value = value.into();
    CoreError::error()
        .domain(Domain::Config)
        .kind(ErrorKind::InvalidArgument)
        .msgf(format_args!("--{field}: {message}"))
        .payload(Payload::Context {
            key: field,
            value: value.into(),
        })
        .build()
}
