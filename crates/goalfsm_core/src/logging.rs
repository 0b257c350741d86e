//! Routing of [`CoreError`]s onto `tracing` levels.

use crate::error::{CoreError, Severity};

/// Emit `err` at the `tracing` level matching its [`Severity`].
pub fn log_core_error(err: &CoreError) {
    let domain = err.domain;
    let kind = err.kind;
    match err.severity {
        Severity::Trace => tracing::trace!(?domain, ?kind, "{err}"),
        Severity::Debug => tracing::debug!(?domain, ?kind, "{err}"),
        Severity::Info => tracing::info!(?domain, ?kind, "{err}"),
        Severity::Warn => tracing::warn!(?domain, ?kind, "{err}"),
        Severity::Error => tracing::error!(?domain, ?kind, "{err}"),
    }
}
