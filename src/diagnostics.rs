//! Diagnostics emitted while handling requests
//!
//! The create path reports what it was given before it writes. These entries
//! are fire-and-forget: a sink never fails and never affects the response.

/// Sink for request diagnostics
pub trait Diagnostics: Send + Sync {
    /// Registration number submitted with a create request
    fn registration_submitted(&self, registration_number: Option<&str>);

    /// Model submitted with a create request, reported on a secondary stream
    fn model_submitted(&self, model: Option<&str>);
}

/// Writes diagnostics as `tracing` events.
///
/// Registration numbers go to the `cabs::diagnostics` target, models to
/// `cabs::console`, so each stream can be filtered on its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn registration_submitted(&self, registration_number: Option<&str>) {
        tracing::info!(
            target: "cabs::diagnostics",
            registration_number = registration_number.unwrap_or_default(),
            "Create requested"
        );
    }

    fn model_submitted(&self, model: Option<&str>) {
        tracing::debug!(
            target: "cabs::console",
            model = model.unwrap_or_default(),
            "Create requested"
        );
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn registration_submitted(&self, _registration_number: Option<&str>) {}

    fn model_submitted(&self, _model: Option<&str>) {}
}
