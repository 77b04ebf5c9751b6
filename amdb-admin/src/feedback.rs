//! Feedback channel (the shared modal)
//!
//! Every handler outcome that needs the user's attention ends here. Only one
//! report is displayed at a time; showing a new one replaces it. Dismissing
//! the modal requests a page reload.

use std::fmt;

/// Failure category for error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Required field missing; no request was sent
    Validation,
    /// Transport failure or non-2xx response
    Network,
    /// Client document disagrees with server state (e.g. missing element)
    Consistency,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Validation => "validation",
            Severity::Network => "network",
            Severity::Consistency => "consistency",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

impl Outcome {
    pub fn title(self) -> &'static str {
        match self {
            Outcome::Success => "SUCCESS",
            Outcome::Error => "ERROR",
        }
    }
}

/// Content of the modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackReport {
    pub outcome: Outcome,
    /// Set for error reports only
    pub severity: Option<Severity>,
    pub body: String,
}

impl FeedbackReport {
    pub fn success(body: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            severity: None,
            body: body.into(),
        }
    }

    pub fn error(severity: Severity, body: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Error,
            severity: Some(severity),
            body: body.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.outcome.title()
    }
}

/// The single modal surface of a page
#[derive(Debug, Default)]
pub struct FeedbackModal {
    active: Option<FeedbackReport>,
}

impl FeedbackModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display `report`, replacing whatever is shown
    pub fn show(&mut self, report: FeedbackReport) {
        match report.outcome {
            Outcome::Error => tracing::warn!(
                severity = ?report.severity,
                "{}: {}",
                report.title(),
                report.body
            ),
            Outcome::Success => tracing::info!("{}: {}", report.title(), report.body),
        }
        self.active = Some(report);
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<&FeedbackReport> {
        self.active.as_ref()
    }

    /// Close the modal, returning what was displayed
    ///
    /// The caller must reload the page afterwards.
    pub fn dismiss(&mut self) -> Option<FeedbackReport> {
        self.active.take()
    }
}
