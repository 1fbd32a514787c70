use crate::report::status::DisplayReport;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OutcomeKind {
    #[strum(serialize = "created and running")]
    CreatedRunning,
    #[strum(serialize = "created but degraded")]
    CreatedDegraded,
    #[strum(serialize = "left existing")]
    KeptExisting,
}

/// Terminal result of reconciling one connector. The three kinds are always
/// distinguishable in what the operator sees.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorOutcome {
    pub name: String,
    pub kind: OutcomeKind,
    pub report: DisplayReport,
}

impl ConnectorOutcome {
    pub fn new(name: &str, kind: OutcomeKind, report: DisplayReport) -> Self {
        ConnectorOutcome {
            name: name.to_string(),
            kind,
            report,
        }
    }

    pub fn headline(&self) -> String {
        match self.kind {
            OutcomeKind::CreatedRunning => {
                format!("Connector '{}' {}", self.name, self.kind)
            }
            OutcomeKind::CreatedDegraded => format!(
                "WARNING: connector '{}' {}: {}",
                self.name,
                self.kind,
                self.report
                    .root_cause()
                    .unwrap_or_else(|| "not all tasks are RUNNING".to_string())
            ),
            OutcomeKind::KeptExisting => format!(
                "Connector '{}' {} (health not verified by this run, last reported state {})",
                self.name,
                self.kind,
                self.report.state()
            ),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.kind == OutcomeKind::CreatedDegraded
    }
}
