use crate::connect::status::{ConnectorState, ConnectorStatus};
use serde_json::Value;
use std::fmt::{self, Display};

/// Terminal-facing rendering of a connector status payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayReport {
    /// Pretty-printed JSON, or the raw payload when it is not JSON.
    pub body: String,
    pub status: Option<ConnectorStatus>,
    pub healthy: bool,
}

impl DisplayReport {
    pub fn state(&self) -> ConnectorState {
        self.status
            .as_ref()
            .map(|status| status.state)
            .unwrap_or(ConnectorState::Unknown)
    }

    pub fn root_cause(&self) -> Option<String> {
        match &self.status {
            Some(status) => status.root_cause(),
            None => Some("status payload could not be interpreted".to_string()),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status.as_ref().map_or(false, ConnectorStatus::is_settled)
    }
}

/// Render `payload` for an operator. Never fails: a payload that is not JSON
/// is shown as-is and counts as unhealthy.
pub fn summarize(payload: &str) -> DisplayReport {
    let body = match serde_json::from_str::<Value>(payload) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| payload.to_string()),
        Err(_) => payload.to_string(),
    };
    let status = ConnectorStatus::from_json(payload).ok();
    let healthy = status.as_ref().map_or(false, ConnectorStatus::is_healthy);

    DisplayReport {
        body,
        status,
        healthy,
    }
}

impl Display for DisplayReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(status) = &self.status {
            writeln!(f, "Connector: {}", status.name)?;
            writeln!(f, "State:     {}", status.state)?;
            for task in &status.tasks {
                writeln!(f, "Task {}:    {}", task.id, task.state)?;
            }
            if !self.healthy {
                if let Some(cause) = status.root_cause() {
                    writeln!(f, "Cause:     {}", cause)?;
                }
            }
        }
        write!(f, "{}", self.body)
    }
}
