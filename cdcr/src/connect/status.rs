use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Lifecycle state reported by Kafka Connect for a connector or one of its
/// tasks. Anything the runtime reports that we do not recognise maps to
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorState {
    Unassigned,
    Running,
    Paused,
    Failed,
    Unknown,
}

impl ConnectorState {
    pub fn parse(raw: &str) -> Self {
        ConnectorState::from_str(raw.trim()).unwrap_or(ConnectorState::Unknown)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
struct StatusPayload {
    name: String,
    connector: WorkerPayload,
    #[serde(default)]
    tasks: Vec<TaskPayload>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
struct WorkerPayload {
    state: String,
    #[serde(default)]
    trace: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
struct TaskPayload {
    id: u32,
    state: String,
    #[serde(default)]
    trace: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatus {
    pub id: u32,
    pub state: ConnectorState,
    pub trace: Option<String>,
}

/// One live reading of `GET /connectors/{name}/status`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorStatus {
    pub name: String,
    pub state: ConnectorState,
    pub trace: Option<String>,
    pub tasks: Vec<TaskStatus>,
}

impl ConnectorStatus {
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        let payload: StatusPayload = serde_json::from_str(payload)?;
        Ok(ConnectorStatus {
            name: payload.name,
            state: ConnectorState::parse(&payload.connector.state),
            trace: payload.connector.trace,
            tasks: payload
                .tasks
                .into_iter()
                .map(|task| TaskStatus {
                    id: task.id,
                    state: ConnectorState::parse(&task.state),
                    trace: task.trace,
                })
                .collect(),
        })
    }

    /// Connector RUNNING and every task RUNNING.
    pub fn is_healthy(&self) -> bool {
        self.state == ConnectorState::Running
            && self.tasks.iter().all(|task| task.state == ConnectorState::Running)
    }

    pub fn has_failure(&self) -> bool {
        self.state == ConnectorState::Failed
            || self.tasks.iter().any(|task| task.state == ConnectorState::Failed)
    }

    /// Whether waiting longer is pointless: either healthy with its tasks
    /// scheduled, or something has already failed.
    pub fn is_settled(&self) -> bool {
        (self.is_healthy() && !self.tasks.is_empty()) || self.has_failure()
    }

    /// The most specific reason the connector is not healthy. A failed task
    /// wins over a failed connector.
    pub fn root_cause(&self) -> Option<String> {
        if let Some(task) = self
            .tasks
            .iter()
            .find(|task| task.state == ConnectorState::Failed)
        {
            return Some(format!(
                "task {} is FAILED{}",
                task.id,
                first_trace_line(&task.trace)
            ));
        }

        if self.state == ConnectorState::Failed {
            return Some(format!(
                "connector is FAILED{}",
                first_trace_line(&self.trace)
            ));
        }

        if self.state != ConnectorState::Running {
            return Some(format!("connector is {}", self.state));
        }

        self.tasks
            .iter()
            .find(|task| task.state != ConnectorState::Running)
            .map(|task| format!("task {} is {}", task.id, task.state))
    }
}

fn first_trace_line(trace: &Option<String>) -> String {
    match trace.as_deref().and_then(|trace| trace.lines().next()) {
        Some(line) if !line.trim().is_empty() => format!(": {}", line.trim()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNNING: &str = r#"{
        "name": "inventory",
        "connector": {"state": "RUNNING", "worker_id": "connect:8083"},
        "tasks": [{"id": 0, "state": "RUNNING", "worker_id": "connect:8083"}],
        "type": "source"
    }"#;

    #[test]
    fn test_parse_state() {
        assert_eq!(ConnectorState::parse("RUNNING"), ConnectorState::Running);
        assert_eq!(ConnectorState::parse(" PAUSED "), ConnectorState::Paused);
        assert_eq!(ConnectorState::parse("UNASSIGNED"), ConnectorState::Unassigned);
        assert_eq!(ConnectorState::parse("RESTARTING"), ConnectorState::Unknown);
        assert_eq!(ConnectorState::Failed.to_string(), "FAILED");
    }

    #[test]
    fn test_running_status_is_healthy() {
        let status = ConnectorStatus::from_json(RUNNING).unwrap();
        assert_eq!(status.name, "inventory");
        assert!(status.is_healthy());
        assert!(status.is_settled());
        assert_eq!(status.root_cause(), None);
    }

    #[test]
    fn test_failed_task_is_unhealthy() {
        let status = ConnectorStatus::from_json(
            r#"{"name": "inventory",
                "connector": {"state": "RUNNING"},
                "tasks": [{"id": 0, "state": "RUNNING"},
                          {"id": 1, "state": "FAILED", "trace": "org.apache.kafka.connect.errors.ConnectException: Login failed\n\tat io.debezium"}]}"#,
        )
        .unwrap();
        assert!(!status.is_healthy());
        assert!(status.has_failure());
        assert_eq!(
            status.root_cause().unwrap(),
            "task 1 is FAILED: org.apache.kafka.connect.errors.ConnectException: Login failed"
        );
    }

    #[test]
    fn test_task_failure_wins_over_connector_failure() {
        let status = ConnectorStatus::from_json(
            r#"{"name": "inventory",
                "connector": {"state": "FAILED", "trace": "connector trace"},
                "tasks": [{"id": 0, "state": "FAILED", "trace": "task trace"}]}"#,
        )
        .unwrap();
        assert_eq!(status.root_cause().unwrap(), "task 0 is FAILED: task trace");
    }

    #[test]
    fn test_running_without_tasks_is_not_settled() {
        let status = ConnectorStatus::from_json(
            r#"{"name": "inventory", "connector": {"state": "RUNNING"}, "tasks": []}"#,
        )
        .unwrap();
        assert!(status.is_healthy());
        assert!(!status.is_settled());
    }

    #[test]
    fn test_paused_connector_root_cause() {
        let status = ConnectorStatus::from_json(
            r#"{"name": "inventory", "connector": {"state": "PAUSED"}, "tasks": [{"id": 0, "state": "PAUSED"}]}"#,
        )
        .unwrap();
        assert!(!status.is_healthy());
        assert!(!status.has_failure());
        assert_eq!(status.root_cause().unwrap(), "connector is PAUSED");
    }
}
