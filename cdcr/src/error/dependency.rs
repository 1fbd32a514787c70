use thiserror::Error;

#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("{target} not ready after {attempts_used} attempt(s){}", render_last_error(.last_error))]
    Timeout {
        target: String,
        attempts_used: u32,
        last_error: Option<String>,
    },

    #[error("{target} unreachable: {reason}")]
    Unreachable { target: String, reason: String },
}

fn render_last_error(last_error: &Option<String>) -> String {
    match last_error {
        Some(err) => format!(" (last error: {})", err),
        None => String::new(),
    }
}
