use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Best-effort triage of a rejected connector creation. The categories are
/// matched by substring against the error body returned by Kafka Connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Deserialize, Serialize)]
pub enum Hint {
    Credentials,
    Connectivity,
    CdcNotEnabled,
}

const CREDENTIAL_MARKERS: &[&str] = &["authentication", "login failed", "access denied"];
const CONNECTIVITY_MARKERS: &[&str] = &["connection", "connect timed out", "unknownhost"];
const DATABASE_MARKERS: &[&str] = &["cdc", "not enabled", "database"];

impl Hint {
    pub fn classify(body: &str) -> Option<Hint> {
        let body = body.to_lowercase();
        let contains_any = |markers: &[&str]| markers.iter().any(|marker| body.contains(marker));

        if contains_any(CREDENTIAL_MARKERS) {
            Some(Hint::Credentials)
        } else if contains_any(CONNECTIVITY_MARKERS) {
            Some(Hint::Connectivity)
        } else if contains_any(DATABASE_MARKERS) {
            Some(Hint::CdcNotEnabled)
        } else {
            None
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Hint::Credentials => {
                "authentication failed; check the database.user username and database.password credential in the connector configuration"
            }
            Hint::Connectivity => {
                "connection failed; check database.hostname and database.port, and that the database accepts connections from the Connect runtime"
            }
            Hint::CdcNotEnabled => {
                "the database rejected capture; make sure CDC is enabled on the database and on every captured table"
            }
        }
    }
}
