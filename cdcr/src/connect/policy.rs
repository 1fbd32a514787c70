use crate::error::CdcrResult;
use crate::report::status::DisplayReport;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What to do when the connector being reconciled is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OnExists {
    Keep,
    Replace,
    Fail,
}

impl Default for OnExists {
    fn default() -> Self {
        OnExists::Fail
    }
}

/// Resolves the keep/replace question for an existing connector. A fixed
/// `OnExists` answers without asking; the CLI also provides a terminal prompt.
#[async_trait]
pub trait ExistingPolicy: Send + Sync {
    async fn decide(&self, name: &str, current: &DisplayReport) -> CdcrResult<OnExists>;
}

#[async_trait]
impl ExistingPolicy for OnExists {
    async fn decide(&self, _name: &str, _current: &DisplayReport) -> CdcrResult<OnExists> {
        Ok(*self)
    }
}
