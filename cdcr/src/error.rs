pub mod broker;
pub mod config;
pub mod connector;
pub mod dependency;
pub mod generic;

pub use generic::{CdcrError, CdcrResult};
