pub mod docker;
pub mod runtime;
