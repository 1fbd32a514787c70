pub mod client;
pub mod hint;
pub mod liveness;
pub mod policy;
pub mod reconciler;
pub mod rest;
pub mod status;
