pub mod container;
pub mod policy;
pub mod readiness;
pub mod result;
pub mod tcp;
