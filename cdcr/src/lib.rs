pub mod connect;
pub mod connector;
pub mod container;
pub mod error;
pub mod kafka;
pub mod pipeline;
pub mod probe;
pub mod report;
