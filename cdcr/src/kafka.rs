pub mod admin;
pub mod config;
pub mod kafka_client;
pub mod provisioner;
pub mod topic;
