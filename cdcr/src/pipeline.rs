pub mod orchestrator;
pub mod settings;
