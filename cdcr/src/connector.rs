pub mod config;
pub mod validator;
