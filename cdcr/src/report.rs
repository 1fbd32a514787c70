pub mod outcome;
pub mod status;
