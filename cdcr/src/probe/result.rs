#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub service_name: String,
    pub reachable: bool,
    pub attempts_used: u32,
    pub last_error: Option<String>,
}

impl ProbeResult {
    pub fn new(
        service_name: String,
        reachable: bool,
        attempts_used: u32,
        last_error: Option<String>,
    ) -> Self {
        ProbeResult {
            service_name,
            reachable,
            attempts_used,
            last_error,
        }
    }
}
