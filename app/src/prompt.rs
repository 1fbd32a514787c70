use async_trait::async_trait;
use cdcr::connect::policy::{ExistingPolicy, OnExists};
use cdcr::error::CdcrResult;
use cdcr::report::status::DisplayReport;
use std::io::{self, Write};

/// Asks the operator whether to replace an existing connector. Anything but
/// an explicit yes keeps it. The terminal is read on a blocking thread.
pub struct TerminalPrompt;

#[async_trait]
impl ExistingPolicy for TerminalPrompt {
    async fn decide(&self, name: &str, current: &DisplayReport) -> CdcrResult<OnExists> {
        let question = format!(
            "Connector '{}' already exists (state {}).\nDelete and recreate it? (y/n) ",
            name,
            current.state()
        );
        let answer = tokio::task::spawn_blocking(move || ask(&question)).await??;
        Ok(parse_answer(&answer))
    }
}

fn ask(question: &str) -> io::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer)
}

fn parse_answer(answer: &str) -> OnExists {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => OnExists::Replace,
        _ => OnExists::Keep,
    }
}
