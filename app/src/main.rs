mod args;
mod config;
mod prompt;
mod state;
mod yaml;

use anyhow::anyhow;
use args::{Args, Command};
use cdcr::connector::validator;
use cdcr::pipeline::orchestrator::PipelineRun;
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use state::AppState;
use std::future::Future;
use std::io;
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: cannot start the async runtime: {}", err);
            return ExitCode::from(1);
        }
    };

    info!("run begins");
    let deadline = args.deadline_secs.map(Duration::from_secs);
    let code = runtime.block_on(supervise(
        with_deadline(run(&args), deadline),
        tokio::signal::ctrl_c(),
    ));

    // An open terminal prompt keeps its blocking thread parked on stdin.
    runtime.shutdown_timeout(Duration::from_millis(100));
    ExitCode::from(code)
}

/// Race the run against the interrupt signal. Exit code 130 on interrupt.
async fn supervise<W, S>(work: W, signal: S) -> u8
where
    W: Future<Output = anyhow::Result<u8>>,
    S: Future<Output = io::Result<()>>,
{
    let interrupted = async {
        if let Err(err) = signal.await {
            warn!("Cannot listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = work => exit_code(result),
        _ = interrupted => {
            error!("Interrupted; aborting");
            130
        }
    }
}

async fn with_deadline<F>(work: F, deadline: Option<Duration>) -> anyhow::Result<u8>
where
    F: Future<Output = anyhow::Result<u8>>,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, work)
            .await
            .map_err(|_| anyhow!("Deadline of {}s exceeded", limit.as_secs()))?,
        None => work.await,
    }
}

fn exit_code(result: anyhow::Result<u8>) -> u8 {
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<u8> {
    let settings = config::resolve(args)?;
    let policy = config::existing_policy(args, &settings);
    let state = AppState::new(settings)?;
    let orchestrator = state.orchestrator();

    match &args.command {
        Command::Up { config } => {
            let run = orchestrator.up(config, policy.as_ref()).await?;
            print_run(&run);
            Ok(0)
        }
        Command::Connector { config } => {
            let run = orchestrator.setup_connector(config, policy.as_ref()).await?;
            print_run(&run);
            Ok(0)
        }
        Command::Topics { config } => {
            let connector = config.as_deref().map(validator::validate).transpose()?;
            let report = orchestrator.provision_topics(connector.as_ref()).await?;
            print!("{}", report);
            Ok(if report.has_failures() { 1 } else { 0 })
        }
        Command::Status { config } => {
            let report = orchestrator.status(config).await?;
            println!("{}", report);
            Ok(if report.healthy { 0 } else { 1 })
        }
    }
}

fn print_run(run: &PipelineRun) {
    for note in &run.notes {
        println!("Note: {}", note);
    }
    for probe in &run.probes {
        println!(
            "{}: reachable after {} attempt(s)",
            probe.service_name, probe.attempts_used
        );
    }
    if let Some(topics) = &run.topics {
        print!("{}", topics);
    }
    println!("{}", run.connector.report);
    println!("{}", run.connector.headline());
}
