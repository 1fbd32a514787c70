use crate::args::{Args, ExistsArg};
use crate::prompt::TerminalPrompt;
use crate::yaml::load_config;
use anyhow::Result;
use cdcr::connect::policy::{ExistingPolicy, OnExists};
use cdcr::pipeline::settings::PipelineSettings;

/// Settings file (or defaults) with command-line overrides applied.
pub fn resolve(args: &Args) -> Result<PipelineSettings> {
    let mut settings = match &args.settings {
        Some(path) => load_config(path)?,
        None => PipelineSettings::default(),
    };

    if let Some(url) = &args.connect_url {
        settings.connect.url = url.clone();
    }
    if let Some(container) = &args.connect_container {
        settings.connect.container = Some(container.clone());
    }
    if let Some(bootstrap_servers) = &args.bootstrap_servers {
        settings.kafka.bootstrap_servers = bootstrap_servers.clone();
    }
    if let Some(max_attempts) = args.max_attempts {
        settings.probe.max_attempts = max_attempts;
    }
    if let Some(interval_secs) = args.interval_secs {
        settings.probe.interval_secs = interval_secs;
    }
    match args.on_exists {
        Some(ExistsArg::Keep) => settings.on_exists = OnExists::Keep,
        Some(ExistsArg::Replace) => settings.on_exists = OnExists::Replace,
        Some(ExistsArg::Fail) => settings.on_exists = OnExists::Fail,
        Some(ExistsArg::Prompt) | None => {}
    }
    if args.require_healthy {
        settings.require_healthy = true;
    }

    Ok(settings)
}

pub fn existing_policy(args: &Args, settings: &PipelineSettings) -> Box<dyn ExistingPolicy> {
    match args.on_exists {
        Some(ExistsArg::Prompt) => Box::new(TerminalPrompt),
        _ => Box::new(settings.on_exists),
    }
}
