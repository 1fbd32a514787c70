use anyhow::{Context, Result};
use cdcr::pipeline::settings::PipelineSettings;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn load_config(path: &Path) -> Result<PipelineSettings> {
    let mut file = File::open(path)
        .with_context(|| format!("Cannot open settings file '{}'", path.display()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let settings: PipelineSettings = serde_yaml::from_str(&contents)
        .with_context(|| format!("Invalid settings file '{}'", path.display()))?;
    Ok(settings)
}
