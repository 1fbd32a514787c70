use crate::connector::config::ConnectorConfig;
use crate::error::config::ConfigError;
use crate::error::CdcrResult;
use log::info;
use regex::Regex;
use serde_json::Value;
use std::net::IpAddr;
use std::path::Path;

/// Values an operator is expected to replace before the first run. Template
/// markers must make up the whole value; the sentinel words match anywhere.
const PLACEHOLDER_PATTERN: &str =
    r"(?i)^(\$\{[^}]*\}|<[^>]*>|x{3,}|\*{3,})$|change.?me|your.*password";

const REQUIRED_SETTINGS: &[&str] = &["connector.class", "database.hostname", "database.password"];

/// Load and sanity-check the connector configuration at `path`. Reads the
/// file and nothing else.
pub fn validate(path: &Path) -> CdcrResult<ConnectorConfig> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    validate_document(raw, path)
}

pub fn validate_document(raw: String, path: &Path) -> CdcrResult<ConnectorConfig> {
    let document: Value = serde_json::from_str(&raw).map_err(|err| ConfigError::Malformed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;

    if !document.is_object() {
        return Err(ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        }
        .into());
    }

    check_credentials(&document)?;

    let mut config = ConnectorConfig::new(raw, document, vec![]);

    if config.name().trim().is_empty() {
        return Err(missing("name"));
    }
    if config.settings().is_none() {
        return Err(missing("config"));
    }
    for key in REQUIRED_SETTINGS {
        if config.setting(key).map_or(true, |value| value.trim().is_empty()) {
            return Err(missing(&format!("config.{}", key)));
        }
    }
    if !config.has_table_filter() {
        return Err(missing("config.table.include.list"));
    }

    let hostname = config.hostname().unwrap_or_default();
    if is_loopback(&hostname) {
        return Err(ConfigError::LoopbackHostname { hostname }.into());
    }

    if config.is_bridge_alias() {
        let note = format!(
            "database.hostname '{}' is a container bridge alias; the Connect runtime will reach the database through the host network",
            hostname
        );
        info!("{}", note);
        config.add_note(note);
    }

    Ok(config)
}

fn missing(field: &str) -> crate::error::CdcrError {
    ConfigError::MissingField {
        field: field.to_string(),
    }
    .into()
}

fn is_credential_key(key: &str) -> bool {
    let key = key.to_lowercase();
    key.ends_with("password") || key.ends_with("user") || key.ends_with("username")
}

fn check_credentials(document: &Value) -> CdcrResult<()> {
    let placeholder = Regex::new(PLACEHOLDER_PATTERN)?;

    let settings = document.get("config").and_then(Value::as_object);
    for (key, value) in settings.into_iter().flatten() {
        if !is_credential_key(key) {
            continue;
        }
        if let Some(value) = value.as_str() {
            let trimmed = value.trim();
            if trimmed.is_empty() || placeholder.is_match(trimmed) {
                return Err(ConfigError::PlaceholderCredential {
                    field: key.clone(),
                    value: value.to_string(),
                }
                .into());
            }
        }
    }

    Ok(())
}

fn is_loopback(hostname: &str) -> bool {
    let hostname = hostname.trim().trim_start_matches('[').trim_end_matches(']');
    if hostname.eq_ignore_ascii_case("localhost") {
        return true;
    }
    match hostname.parse::<IpAddr>() {
        Ok(address) => address.is_loopback() || address.is_unspecified(),
        Err(_) => false,
    }
}
