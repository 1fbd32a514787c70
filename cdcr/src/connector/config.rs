use serde_json::{Map, Value};

pub const BRIDGE_ALIASES: &[&str] = &[
    "host.docker.internal",
    "gateway.docker.internal",
    "host.containers.internal",
    "host.minikube.internal",
];

const TABLE_FILTER_KEYS: &[&str] = &["table.include.list", "table.whitelist", "table.exclude.list"];

/// A validated connector configuration document. The raw text is what gets
/// posted to Kafka Connect; the parsed form answers questions about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorConfig {
    raw: String,
    document: Value,
    notes: Vec<String>,
}

impl ConnectorConfig {
    pub(crate) fn new(raw: String, document: Value, notes: Vec<String>) -> Self {
        ConnectorConfig {
            raw,
            document,
            notes,
        }
    }

    pub(crate) fn add_note(&mut self, note: String) {
        self.notes.push(note);
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Informational notes collected during validation.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// The connector name, used as the key for every Connect REST call.
    pub fn name(&self) -> &str {
        self.document
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn settings(&self) -> Option<&Map<String, Value>> {
        self.document.get("config").and_then(Value::as_object)
    }

    /// A `config` entry rendered as a string. Numbers and booleans are
    /// accepted since Connect itself accepts them.
    pub fn setting(&self, key: &str) -> Option<String> {
        match self.settings()?.get(key)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    pub fn connector_class(&self) -> Option<String> {
        self.setting("connector.class")
    }

    pub fn hostname(&self) -> Option<String> {
        self.setting("database.hostname")
    }

    /// `database.port`, else the usual port for the connector class.
    pub fn database_port(&self) -> Option<u16> {
        if let Some(port) = self.setting("database.port") {
            return port.trim().parse().ok();
        }

        let class = self.connector_class()?.to_lowercase();
        if class.contains("sqlserver") {
            Some(1433)
        } else if class.contains("mysql") || class.contains("mariadb") {
            Some(3306)
        } else if class.contains("postgres") {
            Some(5432)
        } else if class.contains("oracle") {
            Some(1521)
        } else if class.contains("db2") {
            Some(50000)
        } else {
            None
        }
    }

    pub fn is_bridge_alias(&self) -> bool {
        match self.hostname() {
            Some(hostname) => BRIDGE_ALIASES.contains(&hostname.to_lowercase().as_str()),
            None => false,
        }
    }

    pub fn topic_prefix(&self) -> Option<String> {
        self.setting("topic.prefix")
            .or_else(|| self.setting("database.server.name"))
    }

    pub fn database_names(&self) -> Vec<String> {
        self.setting("database.names")
            .or_else(|| self.setting("database.dbname"))
            .map(|names| split_list(&names))
            .unwrap_or_default()
    }

    /// Table filter entries; only the include lists name captured tables.
    pub fn captured_tables(&self) -> Vec<String> {
        self.setting("table.include.list")
            .or_else(|| self.setting("table.whitelist"))
            .map(|tables| split_list(&tables))
            .unwrap_or_default()
    }

    pub fn has_table_filter(&self) -> bool {
        TABLE_FILTER_KEYS
            .iter()
            .any(|key| self.setting(key).map_or(false, |value| !value.trim().is_empty()))
    }

    pub fn schema_history_topic(&self) -> Option<String> {
        self.setting("schema.history.internal.kafka.topic")
            .or_else(|| self.setting("database.history.kafka.topic"))
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
