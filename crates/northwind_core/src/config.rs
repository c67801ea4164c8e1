//! Connection string parsing for the Northwind repository.
//!
//! # Responsibility
//! - Turn one caller-supplied connection string into typed connection options.
//! - Reject options that cannot work with per-operation connections.
//!
//! # Invariants
//! - `data_source` is never empty and never names an in-memory database,
//!   neither as `:memory:` nor as a `file:` URI with `:memory:`/`mode=memory`.
//! - Keys are matched case-insensitively with inner whitespace ignored.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const IN_MEMORY_SOURCE: &str = ":memory:";

/// Errors produced while parsing a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No `Data Source` was provided.
    MissingDataSource,
    /// In-memory databases do not outlive a single connection.
    InMemoryUnsupported,
    /// A `key=value` segment had no `=`.
    MalformedSegment(String),
    /// The key is not a recognized connection option.
    UnknownKey(String),
    /// The value could not be parsed for the given key.
    InvalidValue { key: String, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDataSource => write!(f, "connection string has no data source"),
            Self::InMemoryUnsupported => write!(
                f,
                "in-memory data source is not supported; every operation opens its own connection"
            ),
            Self::MalformedSegment(segment) => {
                write!(f, "malformed connection string segment `{segment}`")
            }
            Self::UnknownKey(key) => write!(f, "unknown connection string key `{key}`"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for connection string key `{key}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Typed connection options parsed from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// SQLite database file.
    pub data_source: PathBuf,
    /// How long a connection waits on a locked database.
    pub busy_timeout: Duration,
    /// Mirrors `PRAGMA foreign_keys`.
    pub foreign_keys: bool,
    /// Apply embedded schema migrations when a connection is opened.
    pub migrate: bool,
    /// Wrap multi-statement writes in one transaction.
    pub atomic_writes: bool,
}

impl ConnectionConfig {
    /// Creates a config for a database file with default options.
    pub fn new(data_source: impl Into<PathBuf>) -> Self {
        Self {
            data_source: data_source.into(),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            foreign_keys: true,
            migrate: true,
            atomic_writes: true,
        }
    }

    /// Parses a connection string.
    ///
    /// Accepts either a bare file path or `key=value` pairs separated by `;`,
    /// e.g. `Data Source=/var/lib/northwind.db;Busy Timeout=2000;Atomic Writes=false`.
    ///
    /// A string whose first key is unknown but looks like a path (contains
    /// `/`, `\` or `:`) is taken as a bare path, so `/data/a=b.db` works.
    /// Values cannot contain `;`: a `Data Source` with `;` in it must be
    /// passed as a bare path.
    ///
    /// # Errors
    /// - Returns `MissingDataSource` when no file is named.
    /// - Returns `InMemoryUnsupported` for `:memory:` and in-memory `file:` URIs.
    /// - Returns `UnknownKey`/`InvalidValue`/`MalformedSegment` for bad options.
    pub fn parse(connection_string: &str) -> Result<Self, ConfigError> {
        let trimmed = connection_string.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingDataSource);
        }

        if !trimmed.contains('=') || is_bare_path(trimmed) {
            return Self::with_source(trimmed);
        }

        let mut data_source: Option<String> = None;
        let mut busy_timeout_ms = DEFAULT_BUSY_TIMEOUT_MS;
        let mut foreign_keys = true;
        let mut migrate = true;
        let mut atomic_writes = true;

        for segment in trimmed.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = segment
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedSegment(segment.to_string()))?;
            let key = normalize_key(raw_key);
            let value = raw_value.trim();

            match key.as_str() {
                "datasource" | "filename" => data_source = Some(value.to_string()),
                "busytimeout" => busy_timeout_ms = parse_value(raw_key, value)?,
                "foreignkeys" => foreign_keys = parse_bool(raw_key, value)?,
                "migrate" => migrate = parse_bool(raw_key, value)?,
                "atomicwrites" => atomic_writes = parse_bool(raw_key, value)?,
                _ => return Err(ConfigError::UnknownKey(raw_key.trim().to_string())),
            }
        }

        let mut config = Self::with_source(data_source.as_deref().unwrap_or(""))?;
        config.busy_timeout = Duration::from_millis(busy_timeout_ms);
        config.foreign_keys = foreign_keys;
        config.migrate = migrate;
        config.atomic_writes = atomic_writes;
        Ok(config)
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        self.data_source.as_path()
    }

    fn with_source(source: &str) -> Result<Self, ConfigError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ConfigError::MissingDataSource);
        }
        if names_in_memory_database(source) {
            return Err(ConfigError::InMemoryUnsupported);
        }
        Ok(Self::new(source))
    }
}

/// SQLite connections are opened with URI filenames enabled, so both the
/// `:memory:` name and `file:` URIs can select a private in-memory database.
fn names_in_memory_database(source: &str) -> bool {
    let lowered = source.to_ascii_lowercase();
    if lowered == IN_MEMORY_SOURCE {
        return true;
    }
    lowered.starts_with("file:")
        && (lowered.contains(IN_MEMORY_SOURCE) || lowered.contains("mode=memory"))
}

fn is_bare_path(connection_string: &str) -> bool {
    let first_key = connection_string
        .split(';')
        .next()
        .and_then(|segment| segment.split_once('='))
        .map_or("", |(key, _)| key);
    !is_known_key(&normalize_key(first_key))
        && first_key.contains(['/', '\\', ':'])
}

fn is_known_key(key: &str) -> bool {
    matches!(
        key,
        "datasource" | "filename" | "busytimeout" | "foreignkeys" | "migrate" | "atomicwrites"
    )
}

impl FromStr for ConnectionConfig {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid_value(key, value)),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid_value(key, value))
}

fn invalid_value(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.trim().to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ConnectionConfig};
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn bare_path_uses_defaults() {
        let config = ConnectionConfig::parse("/tmp/northwind.db").unwrap();
        assert_eq!(config.path(), Path::new("/tmp/northwind.db"));
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
        assert!(config.foreign_keys);
        assert!(config.migrate);
        assert!(config.atomic_writes);
    }

    #[test]
    fn key_value_pairs_are_case_and_space_insensitive() {
        let config: ConnectionConfig =
            "data source = /srv/nw.db; BUSY TIMEOUT=250;foreign keys=off;AtomicWrites=false;"
                .parse()
                .unwrap();
        assert_eq!(config.path(), Path::new("/srv/nw.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert!(!config.foreign_keys);
        assert!(config.migrate);
        assert!(!config.atomic_writes);
    }

    #[test]
    fn missing_data_source_is_rejected() {
        assert_eq!(
            ConnectionConfig::parse("Migrate=false"),
            Err(ConfigError::MissingDataSource)
        );
        assert_eq!(
            ConnectionConfig::parse("   "),
            Err(ConfigError::MissingDataSource)
        );
    }

    #[test]
    fn in_memory_source_is_rejected() {
        assert_eq!(
            ConnectionConfig::parse(":memory:"),
            Err(ConfigError::InMemoryUnsupported)
        );
        assert_eq!(
            ConnectionConfig::parse("Data Source=:MEMORY:"),
            Err(ConfigError::InMemoryUnsupported)
        );
        assert_eq!(
            ConnectionConfig::parse("file::memory:"),
            Err(ConfigError::InMemoryUnsupported)
        );
        assert_eq!(
            ConnectionConfig::parse("file:northwind?mode=memory&cache=shared"),
            Err(ConfigError::InMemoryUnsupported)
        );
        assert_eq!(
            ConnectionConfig::parse("Data Source=file::memory:?cache=shared"),
            Err(ConfigError::InMemoryUnsupported)
        );
    }

    #[test]
    fn file_uri_on_disk_is_accepted() {
        let config = ConnectionConfig::parse("file:/srv/northwind.db").unwrap();
        assert_eq!(config.path(), Path::new("file:/srv/northwind.db"));
    }

    #[test]
    fn bare_path_with_equals_sign_is_not_split() {
        let config = ConnectionConfig::parse("/data/a=b.db").unwrap();
        assert_eq!(config.path(), Path::new("/data/a=b.db"));
        assert!(config.atomic_writes);

        assert_eq!(
            ConnectionConfig::parse("Data Sorce=a.db"),
            Err(ConfigError::UnknownKey("Data Sorce".to_string()))
        );
    }

    #[test]
    fn bad_options_are_reported() {
        assert_eq!(
            ConnectionConfig::parse("Data Source=a.db;Pooling=true"),
            Err(ConfigError::UnknownKey("Pooling".to_string()))
        );
        assert!(matches!(
            ConnectionConfig::parse("Data Source=a.db;Busy Timeout=soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            ConnectionConfig::parse("Data Source=a.db;Migrate=maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            ConnectionConfig::parse("Data Source=a.db;garbage"),
            Err(ConfigError::MalformedSegment("garbage".to_string()))
        );
    }
}
