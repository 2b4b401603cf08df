use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// How uploaded files get their on-disk names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileNaming {
    /// `<millis><ext>`. Two uploads in the same millisecond with the same
    /// extension overwrite each other.
    Timestamp,
    /// `<millis>-<uuid><ext>`.
    Unique,
}

impl FromStr for FileNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timestamp" => Ok(FileNaming::Timestamp),
            "unique" => Ok(FileNaming::Unique),
            other => Err(format!("unknown naming strategy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    /// Overrides the database named in the URI.
    pub mongo_database: Option<String>,
    pub upload_dir: PathBuf,
    pub file_naming: FileNaming,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongo_uri = lookup("MONGO_URI").unwrap_or_else(|| {
            log::warn!("MONGO_URI not set, using default: {}", DEFAULT_MONGO_URI);
            DEFAULT_MONGO_URI.to_string()
        });

        Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            mongo_uri,
            mongo_database: lookup("MONGO_DATABASE").filter(|s| !s.is_empty()),
            upload_dir: PathBuf::from(
                lookup("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            ),
            file_naming: parse_or(&lookup, "UPLOAD_NAMING", FileNaming::Unique),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            log::warn!("Invalid {} value '{}': {}, using default {:?}", key, raw, e, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.mongo_uri, "mongodb://localhost:27017");
        assert_eq!(config.mongo_database, None);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.file_naming, FileNaming::Unique);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("MONGO_URI", "mongodb://db:27017/skai"),
            ("UPLOAD_DIR", "/var/data/uploads"),
            ("UPLOAD_NAMING", "Timestamp"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.mongo_uri, "mongodb://db:27017/skai");
        assert_eq!(config.upload_dir, PathBuf::from("/var/data/uploads"));
        assert_eq!(config.file_naming, FileNaming::Timestamp);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("UPLOAD_NAMING", "random")]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.file_naming, FileNaming::Unique);
    }
}
