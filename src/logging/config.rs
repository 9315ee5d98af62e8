use serde::{Deserialize, Serialize};

/// Output format of the log layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, for development.
    Pretty,
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

/// Logging settings.
///
/// `level` is an `EnvFilter` directive (`"info"`, `"herald=debug,warn"`, ...).
/// `RUST_LOG`, when set, takes precedence over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.level, "info");
        assert_eq!(cfg.format, LogFormat::Compact);
        assert!(cfg.with_ansi);
    }

    /// Missing fields fall back to defaults and formats are lowercase.
    #[test]
    fn test_partial_deserialize() {
        let cfg: LoggingConfig =
            serde_json::from_str(r#"{ "format": "json", "level": "herald=trace" }"#).unwrap();
        assert_eq!(cfg.format, LogFormat::Json);
        assert_eq!(cfg.level, "herald=trace");
        assert!(cfg.with_target);
    }
}
