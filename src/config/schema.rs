use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Zone name used when the config does not set one.
pub const DEFAULT_ZONE: &str = "Northern Railway Zone";

/// User configuration.
///
/// Everything is optional; a missing config file is equivalent to `{}`.
/// Scoring constants (weights, discount baseline, multiplier) are policy and
/// deliberately absent from here.
///
/// Example YAML:
/// ```yaml
/// zone: "Northern Railway Zone"
/// input: "reports/latest-scores.csv"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Display name shown on the auditor banner and printed certificates.
    #[serde(default)]
    pub zone: Option<String>,

    /// Default score table used when no file argument is given.
    #[serde(default)]
    pub input: Option<PathBuf>,
}

impl Config {
    /// The zone to display, falling back to [`DEFAULT_ZONE`].
    pub fn zone(&self) -> &str {
        self.zone.as_deref().unwrap_or(DEFAULT_ZONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.zone.is_none());
        assert!(config.input.is_none());
        assert_eq!(config.zone(), DEFAULT_ZONE);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
zone: "Western Freight Corridor"
input: "reports/latest-scores.csv"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.zone(), "Western Freight Corridor");
        assert_eq!(
            config.input,
            Some(PathBuf::from("reports/latest-scores.csv"))
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "weights:\n  Track: 0.9\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            zone: Some("Western Freight Corridor".to_string()),
            input: Some(PathBuf::from("scores.csv")),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
