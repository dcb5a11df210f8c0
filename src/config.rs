use crate::error::{DsResult, ScoreError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub matching: MatchingParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingParams {
    /// Maximum distance between a selection and its defect for a hit.
    /// 0.0 demands an exact position match.
    #[arg(long, default_value_t = 0.0)]
    pub selection_threshold: f64,
}

impl Default for MatchingParams {
    fn default() -> Self {
        Self {
            selection_threshold: 0.0,
        }
    }
}

impl MatchingParams {
    pub fn validate(&self) -> DsResult<()> {
        let t = self.selection_threshold;
        if !t.is_finite() || t < 0.0 {
            return Err(ScoreError::Config(format!(
                "selection_threshold must be a finite, non-negative distance (got {})",
                t
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DsResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overrides file values with flags the user actually typed.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(matching.selection_threshold, "selection_threshold");
    }

    pub fn validate(&self) -> DsResult<()> {
        self.matching.validate()
    }
}
