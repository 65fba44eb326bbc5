use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Penalty weight per error kind, summed into `Analysis::total_votes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteWeights {
    #[serde(default = "default_single_char")]
    pub single_char: u32,
    #[serde(default = "default_multi_char")]
    pub multi_char: u32,
    #[serde(default = "default_multi_char")]
    pub substitution: u32,
    #[serde(default = "default_single_char")]
    pub position: u32,
    #[serde(default = "default_single_char")]
    pub extra: u32,
    #[serde(default = "default_multi_char")]
    pub missing: u32,
    #[serde(default = "default_single_char")]
    pub punctuation: u32,
}

fn default_single_char() -> u32 {
    1
}

fn default_multi_char() -> u32 {
    2
}

impl Default for VoteWeights {
    fn default() -> Self {
        Self {
            single_char: 1,
            multi_char: 2,
            substitution: 2,
            position: 1,
            extra: 1,
            missing: 2,
            punctuation: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Words at or below this length always take the multi-char penalty.
    #[serde(default = "default_short_word_len")]
    pub short_word_len: usize,

    /// Matching-position ratio above which an unpaired extra/missing pair is
    /// re-classified as a substitution.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    #[serde(default)]
    pub votes: VoteWeights,
}

fn default_short_word_len() -> usize {
    3
}

fn default_similarity_threshold() -> f64 {
    0.5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            short_word_len: 3,
            similarity_threshold: 0.5,
            votes: VoteWeights::default(),
        }
    }
}

impl Config {
    /// Load configuration with priority: local config > global config > defaults.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        let local_path = PathBuf::from(".phrasechk.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        if other.short_word_len != default_short_word_len() {
            self.short_word_len = other.short_word_len;
        }
        if other.similarity_threshold != default_similarity_threshold() {
            self.similarity_threshold = other.similarity_threshold;
        }
        if other.votes != VoteWeights::default() {
            self.votes = other.votes;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "phrasechk").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.short_word_len, 3);
        assert_eq!(config.similarity_threshold, 0.5);
        assert_eq!(config.votes.missing, 2);
        assert_eq!(config.votes.extra, 1);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config::default();
        let override_config = Config {
            short_word_len: 4,
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.short_word_len, 4);
        assert_eq!(merged.similarity_threshold, 0.5);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str("similarity_threshold = 0.6").unwrap();
        assert_eq!(config.similarity_threshold, 0.6);
        assert_eq!(config.short_word_len, 3);
        assert_eq!(config.votes, VoteWeights::default());
    }
}
