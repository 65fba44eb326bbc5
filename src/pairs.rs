use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One entry of an external phrase-pair data set: the reference phrase and a
/// deliberately flawed variant of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasePair {
    pub reference: String,
    pub flawed: String,
}

#[derive(Debug, Error)]
pub enum PairsError {
    #[error("failed to read pairs file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON pairs file")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML pairs file")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct PairsFile {
    pairs: Vec<PhrasePair>,
}

/// Load a phrase-pair file. TOML files hold a `[[pairs]]` table array; any
/// other extension is parsed as a JSON array.
pub fn load_pairs(path: &Path) -> Result<Vec<PhrasePair>, PairsError> {
    let content = fs::read_to_string(path).map_err(|source| PairsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(toml::from_str::<PairsFile>(&content)?.pairs),
        _ => Ok(serde_json::from_str(&content)?),
    }
}
