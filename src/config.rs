use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{validation::DEFAULT_MAX_DEPTH, Error, InternalResult};

/// Engine settings shared by every schema-bearing constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of nested `object` levels in a schema.
    #[serde(default = "default_max_schema_depth")]
    pub max_schema_depth: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_schema_depth: default_max_schema_depth(),
        }
    }
}

impl EngineConfig {
    // JSONファイルから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        from_file(path)
    }

    pub fn with_max_schema_depth(mut self, max_schema_depth: i32) -> Self {
        self.max_schema_depth = max_schema_depth;
        self
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)
        .map_err(|e| Error::internal(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::internal(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::internal(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

fn default_max_schema_depth() -> i32 {
    DEFAULT_MAX_DEPTH
}
