//! Runtime properties consumed by the model.
//!
//! The core only reads already-resolved values; loading is a thin JSON
//! layer so a deployment can point the client at its solving peer without
//! recompiling.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DaedalusError, Result};

/// Worker-pool size and remote solver address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Properties {
    /// Number of pool workers.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Remote solver host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Remote solver port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_threads() -> usize {
    4
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5400
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Properties {
    /// "host:port" form consumed by the solve client.
    pub fn remote_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load properties from a JSON file.
pub fn load_properties(path: &Path) -> Result<Properties> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DaedalusError::NotFound(format!("properties file {}", path.display()))
        } else {
            DaedalusError::Io(e)
        }
    })?;
    let props: Properties = serde_json::from_str(&text)
        .map_err(|e| DaedalusError::Format(format!("properties file: {e}")))?;
    if props.threads == 0 {
        return Err(DaedalusError::InvalidArgument(
            "threads must be at least 1".into(),
        ));
    }
    Ok(props)
}
