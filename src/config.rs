//! Generator settings file (JSON).
//!
//! Every key is optional; explicit command-line flags win over the file.

use std::path::Path;

use serde::Deserialize;

use crate::codegen::ModuleConvention;
use crate::error::{Error, Result};
use crate::format::IndentStyle;
use crate::path_de;

pub const DEFAULT_ROOT_NAME: &str = "jsonModel";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    pub module: Option<ModuleConvention>,
    pub root_name: Option<String>,
    pub indent: Option<IndentStyle>,
    pub header: Option<bool>,
    pub import: Option<bool>,
    pub raw: Option<bool>,
}

impl GeneratorConfig {
    pub fn from_json_str(src: &str, origin: &str) -> Result<Self> {
        path_de::from_str_with_path(src).map_err(|err| Error::Config {
            path: origin.to_string(),
            message: err.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let origin = path.to_string_lossy().to_string();
        let src = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: origin.clone(),
            source,
        })?;
        Self::from_json_str(&src, &origin)
    }
}
