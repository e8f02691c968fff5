use crate::constants::{ID_OVERRIDES, NAME_OVERRIDES};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Hand-maintained corrections for instructors the ratings service
/// spells differently or cannot find by name.
///
/// Loaded from TOML:
///
/// ```toml
/// [names]
/// "Nadine v. F. u. Ludwigsdorff" = "Nadine von Frankenberg"
///
/// [ids]
/// "Donald Bonidie" = "141380"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverrideTable {
    /// Display name -> spelling to submit to search
    #[serde(default)]
    pub names: HashMap<String, String>,
    /// Display name -> legacy teacher id
    #[serde(default)]
    pub ids: HashMap<String, String>,
}

impl OverrideTable {
    /// The tables compiled into the binary
    pub fn builtin() -> Self {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>()
        };

        OverrideTable {
            names: to_map(NAME_OVERRIDES),
            ids: to_map(ID_OVERRIDES),
        }
    }

    /// Load tables from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Spelling to search for; the input itself when no override exists
    pub fn resolve_search_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.names.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Legacy id that bypasses search, if one is known
    pub fn resolve_known_id(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }
}
