//! User flag overrides from build configuration.
//!
//! Overrides come from the `[cxx]` table of a TOML configuration file:
//!
//! ```toml
//! [cxx]
//! cflags = "-std=gnu11"
//! cppflags = "-DCTHING"
//! cxxflags = ["-std=c++11", "-stdlib=libc++"]
//! cxxppflags = "-DCXXTHING"
//! ```
//!
//! String values are split on whitespace; arrays are taken as already
//! tokenized. Keys that are not flag categories are ignored.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolchainError};

/// A named flag category recognized in the `[cxx]` configuration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagCategory {
    Asflags,
    Asppflags,
    Cflags,
    Cppflags,
    Cxxflags,
    Cxxppflags,
    Ldflags,
}

impl FlagCategory {
    pub const ALL: [FlagCategory; 7] = [
        FlagCategory::Asflags,
        FlagCategory::Asppflags,
        FlagCategory::Cflags,
        FlagCategory::Cppflags,
        FlagCategory::Cxxflags,
        FlagCategory::Cxxppflags,
        FlagCategory::Ldflags,
    ];

    /// Configuration key for this category.
    pub fn key(self) -> &'static str {
        match self {
            Self::Asflags => "asflags",
            Self::Asppflags => "asppflags",
            Self::Cflags => "cflags",
            Self::Cppflags => "cppflags",
            Self::Cxxflags => "cxxflags",
            Self::Cxxppflags => "cxxppflags",
            Self::Ldflags => "ldflags",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordered user-supplied flag tokens per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    flags: BTreeMap<FlagCategory, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    cxx: BTreeMap<String, toml::Value>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tokens to a category.
    pub fn with<I, S>(mut self, category: FlagCategory, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags
            .entry(category)
            .or_default()
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Tokens for a category; empty when the category was never set.
    pub fn get(&self, category: FlagCategory) -> &[String] {
        self.flags.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.flags.values().all(Vec::is_empty)
    }

    /// Build from a flat key/value section, splitting each value on whitespace.
    pub fn from_section(section: &HashMap<String, String>) -> Self {
        let mut overrides = Self::new();
        for category in FlagCategory::ALL {
            if let Some(value) = section.get(category.key()) {
                overrides = overrides.with(category, split_flags(value));
            }
        }
        overrides
    }

    /// Parse the `[cxx]` table of a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut overrides = Self::new();
        for (key, value) in &file.cxx {
            let Some(category) = FlagCategory::from_key(key) else {
                continue;
            };
            overrides = overrides.with(category, tokens_from_value(key, value)?);
        }
        Ok(overrides)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Split a configuration string into flag tokens.
pub fn split_flags(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn tokens_from_value(key: &str, value: &toml::Value) -> Result<Vec<String>> {
    match value {
        toml::Value::String(s) => Ok(split_flags(s)),
        toml::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                toml::Value::String(s) => Ok(s.clone()),
                other => Err(ToolchainError::Config {
                    key: key.to_string(),
                    detail: format!("expected string token, found {}", other.type_str()),
                }),
            })
            .collect(),
        other => Err(ToolchainError::Config {
            key: key.to_string(),
            detail: format!("expected string or array of strings, found {}", other.type_str()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_category_is_empty() {
        let overrides = ConfigOverrides::new();
        assert!(overrides.get(FlagCategory::Cflags).is_empty());
        assert!(overrides.is_empty());
    }

    #[test]
    fn section_values_split_on_whitespace() {
        let section = HashMap::from([
            ("cflags".to_string(), "-std=gnu11   -Wall\t-g".to_string()),
            ("cxxppflags".to_string(), "-DCXXTHING".to_string()),
            ("compiler".to_string(), "gcc".to_string()),
        ]);
        let overrides = ConfigOverrides::from_section(&section);
        assert_eq!(overrides.get(FlagCategory::Cflags), ["-std=gnu11", "-Wall", "-g"]);
        assert_eq!(overrides.get(FlagCategory::Cxxppflags), ["-DCXXTHING"]);
        assert!(overrides.get(FlagCategory::Cppflags).is_empty());
    }

    #[test]
    fn with_appends_and_keeps_duplicates() {
        let overrides = ConfigOverrides::new()
            .with(FlagCategory::Cflags, ["-g"])
            .with(FlagCategory::Cflags, ["-g", "-O0"]);
        assert_eq!(overrides.get(FlagCategory::Cflags), ["-g", "-g", "-O0"]);
    }

    #[test]
    fn toml_strings_and_arrays() {
        let overrides = ConfigOverrides::from_toml_str(
            r#"
            [sdk]
            developer-path = "/Applications/Xcode.app/Contents/Developer"

            [cxx]
            cflags = "-std=gnu11"
            cppflags = "-DCTHING"
            cxxflags = ["-std=c++11", "-stdlib=libc++"]
            cxxppflags = "-DCXXTHING"
            ldflags = "-ObjC"
            "#,
        )
        .unwrap();
        assert_eq!(overrides.get(FlagCategory::Cflags), ["-std=gnu11"]);
        assert_eq!(overrides.get(FlagCategory::Cppflags), ["-DCTHING"]);
        assert_eq!(
            overrides.get(FlagCategory::Cxxflags),
            ["-std=c++11", "-stdlib=libc++"]
        );
        assert_eq!(overrides.get(FlagCategory::Ldflags), ["-ObjC"]);
    }

    #[test]
    fn toml_without_cxx_table() {
        let overrides = ConfigOverrides::from_toml_str("[other]\nkey = 1\n").unwrap();
        assert!(overrides.is_empty());
    }

    #[test]
    fn toml_rejects_non_string_values() {
        let err = ConfigOverrides::from_toml_str("[cxx]\ncflags = 3\n").unwrap_err();
        assert!(matches!(err, ToolchainError::Config { ref key, .. } if key == "cflags"));

        let err = ConfigOverrides::from_toml_str("[cxx]\ncflags = [\"-g\", 1]\n").unwrap_err();
        assert!(err.to_string().contains("expected string token"));
    }

    #[test]
    fn toml_syntax_error() {
        assert!(matches!(
            ConfigOverrides::from_toml_str("[cxx\n"),
            Err(ToolchainError::Toml(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applecxx.toml");
        std::fs::write(&path, "[cxx]\nasflags = \"-g\"\n").unwrap();
        let overrides = ConfigOverrides::load(&path).unwrap();
        assert_eq!(overrides.get(FlagCategory::Asflags), ["-g"]);

        assert!(matches!(
            ConfigOverrides::load(&dir.path().join("missing.toml")),
            Err(ToolchainError::Io(_))
        ));
    }

    #[test]
    fn category_keys_round_trip() {
        for category in FlagCategory::ALL {
            assert_eq!(FlagCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(FlagCategory::from_key("arflags"), None);
    }
}
