//! Flag composition.
//!
//! Every compiler-like tool receives the mandatory target flags (sysroot,
//! architecture, minimum OS version) followed by the user overrides for its
//! category. Preprocessor categories are built by concatenation:
//!
//! - `cppflags = cflags ++ overrides[cppflags]`
//! - `cxxppflags = cxxflags ++ overrides[cxxppflags]`
//! - `asppflags = asflags ++ overrides[asppflags]`
//!
//! Nothing is deduplicated or reordered.

use std::path::Path;

use applecxx_platform::PlatformVariant;
use serde::Serialize;

use crate::config::{ConfigOverrides, FlagCategory};
use crate::toolchain::ToolRole;

/// Resolved flag sequences for every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagSet {
    pub asflags: Vec<String>,
    pub asppflags: Vec<String>,
    pub cflags: Vec<String>,
    pub cppflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub cxxppflags: Vec<String>,
    pub ldflags: Vec<String>,
}

impl FlagSet {
    /// Layer overrides into categories.
    pub fn compose(overrides: &ConfigOverrides) -> Self {
        let asflags = overrides.get(FlagCategory::Asflags).to_vec();
        let cflags = overrides.get(FlagCategory::Cflags).to_vec();
        let cxxflags = overrides.get(FlagCategory::Cxxflags).to_vec();
        Self {
            asppflags: concat(&asflags, overrides.get(FlagCategory::Asppflags)),
            cppflags: concat(&cflags, overrides.get(FlagCategory::Cppflags)),
            cxxppflags: concat(&cxxflags, overrides.get(FlagCategory::Cxxppflags)),
            ldflags: overrides.get(FlagCategory::Ldflags).to_vec(),
            asflags,
            cflags,
            cxxflags,
        }
    }

    pub fn get(&self, category: FlagCategory) -> &[String] {
        match category {
            FlagCategory::Asflags => &self.asflags,
            FlagCategory::Asppflags => &self.asppflags,
            FlagCategory::Cflags => &self.cflags,
            FlagCategory::Cppflags => &self.cppflags,
            FlagCategory::Cxxflags => &self.cxxflags,
            FlagCategory::Cxxppflags => &self.cxxppflags,
            FlagCategory::Ldflags => &self.ldflags,
        }
    }
}

fn concat(base: &[String], extra: &[String]) -> Vec<String> {
    base.iter().chain(extra).cloned().collect()
}

/// `-isysroot <sdk> -arch <arch> <min-version-flag>=<version>`.
pub fn mandatory_flags(
    sdk_path: &Path,
    architecture: &str,
    min_version: &str,
    platform: PlatformVariant,
) -> Vec<String> {
    vec![
        "-isysroot".into(),
        sdk_path.display().to_string(),
        "-arch".into(),
        architecture.into(),
        platform.min_version_arg(min_version),
    ]
}

/// Flags for the linker driver. Simulator links also carry the version flag.
pub fn linker_flags(
    sdk_path: &Path,
    architecture: &str,
    min_version: &str,
    platform: PlatformVariant,
) -> Vec<String> {
    let mut flags = vec![
        "-isysroot".into(),
        sdk_path.display().to_string(),
        "-arch".into(),
        architecture.into(),
    ];
    if platform.requires_simulator_linker_flags() {
        flags.push(platform.min_version_arg(min_version));
    }
    flags
}

/// Composes per-tool flag sequences for one target.
#[derive(Debug, Clone)]
pub struct FlagComposer {
    mandatory: Vec<String>,
    linker: Vec<String>,
    categories: FlagSet,
}

impl FlagComposer {
    pub fn new(
        sdk_path: &Path,
        architecture: &str,
        min_version: &str,
        platform: PlatformVariant,
        overrides: &ConfigOverrides,
    ) -> Self {
        Self {
            mandatory: mandatory_flags(sdk_path, architecture, min_version, platform),
            linker: linker_flags(sdk_path, architecture, min_version, platform),
            categories: FlagSet::compose(overrides),
        }
    }

    pub fn categories(&self) -> &FlagSet {
        &self.categories
    }

    pub fn into_categories(self) -> FlagSet {
        self.categories
    }

    /// Flags following the executable path for `role`.
    pub fn flags_for(&self, role: ToolRole) -> Vec<String> {
        match role {
            ToolRole::Archiver => Vec::new(),
            ToolRole::Linker => concat(&self.linker, &self.categories.ldflags),
            other => {
                let category = other
                    .flag_category()
                    .map(|c| self.categories.get(c))
                    .unwrap_or(&[]);
                concat(&self.mandatory, category)
            }
        }
    }
}
