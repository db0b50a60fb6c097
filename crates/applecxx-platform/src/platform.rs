//! Platform variant table.
//!
//! Every Apple OS family comes in a device flavor and (except macOS) a
//! simulator flavor. The two flavors need differently named minimum-version
//! flags, and simulator links must repeat the version flag on the linker
//! command line. Per-variant data lives in a fixed table indexed by the
//! variant, so resolution never branches on platform strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, Result};

/// An Apple target platform, device or simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformVariant {
    MacOsX,
    IphoneOs,
    IphoneSimulator,
    WatchOs,
    WatchSimulator,
    AppleTvOs,
    AppleTvSimulator,
}

/// Static per-variant attributes.
#[derive(Debug)]
struct VariantInfo {
    name: &'static str,
    bundle_name: &'static str,
    min_version_flag: &'static str,
    simulator: bool,
    default_architectures: &'static [&'static str],
}

/// Indexed by `PlatformVariant as usize`; order must follow the enum.
const TABLE: [VariantInfo; 7] = [
    VariantInfo {
        name: "macosx",
        bundle_name: "MacOSX",
        min_version_flag: "-mmacosx-version-min",
        simulator: false,
        default_architectures: &["x86_64"],
    },
    VariantInfo {
        name: "iphoneos",
        bundle_name: "iPhoneOS",
        min_version_flag: "-mios-version-min",
        simulator: false,
        default_architectures: &["armv7", "arm64"],
    },
    VariantInfo {
        name: "iphonesimulator",
        bundle_name: "iPhoneSimulator",
        min_version_flag: "-mios-simulator-version-min",
        simulator: true,
        default_architectures: &["i386", "x86_64"],
    },
    VariantInfo {
        name: "watchos",
        bundle_name: "WatchOS",
        min_version_flag: "-mwatchos-version-min",
        simulator: false,
        default_architectures: &["armv7k"],
    },
    VariantInfo {
        name: "watchsimulator",
        bundle_name: "WatchSimulator",
        min_version_flag: "-mwatchsimulator-version-min",
        simulator: true,
        default_architectures: &["i386"],
    },
    VariantInfo {
        name: "appletvos",
        bundle_name: "AppleTVOS",
        min_version_flag: "-mappletvos-version-min",
        simulator: false,
        default_architectures: &["arm64"],
    },
    VariantInfo {
        name: "appletvsimulator",
        bundle_name: "AppleTVSimulator",
        min_version_flag: "-mappletvsimulator-version-min",
        simulator: true,
        default_architectures: &["x86_64"],
    },
];

impl PlatformVariant {
    /// Every variant, in table order.
    pub const ALL: [PlatformVariant; 7] = [
        PlatformVariant::MacOsX,
        PlatformVariant::IphoneOs,
        PlatformVariant::IphoneSimulator,
        PlatformVariant::WatchOs,
        PlatformVariant::WatchSimulator,
        PlatformVariant::AppleTvOs,
        PlatformVariant::AppleTvSimulator,
    ];

    fn info(self) -> &'static VariantInfo {
        &TABLE[self as usize]
    }

    /// Canonical short name (e.g., "iphoneos").
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Directory stem of the platform bundle and its SDKs (e.g., "iPhoneOS").
    pub fn bundle_name(self) -> &'static str {
        self.info().bundle_name
    }

    /// Name of the minimum-deployment-version flag, without the `=` value.
    pub fn min_version_flag(self) -> &'static str {
        self.info().min_version_flag
    }

    /// Whether this is a simulator platform.
    pub fn is_simulator(self) -> bool {
        self.info().simulator
    }

    /// Whether linking for this platform needs the version flag repeated
    /// on the linker command line.
    pub fn requires_simulator_linker_flags(self) -> bool {
        self.is_simulator()
    }

    /// The single `<flag>=<version>` token for a minimum deployment version.
    pub fn min_version_arg(self, min_version: &str) -> String {
        format!("{}={min_version}", self.min_version_flag())
    }

    /// Architectures conventionally built for this platform.
    pub fn default_architectures(self) -> &'static [&'static str] {
        self.info().default_architectures
    }

    /// Parse a canonical short name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }

    /// Derive the platform from a versioned SDK name such as "iphoneos8.0".
    pub fn from_sdk_name(sdk_name: &str) -> Result<Self> {
        let base = sdk_name.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
        Self::parse(base).ok_or_else(|| PlatformError::UnknownPlatform {
            name: sdk_name.to_string(),
        })
    }
}

impl fmt::Display for PlatformVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlatformVariant {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| PlatformError::UnknownPlatform { name: s.to_string() })
    }
}
