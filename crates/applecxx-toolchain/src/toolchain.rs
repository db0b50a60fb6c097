//! The resolved toolchain value.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use applecxx_platform::PlatformVariant;
use serde::Serialize;

use crate::config::FlagCategory;
use crate::flags::FlagSet;

/// The job a tool performs in the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolRole {
    Assembler,
    AssemblerPreprocessor,
    CCompiler,
    CPreprocessor,
    CxxCompiler,
    CxxPreprocessor,
    Linker,
    Archiver,
}

impl ToolRole {
    pub const ALL: [ToolRole; 8] = [
        ToolRole::Assembler,
        ToolRole::AssemblerPreprocessor,
        ToolRole::CCompiler,
        ToolRole::CPreprocessor,
        ToolRole::CxxCompiler,
        ToolRole::CxxPreprocessor,
        ToolRole::Linker,
        ToolRole::Archiver,
    ];

    /// Conventional executable for the role. The C++ driver doubles as linker.
    pub fn executable_name(self) -> &'static str {
        match self {
            Self::Assembler | Self::AssemblerPreprocessor | Self::CCompiler | Self::CPreprocessor => {
                "clang"
            }
            Self::CxxCompiler | Self::CxxPreprocessor | Self::Linker => "clang++",
            Self::Archiver => "ar",
        }
    }

    /// Override category appended after the mandatory flags.
    pub fn flag_category(self) -> Option<FlagCategory> {
        match self {
            Self::Assembler => Some(FlagCategory::Asflags),
            Self::AssemblerPreprocessor => Some(FlagCategory::Asppflags),
            Self::CCompiler => Some(FlagCategory::Cflags),
            Self::CPreprocessor => Some(FlagCategory::Cppflags),
            Self::CxxCompiler => Some(FlagCategory::Cxxflags),
            Self::CxxPreprocessor => Some(FlagCategory::Cxxppflags),
            Self::Linker => Some(FlagCategory::Ldflags),
            Self::Archiver => None,
        }
    }
}

impl fmt::Display for ToolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Assembler => "as",
            Self::AssemblerPreprocessor => "aspp",
            Self::CCompiler => "cc",
            Self::CPreprocessor => "cpp",
            Self::CxxCompiler => "cxx",
            Self::CxxPreprocessor => "cxxpp",
            Self::Linker => "cxxld",
            Self::Archiver => "ar",
        };
        f.write_str(s)
    }
}

/// A located executable and the flags it is always invoked with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTool {
    name: String,
    path: PathBuf,
    flags: Vec<String>,
}

impl ResolvedTool {
    pub fn new(name: impl Into<String>, path: PathBuf, flags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            path,
            flags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// `[path] ++ flags`.
    pub fn command_prefix(&self) -> Vec<String> {
        std::iter::once(self.path.display().to_string())
            .chain(self.flags.iter().cloned())
            .collect()
    }
}

/// Identifies one toolchain within a build session: `<sdk-name>-<arch>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Flavor(String);

impl Flavor {
    pub fn of(sdk_name: &str, architecture: &str) -> Self {
        Self(format!("{sdk_name}-{architecture}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully resolved, immutable C/C++ toolchain for one platform and architecture.
///
/// Every [`ToolRole`] is present; construction goes through
/// [`resolve`](crate::resolve::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Toolchain {
    flavor: Flavor,
    platform: PlatformVariant,
    sdk_name: String,
    build_version: String,
    min_version: String,
    architecture: String,
    tools: BTreeMap<ToolRole, ResolvedTool>,
    flags: FlagSet,
    extra_tools: BTreeMap<String, PathBuf>,
}

impl Toolchain {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        flavor: Flavor,
        platform: PlatformVariant,
        sdk_name: String,
        build_version: String,
        min_version: String,
        architecture: String,
        tools: BTreeMap<ToolRole, ResolvedTool>,
        flags: FlagSet,
        extra_tools: BTreeMap<String, PathBuf>,
    ) -> Self {
        debug_assert!(ToolRole::ALL.iter().all(|r| tools.contains_key(r)));
        Self {
            flavor,
            platform,
            sdk_name,
            build_version,
            min_version,
            architecture,
            tools,
            flags,
            extra_tools,
        }
    }

    pub fn flavor(&self) -> &Flavor {
        &self.flavor
    }

    pub fn platform(&self) -> PlatformVariant {
        self.platform
    }

    pub fn sdk_name(&self) -> &str {
        &self.sdk_name
    }

    /// SDK build identifier (e.g., "12B411"). Provenance only.
    pub fn build_version(&self) -> &str {
        &self.build_version
    }

    pub fn min_version(&self) -> &str {
        &self.min_version
    }

    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    pub fn tool(&self, role: ToolRole) -> &ResolvedTool {
        // Every role is inserted by the resolver.
        &self.tools[&role]
    }

    pub fn tools(&self) -> impl Iterator<Item = (ToolRole, &ResolvedTool)> {
        self.tools.iter().map(|(role, tool)| (*role, tool))
    }

    pub fn cc(&self) -> &ResolvedTool {
        self.tool(ToolRole::CCompiler)
    }

    pub fn cpp(&self) -> &ResolvedTool {
        self.tool(ToolRole::CPreprocessor)
    }

    pub fn cxx(&self) -> &ResolvedTool {
        self.tool(ToolRole::CxxCompiler)
    }

    pub fn cxxpp(&self) -> &ResolvedTool {
        self.tool(ToolRole::CxxPreprocessor)
    }

    pub fn assembler(&self) -> &ResolvedTool {
        self.tool(ToolRole::Assembler)
    }

    pub fn assembler_preprocessor(&self) -> &ResolvedTool {
        self.tool(ToolRole::AssemblerPreprocessor)
    }

    pub fn cxxld(&self) -> &ResolvedTool {
        self.tool(ToolRole::Linker)
    }

    pub fn ar(&self) -> &ResolvedTool {
        self.tool(ToolRole::Archiver)
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn cflags(&self) -> &[String] {
        &self.flags.cflags
    }

    pub fn cppflags(&self) -> &[String] {
        &self.flags.cppflags
    }

    pub fn cxxflags(&self) -> &[String] {
        &self.flags.cxxflags
    }

    pub fn cxxppflags(&self) -> &[String] {
        &self.flags.cxxppflags
    }

    pub fn asflags(&self) -> &[String] {
        &self.flags.asflags
    }

    pub fn asppflags(&self) -> &[String] {
        &self.flags.asppflags
    }

    pub fn ldflags(&self) -> &[String] {
        &self.flags.ldflags
    }

    /// Path of an optional helper tool (`libtool`, `lipo`, `strip`) if found.
    pub fn extra_tool(&self, name: &str) -> Option<&Path> {
        self.extra_tools.get(name).map(PathBuf::as_path)
    }
}
