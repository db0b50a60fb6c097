//! SDK installation paths.
//!
//! An [`SdkPaths`] value describes one installed SDK: the developer tools
//! root, the toolchain roots (searched in declaration order), the platform
//! bundle, and the SDK sysroot. It is built once per installation and then
//! shared read-only by every toolchain resolution against that SDK.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PlatformError, Result};

const USR_BIN: &str = "usr/bin";

/// Immutable set of paths for one SDK installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SdkPaths {
    developer_path: PathBuf,
    toolchain_paths: Vec<PathBuf>,
    platform_path: PathBuf,
    sdk_path: PathBuf,
}

impl SdkPaths {
    /// Start building a path set.
    pub fn builder() -> SdkPathsBuilder {
        SdkPathsBuilder::default()
    }

    /// Lay out the conventional tree under an Xcode `Developer` directory.
    ///
    /// `platform_dir_name` is the bundle stem (e.g., "iPhoneOS") and
    /// `sdk_dir_name` the SDK stem (e.g., "iPhoneOS8.0").
    pub fn from_developer_dir(
        developer_path: impl Into<PathBuf>,
        platform_dir_name: &str,
        sdk_dir_name: &str,
    ) -> Result<Self> {
        let developer_path = developer_path.into();
        let platform_path = developer_path
            .join("Platforms")
            .join(format!("{platform_dir_name}.platform"));
        let sdk_path = platform_path
            .join("Developer/SDKs")
            .join(format!("{sdk_dir_name}.sdk"));
        Self::builder()
            .developer_path(developer_path.clone())
            .add_toolchain_path(developer_path.join("Toolchains/XcodeDefault.xctoolchain"))
            .platform_path(platform_path)
            .sdk_path(sdk_path)
            .build()
    }

    pub fn developer_path(&self) -> &Path {
        &self.developer_path
    }

    pub fn toolchain_paths(&self) -> &[PathBuf] {
        &self.toolchain_paths
    }

    pub fn platform_path(&self) -> &Path {
        &self.platform_path
    }

    pub fn sdk_path(&self) -> &Path {
        &self.sdk_path
    }

    /// `usr/bin` under each toolchain root, in declaration order.
    pub fn toolchain_bin_dirs(&self) -> Vec<PathBuf> {
        self.toolchain_paths.iter().map(|p| p.join(USR_BIN)).collect()
    }

    /// The developer-tools `usr/bin` inside the platform bundle.
    pub fn platform_bin_dir(&self) -> PathBuf {
        self.platform_path.join("Developer").join(USR_BIN)
    }

    /// Ordered directories to search for tools: every toolchain bin
    /// directory, then the platform bin directory.
    pub fn tool_search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.toolchain_bin_dirs();
        dirs.push(self.platform_bin_dir());
        dirs
    }
}

/// Builder for [`SdkPaths`].
#[derive(Debug, Default, Clone)]
pub struct SdkPathsBuilder {
    developer_path: Option<PathBuf>,
    toolchain_paths: Vec<PathBuf>,
    platform_path: Option<PathBuf>,
    sdk_path: Option<PathBuf>,
}

impl SdkPathsBuilder {
    pub fn developer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.developer_path = Some(path.into());
        self
    }

    /// Append a toolchain root. Roots are searched in the order added.
    pub fn add_toolchain_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.toolchain_paths.push(path.into());
        self
    }

    pub fn add_toolchain_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.toolchain_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn platform_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.platform_path = Some(path.into());
        self
    }

    pub fn sdk_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sdk_path = Some(path.into());
        self
    }

    /// Validate and freeze the path set.
    ///
    /// An empty toolchain list is accepted; it simply contributes no
    /// search directories.
    pub fn build(self) -> Result<SdkPaths> {
        let developer_path = required("developer-path", self.developer_path)?;
        let platform_path = required("platform-path", self.platform_path)?;
        let sdk_path = required("sdk-path", self.sdk_path)?;
        if let Some(i) = self
            .toolchain_paths
            .iter()
            .position(|p| p.as_os_str().is_empty())
        {
            return Err(PlatformError::InvalidSdkPaths {
                field: "toolchain-paths",
                detail: format!("entry {i} is empty"),
            });
        }
        Ok(SdkPaths {
            developer_path,
            toolchain_paths: self.toolchain_paths,
            platform_path,
            sdk_path,
        })
    }
}

fn required(field: &'static str, value: Option<PathBuf>) -> Result<PathBuf> {
    match value {
        None => Err(PlatformError::InvalidSdkPaths {
            field,
            detail: "is not set".into(),
        }),
        Some(p) if p.as_os_str().is_empty() => Err(PlatformError::InvalidSdkPaths {
            field,
            detail: "is empty".into(),
        }),
        Some(p) => Ok(p),
    }
}
