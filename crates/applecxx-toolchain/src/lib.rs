//! Apple C/C++ toolchain resolution.
//!
//! Given a platform variant, SDK, minimum OS version and architecture, this
//! crate produces an immutable [`Toolchain`]: the located `clang`, `clang++`
//! and `ar` executables, and the exact flag sequence each tool role runs
//! with.
//!
//! Resolution pipeline:
//! 1. [`SdkPaths`](applecxx_platform::SdkPaths) yields ordered search directories
//! 2. [`ExecutableLocator`] finds each tool, failing with `ToolNotFound`
//! 3. [`FlagComposer`] builds mandatory and override flags per role
//! 4. [`resolve`] assembles the result under flavor `<sdk-name>-<arch>`
//!
//! Resolution reads only immutable inputs and may run on many threads at once.

pub mod config;
pub mod error;
pub mod flags;
pub mod locate;
pub mod resolve;
pub mod toolchain;

pub use config::{ConfigOverrides, FlagCategory};
pub use error::{Result, ToolchainError};
pub use flags::{FlagComposer, FlagSet};
pub use locate::{ExecutableChecker, ExecutableLocator, FixedExecutableChecker, FsExecutableChecker};
pub use resolve::{resolve, resolve_all, ResolveRequest};
pub use toolchain::{Flavor, ResolvedTool, ToolRole, Toolchain};
