//! Apple platform variant table and SDK path model.
//!
//! Two leaf pieces of the toolchain resolver live here:
//! - **Platform variants:** the fixed table mapping each device or simulator
//!   platform to its minimum-version flag name
//! - **SDK paths:** the developer, toolchain, platform and SDK roots of one
//!   SDK installation, and the tool search directories derived from them

pub mod error;
pub mod platform;
pub mod sdk;

pub use error::{PlatformError, Result};
pub use platform::PlatformVariant;
pub use sdk::{SdkPaths, SdkPathsBuilder};
