//! `applecxx platforms` — platform variant listing and description.

use anyhow::{Context, Result};
use applecxx_platform::PlatformVariant;

/// One line per platform variant.
pub fn list_lines() -> Vec<String> {
    PlatformVariant::ALL
        .iter()
        .map(|p| {
            format!(
                "  {:<18} {:<10} {:<32} {}",
                p.name(),
                if p.is_simulator() { "simulator" } else { "device" },
                p.min_version_flag(),
                p.default_architectures().join(", "),
            )
        })
        .collect()
}

/// List all known platform variants.
pub fn list() -> Result<()> {
    println!("Platforms:");
    println!();
    println!("  {:<18} {:<10} {:<32} ARCHITECTURES", "NAME", "KIND", "VERSION FLAG");
    for line in list_lines() {
        println!("{line}");
    }
    println!();
    println!("Use 'applecxx platforms describe <name>' for details.");
    Ok(())
}

/// Describe a single platform variant.
pub fn describe(name: &str) -> Result<()> {
    let platform: PlatformVariant = name
        .parse()
        .with_context(|| "use 'applecxx platforms' to see available platforms")?;

    println!("=== Platform: {} ===", platform.name());
    println!("Bundle:        {}.platform", platform.bundle_name());
    println!(
        "Kind:          {}",
        if platform.is_simulator() { "simulator" } else { "device" }
    );
    println!("Version flag:  {}=<version>", platform.min_version_flag());
    println!(
        "Linker flags:  {}",
        if platform.requires_simulator_linker_flags() {
            "version flag repeated at link time"
        } else {
            "none"
        }
    );
    println!("Architectures: {}", platform.default_architectures().join(", "));
    Ok(())
}
