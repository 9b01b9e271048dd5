//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `fillstat <version> (<date> <commit>)`, printed by `--version`.
pub fn version_line() -> String {
    format!(
        "fillstat {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
