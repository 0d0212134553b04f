//! Build metadata embedded by `build.rs`

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const BUILD_NUMBER: &str = env!("SCANEAT_BUILD_NUMBER");
const BUILD_TIMESTAMP: &str = env!("SCANEAT_BUILD_TIMESTAMP");
const GIT_COMMIT: &str = env!("SCANEAT_GIT_COMMIT");

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    /// Short commit hash; None outside a git checkout
    pub git_commit: Option<&'static str>,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER.parse().unwrap_or(0),
            build_timestamp: BUILD_TIMESTAMP,
            git_commit: (!GIT_COMMIT.is_empty()).then_some(GIT_COMMIT),
        }
    }

    /// "1.0.0 (build 12, abc1234)"
    pub fn label(&self) -> String {
        match self.git_commit {
            Some(commit) => format!("{} (build {}, {})", self.version, self.build_number, commit),
            None => format!("{} (build {})", self.version, self.build_number),
        }
    }
}

/// Print the startup banner to stderr (stdout belongs to the MCP transport)
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  ScanEat - Food Nutrition Scanner");
    eprintln!("  Version: {}", info.label());
    eprintln!("  Compiled: {}", info.build_timestamp);
    eprintln!("===============================================");
}
