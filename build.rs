//! Embeds build metadata for the status tool and the startup banner.
//!
//! `SCANEAT_BUILD_NUMBER` is passed through from the build environment (CI);
//! local builds report 0.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SCANEAT_BUILD_NUMBER");

    let build_number = std::env::var("SCANEAT_BUILD_NUMBER")
        .ok()
        .and_then(|n| n.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_default();

    println!("cargo:rustc-env=SCANEAT_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=SCANEAT_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=SCANEAT_GIT_COMMIT={}", commit);
}
