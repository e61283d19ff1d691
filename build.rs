//! Build script that embeds the crate version into the binary.

use std::process::Command;

fn main() {
    // Prefer ANSIBLE_MASTER_VERSION if set (e.g., by a release workflow),
    // otherwise fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("ANSIBLE_MASTER_VERSION") {
        println!("cargo:rustc-env=ANSIBLE_MASTER_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=ANSIBLE_MASTER_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=ANSIBLE_MASTER_VERSION");
}
