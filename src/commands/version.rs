//! Command: print version information.

/// Version embedded at build time, falling back to the crate version.
#[must_use]
pub const fn version() -> &'static str {
    match option_env!("ANSIBLE_MASTER_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}

/// Print the version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("ansible-master {}", version());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().trim().is_empty());
    }
}
