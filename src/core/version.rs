//! Build metadata and the offline cache schema version, generated by `build.rs`

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Schema version stamped into cached manifests
pub fn manifest_schema_version() -> u32 {
    MANIFEST_SCHEMA_VERSION
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// Long version line shown by `--version`
pub fn long_version() -> String {
    format!(
        "{} (built {}, commit {})",
        env!("CARGO_PKG_VERSION"),
        build_time(),
        git_hash()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version_comes_from_package_metadata() {
        assert_eq!(manifest_schema_version(), 20241101);
    }

    #[test]
    fn test_long_version_mentions_build() {
        let line = long_version();
        assert!(line.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(line.contains(git_hash()));
        assert!(build_time().ends_with("UTC"));
    }
}
