use chrono::Utc;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Package metadata key holding the offline manifest cache schema version
const SCHEMA_KEY: &str = "manifest_schema_version";

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")?;
    let cargo_toml = fs::read_to_string(Path::new(&manifest_dir).join("Cargo.toml"))?;
    let schema_version = cache_schema_version(&cargo_toml)?;

    let out_dir = env::var_os("OUT_DIR").ok_or("OUT_DIR is not set")?;
    let generated = format!(
        "pub const MANIFEST_SCHEMA_VERSION: u32 = {schema_version};\n\
         pub const BUILD_TIME: &str = {build_time:?};\n\
         pub const GIT_HASH: &str = {git_hash:?};\n",
        build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        git_hash = short_git_hash().unwrap_or_else(|| "unknown".to_string()),
    );
    fs::write(Path::new(&out_dir).join("version.rs"), generated)?;

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");
    Ok(())
}

/// Cached manifests written under another schema version are ignored at load,
/// so a missing or non-numeric value fails the build instead of defaulting.
fn cache_schema_version(cargo_toml: &str) -> Result<u32, Box<dyn Error>> {
    let table = cargo_toml.parse::<toml::Table>()?;
    let value = table
        .get("package")
        .and_then(|p| p.get("metadata"))
        .and_then(|m| m.get(SCHEMA_KEY))
        .and_then(toml::Value::as_integer)
        .ok_or_else(|| format!("[package.metadata] {SCHEMA_KEY} must be an integer"))?;
    Ok(u32::try_from(value)?)
}

fn short_git_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
