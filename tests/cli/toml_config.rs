//! CLI TOML configuration tests

use bagcheck::app::cli::Args;
use bagcheck::manifest::{ManifestFormat, ManifestSource};
use clap::Parser;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("bagcheck.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_config_file_supplies_settings() {
    let temp = TempDir::new().unwrap();
    let cache_dir = temp.path().join("cache");
    let config = format!(
        r#"
manifest-url = "https://script.example/macros/exec"
cache-dir = "{}"
retry-attempts = 4
manifest-format = "json"
strip-prefix = "^00"
"#,
        cache_dir.display()
    );
    let path = write_config(&temp, &config);

    let mut args = Args::try_parse_from(["bagcheck", "--config-file", path.to_str().unwrap()]).unwrap();
    assert_eq!(args.load_config_file().await.unwrap(), Some(path));

    assert_eq!(
        args.manifest_source().unwrap(),
        ManifestSource::Remote("https://script.example/macros/exec".to_string())
    );
    let options = args.loader_options().unwrap();
    assert_eq!(options.retry.max_attempts, 4);
    assert_eq!(options.format, Some(ManifestFormat::Json));
    assert_eq!(options.cache.unwrap().dir(), cache_dir.as_path());

    let normalizer = args.code_normalizer().unwrap();
    assert_eq!(normalizer.normalize("00123").as_deref(), Some("123"));
}

#[tokio::test]
async fn test_command_line_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
manifest-url = "https://script.example/macros/exec"
no-cache = false
bag-column = 7
"#,
    );

    let mut args = Args::try_parse_from([
        "bagcheck",
        "--config-file",
        path.to_str().unwrap(),
        "--manifest",
        "local.csv",
        "--bag-column",
        "5",
        "--no-cache",
    ])
    .unwrap();
    args.load_config_file().await.unwrap();

    assert_eq!(
        args.manifest_source().unwrap(),
        ManifestSource::File(PathBuf::from("local.csv"))
    );
    let options = args.loader_options().unwrap();
    assert_eq!(options.bag_column, 5);
    assert!(options.cache.is_none());
}

#[tokio::test]
async fn test_bad_config_value_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "bag-column = \"F\"\n");

    let mut args = Args::try_parse_from(["bagcheck", "-c", path.to_str().unwrap()]).unwrap();
    let err = args.load_config_file().await.unwrap_err();
    assert!(err.to_string().contains("bag-column"));
}
