use std::fs;
use std::sync::Arc;

use photoadmin::config::AdminConfig;
use photoadmin::store::MemoryRecordStore;
use photoadmin::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

use super::support::sample_records;

fn context() -> CliContext {
    CliContext::with_store(
        AdminConfig::default(),
        Arc::new(MemoryRecordStore::with_records(sample_records())),
    )
}

#[test]
fn tree_json_contract_matches_http_shape() {
    let output = context()
        .execute(&Commands::Tree {
            format: "json".to_string(),
            depth: None,
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(parsed.get("files").and_then(|v| v.as_array()).is_some());
    assert!(parsed["dirs"]["A"]["dirs"].get("C").is_some());
}

#[test]
fn stats_json_contract_includes_build_report() {
    let output = context()
        .execute(&Commands::Stats {
            path: None,
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["stats"]["total_files"], 3);
    assert_eq!(parsed["stats"]["by_status"]["review"], 2);
    assert_eq!(parsed["build"]["records_seen"], 3);
    assert_eq!(parsed["build"]["skipped_empty"], 0);
}

#[test]
fn ls_json_contract_has_files_and_directories() {
    let output = context()
        .execute(&Commands::Ls {
            path: Some("A".to_string()),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["directories"][0], "C");
    assert_eq!(parsed["files"][0]["path"], "A/b.jpg");
}

#[test]
fn stats_text_reports_scope() {
    let output = context()
        .execute(&Commands::Stats {
            path: Some("A".to_string()),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("Statistics: A"));
    assert!(output.contains("Directories"));
}

#[test]
fn import_then_list_through_sled_store() {
    let temp_dir = TempDir::new().unwrap();
    let photos = dunce::canonicalize(temp_dir.path()).unwrap().join("photos");
    fs::create_dir_all(photos.join("Session")).unwrap();
    fs::write(photos.join("Session/one.jpg"), b"x").unwrap();
    fs::write(photos.join("Session/two.JPEG"), b"x").unwrap();

    let config_path = temp_dir.path().join("photoadmin.toml");
    fs::write(
        &config_path,
        format!(
            "[storage]\nstore_path = {:?}\n\n[tree]\nbase_path = {:?}\n",
            temp_dir.path().join("store").display().to_string(),
            photos.display().to_string()
        ),
    )
    .unwrap();

    let cli = CliContext::new(temp_dir.path().to_path_buf(), Some(config_path)).unwrap();
    let output = cli
        .execute(&Commands::Import {
            dir: Some(photos.clone()),
            dry_run: false,
        })
        .unwrap();
    assert!(output.starts_with("Imported 2 new photo(s)"));

    let again = cli
        .execute(&Commands::Import {
            dir: Some(photos),
            dry_run: false,
        })
        .unwrap();
    assert!(again.contains("2 already known"));

    let listing = cli
        .execute(&Commands::Ls {
            path: Some("Session".to_string()),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&listing).unwrap();
    assert_eq!(parsed["files"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["files"][0]["status"], "review");
}

#[test]
fn config_command_prints_toml() {
    let output = context().execute(&Commands::Config).unwrap();
    let parsed: toml::Value = toml::from_str(&output).unwrap();
    assert_eq!(parsed["server"]["port"].as_integer(), Some(5000));
    assert_eq!(parsed["resize"]["scale_divisor"].as_integer(), Some(3));
}
