// ==========================================
// 导入配置测试
// ==========================================
// 测试目标: JSON 加载、部分覆写、非法值拒绝
// ==========================================

use inventory_loader::config::{AttributeLayout, ImportConfig, RunNaming};
use inventory_loader::importer::ImportError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_partial_json_keeps_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "field_delimiter": ";",
            "object_attribute_layout": "paired",
            "run_naming": "user_timestamp",
            "commit_size": 500
        }}"#
    )
    .unwrap();

    let config = ImportConfig::from_json_file(file.path()).unwrap();

    assert_eq!(config.field_delimiter, ";");
    assert_eq!(config.component_delimiter, "~c~");
    assert_eq!(config.object_attribute_layout, AttributeLayout::Paired);
    assert_eq!(config.run_naming, RunNaming::UserTimestamp);
    assert_eq!(config.commit_size, Some(500));
    assert_eq!(config.root_sentinel, "root");
}

#[test]
fn test_missing_config_file() {
    let result = ImportConfig::from_json_file("/nonexistent/inventory-loader.json");
    assert!(matches!(result, Err(ImportError::ConfigReadError { .. })));
}

#[test]
fn test_invalid_values_rejected() {
    for raw in [
        r#"{"commit_size": 0}"#,
        r#"{"field_delimiter": ""}"#,
        r#"{"field_delimiter": "|", "component_delimiter": "|"}"#,
    ] {
        let result = ImportConfig::from_json_str(raw);
        assert!(
            matches!(result, Err(ImportError::ConfigValueError { .. })),
            "{} should be rejected",
            raw
        );
    }
}

#[test]
fn test_malformed_json_is_read_error() {
    let result = ImportConfig::from_json_str("{ not json");
    assert!(matches!(result, Err(ImportError::ConfigReadError { .. })));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = ImportConfig::sync_preset().with_base_dir("/tmp/loader");
    let raw = serde_json::to_string(&config).unwrap();
    assert_eq!(ImportConfig::from_json_str(&raw).unwrap(), config);
}
