// ==========================================
// 批量导入器测试
// ==========================================
// 测试目标: 上传导入、并发批量导入、产物下载
// ==========================================

mod test_helpers;

use inventory_loader::config::RunNaming;
use inventory_loader::domain::ImportMode;
use inventory_loader::importer::{BulkImporter, BulkImporterImpl, ImportError, ImportJob};
use inventory_loader::{logging, ImportConfig};
use std::sync::Arc;
use tempfile::TempDir;
use test_helpers::{sync_config, test_config, write_input, InMemoryInventory};

fn create_test_importer(store: Arc<InMemoryInventory>, config: ImportConfig) -> BulkImporterImpl {
    BulkImporterImpl::new(store.clone(), store.clone(), store, config)
        .expect("config should be valid")
}

#[tokio::test]
async fn test_import_bytes_then_download_log() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let store = Arc::new(InMemoryInventory::new());
    let importer = create_test_importer(store.clone(), test_config(dir.path()));

    let data = b"Brand~t~unused~t~name~c~Edge\nBrand~t~unused~t~vendor~c~Cisco\n".to_vec();
    let report = importer
        .import_bytes(data, ImportMode::ListType, "alice")
        .await
        .expect("import should succeed");

    assert!(!report.had_errors);
    assert!(report.file_name.starts_with("alice-"));
    assert_eq!(store.list_type_creates(), 2);

    // 上传内容按运行名落盘
    let upload = dir.path().join("uploads").join(&report.file_name);
    assert!(upload.exists());

    let log = importer.download_log(&report.file_name).await.unwrap();
    let log = String::from_utf8(log).unwrap();
    assert!(log.contains("All lines processed successfully."));

    // 列表类型模式没有错误行文件
    assert!(matches!(
        importer.download_errors(&report.file_name).await,
        Err(ImportError::FileNotFound(_))
    ));
}

#[tokio::test]
async fn test_object_upload_errors_downloadable() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let store = Arc::new(InMemoryInventory::new());
    let importer = create_test_importer(store.clone(), sync_config(dir.path()));

    let data = b"Router;none;root;-1;name:City1;serialNumber;String:SN-001\nRouter;none;root\n".to_vec();
    let report = importer
        .import_bytes(data, ImportMode::Object, "bob")
        .await
        .unwrap();

    assert_eq!(report.summary.created, 1);
    assert_eq!(report.summary.failed, 1);

    let errors = importer.download_errors(&report.file_name).await.unwrap();
    assert_eq!(String::from_utf8(errors).unwrap(), "Router;none;root\n");
}

#[tokio::test]
async fn test_batch_import_multiple_files() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let store = Arc::new(InMemoryInventory::new());
    let importer = create_test_importer(store.clone(), test_config(dir.path()));

    let brands = write_input(
        dir.path(),
        "brands.txt",
        &["Brand~t~unused~t~name~c~A", "Brand~t~unused~t~name~c~B"],
    );
    let objects = write_input(
        dir.path(),
        "objects.txt",
        &["Country~t~none~t~root~t~-1~t~root~t~name~c~Peru"],
    );
    let jobs = vec![
        ImportJob::new(&brands, ImportMode::ListType, "carol"),
        ImportJob::new(dir.path().join("missing.txt"), ImportMode::Object, "carol"),
        ImportJob::new(&objects, ImportMode::Object, "carol"),
    ];

    let results = importer.batch_import(jobs).await;

    assert_eq!(results.len(), 3);
    let first = results[0].as_ref().unwrap();
    assert_eq!(first.mode, ImportMode::ListType);
    assert_eq!(first.summary.updated, 2);
    assert!(matches!(results[1], Err(ImportError::FileNotFound(_))));
    let third = results[2].as_ref().unwrap();
    assert_eq!(third.summary.created, 1);

    // 同一用户的并发运行不重名
    assert_ne!(first.file_name, third.file_name);
    assert_eq!(store.list_type_creates(), 2);
    assert_eq!(store.creates(), 1);
}

#[tokio::test]
async fn test_legacy_run_naming() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let store = Arc::new(InMemoryInventory::new());
    let mut config = test_config(dir.path());
    config.run_naming = RunNaming::UserTimestamp;
    let importer = create_test_importer(store, config);

    let report = importer
        .import_bytes(b"Brand~t~unused~t~name~c~A".to_vec(), ImportMode::ListType, "dave")
        .await
        .unwrap();

    // dave-yyyy-MM-ddTHH-mm-ss
    assert_eq!(report.file_name.len(), "dave-".len() + 19);
}

#[tokio::test]
async fn test_upload_write_failure_is_reported_as_write_error() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let store = Arc::new(InMemoryInventory::new());
    let mut config = test_config(dir.path());
    // 上传目录位置被普通文件占用
    config.upload_dir = dir.path().join("uploads-blocked");
    std::fs::write(&config.upload_dir, b"").unwrap();
    let importer = create_test_importer(store.clone(), config);

    let result = importer
        .import_bytes(b"Brand~t~unused~t~name~c~A".to_vec(), ImportMode::ListType, "erin")
        .await;

    assert!(matches!(result, Err(ImportError::UploadWriteError { .. })));
    assert_eq!(store.list_type_creates(), 0);
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.component_delimiter = config.field_delimiter.clone();

    let store = Arc::new(InMemoryInventory::new());
    let result = BulkImporterImpl::new(store.clone(), store.clone(), store, config);
    assert!(matches!(result, Err(ImportError::ConfigValueError { .. })));
}
