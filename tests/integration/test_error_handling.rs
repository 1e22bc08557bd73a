// エラーハンドリングの統合テスト
use crate::common::{setup_dataset, write_png};
use anyhow::Result;
use dir_extract::{
    core::ExtractionError,
    engine::{create_filtered_extractor, create_quiet_extractor},
    services::{AcceptAllFilter, MemoryProgressReporter, RunConfig},
};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_nonexistent_source_directory_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("nonexistent_directory");

    let result = create_quiet_extractor(RunConfig::new(&missing, temp_dir.path()))
        .run()
        .await;

    let error = result.unwrap_err();
    assert!(matches!(error, ExtractionError::SourceNotFound { .. }));
    assert!(error.to_string().contains("nonexistent_directory"));
    Ok(())
}

#[tokio::test]
async fn test_source_file_instead_of_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = temp_dir.path().join("single.csv");
    fs::write(&file, b"x")?;

    let error = create_quiet_extractor(RunConfig::new(&file, temp_dir.path()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(error, ExtractionError::SourceNotDirectory { .. }));
    Ok(())
}

#[tokio::test]
async fn test_invalid_output_extension_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = setup_dataset(temp_dir.path());

    let config = RunConfig::new(&source, temp_dir.path()).with_output_extension("/json");
    let error = create_quiet_extractor(config).run().await.unwrap_err();

    assert!(matches!(error, ExtractionError::Configuration { .. }));
    // 何も書かれていない
    assert!(!temp_dir.path().join("dataset").join("a").exists());
    Ok(())
}

#[tokio::test]
async fn test_corrupted_files_are_counted_and_others_still_written() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = setup_dataset(temp_dir.path());
    fs::write(source.join("corrupted.csv"), b"INVALID_PNG_DATA")?;
    fs::write(source.join("nested").join("empty.csv"), b"")?;
    let dest = temp_dir.path().join("results");
    let reporter = MemoryProgressReporter::new();

    let extractor = create_filtered_extractor(
        RunConfig::new(&source, &dest).with_output_extension(".json"),
        AcceptAllFilter,
        reporter.clone(),
    );
    let summary = extractor.run().await?;

    assert_eq!(summary.dispatched, 5);
    assert_eq!(summary.written, 3);
    assert_eq!(summary.failed, 2);

    let mut failed: Vec<String> = reporter
        .snapshot()
        .errors
        .iter()
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    failed.sort();
    assert_eq!(failed, vec!["corrupted.csv", "empty.csv"]);

    // 失敗したファイルの出力は作られないので、次回の実行で再挑戦される
    assert!(!dest.join("dataset").join("corrupted.json").exists());
    let retry = create_quiet_extractor(
        RunConfig::new(&source, &dest).with_output_extension(".json"),
    )
    .run()
    .await?;
    assert_eq!(retry.dispatched, 2);
    assert_eq!(retry.failed, 2);
    Ok(())
}

#[tokio::test]
async fn test_colliding_destination_names_are_dispatched_once() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("set");
    write_png(&source.join("a.b.csv"), 1, 1, [1, 1, 1]);
    write_png(&source.join("a_b.csv"), 1, 1, [2, 2, 2]);
    let dest = temp_dir.path().join("out");

    let summary = create_quiet_extractor(
        RunConfig::new(&source, &dest).with_output_extension(".json"),
    )
    .run()
    .await?;

    assert_eq!(summary.dispatched, 1);
    assert_eq!(summary.duplicate_destinations, 1);
    assert_eq!(summary.written, 1);
    assert!(dest.join("set").join("a_b.json").is_file());
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_subdirectory_is_skipped() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new()?;
    let source = setup_dataset(temp_dir.path());
    let locked = source.join("locked");
    write_png(&locked.join("hidden_away.csv"), 1, 1, [7, 7, 7]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    // root権限では読めてしまうので、その場合は検証しない
    let readable_anyway = fs::read_dir(&locked).is_ok();

    let result = create_quiet_extractor(RunConfig::new(&source, temp_dir.path().join("out")))
        .run()
        .await;

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    let summary = result?;
    if !readable_anyway {
        assert_eq!(summary.written, 3);
        assert_eq!(summary.failed, 0);
    }
    Ok(())
}
