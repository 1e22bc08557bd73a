// エンドツーエンド統合テスト
use crate::common::{read_record, setup_dataset, write_png};
use dir_extract::{
    cli::{execute_extract_with_reporter, Cli},
    engine::{create_filtered_extractor, create_quiet_extractor},
    services::{HiddenFileFilter, MemoryProgressReporter, RunConfig},
};
use clap::Parser;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_full_extraction_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let source = setup_dataset(temp_dir.path());
    let dest = temp_dir.path().join("results");

    let config = RunConfig::new(&source, &dest)
        .with_output_extension(".json")
        .with_max_workers(2);
    let summary = create_quiet_extractor(config).run().await.unwrap();

    assert_eq!(summary.total_files, 5);
    assert_eq!(summary.visited_files, 5);
    assert_eq!(summary.dispatched, 3);
    assert_eq!(summary.skipped_extension, 2);
    assert_eq!(summary.written, 3);
    assert_eq!(summary.failed, 0);

    let output_root = dest.join("dataset");
    assert_eq!(summary.output_root, output_root);

    let a = read_record(&output_root.join("a.json"));
    assert_eq!(a["img_mean"], 10.0);
    assert_eq!(a["img_var"], 0.0);

    // (0, 100, 200)の3画素 → 平均100、母分散 (100^2 * 2) / 3
    let b = read_record(&output_root.join("nested").join("b.json"));
    let mean = b["img_mean"].as_f64().unwrap();
    let variance = b["img_var"].as_f64().unwrap();
    assert!((mean - 100.0).abs() < 1e-9);
    assert!((variance - 20_000.0 / 3.0).abs() < 1e-6);

    assert!(output_root.join("nested/deeper/c.json").is_file());
    assert!(!output_root.join("notes.json").exists());

    // 出力ツリーにはレコード以外のファイル（一時ファイル等）が残らない
    let leftovers: Vec<_> = walkdir::WalkDir::new(&output_root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) != Some("json"))
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
}

#[tokio::test]
async fn test_content_is_sniffed_and_only_accepted_extension_is_written() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("dir");
    // .csvの中身はPNG
    write_png(&source.join("x.csv"), 2, 1, [40, 40, 40]);
    write_png(&source.join("y.png"), 2, 1, [80, 80, 80]);
    let dest = temp_dir.path().join("out");

    let config = RunConfig::new(&source, &dest).with_accepted_extensions(["csv"]);
    let summary = create_quiet_extractor(config).run().await.unwrap();

    assert_eq!(summary.written, 1);

    let files: Vec<String> = fs::read_dir(dest.join("dir"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["xjson"]);
    assert_eq!(
        fs::read_to_string(dest.join("dir").join("xjson")).unwrap(),
        r#"{"img_mean":40.0,"img_var":0.0}"#
    );
}

#[tokio::test]
async fn test_resume_processes_only_missing_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let source = setup_dataset(temp_dir.path());
    let dest = temp_dir.path().join("results");
    let config = RunConfig::new(&source, &dest).with_output_extension(".json");

    create_quiet_extractor(config.clone()).run().await.unwrap();

    // 1件だけ消して再実行すると、その1件だけが処理される
    let removed = dest.join("dataset/nested/b.json");
    fs::remove_file(&removed).unwrap();

    let summary = create_quiet_extractor(config.clone()).run().await.unwrap();
    assert_eq!(summary.dispatched, 1);
    assert_eq!(summary.skipped_existing, 2);
    assert!(removed.is_file());

    // restart指定で全件やり直す
    let summary = create_quiet_extractor(config.with_restart(true))
        .run()
        .await
        .unwrap();
    assert_eq!(summary.dispatched, 3);
    assert_eq!(summary.written, 3);
}

#[tokio::test]
async fn test_progress_is_reported_for_every_visited_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = setup_dataset(temp_dir.path());
    write_png(&source.join(".hidden.csv"), 1, 1, [1, 2, 3]);
    let reporter = MemoryProgressReporter::new();

    let extractor = create_filtered_extractor(
        RunConfig::new(&source, temp_dir.path().join("results")),
        HiddenFileFilter,
        reporter.clone(),
    );
    let summary = extractor.run().await.unwrap();

    let log = reporter.snapshot();
    assert_eq!(log.started, Some((6, 4)));
    assert_eq!(log.progress.len(), 6);
    assert!(log
        .progress
        .windows(2)
        .all(|pair| pair[0].0 < pair[1].0));
    assert_eq!(log.last_percentage(), Some(100.0));
    assert_eq!(log.completed, Some(summary.clone()));
    assert_eq!(summary.skipped_filtered, 1);
}

#[tokio::test]
async fn test_cli_command_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let source = setup_dataset(temp_dir.path());
    write_png(&source.join("a.sidecar.csv"), 1, 1, [9, 9, 9]);
    let dest = temp_dir.path().join("results");

    let cli = Cli::try_parse_from([
        "dir_extract",
        "--root-source-dir",
        source.to_str().unwrap(),
        "--root-save-dir",
        dest.to_str().unwrap(),
        "--valid-file-ext",
        "csv",
        "--file-out-ext",
        ".rec.json",
        "--max-processes",
        "3",
        "--exclude-suffix",
        ".sidecar.csv",
    ])
    .unwrap();

    let summary = execute_extract_with_reporter(&cli, MemoryProgressReporter::new())
        .await
        .unwrap();

    assert_eq!(summary.written, 3);
    assert_eq!(summary.skipped_filtered, 1);
    assert!(dest.join("dataset").join("a.rec.json").is_file());
    assert!(!dest.join("dataset").join("a_sidecar.rec.json").exists());
}
