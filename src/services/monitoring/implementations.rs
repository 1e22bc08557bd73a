// 進捗監視の具象実装

use crate::core::{completion_percentage, ProgressReporter, RunSummary};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_files: usize, worker_count: usize) {
        if !self.quiet {
            println!("🔍 Total number of files found: {total_files}");
            println!("🚀 Processing files with {worker_count} workers!");
        }
    }

    async fn report_progress(&self, visited: usize, total: usize) {
        if !self.quiet {
            let percentage = completion_percentage(visited, total);
            println!("Completion percentage: {percentage:.2}%");
        }
    }

    async fn report_error(&self, file_path: &Path, error: &str) {
        if !self.quiet {
            eprintln!("❌ Error processing {}: {error}", file_path.display());
        }
    }

    async fn report_completed(&self, summary: &RunSummary) {
        if !self.quiet {
            println!("✅ COMPLETE!");
            println!(
                "   - written: {}, failed: {}, already done: {}, skipped: {}",
                summary.written,
                summary.failed,
                summary.skipped_existing,
                summary.skipped_extension + summary.skipped_filtered + summary.duplicate_destinations,
            );
            println!("📄 SAVED TO {}", summary.destination_root.display());
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_files: usize, _worker_count: usize) {}

    async fn report_progress(&self, _visited: usize, _total: usize) {}

    async fn report_error(&self, _file_path: &Path, _error: &str) {}

    async fn report_completed(&self, _summary: &RunSummary) {}
}

/// 報告内容をメモリに記録する実装
///
/// クローンは同じ記録を共有するため、エンジンに渡した後でも内容を確認できる
#[derive(Debug, Default, Clone)]
pub struct MemoryProgressReporter {
    state: Arc<Mutex<ReportLog>>,
}

/// MemoryProgressReporterが記録した内容
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReportLog {
    pub started: Option<(usize, usize)>,
    pub progress: Vec<(usize, usize)>,
    pub errors: Vec<(PathBuf, String)>,
    pub completed: Option<RunSummary>,
}

impl ReportLog {
    /// 最後に報告された進捗率
    pub fn last_percentage(&self) -> Option<f64> {
        self.progress
            .last()
            .map(|&(visited, total)| completion_percentage(visited, total))
    }
}

impl MemoryProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録内容のスナップショットを取得
    pub fn snapshot(&self) -> ReportLog {
        self.state
            .lock()
            .map(|log| log.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn with_log(&self, f: impl FnOnce(&mut ReportLog)) {
        match self.state.lock() {
            Ok(mut log) => f(&mut log),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl ProgressReporter for MemoryProgressReporter {
    async fn report_started(&self, total_files: usize, worker_count: usize) {
        self.with_log(|log| log.started = Some((total_files, worker_count)));
    }

    async fn report_progress(&self, visited: usize, total: usize) {
        self.with_log(|log| log.progress.push((visited, total)));
    }

    async fn report_error(&self, file_path: &Path, error: &str) {
        self.with_log(|log| {
            log.errors
                .push((file_path.to_path_buf(), error.to_string()))
        });
    }

    async fn report_completed(&self, summary: &RunSummary) {
        self.with_log(|log| log.completed = Some(summary.clone()));
    }
}
