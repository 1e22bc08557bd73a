// DirectoryExtractor - 走査・投入・集計を束ねる抽出エンジン
// 全ての依存関係はコンストラクタで注入される

use super::discovery::{count_files, ensure_source_root};
use super::planner::DestinationPlanner;
use super::pool::WorkerPool;
use super::producer::{spawn_planner, PlannedFile, DECISION_BUFFER_SIZE};
use crate::core::{
    DispatchDecision, ExtractionError, ExtractionResult, FilenameFilter, ProgressReporter,
    RecordExtractor, RecordWriter, RunSummary,
};
use crate::services::config::RunConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// ソースツリーを走査し、各ファイルのレコードを出力ツリーへ書き出すエンジン
///
/// 並列処理で共有される依存関係はArcで保持する
pub struct DirectoryExtractor<E, F, W, R> {
    config: RunConfig,
    extractor: Arc<E>,
    filter: Arc<F>,
    writer: Arc<W>,
    reporter: Arc<R>,
}

impl<E, F, W, R> DirectoryExtractor<E, F, W, R>
where
    E: RecordExtractor + 'static,
    F: FilenameFilter + 'static,
    W: RecordWriter + 'static,
    R: ProgressReporter + 'static,
{
    pub fn new(config: RunConfig, extractor: E, filter: F, writer: W, reporter: R) -> Self {
        Self {
            config,
            extractor: Arc::new(extractor),
            filter: Arc::new(filter),
            writer: Arc::new(writer),
            reporter: Arc::new(reporter),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 1回分の抽出を実行する
    ///
    /// ソースルートの不備・設定不正・出力ディレクトリ作成失敗・ワーカープール障害は`Err`になる。
    /// 個別ファイルの失敗は`RunSummary::failed`に数えられ、実行は継続する
    pub async fn run(&self) -> ExtractionResult<RunSummary> {
        let start_time = Instant::now();

        self.config.validate()?;
        ensure_source_root(self.config.source_root())?;
        let planner = DestinationPlanner::new(&self.config)?;

        // 事前走査: 進捗の分母
        let source_root = self.config.source_root().to_path_buf();
        let total_files = tokio::task::spawn_blocking(move || count_files(&source_root))
            .await
            .map_err(|e| ExtractionError::file_discovery(self.config.source_root(), e.into()))?;

        let mut summary = RunSummary {
            total_files,
            destination_root: self.config.destination_root().to_path_buf(),
            output_root: planner.output_root().to_path_buf(),
            ..RunSummary::default()
        };

        info!(
            source = %self.config.source_root().display(),
            output = %planner.output_root().display(),
            total_files,
            workers = self.config.max_workers(),
            extractor = self.extractor.extractor_name(),
            format = self.writer.format_name(),
            "extraction started"
        );
        self.reporter
            .report_started(total_files, self.config.max_workers())
            .await;

        let mut pool = WorkerPool::spawn(
            self.config.max_workers(),
            Arc::clone(&self.extractor),
            Arc::clone(&self.writer),
            Arc::clone(&self.reporter),
        )?;

        // 走査と判定はブロッキングスレッド、ディレクトリ作成と投入はここで行う
        let (decision_tx, mut decision_rx) =
            mpsc::channel::<ExtractionResult<PlannedFile>>(DECISION_BUFFER_SIZE);
        let producer = spawn_planner(
            self.config.source_root().to_path_buf(),
            planner.clone(),
            Arc::clone(&self.filter),
            decision_tx,
        );

        let mut created_dirs = HashSet::new();

        while let Some(planned) = decision_rx.recv().await {
            let PlannedFile {
                source_path,
                decision,
            } = planned?;
            summary.record_decision(&decision);

            match decision {
                DispatchDecision::Dispatch(item) => {
                    ensure_destination_dir(item.destination(), &mut created_dirs).await?;
                    debug!(
                        source = %item.source().display(),
                        destination = %item.destination().display(),
                        "dispatching"
                    );
                    pool.submit(item)?;
                }
                DispatchDecision::SkipDuplicate(destination) => {
                    warn!(
                        source = %source_path.display(),
                        destination = %destination.display(),
                        "destination already claimed by another file in this run, skipping"
                    );
                }
                DispatchDecision::SkipExtension
                | DispatchDecision::SkipFiltered
                | DispatchDecision::SkipExisting => {}
            }

            summary.visited_files += 1;
            self.reporter
                .report_progress(summary.visited_files, total_files)
                .await;
        }

        producer
            .await
            .map_err(|e| ExtractionError::file_discovery(self.config.source_root(), e.into()))?;

        let report = pool.shutdown().await?;
        summary.written = report.written;
        summary.failed = report.failed;
        summary.elapsed_ms = start_time.elapsed().as_millis() as u64;

        info!(
            visited = summary.visited_files,
            dispatched = summary.dispatched,
            written = summary.written,
            failed = summary.failed,
            elapsed_ms = summary.elapsed_ms,
            "extraction finished"
        );
        self.reporter.report_completed(&summary).await;

        Ok(summary)
    }
}

/// 出力ファイルの親ディレクトリを作成（作成済みのものは飛ばす）
async fn ensure_destination_dir(
    destination: &Path,
    created_dirs: &mut HashSet<PathBuf>,
) -> ExtractionResult<()> {
    let Some(parent) = destination.parent() else {
        return Ok(());
    };

    if created_dirs.contains(parent) {
        return Ok(());
    }

    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| ExtractionError::directory_creation(parent, e))?;
    created_dirs.insert(parent.to_path_buf());
    Ok(())
}
