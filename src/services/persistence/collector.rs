// Collector - ワーカー結果の集計機能

use crate::core::{ItemOutcome, PoolReport, ProgressReporter};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Collector: 個別処理の結果を集計し、失敗を報告する
///
/// 失敗しても実行は止めず、件数だけを最終レポートに残す
pub fn spawn_outcome_collector<R>(
    mut outcome_rx: mpsc::Receiver<ItemOutcome>,
    reporter: Arc<R>,
) -> tokio::task::JoinHandle<PoolReport>
where
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        let mut report = PoolReport::default();

        while let Some(outcome) = outcome_rx.recv().await {
            match outcome {
                ItemOutcome::Written { item, elapsed_ms } => {
                    debug!(
                        destination = %item.destination_path.display(),
                        elapsed_ms,
                        "record written"
                    );
                    report.written += 1;
                }
                ItemOutcome::Failed { item, error } => {
                    warn!(
                        source = %item.source_path.display(),
                        error = %error,
                        "failed to process file"
                    );
                    reporter.report_error(&item.source_path, &error).await;
                    report.failed += 1;
                }
            }
        }

        report
    })
}
