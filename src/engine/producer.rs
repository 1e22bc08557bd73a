// Producer - 走査と投入判定をブロッキングスレッドで行い、判定結果を配信する

use super::discovery::walk_files;
use super::planner::DestinationPlanner;
use crate::core::{DispatchDecision, ExtractionResult, FilenameFilter};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 判定結果チャンネルのバッファサイズ
pub const DECISION_BUFFER_SIZE: usize = 256;

/// 走査中の1ファイルとその判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub source_path: PathBuf,
    pub decision: DispatchDecision,
}

/// Producer: ソースツリーを1回走査し、訪問順に判定結果を送る
///
/// ファイルシステムへのアクセス（走査と出力済み判定）は全て`spawn_blocking`上で行う。
/// 判定エラーを送った時点、または受信側が閉じた時点で走査を止める
pub fn spawn_planner<F>(
    source_root: PathBuf,
    planner: DestinationPlanner,
    filter: Arc<F>,
    decision_tx: mpsc::Sender<ExtractionResult<PlannedFile>>,
) -> JoinHandle<()>
where
    F: FilenameFilter + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut dispatched = HashSet::new();

        for entry in walk_files(&source_root) {
            let planned = planner
                .plan(entry.path(), filter.as_ref(), &mut dispatched)
                .map(|decision| PlannedFile {
                    source_path: entry.into_path(),
                    decision,
                });
            let stop = planned.is_err();

            if decision_tx.blocking_send(planned).is_err() || stop {
                break;
            }
        }
        // decision_txをドロップしてチャンネル終了シグナル
    })
}
