// WorkerPool - 固定数ワーカーによる並列処理

use crate::core::{
    ExtractionError, ExtractionResult, ItemOutcome, PoolReport, ProgressReporter,
    RecordExtractor, RecordWriter, WorkItem,
};
use crate::services::{persistence::spawn_outcome_collector, processing::process_work_item};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// 結果チャンネルのバッファサイズ
const OUTCOME_BUFFER_SIZE: usize = 100;

/// 単一ワーカー: 作業キューが閉じるまでWorkItemを処理し続ける
fn spawn_worker<E, W>(
    worker_id: usize,
    extractor: Arc<E>,
    writer: Arc<W>,
    work_rx: Arc<Mutex<mpsc::UnboundedReceiver<WorkItem>>>,
    outcome_tx: mpsc::Sender<ItemOutcome>,
) -> JoinHandle<()>
where
    E: RecordExtractor + ?Sized + 'static,
    W: RecordWriter + ?Sized + 'static,
{
    tokio::spawn(async move {
        loop {
            // 次の作業を取得
            let item = {
                let mut rx = work_rx.lock().await;
                match rx.recv().await {
                    Some(item) => item,
                    None => break, // キュー終了
                }
            };

            let outcome = process_work_item(extractor.as_ref(), writer.as_ref(), item).await;

            if outcome_tx.send(outcome).await.is_err() {
                // 集計側が閉じた
                break;
            }
        }
        debug!(worker_id, "worker finished");
    })
}

/// 固定数のワーカーと結果集計タスクを持つプール
///
/// `submit`はブロックせず、作業はキューに積まれる。`shutdown`でキューを閉じ、
/// 投入済みの作業が全て終わるまで待つ。`shutdown`を呼ばずに破棄した場合は残りのタスクを中断する
pub struct WorkerPool {
    work_tx: Option<mpsc::UnboundedSender<WorkItem>>,
    workers: Vec<JoinHandle<()>>,
    collector: Option<JoinHandle<PoolReport>>,
    submitted: usize,
}

impl WorkerPool {
    /// `worker_count`個のワーカーを起動
    pub fn spawn<E, W, R>(
        worker_count: usize,
        extractor: Arc<E>,
        writer: Arc<W>,
        reporter: Arc<R>,
    ) -> ExtractionResult<Self>
    where
        E: RecordExtractor + ?Sized + 'static,
        W: RecordWriter + ?Sized + 'static,
        R: ProgressReporter + 'static,
    {
        if worker_count == 0 {
            return Err(ExtractionError::worker_pool(
                "worker count must be at least 1",
            ));
        }

        let (work_tx, work_rx) = mpsc::unbounded_channel::<WorkItem>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<ItemOutcome>(OUTCOME_BUFFER_SIZE);
        let work_rx = Arc::new(Mutex::new(work_rx));

        let workers = (0..worker_count)
            .map(|worker_id| {
                spawn_worker(
                    worker_id,
                    Arc::clone(&extractor),
                    Arc::clone(&writer),
                    Arc::clone(&work_rx),
                    outcome_tx.clone(),
                )
            })
            .collect();

        // ワーカーが全て終了した時点で集計側のチャンネルが閉じる
        drop(outcome_tx);
        let collector = spawn_outcome_collector(outcome_rx, reporter);

        Ok(Self {
            work_tx: Some(work_tx),
            workers,
            collector: Some(collector),
            submitted: 0,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// 投入済みの作業数
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// 作業を投入する（ブロックしない）
    pub fn submit(&mut self, item: WorkItem) -> ExtractionResult<()> {
        let work_tx = self
            .work_tx
            .as_ref()
            .ok_or_else(|| ExtractionError::worker_pool("pool is already shut down"))?;

        work_tx
            .send(item)
            .map_err(|_| ExtractionError::worker_pool("all workers have stopped"))?;
        self.submitted += 1;
        Ok(())
    }

    /// キューを閉じ、全ワーカーと集計タスクの終了を待つ
    pub async fn shutdown(mut self) -> ExtractionResult<PoolReport> {
        drop(self.work_tx.take());

        let mut first_error = None;
        for handle in std::mem::take(&mut self.workers) {
            if let Err(e) = handle.await {
                first_error.get_or_insert_with(|| {
                    ExtractionError::worker_pool(format!("worker task failed: {e}"))
                });
            }
        }

        let report = match self.collector.take() {
            Some(collector) => collector.await.map_err(|e| {
                ExtractionError::worker_pool(format!("collector task failed: {e}"))
            })?,
            None => PoolReport::default(),
        };

        match first_error {
            Some(error) => Err(error),
            None => Ok(report),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for handle in &self.workers {
            handle.abort();
        }
        if let Some(collector) = &self.collector {
            collector.abort();
        }
    }
}
