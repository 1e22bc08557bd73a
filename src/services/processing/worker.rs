// Worker - 単一WorkItemの処理機能

use crate::core::{ExtractionError, ItemOutcome, RecordExtractor, RecordWriter, WorkItem};
use std::time::Instant;

/// 単一ファイルの処理: レコード抽出 → 出力先へ書き込み
///
/// エラーは呼び出し元に伝播させず、`ItemOutcome::Failed`として返す
pub async fn process_work_item<E, W>(extractor: &E, writer: &W, item: WorkItem) -> ItemOutcome
where
    E: RecordExtractor + ?Sized,
    W: RecordWriter + ?Sized,
{
    let start_time = Instant::now();

    let result = async {
        let record = extractor
            .extract(&item.source_path)
            .await
            .map_err(|e| ExtractionError::extraction(&item.source_path, e))?;

        writer
            .write_record(&record, &item.destination_path)
            .await
            .map_err(|e| ExtractionError::persistence(&item.destination_path, e))
    }
    .await;

    match result {
        Ok(()) => ItemOutcome::Written {
            item,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        },
        Err(error) => ItemOutcome::Failed {
            item,
            error: error.to_string(),
        },
    }
}
