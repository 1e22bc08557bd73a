// レコード永続化の具象実装

use crate::core::{RecordWriter, ResultRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// 新規作成する出力ファイルのモード（umask適用前）
#[cfg(unix)]
const RECORD_FILE_MODE: u32 = 0o666;

/// ResultRecordをJSONオブジェクトとして1ファイルに書き出す実装
///
/// 同じディレクトリに一時ファイルを書いてからリネームするため、
/// 読み手が書きかけの内容を見ることはない
#[derive(Debug, Default, Clone)]
pub struct JsonRecordWriter;

impl JsonRecordWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecordWriter for JsonRecordWriter {
    async fn write_record(&self, record: &ResultRecord, destination: &Path) -> Result<()> {
        let payload = serde_json::to_vec(record).context("Failed to serialize result record")?;

        tokio::task::spawn_blocking({
            let destination = destination.to_path_buf();
            move || write_atomically(&destination, &payload)
        })
        .await
        .context("Failed to spawn blocking task for record writing")?
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}

/// 一時ファイル経由で出力先の内容を置き換える
///
/// 一時ファイルは通常の新規ファイルと同じくumaskに従ったモードで作成する
pub fn write_atomically(destination: &Path, payload: &[u8]) -> Result<()> {
    let parent = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(RECORD_FILE_MODE));
    }

    let mut temp_file = builder
        .tempfile_in(&parent)
        .with_context(|| format!("Failed to create temporary file in: {}", parent.display()))?;

    temp_file
        .write_all(payload)
        .and_then(|_| temp_file.flush())
        .with_context(|| format!("Failed to write record for: {}", destination.display()))?;

    temp_file
        .persist(destination)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to persist record to: {}", destination.display()))?;

    Ok(())
}
