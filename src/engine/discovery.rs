// Discovery - ソースツリーの検証と走査

use crate::core::{ExtractionError, ExtractionResult};
use anyhow::Context;
use std::path::Path;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// ソースルートが存在し、読み取り可能なディレクトリであることを確認
pub fn ensure_source_root(source_root: &Path) -> ExtractionResult<()> {
    let metadata = match std::fs::metadata(source_root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ExtractionError::source_not_found(source_root));
        }
        Err(e) => return Err(ExtractionError::file_discovery(source_root, e.into())),
    };

    if !metadata.is_dir() {
        return Err(ExtractionError::source_not_directory(source_root));
    }

    std::fs::read_dir(source_root)
        .with_context(|| format!("Failed to read directory: {}", source_root.display()))
        .map_err(|e| ExtractionError::file_discovery(source_root, e))?;

    Ok(())
}

/// ソースツリーの走査イテレータ
///
/// 読めないサブディレクトリは警告を出して飛ばす
pub fn walk_files(source_root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(source_root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(
                    path = ?error.path(),
                    error = %error,
                    "skipping unreadable entry"
                );
                None
            }
        })
        .filter(is_candidate_file)
}

/// ディレクトリ以外のエントリ（ディレクトリへのシンボリックリンクも除く）
pub fn is_candidate_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return false;
    }
    if file_type.is_symlink() {
        return !entry.path().is_dir();
    }
    true
}

/// 進捗計算用に全ファイル数を数える（読み取りのみ）
pub fn count_files(source_root: &Path) -> usize {
    walk_files(source_root).count()
}
