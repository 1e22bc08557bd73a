// Planner - 出力先パスの決定と投入判定

use crate::core::{DispatchDecision, ExtractionError, ExtractionResult, FilenameFilter, WorkItem};
use crate::services::config::RunConfig;
use std::collections::{BTreeSet, HashSet};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// ファイル名の拡張子（最後の`.`以降）。`.`が無い場合はファイル名全体
pub fn file_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// 出力ファイル名: 拡張子を除いた`.`区切りの部分を`_`で連結し、出力拡張子をそのまま続ける
///
/// `a.b.csv` + `json` → `a_bjson`、`a.csv` + `.json` → `a.json`。
/// UTF-8でない名前もバイト列のまま扱う
#[cfg(unix)]
pub fn output_file_name(file_name: &OsStr, output_extension: &str) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let parts: Vec<&[u8]> = file_name.as_bytes().split(|&b| b == b'.').collect();
    let mut name = parts[..parts.len() - 1].join(&b'_');
    name.extend_from_slice(output_extension.as_bytes());
    OsString::from_vec(name)
}

#[cfg(not(unix))]
pub fn output_file_name(file_name: &OsStr, output_extension: &str) -> OsString {
    let file_name = file_name.to_string_lossy();
    let parts: Vec<&str> = file_name.split('.').collect();
    let stem = parts[..parts.len() - 1].join("_");
    OsString::from(format!("{stem}{output_extension}"))
}

/// ソースツリーから出力ツリーへのパス写像と、ファイルごとの投入判定を行う
#[derive(Debug, Clone)]
pub struct DestinationPlanner {
    source_root: PathBuf,
    output_root: PathBuf,
    accepted_extensions: BTreeSet<String>,
    output_extension: String,
    restart: bool,
}

impl DestinationPlanner {
    /// 出力ルートは`<destination_root>/<basename(source_root)>`
    ///
    /// `..`のように名前を持たないソースルートは正規化してから名前を取る
    pub fn new(config: &RunConfig) -> ExtractionResult<Self> {
        let source_root = config.source_root().to_path_buf();
        let base_name = match source_root.file_name() {
            Some(name) => Some(name.to_os_string()),
            None => source_root
                .canonicalize()
                .map_err(|e| ExtractionError::file_discovery(&source_root, e.into()))?
                .file_name()
                .map(|name| name.to_os_string()),
        };

        let output_root = match base_name {
            Some(name) => config.destination_root().join(name),
            None => config.destination_root().to_path_buf(),
        };

        Ok(Self {
            source_root,
            output_root,
            accepted_extensions: config.accepted_extensions().clone(),
            output_extension: config.output_extension().to_string(),
            restart: config.restart(),
        })
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// 拡張子（`.`なし）が対象かどうか（大文字小文字は区別しない）
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.accepted_extensions
            .contains(&extension.to_lowercase())
    }

    /// ソース側ディレクトリに対応する出力側ディレクトリ
    pub fn mirrored_dir(&self, source_dir: &Path) -> ExtractionResult<PathBuf> {
        let relative = source_dir.strip_prefix(&self.source_root).map_err(|e| {
            ExtractionError::file_discovery(
                source_dir,
                anyhow::anyhow!("path is outside source root {}: {e}", self.source_root.display()),
            )
        })?;

        if relative.as_os_str().is_empty() {
            Ok(self.output_root.clone())
        } else {
            Ok(self.output_root.join(relative))
        }
    }

    /// ソースファイルに対応する出力ファイルのパス
    pub fn destination_for(&self, source_file: &Path) -> ExtractionResult<PathBuf> {
        let parent = source_file.parent().unwrap_or(&self.source_root);
        let file_name = source_file.file_name().ok_or_else(|| {
            ExtractionError::file_discovery(source_file, anyhow::anyhow!("path has no file name"))
        })?;

        Ok(self
            .mirrored_dir(parent)?
            .join(output_file_name(file_name, &self.output_extension)))
    }

    /// 1ファイルを投入すべきかを判定する
    ///
    /// `dispatched`はこの実行で既に投入した出力先の集合で、同じ出力先への二重書き込みを防ぐ
    pub fn plan<F>(
        &self,
        source_file: &Path,
        filter: &F,
        dispatched: &mut HashSet<PathBuf>,
    ) -> ExtractionResult<DispatchDecision>
    where
        F: FilenameFilter + ?Sized,
    {
        // フィルタと拡張子判定は表示用の名前で行う（出力名は元のバイト列から作る）
        let file_name = source_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if filter.is_excluded(&file_name) {
            return Ok(DispatchDecision::SkipFiltered);
        }

        if !self.accepts_extension(file_extension(&file_name)) {
            return Ok(DispatchDecision::SkipExtension);
        }

        let destination = self.destination_for(source_file)?;

        if !self.restart && destination.is_file() {
            return Ok(DispatchDecision::SkipExisting);
        }

        if !dispatched.insert(destination.clone()) {
            return Ok(DispatchDecision::SkipDuplicate(destination));
        }

        Ok(DispatchDecision::Dispatch(WorkItem::new(
            source_file,
            destination,
        )))
    }
}
