// 実行設定の具象実装

use crate::core::{ExtractionError, ExtractionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_VALID_EXTENSION: &str = "csv";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "json";
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// 1回の実行の設定（実行中は変更されない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    source_root: PathBuf,
    destination_root: PathBuf,
    accepted_extensions: BTreeSet<String>,
    output_extension: String,
    restart: bool,
    max_workers: usize,
}

impl RunConfig {
    pub fn new(source_root: impl Into<PathBuf>, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            accepted_extensions: BTreeSet::from([DEFAULT_VALID_EXTENSION.to_string()]),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            restart: false,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }

    /// 対象拡張子を置き換える（大文字小文字は区別しない、先頭の`.`は無視）
    pub fn with_accepted_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.accepted_extensions = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self
    }

    /// 出力拡張子を設定
    ///
    /// 出力ファイル名にはそのまま連結されるため、`.json`のように`.`を含めない限り
    /// 区切りの`.`は挿入されない
    pub fn with_output_extension(mut self, output_extension: impl Into<String>) -> Self {
        self.output_extension = output_extension.into();
        self
    }

    pub fn with_restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    pub fn accepted_extensions(&self) -> &BTreeSet<String> {
        &self.accepted_extensions
    }

    pub fn output_extension(&self) -> &str {
        &self.output_extension
    }

    pub fn restart(&self) -> bool {
        self.restart
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// 拡張子（`.`なし）が対象かどうか
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.accepted_extensions
            .contains(&extension.to_lowercase())
    }

    /// 設定値の検証
    pub fn validate(&self) -> ExtractionResult<()> {
        if self.max_workers == 0 {
            return Err(ExtractionError::configuration(
                "ワーカー数は1以上である必要があります",
            ));
        }

        if self.accepted_extensions.is_empty() {
            return Err(ExtractionError::configuration(
                "対象拡張子を1つ以上指定してください",
            ));
        }

        if self.output_extension.is_empty() {
            return Err(ExtractionError::configuration(
                "出力拡張子が空です",
            ));
        }

        if self.output_extension.contains(['/', '\\']) {
            return Err(ExtractionError::configuration(format!(
                "出力拡張子にパス区切り文字は使えません: {}",
                self.output_extension
            )));
        }

        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(".", ".")
    }
}

fn normalize_extension(extension: &str) -> Option<String> {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
