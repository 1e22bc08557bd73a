// 抽出処理に関連するデータ型定義

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 1ファイル分の処理単位（ソースファイルと出力先ファイルの組）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
}

impl WorkItem {
    pub fn new(source_path: impl Into<PathBuf>, destination_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source_path
    }

    pub fn destination(&self) -> &Path {
        &self.destination_path
    }
}

/// 1ファイルから抽出された数値フィールドの集合
///
/// キー順で直列化されるため、同じ入力からは常に同じ出力が得られる
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRecord {
    fields: BTreeMap<String, f64>,
}

impl ResultRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// 走査中の1ファイルに対する判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchDecision {
    /// ワーカープールへ投入する
    Dispatch(WorkItem),
    /// 拡張子が対象外
    SkipExtension,
    /// ファイル名フィルタで除外
    SkipFiltered,
    /// 出力済み（再開モードでない）
    SkipExisting,
    /// 同じ実行内で同じ出力先が既に投入済み
    SkipDuplicate(PathBuf),
}

/// ワーカーから返される個別処理の結果
#[derive(Debug)]
pub enum ItemOutcome {
    Written {
        item: WorkItem,
        elapsed_ms: u64,
    },
    Failed {
        item: WorkItem,
        error: String,
    },
}

impl ItemOutcome {
    pub fn item(&self) -> &WorkItem {
        match self {
            Self::Written { item, .. } | Self::Failed { item, .. } => item,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// ワーカープールが集計した書き込み結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub written: usize,
    pub failed: usize,
}

/// 1回の実行全体のサマリー
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// 事前走査で数えたファイル総数
    pub total_files: usize,
    /// 本走査で訪問したファイル数（スキップ分も含む）
    pub visited_files: usize,
    pub dispatched: usize,
    pub skipped_extension: usize,
    pub skipped_filtered: usize,
    pub skipped_existing: usize,
    pub duplicate_destinations: usize,
    pub written: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
    /// 設定された出力ルート
    pub destination_root: PathBuf,
    /// 実際にレコードが置かれるルート（`<destination_root>/<basename(source_root)>`）
    pub output_root: PathBuf,
}

impl RunSummary {
    pub(crate) fn record_decision(&mut self, decision: &DispatchDecision) {
        match decision {
            DispatchDecision::Dispatch(_) => self.dispatched += 1,
            DispatchDecision::SkipExtension => self.skipped_extension += 1,
            DispatchDecision::SkipFiltered => self.skipped_filtered += 1,
            DispatchDecision::SkipExisting => self.skipped_existing += 1,
            DispatchDecision::SkipDuplicate(_) => self.duplicate_destinations += 1,
        }
    }

    /// 訪問済みファイルの割合（%）
    pub fn completion_percentage(&self) -> f64 {
        completion_percentage(self.visited_files, self.total_files)
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// `processed / total * 100`、ただしファイルが無い場合は100%とみなす
pub fn completion_percentage(processed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (processed as f64 / total as f64) * 100.0
}
