// 抽出システムのトレイト定義
// 走査・投入ロジックから差し替え可能な部分を全てここで抽象化する

use super::types::{ResultRecord, RunSummary};
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::path::Path;

/// 1ファイルからResultRecordを計算する抽象化トレイト
#[automock]
#[async_trait]
pub trait RecordExtractor: Send + Sync {
    /// ファイルを読み込みレコードを計算
    async fn extract(&self, path: &Path) -> Result<ResultRecord>;

    /// 抽出器の名前を取得
    fn extractor_name(&self) -> &'static str;
}

/// ファイル名による除外フックの抽象化トレイト
///
/// 拡張子判定とは独立に、隠しファイルやサイドカーファイルを処理対象から外すために使う
#[automock]
pub trait FilenameFilter: Send + Sync {
    /// trueを返したファイルは処理されない
    fn is_excluded(&self, file_name: &str) -> bool;
}

// FilenameFilter for Box<dyn FilenameFilter>
impl FilenameFilter for Box<dyn FilenameFilter> {
    fn is_excluded(&self, file_name: &str) -> bool {
        self.as_ref().is_excluded(file_name)
    }
}

/// レコードの直列化・書き込みの抽象化トレイト
#[automock]
#[async_trait]
pub trait RecordWriter: Send + Sync {
    /// 出力先ファイルの内容をレコードで完全に置き換える
    async fn write_record(&self, record: &ResultRecord, destination: &Path) -> Result<()>;

    /// 出力フォーマットの名前を取得
    fn format_name(&self) -> &'static str;
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_files: usize, worker_count: usize);

    /// 進捗更新の報告（訪問済みファイル数 / 総ファイル数）
    async fn report_progress(&self, visited: usize, total: usize);

    /// 個別ファイルのエラー報告
    async fn report_error(&self, file_path: &Path, error: &str);

    /// 処理完了時の報告
    async fn report_completed(&self, summary: &RunSummary);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_files: usize, worker_count: usize) {
        self.as_ref().report_started(total_files, worker_count).await
    }

    async fn report_progress(&self, visited: usize, total: usize) {
        self.as_ref().report_progress(visited, total).await
    }

    async fn report_error(&self, file_path: &Path, error: &str) {
        self.as_ref().report_error(file_path, error).await
    }

    async fn report_completed(&self, summary: &RunSummary) {
        self.as_ref().report_completed(summary).await
    }
}
