// ファイル処理機能
// 単一ファイルのレコード抽出と書き込み

pub mod worker;

// 公開API
pub use worker::process_work_item;
