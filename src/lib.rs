//! ディレクトリツリーを走査し、各画像ファイルの画素統計をJSONレコードとして
//! ミラーリングした出力ツリーへ書き出すライブラリ。
//!
//! 出力済みのファイルは再実行時に飛ばされるため、途中で止めた実行を再開できる。

// 基盤レイヤー
pub mod core;
pub mod image_loader;
pub mod record;

// サービス層
pub mod services;

// エンジン層
pub mod engine;

// CLI層
pub mod cli;

pub use crate::core::{ExtractionError, ExtractionResult, ResultRecord, RunSummary, WorkItem};
pub use engine::{create_default_extractor, run_extraction, DirectoryExtractor};
pub use services::RunConfig;
