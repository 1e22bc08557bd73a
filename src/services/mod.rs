// サービス層 - 機能別のビジネスロジック
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod config;
pub mod filter;
pub mod monitoring;
pub mod persistence;
pub mod processing;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::RunConfig;
pub use filter::{AcceptAllFilter, AnyFilter, HiddenFileFilter, SuffixFilter};
pub use monitoring::{ConsoleProgressReporter, MemoryProgressReporter, NoOpProgressReporter};
pub use persistence::{spawn_outcome_collector, JsonRecordWriter};
pub use processing::process_work_item;
