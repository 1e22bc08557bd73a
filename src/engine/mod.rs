// エンジン層 - 走査・出力先決定・並列実行
// サービス層の部品を組み合わせて1回分の抽出を実行する

pub mod api;
pub mod discovery;
pub mod extractor;
pub mod planner;
pub mod pool;
pub mod producer;

pub use api::{
    create_default_extractor, create_filtered_extractor, create_quiet_extractor, run_extraction,
    DefaultDirectoryExtractor, DefaultRecordExtractor,
};
pub use extractor::DirectoryExtractor;
pub use planner::{output_file_name, DestinationPlanner};
pub use pool::WorkerPool;
pub use producer::{spawn_planner, PlannedFile};
