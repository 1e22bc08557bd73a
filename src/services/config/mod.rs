// 設定管理機能

pub mod implementations;

// 公開API
pub use implementations::{
    RunConfig, DEFAULT_MAX_WORKERS, DEFAULT_OUTPUT_EXTENSION, DEFAULT_VALID_EXTENSION,
};
