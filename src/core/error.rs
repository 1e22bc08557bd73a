// ディレクトリ抽出処理のカスタムエラー型定義

use std::path::{Path, PathBuf};
use thiserror::Error;

/// 抽出処理固有のエラー型
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("ソースディレクトリが存在しません: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("ソースパスがディレクトリではありません: {}", path.display())]
    SourceNotDirectory { path: PathBuf },

    #[error("ファイル発見エラー: {} - {source:#}", path.display())]
    FileDiscovery {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("出力ディレクトリ作成エラー: {} - {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("設定エラー: {message}")]
    Configuration { message: String },

    #[error("レコード抽出エラー: {} - {source:#}", file_path.display())]
    Extraction {
        file_path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("永続化エラー: {} - {source:#}", file_path.display())]
    Persistence {
        file_path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("ワーカープールエラー: {message}")]
    WorkerPool { message: String },
}

impl ExtractionError {
    pub fn source_not_found(path: impl AsRef<Path>) -> Self {
        Self::SourceNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn source_not_directory(path: impl AsRef<Path>) -> Self {
        Self::SourceNotDirectory {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// ファイル発見エラーの作成
    pub fn file_discovery(path: impl AsRef<Path>, source: anyhow::Error) -> Self {
        Self::FileDiscovery {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn directory_creation(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn extraction(file_path: impl AsRef<Path>, source: anyhow::Error) -> Self {
        Self::Extraction {
            file_path: file_path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn persistence(file_path: impl AsRef<Path>, source: anyhow::Error) -> Self {
        Self::Persistence {
            file_path: file_path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn worker_pool(message: impl Into<String>) -> Self {
        Self::WorkerPool {
            message: message.into(),
        }
    }
}

/// 抽出処理の結果型
pub type ExtractionResult<T> = Result<T, ExtractionError>;
