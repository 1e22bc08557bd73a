// 高レベル公開API
// DirectoryExtractorを既定の依存関係で簡単に使用するための関数

use super::DirectoryExtractor;
use crate::{
    core::{ExtractionResult, FilenameFilter, RunSummary},
    image_loader::standard::StandardImageLoader,
    record::ImageStatsExtractor,
    services::{
        AcceptAllFilter, ConsoleProgressReporter, JsonRecordWriter, NoOpProgressReporter,
        RunConfig,
    },
};

/// 既定の画像統計抽出器
pub type DefaultRecordExtractor = ImageStatsExtractor<StandardImageLoader>;

/// 既定の依存関係で構成したエンジン
pub type DefaultDirectoryExtractor<F = AcceptAllFilter, R = ConsoleProgressReporter> =
    DirectoryExtractor<DefaultRecordExtractor, F, JsonRecordWriter, R>;

/// DirectoryExtractor作成のヘルパー関数
///
/// 画像統計抽出・JSON出力・コンソール進捗表示
pub fn create_default_extractor(config: RunConfig) -> DefaultDirectoryExtractor {
    create_filtered_extractor(config, AcceptAllFilter, ConsoleProgressReporter::new())
}

/// DirectoryExtractor作成のヘルパー関数（静音版）
///
/// テストやバックグラウンド処理用
pub fn create_quiet_extractor(
    config: RunConfig,
) -> DefaultDirectoryExtractor<AcceptAllFilter, NoOpProgressReporter> {
    create_filtered_extractor(config, AcceptAllFilter, NoOpProgressReporter::new())
}

/// フィルタとレポーターを指定してDirectoryExtractorを作成
pub fn create_filtered_extractor<F, R>(
    config: RunConfig,
    filter: F,
    reporter: R,
) -> DefaultDirectoryExtractor<F, R>
where
    F: FilenameFilter + 'static,
    R: crate::core::ProgressReporter + 'static,
{
    DirectoryExtractor::new(
        config,
        ImageStatsExtractor::new(StandardImageLoader::new()),
        filter,
        JsonRecordWriter::new(),
        reporter,
    )
}

/// 既定構成で1回分の抽出を実行
pub async fn run_extraction(config: RunConfig) -> ExtractionResult<RunSummary> {
    create_default_extractor(config).run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_default_extractor_keeps_config() {
        let config = RunConfig::new("/data/set1", "/out").with_max_workers(2);
        let extractor = create_default_extractor(config.clone());

        assert_eq!(extractor.config(), &config);
    }

    #[tokio::test]
    async fn test_quiet_extractor_runs_on_empty_tree() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("set1");
        std::fs::create_dir_all(&source).unwrap();

        let summary = create_quiet_extractor(RunConfig::new(&source, temp_dir.path()))
            .run()
            .await
            .unwrap();

        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.output_root, temp_dir.path().join("set1"));
    }
}
