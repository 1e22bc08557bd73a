// レコード抽出 - 画像の画素統計をResultRecordに変換する

use crate::core::{RecordExtractor, ResultRecord};
use crate::image_loader::ImageLoaderBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

pub mod stats;

pub use stats::{pixel_statistics, PixelStatistics};

/// 平均値フィールド名
pub const IMG_MEAN_FIELD: &str = "img_mean";
/// 分散フィールド名
pub const IMG_VAR_FIELD: &str = "img_var";

/// 画像を読み込み、画素値の平均と分散を`img_mean`/`img_var`として返す抽出器
#[derive(Clone, Debug, Default)]
pub struct ImageStatsExtractor<L> {
    loader: L,
}

impl<L> ImageStatsExtractor<L>
where
    L: ImageLoaderBackend,
{
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

#[async_trait]
impl<L> RecordExtractor for ImageStatsExtractor<L>
where
    L: ImageLoaderBackend,
{
    async fn extract(&self, path: &Path) -> Result<ResultRecord> {
        let image = self.loader.load_from_path(path).await?;
        let stats = tokio::task::spawn_blocking(move || pixel_statistics(&image))
            .await
            .context("Failed to spawn blocking task for pixel statistics")?
            .with_context(|| format!("Failed to compute statistics for: {}", path.display()))?;

        Ok(ResultRecord::new()
            .with_field(IMG_MEAN_FIELD, stats.mean)
            .with_field(IMG_VAR_FIELD, stats.variance))
    }

    fn extractor_name(&self) -> &'static str {
        "image_stats"
    }
}
