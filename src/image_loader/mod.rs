// 画像デコード層
// ファイルから画素データを得る部分をRecordExtractorから切り離す

use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;
use std::path::Path;

pub mod standard;

/// 画像デコードの抽象化トレイト
#[async_trait]
pub trait ImageLoaderBackend: Send + Sync {
    /// ファイルを読み込み、元のサイズのままデコードする
    async fn load_from_path(&self, path: &Path) -> Result<DynamicImage>;
}
