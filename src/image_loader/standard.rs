use super::ImageLoaderBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// `image`クレートによるデコード
///
/// フォーマットは拡張子ではなくファイル内容から判定する
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardImageLoader;

impl StandardImageLoader {
    pub fn new() -> Self {
        Self
    }
}

/// ファイルを開き、内容からフォーマットを判定してデコード（ブロッキング）
fn decode_file(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read file header: {}", path.display()))?;

    Ok(reader.decode()?)
}

#[async_trait]
impl ImageLoaderBackend for StandardImageLoader {
    async fn load_from_path(&self, path: &Path) -> Result<DynamicImage> {
        tokio::task::spawn_blocking({
            let path = path.to_path_buf();
            move || decode_file(&path)
        })
        .await
        .context("Failed to spawn blocking task for image decoding")?
        .with_context(|| format!("Failed to decode image: {}", path.display()))
    }
}
