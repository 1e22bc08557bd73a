use anyhow::{bail, Result};
use image::DynamicImage;

/// 画像全体の画素値統計
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelStatistics {
    pub mean: f64,
    /// 母分散（自由度補正なし）
    pub variance: f64,
    pub sample_count: u64,
}

/// 8bit RGBに正規化した全画素・全チャンネルの平均と分散を計算
///
/// グレースケールは3チャンネルに展開され、アルファは捨てられる。
/// Welford法で1パスで計算する。
pub fn pixel_statistics(image: &DynamicImage) -> Result<PixelStatistics> {
    let rgb = image.to_rgb8();
    let samples = rgb.as_raw();

    if samples.is_empty() {
        bail!(
            "Image has no pixels ({}x{})",
            image.width(),
            image.height()
        );
    }

    let mut count = 0u64;
    let mut mean = 0.0f64;
    let mut m2 = 0.0f64;

    for &value in samples {
        let value = f64::from(value);
        count += 1;
        let delta = value - mean;
        mean += delta / count as f64;
        m2 += delta * (value - mean);
    }

    Ok(PixelStatistics {
        mean,
        variance: m2 / count as f64,
        sample_count: count,
    })
}
