// テストユーティリティ

use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

/// 単色のPNG画像を書き出す（拡張子に関係なくPNGとして保存）
pub fn write_png(path: &Path, width: u32, height: u32, value: [u8; 3]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(width, height, Rgb(value))
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// 出力レコードを読み込む
pub fn read_record(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// テスト用のソースツリーを作成
///
/// ```text
/// <base>/dataset/
///   a.csv          (PNG, 値 10)
///   notes.txt
///   nested/b.CSV   (PNG, 値 [0, 100, 200])
///   nested/deeper/c.csv (PNG, 値 50)
///   nested/deeper/c.png (PNG, 値 50)
/// ```
pub fn setup_dataset(base: &Path) -> PathBuf {
    let source = base.join("dataset");
    write_png(&source.join("a.csv"), 2, 2, [10, 10, 10]);
    fs::write(source.join("notes.txt"), "not an image").unwrap();
    write_png(&source.join("nested").join("b.CSV"), 3, 1, [0, 100, 200]);
    write_png(&source.join("nested/deeper/c.csv"), 1, 1, [50, 50, 50]);
    write_png(&source.join("nested/deeper/c.png"), 1, 1, [50, 50, 50]);
    source
}
