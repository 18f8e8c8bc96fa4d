/// 変換結果の最大バイト数（これを超えた場合は元のレスポンスを返す）
pub const MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// 出力フォーマットのデフォルト
pub const DEFAULT_FORMAT: &str = "webp";

/// 変換対象となる拡張子（大文字小文字は区別しない）
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// リサイズ後の最大寸法（幅・高さ）。切り抜き前の拡大途中の寸法にも適用する
pub const MAX_DIMENSION: u32 = 8192;

/// 画像の最大ピクセル数（1GP = 実質無制限、極端な攻撃のみ防止）
pub const MAX_PIXELS: u64 = 1_000_000_000;

/// 品質未指定時にエンジンが使う品質（1-100）
pub const DEFAULT_QUALITY: u8 = 80;
