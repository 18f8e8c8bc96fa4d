use crate::errors::TransformError;
use crate::request::TransformDirective;
use crate::transform::engine::{ImageMetadata, TransformEngine};
use crate::validation::validate_directive;

/// リサイズを行うか判定する
///
/// 幅・高さのどちらかが指定され、かつソースのその寸法が指定値以上であれば行う。
/// 判定は OR なので、片方の軸だけ拡大される場合もある。
pub fn should_resize(meta: &ImageMetadata, directive: &TransformDirective) -> bool {
    let reaches = |source: u32, requested: Option<u32>| requested.is_some_and(|r| source >= r);

    reaches(meta.width, directive.width) || reaches(meta.height, directive.height)
}

/// 変換指示に従って原本を変換し、エンコード済みのバイト列を返す
///
/// デコード → 正立 → (必要なら) リサイズ → エンコードの順に処理する。
pub fn apply_directive<E: TransformEngine>(
    engine: &E,
    input: &[u8],
    directive: &TransformDirective,
) -> Result<Vec<u8>, TransformError> {
    validate_directive(directive)?;

    let image = engine.decode(input)?;
    let image = engine.auto_orient(image)?;

    let meta = engine.metadata(&image);
    tracing::info!(
        width = meta.width,
        height = meta.height,
        orientation = ?meta.orientation,
        "source image metadata"
    );

    let image = if should_resize(&meta, directive) {
        tracing::info!(w = ?directive.width, h = ?directive.height, "resizing image");
        engine.resize(image, directive.width, directive.height)?
    } else {
        if directive.has_dimensions() {
            tracing::info!(
                w = ?directive.width,
                h = ?directive.height,
                "source is smaller than requested, skipping resize"
            );
        }
        image
    };

    // validate_directive で 1-100 を保証済み
    let quality = directive.quality.map(|q| q as u8);
    engine.encode(image, directive.format(), quality)
}
