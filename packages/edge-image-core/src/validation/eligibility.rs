use crate::constants::IMAGE_EXTENSIONS;
use crate::request::TransformDirective;

/// 拡張子と変換指示から決まる処理経路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// 画像ではないため、ストレージを参照せず元のレスポンスを返す
    Passthrough,
    /// 画像だが変換指示がないため、取得した原本をそのまま返す
    OriginalOnly,
    /// 取得した原本を変換する
    Transform,
}

/// 変換対象の拡張子か（大文字小文字は区別しない）
pub fn is_image_extension(extension: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(extension))
}

/// 処理経路を判定する
pub fn classify(extension: &str, directive: &TransformDirective) -> Eligibility {
    if !is_image_extension(extension) {
        Eligibility::Passthrough
    } else if directive.is_empty() {
        Eligibility::OriginalOnly
    } else {
        Eligibility::Transform
    }
}
