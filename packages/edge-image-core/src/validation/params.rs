use crate::errors::TransformError;
use crate::request::TransformDirective;

/// 品質が 1-100 の範囲にあるか検証する
///
/// 幅・高さはクエリ解析の時点で正の値だけが残る
pub fn validate_directive(directive: &TransformDirective) -> Result<(), TransformError> {
    if let Some(q) = directive.quality
        && !(1..=100).contains(&q)
    {
        return Err(TransformError::InvalidParams(format!(
            "quality must be 1-100, got {q}"
        )));
    }

    Ok(())
}
