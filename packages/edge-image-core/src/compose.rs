use bytes::Bytes;

use crate::constants::MAX_OUTPUT_BYTES;
use crate::edge::EdgeResponse;

/// パイプラインの結果（終端エラーを除く）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// 受け取ったレスポンスをそのまま返す
    PassthroughOriginal,
    /// 変換指示がないため、取得した原本を返す
    OriginalImage { bytes: Bytes, extension: String },
    /// 変換済みの画像
    TransformedImage { bytes: Vec<u8>, format: String },
}

/// 結果から最終的なレスポンスを組み立てる
///
/// 変換結果が [`MAX_OUTPUT_BYTES`] を超える場合は破棄し、元のレスポンスを返す
pub fn compose(outcome: PipelineOutcome, mut original: EdgeResponse) -> EdgeResponse {
    match outcome {
        PipelineOutcome::PassthroughOriginal => original,
        PipelineOutcome::OriginalImage { bytes, extension } => {
            original.set_image_body(&bytes, format!("image/{extension}"));
            original
        }
        PipelineOutcome::TransformedImage { bytes, format } => {
            tracing::info!(bytes = bytes.len(), format = %format, "transformed image size");
            if bytes.len() > MAX_OUTPUT_BYTES {
                tracing::info!(
                    bytes = bytes.len(),
                    limit = MAX_OUTPUT_BYTES,
                    "transformed image exceeds limit, returning original response"
                );
                return original;
            }
            original.set_image_body(&bytes, format!("image/{format}"));
            original
        }
    }
}
