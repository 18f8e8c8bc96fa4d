use thiserror::Error;

/// パイプラインの終端エラー
///
/// ここに含まれるものは元のレスポンスへのフォールバックでは回復しない。
/// 呼び出し側（エッジ層）にそのまま渡される。
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid URI format: {uri}")]
    InvalidUriFormat { uri: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

/// ストレージアクセスエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("access denied")]
    Forbidden,

    #[error("storage error: {0}")]
    Internal(String),
}

/// 画像変換エラー
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
