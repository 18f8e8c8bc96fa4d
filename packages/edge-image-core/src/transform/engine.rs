use crate::errors::TransformError;
use crate::transform::orientation::Orientation;

/// デコード済み画像の寸法と向き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
}

/// 画像変換エンジン
///
/// デコード・正立・リサイズ・エンコードを提供する。パイプラインはこの順で呼び出し、
/// どの段階の失敗も終端エラーとして扱う。リサイズを行うかどうかの判断は
/// パイプライン側で行い、エンジンは指示された通りに処理する。
pub trait TransformEngine: Send + Sync + 'static {
    /// デコード済み画像のハンドル
    type Image: Send;

    fn decode(&self, input: &[u8]) -> Result<Self::Image, TransformError>;

    /// 埋め込まれた向き情報に従って正立させる
    fn auto_orient(&self, image: Self::Image) -> Result<Self::Image, TransformError>;

    fn metadata(&self, image: &Self::Image) -> ImageMetadata;

    /// 未指定の寸法はアスペクト比から補う
    fn resize(
        &self,
        image: Self::Image,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Self::Image, TransformError>;

    /// `quality` が None の場合はエンジンのデフォルト品質を使う
    fn encode(
        &self,
        image: Self::Image,
        format: &str,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, TransformError>;
}
