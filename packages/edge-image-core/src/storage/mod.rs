pub mod client;

use async_trait::async_trait;
use bytes::Bytes;

pub use client::StorageProxyClient;
// StorageError は errors モジュールで定義済み
pub use crate::errors::StorageError;

/// オリジンのオブジェクトストア
///
/// 存在しないオブジェクトは [`StorageError::NotFound`] として返し、
/// それ以外の失敗と区別する。
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;
}
