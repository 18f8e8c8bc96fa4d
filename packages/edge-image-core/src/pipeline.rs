use std::sync::Arc;

use crate::compose::{compose, PipelineOutcome};
use crate::edge::{EdgeRequest, EdgeResponse};
use crate::errors::{GatewayError, StorageError, TransformError};
use crate::request::{ObjectKey, TransformDirective};
use crate::storage::ObjectStore;
use crate::transform::{apply_directive, TransformEngine};
use crate::validation::{classify, Eligibility};

/// リクエスト1件ごとの変換パイプライン
///
/// 状態は持たず、ストレージとエンジンは外から注入する。リトライは行わない。
pub struct Pipeline<E: TransformEngine> {
    store: Arc<dyn ObjectStore>,
    engine: Arc<E>,
    bucket: String,
}

impl<E: TransformEngine> Pipeline<E> {
    pub fn new(store: Arc<dyn ObjectStore>, engine: Arc<E>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            engine,
            bucket: bucket.into(),
        }
    }

    /// リクエストを評価し、返すべき結果を決める
    pub async fn evaluate(&self, request: &EdgeRequest) -> Result<PipelineOutcome, GatewayError> {
        let key = ObjectKey::parse(&request.uri)?;
        let directive = TransformDirective::from_query(&request.querystring);

        let wants_transform = match classify(&key.extension, &directive) {
            Eligibility::Passthrough => {
                tracing::info!(uri = %request.uri, "not an image, returning original response");
                return Ok(PipelineOutcome::PassthroughOriginal);
            }
            Eligibility::OriginalOnly => false,
            Eligibility::Transform => true,
        };

        let storage_key = key.storage_key()?;
        tracing::info!(bucket = %self.bucket, key = %storage_key, "fetching object from storage");
        let source = match self.store.get_object(&self.bucket, &storage_key).await {
            Ok(bytes) => bytes,
            Err(StorageError::NotFound { .. }) => {
                tracing::info!(key = %storage_key, "object not found, returning original response");
                return Ok(PipelineOutcome::PassthroughOriginal);
            }
            Err(e) => {
                tracing::error!(key = %storage_key, error = %e, "failed to fetch object");
                return Err(e.into());
            }
        };

        if !wants_transform {
            tracing::info!(key = %storage_key, "no transform parameters, returning original image");
            return Ok(PipelineOutcome::OriginalImage {
                bytes: source,
                extension: key.extension,
            });
        }

        let format = directive.format().to_string();
        let bytes = self.transform(source, directive).await.inspect_err(|e| {
            tracing::error!(key = %storage_key, error = %e, "image transform failed");
        })?;
        Ok(PipelineOutcome::TransformedImage { bytes, format })
    }

    /// 評価結果からエッジに返すレスポンスを組み立てる
    pub async fn handle(
        &self,
        request: &EdgeRequest,
        original: EdgeResponse,
    ) -> Result<EdgeResponse, GatewayError> {
        let outcome = self.evaluate(request).await?;
        Ok(compose(outcome, original))
    }

    /// 変換はブロッキングスレッドで実行する
    async fn transform(
        &self,
        source: bytes::Bytes,
        directive: TransformDirective,
    ) -> Result<Vec<u8>, TransformError> {
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || apply_directive(engine.as_ref(), &source, &directive))
            .await
            .map_err(|e| TransformError::ProcessingFailed(format!("transform task failed: {e}")))?
    }
}
