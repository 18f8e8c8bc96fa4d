use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use super::ObjectStore;
use crate::errors::StorageError;

/// Storage Proxy クライアント
///
/// Cloudflare Access で保護された Storage Proxy Worker に HTTP リクエストを送信して
/// オリジンのバケットからオブジェクトを取得する
#[derive(Clone)]
pub struct StorageProxyClient {
    client: Client,
    base_url: String,
    cf_access_client_id: String,
    cf_access_client_secret: String,
}

impl StorageProxyClient {
    /// 新しい StorageProxyClient を作成する
    pub fn new(
        base_url: String,
        cf_access_client_id: String,
        cf_access_client_secret: String,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cf_access_client_id,
            cf_access_client_secret,
        }
    }

    /// 環境変数から StorageProxyClient を作成する
    ///
    /// 必須の環境変数:
    /// - STORAGE_PROXY_URL
    /// - CF_ACCESS_CLIENT_ID
    /// - CF_ACCESS_CLIENT_SECRET
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("STORAGE_PROXY_URL")
            .map_err(|_| "STORAGE_PROXY_URL is not set".to_string())?;
        let cf_access_client_id = std::env::var("CF_ACCESS_CLIENT_ID")
            .map_err(|_| "CF_ACCESS_CLIENT_ID is not set".to_string())?;
        let cf_access_client_secret = std::env::var("CF_ACCESS_CLIENT_SECRET")
            .map_err(|_| "CF_ACCESS_CLIENT_SECRET is not set".to_string())?;

        Ok(Self::new(base_url, cf_access_client_id, cf_access_client_secret))
    }

    /// バケットとキーから取得先 URL を組み立てる
    ///
    /// キーはデコード済みなので、セグメントごとにパーセントエンコードし直す
    fn object_url(&self, bucket: &str, key: &str) -> String {
        let encoded_key = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            encoded_key
        )
    }
}

#[async_trait]
impl ObjectStore for StorageProxyClient {
    /// バケットとキーを指定して Storage Proxy Worker からオブジェクトを取得する
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let url = self.object_url(bucket, key);

        let response = self
            .client
            .get(&url)
            .header("CF-Access-Client-Id", &self.cf_access_client_id)
            .header("CF-Access-Client-Secret", &self.cf_access_client_secret)
            .send()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            reqwest::StatusCode::NOT_FOUND => {
                return Err(StorageError::NotFound {
                    key: key.to_string(),
                });
            }
            reqwest::StatusCode::FORBIDDEN => {
                tracing::error!(bucket = %bucket, key = %key, "access denied by Storage Proxy");
                return Err(StorageError::Forbidden);
            }
            status => {
                tracing::error!(bucket = %bucket, key = %key, status = %status, "unexpected response from Storage Proxy");
                return Err(StorageError::Internal(format!(
                    "unexpected status: {status}"
                )));
            }
        }

        response
            .bytes()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))
    }
}
