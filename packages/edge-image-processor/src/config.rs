use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// 起動時に環境変数から読み込む設定
///
/// Storage Proxy の接続情報は `StorageProxyClient::from_env` が別に読む
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub bucket: String,
}

impl GatewayConfig {
    /// 環境変数から設定を作成する
    ///
    /// 必須の環境変数:
    /// - ORIGIN_BUCKET
    ///
    /// 任意の環境変数:
    /// - BIND_ADDR（デフォルト 0.0.0.0:8080）
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let bucket = lookup("ORIGIN_BUCKET")
            .filter(|b| !b.is_empty())
            .ok_or_else(|| "ORIGIN_BUCKET is not set".to_string())?;

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|e| format!("BIND_ADDR is invalid ({raw_addr}): {e}"))?;

        Ok(Self { bind_addr, bucket })
    }
}
