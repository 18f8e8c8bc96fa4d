use std::collections::BTreeMap;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// CDN の origin-response トリガーが送ってくるイベント
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cf: Option<CfPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CfPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<EdgeRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<EdgeResponse>,
}

impl EdgeEvent {
    /// 最初のレコードからリクエストとレスポンスを取り出す
    ///
    /// どちらかが欠けているイベントは None
    pub fn into_parts(self) -> Option<(EdgeRequest, EdgeResponse)> {
        let cf = self.records.into_iter().next()?.cf?;
        Some((cf.request?, cf.response?))
    }
}

/// エッジが受け取ったリクエスト
///
/// 使わないフィールドも `extra` にそのまま保持する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub uri: String,
    #[serde(default)]
    pub querystring: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdgeRequest {
    pub fn new(uri: impl Into<String>, querystring: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            querystring: querystring.into(),
            extra: Map::new(),
        }
    }
}

/// ヘッダー値。名前は小文字化したものがマップのキーになる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    Base64,
    Text,
}

/// エッジに返すレスポンス
///
/// status は文字列でも数値でも受け付け、CDN の形式に合わせて文字列で書き出す。
/// 未知のフィールド（statusDescription など）は `extra` に保持し、そのまま返す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeResponse {
    #[serde(with = "status_code")]
    pub status: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<HeaderEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_encoding: Option<BodyEncoding>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdgeResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: None,
            body_encoding: None,
            extra: Map::new(),
        }
    }

    /// テキスト本文付きのレスポンス
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::new(status)
        }
    }

    /// 画像本文を base64 で設定し、ステータスを 200 にする
    pub fn set_image_body(&mut self, bytes: &[u8], content_type: String) {
        self.status = 200;
        self.body = Some(base64::engine::general_purpose::STANDARD.encode(bytes));
        self.body_encoding = Some(BodyEncoding::Base64);
        self.headers.insert(
            "content-type".to_string(),
            vec![HeaderEntry {
                key: Some("Content-Type".to_string()),
                value: content_type,
            }],
        );
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }
}

mod status_code {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStatus {
        Number(u16),
        Text(String),
    }

    pub fn serialize<S: Serializer>(status: &u16, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(status)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
        match RawStatus::deserialize(deserializer)? {
            RawStatus::Number(n) => Ok(n),
            RawStatus::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid status: {s}"))),
        }
    }
}
