use crate::errors::GatewayError;

/// リクエスト URI から導出したオブジェクトキー
///
/// `name` は URI 上の表記のまま（URL エンコードされたまま）保持する。
/// デコードは変換対象と判定された後、[`ObjectKey::storage_key`] で行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    pub name: String,
    pub extension: String,
}

impl ObjectKey {
    /// URI をファイル名と拡張子に分解する
    ///
    /// 先頭のスラッシュは1つだけ取り除き、最後のパスセグメントの最後のドットで分割する。
    /// 拡張子が取り出せない URI はストレージキーに解決できないため終端エラーとする。
    pub fn parse(uri: &str) -> Result<Self, GatewayError> {
        let invalid = || GatewayError::InvalidUriFormat {
            uri: uri.to_string(),
        };

        let path = uri.strip_prefix('/').unwrap_or(uri);
        let segment_start = path.rfind('/').map_or(0, |i| i + 1);
        let dot = path[segment_start..]
            .rfind('.')
            .map(|i| segment_start + i)
            .ok_or_else(invalid)?;

        let (name, extension) = (&path[..dot], &path[dot + 1..]);
        if extension.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            extension: extension.to_string(),
        })
    }

    /// ストレージ参照用のキー（`urldecode(name) + "." + extension`）
    ///
    /// 名前が UTF-8 として不正なエスケープを含む場合は解決できない
    pub fn storage_key(&self) -> Result<String, GatewayError> {
        let decoded = urlencoding::decode(&self.name).map_err(|_| GatewayError::InvalidUriFormat {
            uri: format!("{}.{}", self.name, self.extension),
        })?;
        Ok(format!("{decoded}.{}", self.extension))
    }
}
