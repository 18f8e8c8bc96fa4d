use crate::constants::DEFAULT_FORMAT;

/// クエリパラメータから組み立てた変換指示
///
/// 各フィールドは独立した Option で、数値として解釈できない値や 0 以下の値は
/// 未指定として扱う。4つすべてが未指定のとき「変換指示なし」となる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformDirective {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u32>,
    pub format: Option<String>,
}

impl TransformDirective {
    /// クエリ文字列（先頭の `?` なし）を解析する
    ///
    /// 認識するキーは `w` `h` `q` `f` のみで、同じキーが複数ある場合は最初の値を使う。
    pub fn from_query(query: &str) -> Self {
        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
            Ok(pairs) => pairs,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "failed to decode query string");
                Vec::new()
            }
        };

        let first = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        Self {
            width: first("w").and_then(parse_positive),
            height: first("h").and_then(parse_positive),
            quality: first("q").and_then(parse_positive),
            format: first("f")
                .filter(|f| !f.is_empty())
                .map(str::to_string),
        }
    }

    /// 4つのフィールドがすべて未指定か
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.quality.is_none()
            && self.format.is_none()
    }

    /// 出力フォーマット（未指定なら webp）
    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    /// 幅・高さのどちらかが指定されているか
    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

/// 先頭の整数部分を読み取る（`"200px"` は 200）
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));

    Some(if negative { -magnitude } else { magnitude })
}

/// 正の整数のみを受け付ける。u32 に収まらない値は u32::MAX に丸める
fn parse_positive(value: &str) -> Option<u32> {
    parse_leading_int(value)
        .filter(|n| *n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}
