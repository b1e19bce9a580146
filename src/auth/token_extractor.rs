//! # Bearer令牌提取器
//!
//! 从 `Authorization` 请求头中解析Bearer令牌。方案前缀大小写不敏感，
//! 令牌值本身逐字节保留。任何畸形头（错误方案、空令牌、缺少空格）
//! 与"没有令牌"等价处理，结果空间只有三种认证结局。

/// Bearer认证方案前缀（含分隔空格）
const BEARER_PREFIX: &str = "Bearer ";

/// 从 `Authorization` 头值中提取Bearer令牌
///
/// - 头缺失（`None`）→ `None`
/// - `Bearer <token>`（方案大小写不敏感，token非空）→ `Some(token)`
/// - 其它任何形式 → `None`（与缺失等价）
///
/// 无副作用；令牌值不做任何大小写折叠或修剪。
#[must_use]
pub fn extract_bearer_token(header_value: Option<&str>) -> Option<&str> {
    let value = header_value?;

    // get 避免在非字符边界上切分时panic（头值可能是任意字节）
    let scheme = value.get(..BEARER_PREFIX.len())?;
    let token = value.get(BEARER_PREFIX.len()..)?;

    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }

    if token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_standard_bearer() {
        assert_eq!(
            extract_bearer_token(Some("Bearer correct-credentials")),
            Some("correct-credentials")
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(extract_bearer_token(Some("bearer abc")), Some("abc"));
        assert_eq!(extract_bearer_token(Some("BEARER abc")), Some("abc"));
        assert_eq!(extract_bearer_token(Some("BeArEr abc")), Some("abc"));
    }

    #[test]
    fn test_token_value_is_preserved_byte_exact() {
        // 令牌值本身不做大小写折叠
        assert_eq!(extract_bearer_token(Some("Bearer AbC")), Some("AbC"));
        // 尾随空白属于令牌值的一部分
        assert_eq!(extract_bearer_token(Some("Bearer abc ")), Some("abc "));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer_token(None), None);
    }

    #[test]
    fn test_wrong_scheme_treated_as_missing() {
        assert_eq!(extract_bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer_token(Some("Token abc")), None);
    }

    #[test]
    fn test_empty_token_treated_as_missing() {
        assert_eq!(extract_bearer_token(Some("Bearer ")), None);
        assert_eq!(extract_bearer_token(Some("Bearer")), None);
    }

    #[test]
    fn test_missing_separator_treated_as_missing() {
        assert_eq!(extract_bearer_token(Some("Bearerabc")), None);
        assert_eq!(extract_bearer_token(Some("")), None);
    }
}
