//! 结构规则（不做 I/O）
use std::str::FromStr;

pub const MUST_NOT_BE_EMPTY: &str = "Must not be empty";
pub const MUST_BE_UNIQUE: &str = "Must be unique";
pub const MUST_BE_VALID_IDENTIFIER: &str = "Must be a valid identifier";

pub fn too_long(max: usize) -> String {
    format!("Must be fewer than {max} characters in length")
}

/// 非空；仅含空白字符同样视为空
pub fn not_empty() -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    |value: &str| {
        if value.trim().is_empty() {
            Err(MUST_NOT_BE_EMPTY.to_string())
        } else {
            Ok(())
        }
    }
}

/// 长度不超过 `max`（按字符计）
pub fn max_length(max: usize) -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    move |value: &str| {
        if value.chars().count() > max {
            Err(too_long(max))
        } else {
            Ok(())
        }
    }
}

/// 去除首尾空白后可解析为标识类型 `I`
pub fn parses_as<I>() -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static
where
    I: FromStr + 'static,
{
    |value: &str| {
        value
            .trim()
            .parse::<I>()
            .map(|_| ())
            .map_err(|_| MUST_BE_VALID_IDENTIFIER.to_string())
    }
}
