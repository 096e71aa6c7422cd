use bon::Builder;
use serde::{Deserialize, Serialize};

/// 名称长度上限的默认值（按字符计）
pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;

/// 校验配置
///
/// 可通过 builder 构造，也可从配置源反序列化；缺省字段取默认值。
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    #[builder(default = DEFAULT_MAX_NAME_LENGTH)]
    pub max_name_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}
