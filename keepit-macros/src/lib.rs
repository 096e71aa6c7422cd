//! keepit 过程宏
//!
//! - `#[entity_id]`：为单字段 tuple struct 生成强类型实体标识（Display/FromStr/From 等）
//! - `#[value_object]`：为值对象合并追加常用派生
//!
//! 两个宏都接受 `debug = true|false` 参数，用于控制是否自动派生 `Debug`。
//!
use proc_macro::TokenStream;

mod entity_id;
mod utils;
mod value_object;

/// 实体 ID 宏
///
/// 用于 `struct DummyId(Uuid);` 这类包装类型：
/// - 合并派生 Default, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash
/// - 以 `#[serde(transparent)]` 序列化为内部值
/// - 生成 `new`、`Display`、`FromStr`（委托内部类型解析）、`AsRef` 与双向 `From`
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
///
/// 支持结构体（具名或 tuple）与枚举，合并派生
/// Default, Clone, (Debug), Serialize, Deserialize, PartialEq, Eq。
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
