use chrono::{DateTime, Utc};
use keepit_domain::entity::{Audited, Entity};
use keepit_domain::{Dummy, DummyId};
use serde::{Deserialize, Serialize};

/// 数据传输对象（DTO）
///
/// - 作为应用层的输出载体，面向接口/外部系统序列化友好；
/// - 与领域模型解耦，避免将领域对象直接暴露到接口层；
/// - 应保持只读特性与简洁结构，适配不同用例的返回需求。
pub trait Dto: Serialize + Send + Sync + 'static {}

impl<T: Dto> Dto for Vec<T> {}

/// Dummy 的读模型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DummyDto {
    pub id: DummyId,
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Dto for DummyDto {}

impl From<&Dummy> for DummyDto {
    fn from(dummy: &Dummy) -> Self {
        Self {
            id: *dummy.id(),
            name: dummy.name().to_string(),
            created: dummy.created_at(),
            modified: dummy.modified_at(),
        }
    }
}

impl From<Dummy> for DummyDto {
    fn from(dummy: Dummy) -> Self {
        Self::from(&dummy)
    }
}
