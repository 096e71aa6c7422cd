//! Dummy 实体
//!
//! 演示资源：名称 + 创建/修改时间。名称的校验（非空、长度、唯一性）
//! 不在实体内进行，而由应用层校验管线完成。
//!
use crate::clock::Clock;
use crate::entity::{Audited, Entity};
use chrono::{DateTime, Utc};
use keepit_macros::entity_id;
use uuid::Uuid;

/// Dummy 的唯一标识
#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct DummyId(Uuid);

impl DummyId {
    /// 生成新的随机标识
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// 是否尚未分配（nil）
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dummy {
    id: DummyId,
    name: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl Dummy {
    /// 由候选名称创建实体
    ///
    /// 创建与修改时间均取 `clock.now()`；标识保持未分配，由持久化层或调用方指定。
    pub fn new(name: impl Into<String>, clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            id: DummyId::default(),
            name: name.into(),
            created_at: now,
            modified_at: now,
        }
    }

    /// 从存储中的各部分重建实体，不读取时钟，也不做任何校验
    pub fn restore(
        id: DummyId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
            modified_at,
        }
    }

    /// 为尚未分配标识的实体指定标识；已有标识时保持不变
    pub fn with_id(mut self, id: DummyId) -> Self {
        if self.id.is_nil() {
            self.id = id;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 重命名，并将修改时间推进到 `clock.now()`
    ///
    /// 即使新旧名称相同也会刷新修改时间。修改时间不会早于创建时间。
    pub fn rename(&mut self, name: impl Into<String>, clock: &dyn Clock) {
        self.modified_at = clock.now().max(self.created_at);
        self.name = name.into();
    }
}

impl Entity for Dummy {
    type Id = DummyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Audited for Dummy {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}
