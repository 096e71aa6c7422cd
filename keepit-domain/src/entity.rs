//! 实体（Entity）基础抽象
//!
//! 为实体提供统一的标识（Id）与审计时间戳能力。
//!
use chrono::{DateTime, Utc};
use std::{fmt::Display, hash::Hash, str::FromStr};

/// 具备唯一标识的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示、可比较
    type Id: FromStr + Clone + Display + Eq + Hash;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;
}

/// 带审计时间戳的实体
///
/// 约束：`modified_at() >= created_at()`，`created_at` 只写一次。
pub trait Audited {
    fn created_at(&self) -> DateTime<Utc>;

    fn modified_at(&self) -> DateTime<Utc>;
}
