//! 持久化契约（persist）
//!
//! - `DummyRepository`：按条件查询、按标识查询，以及向变更集登记新增/修改/删除；
//! - `UnitOfWork`：持有一次请求的变更集，`save_changes` 以原子方式提交；
//! - `UnitOfWorkFactory`：为每个请求开启独立的工作单元。
//!
//! 读取与提交都接收取消令牌；登记变更只修改内存中的变更集，不做 I/O。
//! 具体存储后端由上层提供实现并注入，`inmemory` 特性提供一个进程内实现。
//!
#[cfg(feature = "inmemory")]
mod inmemory;

#[cfg(feature = "inmemory")]
pub use inmemory::{InMemoryStore, InMemoryUnitOfWork};

use crate::dummy::{Dummy, DummyId};
use crate::error::DomainResult;
use crate::filter::DummyFilter;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait DummyRepository: Send + Sync {
    /// 按过滤条件读取已提交的记录；条件全部未设置时返回全集
    async fn get(
        &self,
        filter: &DummyFilter,
        cancel: &CancellationToken,
    ) -> DomainResult<Vec<Dummy>>;

    /// 按标识读取；不存在时返回 `None`
    async fn get_by_id(
        &self,
        id: DummyId,
        cancel: &CancellationToken,
    ) -> DomainResult<Option<Dummy>>;

    /// 登记新增；标识未分配时由仓储分配，返回带标识的实体
    ///
    /// 需要调用 [`UnitOfWork::save_changes`] 才会持久化。
    async fn create(&self, dummy: Dummy) -> DomainResult<Dummy>;

    /// 登记修改；需要调用 [`UnitOfWork::save_changes`] 才会持久化
    async fn update(&self, dummy: &Dummy) -> DomainResult<()>;

    /// 登记删除；需要调用 [`UnitOfWork::save_changes`] 才会持久化
    async fn delete(&self, dummy: &Dummy) -> DomainResult<()>;
}

#[async_trait]
impl<T> DummyRepository for Arc<T>
where
    T: DummyRepository + ?Sized,
{
    async fn get(
        &self,
        filter: &DummyFilter,
        cancel: &CancellationToken,
    ) -> DomainResult<Vec<Dummy>> {
        (**self).get(filter, cancel).await
    }

    async fn get_by_id(
        &self,
        id: DummyId,
        cancel: &CancellationToken,
    ) -> DomainResult<Option<Dummy>> {
        (**self).get_by_id(id, cancel).await
    }

    async fn create(&self, dummy: Dummy) -> DomainResult<Dummy> {
        (**self).create(dummy).await
    }

    async fn update(&self, dummy: &Dummy) -> DomainResult<()> {
        (**self).update(dummy).await
    }

    async fn delete(&self, dummy: &Dummy) -> DomainResult<()> {
        (**self).delete(dummy).await
    }
}

/// 工作单元：一次请求内的仓储访问与原子提交
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn dummies(&self) -> &dyn DummyRepository;

    /// 原子提交变更集；失败时存储保持不变
    async fn save_changes(&self, cancel: &CancellationToken) -> DomainResult<()>;
}

/// 为每个请求开启独立的工作单元
pub trait UnitOfWorkFactory: Send + Sync {
    fn begin(&self) -> Box<dyn UnitOfWork>;
}

impl<T> UnitOfWorkFactory for Arc<T>
where
    T: UnitOfWorkFactory + ?Sized,
{
    fn begin(&self) -> Box<dyn UnitOfWork> {
        (**self).begin()
    }
}
