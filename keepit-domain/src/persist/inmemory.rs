//! 进程内存储（InMemoryStore）
//!
//! 已提交记录保存在共享的 `RwLock<HashMap>` 中；每个工作单元持有自己的变更集，
//! 提交时在一次写锁内先整体演算、再整体替换，任何一步失败都不会留下部分修改。
//!
use super::{DummyRepository, UnitOfWork, UnitOfWorkFactory};
use crate::dummy::{Dummy, DummyId};
use crate::entity::{Audited, Entity};
use crate::error::{DomainError, DomainResult};
use crate::filter::DummyFilter;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
enum Change {
    Add(Dummy),
    Update(Dummy),
    Remove(DummyId),
}

/// 共享的进程内存储，可克隆（共享同一份数据）
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    records: Arc<RwLock<HashMap<DummyId, Dummy>>>,
    available: Arc<AtomicBool>,
    reads: Arc<AtomicUsize>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入已提交记录（夹具/演示用），未分配标识的记录会被分配新标识
    pub async fn seed<I>(&self, records: I)
    where
        I: IntoIterator<Item = Dummy>,
    {
        let mut guard = self.records.write().await;
        for record in records {
            let record = assign_id(record);
            guard.insert(*record.id(), record);
        }
    }

    /// 模拟存储不可用：读取与提交都返回 `DomainError::Storage`
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// 已执行的读取次数（查询与按标识查询）
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// 已提交记录，按创建时间、标识排序
    pub async fn snapshot(&self) -> Vec<Dummy> {
        let guard = self.records.read().await;
        sorted(guard.values().cloned().collect())
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check(&self, cancel: &CancellationToken) -> DomainResult<()> {
        if cancel.is_cancelled() {
            return Err(DomainError::Cancelled);
        }
        if !self.available.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                reason: "in-memory store unavailable".to_string(),
            });
        }
        Ok(())
    }

    async fn commit(&self, changes: Vec<Change>, cancel: &CancellationToken) -> DomainResult<()> {
        self.check(cancel)?;
        if changes.is_empty() {
            return Ok(());
        }

        let mut guard = self.records.write().await;
        // 在副本上演算整个变更集，成功后一次性替换
        let mut staged = guard.clone();
        for change in changes {
            match change {
                Change::Add(dummy) => {
                    let id = *dummy.id();
                    if staged.insert(id, dummy).is_some() {
                        return Err(DomainError::Conflict {
                            reason: format!("dummy {id} already exists"),
                        });
                    }
                }
                Change::Update(dummy) => {
                    let id = *dummy.id();
                    match staged.get_mut(&id) {
                        Some(slot) => *slot = dummy,
                        None => {
                            return Err(DomainError::Conflict {
                                reason: format!("dummy {id} no longer exists"),
                            });
                        }
                    }
                }
                Change::Remove(id) => {
                    if staged.remove(&id).is_none() {
                        return Err(DomainError::Conflict {
                            reason: format!("dummy {id} no longer exists"),
                        });
                    }
                }
            }
        }
        *guard = staged;
        Ok(())
    }
}

impl UnitOfWorkFactory for InMemoryStore {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(InMemoryUnitOfWork::new(self.clone()))
    }
}

/// 单个请求的工作单元：读取走已提交数据，写入登记到本地变更集
#[derive(Debug)]
pub struct InMemoryUnitOfWork {
    store: InMemoryStore,
    changes: Mutex<Vec<Change>>,
}

impl InMemoryUnitOfWork {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            store,
            changes: Mutex::new(Vec::new()),
        }
    }

    /// 尚未提交的变更数量
    pub fn pending(&self) -> usize {
        self.lock_changes().len()
    }

    fn stage(&self, change: Change) {
        self.lock_changes().push(change);
    }

    fn lock_changes(&self) -> std::sync::MutexGuard<'_, Vec<Change>> {
        self.changes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DummyRepository for InMemoryUnitOfWork {
    async fn get(
        &self,
        filter: &DummyFilter,
        cancel: &CancellationToken,
    ) -> DomainResult<Vec<Dummy>> {
        self.store.check(cancel)?;
        self.store.reads.fetch_add(1, Ordering::SeqCst);
        let all = {
            let guard = self.store.records.read().await;
            sorted(guard.values().cloned().collect())
        };
        Ok(filter.apply(all))
    }

    async fn get_by_id(
        &self,
        id: DummyId,
        cancel: &CancellationToken,
    ) -> DomainResult<Option<Dummy>> {
        self.store.check(cancel)?;
        self.store.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.store.records.read().await.get(&id).cloned())
    }

    async fn create(&self, dummy: Dummy) -> DomainResult<Dummy> {
        let dummy = assign_id(dummy);
        self.stage(Change::Add(dummy.clone()));
        Ok(dummy)
    }

    async fn update(&self, dummy: &Dummy) -> DomainResult<()> {
        self.stage(Change::Update(dummy.clone()));
        Ok(())
    }

    async fn delete(&self, dummy: &Dummy) -> DomainResult<()> {
        self.stage(Change::Remove(*dummy.id()));
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn dummies(&self) -> &dyn DummyRepository {
        self
    }

    async fn save_changes(&self, cancel: &CancellationToken) -> DomainResult<()> {
        let changes = std::mem::take(&mut *self.lock_changes());
        let count = changes.len();
        match self.store.commit(changes.clone(), cancel).await {
            Ok(()) => {
                tracing::debug!(changes = count, "in-memory changes committed");
                Ok(())
            }
            Err(err) => {
                // 提交失败时变更集保持原样，调用方可决定是否丢弃工作单元
                let mut pending = self.lock_changes();
                let later = std::mem::replace(&mut *pending, changes);
                pending.extend(later);
                drop(pending);
                tracing::debug!(changes = count, error = %err, "in-memory commit rejected");
                Err(err)
            }
        }
    }
}

fn assign_id(dummy: Dummy) -> Dummy {
    if dummy.id().is_nil() {
        dummy.with_id(DummyId::generate())
    } else {
        dummy
    }
}

fn sorted(mut items: Vec<Dummy>) -> Vec<Dummy> {
    items.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
    items
}
