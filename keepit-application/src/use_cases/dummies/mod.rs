//! Dummy 用例
//!
//! 每个用例一个模块：请求类型、校验器、处理器。处理器为每次请求开启独立的工作单元，
//! 顺序固定为：校验 → 解析标识 → 读取（不存在则 `NotFound`）→ 修改 → 提交。
//!
mod create_dummy;
mod delete_dummy;
mod get_dummies;
mod get_dummy_by_id;
mod update_dummy;

pub use create_dummy::{CreateDummy, CreateDummyHandler, CreateDummyValidator};
pub use delete_dummy::{DeleteDummyById, DeleteDummyByIdHandler};
pub use get_dummies::{GetDummies, GetDummiesHandler};
pub use get_dummy_by_id::{GetDummyById, GetDummyByIdHandler};
pub use update_dummy::{UpdateDummy, UpdateDummyHandler, UpdateDummyValidator};

use crate::config::ValidationConfig;
use crate::error::AppError;
use crate::validation::{RuleChain, ValidationResult, rules};
use crate::{InMemoryCommandBus, InMemoryQueryBus};
use bon::Builder;
use keepit_domain::clock::Clock;
use keepit_domain::entity::Entity;
use keepit_domain::error::{DomainError, DomainResult};
use keepit_domain::persist::{DummyRepository, UnitOfWorkFactory};
use keepit_domain::{DummyFilter, DummyId};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// `NotFound` 中的资源类型名
pub const DUMMY_KIND: &str = "Dummy";

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";

/// 用例处理器共享的协作者
#[derive(Builder, Clone)]
pub struct DummyServices {
    units: Arc<dyn UnitOfWorkFactory>,
    clock: Arc<dyn Clock>,
    #[builder(default)]
    config: ValidationConfig,
}

impl DummyServices {
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

/// 将五个 Dummy 用例注册到总线
pub fn register_dummy_handlers(
    services: &DummyServices,
    commands: &InMemoryCommandBus,
    queries: &InMemoryQueryBus,
) -> Result<(), AppError> {
    commands.register::<CreateDummy, _>(Arc::new(CreateDummyHandler::new(services)))?;
    commands.register::<UpdateDummy, _>(Arc::new(UpdateDummyHandler::new(services)))?;
    commands.register::<DeleteDummyById, _>(Arc::new(DeleteDummyByIdHandler::new(services)))?;
    queries.register::<GetDummyById, _>(Arc::new(GetDummyByIdHandler::new(services)))?;
    queries.register::<GetDummies, _>(Arc::new(GetDummiesHandler::new(services)))?;
    tracing::debug!(
        commands = ?commands.registered_commands(),
        queries = ?queries.registered_queries(),
        "dummy handlers registered"
    );
    Ok(())
}

fn name_rules(config: &ValidationConfig) -> RuleChain<str> {
    RuleChain::new(FIELD_NAME)
        .rule(rules::not_empty())
        .rule(rules::max_length(config.max_name_length))
}

fn id_rules() -> RuleChain<str> {
    RuleChain::new(FIELD_ID)
        .rule(rules::not_empty())
        .rule(rules::parses_as::<DummyId>())
}

/// 标识校验器（按标识读取、删除共用）
#[derive(Debug)]
pub struct DummyIdValidator {
    id: RuleChain<str>,
}

impl Default for DummyIdValidator {
    fn default() -> Self {
        Self { id: id_rules() }
    }
}

impl DummyIdValidator {
    fn check(&self, raw: &str) -> ValidationResult {
        let mut result = ValidationResult::default();
        self.id.apply(raw, &mut result);
        result
    }
}

/// 名称是否可用：没有同名记录，或同名记录全部是 `owner` 自己
async fn name_is_available(
    dummies: &dyn DummyRepository,
    name: &str,
    owner: Option<DummyId>,
    cancel: &CancellationToken,
) -> DomainResult<bool> {
    let duplicates = dummies.get(&DummyFilter::by_name(name), cancel).await?;
    Ok(duplicates
        .iter()
        .all(|dummy| Some(*dummy.id()) == owner))
}

fn ensure_valid(request: &'static str, result: ValidationResult) -> Result<(), AppError> {
    result.into_result().map_err(|errors| {
        tracing::warn!(request, %errors, "request rejected");
        AppError::Validation(errors)
    })
}

// 校验通过后解析不会失败；仍按解析错误返回而不是 panic
fn parse_id(raw: &str) -> Result<DummyId, AppError> {
    raw.trim()
        .parse::<DummyId>()
        .map_err(|err| AppError::from(DomainError::from(err)))
}

fn not_found(raw: &str) -> AppError {
    tracing::warn!(id = raw, "dummy not found");
    AppError::not_found(DUMMY_KIND, raw)
}
