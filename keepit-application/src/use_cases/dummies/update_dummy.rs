use super::{
    DummyServices, FIELD_NAME, ensure_valid, id_rules, name_is_available, name_rules, not_found,
    parse_id,
};
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::config::ValidationConfig;
use crate::context::AppContext;
use crate::dto::DummyDto;
use crate::error::AppError;
use crate::validation::{
    MUST_BE_UNIQUE, RuleChain, ValidationFailure, ValidationResult, Validator,
};
use async_trait::async_trait;
use keepit_domain::DummyId;
use keepit_domain::clock::Clock;
use keepit_domain::error::DomainResult;
use keepit_domain::persist::{DummyRepository, UnitOfWorkFactory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDummy {
    pub id: String,
    pub name: String,
}

impl UpdateDummy {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Command for UpdateDummy {
    const NAME: &'static str = "UpdateDummy";
    type Output = DummyDto;
}

/// 标识与名称分别校验；两者都通过时才检查名称唯一性（允许与自身同名）
#[derive(Debug)]
pub struct UpdateDummyValidator {
    id: RuleChain<str>,
    name: RuleChain<str>,
}

impl UpdateDummyValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            id: id_rules(),
            name: name_rules(config),
        }
    }
}

#[async_trait]
impl Validator<UpdateDummy> for UpdateDummyValidator {
    async fn validate(
        &self,
        request: &UpdateDummy,
        dummies: &dyn DummyRepository,
        cancel: &CancellationToken,
    ) -> DomainResult<ValidationResult> {
        let mut result = ValidationResult::default();
        let id_ok = self.id.apply(&request.id, &mut result);
        let name_ok = self.name.apply(&request.name, &mut result);
        if !(id_ok && name_ok) {
            return Ok(result);
        }

        let owner = request.id.trim().parse::<DummyId>().ok();
        if !name_is_available(dummies, &request.name, owner, cancel).await? {
            result.push(ValidationFailure::new(FIELD_NAME, MUST_BE_UNIQUE));
        }
        Ok(result)
    }
}

pub struct UpdateDummyHandler {
    units: Arc<dyn UnitOfWorkFactory>,
    clock: Arc<dyn Clock>,
    validator: UpdateDummyValidator,
}

impl UpdateDummyHandler {
    pub fn new(services: &DummyServices) -> Self {
        Self {
            units: services.units.clone(),
            clock: services.clock.clone(),
            validator: UpdateDummyValidator::new(&services.config),
        }
    }
}

#[async_trait]
impl CommandHandler<UpdateDummy> for UpdateDummyHandler {
    async fn handle(&self, ctx: &AppContext, cmd: UpdateDummy) -> Result<DummyDto, AppError> {
        tracing::debug!(id = %cmd.id, name = %cmd.name, "updating dummy");
        let uow = self.units.begin();

        let result = self
            .validator
            .validate(&cmd, uow.dummies(), &ctx.cancel)
            .await?;
        ensure_valid(UpdateDummy::NAME, result)?;

        let id = parse_id(&cmd.id)?;
        let mut dummy = uow
            .dummies()
            .get_by_id(id, &ctx.cancel)
            .await?
            .ok_or_else(|| not_found(&cmd.id))?;

        dummy.rename(cmd.name, self.clock.as_ref());
        uow.dummies().update(&dummy).await?;
        uow.save_changes(&ctx.cancel).await?;

        tracing::info!(%id, "dummy updated");
        Ok(dummy.into())
    }
}
