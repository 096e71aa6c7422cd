use super::{DummyServices, FIELD_NAME, ensure_valid, name_is_available, name_rules};
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
use keepit_domain::Dummy;
use keepit_domain::clock::Clock;
use keepit_domain::entity::Entity;
use keepit_domain::error::DomainResult;
use keepit_domain::persist::{DummyRepository, UnitOfWorkFactory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDummy {
    pub name: String,
}

impl CreateDummy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Command for CreateDummy {
    const NAME: &'static str = "CreateDummy";
    type Output = DummyDto;
}

#[derive(Debug)]
pub struct CreateDummyValidator {
    name: RuleChain<str>,
}

impl CreateDummyValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            name: name_rules(config),
        }
    }
}

#[async_trait]
impl Validator<CreateDummy> for CreateDummyValidator {
    async fn validate(
        &self,
        request: &CreateDummy,
        dummies: &dyn DummyRepository,
        cancel: &CancellationToken,
    ) -> DomainResult<ValidationResult> {
        let mut result = ValidationResult::default();
        if self.name.apply(&request.name, &mut result)
            && !name_is_available(dummies, &request.name, None, cancel).await?
        {
            result.push(ValidationFailure::new(FIELD_NAME, MUST_BE_UNIQUE));
        }
        Ok(result)
    }
}

pub struct CreateDummyHandler {
    units: Arc<dyn UnitOfWorkFactory>,
    clock: Arc<dyn Clock>,
    validator: CreateDummyValidator,
}

impl CreateDummyHandler {
    pub fn new(services: &DummyServices) -> Self {
        Self {
            units: services.units.clone(),
            clock: services.clock.clone(),
            validator: CreateDummyValidator::new(&services.config),
        }
    }
}

#[async_trait]
impl CommandHandler<CreateDummy> for CreateDummyHandler {
    async fn handle(&self, ctx: &AppContext, cmd: CreateDummy) -> Result<DummyDto, AppError> {
        tracing::debug!(name = %cmd.name, "creating dummy");
        let uow = self.units.begin();

        let result = self
            .validator
            .validate(&cmd, uow.dummies(), &ctx.cancel)
            .await?;
        ensure_valid(CreateDummy::NAME, result)?;

        let dummy = uow
            .dummies()
            .create(Dummy::new(cmd.name, self.clock.as_ref()))
            .await?;
        uow.save_changes(&ctx.cancel).await?;

        tracing::info!(id = %dummy.id(), "dummy created");
        Ok(dummy.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::MUST_NOT_BE_EMPTY;
    use chrono::{TimeZone, Utc};
    use keepit_domain::clock::FixedClock;
    use keepit_domain::persist::InMemoryStore;

    fn services(store: &InMemoryStore) -> DummyServices {
        let now = Utc.with_ymd_and_hms(2024, 9, 3, 12, 8, 51).unwrap();
        DummyServices::builder()
            .units(Arc::new(store.clone()))
            .clock(Arc::new(FixedClock::new(now)))
            .build()
    }

    #[tokio::test]
    async fn creates_and_commits() {
        let store = InMemoryStore::new();
        let handler = CreateDummyHandler::new(&services(&store));

        let dto = handler
            .handle(&AppContext::default(), CreateDummy::new("dummy name"))
            .await
            .unwrap();

        assert_eq!(dto.name, "dummy name");
        assert_eq!(dto.created, dto.modified);
        assert!(!dto.id.is_nil());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn empty_name_is_rejected_without_query() {
        let store = InMemoryStore::new();
        let handler = CreateDummyHandler::new(&services(&store));

        let err = handler
            .handle(&AppContext::default(), CreateDummy::new(""))
            .await
            .unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.fields(), vec![FIELD_NAME]);
        assert_eq!(
            errors.messages_for(FIELD_NAME).collect::<Vec<_>>(),
            vec![MUST_NOT_BE_EMPTY]
        );
        assert_eq!(store.read_count(), 0);
        assert!(store.is_empty().await);
    }
}
