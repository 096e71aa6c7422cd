use super::{DummyIdValidator, DummyServices, ensure_valid, not_found, parse_id};
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::validation::{ValidationResult, Validator};
use async_trait::async_trait;
use keepit_domain::error::DomainResult;
use keepit_domain::persist::{DummyRepository, UnitOfWorkFactory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDummyById {
    pub id: String,
}

impl DeleteDummyById {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for DeleteDummyById {
    const NAME: &'static str = "DeleteDummyById";
    type Output = ();
}

#[async_trait]
impl Validator<DeleteDummyById> for DummyIdValidator {
    async fn validate(
        &self,
        request: &DeleteDummyById,
        _dummies: &dyn DummyRepository,
        _cancel: &CancellationToken,
    ) -> DomainResult<ValidationResult> {
        Ok(self.check(&request.id))
    }
}

pub struct DeleteDummyByIdHandler {
    units: Arc<dyn UnitOfWorkFactory>,
    validator: DummyIdValidator,
}

impl DeleteDummyByIdHandler {
    pub fn new(services: &DummyServices) -> Self {
        Self {
            units: services.units.clone(),
            validator: DummyIdValidator::default(),
        }
    }
}

#[async_trait]
impl CommandHandler<DeleteDummyById> for DeleteDummyByIdHandler {
    async fn handle(&self, ctx: &AppContext, cmd: DeleteDummyById) -> Result<(), AppError> {
        tracing::debug!(id = %cmd.id, "deleting dummy");
        let uow = self.units.begin();

        let result = self
            .validator
            .validate(&cmd, uow.dummies(), &ctx.cancel)
            .await?;
        ensure_valid(DeleteDummyById::NAME, result)?;

        let id = parse_id(&cmd.id)?;
        let dummy = uow
            .dummies()
            .get_by_id(id, &ctx.cancel)
            .await?
            .ok_or_else(|| not_found(&cmd.id))?;

        uow.dummies().delete(&dummy).await?;
        uow.save_changes(&ctx.cancel).await?;

        tracing::info!(%id, "dummy deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use keepit_domain::clock::SystemClock;
    use keepit_domain::persist::InMemoryStore;
    use keepit_domain::{Dummy, DummyId};

    #[tokio::test]
    async fn deletes_existing_record() {
        let store = InMemoryStore::new();
        let id = DummyId::generate();
        store
            .seed([Dummy::restore(id, "doomed", Utc::now(), Utc::now())])
            .await;
        let services = DummyServices::builder()
            .units(Arc::new(store.clone()))
            .clock(Arc::new(SystemClock))
            .build();

        DeleteDummyByIdHandler::new(&services)
            .handle(&AppContext::default(), DeleteDummyById::new(id.to_string()))
            .await
            .unwrap();

        assert!(store.is_empty().await);
    }
}
