use super::{DummyIdValidator, DummyServices, ensure_valid, not_found, parse_id};
use crate::context::AppContext;
use crate::dto::DummyDto;
use crate::error::AppError;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use crate::validation::{ValidationResult, Validator};
use async_trait::async_trait;
use keepit_domain::error::DomainResult;
use keepit_domain::persist::{DummyRepository, UnitOfWorkFactory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDummyById {
    pub id: String,
}

impl GetDummyById {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Query for GetDummyById {
    const NAME: &'static str = "GetDummyById";
    type Dto = DummyDto;
}

#[async_trait]
impl Validator<GetDummyById> for DummyIdValidator {
    async fn validate(
        &self,
        request: &GetDummyById,
        _dummies: &dyn DummyRepository,
        _cancel: &CancellationToken,
    ) -> DomainResult<ValidationResult> {
        Ok(self.check(&request.id))
    }
}

pub struct GetDummyByIdHandler {
    units: Arc<dyn UnitOfWorkFactory>,
    validator: DummyIdValidator,
}

impl GetDummyByIdHandler {
    pub fn new(services: &DummyServices) -> Self {
        Self {
            units: services.units.clone(),
            validator: DummyIdValidator::default(),
        }
    }
}

#[async_trait]
impl QueryHandler<GetDummyById> for GetDummyByIdHandler {
    async fn handle(&self, ctx: &AppContext, q: GetDummyById) -> Result<DummyDto, AppError> {
        tracing::debug!(id = %q.id, "fetching dummy");
        let uow = self.units.begin();

        let result = self
            .validator
            .validate(&q, uow.dummies(), &ctx.cancel)
            .await?;
        ensure_valid(GetDummyById::NAME, result)?;

        let id = parse_id(&q.id)?;
        uow.dummies()
            .get_by_id(id, &ctx.cancel)
            .await?
            .map(DummyDto::from)
            .ok_or_else(|| not_found(&q.id))
    }
}
