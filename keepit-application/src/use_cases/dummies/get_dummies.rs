use super::DummyServices;
use crate::context::AppContext;
use crate::dto::DummyDto;
use crate::error::AppError;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use async_trait::async_trait;
use keepit_domain::DummyFilter;
use keepit_domain::persist::UnitOfWorkFactory;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 按条件列出 Dummy；条件全部为空时返回全部记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDummies {
    #[serde(default)]
    pub filter: DummyFilter,
}

impl From<DummyFilter> for GetDummies {
    fn from(filter: DummyFilter) -> Self {
        Self { filter }
    }
}

impl Query for GetDummies {
    const NAME: &'static str = "GetDummies";
    type Dto = Vec<DummyDto>;
}

pub struct GetDummiesHandler {
    units: Arc<dyn UnitOfWorkFactory>,
}

impl GetDummiesHandler {
    pub fn new(services: &DummyServices) -> Self {
        Self {
            units: services.units.clone(),
        }
    }
}

#[async_trait]
impl QueryHandler<GetDummies> for GetDummiesHandler {
    async fn handle(&self, ctx: &AppContext, q: GetDummies) -> Result<Vec<DummyDto>, AppError> {
        let uow = self.units.begin();
        let dummies = uow.dummies().get(&q.filter, &ctx.cancel).await?;
        tracing::debug!(
            count = dummies.len(),
            unfiltered = q.filter.is_unfiltered(),
            "dummies listed"
        );
        Ok(dummies.into_iter().map(DummyDto::from).collect())
    }
}
