#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use keepit_application::context::AppContext;
use keepit_application::use_cases::dummies::{DummyServices, register_dummy_handlers};
use keepit_application::{InMemoryCommandBus, InMemoryQueryBus};
use keepit_domain::clock::FixedClock;
use keepit_domain::persist::InMemoryStore;
use keepit_domain::{Dummy, DummyId};
use std::sync::Arc;
use uuid::Uuid;

pub struct Harness {
    pub store: InMemoryStore,
    pub clock: Arc<FixedClock>,
    pub commands: InMemoryCommandBus,
    pub queries: InMemoryQueryBus,
}

impl Harness {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 9, 3, 12, 8, 51).unwrap(),
        ));
        let services = DummyServices::builder()
            .units(Arc::new(store.clone()))
            .clock(clock.clone())
            .build();
        let commands = InMemoryCommandBus::new();
        let queries = InMemoryQueryBus::new();
        register_dummy_handlers(&services, &commands, &queries).unwrap();
        Self {
            store,
            clock,
            commands,
            queries,
        }
    }

    /// 十条记录：第 i 条创建于 2020-01-01 + (i-1) 天，修改于 2021-01-01 + (i-1) 天
    pub async fn with_fixture() -> Self {
        let harness = Self::new();
        harness.store.seed((1..=10u32).map(fixture_record)).await;
        harness
    }

    pub fn ctx(&self) -> AppContext {
        AppContext::correlated("test")
    }
}

pub fn fixture_id(i: u32) -> DummyId {
    DummyId::new(Uuid::from_u128(u128::from(i)))
}

pub fn fixture_record(i: u32) -> Dummy {
    let offset = Duration::days(i64::from(i) - 1);
    Dummy::restore(
        fixture_id(i),
        format!("test-dummy-{i:03}"),
        day(2020) + offset,
        day(2021) + offset,
    )
}

pub fn day(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
}
