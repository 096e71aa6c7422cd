//! Dummy 查询过滤
//!
//! 五个可选条件以 AND 组合；未设置的条件不产生任何谓词。
//! - `name`：精确匹配
//! - `created_from` / `modified_from`：下界，包含
//! - `created_to` / `modified_to`：上界，不包含
//!
use crate::dummy::Dummy;
use crate::entity::Audited;
use crate::specification::{Specification, all_of};
use bon::Builder;
use chrono::{DateTime, Utc};
use keepit_macros::value_object;

#[value_object]
#[derive(Builder)]
pub struct DummyFilter {
    #[builder(into)]
    pub name: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub modified_from: Option<DateTime<Utc>>,
    pub modified_to: Option<DateTime<Utc>>,
}

impl DummyFilter {
    /// 仅按名称精确匹配（唯一性校验使用）
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self == &Self::default()
    }

    /// 将已设置的条件组合为一个规约；全部未设置时返回 `None`
    pub fn specification(&self) -> Option<Box<dyn Specification<Dummy>>> {
        let mut specs: Vec<Box<dyn Specification<Dummy>>> = Vec::new();
        if let Some(name) = &self.name {
            specs.push(Box::new(NameEquals(name.clone())));
        }
        if let Some(value) = self.created_from {
            specs.push(Box::new(CreatedFrom(value)));
        }
        if let Some(value) = self.created_to {
            specs.push(Box::new(CreatedBefore(value)));
        }
        if let Some(value) = self.modified_from {
            specs.push(Box::new(ModifiedFrom(value)));
        }
        if let Some(value) = self.modified_to {
            specs.push(Box::new(ModifiedBefore(value)));
        }
        all_of(specs)
    }

    /// 对集合应用过滤；无条件时原样返回输入
    pub fn apply(&self, items: Vec<Dummy>) -> Vec<Dummy> {
        match self.specification() {
            None => items,
            Some(spec) => items
                .into_iter()
                .filter(|item| spec.is_satisfied_by(item))
                .collect(),
        }
    }
}

fn retain<S>(items: Vec<Dummy>, spec: Option<S>) -> Vec<Dummy>
where
    S: Specification<Dummy>,
{
    match spec {
        None => items,
        Some(spec) => items
            .into_iter()
            .filter(|item| spec.is_satisfied_by(item))
            .collect(),
    }
}

/// 单条件过滤；`value` 为 `None` 时原样返回
pub fn apply_name(items: Vec<Dummy>, value: Option<&str>) -> Vec<Dummy> {
    retain(items, value.map(|name| NameEquals(name.to_string())))
}

pub fn apply_created_from(items: Vec<Dummy>, value: Option<DateTime<Utc>>) -> Vec<Dummy> {
    retain(items, value.map(CreatedFrom))
}

pub fn apply_created_to(items: Vec<Dummy>, value: Option<DateTime<Utc>>) -> Vec<Dummy> {
    retain(items, value.map(CreatedBefore))
}

pub fn apply_modified_from(items: Vec<Dummy>, value: Option<DateTime<Utc>>) -> Vec<Dummy> {
    retain(items, value.map(ModifiedFrom))
}

pub fn apply_modified_to(items: Vec<Dummy>, value: Option<DateTime<Utc>>) -> Vec<Dummy> {
    retain(items, value.map(ModifiedBefore))
}

/// 名称精确匹配（区分大小写）
pub struct NameEquals(pub String);

impl Specification<Dummy> for NameEquals {
    fn is_satisfied_by(&self, candidate: &Dummy) -> bool {
        candidate.name() == self.0
    }
}

/// 创建时间 >= 下界
pub struct CreatedFrom(pub DateTime<Utc>);

impl<T: Audited> Specification<T> for CreatedFrom {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        candidate.created_at() >= self.0
    }
}

/// 创建时间 < 上界
pub struct CreatedBefore(pub DateTime<Utc>);

impl<T: Audited> Specification<T> for CreatedBefore {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        candidate.created_at() < self.0
    }
}

/// 修改时间 >= 下界
pub struct ModifiedFrom(pub DateTime<Utc>);

impl<T: Audited> Specification<T> for ModifiedFrom {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        candidate.modified_at() >= self.0
    }
}

/// 修改时间 < 上界
pub struct ModifiedBefore(pub DateTime<Utc>);

impl<T: Audited> Specification<T> for ModifiedBefore {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        candidate.modified_at() < self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::DummyId;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }

    // 第 i 条（1 起）：创建于 2020-01-01 + (i-1) 天，修改于其一年后
    fn fixture(count: u32) -> Vec<Dummy> {
        (1..=count)
            .map(|i| {
                let created = base() + Duration::days(i64::from(i) - 1);
                let modified = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()
                    + Duration::days(i64::from(i) - 1);
                Dummy::restore(
                    DummyId::new(Uuid::from_u128(u128::from(i))),
                    format!("test-dummy-{i:03}"),
                    created,
                    modified,
                )
            })
            .collect()
    }

    #[test]
    fn unfiltered_returns_same_collection() {
        let items = fixture(10);
        let ptr = items.as_ptr();
        let filter = DummyFilter::default();

        assert!(filter.is_unfiltered());
        assert!(filter.specification().is_none());

        let out = filter.apply(items);
        assert_eq!(out.len(), 10);
        assert_eq!(out.as_ptr(), ptr);
    }

    #[test]
    fn name_is_exact_match() {
        let out = DummyFilter::by_name("test-dummy-006").apply(fixture(10));
        assert_eq!(out.len(), 1);
        assert!(out.iter().all(|d| d.name() == "test-dummy-006"));

        let out = DummyFilter::by_name("TEST-DUMMY-006").apply(fixture(10));
        assert!(out.is_empty());
    }

    #[test]
    fn created_from_is_inclusive() {
        let value = Utc.with_ymd_and_hms(2020, 1, 5, 0, 0, 0).unwrap();
        let out = DummyFilter::builder()
            .created_from(value)
            .build()
            .apply(fixture(10));
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|d| d.created_at() >= value));
    }

    #[test]
    fn created_to_is_exclusive() {
        let value = Utc.with_ymd_and_hms(2020, 1, 5, 0, 0, 0).unwrap();
        let out = DummyFilter::builder()
            .created_to(value)
            .build()
            .apply(fixture(10));
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|d| d.created_at() < value));
    }

    #[test]
    fn modified_from_is_inclusive() {
        let value = Utc.with_ymd_and_hms(2021, 1, 5, 0, 0, 0).unwrap();
        let out = DummyFilter::builder()
            .modified_from(value)
            .build()
            .apply(fixture(10));
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|d| d.modified_at() >= value));
    }

    #[test]
    fn modified_to_is_exclusive() {
        let value = Utc.with_ymd_and_hms(2021, 1, 5, 0, 0, 0).unwrap();
        let out = DummyFilter::builder()
            .modified_to(value)
            .build()
            .apply(fixture(10));
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|d| d.modified_at() < value));
    }

    #[test]
    fn single_criterion_helpers_pass_through_on_none() {
        let items = fixture(10);
        let ptr = items.as_ptr();
        let items = apply_name(items, None);
        let items = apply_created_from(items, None);
        let items = apply_created_to(items, None);
        let items = apply_modified_from(items, None);
        let items = apply_modified_to(items, None);
        assert_eq!(items.as_ptr(), ptr);
        assert_eq!(items.len(), 10);

        let bound = Utc.with_ymd_and_hms(2021, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(apply_modified_to(fixture(10), Some(bound)).len(), 4);
        assert_eq!(apply_name(fixture(10), Some("test-dummy-010")).len(), 1);
    }

    #[test]
    fn filters_combine_with_and() {
        let out = DummyFilter::builder()
            .created_from(Utc.with_ymd_and_hms(2020, 1, 3, 0, 0, 0).unwrap())
            .created_to(Utc.with_ymd_and_hms(2020, 1, 8, 0, 0, 0).unwrap())
            .modified_from(Utc.with_ymd_and_hms(2021, 1, 4, 0, 0, 0).unwrap())
            .build()
            .apply(fixture(10));
        let names: Vec<_> = out.iter().map(|d| d.name().to_string()).collect();
        assert_eq!(
            names,
            vec!["test-dummy-004", "test-dummy-005", "test-dummy-006", "test-dummy-007"]
        );
    }
}
