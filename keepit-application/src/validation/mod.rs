//! 请求校验管线
//!
//! - `RuleChain`：单个字段的有序规则链，遇到第一条失败即停止；
//! - `ValidationResult`：收集各字段的失败，按发生顺序保存；
//! - `Validator`：某一请求类型的完整校验（结构规则 + 需要访问存储的规则）。
//!
//! 结构规则不做 I/O；访问存储的规则只在相关结构规则全部通过后执行，
//! 存储错误作为 `DomainError` 返回，不会被当成校验失败。
//!
pub mod rules;

use async_trait::async_trait;
use keepit_domain::error::DomainResult;
use keepit_domain::persist::DummyRepository;
use serde::Serialize;
use std::fmt;
use tokio_util::sync::CancellationToken;

pub use rules::{MUST_BE_UNIQUE, MUST_BE_VALID_IDENTIFIER, MUST_NOT_BE_EMPTY};

/// 单条校验失败：字段名 + 消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 校验结果；无失败即为通过
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.failures))
        }
    }
}

/// 非空的失败列表，随 `AppError::Validation` 返回
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationFailure>);

impl ValidationErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationFailure> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 出现失败的字段，按首次出现顺序去重
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for failure in &self.0 {
            if !fields.contains(&failure.field.as_str()) {
                fields.push(&failure.field);
            }
        }
        fields
    }

    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |f| f.field == field)
            .map(|f| f.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", failure.field, failure.message)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationFailure;
    type IntoIter = std::slice::Iter<'a, ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

type Rule<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// 单个字段的有序规则链
pub struct RuleChain<T: ?Sized> {
    field: &'static str,
    rules: Vec<Rule<T>>,
}

impl<T: ?Sized> RuleChain<T> {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    pub fn rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// 依次执行规则，返回第一条失败
    pub fn check(&self, value: &T) -> Option<ValidationFailure> {
        self.rules
            .iter()
            .find_map(|rule| rule(value).err())
            .map(|message| ValidationFailure::new(self.field, message))
    }

    /// 执行规则链并把失败写入 `result`；返回该字段是否通过
    pub fn apply(&self, value: &T, result: &mut ValidationResult) -> bool {
        match self.check(value) {
            Some(failure) => {
                result.push(failure);
                false
            }
            None => true,
        }
    }
}

impl<T: ?Sized> fmt::Debug for RuleChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field("field", &self.field)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// 请求校验器
///
/// `dummies` 由处理器按请求传入（来自当次的工作单元）。
#[async_trait]
pub trait Validator<R>: Send + Sync
where
    R: Send + Sync,
{
    async fn validate(
        &self,
        request: &R,
        dummies: &dyn DummyRepository,
        cancel: &CancellationToken,
    ) -> DomainResult<ValidationResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_chain() -> RuleChain<str> {
        RuleChain::new("name")
            .rule(rules::not_empty())
            .rule(rules::max_length(5))
    }

    #[test]
    fn chain_stops_at_first_failure() {
        let chain = name_chain();
        let failure = chain.check("").unwrap();
        assert_eq!(failure, ValidationFailure::new("name", MUST_NOT_BE_EMPTY));

        let failure = chain.check("toolong").unwrap();
        assert_eq!(failure.message, "Must be fewer than 5 characters in length");

        assert!(chain.check("fine").is_none());
    }

    #[test]
    fn result_collects_in_order() {
        let id = RuleChain::<str>::new("id").rule(rules::not_empty());
        let mut result = ValidationResult::default();

        assert!(!id.apply("", &mut result));
        assert!(!name_chain().apply("", &mut result));
        assert!(!result.is_valid());

        let errors = result.into_result().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.fields(), vec!["id", "name"]);
        assert_eq!(
            errors.to_string(),
            "id: Must not be empty; name: Must not be empty"
        );
        assert_eq!(
            errors.messages_for("name").collect::<Vec<_>>(),
            vec![MUST_NOT_BE_EMPTY]
        );
    }

    #[test]
    fn empty_result_is_valid() {
        let result = ValidationResult::default();
        assert!(result.is_valid());
        assert!(result.into_result().is_ok());
    }
}
