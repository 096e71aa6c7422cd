//! 错误到问题详情（Problem Details）的转换
//!
//! 接口层据此生成响应体；校验失败按字段（camelCase）分组，保留消息顺序。
//!
use crate::error::AppError;
use keepit_domain::error::DomainError;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

pub const VALIDATION_TYPE: &str = "https://www.reapit.com/errors/validation";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

/// 按字段分组的校验消息；字段按首次失败的先后排列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, Vec<String>)>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    fn push(&mut self, field: String, message: String) {
        match self.0.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.0.push((field, vec![message])),
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, messages) in &self.0 {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

impl ProblemDetails {
    fn new(status: u16, title: &str, detail: Option<String>) -> Self {
        Self {
            kind: "about:blank".to_string(),
            title: title.to_string(),
            status,
            detail,
            errors: FieldErrors::default(),
        }
    }
}

impl From<&AppError> for ProblemDetails {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::Validation(errors) => {
                let mut grouped = FieldErrors::default();
                for failure in errors.iter() {
                    grouped.push(camel_case(&failure.field), failure.message.clone());
                }
                Self {
                    kind: VALIDATION_TYPE.to_string(),
                    errors: grouped,
                    ..Self::new(
                        422,
                        "Validation Failed",
                        Some("One or more validation errors occurred.".to_string()),
                    )
                }
            }
            AppError::NotFound { kind, id } => Self::new(
                404,
                "Resource Not Found",
                Some(format!("{kind} with id \"{id}\" was not found.")),
            ),
            AppError::Cancelled => Self::new(499, "Request Cancelled", None),
            other => Self::new(
                500,
                "Internal Server Error",
                Some(internal_detail(other).to_string()),
            ),
        }
    }
}

// 只暴露错误类别，不带存储层的原因
fn internal_detail(err: &AppError) -> &'static str {
    match err {
        AppError::Domain(DomainError::Storage { .. }) => "A storage failure occurred.",
        AppError::Domain(DomainError::Conflict { .. }) => "The change conflicted with stored data.",
        AppError::Domain(_) => "A domain error occurred.",
        _ => "The request could not be dispatched.",
    }
}

fn camel_case(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ValidationFailure, ValidationResult};

    #[test]
    fn validation_failures_group_by_field() {
        let mut result = ValidationResult::default();
        result.push(ValidationFailure::new("Id", "Must be a valid identifier"));
        result.push(ValidationFailure::new("name", "Must not be empty"));
        let err = AppError::Validation(result.into_result().unwrap_err());

        let problem = ProblemDetails::from(&err);
        let json = serde_json::to_value(&problem).unwrap();

        assert_eq!(problem.status, 422);
        assert_eq!(json["type"], VALIDATION_TYPE);
        assert_eq!(json["title"], "Validation Failed");
        assert_eq!(json["detail"], "One or more validation errors occurred.");
        assert_eq!(json["errors"]["id"][0], "Must be a valid identifier");
        assert_eq!(json["errors"]["name"][0], "Must not be empty");
    }

    #[test]
    fn validation_groups_keep_failure_order() {
        let mut result = ValidationResult::default();
        result.push(ValidationFailure::new("name", "Must not be empty"));
        result.push(ValidationFailure::new("id", "Must be a valid identifier"));
        result.push(ValidationFailure::new("name", "Must be unique"));
        let err = AppError::Validation(result.into_result().unwrap_err());

        let problem = ProblemDetails::from(&err);
        assert_eq!(problem.errors.fields().collect::<Vec<_>>(), vec!["name", "id"]);
        assert_eq!(
            problem.errors.get("name"),
            Some(&["Must not be empty".to_string(), "Must be unique".to_string()][..])
        );

        let text = serde_json::to_string(&problem).unwrap();
        assert!(text.contains(
            r#""errors":{"name":["Must not be empty","Must be unique"],"id":["Must be a valid identifier"]}"#
        ));
    }

    #[test]
    fn internal_errors_hide_storage_reason() {
        let err = AppError::from(DomainError::Storage {
            reason: "disk on fire".into(),
        });
        let problem = ProblemDetails::from(&err);
        assert_eq!(problem.status, 500);
        assert_eq!(problem.detail.as_deref(), Some("A storage failure occurred."));

        let text = serde_json::to_string(&problem).unwrap();
        assert!(!text.contains("disk on fire"));

        let problem = ProblemDetails::from(&AppError::HandlerNotFound("GetDummies"));
        assert_eq!(problem.status, 500);
        assert!(!problem.detail.unwrap_or_default().contains("GetDummies"));
    }

    #[test]
    fn not_found_and_storage_map_to_status() {
        let problem = ProblemDetails::from(&AppError::not_found("Dummy", "42"));
        assert_eq!(problem.status, 404);
        assert!(problem.errors.is_empty());

        let problem = ProblemDetails::from(&AppError::from(DomainError::Storage {
            reason: "offline".into(),
        }));
        assert_eq!(problem.status, 500);

        let problem = ProblemDetails::from(&AppError::Cancelled);
        assert_eq!(problem.status, 499);
        let json = serde_json::to_value(&problem).unwrap();
        assert!(json.get("detail").is_none());
        assert!(json.get("errors").is_none());
    }
}
