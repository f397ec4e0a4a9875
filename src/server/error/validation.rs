use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::model::api::ValidationErrorDto;

/// A request payload that failed one or more validation rules.
#[derive(Error, Debug)]
#[error("Validation error: {}", details.join("; "))]
pub struct ValidationError {
    pub details: Vec<String>,
}

impl ValidationError {
    /// Creates a validation error with a single detail message.
    pub fn message(detail: impl Into<String>) -> Self {
        Self {
            details: vec![detail.into()],
        }
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = Vec::new();
        collect_details(&errors, "", &mut details);
        details.sort();

        Self { details }
    }
}

fn collect_details(errors: &ValidationErrors, prefix: &str, details: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if field == "__all__" {
            prefix.to_string()
        } else if prefix.is_empty() {
            camel_case(field)
        } else {
            format!("{}.{}", prefix, camel_case(field))
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed {} check", err.code));

                    if path.is_empty() {
                        details.push(message);
                    } else {
                        details.push(format!("{} {}", path, message));
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_details(nested, &path, details),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_details(nested, &format!("{}[{}]", path, index), details);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;

    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }

    out
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorDto {
                error: "Validation error".to_string(),
                details: self.details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::ValidationError;
    use crate::model::auth::ChangePasswordDto;

    /// Expect field names to be reported in camelCase alongside their messages
    #[test]
    fn reports_camel_case_field_names() {
        let dto = ChangePasswordDto {
            current_password: "old".to_string(),
            new_password: "short".to_string(),
            confirm_password: "short".to_string(),
        };

        let err: ValidationError = dto.validate().unwrap_err().into();

        assert_eq!(
            err.details,
            vec!["newPassword must be at least 8 characters".to_string()]
        );
    }
}
