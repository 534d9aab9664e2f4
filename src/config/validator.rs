use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::config::{ExportSettings, LoggingSettings, Settings};
use crate::domain::FieldType;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_export(&settings.export) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_logging(&settings.logging) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_defaults(&settings.defaults) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_export(export: &ExportSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if export.file_name.trim().is_empty() {
            errors.push(ValidationError::MissingField("export.file_name".to_string()));
        } else if export.file_name.contains(['/', '\\']) {
            errors.push(ValidationError::InvalidValue {
                field: "export.file_name".to_string(),
                reason: "File name must not contain path separators; use export.directory"
                    .to_string(),
            });
        }

        if export.directory.as_os_str().is_empty() {
            errors.push(ValidationError::MissingField("export.directory".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_logging(logging: &LoggingSettings) -> Result<(), Vec<ValidationError>> {
        if logging.max_level().is_none() {
            return Err(vec![ValidationError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!(
                    "'{}' is not one of trace, debug, info, warn, error",
                    logging.level
                ),
            }]);
        }
        Ok(())
    }

    fn validate_defaults(
        defaults: &HashMap<FieldType, Value>,
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field_type, value) in defaults {
            let problem = match field_type {
                FieldType::Nested => {
                    Some("Nested fields always project their children and take no default")
                }
                FieldType::Number if !value.is_number() => Some("Default must be a number"),
                FieldType::Boolean if !value.is_boolean() => Some("Default must be a boolean"),
                FieldType::Array if !value.is_array() => Some("Default must be an array"),
                FieldType::Number | FieldType::Boolean | FieldType::Array => None,
                _ if !value.is_string() => Some("Default must be a string"),
                _ => None,
            };

            if let Some(reason) = problem {
                errors.push(ValidationError::InvalidValue {
                    field: format!("defaults.{}", field_type.label().to_lowercase()),
                    reason: reason.to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(ConfigValidator::validate(&Settings::default()).is_ok());
    }

    #[test]
    fn test_export_file_name_rules() {
        let mut settings = Settings::default();
        settings.export.file_name = "out/schema.json".to_string();
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("export.file_name"));

        settings.export.file_name = "  ".to_string();
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(matches!(errors[0], ValidationError::MissingField(_)));
    }

    #[test]
    fn test_default_literals_must_match_type() {
        let mut settings = Settings::default();
        settings.defaults.insert(FieldType::Number, json!("seven"));
        settings.defaults.insert(FieldType::Nested, json!({"a": 1}));
        settings.defaults.insert(FieldType::Email, json!("someone@example.com"));
        settings.defaults.insert(FieldType::Boolean, json!(true));

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        let mut fields: Vec<String> = errors
            .iter()
            .map(|e| match e {
                ValidationError::InvalidValue { field, .. } => field.clone(),
                other => other.to_string(),
            })
            .collect();
        fields.sort();
        assert_eq!(fields, vec!["defaults.nested", "defaults.number"]);
    }

    #[test]
    fn test_errors_accumulate() {
        let mut settings = Settings::default();
        settings.logging.level = "chatty".to_string();
        settings.export.file_name = String::new();
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
