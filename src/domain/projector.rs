//! Projection of a field forest into a sample JSON document

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use super::field::{Field, FieldType};
use super::tree::FieldTree;

pub const SAMPLE_STRING: &str = "sample string";
pub const SAMPLE_NUMBER: i64 = 42;
/// 24 hex characters, the shape of a MongoDB ObjectId
pub const OBJECT_ID_PLACEHOLDER: &str = "507f1f77bcf86cd799439011";

/// Literal used for a field that carries no value override, per type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DefaultPolicy {
    overrides: HashMap<FieldType, Value>,
}

impl DefaultPolicy {
    /// The built-in literals with no overrides
    pub fn reference() -> Self {
        Self::default()
    }

    pub fn from_overrides(overrides: HashMap<FieldType, Value>) -> Self {
        Self { overrides }
    }

    pub fn with_override(mut self, field_type: FieldType, value: Value) -> Self {
        self.overrides.insert(field_type, value);
        self
    }

    /// Default literal for `field_type`; `now` is only read for [`FieldType::Date`]
    pub fn default_for(&self, field_type: FieldType, now: DateTime<Utc>) -> Value {
        if let Some(value) = self.overrides.get(&field_type) {
            return value.clone();
        }

        match field_type {
            FieldType::String => json!(SAMPLE_STRING),
            FieldType::Number => json!(SAMPLE_NUMBER),
            FieldType::Boolean => json!(false),
            FieldType::Array => json!([]),
            FieldType::Nested => json!({}),
            FieldType::ObjectId => json!(OBJECT_ID_PLACEHOLDER),
            FieldType::Date => json!(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            FieldType::Email | FieldType::Url | FieldType::Uuid => json!(""),
        }
    }
}

/// Turns a [`FieldTree`] into a sample instance document
#[derive(Clone, Debug, Default)]
pub struct Projector {
    policy: DefaultPolicy,
}

impl Projector {
    pub fn new(policy: DefaultPolicy) -> Self {
        Self { policy }
    }

    /// Project using the current time for date fields
    pub fn project(&self, tree: &FieldTree) -> Value {
        self.project_at(tree, Utc::now())
    }

    /// Project with an explicit clock value, so output is fully deterministic
    pub fn project_at(&self, tree: &FieldTree, now: DateTime<Utc>) -> Value {
        Value::Object(self.project_fields(tree.roots(), now))
    }

    fn project_fields(&self, fields: &[Field], now: DateTime<Utc>) -> Map<String, Value> {
        let mut obj = Map::new();
        for field in fields.iter().filter(|f| f.is_named()) {
            let value = match field.field_type {
                FieldType::Nested => Value::Object(self.project_fields(field.children(), now)),
                field_type => match &field.value {
                    Some(value) if !value.is_empty() => value.to_json(),
                    _ => self.policy.default_for(field_type, now),
                },
            };
            // Sibling name collisions: the later field wins
            obj.insert(field.name.clone(), value);
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::{FieldId, FieldValue};
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_age_and_user_scenario() {
        let tree = FieldTree::from(vec![
            Field::named("age", FieldType::Number),
            Field::named("user", FieldType::Nested)
                .with_children(vec![Field::named("email", FieldType::String)]),
        ]);

        let out = Projector::default().project(&tree);
        assert_eq!(out, json!({"age": 42, "user": {"email": "sample string"}}));
    }

    #[test]
    fn test_reference_defaults() {
        let tree: FieldTree = FieldType::ALL
            .iter()
            .map(|t| Field::named(format!("f_{}", t.label()), *t))
            .collect::<Vec<_>>()
            .into();

        let out = Projector::default().project_at(&tree, fixed_now());
        assert_eq!(
            out,
            json!({
                "f_String": "sample string",
                "f_Number": 42,
                "f_Boolean": false,
                "f_Array": [],
                "f_Nested": {},
                "f_ObjectId": "507f1f77bcf86cd799439011",
                "f_Date": "2024-05-17T09:30:00.000Z",
                "f_Email": "",
                "f_URL": "",
                "f_UUID": ""
            })
        );
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let tree = FieldTree::from(vec![
            Field::new(FieldType::String),
            Field::named("   ", FieldType::Number),
            Field::named("kept", FieldType::Boolean),
        ]);
        assert_eq!(Projector::default().project(&tree), json!({"kept": false}));
    }

    #[test]
    fn test_value_overrides() {
        let tree = FieldTree::from(vec![
            Field::named("flag", FieldType::Boolean).with_value(FieldValue::Bool(true)),
            Field::named("blank", FieldType::String).with_value(FieldValue::Text(String::new())),
            Field::named("raw", FieldType::Array).with_value(FieldValue::Text("[1,".to_string())),
        ]);
        assert_eq!(
            Projector::default().project(&tree),
            json!({"flag": true, "blank": "sample string", "raw": "[1,"})
        );
    }

    #[test]
    fn test_duplicate_names_last_wins_in_first_position() {
        let tree = FieldTree::from(vec![
            Field::named("a", FieldType::String),
            Field::named("b", FieldType::Boolean),
            Field::named("a", FieldType::Number),
        ]);
        let out = Projector::default().project(&tree);
        assert_eq!(out, json!({"a": 42, "b": false}));
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_keys_follow_insertion_order() {
        let tree = FieldTree::from(vec![
            Field::named("zeta", FieldType::String),
            Field::named("alpha", FieldType::String),
        ]);
        let text = serde_json::to_string(&Projector::default().project(&tree)).unwrap();
        assert_eq!(text, r#"{"zeta":"sample string","alpha":"sample string"}"#);
    }

    #[test]
    fn test_policy_overrides() {
        let policy = DefaultPolicy::reference()
            .with_override(FieldType::Number, json!(7))
            .with_override(FieldType::Date, json!("2000-01-01T00:00:00.000Z"));
        let tree = FieldTree::from(vec![
            Field::named("n", FieldType::Number),
            Field::named("d", FieldType::Date),
        ]);
        let projector = Projector::new(policy);
        assert_eq!(
            projector.project(&tree),
            json!({"n": 7, "d": "2000-01-01T00:00:00.000Z"})
        );
        assert_eq!(projector.project(&tree), projector.project(&tree));
    }

    #[test]
    fn test_leaf_with_children_ignores_children() {
        let tree = FieldTree::from(vec![Field::named("n", FieldType::Number).with_id("n")])
            .insert(
                Field::named("child", FieldType::String),
                Some(&FieldId::from("n")),
            );
        assert_eq!(Projector::default().project(&tree), json!({"n": 42}));
    }
}
