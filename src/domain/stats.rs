//! Summary figures shown next to the schema

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::field::FieldType;
use super::tree::FieldTree;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SchemaStats {
    /// Every node in the forest, named or not
    pub total_fields: usize,
    /// Named fields per type, in the order of the given type list
    pub by_type: Vec<(FieldType, usize)>,
    pub max_depth: usize,
    /// Keys in the top level of the projected document
    pub top_level_keys: usize,
}

impl SchemaStats {
    pub fn collect(tree: &FieldTree, types: &[FieldType], projection: &Value) -> Self {
        Self {
            total_fields: tree.iter().count(),
            by_type: types.iter().map(|t| (*t, tree.count_by_type(*t))).collect(),
            max_depth: tree.max_depth(),
            top_level_keys: projection.as_object().map_or(0, |obj| obj.len()),
        }
    }
}

impl fmt::Display for SchemaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total Fields: {}", self.total_fields)?;
        for (field_type, count) in &self.by_type {
            write!(f, " | {}: {}", field_type, count)?;
        }
        write!(
            f,
            " | Max Depth: {} | Top-level keys: {}",
            self.max_depth, self.top_level_keys
        )
    }
}
