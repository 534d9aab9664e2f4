//! Ordered forest of fields with id-addressed, copy-on-write edits
//!
//! Every operation leaves `self` untouched and returns the edited forest.
//! Edits that address an id not present in the forest return an unchanged copy.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

use super::field::{Field, FieldId, FieldPatch, FieldType};

/// Structural problem found by [`FieldTree::check_invariants`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Duplicate field id: {0}")]
    DuplicateId(FieldId),

    #[error("Field {id} has type {field_type} but carries children")]
    ChildrenOnLeaf { id: FieldId, field_type: FieldType },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTree {
    roots: Vec<Field>,
}

impl FieldTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roots(roots: Vec<Field>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Field] {
        &self.roots
    }

    /// Number of root-level fields
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order iterator over every field, parent before children
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    pub fn find(&self, id: &FieldId) -> Option<&Field> {
        self.iter().find(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.find(id).is_some()
    }

    /// Append `field` to the roots, or to the children of `parent`.
    ///
    /// The parent's type is not checked. A field whose subtree reuses an
    /// existing id, or repeats one internally, is not inserted.
    pub fn insert(&self, field: Field, parent: Option<&FieldId>) -> Self {
        let mut seen: HashSet<&FieldId> = self.iter().map(|f| &f.id).collect();
        let duplicate = Iter { stack: vec![&field] }
            .find(|f| !seen.insert(&f.id))
            .map(|f| f.id.clone());
        if let Some(id) = duplicate {
            warn!(%id, "Refusing to insert field with duplicate id");
            return self.clone();
        }

        let mut roots = self.roots.clone();
        match parent {
            None => roots.push(field),
            Some(parent_id) => match find_mut(&mut roots, parent_id) {
                Some(node) => node.children.get_or_insert_with(Vec::new).push(field),
                None => {
                    debug!(parent = %parent_id, "Insert target not found");
                    return self.clone();
                }
            },
        }
        Self { roots }
    }

    /// Merge `patch` into the field with `id`
    pub fn update(&self, id: &FieldId, patch: &FieldPatch) -> Self {
        let mut roots = self.roots.clone();
        match find_mut(&mut roots, id) {
            Some(node) => node.apply(patch),
            None => debug!(%id, "Update target not found"),
        }
        Self { roots }
    }

    /// Remove the field with `id` together with its subtree
    pub fn delete(&self, id: &FieldId) -> Self {
        let mut roots = self.roots.clone();
        if !remove(&mut roots, id) {
            debug!(%id, "Delete target not found");
        }
        Self { roots }
    }

    pub fn flatten(&self) -> Vec<&Field> {
        self.iter().collect()
    }

    /// Count named fields of the given type anywhere in the forest
    pub fn count_by_type(&self, field_type: FieldType) -> usize {
        self.iter()
            .filter(|f| f.field_type == field_type && f.is_named())
            .count()
    }

    /// Nesting levels below the roots; a forest of leaves has depth 0
    pub fn max_depth(&self) -> usize {
        fn depth_of(fields: &[Field], depth: usize) -> usize {
            fields
                .iter()
                .filter(|f| f.has_children())
                .map(|f| depth_of(f.children(), depth + 1))
                .fold(depth, usize::max)
        }
        depth_of(&self.roots, 0)
    }

    /// Report every duplicate id and every non-nested field with children
    pub fn check_invariants(&self) -> Result<(), Vec<TreeError>> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for field in self.iter() {
            if !seen.insert(&field.id) {
                errors.push(TreeError::DuplicateId(field.id.clone()));
            }
            if !field.field_type.is_nested() && field.has_children() {
                errors.push(TreeError::ChildrenOnLeaf {
                    id: field.id.clone(),
                    field_type: field.field_type,
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

impl From<Vec<Field>> for FieldTree {
    fn from(roots: Vec<Field>) -> Self {
        Self::from_roots(roots)
    }
}

impl<'a> IntoIterator for &'a FieldTree {
    type Item = &'a Field;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first, pre-order traversal of a [`FieldTree`]
pub struct Iter<'a> {
    stack: Vec<&'a Field>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Field;

    fn next(&mut self) -> Option<Self::Item> {
        let field = self.stack.pop()?;
        self.stack.extend(field.children().iter().rev());
        Some(field)
    }
}

fn find_mut<'a>(fields: &'a mut [Field], id: &FieldId) -> Option<&'a mut Field> {
    for field in fields.iter_mut() {
        if &field.id == id {
            return Some(field);
        }
        if let Some(children) = field.children.as_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove(fields: &mut Vec<Field>, id: &FieldId) -> bool {
    if let Some(pos) = fields.iter().position(|f| &f.id == id) {
        fields.remove(pos);
        return true;
    }
    fields
        .iter_mut()
        .filter_map(|f| f.children.as_mut())
        .any(|children| remove(children, id))
}
