//! Editing session that owns one field forest
//!
//! Each edit swaps in the forest produced by a pure [`FieldTree`] operation.
//! Unlike the tree itself, the session refuses edits it cannot apply
//! meaningfully and says why.

use serde_json::Value;
use tracing::debug;

use super::error::{SessionError, SessionResult};
use super::export::{render_pretty, ExportDocument};
use crate::config::{Settings, TypeProfile};
use crate::domain::{
    check_name, Field, FieldId, FieldPatch, FieldTree, FieldType, FieldValue, NameCheck,
    Projector, SchemaStats,
};

#[derive(Clone, Debug, Default)]
pub struct SchemaSession {
    tree: FieldTree,
    projector: Projector,
    profile: TypeProfile,
}

impl SchemaSession {
    pub fn new(projector: Projector, profile: TypeProfile) -> Self {
        Self {
            tree: FieldTree::new(),
            projector,
            profile,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Projector::new(settings.policy()), settings.profile)
    }

    pub fn tree(&self) -> &FieldTree {
        &self.tree
    }

    pub fn profile(&self) -> TypeProfile {
        self.profile
    }

    /// Add an unnamed String field at the root or under a nested field
    pub fn add_field(&mut self, parent: Option<&FieldId>) -> SessionResult<FieldId> {
        if let Some(parent_id) = parent {
            let parent_field = self.require(parent_id)?;
            if !parent_field.field_type.is_nested() {
                return Err(SessionError::NotNested {
                    id: parent_id.clone(),
                    field_type: parent_field.field_type,
                });
            }
        }

        let mut field = Field::new(FieldType::String);
        while self.tree.contains(&field.id) {
            field.id = FieldId::generate();
        }
        let id = field.id.clone();

        self.tree = self.tree.insert(field, parent);
        debug!(%id, parent = ?parent.map(FieldId::as_str), "Field added");
        Ok(id)
    }

    /// Store the raw name and report how it checks out; invalid names are kept
    pub fn rename(&mut self, id: &FieldId, raw: &str) -> SessionResult<NameCheck> {
        self.require(id)?;
        let check = check_name(raw);
        if check == NameCheck::Invalid {
            debug!(%id, name = raw, "Field name is not a valid identifier");
        }
        self.tree = self.tree.update(id, &FieldPatch::new().name(raw));
        Ok(check)
    }

    pub fn retype(&mut self, id: &FieldId, field_type: FieldType) -> SessionResult<()> {
        if !self.profile.allows(field_type) {
            return Err(SessionError::TypeNotAllowed(field_type));
        }
        self.require(id)?;
        self.tree = self
            .tree
            .update(id, &FieldPatch::new().field_type(field_type));
        Ok(())
    }

    /// Parse raw form text into the field's override; blank text clears it
    pub fn set_value(&mut self, id: &FieldId, raw: &str) -> SessionResult<()> {
        let field_type = self.require(id)?.field_type;
        if field_type.is_nested() {
            return Err(SessionError::ValueOnNested(id.clone()));
        }

        let patch = match FieldValue::parse_input(field_type, raw) {
            Some(value) => FieldPatch::new().value(value),
            None => FieldPatch::new().clear_value(),
        };
        self.tree = self.tree.update(id, &patch);
        Ok(())
    }

    pub fn clear_value(&mut self, id: &FieldId) -> SessionResult<()> {
        self.require(id)?;
        self.tree = self.tree.update(id, &FieldPatch::new().clear_value());
        Ok(())
    }

    /// Delete the field and everything below it
    pub fn remove(&mut self, id: &FieldId) -> SessionResult<()> {
        self.require(id)?;
        self.tree = self.tree.delete(id);
        Ok(())
    }

    pub fn preview(&self) -> Value {
        self.projector.project(&self.tree)
    }

    pub fn render(&self) -> SessionResult<String> {
        Ok(render_pretty(&self.preview())?)
    }

    pub fn stats(&self) -> SchemaStats {
        SchemaStats::collect(&self.tree, self.profile.types(), &self.preview())
    }

    pub fn document(&self, file_name: &str) -> SessionResult<ExportDocument> {
        Ok(ExportDocument::from_value(&self.preview(), file_name)?)
    }

    fn require(&self, id: &FieldId) -> SessionResult<&Field> {
        self.tree
            .find(id)
            .ok_or_else(|| SessionError::UnknownField(id.clone()))
    }
}
