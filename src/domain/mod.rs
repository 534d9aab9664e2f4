pub mod field;
pub mod names;
pub mod projector;
pub mod stats;
pub mod tree;

pub use field::{Field, FieldId, FieldPatch, FieldType, FieldValue, UnknownFieldType};
pub use names::{check_name, is_valid_name, NameCheck};
pub use projector::{DefaultPolicy, Projector};
pub use stats::SchemaStats;
pub use tree::{FieldTree, TreeError};
