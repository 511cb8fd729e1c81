use super::{TableId, Type};
use crate::{schema::app::FieldId, stmt};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Uniquely identifies the column in the schema.
    pub id: ColumnId,

    /// The name of the column in the database. For embedded references this
    /// is the prefix of the flattened columns.
    pub name: String,

    /// What the column represents.
    pub kind: ColumnKind,

    /// The column type, from the application's point of view.
    pub ty: stmt::Type,

    /// The database storage type of the column. `None` for references,
    /// which are not stored as a single column.
    pub storage_ty: Option<Type>,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// True if the column is the table's primary key
    pub primary_key: bool,

    /// True if the database assigns the column's value on insert.
    pub auto_increment: bool,

    /// The record field the column was allocated for. Synthesized foreign
    /// columns and join columns have no source field.
    pub source: Option<FieldId>,

    /// The paired column on the other side of a link. Always mutual.
    pub referenced: Option<ColumnId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    /// Scalar data, or an opaque value stored whole.
    Field,

    /// Holds the primary key value of a row in `target`.
    Foreign { target: TableId, target_column: ColumnId },

    /// A structural link to another table, not stored as a column itself.
    Reference(Reference),

    /// One endpoint of a join table, pointing at `target`'s primary key. `peer`
    /// is the table on the other end of the association.
    Join {
        target: TableId,
        target_column: ColumnId,
        peer: TableId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// The other table holds a foreign column pointing back here.
    Foreign { target: TableId },

    /// Rows are associated through a join table.
    Join { target: TableId, join: TableId },

    /// The target has no key; its columns are flattened into this table.
    Embedded { target: TableId },
}

#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct ColumnId {
    pub table: TableId,
    pub index: usize,
}

impl Column {
    pub fn is_field(&self) -> bool {
        matches!(self.kind, ColumnKind::Field)
    }

    pub fn is_foreign(&self) -> bool {
        matches!(self.kind, ColumnKind::Foreign { .. })
    }

    pub fn is_join(&self) -> bool {
        matches!(self.kind, ColumnKind::Join { .. })
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match &self.kind {
            ColumnKind::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// True if the column occupies a single physical column in its table.
    pub fn is_stored(&self) -> bool {
        self.storage_ty.is_some()
    }

    /// The table this column links to, if any.
    pub fn target(&self) -> Option<TableId> {
        match &self.kind {
            ColumnKind::Field => None,
            ColumnKind::Foreign { target, .. } | ColumnKind::Join { target, .. } => Some(*target),
            ColumnKind::Reference(reference) => Some(reference.target()),
        }
    }
}

impl Reference {
    pub fn target(&self) -> TableId {
        match *self {
            Reference::Foreign { target }
            | Reference::Join { target, .. }
            | Reference::Embedded { target } => target,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Reference::Embedded { .. })
    }
}

impl ColumnId {
    pub(crate) fn placeholder() -> Self {
        Self {
            table: TableId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl From<&Column> for ColumnId {
    fn from(value: &Column) -> Self {
        value.id
    }
}

impl From<&ColumnId> for ColumnId {
    fn from(value: &ColumnId) -> Self {
        *value
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({}/{})", self.table.0, self.index)
    }
}
