use super::{Column, ColumnId, Type};
use crate::stmt;

/// A column as the database sees it, after embedded references have been
/// flattened into their owner.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalColumn {
    /// Name of the column in the database
    pub name: String,

    /// The logical column providing the value. For flattened columns this
    /// is the column of the embedded table.
    pub column: ColumnId,

    /// The embedded reference the column was flattened from.
    pub embedded: Option<ColumnId>,

    pub ty: stmt::Type,
    pub storage_ty: Type,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
}

impl PhysicalColumn {
    pub(crate) fn stored(column: &Column, storage_ty: Type) -> PhysicalColumn {
        PhysicalColumn {
            name: column.name.clone(),
            column: column.id,
            embedded: None,
            ty: column.ty.clone(),
            storage_ty,
            nullable: column.nullable,
            primary_key: column.primary_key,
            auto_increment: column.auto_increment,
        }
    }

    pub(crate) fn flattened(reference: &Column, leaf: &Column, storage_ty: Type) -> PhysicalColumn {
        PhysicalColumn {
            name: format!("{}_{}", reference.name, leaf.name),
            column: leaf.id,
            embedded: Some(reference.id),
            ty: leaf.ty.clone(),
            storage_ty,
            nullable: reference.nullable || leaf.nullable,
            primary_key: false,
            auto_increment: false,
        }
    }

    pub fn is_foreign(&self, schema: &super::Schema) -> bool {
        self.embedded.is_none() && schema.column(self.column).is_foreign()
    }
}
