use super::{Field, FieldId, FieldName, Name, Operation};
use crate::stmt;

use std::fmt;

/// A declared data shape: an ordered list of typed fields, at most one of
/// which is the primary key.
#[derive(Debug, Clone)]
pub struct RecordType {
    /// Uniquely identifies the record type within the schema
    pub id: RecordId,

    /// Name of the record type
    pub name: Name,

    /// Fields, in declaration order
    pub fields: Vec<Field>,

    /// The primary key field, if the record declares one
    pub primary_key: Option<FieldId>,

    /// If set, the table is named explicitly instead of derived from `name`.
    pub table_name: Option<String>,

    /// Statements requested for the record type.
    pub operations: Vec<Operation>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordId(pub usize);

impl RecordType {
    pub fn new(id: RecordId, name: &str) -> RecordType {
        RecordType {
            id,
            name: Name::new(name),
            fields: vec![],
            primary_key: None,
            table_name: None,
            operations: vec![],
        }
    }

    /// Adds a primary key field.
    pub fn with_key(mut self, name: &str, ty: impl Into<stmt::Type>) -> RecordType {
        let id = self.push_field(name, ty, false);
        self.fields[id.index].primary_key = true;
        self.primary_key = Some(id);
        self
    }

    /// Adds a primary key field assigned by the database.
    pub fn with_auto_key(mut self, name: &str, ty: impl Into<stmt::Type>) -> RecordType {
        self = self.with_key(name, ty);
        let index = self.fields.len() - 1;
        self.fields[index].auto_increment = true;
        self
    }

    /// Adds a required field.
    pub fn with_field(mut self, name: &str, ty: impl Into<stmt::Type>) -> RecordType {
        self.push_field(name, ty, false);
        self
    }

    /// Adds a nullable field.
    pub fn with_optional(mut self, name: &str, ty: impl Into<stmt::Type>) -> RecordType {
        self.push_field(name, ty, true);
        self
    }

    pub fn with_table_name(mut self, name: &str) -> RecordType {
        self.table_name = Some(name.to_string());
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> RecordType {
        self.operations.push(operation);
        self
    }

    pub fn push_field(&mut self, name: &str, ty: impl Into<stmt::Type>, nullable: bool) -> FieldId {
        let id = self.id.field(self.fields.len());

        self.fields.push(Field {
            id,
            name: FieldName::new(name),
            ty: ty.into(),
            nullable,
            primary_key: false,
            auto_increment: false,
        });

        id
    }

    pub fn field(&self, field: impl Into<FieldId>) -> &Field {
        let field_id = field.into();
        assert_eq!(self.id, field_id.record);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name.app_name == name)
    }

    pub fn has_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }

    pub fn primary_key_field(&self) -> Option<&Field> {
        self.primary_key.map(|id| self.field(id))
    }

    /// Fields whose element type is the `target` record type.
    pub fn fields_targeting(&self, target: RecordId) -> impl Iterator<Item = &Field> + '_ {
        self.fields
            .iter()
            .filter(move |field| field.target() == Some(target))
    }
}

impl RecordId {
    /// Create a `FieldId` representing the current record's field at index
    /// `index`.
    pub const fn field(self, index: usize) -> FieldId {
        FieldId {
            record: self,
            index,
        }
    }
}

impl From<&Self> for RecordId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&RecordType> for RecordId {
    fn from(value: &RecordType) -> Self {
        value.id
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "RecordId({})", self.0)
    }
}
