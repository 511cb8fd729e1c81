use super::{RecordId, Schema};
use crate::stmt;

use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing record type.
    pub id: FieldId,

    /// The field name
    pub name: FieldName,

    /// Primitive, record link, or a list of either
    pub ty: stmt::Type,

    /// True if the field can be null.
    pub nullable: bool,

    /// True if the field is the record's primary key
    pub primary_key: bool,

    /// True if the database assigns the value on insert
    pub auto_increment: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldId {
    pub record: RecordId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct FieldName {
    pub app_name: String,
    pub storage_name: Option<String>,
}

impl FieldName {
    pub fn new(app_name: &str) -> FieldName {
        FieldName {
            app_name: app_name.to_string(),
            storage_name: None,
        }
    }

    /// The name of the column storing the field.
    pub fn storage_name(&self) -> String {
        match &self.storage_name {
            Some(name) => name.clone(),
            None => std_util::str::snake_case(&self.app_name),
        }
    }
}

impl Field {
    pub fn is_list(&self) -> bool {
        self.ty.is_list()
    }

    /// The field's type with any list wrapper removed.
    pub fn element_ty(&self) -> &stmt::Type {
        self.ty.element()
    }

    /// If the field links to another record type, returns that record's id.
    pub fn target(&self) -> Option<RecordId> {
        self.element_ty().as_record()
    }

    /// Returns a fully qualified name for the field.
    pub fn full_name(&self, schema: &Schema) -> String {
        let record = schema.record(self.id.record);
        format!("{}::{}", record.name, self.name.app_name)
    }
}

impl From<&Self> for FieldId {
    fn from(val: &Self) -> Self {
        *val
    }
}

impl From<&Field> for FieldId {
    fn from(val: &Field) -> Self {
        val.id
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.record.0, self.index)
    }
}
