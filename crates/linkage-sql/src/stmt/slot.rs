use linkage_core::{
    schema::db::{self, ColumnId, PhysicalColumn},
    stmt::{Value, ValueRecord},
    Schema,
};

/// A physical column and where its value comes from in a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// The logical column providing the value. For flattened columns this is
    /// the column of the embedded table.
    pub column: ColumnId,

    /// Physical column name
    pub name: String,

    /// Request field holding the value
    pub field: String,

    /// For flattened columns, the field within the embedded record.
    pub subfield: Option<String>,

    pub storage_ty: db::Type,
}

impl Slot {
    pub(crate) fn from_physical(schema: &Schema, physical: &PhysicalColumn) -> Slot {
        let (field, subfield) = match physical.embedded {
            None => (field_name(schema, physical.column), None),
            Some(reference) => (
                field_name(schema, reference),
                Some(field_name(schema, physical.column)),
            ),
        };

        Slot {
            column: physical.column,
            name: physical.name.clone(),
            field,
            subfield,
            storage_ty: physical.storage_ty,
        }
    }

    /// Reads the slot's value out of a request. Missing values are null.
    /// Records and lists bound to JSON columns are encoded as JSON text.
    pub fn extract(&self, request: &ValueRecord) -> Value {
        let value = request.get(&self.field);

        let value = match (&self.subfield, value) {
            (None, value) => value,
            (Some(subfield), Some(Value::Record(record))) => record.get(subfield),
            (Some(_), _) => None,
        };

        match value {
            Some(value @ (Value::Record(_) | Value::List(_))) if self.storage_ty == db::Type::Json => {
                Value::String(value.to_json().to_string())
            }
            Some(value) => value.clone(),
            None => Value::Null,
        }
    }
}

/// The request field name for a column: the name of the field it was
/// allocated for, or the column name for synthesized columns.
pub(crate) fn field_name(schema: &Schema, column: ColumnId) -> String {
    match schema.field_for(column) {
        Some(field) => field.name.app_name.clone(),
        None => schema.db.column(column).name.clone(),
    }
}
