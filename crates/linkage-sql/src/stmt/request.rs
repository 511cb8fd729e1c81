use super::{slot::field_name, update::dependent_of};

use linkage_core::{
    schema::{
        app,
        db::{ColumnId, ColumnKind, Reference, Table, TableId},
    },
    stmt::{Type, Value, ValueRecord},
    Error, Result, Schema,
};

use std::fmt;

/// The fields a caller supplies for each row of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestShape {
    /// Name of the request type, e.g. `UpdateBookRequest`
    pub name: String,

    /// The table the request addresses
    pub table: TableId,

    pub fields: Vec<RequestField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestField {
    pub name: String,

    /// The type of the value, as declared by the application
    pub ty: Type,

    /// Rust-like rendering of `ty`, with record types named
    pub type_name: String,

    pub nullable: bool,

    pub kind: FieldKind,

    /// Fields of an embedded record, one per flattened column. Empty for
    /// every other kind.
    pub fields: Vec<RequestField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Identifies the row: the primary key, or a foreign column of a
    /// dependent table
    Key(ColumnId),

    /// A stored column
    Column(ColumnId),

    /// An embedded record, flattened into several columns
    Embedded(ColumnId),

    /// Rows of a dependent table, written by a cascading update
    Dependent(ColumnId),
}

impl RequestShape {
    /// The shape of an update request. Every field other than the keys is
    /// optional: a null leaves the stored value unchanged.
    pub fn update(schema: &Schema, table: &Table) -> Result<RequestShape> {
        let record = record_for(schema, table)?;
        let keyed = table.has_primary_key();
        let mut fields = vec![];

        for column in table.columns() {
            let kind = match &column.kind {
                ColumnKind::Field if column.primary_key => FieldKind::Key(column.id),
                ColumnKind::Field if column.auto_increment => continue,
                ColumnKind::Field => FieldKind::Column(column.id),
                ColumnKind::Foreign { .. } if !keyed => FieldKind::Key(column.id),
                ColumnKind::Foreign { .. } => FieldKind::Column(column.id),
                ColumnKind::Reference(Reference::Embedded { .. }) => FieldKind::Embedded(column.id),
                ColumnKind::Reference(Reference::Foreign { .. }) => {
                    if dependent_of(schema, table, column).is_none() {
                        continue;
                    }
                    FieldKind::Dependent(column.id)
                }
                ColumnKind::Reference(Reference::Join { .. }) | ColumnKind::Join { .. } => continue,
            };

            let nullable = !matches!(kind, FieldKind::Key(_));
            fields.push(RequestField::new(schema, column.id, kind, nullable));
        }

        Ok(RequestShape {
            name: format!("Update{}Request", record.name),
            table: table.id,
            fields,
        })
    }

    /// The shape of an insert request. Fields follow the nullability of
    /// their columns; database assigned keys are left out.
    pub fn insert(schema: &Schema, table: &Table) -> Result<RequestShape> {
        let record = record_for(schema, table)?;
        let mut fields = vec![];

        for column in table.columns() {
            let kind = match &column.kind {
                _ if column.auto_increment => continue,
                ColumnKind::Field if column.primary_key => FieldKind::Key(column.id),
                ColumnKind::Field | ColumnKind::Foreign { .. } => FieldKind::Column(column.id),
                ColumnKind::Reference(Reference::Embedded { .. }) => FieldKind::Embedded(column.id),
                _ => continue,
            };

            fields.push(RequestField::new(schema, column.id, kind, column.nullable));
        }

        Ok(RequestShape {
            name: format!("Insert{}Request", record.name),
            table: table.id,
            fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&RequestField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &RequestField> + '_ {
        self.fields
            .iter()
            .filter(|field| matches!(field.kind, FieldKind::Key(_)))
    }

    /// Checks that a request only names known fields, supplies every
    /// required field, and that each value fits its field's type. Embedded
    /// records are checked field by field.
    pub fn validate(&self, request: &ValueRecord) -> Result<()> {
        validate_record(&self.name, &self.fields, request)
    }
}

fn validate_record(path: &str, fields: &[RequestField], record: &ValueRecord) -> Result<()> {
    for name in record.names() {
        if !fields.iter().any(|field| field.name == name) {
            return Err(Error::invalid_request(format!(
                "`{path}` has no field `{name}`"
            )));
        }
    }

    for field in fields {
        let value = record.get(&field.name).unwrap_or(&Value::Null);

        if value.is_null() {
            if !field.nullable {
                return Err(Error::invalid_request(format!(
                    "`{path}.{}` is required",
                    field.name
                )));
            }
            continue;
        }

        if !value.is_a(&field.ty) {
            return Err(Error::invalid_request(format!(
                "`{path}.{}` expects {}, got {value:?}",
                field.name, field.type_name
            )));
        }

        if let (FieldKind::Embedded(_), Value::Record(nested)) = (field.kind, value) {
            validate_record(&format!("{path}.{}", field.name), &field.fields, nested)?;
        }
    }

    Ok(())
}

impl RequestField {
    fn new(schema: &Schema, column: ColumnId, kind: FieldKind, nullable: bool) -> RequestField {
        let column = schema.db.column(column);
        let ty = column.ty.clone();

        let fields = match column.as_reference() {
            Some(Reference::Embedded { target }) => embedded_fields(schema, *target, nullable),
            _ => vec![],
        };

        RequestField {
            name: field_name(schema, column.id),
            type_name: type_name(&schema.app, &ty),
            ty,
            nullable,
            kind,
            fields,
        }
    }

    pub fn column(&self) -> ColumnId {
        match self.kind {
            FieldKind::Key(column)
            | FieldKind::Column(column)
            | FieldKind::Embedded(column)
            | FieldKind::Dependent(column) => column,
        }
    }
}

impl fmt::Display for RequestShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "struct {} {{", self.name)?;

        for field in &self.fields {
            if field.nullable {
                writeln!(f, "    {}: Option<{}>,", field.name, field.type_name)?;
            } else {
                writeln!(f, "    {}: {},", field.name, field.type_name)?;
            }
        }

        write!(f, "}}")
    }
}

/// The fields of an embedded record, matching the columns it flattens into.
/// A field is optional when the whole record is.
fn embedded_fields(schema: &Schema, target: TableId, nullable: bool) -> Vec<RequestField> {
    schema
        .db
        .table(target)
        .columns()
        .filter(|leaf| leaf.storage_ty.is_some())
        .filter(|leaf| !(leaf.is_foreign() && leaf.source.is_none()))
        .map(|leaf| {
            RequestField::new(
                schema,
                leaf.id,
                FieldKind::Column(leaf.id),
                nullable || leaf.nullable,
            )
        })
        .collect()
}

fn record_for<'a>(schema: &'a Schema, table: &Table) -> Result<&'a app::RecordType> {
    schema.record_for(table).ok_or_else(|| {
        Error::invalid_schema(format!(
            "`{}` is a join table and takes no requests",
            table.name
        ))
    })
}

fn type_name(app: &app::Schema, ty: &Type) -> String {
    match ty {
        Type::Bool => "bool".to_string(),
        Type::I16 => "i16".to_string(),
        Type::I32 => "i32".to_string(),
        Type::I64 => "i64".to_string(),
        Type::F32 => "f32".to_string(),
        Type::F64 => "f64".to_string(),
        Type::String => "String".to_string(),
        Type::Uuid => "Uuid".to_string(),
        Type::Bytes => "Vec<u8>".to_string(),
        Type::Timestamp => "Timestamp".to_string(),
        Type::Record(id) => app.record(*id).name.upper_camel_case(),
        Type::List(item) => format!("Vec<{}>", type_name(app, item)),
    }
}
