use super::{Field, FieldId, RecordId, RecordType};
use crate::{stmt, Error, Result};

use indexmap::IndexMap;
use std::collections::HashSet;

/// The full set of record types for one generation run.
#[derive(Debug, Default)]
pub struct Schema {
    pub records: IndexMap<RecordId, RecordType>,
}

impl Schema {
    /// Builds the schema, validating every declaration.
    pub fn from_records(records: impl IntoIterator<Item = RecordType>) -> Result<Schema> {
        let mut schema = Schema::default();
        let mut names = HashSet::new();

        for record in records {
            if schema.records.contains_key(&record.id) {
                return Err(Error::invalid_schema(format!(
                    "record type `{}` reuses {:?}",
                    record.name, record.id
                )));
            }

            if !names.insert(record.name.clone()) {
                return Err(Error::invalid_schema(format!(
                    "record type `{}` is declared more than once",
                    record.name
                )));
            }

            schema.records.insert(record.id, record);
        }

        for record in schema.records() {
            schema.verify_record(record)?;
        }

        Ok(schema)
    }

    /// Get a record type by ID
    pub fn record(&self, id: impl Into<RecordId>) -> &RecordType {
        self.records.get(&id.into()).expect("invalid record ID")
    }

    pub fn get(&self, id: impl Into<RecordId>) -> Option<&RecordType> {
        self.records.get(&id.into())
    }

    pub fn records(&self) -> impl ExactSizeIterator<Item = &RecordType> + '_ {
        self.records.values()
    }

    /// Get a field by ID
    pub fn field(&self, id: FieldId) -> &Field {
        self.record(id.record)
            .fields
            .get(id.index)
            .expect("invalid field ID")
    }

    fn verify_record(&self, record: &RecordType) -> Result<()> {
        let mut names = HashSet::new();

        for (index, field) in record.fields.iter().enumerate() {
            let full_name = format!("{}::{}", record.name, field.name.app_name);

            if field.id != record.id.field(index) {
                return Err(Error::invalid_schema(format!(
                    "field `{full_name}` has id {:?}, expected {:?}",
                    field.id,
                    record.id.field(index)
                )));
            }

            if !names.insert(field.name.app_name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "field `{full_name}` is declared more than once"
                )));
            }

            if let stmt::Type::List(item) = &field.ty {
                if item.is_list() {
                    return Err(Error::invalid_schema(format!(
                        "field `{full_name}` is a list of lists"
                    )));
                }
            }

            if let Some(target) = field.target() {
                if !self.records.contains_key(&target) {
                    return Err(Error::invalid_schema(format!(
                        "field `{full_name}` references a record type that was not registered \
                         with the schema"
                    )));
                }
            }

            if field.primary_key && record.primary_key != Some(field.id) {
                return Err(Error::invalid_schema(format!(
                    "field `{full_name}` is marked as primary key but `{}` declares a different key",
                    record.name
                )));
            }

            if field.auto_increment && !field.ty.is_integer() {
                return Err(Error::invalid_schema(format!(
                    "field `{full_name}` is auto_increment but is not an integer"
                )));
            }
        }

        if let Some(pk) = record.primary_key {
            let Some(field) = record.fields.get(pk.index).filter(|_| pk.record == record.id)
            else {
                return Err(Error::invalid_schema(format!(
                    "record type `{}` declares a primary key that is not one of its fields",
                    record.name
                )));
            };

            if !field.ty.is_primitive() {
                return Err(Error::invalid_schema(format!(
                    "primary key `{}::{}` must be a primitive type",
                    record.name, field.name.app_name
                )));
            }

            if field.nullable {
                return Err(Error::invalid_schema(format!(
                    "primary key `{}::{}` cannot be nullable",
                    record.name, field.name.app_name
                )));
            }
        }

        Ok(())
    }
}
