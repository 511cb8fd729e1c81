use super::{update::key_slots, Slot, Statement};

use linkage_core::{
    schema::db::TableId,
    stmt::{Value, ValueRecord},
    Error, Result, Schema,
};

/// Loads rows of one table by key.
#[derive(Debug, Clone)]
pub struct Select {
    pub table: TableId,

    /// Returned column names
    pub columns: Vec<String>,

    /// Columns matched against the supplied keys
    pub keys: Vec<Slot>,
}

/// A bound `SELECT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectRows {
    pub table: TableId,
    pub columns: Vec<String>,
    pub keys: Vec<Slot>,

    /// One row of key values per requested row
    pub rows: Vec<Vec<Value>>,
}

impl Select {
    pub fn new(schema: &Schema, table: impl Into<TableId>) -> Result<Select> {
        let table = schema.db.table(table);
        let physical = schema.db.physical_columns(table);
        let keys = key_slots(schema, table, &physical)?;

        Ok(Select {
            table: table.id,
            columns: physical.into_iter().map(|column| column.name).collect(),
            keys,
        })
    }

    /// Binds a batch of keys. Each key names every key field. An empty batch
    /// yields no statement.
    pub fn bind(&self, keys: &[ValueRecord]) -> Result<Vec<Statement>> {
        if keys.is_empty() {
            return Ok(vec![]);
        }

        let mut rows = Vec::with_capacity(keys.len());

        for key in keys {
            for name in key.names() {
                if !self.keys.iter().any(|slot| slot.field == name) {
                    return Err(Error::invalid_request(format!(
                        "`{name}` is not a key field"
                    )));
                }
            }

            let row = self
                .keys
                .iter()
                .map(|slot| slot.extract(key))
                .collect::<Vec<_>>();

            if let Some(index) = row.iter().position(Value::is_null) {
                return Err(Error::invalid_request(format!(
                    "key field `{}` is required",
                    self.keys[index].field
                )));
            }

            rows.push(row);
        }

        Ok(vec![SelectRows {
            table: self.table,
            columns: self.columns.clone(),
            keys: self.keys.clone(),
            rows,
        }
        .into()])
    }
}
