use super::{RequestShape, Slot, Statement};

use linkage_core::{
    schema::db::TableId,
    stmt::{Value, ValueRecord},
    Error, Result, Schema,
};

/// A batch insert plan for one table.
#[derive(Debug, Clone)]
pub struct Insert {
    pub table: TableId,
    pub request: RequestShape,

    /// Inserted columns, in table order. Database assigned keys are left out.
    pub columns: Vec<Slot>,
}

/// A bound `INSERT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRows {
    pub table: TableId,
    pub columns: Vec<Slot>,
    pub rows: Vec<Vec<Value>>,
}

impl Insert {
    pub fn new(schema: &Schema, table: impl Into<TableId>) -> Result<Insert> {
        let table = schema.db.table(table);

        if schema.db.is_embedded_only(table.id) {
            return Err(Error::invalid_schema(format!(
                "`{}` is only stored embedded in other tables",
                table.name
            )));
        }

        let request = RequestShape::insert(schema, table)?;

        let columns = schema
            .db
            .physical_columns(table)
            .iter()
            .filter(|column| !column.auto_increment)
            .map(|column| Slot::from_physical(schema, column))
            .collect();

        Ok(Insert {
            table: table.id,
            request,
            columns,
        })
    }

    /// Binds a batch of rows. An empty batch yields no statement.
    ///
    /// A table whose columns are all assigned by the database takes one
    /// `DEFAULT VALUES` statement per row.
    pub fn bind(&self, rows: &[ValueRecord]) -> Result<Vec<Statement>> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        for row in rows {
            self.request.validate(row)?;
        }

        let rows = rows
            .iter()
            .map(|row| self.columns.iter().map(|slot| slot.extract(row)).collect::<Vec<_>>())
            .collect::<Vec<Vec<Value>>>();

        if self.columns.is_empty() {
            return Ok(rows
                .into_iter()
                .map(|row| self.statement(vec![row]))
                .collect());
        }

        Ok(vec![self.statement(rows)])
    }

    fn statement(&self, rows: Vec<Vec<Value>>) -> Statement {
        InsertRows {
            table: self.table,
            columns: self.columns.clone(),
            rows,
        }
        .into()
    }
}
