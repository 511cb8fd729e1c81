mod join;

mod relation;
pub use relation::{Relation, Shape, Side};

mod resolve;

use super::{
    app::{self, RecordId, RecordType},
    db::{self, Column, ColumnId, ColumnKind, Table, TableId, TableKind},
    Name,
};
use crate::{Error, Result};

use indexmap::IndexMap;
use log::debug;

/// Tracks the tables derived during one generation run.
///
/// Tables are created in two phases. [`Registry::table_for`] allocates a
/// table and its primary key column the first time a record type is seen,
/// without touching any other field. [`Registry::resolve_columns`] later
/// walks the record's fields and allocates the remaining columns, which may
/// add columns to peer tables and create join tables. Separating the phases
/// lets a field refer to a table whose own fields are not resolved yet, so
/// cyclic record graphs terminate.
#[derive(Debug)]
pub struct Registry<'a> {
    /// The record types being resolved
    app: &'a app::Schema,

    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,

    /// Tables as they are built, indexed by `TableId`
    tables: Vec<Table>,

    /// Maps record types to their tables
    records: IndexMap<RecordId, TableId>,

    /// Maps every table name, record or join, to its identifier
    table_lookup: IndexMap<String, TableId>,

    /// Join tables by name
    join_tables: IndexMap<String, TableId>,
}

impl<'a> Registry<'a> {
    pub fn new(app: &'a app::Schema) -> Registry<'a> {
        Registry {
            app,
            table_name_prefix: None,
            tables: vec![],
            records: IndexMap::new(),
            table_lookup: IndexMap::new(),
            join_tables: IndexMap::new(),
        }
    }

    pub fn with_table_name_prefix(mut self, prefix: Option<String>) -> Registry<'a> {
        self.table_name_prefix = prefix;
        self
    }

    pub fn app(&self) -> &'a app::Schema {
        self.app
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        &self.tables[id.into().0]
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Table> + '_ {
        self.tables.iter()
    }

    /// Returns the table for a record type, creating it if this is the
    /// first time the record type is seen.
    ///
    /// A new table only receives its primary key column. The remaining
    /// fields are allocated by [`Registry::resolve_columns`].
    pub fn table_for(&mut self, record: impl Into<RecordId>) -> Result<TableId> {
        let record = record.into();

        if let Some(id) = self.records.get(&record) {
            return Ok(*id);
        }

        let app = self.app;

        let Some(model) = app.get(record) else {
            return Err(Error::invalid_schema(format!(
                "{record:?} is not part of the schema"
            )));
        };

        let name = match &model.table_name {
            Some(table_name) => self.prefix_table_name(table_name),
            None => self.table_name_from_record(&model.name),
        };

        if let Some(existing) = self.table_lookup.get(&name) {
            let existing = &self.tables[existing.0];
            return Err(match existing.record() {
                Some(other) => Error::invalid_schema(format!(
                    "record types `{}` and `{}` both map to table `{name}`",
                    app.record(other).name,
                    model.name
                )),
                None => Error::join_table_collision(
                    &name,
                    format!("cannot also be used as the table for `{}`", model.name),
                ),
            });
        }

        let id = self.register_table(&name, TableKind::Record(record));
        self.records.insert(record, id);

        if let Some(pk) = model.primary_key_field() {
            let column = Column {
                id: ColumnId {
                    table: id,
                    index: 0,
                },
                name: pk.name.storage_name(),
                kind: ColumnKind::Field,
                ty: pk.ty.clone(),
                storage_ty: Some(db::Type::from_app(&pk.ty)),
                nullable: false,
                primary_key: true,
                auto_increment: pk.auto_increment,
                source: Some(pk.id),
                referenced: None,
            };

            let table = &mut self.tables[id.0];
            let column = table.push_column(column);
            table.primary_key = Some(column);
        }

        debug!("table `{name}` for record `{}`", model.name);

        Ok(id)
    }

    /// Creates tables for every record type and resolves all of their
    /// columns.
    ///
    /// Running this again on a resolved registry does nothing.
    pub fn resolve_all(&mut self) -> Result<()> {
        let app = self.app;

        for record in app.records() {
            self.table_for(record)?;
        }

        for record in app.records() {
            let table = self.table_for(record)?;
            self.resolve_columns(table)?;
        }

        Ok(())
    }

    pub fn into_schema(self) -> db::Schema {
        db::Schema {
            tables: self.tables,
            records: self.records,
            join_tables: self.join_tables,
        }
    }

    fn record_of(&self, table: TableId) -> Option<&'a RecordType> {
        self.tables[table.0].record().map(|id| self.app.record(id))
    }

    fn register_table(&mut self, name: &str, kind: TableKind) -> TableId {
        assert!(!self.table_lookup.contains_key(name));
        let id = TableId(self.tables.len());
        self.tables.push(Table::new(id, name.to_string(), kind));
        self.table_lookup.insert(name.to_string(), id);
        id
    }

    fn table_name_from_record(&self, record_name: &Name) -> String {
        self.prefix_table_name(&record_name.plural())
    }

    fn prefix_table_name(&self, name: &str) -> String {
        if let Some(prefix) = &self.table_name_prefix {
            format!("{prefix}{name}")
        } else {
            name.to_string()
        }
    }
}
