pub mod app;

mod builder;
pub use builder::Builder;

pub mod db;

mod name;
pub use name::Name;

pub mod registry;
pub use registry::Registry;

mod verify;

use app::{Field, RecordId, RecordType};
use db::{ColumnId, Table};

use crate::Result;

/// A fully resolved schema: the record types that were declared and the
/// tables derived from them.
#[derive(Debug)]
pub struct Schema {
    /// Application-level schema
    pub app: app::Schema,

    /// Database-level schema
    pub db: db::Schema,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Shorthand for building with the default options.
    pub fn from_records(records: impl IntoIterator<Item = RecordType>) -> Result<Schema> {
        Builder::default().build(app::Schema::from_records(records)?)
    }

    /// Returns the table derived from the given record type.
    pub fn table_for(&self, record: impl Into<RecordId>) -> &Table {
        let id = record.into();
        self.db
            .table_for(id)
            .unwrap_or_else(|| panic!("no table for {id:?}"))
    }

    /// Returns the record type a table was derived from. Join tables have
    /// none.
    pub fn record_for(&self, table: &Table) -> Option<&RecordType> {
        table.record().map(|id| self.app.record(id))
    }

    /// Returns the field a column was allocated for, if any.
    pub fn field_for(&self, column: impl Into<ColumnId>) -> Option<&Field> {
        self.db
            .column(column)
            .source
            .map(|field| self.app.field(field))
    }

    pub(crate) fn verify(&self) -> Result<()> {
        verify::Verify { schema: self }.verify()
    }
}
