//! Statement plans and the bound statements they produce.
//!
//! A plan (`CreateTable`, `Insert`, `Select`, `Update`) is computed once per
//! table from the resolved schema. Binding a batch of requests to a plan
//! yields [`Statement`]s ready for the [`Serializer`](crate::Serializer).

mod create_table;
pub use create_table::{ColumnDef, CreateTable, ForeignKey};

mod insert;
pub use insert::{Insert, InsertRows};

mod request;
pub use request::{FieldKind, RequestField, RequestShape};

mod select;
pub use select::{Select, SelectRows};

mod slot;
pub use slot::Slot;

mod update;
pub use update::{Binding, Cascade, Update, UpdateRows};

pub use linkage_core::stmt::{Type, Value, ValueRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    Insert(InsertRows),
    Select(SelectRows),
    Update(UpdateRows),
}

impl Statement {
    pub fn is_update(&self) -> bool {
        matches!(self, Statement::Update(_))
    }

    /// The table the statement operates on.
    pub fn table(&self) -> linkage_core::schema::db::TableId {
        match self {
            Statement::CreateTable(stmt) => stmt.table,
            Statement::Insert(stmt) => stmt.table,
            Statement::Select(stmt) => stmt.table,
            Statement::Update(stmt) => stmt.table,
        }
    }

    /// Number of rows bound to the statement.
    pub fn row_count(&self) -> usize {
        match self {
            Statement::CreateTable(_) => 0,
            Statement::Insert(stmt) => stmt.rows.len(),
            Statement::Select(stmt) => stmt.rows.len(),
            Statement::Update(stmt) => stmt.rows.len(),
        }
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Statement::CreateTable(value)
    }
}

impl From<InsertRows> for Statement {
    fn from(value: InsertRows) -> Self {
        Statement::Insert(value)
    }
}

impl From<SelectRows> for Statement {
    fn from(value: SelectRows) -> Self {
        Statement::Select(value)
    }
}

impl From<UpdateRows> for Statement {
    fn from(value: UpdateRows) -> Self {
        Statement::Update(value)
    }
}
