mod column;
pub use column::{Column, ColumnId, ColumnKind, Reference};

mod join_table;
pub use join_table::JoinTable;

mod physical;
pub use physical::PhysicalColumn;

mod schema;
pub use schema::Schema;

mod table;
pub use table::{Table, TableId, TableKind};

mod ty;
pub use ty::Type;
