//! Derives a relational schema from linked record types and generates the
//! SQL statements that read and write it.
//!
//! ```ignore
//! let generator = Generator::builder()
//!     .register(author)
//!     .register(book)
//!     .flavor(Flavor::Sqlite)
//!     .build()?;
//!
//! for ddl in generator.create_tables() {
//!     println!("{ddl}");
//! }
//! ```

pub mod generator;
pub use generator::Generator;

mod plan;
pub use plan::TablePlan;

mod sql;
pub use sql::Sql;

pub use linkage_core::{
    schema::{
        self,
        app::{Operation, RecordId, RecordType},
    },
    stmt, Error, Result, Schema,
};

pub use linkage_sql::Flavor;
