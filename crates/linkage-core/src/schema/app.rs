//! Application-level schema: the record types handed to the generator.

mod field;
pub use field::{Field, FieldId, FieldName};

mod operation;
pub use operation::Operation;

mod record;
pub use record::{RecordId, RecordType};

mod schema;
pub use schema::Schema;

use super::Name;
