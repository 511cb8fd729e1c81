use super::Generator;

use linkage_core::{
    schema::{
        self,
        app::{self, RecordType},
    },
    Result,
};
use linkage_sql::Flavor;

#[derive(Debug, Default)]
pub struct Builder {
    /// Record types, in declaration order
    records: Vec<RecordType>,

    /// Schema builder
    core: schema::Builder,

    flavor: Flavor,
}

impl Builder {
    pub fn register(&mut self, record: RecordType) -> &mut Self {
        self.records.push(record);
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.core.table_name_prefix(prefix);
        self
    }

    pub fn flavor(&mut self, flavor: Flavor) -> &mut Self {
        self.flavor = flavor;
        self
    }

    /// Resolves the registered record types and plans their statements.
    pub fn build(&mut self) -> Result<Generator> {
        let app = app::Schema::from_records(std::mem::take(&mut self.records))?;
        let schema = self.core.build(app)?;

        Generator::new(schema, self.flavor)
    }
}
