use super::{app, Registry, Schema};
use crate::Result;

use log::debug;

#[derive(Debug, Default, Clone)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Derives the tables for every record type in `app`.
    pub fn build(&self, app: app::Schema) -> Result<Schema> {
        let mut registry =
            Registry::new(&app).with_table_name_prefix(self.table_name_prefix.clone());

        // Allocate every table before resolving any column so that
        // classification sees each record's key regardless of declaration
        // order.
        registry.resolve_all()?;

        let db = registry.into_schema();
        debug!(
            "resolved {} tables ({} join tables)",
            db.tables.len(),
            db.join_tables.len()
        );

        let schema = Schema { app, db };
        schema.verify()?;
        Ok(schema)
    }
}
