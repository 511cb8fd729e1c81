use super::Serializer;

use linkage_core::schema::db;

/// SQL dialect a statement is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    /// `$n` placeholders; batch updates join `FROM (VALUES ..)`
    #[default]
    Postgresql,

    /// `?n` placeholders; batch updates read from a `WITH` clause
    Sqlite,
}

impl<'a> Serializer<'a> {
    pub fn new(schema: &'a db::Schema, flavor: Flavor) -> Serializer<'a> {
        Serializer { schema, flavor }
    }

    pub fn sqlite(schema: &'a db::Schema) -> Serializer<'a> {
        Serializer::new(schema, Flavor::Sqlite)
    }

    pub fn postgresql(schema: &'a db::Schema) -> Serializer<'a> {
        Serializer::new(schema, Flavor::Postgresql)
    }

    pub(super) fn is_sqlite(&self) -> bool {
        self.flavor == Flavor::Sqlite
    }
}
