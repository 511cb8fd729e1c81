use super::{Flavor, Formatter, Params, ToSql};

use linkage_core::schema::db;

impl ToSql for db::Type {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let ty = match f.serializer.flavor {
            Flavor::Postgresql => match self {
                db::Type::Boolean => "BOOLEAN",
                db::Type::Integer(1..=2) => "SMALLINT",
                db::Type::Integer(3..=4) => "INTEGER",
                db::Type::Integer(_) => "BIGINT",
                db::Type::Float(1..=4) => "REAL",
                db::Type::Float(_) => "DOUBLE PRECISION",
                db::Type::Text => "TEXT",
                db::Type::Uuid => "UUID",
                db::Type::Blob => "BYTEA",
                db::Type::Timestamp => "TIMESTAMPTZ",
                db::Type::Json => "JSONB",
            },
            Flavor::Sqlite => match self {
                db::Type::Boolean | db::Type::Integer(_) => "INTEGER",
                db::Type::Float(_) => "REAL",
                db::Type::Blob => "BLOB",
                db::Type::Text | db::Type::Uuid | db::Type::Timestamp | db::Type::Json => "TEXT",
            },
        };

        fmt!(f, ty);
    }
}
