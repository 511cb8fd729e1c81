use super::{Flavor, Formatter, Params, ToSql};

use linkage_core::{schema::db, stmt};

/// A value bound as a parameter, cast to its column's storage type where
/// the flavor cannot infer it.
pub(super) struct Typed<'a>(pub(super) &'a stmt::Value, pub(super) db::Type);

impl ToSql for &stmt::Value {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}

impl ToSql for Typed<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let Typed(value, ty) = self;

        match f.serializer.flavor {
            // Columns of a VALUES list are typed from their first row, which
            // may be all NULL.
            Flavor::Postgresql => fmt!(f, value "::" ty),
            Flavor::Sqlite => fmt!(f, value),
        }
    }
}
