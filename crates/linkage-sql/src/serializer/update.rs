use super::{statement::Row, Comma, Delimited, Formatter, Ident, Params, Period, ToSql};

use crate::{stmt, Flavor};

/// Name of the relation holding the request rows.
const UPDATED: Ident<&str> = Ident("updated");

/// `"col" = COALESCE("updated"."col", "table"."col")`
struct Assignment<'a> {
    table: Ident<&'a str>,
    slot: &'a stmt::Slot,
}

/// `"table"."col" = "updated"."col"`
struct KeyMatch<'a> {
    table: Ident<&'a str>,
    slot: &'a stmt::Slot,
}

impl ToSql for Assignment<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let column = Ident(&self.slot.name[..]);
        let updated = Period([UPDATED, column]);
        let existing = Period([self.table, column]);

        fmt!(f, column " = COALESCE(" updated ", " existing ")");
    }
}

impl ToSql for KeyMatch<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let column = Ident(&self.slot.name[..]);
        let existing = Period([self.table, column]);
        let updated = Period([UPDATED, column]);

        fmt!(f, existing " = " updated);
    }
}

impl ToSql for &stmt::UpdateRows {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let serializer = f.serializer;
        let table = serializer.table_name(self.table);

        let slots = || self.keys.iter().chain(&self.assignments);
        let columns = Comma(slots().map(|slot| Ident(&slot.name)));
        let assignments = Comma(
            self.assignments
                .iter()
                .map(|slot| Assignment { table, slot }),
        );
        let filter = Delimited(self.keys.iter().map(|slot| KeyMatch { table, slot }), " AND ");
        let rows = Comma(self.rows.iter().map(|row| Row {
            values: row,
            slots: slots().collect(),
            typed: true,
        }));

        match serializer.flavor {
            Flavor::Postgresql => fmt!(
                f, "UPDATE " table " SET " assignments " FROM (VALUES " rows ") AS " UPDATED " (" columns ") WHERE " filter
            ),
            Flavor::Sqlite => fmt!(
                f, "WITH " UPDATED " (" columns ") AS (VALUES " rows ") UPDATE " table " SET " assignments " FROM " UPDATED " WHERE " filter
            ),
        }
    }
}
