use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::CreateTable {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let name = Ident(&self.name);

        fmt!(f, "CREATE TABLE " name " (");

        for (index, column) in self.columns.iter().enumerate() {
            fmt!(f, "\n    " column);
            if index < self.columns.len() - 1 {
                fmt!(f, ",");
            }
        }

        if !self.primary_key.is_empty() {
            let columns = Comma(self.primary_key.iter().map(Ident));
            fmt!(f, ",\n    PRIMARY KEY (" columns ")");
        }

        fmt!(f, "\n)");
    }
}

impl ToSql for &stmt::ColumnDef {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let name = Ident(&self.name);
        let sqlite = f.serializer.is_sqlite();

        match (self.primary_key, self.auto_increment) {
            // SQLite only auto increments an `INTEGER PRIMARY KEY` column
            (true, true) if sqlite => fmt!(f, name " INTEGER PRIMARY KEY AUTOINCREMENT"),
            (true, true) => fmt!(f, name " " self.ty " GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY"),
            (true, false) => fmt!(f, name " " self.ty " PRIMARY KEY"),
            (false, _) if self.nullable => fmt!(f, name " " self.ty),
            (false, _) => fmt!(f, name " " self.ty " NOT NULL"),
        }

        if let Some(references) = &self.references {
            let table = Ident(&references.table);
            let column = Ident(&references.column);
            fmt!(f, " REFERENCES " table " (" column ")");
        }
    }
}
