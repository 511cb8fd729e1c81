use super::{value::Typed, Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{self, Statement};

impl ToSql for &Statement {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

/// A parenthesized row of values
pub(super) struct Row<'a> {
    pub(super) values: &'a [stmt::Value],
    pub(super) slots: Vec<&'a stmt::Slot>,
    pub(super) typed: bool,
}

impl ToSql for Row<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let Row {
            values,
            slots,
            typed,
        } = self;

        fmt!(f, "(");

        for (i, (value, slot)) in values.iter().zip(slots).enumerate() {
            if i > 0 {
                fmt!(f, ", ");
            }

            if typed {
                Typed(value, slot.storage_ty).to_sql(f);
            } else {
                value.to_sql(f);
            }
        }

        fmt!(f, ")");
    }
}

impl ToSql for &stmt::InsertRows {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let serializer = f.serializer;
        let table = serializer.table_name(self.table);

        if self.columns.is_empty() {
            fmt!(f, "INSERT INTO " table " DEFAULT VALUES");
            return;
        }

        let columns = Comma(self.columns.iter().map(|slot| Ident(&slot.name)));
        let rows = Comma(self.rows.iter().map(|row| Row {
            values: row,
            slots: self.columns.iter().collect(),
            typed: false,
        }));

        fmt!(f, "INSERT INTO " table " (" columns ") VALUES " rows);
    }
}

impl ToSql for &stmt::SelectRows {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let serializer = f.serializer;
        let table = serializer.table_name(self.table);
        let columns = Comma(self.columns.iter().map(Ident));

        fmt!(f, "SELECT " columns " FROM " table " WHERE ");

        if let [key] = &self.keys[..] {
            let values = Comma(self.rows.iter().filter_map(|row| row.first()));
            fmt!(f, Ident(&key.name) " IN (" values ")");
        } else {
            let keys = Comma(self.keys.iter().map(|slot| Ident(&slot.name)));
            let rows = Comma(self.rows.iter().map(|row| Row {
                values: row,
                slots: self.keys.iter().collect(),
                typed: false,
            }));
            fmt!(f, "(" keys ") IN (VALUES " rows ")");
        }
    }
}
