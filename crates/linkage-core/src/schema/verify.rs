use super::{
    db::{ColumnKind, Table},
    Schema,
};
use crate::{Error, Result};

use std::collections::HashSet;

pub(super) struct Verify<'a> {
    pub(super) schema: &'a Schema,
}

impl Verify<'_> {
    pub(super) fn verify(&self) -> Result<()> {
        for table in self.schema.db.tables() {
            self.verify_references_are_mutual(table)?;
            self.verify_foreign_columns_are_contiguous(table)?;
            self.verify_physical_names_are_unique(table)?;
            self.verify_foreign_targets(table)?;
        }

        Ok(())
    }

    fn verify_references_are_mutual(&self, table: &Table) -> Result<()> {
        for column in table.columns() {
            let Some(referenced) = column.referenced else {
                continue;
            };

            let peer = self.schema.db.column(referenced);

            if peer.referenced != Some(column.id) {
                return Err(Error::invalid_schema(format!(
                    "`{}.{}` references `{}` but the link is not mutual",
                    table.name,
                    column.name,
                    peer.name
                )));
            }
        }

        Ok(())
    }

    fn verify_foreign_columns_are_contiguous(&self, table: &Table) -> Result<()> {
        let positions = table
            .columns()
            .enumerate()
            .filter(|(_, column)| column.is_foreign())
            .map(|(position, _)| position)
            .collect::<Vec<_>>();

        if let (Some(first), Some(last)) = (positions.first(), positions.last()) {
            if last - first + 1 != positions.len() {
                return Err(Error::invalid_schema(format!(
                    "foreign columns of `{}` are not contiguous",
                    table.name
                )));
            }
        }

        Ok(())
    }

    fn verify_physical_names_are_unique(&self, table: &Table) -> Result<()> {
        let mut names = HashSet::new();

        for column in self.schema.db.physical_columns(table) {
            if !names.insert(column.name.clone()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate column `{}.{}`",
                    table.name, column.name
                )));
            }
        }

        Ok(())
    }

    fn verify_foreign_targets(&self, table: &Table) -> Result<()> {
        for column in table.columns() {
            let (ColumnKind::Foreign { target, target_column }
            | ColumnKind::Join {
                target,
                target_column,
                ..
            }) = &column.kind
            else {
                continue;
            };

            if self.schema.db.table(*target).primary_key != Some(*target_column) {
                return Err(Error::invalid_schema(format!(
                    "`{}.{}` does not reference the primary key of `{}`",
                    table.name,
                    column.name,
                    self.schema.db.table(*target).name
                )));
            }
        }

        Ok(())
    }
}
