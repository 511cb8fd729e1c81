use super::Registry;
use crate::{
    schema::{
        app::Field,
        db::{Column, ColumnId, ColumnKind, JoinTable, TableId, TableKind},
    },
    Error, Result,
};

use log::debug;

impl<'a> Registry<'a> {
    /// Returns the join table associating `this` with `other`, creating it
    /// the first time the association is resolved.
    ///
    /// The name is derived from both table names (sorted), so resolving the
    /// association from either side returns the same table. A
    /// self-referential association is named after the table and the first
    /// declared of `field` and `pair`.
    pub fn join_table(
        &mut self,
        this: TableId,
        field: &'a Field,
        other: TableId,
        pair: Option<&'a Field>,
    ) -> Result<TableId> {
        let (name, participants, column_names) = self.join_layout(this, field, other, pair)?;

        if let Some(existing) = self.join_tables.get(&name) {
            let existing = self.table(*existing);

            let Some(join) = existing.as_join() else {
                panic!("`{name}` is registered as a join table but is not one");
            };

            if join.links(this, other) {
                debug!("reusing join table `{name}`");
                return Ok(existing.id);
            }

            let [a, b] = join.participants;
            return Err(Error::join_table_collision(
                &name,
                format!(
                    "already joins `{}` and `{}`, cannot also join `{}` and `{}`",
                    self.table(a).name,
                    self.table(b).name,
                    self.table(this).name,
                    self.table(other).name
                ),
            ));
        }

        if let Some(existing) = self.table_lookup.get(&name) {
            return Err(Error::join_table_collision(
                &name,
                format!(
                    "joining `{}` and `{}` clashes with an existing table `{}`",
                    self.table(this).name,
                    self.table(other).name,
                    self.table(*existing).name
                ),
            ));
        }

        let id = self.register_table(
            &name,
            TableKind::Join(JoinTable {
                participants,
                columns: [ColumnId::placeholder(); 2],
            }),
        );

        let mut columns = [ColumnId::placeholder(); 2];

        for (i, column_name) in column_names.into_iter().enumerate() {
            let target = participants[i];
            let peer = participants[1 - i];

            let Some(pk) = self.table(target).primary_key_column() else {
                return Err(Error::missing_primary_key(
                    &self.table(this).name,
                    &field.name.app_name,
                    format!("`{}` has no primary key to join on", self.table(target).name),
                ));
            };

            let column = Column {
                id: ColumnId::placeholder(),
                name: column_name,
                kind: ColumnKind::Join {
                    target,
                    target_column: pk.id,
                    peer,
                },
                ty: pk.ty.clone(),
                storage_ty: pk.storage_ty,
                nullable: false,
                primary_key: false,
                auto_increment: false,
                source: None,
                referenced: None,
            };

            columns[i] = self.push_column(id, column)?;
        }

        if let TableKind::Join(join) = &mut self.tables[id.0].kind {
            join.columns = columns;
        }

        self.join_tables.insert(name.clone(), id);
        debug!(
            "join table `{name}` for `{}` and `{}`",
            self.table(this).name,
            self.table(other).name
        );

        Ok(id)
    }

    /// Derives the join table name, its participants in column order, and
    /// the name of each join column.
    fn join_layout(
        &self,
        this: TableId,
        field: &Field,
        other: TableId,
        pair: Option<&Field>,
    ) -> Result<(String, [TableId; 2], [String; 2])> {
        let column_name = |table: TableId, prefix: &str| -> Result<String> {
            match self.table(table).primary_key_column() {
                Some(pk) => Ok(format!("{prefix}_{}", pk.name)),
                None => Err(Error::missing_primary_key(
                    &self.table(this).name,
                    &field.name.app_name,
                    format!("`{}` has no primary key to join on", self.table(table).name),
                )),
            }
        };

        let record_name = |table: TableId| {
            self.record_of(table)
                .map(|record| record.name.snake_case())
                .unwrap_or_else(|| self.table(table).name.clone())
        };

        if this == other {
            let first = match pair {
                Some(pair) if pair.id.index < field.id.index => pair,
                _ => field,
            };

            let field_name = first.name.storage_name();
            let name = format!("{}_{field_name}", self.table(this).name);
            let columns = [
                column_name(this, &record_name(this))?,
                column_name(this, &std_util::str::singularize(&field_name))?,
            ];

            return Ok((name, [this, this], columns));
        }

        let (a, b) = if self.table(this).name <= self.table(other).name {
            (this, other)
        } else {
            (other, this)
        };

        let name = format!("{}_{}", self.table(a).name, self.table(b).name);
        let columns = [
            column_name(a, &record_name(a))?,
            column_name(b, &record_name(b))?,
        ];

        Ok((name, [a, b], columns))
    }
}
