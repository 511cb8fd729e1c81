use super::{Registry, Relation, Shape, Side};
use crate::{
    schema::{
        app::{Field, FieldId, RecordType},
        db::{self, Column, ColumnId, ColumnKind, Reference, TableId},
    },
    Error, Result,
};

use log::{debug, trace};

impl<'a> Registry<'a> {
    /// Allocates columns for each field of the table's record type, in
    /// declaration order.
    ///
    /// Fields that already have a column are skipped. That covers fields
    /// resolved by an earlier call and fields whose column was created while
    /// resolving the other side of a link, so the call is idempotent.
    pub fn resolve_columns(&mut self, table: impl Into<TableId>) -> Result<()> {
        let table = table.into();

        let Some(record) = self.record_of(table) else {
            return Ok(());
        };

        for field in &record.fields {
            if self.is_resolved(table, field.id) {
                trace!("{}.{} already resolved", self.table(table).name, field.name.app_name);
                continue;
            }

            self.resolve_field(table, record, field)?;
        }

        Ok(())
    }

    fn is_resolved(&self, table: TableId, field: FieldId) -> bool {
        self.table(table)
            .columns()
            .any(|column| column.source == Some(field))
    }

    fn resolve_field(&mut self, this: TableId, record: &'a RecordType, field: &'a Field) -> Result<()> {
        let Some(target) = field.target() else {
            self.push_field_column(this, field)?;
            return Ok(());
        };

        let other = self.table_for(target)?;
        let pair = self.matching_field(this, record, field)?;

        let relation = Relation::classify(Shape {
            this_keyed: self.table(this).has_primary_key(),
            other_keyed: self.table(other).has_primary_key(),
            list: field.is_list(),
            pair: pair.map(Field::is_list),
        });

        debug!(
            "{}.{} => {relation:?} `{}`",
            self.table(this).name,
            field.name.app_name,
            self.table(other).name
        );

        match relation {
            Relation::Opaque => {
                self.push_field_column(this, field)?;
            }
            Relation::BelongsTo => self.belongs_to(this, field, other, pair)?,
            Relation::HasPaired => {
                let Some(pair) = pair else {
                    return Err(Error::ambiguous_relation(
                        &self.table(this).name,
                        &field.name.app_name,
                        "paired relation without a matching field",
                    ));
                };

                self.belongs_to(other, pair, this, Some(field))?;
            }
            Relation::HasSynthesized => {
                let reference = self.push_reference(this, field, Reference::Foreign { target: other })?;
                let prefix = record.name.snake_case();
                let foreign = self.foreign_column(other, this, &prefix, false, None, field)?;
                self.link(foreign, reference);
            }
            Relation::Embedded => {
                self.push_reference(this, field, Reference::Embedded { target: other })?;
            }
            Relation::ManyToMany => {
                let join = self.join_table(this, field, other, pair)?;
                let reference =
                    self.push_reference(this, field, Reference::Join { target: other, join })?;

                if let Some(pair) = pair {
                    let mirrored =
                        self.push_reference(other, pair, Reference::Join { target: this, join })?;
                    self.link(reference, mirrored);
                }
            }
            Relation::MissingKey(Side::This) => {
                return Err(Error::missing_primary_key(
                    &self.table(this).name,
                    &field.name.app_name,
                    format!(
                        "`{}` has no primary key, so it cannot link to a list of `{}` rows",
                        self.table(this).name,
                        self.table(other).name
                    ),
                ));
            }
            Relation::MissingKey(Side::Other) => {
                let pair_name = pair.map(|pair| pair.name.app_name.as_str()).unwrap_or("?");

                return Err(Error::missing_primary_key(
                    &self.table(this).name,
                    &field.name.app_name,
                    format!(
                        "`{}` has no primary key, so `{}.{pair_name}` cannot link to a list of \
                         `{}` rows",
                        self.table(other).name,
                        self.table(other).name,
                        self.table(this).name
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Finds the field on the linked record that points back at `record`.
    ///
    /// At most one field may point back, and if one does, `field` must be
    /// the only link from `record` to the linked record. Anything else
    /// cannot be paired unambiguously.
    fn matching_field(
        &self,
        this: TableId,
        record: &'a RecordType,
        field: &'a Field,
    ) -> Result<Option<&'a Field>> {
        let Some(target) = field.target() else {
            return Ok(None);
        };

        let other = self.app.record(target);
        let mut candidates = other
            .fields_targeting(record.id)
            .filter(|candidate| candidate.id != field.id);

        let Some(candidate) = candidates.next() else {
            return Ok(None);
        };

        if let Some(second) = candidates.next() {
            return Err(Error::ambiguous_relation(
                &self.table(this).name,
                &field.name.app_name,
                format!(
                    "`{}` links back through both `{}` and `{}`",
                    other.name, candidate.name.app_name, second.name.app_name
                ),
            ));
        }

        let sibling = record
            .fields_targeting(target)
            .find(|sibling| sibling.id != field.id && sibling.id != candidate.id);

        if let Some(sibling) = sibling {
            return Err(Error::ambiguous_relation(
                &self.table(this).name,
                &field.name.app_name,
                format!(
                    "`{}.{}` could pair with either `{}` or `{}`",
                    other.name, candidate.name.app_name, field.name.app_name, sibling.name.app_name
                ),
            ));
        }

        Ok(Some(candidate))
    }

    /// Allocates a foreign column for `field` on `holder`, pointing at
    /// `target`. If the target record has a matching field, it becomes the
    /// paired reference on `target`.
    fn belongs_to(
        &mut self,
        holder: TableId,
        field: &'a Field,
        target: TableId,
        pair: Option<&'a Field>,
    ) -> Result<()> {
        let prefix = field.name.storage_name();
        let foreign = self.foreign_column(
            holder,
            target,
            &prefix,
            field.nullable,
            Some(field.id),
            field,
        )?;

        if let Some(pair) = pair {
            let reference = self.push_reference(target, pair, Reference::Foreign { target: holder })?;
            self.link(foreign, reference);
        }

        Ok(())
    }

    fn foreign_column(
        &mut self,
        holder: TableId,
        target: TableId,
        prefix: &str,
        nullable: bool,
        source: Option<FieldId>,
        origin: &Field,
    ) -> Result<ColumnId> {
        let target_table = self.table(target);

        let Some(pk) = target_table.primary_key_column() else {
            return Err(Error::missing_primary_key(
                &self.table(holder).name,
                &origin.name.app_name,
                format!("`{}` has no primary key to reference", target_table.name),
            ));
        };

        let column = Column {
            id: ColumnId::placeholder(),
            name: format!("{prefix}_{}", pk.name),
            kind: ColumnKind::Foreign {
                target,
                target_column: pk.id,
            },
            ty: pk.ty.clone(),
            storage_ty: pk.storage_ty,
            nullable,
            primary_key: false,
            auto_increment: false,
            source,
            referenced: None,
        };

        self.push_column(holder, column)
    }

    fn push_field_column(&mut self, table: TableId, field: &Field) -> Result<ColumnId> {
        let column = Column {
            id: ColumnId::placeholder(),
            name: field.name.storage_name(),
            kind: ColumnKind::Field,
            ty: field.ty.clone(),
            storage_ty: Some(db::Type::from_app(&field.ty)),
            nullable: field.nullable,
            primary_key: false,
            auto_increment: field.auto_increment,
            source: Some(field.id),
            referenced: None,
        };

        self.push_column(table, column)
    }

    fn push_reference(&mut self, table: TableId, field: &Field, reference: Reference) -> Result<ColumnId> {
        let column = Column {
            id: ColumnId::placeholder(),
            name: field.name.storage_name(),
            kind: ColumnKind::Reference(reference),
            ty: field.ty.clone(),
            storage_ty: None,
            nullable: field.nullable,
            primary_key: false,
            auto_increment: false,
            source: Some(field.id),
            referenced: None,
        };

        self.push_column(table, column)
    }

    pub(super) fn push_column(&mut self, table: TableId, column: Column) -> Result<ColumnId> {
        let table = &mut self.tables[table.0];

        if table.column_by_name(&column.name).is_some() {
            return Err(Error::invalid_schema(format!(
                "duplicate column `{}.{}`",
                table.name, column.name
            )));
        }

        let id = if column.is_foreign() {
            table.push_foreign_column(column)
        } else {
            table.push_column(column)
        };

        trace!(
            "{}.{} placed at {:?}",
            table.name,
            table.column(id).name,
            table.position(id)
        );

        Ok(id)
    }

    /// Records two columns as each other's pair.
    fn link(&mut self, a: ColumnId, b: ColumnId) {
        self.tables[a.table.0].column_mut(a).referenced = Some(b);
        self.tables[b.table.0].column_mut(b).referenced = Some(a);
    }
}
