use super::{Column, ColumnId, PhysicalColumn, Reference, Table, TableId};
use crate::schema::app::RecordId;

use indexmap::IndexMap;

#[derive(Debug, Default, Clone)]
pub struct Schema {
    /// All tables, indexed by `TableId`
    pub tables: Vec<Table>,

    /// Maps each record type to its table
    pub records: IndexMap<RecordId, TableId>,

    /// Join tables by name
    pub join_tables: IndexMap<String, TableId>,
}

impl Schema {
    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        self.table(id.table).column(id)
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        self.tables.get(id.into().0).expect("invalid table ID")
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Table> + '_ {
        self.tables.iter()
    }

    pub fn table_for(&self, record: impl Into<RecordId>) -> Option<&Table> {
        self.records
            .get(&record.into())
            .map(|table| self.table(*table))
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn join_table(&self, name: &str) -> Option<&Table> {
        self.join_tables.get(name).map(|table| self.table(*table))
    }

    /// True for record tables whose rows only ever exist flattened into the
    /// tables that embed them. Such a table has no primary key and no table
    /// links to it through a foreign or join reference. Its own foreign
    /// columns do not give it rows when some other table embeds it.
    pub fn is_embedded_only(&self, table: impl Into<TableId>) -> bool {
        let table = self.table(table);

        if table.is_join() || table.has_primary_key() {
            return false;
        }

        let mut embedded = false;

        for reference in self
            .tables
            .iter()
            .flat_map(|table| table.columns())
            .filter_map(|column| column.as_reference())
        {
            match reference {
                Reference::Embedded { target } if *target == table.id => embedded = true,
                Reference::Foreign { target } | Reference::Join { target, .. }
                    if *target == table.id =>
                {
                    return false
                }
                _ => {}
            }
        }

        embedded || table.foreign_columns().next().is_none()
    }

    /// The stored columns of a table in positional order. Embedded references
    /// are flattened into `<reference>_<column>`; references resolved through
    /// another table are skipped.
    pub fn physical_columns(&self, table: impl Into<TableId>) -> Vec<PhysicalColumn> {
        let table = self.table(table);
        let mut physical = vec![];

        for column in table.columns() {
            if let Some(storage_ty) = column.storage_ty {
                physical.push(PhysicalColumn::stored(column, storage_ty));
                continue;
            }

            let Some(Reference::Embedded { target }) = column.as_reference() else {
                continue;
            };

            for leaf in self.table(*target).columns() {
                // Synthesized foreign columns belong to the embedded table's
                // own rows, not to the embedding record.
                if leaf.is_foreign() && leaf.source.is_none() {
                    continue;
                }

                if let Some(storage_ty) = leaf.storage_ty {
                    physical.push(PhysicalColumn::flattened(column, leaf, storage_ty));
                }
            }
        }

        physical
    }
}
