use super::{Column, ColumnId, ColumnKind, JoinTable};
use crate::schema::app::RecordId;

use std::fmt;

/// A database table
#[derive(Debug, Clone)]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Name of the table
    pub name: String,

    /// Where the table came from
    pub kind: TableKind,

    /// The primary key column. Join tables and dependent tables have none.
    pub primary_key: Option<ColumnId>,

    /// Column storage, indexed by `ColumnId::index`. Ids stay stable when
    /// columns are inserted in the middle of the table.
    columns: Vec<Column>,

    /// Positional order of `columns`
    layout: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableKind {
    /// Derived from a record type
    Record(RecordId),

    /// Synthesized for a many-to-many association
    Join(JoinTable),
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct TableId(pub usize);

impl Table {
    pub(crate) fn new(id: TableId, name: String, kind: TableKind) -> Self {
        Self {
            id,
            name,
            kind,
            primary_key: None,
            columns: vec![],
            layout: vec![],
        }
    }

    pub fn record(&self) -> Option<RecordId> {
        match &self.kind {
            TableKind::Record(id) => Some(*id),
            TableKind::Join(_) => None,
        }
    }

    pub fn as_join(&self) -> Option<&JoinTable> {
        match &self.kind {
            TableKind::Join(join) => Some(join),
            TableKind::Record(_) => None,
        }
    }

    pub fn is_join(&self) -> bool {
        matches!(self.kind, TableKind::Join(_))
    }

    pub fn has_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }

    pub fn primary_key_column(&self) -> Option<&Column> {
        self.primary_key.map(|id| self.column(id))
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        assert_eq!(self.id, id.table, "column {id:?} belongs to another table");
        &self.columns[id.index]
    }

    pub(crate) fn column_mut(&mut self, id: ColumnId) -> &mut Column {
        assert_eq!(self.id, id.table, "column {id:?} belongs to another table");
        &mut self.columns[id.index]
    }

    /// Columns in positional order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.layout.iter().map(|index| &self.columns[*index])
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns().find(|column| column.name == name)
    }

    pub fn foreign_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns().filter(|column| column.is_foreign())
    }

    /// Position of a column within the table's layout.
    pub fn position(&self, id: ColumnId) -> Option<usize> {
        self.layout.iter().position(|index| *index == id.index)
    }

    /// Appends a column at the end of the layout.
    pub(crate) fn push_column(&mut self, column: Column) -> ColumnId {
        let position = self.layout.len();
        self.insert_column(position, column)
    }

    /// Inserts a foreign column right after the last foreign column. With no
    /// foreign columns yet it goes right after the primary key, or first.
    pub(crate) fn push_foreign_column(&mut self, column: Column) -> ColumnId {
        debug_assert!(matches!(column.kind, ColumnKind::Foreign { .. }));

        let last_foreign = self
            .layout
            .iter()
            .rposition(|index| self.columns[*index].is_foreign());

        let position = match last_foreign {
            Some(last) => last + 1,
            None => match self.primary_key {
                Some(pk) => self.position(pk).map(|pos| pos + 1).unwrap_or(0),
                None => 0,
            },
        };

        self.insert_column(position, column)
    }

    fn insert_column(&mut self, position: usize, mut column: Column) -> ColumnId {
        let id = self.next_column_id();
        column.id = id;
        self.columns.push(column);
        self.layout.insert(position, id.index);
        id
    }

    pub(crate) fn next_column_id(&self) -> ColumnId {
        ColumnId {
            table: self.id,
            index: self.columns.len(),
        }
    }
}

impl TableId {
    pub(crate) fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl From<&Table> for TableId {
    fn from(value: &Table) -> Self {
        value.id
    }
}

impl From<&TableId> for TableId {
    fn from(value: &TableId) -> Self {
        *value
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
