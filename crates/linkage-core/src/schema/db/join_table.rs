use super::{ColumnId, TableId};

/// A synthesized many-to-many association between two tables.
///
/// The name is derived from both participants, so resolving the association
/// from either side finds the same table.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTable {
    /// The participating tables, ordered by table name. Both entries are
    /// the same table for a self-referential association.
    pub participants: [TableId; 2],

    /// One join column per participant, in the same order.
    pub columns: [ColumnId; 2],
}

impl JoinTable {
    /// Returns true if the join table associates `a` with `b`, in either
    /// order.
    pub fn links(&self, a: TableId, b: TableId) -> bool {
        let [left, right] = self.participants;
        (left == a && right == b) || (left == b && right == a)
    }

    pub fn is_self_referential(&self) -> bool {
        self.participants[0] == self.participants[1]
    }

    /// The join column pointing at `table`. For self-referential joins this
    /// is the first column.
    pub fn column_for(&self, table: TableId) -> Option<ColumnId> {
        self.participants
            .iter()
            .position(|participant| *participant == table)
            .map(|index| self.columns[index])
    }
}
