/// The relational shape implied by a field that links to another record
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Neither side has a key. The linked value is stored whole in a single
    /// column.
    Opaque,

    /// Both sides are keyed and list-valued. Rows are associated through a
    /// join table.
    ManyToMany,

    /// This side is keyed and the matching field on the other side holds a
    /// singular link back. That field becomes the foreign column.
    HasPaired,

    /// The field holds a singular link to a keyed record and becomes a
    /// foreign column on this side.
    BelongsTo,

    /// This side is keyed, the other side is not and has no matching field.
    /// A foreign column is synthesized on the other table.
    HasSynthesized,

    /// A singular link from a keyed record to an unkeyed one with no
    /// matching field. The linked record's columns are flattened into this
    /// table.
    Embedded,

    /// The relationship needs a primary key the named side does not have.
    MissingKey(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    This,
    Other,
}

/// The structural facts a relationship is classified from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// The table owning the field has a primary key
    pub this_keyed: bool,

    /// The linked table has a primary key
    pub other_keyed: bool,

    /// The field is list-valued
    pub list: bool,

    /// `Some(is_list)` if the linked record has a matching field pointing
    /// back.
    pub pair: Option<bool>,
}

impl Relation {
    pub fn classify(shape: Shape) -> Relation {
        let Shape {
            this_keyed,
            other_keyed,
            list,
            pair,
        } = shape;

        match (this_keyed, other_keyed, list, pair) {
            (false, false, _, _) => Relation::Opaque,
            (true, true, true, None | Some(true)) => Relation::ManyToMany,
            (true, true, true, Some(false)) => Relation::HasPaired,
            (_, true, false, _) => Relation::BelongsTo,
            (true, false, _, Some(false)) => Relation::HasPaired,
            (true, false, true, None) => Relation::HasSynthesized,
            (true, false, false, None) => Relation::Embedded,
            (true, false, _, Some(true)) => Relation::MissingKey(Side::Other),
            (false, true, true, _) => Relation::MissingKey(Side::This),
        }
    }
}
