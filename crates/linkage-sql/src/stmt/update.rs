use super::{slot::field_name, FieldKind, RequestShape, Slot, Statement};

use linkage_core::{
    schema::db::{Column, PhysicalColumn, Reference, Table, TableId},
    stmt::{Value, ValueRecord},
    Error, Result, Schema,
};

use log::debug;

/// A batch update plan for one table.
///
/// Binding requests produces one `UPDATE` joined against a `VALUES` list
/// holding every request, followed by the cascading updates of dependent
/// tables. Each assignment keeps the stored value when the request supplies
/// null.
#[derive(Debug, Clone)]
pub struct Update {
    pub table: TableId,

    /// What a caller supplies per row
    pub request: RequestShape,

    /// Columns matching request rows to table rows. The primary key, or every
    /// foreign column of a dependent table.
    pub keys: Vec<Slot>,

    /// Columns in the `SET` clause
    pub assignments: Vec<Slot>,

    /// Updates issued against dependent tables after this one
    pub cascades: Vec<Cascade>,
}

/// A follow-up update of rows owned by the updated table.
#[derive(Debug, Clone)]
pub struct Cascade {
    /// Request field holding the dependent rows
    pub field: String,

    /// True if the field holds a list of rows
    pub list: bool,

    pub update: Update,

    /// How each field of the dependent request is filled in
    pub bindings: Vec<(String, Binding)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The owner's primary key value
    OwnerKey,

    /// The named field of the nested value
    Nested(String),
}

/// A bound `UPDATE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRows {
    pub table: TableId,
    pub keys: Vec<Slot>,
    pub assignments: Vec<Slot>,

    /// One row per request: key values followed by assignment values
    pub rows: Vec<Vec<Value>>,
}

impl Update {
    pub fn new(schema: &Schema, table: impl Into<TableId>) -> Result<Update> {
        let table = schema.db.table(table);
        let request = RequestShape::update(schema, table)?;
        let physical = schema.db.physical_columns(table);

        let keys = key_slots(schema, table, &physical)?;

        let assignments = physical
            .iter()
            .filter(|column| !column.primary_key && !column.auto_increment)
            .filter(|column| table.has_primary_key() || !column.is_foreign(&schema.db))
            .map(|column| Slot::from_physical(schema, column))
            .collect::<Vec<_>>();

        let mut cascades = vec![];

        for column in table.columns() {
            let Some(Reference::Foreign { target }) = column.as_reference() else {
                continue;
            };

            if schema.db.table(*target).has_primary_key() {
                continue;
            }

            let Some(dependent) = dependent_of(schema, table, column) else {
                debug!(
                    "not cascading `{}.{}`: `{}` is also owned by another table",
                    table.name,
                    column.name,
                    schema.db.table(*target).name
                );
                continue;
            };

            let update = Update::new(schema, dependent)?;

            let bindings = update
                .request
                .fields
                .iter()
                .map(|field| {
                    let binding = match field.kind {
                        FieldKind::Key(id) | FieldKind::Column(id) if Some(id) == column.referenced => {
                            Binding::OwnerKey
                        }
                        _ => Binding::Nested(field.name.clone()),
                    };
                    (field.name.clone(), binding)
                })
                .collect();

            cascades.push(Cascade {
                field: field_name(schema, column.id),
                list: column.ty.is_list(),
                update,
                bindings,
            });
        }

        debug!(
            "update plan `{}`: {} keys, {} assignments, {} cascades",
            table.name,
            keys.len(),
            assignments.len(),
            cascades.len()
        );

        Ok(Update {
            table: table.id,
            request,
            keys,
            assignments,
            cascades,
        })
    }

    /// Binds a batch of requests, returning the statements to run in order.
    ///
    /// An empty batch yields no statements. The table's own update comes
    /// first and is omitted when there is nothing to assign; cascades follow.
    pub fn bind(&self, requests: &[ValueRecord]) -> Result<Vec<Statement>> {
        if requests.is_empty() {
            return Ok(vec![]);
        }

        for request in requests {
            self.request.validate(request)?;
        }

        let mut statements = vec![];

        if !self.assignments.is_empty() {
            let rows: Vec<Vec<Value>> = requests
                .iter()
                .map(|request| {
                    self.keys
                        .iter()
                        .chain(&self.assignments)
                        .map(|slot| slot.extract(request))
                        .collect::<Vec<_>>()
                })
                .collect();

            statements.push(
                UpdateRows {
                    table: self.table,
                    keys: self.keys.clone(),
                    assignments: self.assignments.clone(),
                    rows,
                }
                .into(),
            );
        }

        for cascade in &self.cascades {
            let mut nested = vec![];

            for request in requests {
                let owner_key = self
                    .keys
                    .first()
                    .map(|slot| slot.extract(request))
                    .unwrap_or_default();

                cascade.expand(&self.request.name, &owner_key, request, &mut nested)?;
            }

            statements.extend(cascade.update.bind(&nested)?);
        }

        Ok(statements)
    }
}

impl Cascade {
    /// Maps the nested value of `request` to requests against the dependent
    /// table.
    fn expand(
        &self,
        owner: &str,
        owner_key: &Value,
        request: &ValueRecord,
        dst: &mut Vec<ValueRecord>,
    ) -> Result<()> {
        let items = match request.get(&self.field) {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::Record(item)) if !self.list => vec![item],
            Some(Value::List(items)) if self.list => items
                .iter()
                .map(|item| {
                    item.as_record().ok_or_else(|| {
                        Error::invalid_request(format!(
                            "`{owner}.{}` expects records, got {item:?}",
                            self.field
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(value) => {
                return Err(Error::invalid_request(format!(
                    "`{owner}.{}` expects {}, got {value:?}",
                    self.field,
                    if self.list { "a list" } else { "a record" }
                )))
            }
        };

        for item in items {
            for name in item.names() {
                let known = self
                    .bindings
                    .iter()
                    .any(|(_, binding)| *binding == Binding::Nested(name.to_string()));

                if !known {
                    return Err(Error::invalid_request(format!(
                        "`{owner}.{}` has no field `{name}`",
                        self.field
                    )));
                }
            }

            let nested: ValueRecord = self
                .bindings
                .iter()
                .map(|(name, binding)| {
                    let value = match binding {
                        Binding::OwnerKey => owner_key.clone(),
                        Binding::Nested(field) => item.get(field).cloned().unwrap_or_default(),
                    };
                    (name.clone(), value)
                })
                .collect();

            dst.push(nested);
        }

        Ok(())
    }
}

/// Returns the dependent table whose rows `column` owns, if updates can
/// cascade through it. A dependent row that also requires a link to a
/// different table has more than one owner and is left alone.
pub(super) fn dependent_of<'a>(schema: &'a Schema, table: &Table, column: &Column) -> Option<&'a Table> {
    let Some(Reference::Foreign { target }) = column.as_reference() else {
        return None;
    };

    let dependent = schema.db.table(*target);

    if dependent.has_primary_key() {
        return None;
    }

    let shared = dependent.foreign_columns().any(|other| {
        Some(other.id) != column.referenced && !other.nullable && other.target() != Some(table.id)
    });

    if shared {
        None
    } else {
        Some(dependent)
    }
}

/// Columns identifying rows: the primary key, or every foreign column when
/// the table has none.
pub(super) fn key_slots(schema: &Schema, table: &Table, physical: &[PhysicalColumn]) -> Result<Vec<Slot>> {
    let keys = physical
        .iter()
        .filter(|column| match table.primary_key {
            Some(pk) => column.embedded.is_none() && column.column == pk,
            None => column.is_foreign(&schema.db),
        })
        .map(|column| Slot::from_physical(schema, column))
        .collect::<Vec<_>>();

    if keys.is_empty() {
        return Err(Error::missing_primary_key(
            &table.name,
            "*",
            "no primary key or foreign column to match rows on",
        ));
    }

    Ok(keys)
}
