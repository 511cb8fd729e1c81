mod builder;
pub use builder::Builder;

use crate::{Sql, TablePlan};

use indexmap::{IndexMap, IndexSet};
use linkage_core::{
    schema::{
        app::{Operation, RecordId},
        db::{self, ColumnKind, Table, TableId},
    },
    stmt::ValueRecord,
    Error, Result, Schema,
};
use linkage_sql::{stmt::Statement, Flavor, Serializer};
use log::debug;

/// Generated statements for a resolved schema.
///
/// Every table that owns rows gets a [`TablePlan`] holding the operations
/// its record type requests, or all of [`Operation::DEFAULTS`] when it
/// requests none. Join tables only get their `CREATE TABLE`. Tables that are
/// only stored embedded in other tables get nothing.
#[derive(Debug)]
pub struct Generator {
    schema: Schema,
    flavor: Flavor,
    plans: IndexMap<TableId, TablePlan>,

    /// Tables in the order their `CREATE TABLE` statements must run
    ddl_order: Vec<TableId>,
}

impl Generator {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(schema: Schema, flavor: Flavor) -> Result<Generator> {
        let mut plans = IndexMap::new();

        for table in schema.db.tables() {
            let operations = operations(&schema, table)?;

            if operations.is_empty() {
                debug!("no statements for `{}`", table.name);
                continue;
            }

            debug!("planning `{}`: {operations:?}", table.name);
            plans.insert(table.id, TablePlan::new(&schema, table.id, &operations)?);
        }

        let ddl_order = ddl_order(
            &schema.db,
            plans
                .values()
                .filter(|plan| plan.create_table.is_some())
                .map(|plan| plan.table),
        );

        Ok(Generator {
            schema,
            flavor,
            plans,
            ddl_order,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn plans(&self) -> impl Iterator<Item = &TablePlan> + '_ {
        self.plans.values()
    }

    /// The plan of the table derived from `record`, if it has one.
    pub fn plan(&self, record: impl Into<RecordId>) -> Option<&TablePlan> {
        let table = self.schema.db.table_for(record.into())?;
        self.plans.get(&table.id)
    }

    /// `CREATE TABLE` statements for every planned table. Referenced tables
    /// are created before the tables referencing them; tables in a reference
    /// cycle keep their declaration order.
    pub fn create_tables(&self) -> Vec<Sql> {
        let serializer = self.serializer();

        self.ddl_order
            .iter()
            .filter_map(|table| self.plans[table].create_table.clone())
            .map(|stmt| Sql::render(&serializer, &Statement::from(stmt)))
            .collect()
    }

    pub fn insert(&self, record: impl Into<RecordId>, rows: &[ValueRecord]) -> Result<Vec<Sql>> {
        let plan = self.table_plan(record.into())?;
        let Some(insert) = &plan.insert else {
            return Err(self.not_generated(plan, Operation::Insert));
        };

        self.render(insert.bind(rows)?)
    }

    pub fn select(&self, record: impl Into<RecordId>, keys: &[ValueRecord]) -> Result<Vec<Sql>> {
        let plan = self.table_plan(record.into())?;
        let Some(select) = &plan.select else {
            return Err(self.not_generated(plan, Operation::Select));
        };

        self.render(select.bind(keys)?)
    }

    /// Renders a batch update followed by its cascades. An empty batch
    /// renders nothing.
    pub fn update(&self, record: impl Into<RecordId>, requests: &[ValueRecord]) -> Result<Vec<Sql>> {
        let plan = self.table_plan(record.into())?;
        let Some(update) = &plan.update else {
            return Err(self.not_generated(plan, Operation::Update));
        };

        self.render(update.bind(requests)?)
    }

    fn table_plan(&self, record: RecordId) -> Result<&TablePlan> {
        let Some(table) = self.schema.db.table_for(record) else {
            return Err(Error::invalid_request(format!("{record:?} is not registered")));
        };

        match self.plans.get(&table.id) {
            Some(plan) => Ok(plan),
            None => Err(Error::invalid_request(format!(
                "`{}` is only stored embedded in other tables",
                table.name
            ))),
        }
    }

    fn not_generated(&self, plan: &TablePlan, operation: Operation) -> Error {
        Error::invalid_request(format!(
            "`{}` does not generate {operation:?} statements",
            self.schema.db.table(plan.table).name
        ))
    }

    fn render(&self, statements: Vec<Statement>) -> Result<Vec<Sql>> {
        let serializer = self.serializer();

        Ok(statements
            .iter()
            .map(|stmt| Sql::render(&serializer, stmt))
            .collect())
    }

    fn serializer(&self) -> Serializer<'_> {
        Serializer::new(&self.schema.db, self.flavor)
    }
}

/// The operations to generate for a table.
fn operations(schema: &Schema, table: &Table) -> Result<Vec<Operation>> {
    let Some(record) = schema.record_for(table) else {
        return Ok(vec![Operation::CreateTable]);
    };

    if schema.db.is_embedded_only(table.id) {
        if !record.operations.is_empty() {
            return Err(Error::invalid_schema(format!(
                "`{}` requests {:?} but is only stored embedded in other tables",
                record.name, record.operations
            )));
        }

        return Ok(vec![]);
    }

    if record.operations.is_empty() {
        Ok(Operation::DEFAULTS.to_vec())
    } else {
        Ok(record.operations.clone())
    }
}

fn ddl_order(schema: &db::Schema, tables: impl Iterator<Item = TableId>) -> Vec<TableId> {
    let tables: IndexSet<TableId> = tables.collect();
    let mut order = IndexSet::new();
    let mut visiting = IndexSet::new();

    for table in &tables {
        visit(schema, *table, &tables, &mut visiting, &mut order);
    }

    order.into_iter().collect()
}

fn visit(
    schema: &db::Schema,
    table: TableId,
    planned: &IndexSet<TableId>,
    visiting: &mut IndexSet<TableId>,
    order: &mut IndexSet<TableId>,
) {
    if order.contains(&table) || !visiting.insert(table) {
        return;
    }

    // Foreign columns flattened in from embedded records count too.
    for physical in schema.physical_columns(table) {
        let (ColumnKind::Foreign { target, .. } | ColumnKind::Join { target, .. }) =
            schema.column(physical.column).kind
        else {
            continue;
        };

        if target != table && planned.contains(&target) {
            visit(schema, target, planned, visiting, order);
        }
    }

    order.insert(table);
}
