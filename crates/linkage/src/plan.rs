use linkage_core::{
    schema::{app::Operation, db::TableId},
    Result, Schema,
};
use linkage_sql::stmt::{CreateTable, Insert, RequestShape, Select, Update};

/// The statements generated for one table.
#[derive(Debug, Clone)]
pub struct TablePlan {
    pub table: TableId,

    pub create_table: Option<CreateTable>,
    pub insert: Option<Insert>,
    pub select: Option<Select>,
    pub update: Option<Update>,
}

impl TablePlan {
    pub(crate) fn new(schema: &Schema, table: TableId, operations: &[Operation]) -> Result<TablePlan> {
        let mut plan = TablePlan {
            table,
            create_table: None,
            insert: None,
            select: None,
            update: None,
        };

        for operation in operations {
            match operation {
                Operation::CreateTable => plan.create_table = Some(CreateTable::new(schema, table)?),
                Operation::Insert => plan.insert = Some(Insert::new(schema, table)?),
                Operation::Select => plan.select = Some(Select::new(schema, table)?),
                Operation::Update => plan.update = Some(Update::new(schema, table)?),
            }
        }

        Ok(plan)
    }

    pub fn operations(&self) -> Vec<Operation> {
        let mut operations = vec![];

        if self.create_table.is_some() {
            operations.push(Operation::CreateTable);
        }
        if self.insert.is_some() {
            operations.push(Operation::Insert);
        }
        if self.select.is_some() {
            operations.push(Operation::Select);
        }
        if self.update.is_some() {
            operations.push(Operation::Update);
        }

        operations
    }

    pub fn update_request(&self) -> Option<&RequestShape> {
        self.update.as_ref().map(|update| &update.request)
    }

    pub fn insert_request(&self) -> Option<&RequestShape> {
        self.insert.as_ref().map(|insert| &insert.request)
    }
}
