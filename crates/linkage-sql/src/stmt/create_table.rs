use linkage_core::{
    schema::db::{self, ColumnKind, TableId},
    Error, Result, Schema,
};

/// A `CREATE TABLE` statement
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub table: TableId,

    /// Name of the table
    pub name: String,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Composite primary key clause, used by join tables. A single key
    /// column is marked on its definition instead.
    pub primary_key: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: db::Type,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub references: Option<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
}

impl CreateTable {
    pub fn new(schema: &Schema, table: impl Into<TableId>) -> Result<CreateTable> {
        let table = schema.db.table(table);

        if schema.db.is_embedded_only(table.id) {
            return Err(Error::invalid_schema(format!(
                "`{}` is only stored embedded in other tables",
                table.name
            )));
        }

        let columns = schema
            .db
            .physical_columns(table)
            .into_iter()
            .map(|physical| {
                let references = match &schema.db.column(physical.column).kind {
                    ColumnKind::Foreign {
                        target,
                        target_column,
                    }
                    | ColumnKind::Join {
                        target,
                        target_column,
                        ..
                    } => Some(ForeignKey {
                        table: schema.db.table(*target).name.clone(),
                        column: schema.db.column(*target_column).name.clone(),
                    }),
                    _ => None,
                };

                ColumnDef {
                    name: physical.name,
                    ty: physical.storage_ty,
                    nullable: physical.nullable,
                    primary_key: physical.primary_key,
                    auto_increment: physical.auto_increment,
                    references,
                }
            })
            .collect();

        let primary_key = match table.as_join() {
            Some(join) => join
                .columns
                .iter()
                .map(|column| schema.db.column(*column).name.clone())
                .collect(),
            None => vec![],
        };

        Ok(CreateTable {
            table: table.id,
            name: table.name.clone(),
            columns,
            primary_key,
        })
    }
}
