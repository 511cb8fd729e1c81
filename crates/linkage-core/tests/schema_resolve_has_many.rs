use linkage_core::schema::{
    app::{RecordId, RecordType},
    db::{ColumnKind, Reference, Type},
    Schema,
};
use linkage_core::stmt;
use pretty_assertions::assert_eq;
use std_util::prelude::*;

const AUTHOR: RecordId = RecordId(0);
const BOOK: RecordId = RecordId(1);

fn make_author(books: bool) -> RecordType {
    let author = RecordType::new(AUTHOR, "Author")
        .with_auto_key("id", stmt::Type::I64)
        .with_field("name", stmt::Type::String);

    if books {
        author.with_field("books", stmt::Type::list(BOOK))
    } else {
        author
    }
}

fn make_book() -> RecordType {
    RecordType::new(BOOK, "Book")
        .with_auto_key("id", stmt::Type::I64)
        .with_field("title", stmt::Type::String)
        .with_field("author", AUTHOR)
}

fn column_names(schema: &Schema, record: RecordId) -> Vec<&str> {
    schema
        .table_for(record)
        .columns()
        .map(|column| column.name.as_str())
        .collect()
}

#[test]
fn book_holds_foreign_key_to_author() {
    let schema = assert_ok!(Schema::from_records([make_author(false), make_book()]));

    let authors = schema.table_for(AUTHOR);
    let books = schema.table_for(BOOK);

    assert_eq!("authors", authors.name);
    assert_eq!("books", books.name);
    assert_eq!(vec!["id", "name"], column_names(&schema, AUTHOR));
    assert_eq!(vec!["id", "author_id", "title"], column_names(&schema, BOOK));

    let author_id = books.column_by_name("author_id").unwrap();
    assert_eq!(
        ColumnKind::Foreign {
            target: authors.id,
            target_column: authors.primary_key.unwrap(),
        },
        author_id.kind
    );
    assert_eq!(stmt::Type::I64, author_id.ty);
    assert_eq!(Some(Type::Integer(8)), author_id.storage_ty);
    assert!(!author_id.nullable);
    assert_eq!(None, author_id.referenced);
    assert_eq!(
        "author",
        schema.field_for(author_id).unwrap().name.app_name
    );
}

#[test]
fn back_reference_pairs_with_foreign_key() {
    let schema = assert_ok!(Schema::from_records([make_author(true), make_book()]));

    let authors = schema.table_for(AUTHOR);
    let books = schema.table_for(BOOK);

    assert_eq!(vec!["id", "name", "books"], column_names(&schema, AUTHOR));
    assert_eq!(vec!["id", "author_id", "title"], column_names(&schema, BOOK));

    let reference = authors.column_by_name("books").unwrap();
    let foreign = books.column_by_name("author_id").unwrap();

    assert_eq!(
        Some(&Reference::Foreign { target: books.id }),
        reference.as_reference()
    );
    assert_eq!(None, reference.storage_ty);
    assert_eq!(Some(foreign.id), reference.referenced);
    assert_eq!(Some(reference.id), foreign.referenced);
}

#[test]
fn declaration_order_does_not_change_layout() {
    let forward = assert_ok!(Schema::from_records([make_author(true), make_book()]));
    let backward = assert_ok!(Schema::from_records([make_book(), make_author(true)]));

    assert_eq!(column_names(&forward, AUTHOR), column_names(&backward, AUTHOR));
    assert_eq!(column_names(&forward, BOOK), column_names(&backward, BOOK));
}

#[test]
fn optional_link_gives_nullable_foreign_key() {
    let employee = RecordType::new(RecordId(0), "Employee")
        .with_auto_key("id", stmt::Type::I64)
        .with_optional("manager", RecordId(0));

    let schema = assert_ok!(Schema::from_records([employee]));
    let employees = schema.table_for(RecordId(0));

    assert_eq!(vec!["id", "manager_id"], column_names(&schema, RecordId(0)));

    let manager_id = employees.column_by_name("manager_id").unwrap();
    assert!(manager_id.nullable);
    assert_eq!(Some(employees.id), manager_id.target());
}

#[test]
fn self_reference_with_back_reference() {
    let employee = RecordType::new(RecordId(0), "Employee")
        .with_auto_key("id", stmt::Type::I64)
        .with_optional("manager", RecordId(0))
        .with_field("reports", stmt::Type::list(RecordId(0)));

    let schema = assert_ok!(Schema::from_records([employee]));
    let employees = schema.table_for(RecordId(0));

    assert_eq!(
        vec!["id", "manager_id", "reports"],
        column_names(&schema, RecordId(0))
    );

    let manager_id = employees.column_by_name("manager_id").unwrap();
    let reports = employees.column_by_name("reports").unwrap();
    assert_eq!(Some(reports.id), manager_id.referenced);
    assert_eq!(Some(manager_id.id), reports.referenced);
}

#[test]
fn table_names() {
    let author = make_author(false).with_table_name("writers");
    let category = RecordType::new(RecordId(1), "BookCategory").with_key("slug", stmt::Type::String);

    let schema = assert_ok!(Schema::from_records([author.clone(), category.clone()]));
    assert_eq!("writers", schema.table_for(AUTHOR).name);
    assert_eq!("book_categories", schema.table_for(RecordId(1)).name);

    let mut builder = Schema::builder();
    builder.table_name_prefix("app_");

    let app = assert_ok!(linkage_core::schema::app::Schema::from_records([
        author, category
    ]));
    let schema = assert_ok!(builder.build(app));
    assert_eq!("app_writers", schema.table_for(AUTHOR).name);
    assert_eq!("app_book_categories", schema.table_for(RecordId(1)).name);
}
