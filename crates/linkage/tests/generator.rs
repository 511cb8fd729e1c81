use linkage::{
    stmt::{Type, Value, ValueRecord},
    Flavor, Generator, Operation, RecordId, RecordType,
};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

const AUTHOR: RecordId = RecordId(0);
const BOOK: RecordId = RecordId(1);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_author() -> RecordType {
    RecordType::new(AUTHOR, "Author")
        .with_auto_key("id", Type::I64)
        .with_field("name", Type::String)
}

fn make_book() -> RecordType {
    RecordType::new(BOOK, "Book")
        .with_auto_key("id", Type::I64)
        .with_field("title", Type::String)
        .with_field("author", AUTHOR)
}

fn texts(sql: Vec<linkage::Sql>) -> Vec<String> {
    sql.into_iter().map(|sql| sql.text).collect()
}

#[test]
fn records_without_operations_get_the_defaults() {
    init_logging();

    let generator = assert_ok!(Generator::builder()
        .register(make_author())
        .register(make_book())
        .build());

    for record in [AUTHOR, BOOK] {
        let plan = generator.plan(record).unwrap();
        assert_eq!(Operation::DEFAULTS.to_vec(), plan.operations());
    }

    let update = generator.plan(BOOK).unwrap().update_request().unwrap();
    assert_eq!("UpdateBookRequest", update.name);
}

#[test]
fn referenced_tables_are_created_first() {
    // Book is declared first but references Author
    let book = RecordType::new(RecordId(0), "Book")
        .with_auto_key("id", Type::I64)
        .with_field("author", RecordId(1));
    let author = RecordType::new(RecordId(1), "Author").with_auto_key("id", Type::I64);

    let generator = assert_ok!(Generator::builder().register(book).register(author).build());
    let ddl = texts(generator.create_tables());

    assert_eq!(2, ddl.len());
    assert!(ddl[0].starts_with("CREATE TABLE \"authors\""));
    assert!(ddl[1].starts_with("CREATE TABLE \"books\""));
}

#[test]
fn join_tables_are_created_after_their_participants() {
    const POST: RecordId = RecordId(0);
    const TAG: RecordId = RecordId(1);

    let post = RecordType::new(POST, "Post")
        .with_auto_key("id", Type::I64)
        .with_field("tags", Type::list(TAG));
    let tag = RecordType::new(TAG, "Tag")
        .with_auto_key("id", Type::I64)
        .with_field("posts", Type::list(POST));

    let generator = assert_ok!(Generator::builder().register(post).register(tag).build());

    let ddl = texts(generator.create_tables());
    assert_eq!(3, ddl.len());
    assert!(ddl[2].starts_with("CREATE TABLE \"posts_tags\""));

    let join = generator
        .plans()
        .find(|plan| generator.schema().db.table(plan.table).is_join())
        .unwrap();
    assert_eq!(vec![Operation::CreateTable], join.operations());
}

#[test]
fn reference_cycles_still_create_every_table() {
    let a = RecordType::new(RecordId(0), "Node")
        .with_auto_key("id", Type::I64)
        .with_optional("edge", RecordId(1));
    let b = RecordType::new(RecordId(1), "Edge")
        .with_auto_key("id", Type::I64)
        .with_optional("port", RecordId(2));
    let c = RecordType::new(RecordId(2), "Port")
        .with_auto_key("id", Type::I64)
        .with_optional("node", RecordId(0));

    let generator = assert_ok!(Generator::builder().register(a).register(b).register(c).build());
    let ddl = texts(generator.create_tables());

    assert_eq!(3, ddl.len());
    assert!(ddl[0].starts_with("CREATE TABLE \"ports\""));
    assert!(ddl[1].starts_with("CREATE TABLE \"edges\""));
    assert!(ddl[2].starts_with("CREATE TABLE \"nodes\""));
}

#[test]
fn requested_operations_limit_the_plan() {
    let author = make_author().with_operation(Operation::Update);

    let generator = assert_ok!(Generator::builder()
        .register(author)
        .register(make_book())
        .build());

    let plan = generator.plan(AUTHOR).unwrap();
    assert_eq!(vec![Operation::Update], plan.operations());
    assert!(plan.insert_request().is_none());

    // Authors are not created, so only books are
    assert_eq!(1, generator.create_tables().len());

    let err = assert_err!(generator.insert(AUTHOR, &[ValueRecord::new().with("name", "Ada")]));
    assert!(err.is_invalid_request());
    assert_eq!(
        "invalid request: `authors` does not generate Insert statements",
        err.to_string()
    );
}

#[test]
fn embedded_records_get_no_plan() {
    const SHAPE: RecordId = RecordId(0);
    const POINT: RecordId = RecordId(1);

    let shape = RecordType::new(SHAPE, "Shape")
        .with_auto_key("id", Type::I64)
        .with_field("origin", POINT);
    let point = RecordType::new(POINT, "Point")
        .with_field("x", Type::F64)
        .with_field("y", Type::F64);

    let generator = assert_ok!(Generator::builder()
        .register(shape.clone())
        .register(point.clone())
        .build());

    assert!(generator.plan(POINT).is_none());
    assert_eq!(1, generator.create_tables().len());

    let err = assert_err!(generator.update(POINT, &[]));
    assert!(err.is_invalid_request());

    let err = assert_err!(Generator::builder()
        .register(shape)
        .register(point.with_operation(Operation::Insert))
        .build());
    assert!(err.is_invalid_schema());
}

#[test]
fn tables_linked_from_embedded_records_are_created_first() {
    const SHAPE: RecordId = RecordId(0);
    const POINT: RecordId = RecordId(1);
    const USER: RecordId = RecordId(2);

    let shape = RecordType::new(SHAPE, "Shape")
        .with_auto_key("id", Type::I64)
        .with_field("origin", POINT);
    let point = RecordType::new(POINT, "Point")
        .with_field("x", Type::F64)
        .with_field("owner", USER);
    let user = RecordType::new(USER, "User").with_auto_key("id", Type::I64);

    let generator = assert_ok!(Generator::builder()
        .register(shape)
        .register(point)
        .register(user)
        .build());

    assert!(generator.plan(POINT).is_none());

    let ddl = texts(generator.create_tables());
    assert_eq!(2, ddl.len());
    assert!(ddl[0].starts_with("CREATE TABLE \"users\""));
    assert!(ddl[1].starts_with("CREATE TABLE \"shapes\""));
    assert!(ddl[1].contains("\"origin_owner_id\" BIGINT NOT NULL REFERENCES \"users\" (\"id\")"));
}

#[test]
fn update_renders_with_the_chosen_flavor() {
    let generator = assert_ok!(Generator::builder()
        .register(make_author())
        .register(make_book())
        .table_name_prefix("app_")
        .flavor(Flavor::Sqlite)
        .build());

    assert_eq!(Flavor::Sqlite, generator.flavor());

    let sql = assert_ok!(generator.update(
        AUTHOR,
        &[ValueRecord::new().with("id", 1).with("name", "Ada")]
    ));

    assert_eq!(1, sql.len());
    assert_eq!(
        "WITH \"updated\" (\"id\", \"name\") AS (VALUES (?1, ?2)) \
         UPDATE \"app_authors\" SET \"name\" = COALESCE(\"updated\".\"name\", \"app_authors\".\"name\") \
         FROM \"updated\" WHERE \"app_authors\".\"id\" = \"updated\".\"id\";",
        sql[0].text
    );
    assert_eq!(vec![Value::I64(1), Value::from("Ada")], sql[0].params);
    assert_eq!(sql[0].text, sql[0].to_string());

    assert!(assert_ok!(generator.update(AUTHOR, &[])).is_empty());
}

#[test]
fn insert_and_select_round_out_the_plan() {
    let generator = assert_ok!(Generator::builder()
        .register(make_author())
        .register(make_book())
        .build());

    let insert = assert_ok!(generator.insert(
        BOOK,
        &[ValueRecord::new().with("title", "Dune").with("author", 1)]
    ));
    assert_eq!(
        "INSERT INTO \"books\" (\"author_id\", \"title\") VALUES ($1, $2);",
        insert[0].text
    );

    let select = assert_ok!(generator.select(AUTHOR, &[ValueRecord::new().with("id", 1)]));
    assert_eq!(
        "SELECT \"id\", \"name\" FROM \"authors\" WHERE \"id\" IN ($1);",
        select[0].text
    );
}

#[test]
fn unregistered_records_are_rejected() {
    let generator = assert_ok!(Generator::builder().register(make_author()).build());

    let err = assert_err!(generator.select(RecordId(9), &[]));
    assert!(err.is_invalid_request());
}
