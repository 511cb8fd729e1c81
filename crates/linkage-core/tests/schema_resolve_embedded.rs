use linkage_core::schema::{
    app::{RecordId, RecordType},
    db::{ColumnKind, Reference, Type},
    Schema,
};
use linkage_core::stmt;
use pretty_assertions::assert_eq;
use std_util::prelude::*;

const POINT: RecordId = RecordId(0);
const SHAPE: RecordId = RecordId(1);

fn make_point() -> RecordType {
    RecordType::new(POINT, "Point")
        .with_field("x", stmt::Type::F64)
        .with_field("y", stmt::Type::F64)
}

fn make_shape() -> RecordType {
    RecordType::new(SHAPE, "Shape")
        .with_auto_key("id", stmt::Type::I64)
        .with_field("origin", POINT)
        .with_optional("label", stmt::Type::String)
}

#[test]
fn unkeyed_record_is_flattened_into_owner() {
    let schema = assert_ok!(Schema::from_records([make_point(), make_shape()]));

    let points = schema.table_for(POINT);
    let shapes = schema.table_for(SHAPE);

    assert!(schema.db.is_embedded_only(points));
    assert!(!schema.db.is_embedded_only(shapes));

    let origin = shapes.column_by_name("origin").unwrap();
    assert_eq!(
        Some(&Reference::Embedded { target: points.id }),
        origin.as_reference()
    );
    assert_eq!(stmt::Type::Record(POINT), origin.ty);
    assert_eq!(None, origin.referenced);

    let physical = schema.db.physical_columns(shapes);
    let names = physical.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["id", "origin_x", "origin_y", "label"], names);

    let origin_x = &physical[1];
    assert_eq!(Some(origin.id), origin_x.embedded);
    assert_eq!(points.column_by_name("x").unwrap().id, origin_x.column);
    assert_eq!(Type::Float(8), origin_x.storage_ty);
    assert!(!origin_x.nullable);
    assert!(physical[3].nullable);
}

#[test]
fn optional_embedded_record_flattens_to_nullable_columns() {
    let shape = RecordType::new(SHAPE, "Shape")
        .with_auto_key("id", stmt::Type::I64)
        .with_optional("origin", POINT);

    let schema = assert_ok!(Schema::from_records([make_point(), shape]));
    let physical = schema.db.physical_columns(schema.table_for(SHAPE));

    assert!(physical[1..].iter().all(|column| column.nullable));
}

#[test]
fn list_of_unkeyed_records_synthesizes_foreign_key() {
    let order = RecordType::new(RecordId(0), "Order")
        .with_auto_key("id", stmt::Type::I64)
        .with_field("lines", stmt::Type::list(RecordId(1)));
    let line = RecordType::new(RecordId(1), "OrderLine")
        .with_field("sku", stmt::Type::String)
        .with_field("qty", stmt::Type::I32);

    let schema = assert_ok!(Schema::from_records([order, line]));

    let orders = schema.table_for(RecordId(0));
    let lines = schema.table_for(RecordId(1));
    assert_eq!("order_lines", lines.name);
    assert!(!schema.db.is_embedded_only(lines));

    let names = lines.columns().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["order_id", "sku", "qty"], names);

    let order_id = lines.column_by_name("order_id").unwrap();
    let reference = orders.column_by_name("lines").unwrap();

    assert!(!order_id.nullable);
    assert_eq!(None, order_id.source);
    assert_eq!(Some(reference.id), order_id.referenced);
    assert_eq!(
        Some(&Reference::Foreign { target: lines.id }),
        reference.as_reference()
    );

    // Rows of a dependent table are not embedded into the owner.
    let physical = schema.db.physical_columns(orders);
    assert_eq!(1, physical.len());
}

#[test]
fn unkeyed_record_with_back_link_gets_declared_foreign_key() {
    let order = RecordType::new(RecordId(0), "Order")
        .with_auto_key("id", stmt::Type::I64)
        .with_field("lines", stmt::Type::list(RecordId(1)));
    let line = RecordType::new(RecordId(1), "Line")
        .with_field("qty", stmt::Type::I32)
        .with_field("order", RecordId(0));

    let schema = assert_ok!(Schema::from_records([order, line]));
    let lines = schema.table_for(RecordId(1));

    let names = lines.columns().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["order_id", "qty"], names);

    let order_id = lines.column_by_name("order_id").unwrap();
    assert_eq!(
        "order",
        schema.field_for(order_id).unwrap().name.app_name
    );
}

#[test]
fn unkeyed_links_between_unkeyed_records_are_opaque() {
    let note = RecordType::new(RecordId(0), "Note")
        .with_field("text", stmt::Type::String)
        .with_field("meta", RecordId(1))
        .with_field("labels", stmt::Type::list(stmt::Type::String));
    let meta = RecordType::new(RecordId(1), "Meta").with_field("author", stmt::Type::String);

    let schema = assert_ok!(Schema::from_records([note, meta]));
    let notes = schema.table_for(RecordId(0));

    let meta = notes.column_by_name("meta").unwrap();
    assert!(meta.is_field());
    assert_eq!(Some(Type::Json), meta.storage_ty);

    let labels = notes.column_by_name("labels").unwrap();
    assert!(labels.is_field());
    assert_eq!(Some(Type::Json), labels.storage_ty);
}

#[test]
fn synthesized_foreign_keys_are_not_flattened() {
    let order = RecordType::new(RecordId(1), "Order")
        .with_auto_key("id", stmt::Type::I64)
        .with_field("stops", stmt::Type::list(POINT));
    let route = RecordType::new(RecordId(2), "Route")
        .with_auto_key("id", stmt::Type::I64)
        .with_field("start", POINT);

    let schema = assert_ok!(Schema::from_records([make_point(), order, route]));

    let points = schema.table_for(POINT);
    assert!(points.column_by_name("order_id").is_some());
    assert!(!schema.db.is_embedded_only(points));

    let physical = schema.db.physical_columns(schema.table_for(RecordId(2)));
    let names = physical.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["id", "start_x", "start_y"], names);
}

#[test]
fn embedded_record_linking_to_a_keyed_record_stays_embedded_only() {
    const USER: RecordId = RecordId(2);

    let point = make_point().with_field("owner", USER);
    let user = RecordType::new(USER, "User").with_auto_key("id", stmt::Type::I64);

    let schema = assert_ok!(Schema::from_records([point, make_shape(), user]));
    let points = schema.table_for(POINT);
    let users = schema.table_for(USER);

    assert!(schema.db.is_embedded_only(points));

    let physical = schema.db.physical_columns(schema.table_for(SHAPE));
    let names = physical.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(
        vec!["id", "origin_owner_id", "origin_x", "origin_y", "label"],
        names
    );

    let owner_id = schema.db.column(physical[1].column);
    assert!(matches!(
        owner_id.kind,
        ColumnKind::Foreign { target, .. } if target == users.id
    ));
}

#[test]
fn unkeyed_record_nobody_embeds_keeps_its_rows() {
    const ENTRY: RecordId = RecordId(0);
    const ORDER: RecordId = RecordId(1);

    let entry = RecordType::new(ENTRY, "AuditEntry")
        .with_field("note", stmt::Type::String)
        .with_field("order", ORDER);
    let order = RecordType::new(ORDER, "Order").with_auto_key("id", stmt::Type::I64);

    let schema = assert_ok!(Schema::from_records([entry, order]));

    assert!(!schema.db.is_embedded_only(schema.table_for(ENTRY)));
    assert!(!schema.db.is_embedded_only(schema.table_for(ORDER)));
}
