use linkage_core::schema::app::{RecordId, RecordType};
use linkage_core::{stmt as core_stmt, Schema};
use linkage_sql::stmt::{FieldKind, RequestShape, ValueRecord};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

const SHAPE: RecordId = RecordId(0);
const POINT: RecordId = RecordId(1);
const LAYER: RecordId = RecordId(2);

fn make_schema() -> Schema {
    let shape = RecordType::new(SHAPE, "Shape")
        .with_auto_key("id", core_stmt::Type::I64)
        .with_field("label", core_stmt::Type::String)
        .with_field("origin", POINT)
        .with_field("layer", LAYER)
        .with_field("tags", core_stmt::Type::list(core_stmt::Type::String));

    let point = RecordType::new(POINT, "Point")
        .with_field("x", core_stmt::Type::F64)
        .with_field("y", core_stmt::Type::F64);

    let layer = RecordType::new(LAYER, "Layer")
        .with_key("name", core_stmt::Type::String)
        .with_field("visible", core_stmt::Type::Bool);

    assert_ok!(Schema::from_records([shape, point, layer]))
}

#[test]
fn update_request_renders_as_a_struct() {
    let schema = make_schema();
    let request = assert_ok!(RequestShape::update(&schema, schema.table_for(SHAPE)));

    assert_eq!(
        "struct UpdateShapeRequest {\n    \
             id: i64,\n    \
             layer: Option<String>,\n    \
             label: Option<String>,\n    \
             origin: Option<Point>,\n    \
             tags: Option<Vec<String>>,\n\
         }",
        request.to_string()
    );
}

#[test]
fn field_kinds_follow_their_columns() {
    let schema = make_schema();
    let shapes = schema.table_for(SHAPE);
    let request = assert_ok!(RequestShape::update(&schema, shapes));

    let id = request.field("id").unwrap();
    assert_eq!(FieldKind::Key(shapes.primary_key.unwrap()), id.kind);
    assert!(!id.nullable);

    // The foreign column takes the key type of the layer table
    let layer = request.field("layer").unwrap();
    assert_eq!(core_stmt::Type::String, layer.ty);
    assert!(matches!(layer.kind, FieldKind::Column(_)));

    let origin = request.field("origin").unwrap();
    assert_eq!(core_stmt::Type::Record(POINT), origin.ty);
    assert!(matches!(origin.kind, FieldKind::Embedded(_)));
    assert!(origin.nullable);

    assert_eq!(vec!["id"], request.keys().map(|field| field.name.as_str()).collect::<Vec<_>>());
}

#[test]
fn insert_request_keeps_column_nullability() {
    let schema = make_schema();
    let request = assert_ok!(RequestShape::insert(&schema, schema.table_for(SHAPE)));

    assert_eq!("InsertShapeRequest", request.name);
    assert!(request.field("id").is_none());
    assert!(!request.field("label").unwrap().nullable);

    let layers = assert_ok!(RequestShape::insert(&schema, schema.table_for(LAYER)));
    let name = layers.field("name").unwrap();
    assert!(matches!(name.kind, FieldKind::Key(_)));
    assert!(!name.nullable);
}

#[test]
fn validation() {
    let schema = make_schema();
    let request = assert_ok!(RequestShape::update(&schema, schema.table_for(SHAPE)));

    assert_ok!(request.validate(&ValueRecord::new().with("id", 1).with("label", "circle")));

    let err = assert_err!(request.validate(&ValueRecord::new().with("label", "circle")));
    assert_eq!(
        "invalid request: `UpdateShapeRequest.id` is required",
        err.to_string()
    );

    let err = assert_err!(request.validate(&ValueRecord::new().with("id", 1).with("radius", 2.0)));
    assert_eq!(
        "invalid request: `UpdateShapeRequest` has no field `radius`",
        err.to_string()
    );

    let err = assert_err!(request.validate(&ValueRecord::new().with("id", 1).with("origin", 3)));
    assert_eq!(
        "invalid request: `UpdateShapeRequest.origin` expects Point, got I64(3)",
        err.to_string()
    );
}

#[test]
fn embedded_fields_follow_the_request_kind() {
    let schema = make_schema();

    let update = assert_ok!(RequestShape::update(&schema, schema.table_for(SHAPE)));
    let origin = update.field("origin").unwrap();
    let names = origin.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["x", "y"], names);
    assert!(origin.fields.iter().all(|field| field.nullable));
    assert!(update.field("label").unwrap().fields.is_empty());

    let insert = assert_ok!(RequestShape::insert(&schema, schema.table_for(SHAPE)));
    assert!(insert.field("origin").unwrap().fields.iter().all(|field| !field.nullable));

    let request = ValueRecord::new()
        .with("label", "circle")
        .with("layer", "base")
        .with("origin", ValueRecord::new().with("x", 1.0));
    let err = assert_err!(insert.validate(&request));
    assert_eq!(
        "invalid request: `InsertShapeRequest.origin.y` is required",
        err.to_string()
    );
}

#[test]
fn join_tables_take_no_requests() {
    const POST: RecordId = RecordId(0);
    const TAG: RecordId = RecordId(1);

    let post = RecordType::new(POST, "Post")
        .with_auto_key("id", core_stmt::Type::I64)
        .with_field("tags", core_stmt::Type::list(TAG));
    let tag = RecordType::new(TAG, "Tag")
        .with_auto_key("id", core_stmt::Type::I64)
        .with_field("posts", core_stmt::Type::list(POST));

    let schema = assert_ok!(Schema::from_records([post, tag]));
    let join = schema.db.join_table("posts_tags").unwrap();

    let err = assert_err!(RequestShape::update(&schema, join));
    assert!(err.is_invalid_schema());

    // Neither side exposes the association as an updatable field
    let posts = assert_ok!(RequestShape::update(&schema, schema.table_for(POST)));
    assert!(posts.field("tags").is_none());
}
