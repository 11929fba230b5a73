use super::*;
use serde_json::json;
use shared::error::ErrorCode;

async fn context() -> ApiContext {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    ApiContext::new(storage)
}

#[test]
fn parse_accepts_any_non_empty_description() {
    let response = parse_description(&json!({ "description": "a cozy bedroom" })).expect("parse");
    assert!(response.success);
    assert_eq!(response.message, "Design description processed successfully");
}

#[test]
fn parse_rejects_missing_empty_or_non_string_descriptions() {
    for body in [
        json!({}),
        json!({ "description": "" }),
        json!({ "description": 42 }),
        json!({ "description": null }),
        json!("just a string"),
    ] {
        let err = parse_description(&body).unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation, "{body}");
    }
}

#[tokio::test]
async fn save_then_load_by_reference() {
    let ctx = context().await;
    let design = serde_json::to_value(SceneConfiguration::default()).expect("encode");

    let saved = save_design(&ctx, &json!({ "name": "Studio", "design": design }))
        .await
        .expect("save");
    assert!(saved.success);
    assert!(saved.id.starts_with("design-"), "{}", saved.id);

    let record = load_design(&ctx, &saved.id).await.expect("load");
    assert_eq!(record.name, "Studio");
    assert_eq!(record.design, SceneConfiguration::default());

    let listed = list_designs(&ctx).await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(design_reference(listed[0].id), saved.id);
}

#[tokio::test]
async fn save_requires_name_and_design() {
    let ctx = context().await;
    let design = serde_json::to_value(SceneConfiguration::default()).expect("encode");

    for body in [
        json!({ "design": design.clone() }),
        json!({ "name": "  ", "design": design.clone() }),
        json!({ "name": "No design" }),
        json!({ "name": "Null design", "design": null }),
        json!({ "name": "Bad design", "design": { "dimensions": "big" } }),
    ] {
        let err = save_design(&ctx, &body).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation, "{body}");
    }
    assert!(list_designs(&ctx).await.expect("list").is_empty());
}

#[tokio::test]
async fn unknown_designs_are_not_found() {
    let ctx = context().await;
    for reference in ["design-7", "7", "not-a-design"] {
        let err = load_design(&ctx, reference).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound, "{reference}");
    }
}

#[tokio::test]
async fn deleted_designs_stop_loading() {
    let ctx = context().await;
    let design = serde_json::to_value(SceneConfiguration::default()).expect("encode");
    let saved = save_design(&ctx, &json!({ "name": "Attic", "design": design }))
        .await
        .expect("save");

    let deleted = delete_design(&ctx, &saved.id).await.expect("delete");
    assert!(deleted.success);

    let err = load_design(&ctx, &saved.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    let err = delete_design(&ctx, &saved.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(
        delete_design(&ctx, "attic").await.unwrap_err().code,
        ErrorCode::NotFound
    );
}

#[tokio::test]
async fn catalogs_are_exposed_through_the_context() {
    let ctx = context().await;
    assert_eq!(list_fixed_elements(&ctx).len(), 4);

    let sofas = search_products(&ctx, "sofa", None);
    assert_eq!(sofas.len(), 1);
    assert_eq!(sofas[0].name, "KIVIK Sofa");
    assert!(search_products(&ctx, "sofa", Some("lamp")).is_empty());
}
