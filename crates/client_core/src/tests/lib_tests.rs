use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode as HttpStatus,
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::DesignId,
    error::ErrorCode,
    protocol::{design_reference, parse_design_reference},
};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;

const SAVED_AT: &str = "2026-01-01T00:00:00Z";

#[derive(Clone, Default)]
struct FakeServer {
    designs: Arc<Mutex<Vec<Option<SaveDesignRequest>>>>,
}

async fn fake_parse(
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ParseDescriptionResponse>, (HttpStatus, Json<ApiError>)> {
    match body.get("description").and_then(|d| d.as_str()) {
        Some(d) if !d.is_empty() => Ok(Json(ParseDescriptionResponse {
            success: true,
            message: "Design description processed successfully".into(),
        })),
        _ => Err((
            HttpStatus::BAD_REQUEST,
            Json(ApiError::validation("Description is required and must be a string")),
        )),
    }
}

async fn fake_save(
    State(server): State<FakeServer>,
    Json(body): Json<SaveDesignRequest>,
) -> Json<SaveDesignResponse> {
    let mut designs = server.designs.lock().await;
    designs.push(Some(body));
    Json(SaveDesignResponse {
        success: true,
        id: design_reference(DesignId(designs.len() as i64)),
        message: "Design saved successfully".into(),
    })
}

async fn fake_load(
    State(server): State<FakeServer>,
    Path(reference): Path<String>,
) -> Result<Json<serde_json::Value>, (HttpStatus, Json<ApiError>)> {
    let designs = server.designs.lock().await;
    let found = parse_design_reference(&reference)
        .and_then(|id| usize::try_from(id.0 - 1).ok().map(|index| (id, index)))
        .and_then(|(id, index)| designs.get(index)?.as_ref().map(|saved| (id, saved)));
    match found {
        Some((id, saved)) => Ok(Json(serde_json::json!({
            "id": id,
            "name": saved.name,
            "created_at": SAVED_AT,
            "design": saved.design,
        }))),
        None => Err((
            HttpStatus::NOT_FOUND,
            Json(ApiError::not_found(format!("design '{reference}' not found"))),
        )),
    }
}

async fn fake_delete(
    State(server): State<FakeServer>,
    Path(reference): Path<String>,
) -> Result<Json<DeleteDesignResponse>, (HttpStatus, Json<ApiError>)> {
    let mut designs = server.designs.lock().await;
    let slot = parse_design_reference(&reference)
        .and_then(|id| usize::try_from(id.0 - 1).ok())
        .and_then(|index| designs.get_mut(index));
    match slot.and_then(Option::take) {
        Some(_) => Ok(Json(DeleteDesignResponse {
            success: true,
            message: "Design deleted successfully".into(),
        })),
        None => Err((
            HttpStatus::NOT_FOUND,
            Json(ApiError::not_found(format!("design '{reference}' not found"))),
        )),
    }
}

async fn fake_products(Query(params): Query<HashMap<String, String>>) -> Json<Vec<CatalogEntry>> {
    let catalog = catalog::ProductCatalog::mock();
    Json(catalog.search(
        params.get("query").map(String::as_str).unwrap_or_default(),
        params.get("category").map(String::as_str),
    ))
}

async fn spawn_design_server() -> (String, FakeServer) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = FakeServer::default();
    let app = Router::new()
        .route("/api/design/parse", post(fake_parse))
        .route("/api/design/save", post(fake_save))
        .route("/api/design/:id", get(fake_load).delete(fake_delete))
        .route("/api/catalog/products", get(fake_products))
        .with_state(server.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), server)
}

#[test]
fn rejects_unparsable_server_urls() {
    assert!(matches!(
        DesignClient::new("not a url"),
        Err(ClientError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn parse_description_round_trips() {
    let (url, _server) = spawn_design_server().await;
    let client = DesignClient::new(&url).expect("client");

    let response = client
        .parse_description("a bright kitchen")
        .await
        .expect("parse");
    assert!(response.success);
}

#[tokio::test]
async fn server_errors_surface_as_api_errors() {
    let (url, _server) = spawn_design_server().await;
    let client = DesignClient::new(&url).expect("client");

    match client.parse_description("").await {
        Err(ClientError::Api { status, error }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(error.code, ErrorCode::Validation);
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn saved_designs_can_be_loaded_back() {
    let (url, server) = spawn_design_server().await;
    let client = DesignClient::new(&url).expect("client");
    let design = SceneConfiguration::default();

    let saved = client.save_design("Loft", &design).await.expect("save");
    assert_eq!(saved.id, "design-1");
    {
        let designs = server.designs.lock().await;
        assert_eq!(designs[0].as_ref().map(|saved| saved.name.as_str()), Some("Loft"));
    }

    let record = client
        .load_design(&saved.id)
        .await
        .expect("load")
        .expect("present");
    assert_eq!(record.name, "Loft");
    assert_eq!(record.design, design);

    assert!(client.load_design("design-9").await.expect("load").is_none());
}

#[tokio::test]
async fn product_search_sends_query_parameters() {
    let (url, _server) = spawn_design_server().await;
    let client = DesignClient::new(&url).expect("client");

    let results = client
        .search_products("coffee table", Some("table"))
        .await
        .expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "ikea-003");
}

#[tokio::test]
async fn deleting_reports_whether_anything_was_removed() {
    let (url, _server) = spawn_design_server().await;
    let client = DesignClient::new(&url).expect("client");
    let saved = client
        .save_design("Den", &SceneConfiguration::default())
        .await
        .expect("save");

    assert!(client.delete_design(&saved.id).await.expect("delete"));
    assert!(!client.delete_design(&saved.id).await.expect("delete again"));
    assert!(client.load_design(&saved.id).await.expect("load").is_none());
}
