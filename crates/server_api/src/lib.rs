use catalog::{CatalogAdapter, CatalogEntry, FixedElementsCatalog, ProductCatalog};
use serde_json::Value;
use shared::{
    domain::SceneConfiguration,
    error::ApiError,
    protocol::{
        design_reference, parse_design_reference, DeleteDesignResponse, DesignRecord,
        DesignSummary, ParseDescriptionResponse, SaveDesignResponse,
    },
};
use storage::Storage;
use tracing::{error, info};

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    pub fixed_elements: FixedElementsCatalog,
    pub products: ProductCatalog,
}

impl ApiContext {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            fixed_elements: FixedElementsCatalog,
            products: ProductCatalog::mock(),
        }
    }
}

/// Accepts any non-empty string description. Interpretation happens on the
/// client, so nothing is derived here.
pub fn parse_description(body: &Value) -> Result<ParseDescriptionResponse, ApiError> {
    let description = body
        .get("description")
        .and_then(Value::as_str)
        .filter(|description| !description.is_empty())
        .ok_or_else(|| ApiError::validation("Description is required and must be a string"))?;

    info!(chars = description.chars().count(), "design description received");
    Ok(ParseDescriptionResponse {
        success: true,
        message: "Design description processed successfully".into(),
    })
}

pub async fn save_design(ctx: &ApiContext, body: &Value) -> Result<SaveDesignResponse, ApiError> {
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let design = body.get("design").filter(|design| !design.is_null());
    let (Some(name), Some(design)) = (name, design) else {
        return Err(ApiError::validation("Design data and name are required"));
    };
    let design: SceneConfiguration = serde_json::from_value(design.clone())
        .map_err(|err| ApiError::validation(format!("invalid design: {err}")))?;

    let id = ctx
        .storage
        .save_design(name, &design)
        .await
        .map_err(internal)?;
    info!(design_id = id.0, name, "design saved");
    Ok(SaveDesignResponse {
        success: true,
        id: design_reference(id),
        message: "Design saved successfully".into(),
    })
}

pub async fn load_design(ctx: &ApiContext, reference: &str) -> Result<DesignRecord, ApiError> {
    let not_found = || ApiError::not_found(format!("design '{reference}' not found"));
    let id = parse_design_reference(reference).ok_or_else(not_found)?;
    ctx.storage
        .load_design(id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)
}

pub async fn delete_design(
    ctx: &ApiContext,
    reference: &str,
) -> Result<DeleteDesignResponse, ApiError> {
    let not_found = || ApiError::not_found(format!("design '{reference}' not found"));
    let id = parse_design_reference(reference).ok_or_else(not_found)?;
    if !ctx.storage.delete_design(id).await.map_err(internal)? {
        return Err(not_found());
    }
    info!(design_id = id.0, "design deleted");
    Ok(DeleteDesignResponse {
        success: true,
        message: "Design deleted successfully".into(),
    })
}

pub async fn list_designs(ctx: &ApiContext) -> Result<Vec<DesignSummary>, ApiError> {
    ctx.storage.list_designs().await.map_err(internal)
}

pub fn list_fixed_elements(ctx: &ApiContext) -> Vec<CatalogEntry> {
    ctx.fixed_elements.list_entries()
}

pub fn search_products(ctx: &ApiContext, query: &str, category: Option<&str>) -> Vec<CatalogEntry> {
    ctx.products.search(query, category)
}

fn internal(err: anyhow::Error) -> ApiError {
    error!(error = %err, "design request failed");
    ApiError::internal(err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
