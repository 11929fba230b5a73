use catalog::CatalogEntry;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::SceneConfiguration,
    error::ApiError,
    protocol::{
        DeleteDesignResponse, DesignRecord, DesignSummary, ParseDescriptionRequest,
        ParseDescriptionResponse, SaveDesignRequest, SaveDesignResponse,
    },
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

mod session;

pub use session::DesignSession;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server rejected request ({status}): {error}")]
    Api { status: StatusCode, error: ApiError },
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// HTTP client for the design server.
#[derive(Clone)]
pub struct DesignClient {
    http: Client,
    server_url: Url,
}

impl DesignClient {
    pub fn new(server_url: &str) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            server_url: Url::parse(server_url)?,
        })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    pub async fn parse_description(&self, description: &str) -> Result<ParseDescriptionResponse> {
        let body = ParseDescriptionRequest {
            description: description.to_string(),
        };
        self.post("/api/design/parse", &body).await
    }

    pub async fn save_design(
        &self,
        name: &str,
        design: &SceneConfiguration,
    ) -> Result<SaveDesignResponse> {
        let body = SaveDesignRequest {
            name: name.to_string(),
            design: design.clone(),
        };
        let saved: SaveDesignResponse = self.post("/api/design/save", &body).await?;
        debug!(id = %saved.id, name, "design saved on server");
        Ok(saved)
    }

    /// `None` when the server does not know the reference.
    pub async fn load_design(&self, reference: &str) -> Result<Option<DesignRecord>> {
        let url = self.endpoint(&format!("/api/design/{reference}"))?;
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    /// `false` when there was nothing to delete.
    pub async fn delete_design(&self, reference: &str) -> Result<bool> {
        let url = self.endpoint(&format!("/api/design/{reference}"))?;
        let response = self.http.delete(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        let deleted: DeleteDesignResponse = decode(response).await?;
        debug!(reference, "design deleted on server");
        Ok(deleted.success)
    }

    pub async fn list_designs(&self) -> Result<Vec<DesignSummary>> {
        let response = self.http.get(self.endpoint("/api/designs")?).send().await?;
        decode(response).await
    }

    pub async fn fixed_elements(&self) -> Result<Vec<CatalogEntry>> {
        let url = self.endpoint("/api/catalog/fixed")?;
        decode(self.http.get(url).send().await?).await
    }

    pub async fn search_products(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> Result<Vec<CatalogEntry>> {
        let mut url = self.endpoint("/api/catalog/products")?;
        url.query_pairs_mut().append_pair("query", query);
        if let Some(category) = category {
            url.query_pairs_mut().append_pair("category", category);
        }
        decode(self.http.get(url).send().await?).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.server_url.join(path)?)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.http.post(self.endpoint(path)?).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let error = match response.json::<ApiError>().await {
        Ok(error) => error,
        Err(_) => ApiError::internal(format!("unexpected response status {status}")),
    };
    warn!(%status, message = %error.message, "design server returned an error");
    Err(ClientError::Api { status, error })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
