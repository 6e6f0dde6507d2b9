use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    client::{error::ClientError, resource::Resource},
    entities::api_response::{ApiResponse, DeletedResponse},
};

/// Thin typed wrapper over the `/api/{collection}` endpoints.
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    http: Client,
    base_url: Url,
}

impl PortfolioClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self::with_http_client(Client::new(), Url::parse(base_url)?))
    }

    pub fn with_http_client(http: Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        PortfolioClient { http, base_url }
    }

    fn collection_url<R: Resource>(&self) -> Result<Url, ClientError> {
        Ok(self.base_url.join(&format!("api/{}", R::COLLECTION))?)
    }

    fn record_url<R: Resource>(&self, id: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(&format!("api/{}/{}", R::COLLECTION, id))?)
    }

    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ClientError> {
        let request = self.http.get(self.collection_url::<R>()?);
        self.send(request, format!("Failed to fetch {}", R::COLLECTION)).await
    }

    pub async fn create<R: Resource>(&self, record: &R::New) -> Result<R, ClientError> {
        let request = self.http.post(self.collection_url::<R>()?).json(record);
        self.send(request, format!("Failed to add {}", R::LABEL)).await
    }

    pub async fn update<R: Resource>(&self, id: &str, patch: &R::Patch) -> Result<R::Updated, ClientError> {
        let request = self.http.put(self.record_url::<R>(id)?).json(patch);
        self.send(request, format!("Failed to update {}", R::LABEL)).await
    }

    pub async fn delete<R: Resource>(&self, id: &str) -> Result<DeletedResponse, ClientError> {
        let request = self.http.delete(self.record_url::<R>(id)?);
        self.send(request, format!("Failed to delete {}", R::LABEL)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        failure_message: String,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        let body: ApiResponse<T> = response.json().await?;

        match body {
            ApiResponse { success: true, data: Some(data), .. } => Ok(data),
            ApiResponse { error, .. } => Err(ClientError::Api {
                status: status.as_u16(),
                message: error.unwrap_or(failure_message),
            }),
        }
    }
}
