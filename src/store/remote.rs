use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::model::{FieldMap, Id, Record};
use crate::store::traits::{RecordStore, StoreError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP adapter for the hosted document store.
///
/// Collections live under `{base}/collections/{name}/documents`; each
/// document is a flat string-field map plus a store-assigned id. There are
/// no transactions and no batching, one round trip per operation.
pub struct RemoteStore {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DocumentPayload {
    id: Id,
    fields: FieldMap,
}

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    documents: Vec<DocumentPayload>,
}

#[derive(Debug, Serialize)]
struct WriteDocumentRequest<'a> {
    fields: &'a FieldMap,
}

#[derive(Debug, Deserialize)]
struct CreateDocumentResponse {
    id: Id,
}

impl RemoteStore {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, StoreError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!("{}/collections/{}/documents", self.base_url, collection)
    }

    fn document_url(&self, collection: &str, id: &Id) -> String {
        format!("{}/{}", self.documents_url(collection), id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Turns non-2xx service responses into a reportable error carrying
    /// whatever message body the store produced.
    async fn check(
        operation: &'static str,
        collection: &str,
        response: Response,
    ) -> Result<Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Service {
            operation,
            collection: collection.to_string(),
            status,
            message,
        })
    }
}

#[async_trait::async_trait]
impl RecordStore for RemoteStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        let response = self
            .authorize(self.http.get(self.documents_url(collection)))
            .send()
            .await?;
        let response = Self::check("list", collection, response).await?;
        let body: ListDocumentsResponse = response.json().await?;
        Ok(body
            .documents
            .into_iter()
            .map(|doc| Record::new(doc.id, doc.fields))
            .collect())
    }

    async fn create(&self, collection: &str, fields: FieldMap) -> Result<Id, StoreError> {
        let response = self
            .authorize(self.http.post(self.documents_url(collection)))
            .json(&WriteDocumentRequest { fields: &fields })
            .send()
            .await?;
        let response = Self::check("create", collection, response).await?;
        let body: CreateDocumentResponse = response.json().await?;
        Ok(body.id)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &Id,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        let response = self
            .authorize(self.http.put(self.document_url(collection, id)))
            .json(&WriteDocumentRequest { fields: &fields })
            .send()
            .await?;
        Self::check("update", collection, response).await?;
        Ok(())
    }

    async fn delete_by_id(&self, collection: &str, id: &Id) -> Result<(), StoreError> {
        let response = self
            .authorize(self.http.delete(self.document_url(collection, id)))
            .send()
            .await?;
        Self::check("delete", collection, response).await?;
        Ok(())
    }
}
