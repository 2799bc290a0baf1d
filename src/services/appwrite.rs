use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use crate::models::{
    CandidateProfile, Posting, PostingDocument, PostingKind, ProfileDocument,
};
use crate::services::{PostingStore, ProfileStore, StoreError, StoreFilter};

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub users: String,
    pub jobs: String,
    pub gigs: String,
}

impl AppwriteCollections {
    fn postings(&self, kind: PostingKind) -> &str {
        match kind {
            PostingKind::Job => &self.jobs,
            PostingKind::Gig => &self.gigs,
        }
    }
}

/// Appwrite Databases API client
///
/// Serves as both the profile store and the posting store:
/// - Fetching candidate profiles from the users collection
/// - Listing open jobs and micro-gigs
/// - Fetching a single posting for direct scoring
pub struct AppwriteStore {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

impl AppwriteStore {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    /// Fetch one raw document, `None` on 404
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let url = format!(
            "{}/{}",
            self.documents_url(collection),
            urlencoding::encode(id)
        );

        tracing::debug!("Fetching document {} from {}", id, collection);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(StoreError::Unauthorized),
            status if !status.is_success() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Failed to fetch {} from {}: {} - {}", id, collection, status, body);
                return Err(StoreError::Api(format!("Failed to fetch document: {}", status)));
            }
            _ => {}
        }

        let json: Value = response.json().await?;

        // Extract document data from Appwrite document format
        Ok(Some(document_data(json)))
    }
}

/// Some Appwrite deployments nest attributes under `data`
fn document_data(doc: Value) -> Value {
    match doc {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Object(mut data)) => {
                if let Some(id) = map.remove("$id") {
                    data.entry("$id").or_insert(id);
                }
                Value::Object(data)
            }
            Some(other) => {
                map.insert("data".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Build the `queries[]` parameters for a listing
fn build_queries(filter: &StoreFilter, page_limit: usize) -> Vec<String> {
    let mut queries = Vec::new();

    if let Some(status) = filter.status {
        queries.push(json!({ "method": "equal", "attribute": "status", "values": [status.as_str()] }));
    }
    if let Some(region) = &filter.region {
        queries.push(json!({ "method": "equal", "attribute": "parish", "values": [region] }));
    }
    queries.push(json!({ "method": "limit", "values": [page_limit] }));

    queries.iter().map(Value::to_string).collect()
}

#[async_trait]
impl ProfileStore for AppwriteStore {
    async fn get_candidate(&self, id: &str) -> Result<Option<CandidateProfile>, StoreError> {
        let Some(data) = self.get_document(&self.collections.users, id).await? else {
            return Ok(None);
        };

        let doc: ProfileDocument = serde_json::from_value(data)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse profile: {}", e)))?;

        // The path id is authoritative when the body omits it
        let doc = ProfileDocument {
            id: doc.id.or_else(|| Some(id.to_string())),
            ..doc
        };

        Ok(Some(CandidateProfile::try_from(doc)?))
    }
}

#[async_trait]
impl PostingStore for AppwriteStore {
    async fn list_postings(
        &self,
        kind: PostingKind,
        filter: &StoreFilter,
        page_limit: usize,
    ) -> Result<Vec<Posting>, StoreError> {
        let collection = self.collections.postings(kind);
        let query_string = build_queries(filter, page_limit)
            .iter()
            .map(|q| format!("queries%5B%5D={}", urlencoding::encode(q)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}?{}", self.documents_url(collection), query_string);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(StoreError::Unauthorized),
            status if !status.is_success() => {
                return Err(StoreError::Api(format!(
                    "Failed to list {}: {}",
                    collection, status
                )));
            }
            _ => {}
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = match json.get("documents") {
            Some(Value::Array(docs)) => docs.clone(),
            _ => return Err(StoreError::InvalidResponse("Missing documents array".into())),
        };

        let postings: Vec<Posting> = documents
            .into_iter()
            .filter_map(|doc| {
                let parsed = serde_json::from_value::<PostingDocument>(document_data(doc))
                    .map_err(|e| e.to_string())
                    .and_then(|doc| doc.into_posting(kind).map_err(|e| e.to_string()));

                match parsed {
                    Ok(posting) => Some(posting),
                    Err(e) => {
                        tracing::warn!("Skipping malformed document in {}: {}", collection, e);
                        None
                    }
                }
            })
            .take(page_limit)
            .collect();

        tracing::debug!("Listed {} postings from {} (total: {})", postings.len(), collection, total);

        Ok(postings)
    }

    async fn get_posting(&self, kind: PostingKind, id: &str) -> Result<Option<Posting>, StoreError> {
        let collection = self.collections.postings(kind);
        let Some(data) = self.get_document(collection, id).await? else {
            return Ok(None);
        };

        let doc: PostingDocument = serde_json::from_value(data)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse posting: {}", e)))?;
        let doc = PostingDocument {
            id: doc.id.or_else(|| Some(id.to_string())),
            ..doc
        };

        Ok(Some(doc.into_posting(kind)?))
    }
}
