//! [`ServiceClient`]: [`CategoryStore`] implementation that connects to catalogd over gRPC.
//!
//! All proto ↔ native type conversions are centralized in [`crate::server::convert`].

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use tonic::transport::Channel;

use crate::server::convert::{from_status, required_category};
use crate::server::proto;
use crate::server::proto::category_service_client::CategoryServiceClient;
use crate::{CatalogError, Category, CategoryStore, NewCategory, Result};

/// Categories confirmed one by one by the bidirectional RPC.
pub type CategoryStream = Pin<Box<dyn Stream<Item = Result<Category>> + Send>>;

/// A [`CategoryStore`] client that connects to a remote catalogd server.
///
/// Cloning is cheap; clones share the underlying channel.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    inner: CategoryServiceClient<Channel>,
}

impl ServiceClient {
    /// Connect to a catalogd server at the given address.
    ///
    /// A bare `host:port` (the form catalogd binds to) is dialed over
    /// plain `http://`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = ServiceClient::connect("http://127.0.0.1:50051").await?;
    /// ```
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        let addr = endpoint_uri(addr.into());
        let inner = CategoryServiceClient::connect(addr.clone())
            .await
            .map_err(|e| CatalogError::Transport(format!("failed to connect to {addr}: {e}")))?;
        Ok(Self { inner })
    }

    /// Create all `items` over a single client stream.
    ///
    /// The server replies once, after the last item, with every created
    /// category in order. If any item fails the whole call fails, though
    /// earlier items may already be persisted.
    pub async fn create_stream(&self, items: Vec<NewCategory>) -> Result<Vec<Category>> {
        let requests = request_stream(items);
        let response = self
            .inner
            .clone()
            .create_category_stream(requests)
            .await
            .map_err(from_status)?;
        Ok(response
            .into_inner()
            .categories
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Create `items` over the bidirectional RPC, yielding each confirmation
    /// as the server sends it.
    pub async fn create_bidirectional_stream(
        &self,
        items: Vec<NewCategory>,
    ) -> Result<CategoryStream> {
        let requests = request_stream(items);
        let response = self
            .inner
            .clone()
            .create_category_stream_bidirectional(requests)
            .await
            .map_err(from_status)?;
        let stream = response.into_inner().map(|result| {
            result
                .map_err(from_status)
                .and_then(|r| required_category(r.category))
        });
        Ok(Box::pin(stream))
    }

    /// Like [`create_bidirectional_stream`](Self::create_bidirectional_stream),
    /// collecting every confirmation.
    pub async fn create_bidirectional(&self, items: Vec<NewCategory>) -> Result<Vec<Category>> {
        let mut stream = self.create_bidirectional_stream(items).await?;
        let mut created = Vec::new();
        while let Some(category) = stream.next().await {
            created.push(category?);
        }
        Ok(created)
    }
}

/// Turn `items` into the outbound message stream of a streaming RPC.
fn endpoint_uri(addr: String) -> String {
    if addr.contains("://") {
        addr
    } else {
        format!("http://{addr}")
    }
}

fn request_stream(
    items: Vec<NewCategory>,
) -> impl Stream<Item = proto::CreateCategoryRequest> + Send + 'static {
    tokio_stream::iter(items.into_iter().map(proto::CreateCategoryRequest::from))
}

// =============================================================================
// CategoryStore implementation
// =============================================================================

#[async_trait]
impl CategoryStore for ServiceClient {
    async fn create(&self, name: &str, description: &str) -> Result<Category> {
        let request = proto::CreateCategoryRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        let response = self
            .inner
            .clone()
            .create_category(request)
            .await
            .map_err(from_status)?;
        required_category(response.into_inner().category)
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        let response = self
            .inner
            .clone()
            .list_category(proto::ListCategoryRequest {})
            .await
            .map_err(from_status)?;
        Ok(response
            .into_inner()
            .categories
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Category> {
        let request = proto::GetCategoryRequest { id: id.to_string() };
        let response = self
            .inner
            .clone()
            .get_category(request)
            .await
            .map_err(from_status)?;
        required_category(response.into_inner().category)
    }
}
