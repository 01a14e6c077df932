//! gRPC service implementation.
//!
//! [`CategoryService`] maps each RPC onto [`CategoryStore`] calls. The two
//! streaming RPCs are driven by [`create_from_stream`] and [`create_each`],
//! which are generic over the inbound stream so they can be exercised
//! without a transport.
//!
//! Failures are never recovered locally: a store or transport error ends
//! the call, and categories created earlier in the same stream stay
//! persisted.

use std::sync::Arc;
use std::time::Instant;

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status, Streaming};
use tracing::{debug, warn};

use super::proto;
use super::proto::category_service_server::CategoryService as CategoryRpc;
use crate::{Category, CategoryStore, telemetry};

const CREATE: &str = "create_category";
const LIST: &str = "list_category";
const GET: &str = "get_category";
const CREATE_STREAM: &str = "create_category_stream";
const CREATE_BIDIRECTIONAL: &str = "create_category_stream_bidirectional";

/// Item type of the bidirectional response stream.
pub type BidirectionalItem = Result<proto::CreateCategoryStreamBidirectionalResponse, Status>;

/// gRPC service that wraps a [`CategoryStore`] implementation.
pub struct CategoryService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: CategoryStore + ?Sized> CategoryService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The store this service reads and writes.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

/// Create every category read from `inbound`, one at a time.
///
/// Returns all created categories, in creation order, once the stream ends.
/// The first receive or store failure is returned as-is and the
/// accumulated categories are dropped.
pub async fn create_from_stream<S, R>(store: &S, mut inbound: R) -> Result<Vec<Category>, Status>
where
    S: CategoryStore + ?Sized,
    R: Stream<Item = Result<proto::CreateCategoryRequest, Status>> + Unpin,
{
    let mut created = Vec::new();
    while let Some(request) = inbound.next().await {
        let request = request?;
        let category = store.create(&request.name, &request.description).await?;
        record_created(CREATE_STREAM);
        debug!(id = %category.id, name = %category.name, "created category from stream");
        created.push(category);
    }
    Ok(created)
}

/// Create each category read from `inbound` and confirm it on `outbound`
/// before reading the next one.
///
/// Returns how many categories were created when the inbound stream ends.
/// A send failure means the client has gone away and ends the loop too.
pub async fn create_each<S, R>(
    store: &S,
    mut inbound: R,
    outbound: &mpsc::Sender<BidirectionalItem>,
) -> Result<usize, Status>
where
    S: CategoryStore + ?Sized,
    R: Stream<Item = Result<proto::CreateCategoryRequest, Status>> + Unpin,
{
    let mut created = 0;
    while let Some(request) = inbound.next().await {
        let request = request?;
        let category = store.create(&request.name, &request.description).await?;
        record_created(CREATE_BIDIRECTIONAL);
        created += 1;
        debug!(id = %category.id, name = %category.name, "created category, confirming");
        outbound
            .send(Ok(category.into()))
            .await
            .map_err(|_| Status::cancelled("response stream closed by client"))?;
    }
    Ok(created)
}

/// Run [`create_each`] on its own task and return the response stream.
///
/// The response channel holds a single message, so the loop cannot run
/// ahead of the client. A terminal error is delivered as the last item.
pub fn spawn_create_each<S, R>(store: Arc<S>, inbound: R) -> ReceiverStream<BidirectionalItem>
where
    S: CategoryStore + ?Sized + 'static,
    R: Stream<Item = Result<proto::CreateCategoryRequest, Status>> + Send + Unpin + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let start = Instant::now();
        let result = create_each(&*store, inbound, &tx).await;
        record_request(CREATE_BIDIRECTIONAL, start, result.is_ok());

        match result {
            Ok(created) => debug!(created, "bidirectional stream closed"),
            Err(status) => {
                warn!(code = ?status.code(), error = %status.message(), "bidirectional stream aborted");
                // Fails only if the client is already gone.
                let _ = tx.send(Err(status)).await;
            }
        }
    });

    ReceiverStream::new(rx)
}

// ============================================================================
// Metrics recording
// ============================================================================

/// Record request outcome metrics (counter + histogram).
fn record_request(operation: &'static str, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "operation" => operation,
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "operation" => operation,
    )
    .record(elapsed);
}

fn record_created(operation: &'static str) {
    metrics::counter!(telemetry::CATEGORIES_CREATED_TOTAL, "operation" => operation).increment(1);
}

// ============================================================================
// RPC handlers
// ============================================================================

#[tonic::async_trait]
impl<S: CategoryStore + ?Sized + 'static> CategoryRpc for CategoryService<S> {
    type CreateCategoryStreamBidirectionalStream = ReceiverStream<BidirectionalItem>;

    async fn create_category(
        &self,
        request: Request<proto::CreateCategoryRequest>,
    ) -> Result<Response<proto::CreateCategoryResponse>, Status> {
        let start = Instant::now();
        let request = request.into_inner();

        let result = self
            .store
            .create(&request.name, &request.description)
            .await;
        record_request(CREATE, start, result.is_ok());

        let category = result?;
        record_created(CREATE);
        debug!(id = %category.id, name = %category.name, "created category");
        Ok(Response::new(category.into()))
    }

    async fn list_category(
        &self,
        _request: Request<proto::ListCategoryRequest>,
    ) -> Result<Response<proto::ListCategoryResponse>, Status> {
        let start = Instant::now();
        let result = self.store.find_all().await;
        record_request(LIST, start, result.is_ok());

        Ok(Response::new(result?.into()))
    }

    async fn get_category(
        &self,
        request: Request<proto::GetCategoryRequest>,
    ) -> Result<Response<proto::GetCategoryResponse>, Status> {
        let start = Instant::now();
        let id = request.into_inner().id;

        let result = self.store.find_by_id(&id).await;
        record_request(GET, start, result.is_ok());

        Ok(Response::new(result?.into()))
    }

    async fn create_category_stream(
        &self,
        request: Request<Streaming<proto::CreateCategoryRequest>>,
    ) -> Result<Response<proto::CreateCategoryStreamResponse>, Status> {
        let start = Instant::now();
        let result = create_from_stream(&*self.store, request.into_inner()).await;
        record_request(CREATE_STREAM, start, result.is_ok());

        match result {
            Ok(created) => {
                debug!(created = created.len(), "client stream closed");
                Ok(Response::new(created.into()))
            }
            Err(status) => {
                warn!(code = ?status.code(), error = %status.message(), "client stream aborted");
                Err(status)
            }
        }
    }

    async fn create_category_stream_bidirectional(
        &self,
        request: Request<Streaming<proto::CreateCategoryRequest>>,
    ) -> Result<Response<Self::CreateCategoryStreamBidirectionalStream>, Status> {
        let outbound = spawn_create_each(Arc::clone(&self.store), request.into_inner());
        Ok(Response::new(outbound))
    }
}
