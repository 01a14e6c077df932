//! Telemetry metric name constants.
//!
//! Centralised metric names for catalog operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `catalog_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation` - RPC invoked (e.g. "create_category", "create_category_stream")
//! - `status` - outcome: "ok" or "error"

/// Total RPCs handled by the category service.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "catalog_requests_total";

/// RPC duration in seconds. Streaming calls are timed until the stream closes.
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "catalog_request_duration_seconds";

/// Total categories persisted through the service, including those created
/// by a stream that later failed.
///
/// Labels: `operation`.
pub const CATEGORIES_CREATED_TOTAL: &str = "catalog_categories_created_total";
