//! Conversions between catalog native types, protobuf types and gRPC status.
//!
//! Shared by the server (proto → native for requests, native → proto for
//! responses) and by [`crate::client`] (the reverse direction).

use tonic::{Code, Status};

use crate::{CatalogError, Category, NewCategory};

use super::proto;

// =============================================================================
// Records
// =============================================================================

impl From<proto::Category> for Category {
    fn from(p: proto::Category) -> Self {
        Category {
            id: p.id,
            name: p.name,
            description: p.description,
        }
    }
}

impl From<Category> for proto::Category {
    fn from(c: Category) -> Self {
        proto::Category {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

impl From<proto::CreateCategoryRequest> for NewCategory {
    fn from(p: proto::CreateCategoryRequest) -> Self {
        NewCategory {
            name: p.name,
            description: p.description,
        }
    }
}

impl From<NewCategory> for proto::CreateCategoryRequest {
    fn from(n: NewCategory) -> Self {
        proto::CreateCategoryRequest {
            name: n.name,
            description: n.description,
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

impl From<Category> for proto::CreateCategoryResponse {
    fn from(c: Category) -> Self {
        proto::CreateCategoryResponse {
            category: Some(c.into()),
        }
    }
}

impl From<Category> for proto::GetCategoryResponse {
    fn from(c: Category) -> Self {
        proto::GetCategoryResponse {
            category: Some(c.into()),
        }
    }
}

impl From<Category> for proto::CreateCategoryStreamBidirectionalResponse {
    fn from(c: Category) -> Self {
        proto::CreateCategoryStreamBidirectionalResponse {
            category: Some(c.into()),
        }
    }
}

impl From<Vec<Category>> for proto::ListCategoryResponse {
    fn from(categories: Vec<Category>) -> Self {
        proto::ListCategoryResponse {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<Category>> for proto::CreateCategoryStreamResponse {
    fn from(categories: Vec<Category>) -> Self {
        proto::CreateCategoryStreamResponse {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}

/// Unwrap the `category` field every single-record response carries.
pub fn required_category(category: Option<proto::Category>) -> Result<Category, CatalogError> {
    category
        .map(Into::into)
        .ok_or_else(|| CatalogError::Transport("response is missing its category".to_string()))
}

// =============================================================================
// Errors
// =============================================================================

impl From<CatalogError> for Status {
    fn from(err: CatalogError) -> Self {
        let code = match &err {
            CatalogError::NotFound(_) => Code::NotFound,
            CatalogError::InvalidInput(_) | CatalogError::Json(_) => Code::InvalidArgument,
            CatalogError::Storage(_) => Code::Internal,
            CatalogError::Configuration(_) => Code::FailedPrecondition,
            CatalogError::Transport(_) | CatalogError::Stream(_) => Code::Unavailable,
        };
        Status::new(code, err.to_string())
    }
}

/// Convert [`tonic::Status`] to [`CatalogError`].
///
/// Messages produced by `From<CatalogError> for Status` lose their display
/// prefix so that a round trip yields the same variant and payload.
pub fn from_status(status: Status) -> CatalogError {
    let message = status.message();
    let payload = |prefix: &str| message.strip_prefix(prefix).unwrap_or(message).to_string();
    match status.code() {
        Code::NotFound => CatalogError::NotFound(payload("category not found: ")),
        Code::InvalidArgument => CatalogError::InvalidInput(payload("invalid input: ")),
        Code::Internal => CatalogError::Storage(payload("storage error: ")),
        Code::FailedPrecondition => CatalogError::Configuration(payload("configuration error: ")),
        Code::Unavailable if message.starts_with("stream error: ") => {
            CatalogError::Stream(payload("stream error: "))
        }
        _ => CatalogError::Transport(payload("transport error: ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found_code() {
        let status = Status::from(CatalogError::NotFound("9".into()));
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "category not found: 9");
    }

    #[test]
    fn storage_maps_to_internal() {
        let status = Status::from(CatalogError::Storage("disk full".into()));
        assert_eq!(status.code(), Code::Internal);
    }

    #[test]
    fn status_round_trip_restores_variant() {
        let err = from_status(Status::from(CatalogError::NotFound("9".into())));
        assert!(matches!(err, CatalogError::NotFound(ref id) if id == "9"));

        let err = from_status(Status::from(CatalogError::Stream("reset".into())));
        assert!(matches!(err, CatalogError::Stream(ref m) if m == "reset"));
    }

    #[test]
    fn foreign_status_becomes_transport_error() {
        let err = from_status(Status::cancelled("client went away"));
        assert!(matches!(err, CatalogError::Transport(ref m) if m == "client went away"));
    }

    #[test]
    fn missing_category_is_an_error() {
        assert!(required_category(None).is_err());
        let category = required_category(Some(proto::Category {
            id: "1".into(),
            name: "Books".into(),
            description: "Printed books".into(),
        }))
        .unwrap();
        assert_eq!(category, Category::new("1", "Books", "Printed books"));
    }
}
