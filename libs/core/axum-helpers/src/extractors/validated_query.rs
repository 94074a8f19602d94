//! Query string extractor with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query string counterpart of [`ValidatedJson`](super::ValidatedJson).
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        params.validate()?;
        Ok(ValidatedQuery(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1, max = 100))]
        limit: Option<u64>,
    }

    async fn handler(ValidatedQuery(paging): ValidatedQuery<Paging>) -> String {
        paging.limit.unwrap_or(20).to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        Router::new()
            .route("/", get(handler))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_accepts_valid_query() {
        assert_eq!(status_for("/?limit=50").await, StatusCode::OK);
        assert_eq!(status_for("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_value() {
        assert_eq!(status_for("/?limit=500").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_unparseable_value() {
        assert_eq!(status_for("/?limit=lots").await, StatusCode::BAD_REQUEST);
    }
}
