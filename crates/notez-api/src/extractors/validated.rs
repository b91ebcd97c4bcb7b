//! Extractors that deserialize a request part and run its `Validate` rules.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::Validate;

use notez_core::error::AppError;

use crate::error::{ApiError, validation_response};

/// JSON body that has passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        value
            .validate()
            .map_err(|errors| validation_response(&errors))?;
        Ok(Self(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> Response {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return rejection.into_response();
    }
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    ApiError::from(AppError::bad_request("Malformed JSON.")).into_response()
}

/// Query string that has passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        value
            .validate()
            .map_err(|errors| validation_response(&errors))?;
        Ok(Self(value))
    }
}

fn query_rejection(rejection: QueryRejection) -> Response {
    tracing::debug!(error = %rejection.body_text(), "Rejected query string");
    ApiError::from(AppError::bad_request("Invalid query string.")).into_response()
}
