use axum::{
    Form,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::InfomedError;

/// Urlencoded form body. Rejections are reported with the crate's JSON error body.
pub struct FormInput<T>(pub T);

impl<S, T> FromRequest<S> for FormInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = InfomedError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_string();
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(FormInput(value)),
            Err(rejection) => {
                let reason = rejection.body_text();
                warn!(path = %path, reason = %reason, "rejected form body");
                Err(InfomedError::BadRequest(format!(
                    "Formulário inválido: {reason}"
                )))
            }
        }
    }
}

/// Query string parameters, decoded from URL escaping.
pub struct QueryInput<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = InfomedError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryInput(value)),
            Err(rejection) => {
                let reason = rejection.body_text();
                warn!(path = %parts.uri.path(), reason = %reason, "rejected query string");
                Err(InfomedError::BadRequest(format!(
                    "Parâmetros inválidos: {reason}"
                )))
            }
        }
    }
}
