// src/common/extractors.rs

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::common::error::AppError;

/// Extrai o corpo JSON e roda as regras do `validator` antes de chegar ao handler.
///
/// Falha de desserialização vira `AppError::InvalidBody`; regras de campo
/// violadas viram `AppError::ValidationError`. As duas respondem 422.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

        payload.validate()?;

        Ok(ValidatedJson(payload))
    }
}

/// Extrai o `{id}` da rota. Um id que não é inteiro (ou não cabe em `i32`)
/// vira `AppError::InvalidPath`, respondido como 422.
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidPath(rejection.body_text()))?;

        Ok(IdPath(id))
    }
}
