use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::server::error::{validation::ValidationError, Error};

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON and rule violations are both rejected with a 400 validation error.
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::message(rejection.body_text()))?;

        value.validate().map_err(ValidationError::from)?;

        Ok(Self(value))
    }
}
