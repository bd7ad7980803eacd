use crate::error::Error;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use signup_core::{api::business, RegistrationService};

#[tracing::instrument(skip_all)]
pub async fn handler(
    State(registrations): State<RegistrationService>,
    req: Result<Json<business::Req>, JsonRejection>,
) -> Result<(StatusCode, Json<business::Resp>), Error> {
    let Json(req) = req?;

    let outcome = registrations.register_business(req).await?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}
