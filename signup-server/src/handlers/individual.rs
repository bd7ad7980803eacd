use crate::error::Error;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use signup_core::{api::individual, RegistrationService};

#[tracing::instrument(skip_all)]
pub async fn handler(
    State(registrations): State<RegistrationService>,
    req: Result<Json<individual::Req>, JsonRejection>,
) -> Result<(StatusCode, Json<individual::Resp>), Error> {
    let Json(req) = req?;

    let outcome = registrations.register_individual(req).await?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}
