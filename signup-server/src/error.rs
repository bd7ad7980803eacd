use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use signup_core::api::{error::Code, ErrorResp};
use signup_core::registration;

/// An error from the API
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Something went wrong which we should log but not expose to clients.
    Internal,

    /// Some handler-specific error
    Custom(StatusCode, Code, String),
}

impl Error {
    /// Construct a custom error. These are always the client's fault.
    pub fn custom(code: Code, message: &str) -> Self {
        Self::Custom(StatusCode::BAD_REQUEST, code, message.to_string())
    }

    /// Unwrap a handler-specific error
    #[cfg(test)]
    pub fn unwrap_custom(self) -> (StatusCode, Code, String) {
        match self {
            Self::Custom(status_code, code, message) => (status_code, code, message),
            Self::Internal => panic!("called `Error::unwrap_custom` on an `Internal`"),
        }
    }
}

impl From<registration::Error> for Error {
    fn from(err: registration::Error) -> Self {
        let code = match err {
            registration::Error::MissingFields(_) => Code::MissingFields,
            registration::Error::EmailAlreadyRegistered => Code::EmailAlreadyRegistered,
            // the cause was logged where it happened
            registration::Error::Internal => return Self::Internal,
        };

        Self::custom(code, &err.to_string())
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(?rejection, "rejected request body");
        Self::custom(Code::InvalidBody, &rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Code::InternalError,
                "Internal server error".to_string(),
            ),
            Self::Custom(status_code, code, message) => (status_code, code, message),
        };

        (status, Json(ErrorResp { message, code })).into_response()
    }
}
