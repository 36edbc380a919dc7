use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;
use tracing::{error, warn};

pub const SCHEDULE_NOT_FOUND: &str = "존재하지 않는 스케줄입니다.";
pub const EVENT_NOT_FOUND: &str = "존재하지 않는 event 입니다.";
pub const USER_NOT_FOUND: &str = "존재하지 않는 유저입니다.";
pub const ACCOUNT_NOT_FOUND: &str = "존재하지 않는 사용자입니다.";
pub const PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";
pub const EMAIL_TAKEN: &str = "이미 존재하는 이메일입니다.";
pub const INVALID_TIME: &str = "유효하지 않은 시간입니다.";
pub const INVALID_DATE: &str = "유효하지 않은 날짜입니다.";
pub const INVALID_TOKEN: &str = "유효하지 않은 토큰입니다.";
pub const BAD_REQUEST: &str = "잘못된 요청입니다.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Schedule not found")]
    ScheduleNotFound,

    #[error("Event not found")]
    EventNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("No account for the given email")]
    AccountNotFound,

    #[error("Password mismatch")]
    PasswordMismatch,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ScheduleNotFound => (StatusCode::BAD_REQUEST, SCHEDULE_NOT_FOUND),
            AppError::EventNotFound => (StatusCode::BAD_REQUEST, EVENT_NOT_FOUND),
            AppError::UserNotFound => (StatusCode::BAD_REQUEST, USER_NOT_FOUND),
            AppError::AccountNotFound => (StatusCode::BAD_REQUEST, ACCOUNT_NOT_FOUND),
            AppError::PasswordMismatch => (StatusCode::BAD_REQUEST, PASSWORD_MISMATCH),
            AppError::EmailTaken => (StatusCode::CONFLICT, EMAIL_TAKEN),
            AppError::InvalidTime(raw) => {
                warn!("rejected time value: {:?}", raw);
                (StatusCode::BAD_REQUEST, INVALID_TIME)
            }
            AppError::InvalidDate(raw) => {
                warn!("rejected date value: {:?}", raw);
                (StatusCode::BAD_REQUEST, INVALID_DATE)
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, INVALID_TOKEN),
            AppError::BadRequest(detail) => {
                warn!("malformed request: {}", detail);
                (StatusCode::BAD_REQUEST, BAD_REQUEST)
            }
            AppError::Database(e) => {
                error!("database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::PasswordHash(e) => {
                error!("password hashing error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Token(e) => {
                error!("token error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
