use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("an unspecified internal error occurred: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream error: {0}")]
    UpstreamError(String),
}

#[derive(Template)]
#[template(path = "404.html")]
struct NotFoundPage;

#[derive(Template)]
#[template(path = "500.html")]
struct ServerErrorPage;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match &self {
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            // A failed TMDB call is never the visitor's fault; the detail
            // stays in the logs, the visitor gets the 500 page.
            Self::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Raised at the JSON boundary (the favorites toggle), so the
            // response stays JSON.
            Self::BadRequest(_) => HttpResponse::build(self.status_code()).json(serde_json::json!({
                "error": self.to_string(),
                "status": self.status_code().as_u16()
            })),
            Self::NotFound(_) => error_page(self.status_code(), NotFoundPage),
            Self::InternalError(_) | Self::UpstreamError(_) => {
                log::error!("{self}");
                error_page(self.status_code(), ServerErrorPage)
            }
        }
    }
}

fn error_page<T: Template>(status: StatusCode, page: T) -> HttpResponse {
    match page.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render error page: {e}");
            HttpResponse::build(status).body(status.to_string())
        }
    }
}

/// Default service for unmatched routes.
pub async fn not_found() -> HttpResponse {
    Error::NotFound("no page at this address".to_string()).error_response()
}

pub type Result<T> = std::result::Result<T, Error>;
