use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "marquee_session";

/// The session identity of the current visitor. Favorites are scoped to
/// this token. `fresh` means the token was minted for this request and
/// still needs a Set-Cookie to stick.
#[derive(Debug, Clone)]
pub struct Visitor {
    pub token: String,
    pub fresh: bool,
}

impl Visitor {
    /// Read the session token from the request cookie, minting a new one
    /// when the cookie is absent or empty.
    pub fn from_request(req: &HttpRequest) -> Self {
        match req.cookie(SESSION_COOKIE) {
            Some(cookie) if !cookie.value().is_empty() => Self {
                token: cookie.value().to_string(),
                fresh: false,
            },
            _ => Self {
                token: Uuid::new_v4().to_string(),
                fresh: true,
            },
        }
    }

    /// Attach the session cookie to a response under construction.
    /// Does nothing for tokens that already came in on the request.
    pub fn apply(&self, resp: &mut HttpResponseBuilder) {
        if self.fresh {
            let cookie = Cookie::build(SESSION_COOKIE, self.token.clone())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .max_age(actix_web::cookie::time::Duration::days(365))
                .finish();
            resp.cookie(cookie);
        }
    }
}
