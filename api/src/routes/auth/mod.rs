//! Authentication route handlers
//!
//! This module contains the session lifecycle endpoints:
//! - Login (credential check and session issuance)
//! - Access token verification
//! - Refresh token rotation
//! - Logout

pub mod login;
pub mod logout;
pub mod refresh;
pub mod verify;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use verify::verify;

use actix_web::{web, HttpRequest, HttpResponse};

use ag_core::domain::IssuedSession;
use ag_shared::CookieConfig;

use crate::cookies::{read_token, session_cookies};
use crate::dto::{RefreshTokenRequest, TokenResponse};

/// `200` with the pair in both the cookies and the body
pub(crate) fn session_response(cookies: &CookieConfig, issued: &IssuedSession) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    for cookie in session_cookies(cookies, &issued.tokens) {
        response.cookie(cookie);
    }
    response.json(TokenResponse::from(issued))
}

/// Refresh token from the refresh cookie, or from the JSON body
pub(crate) fn presented_refresh_token(
    req: &HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
    cookies: &CookieConfig,
) -> Option<String> {
    read_token(req, &cookies.refresh_name).or_else(|| {
        body.and_then(|body| body.into_inner().refresh_token)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    })
}
