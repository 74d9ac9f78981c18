//! Session cookies carrying the token pair

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

use ag_core::domain::TokenPair;
use ag_shared::config::{CookieConfig, SameSitePolicy};

/// Cookies that hand a freshly minted pair to the client
pub fn session_cookies(config: &CookieConfig, tokens: &TokenPair) -> [Cookie<'static>; 2] {
    [
        build(
            config,
            &config.access_name,
            &tokens.access_token,
            "/",
            tokens.access_expires_in,
        ),
        build(
            config,
            &config.refresh_name,
            &tokens.refresh_token,
            &config.refresh_path,
            tokens.refresh_expires_in,
        ),
    ]
}

/// Cookies that make the client drop both tokens
pub fn removal_cookies(config: &CookieConfig) -> [Cookie<'static>; 2] {
    [
        build(config, &config.access_name, "", "/", 0),
        build(config, &config.refresh_name, "", &config.refresh_path, 0),
    ]
}

/// Non-empty value of the named cookie
pub fn read_token(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn build(
    config: &CookieConfig,
    name: &str,
    value: &str,
    path: &str,
    max_age_secs: i64,
) -> Cookie<'static> {
    let mut builder = Cookie::build(name.to_string(), value.to_string())
        .path(path.to_string())
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config.same_site))
        .max_age(Duration::seconds(max_age_secs.max(0)));
    if let Some(domain) = &config.domain {
        builder = builder.domain(domain.clone());
    }
    builder.finish()
}

fn same_site(policy: SameSitePolicy) -> SameSite {
    match policy {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    }
}
