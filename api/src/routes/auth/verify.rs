use actix_web::HttpResponse;

use crate::dto::VerifyResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /verify
///
/// Mounted behind [`AccessGuard`](crate::middleware::AccessGuard), so
/// reaching it means the access token verified.
pub async fn verify(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(VerifyResponse {
        subject: auth.subject,
        session_id: auth.session_id,
    })
}
