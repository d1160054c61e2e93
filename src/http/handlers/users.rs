//! User signup and directory listing.

use crate::application::ApplicationServices;
use crate::http::{
    auth::AuthUser,
    dto::{SignUpBody, UserResponse},
    error::ApiResult,
};
use crate::identity::services::SignUpRequest;
use axum::{Json, extract::State, http::StatusCode};

/// `POST /api/users`
///
/// Registers a user. Open to unauthenticated callers.
pub async fn sign_up<A: ApplicationServices>(
    State(app): State<A>,
    Json(body): Json<SignUpBody>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let mut request = SignUpRequest::new(body.name, body.email);
    if let Some(image) = body.image {
        request = request.with_image(image);
    }
    let user = app.users().sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// `GET /api/users`
pub async fn list_users<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = app.users().list_users().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}
