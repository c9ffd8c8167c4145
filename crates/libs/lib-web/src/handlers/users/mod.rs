//! # User Handlers
//!
//! Reads are public. `PUT` and `DELETE` sit behind
//! [`require_auth`](crate::middleware::require_auth) and receive the caller's
//! [`Claims`].
//!
//! Missing ids are always a `404` with a JSON body.

use super::{check_password_length, form_rejection, hash_blocking, path_rejection, Profile};
use axum::extract::{
    rejection::{FormRejection, PathRejection},
    Extension, Form, Json, Path, State,
};
use lib_auth::Claims;
use lib_core::dto::{UpdateForm, UserView};
use lib_core::{AppError, Config, UserStore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// `GET /` - public greeting.
pub async fn welcome() -> Json<&'static str> {
    Json("Welcome")
}

/// `GET /users`
#[instrument(skip_all)]
pub async fn list_users(
    State(store): State<Arc<dyn UserStore>>,
) -> Result<Json<Vec<UserView>>, AppError> {
    let users = store.list_all().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// `GET /users/{id}`
#[instrument(skip_all)]
pub async fn get_user(
    State(store): State<Arc<dyn UserStore>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserView>, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    let user = store.find_by_id(id).await?;
    Ok(Json(UserView::from(user)))
}

/// `GET /users/{role}/role`
#[instrument(skip_all)]
pub async fn list_users_by_role(
    State(store): State<Arc<dyn UserStore>>,
    role: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<UserView>>, AppError> {
    let Path(role) = role.map_err(path_rejection)?;
    let users = store.find_by_role(role.trim()).await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// `PUT /users/{id}` - overwrite name, address, telp, email and password.
///
/// Id and role are never changed. The new password is hashed before it
/// reaches the store.
#[instrument(skip_all)]
pub async fn update_user(
    State(store): State<Arc<dyn UserStore>>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<UpdateForm>, FormRejection>,
) -> Result<Json<UserView>, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    let Form(form) = form.map_err(form_rejection)?;
    info!("[UPDATE] User {} updated by {}", id, claims.sub);

    let mut user = store.find_by_id(id).await?;

    let profile = Profile::parse(form.name, form.address, &form.telp, form.email)?;
    if form.password.is_empty() {
        warn!("[UPDATE] Empty password");
        return Err(AppError::InvalidInput("password cannot be empty".to_string()));
    }
    check_password_length(&form.password)?;

    user.name = profile.name;
    user.address = profile.address;
    user.telp = profile.telp;
    user.email = profile.email;
    user.password = hash_blocking(form.password, config.bcrypt_cost).await?;

    store.update(&user).await?;

    Ok(Json(UserView::from(user)))
}

/// `DELETE /users/{id}` - responds with the user as it was before deletion.
#[instrument(skip_all)]
pub async fn delete_user(
    State(store): State<Arc<dyn UserStore>>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserView>, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    info!("[DELETE] User {} deleted by {}", id, claims.sub);

    let user = store.find_by_id(id).await?;
    store.delete(user.id).await?;

    Ok(Json(UserView::from(user)))
}
