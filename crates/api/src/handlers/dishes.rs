//! Handlers for the `/dishes` resource.
//!
//! Photos live in object storage; rows keep only the object name and every
//! read resolves it to a short-lived signed URL.

use std::time::Duration;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cookorder_core::dish::{validate_create, validate_update};
use cookorder_core::error::CoreError;
use cookorder_core::photo::{check_photo, object_name_from_img};
use cookorder_core::search::name_pattern;
use cookorder_core::types::{parse_id, DbId};
use cookorder_db::models::dish::{CreateDish, Dish, UpdateDish};
use cookorder_db::repositories::DishRepo;
use cookorder_storage::{ObjectStore, StorageError};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::multipart::{accept_form, read_dish_form, UploadedFile};
use crate::state::AppState;

/// Dish as returned to clients, with `img` resolved to a signed URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishResponse {
    pub id: String,
    pub name_ja: String,
    pub name_en: String,
    pub price: i32,
    pub img: String,
}

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: &'static str,
    pub id: String,
}

/// Query parameters for `GET /dishes/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// POST /dishes
///
/// Multipart form with `nameJa`, `nameEn`, `price` and a `photo` file. Text
/// fields and the photo are validated before anything is uploaded.
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let form = read_dish_form(accept_form(multipart)?).await?;

    let fields = validate_create(&form.fields).map_err(AppError::InvalidFields)?;
    let photo = form
        .photo
        .ok_or_else(|| AppError::BadRequest("Missing required 'photo' file".into()))?;

    let object_name = upload_photo(state.storage.as_ref(), photo).await?;

    // An insert failure here leaves the uploaded object orphaned.
    let dish = DishRepo::create(&state.pool, &CreateDish::new(fields, object_name)).await?;
    tracing::info!(dish_id = dish.id, object_name = %dish.img, "Dish created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            status: "created",
            id: dish.id.to_string(),
        }),
    ))
}

/// GET /dishes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<DishResponse>>> {
    let dishes = DishRepo::list(&state.pool).await?;
    Ok(Json(present_all(&state, dishes).await?))
}

/// GET /dishes/search?name=
///
/// Case-insensitive match on either name; spaces act as wildcards.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<DishResponse>>> {
    let pattern = params
        .name
        .as_deref()
        .and_then(name_pattern)
        .ok_or_else(|| AppError::BadRequest("name parameter is required".into()))?;

    let dishes = DishRepo::search_by_name(&state.pool, &pattern).await?;
    Ok(Json(present_all(&state, dishes).await?))
}

/// GET /dishes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DishResponse>> {
    let id = existing_id(&raw_id)?;
    let dish = DishRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    Ok(Json(present(&state, dish).await?))
}

/// PUT /dishes/{id}
///
/// Partial update from a multipart form. Empty or missing fields keep the
/// stored value; a new photo replaces the stored object name but the old
/// object is left in the bucket.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<DishResponse>> {
    let id = existing_id(&raw_id)?;
    let form = read_dish_form(accept_form(multipart)?).await?;
    let patch = validate_update(&form.fields).map_err(AppError::InvalidFields)?;

    // Avoid uploading a photo for a dish that does not exist.
    if DishRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(&raw_id));
    }

    let img = match form.photo {
        Some(photo) => Some(upload_photo(state.storage.as_ref(), photo).await?),
        None => None,
    };

    let dish = DishRepo::update(&state.pool, id, &UpdateDish::new(patch, img))
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    tracing::info!(dish_id = dish.id, "Dish updated");

    Ok(Json(present(&state, dish).await?))
}

/// DELETE /dishes/{id}
///
/// Removes the row only; the photo object stays in the bucket.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = existing_id(&raw_id)?;
    if !DishRepo::delete(&state.pool, id).await? {
        return Err(not_found(&raw_id));
    }
    tracing::info!(dish_id = id, "Dish deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve a stored `img` value to a signed download URL.
///
/// Empty values, and values no object name can be recovered from, are
/// returned unchanged.
pub async fn resolve_img(
    store: &dyn ObjectStore,
    img: &str,
    expires_in: Duration,
) -> Result<String, StorageError> {
    match object_name_from_img(img) {
        Some(object_name) => store.signed_download_url(object_name, expires_in).await,
        None => Ok(img.to_string()),
    }
}

/// Check and upload a dish photo, returning its new object name.
async fn upload_photo(store: &dyn ObjectStore, photo: UploadedFile) -> AppResult<String> {
    let checked = check_photo(&photo.file_name, photo.data.len())?;
    let object_name = checked.object_name();

    store
        .upload(&object_name, photo.data.to_vec(), checked.format.content_type())
        .await?;
    tracing::debug!(object_name = %object_name, size_bytes = photo.data.len(), "Photo uploaded");

    Ok(object_name)
}

async fn present(state: &AppState, dish: Dish) -> AppResult<DishResponse> {
    let img = resolve_img(
        state.storage.as_ref(),
        &dish.img,
        state.config.signed_url_ttl(),
    )
    .await?;

    Ok(DishResponse {
        id: dish.id.to_string(),
        name_ja: dish.name_ja,
        name_en: dish.name_en,
        price: dish.price,
        img,
    })
}

async fn present_all(state: &AppState, dishes: Vec<Dish>) -> AppResult<Vec<DishResponse>> {
    let mut out = Vec::with_capacity(dishes.len());
    for dish in dishes {
        out.push(present(state, dish).await?);
    }
    Ok(out)
}

/// Blank ids are a malformed request; ids that cannot name a row are 404.
fn existing_id(raw_id: &str) -> AppResult<DbId> {
    if raw_id.trim().is_empty() {
        return Err(AppError::BadRequest("Dish id is required".into()));
    }
    parse_id(raw_id).ok_or_else(|| not_found(raw_id))
}

fn not_found(raw_id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Dish",
        id: raw_id.to_string(),
    })
}
