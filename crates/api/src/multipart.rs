//! Multipart form extraction for dish and upload endpoints.

use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::Multipart;
use cookorder_core::dish::DishFields;
use cookorder_core::photo::MAX_PHOTO_BYTES;

use crate::error::{AppError, AppResult};

/// Largest request body accepted on multipart routes: one photo plus the
/// text fields and multipart framing.
pub const MAX_FORM_BYTES: usize = MAX_PHOTO_BYTES + 2 * 1024 * 1024;

/// A file part read from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A dish create/update form.
#[derive(Debug, Default)]
pub struct DishForm {
    pub fields: DishFields,
    pub photo: Option<UploadedFile>,
}

/// Turn a failed `Multipart` extraction (wrong content type, missing
/// boundary) into a 400 with the usual JSON error body.
pub fn accept_form(payload: Result<Multipart, MultipartRejection>) -> AppResult<Multipart> {
    payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Read every part of a dish form. Unknown parts are ignored.
pub async fn read_dish_form(mut multipart: Multipart) -> AppResult<DishForm> {
    let mut form = DishForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "nameJa" => form.fields.name_ja = Some(read_text(field).await?),
            "nameEn" => form.fields.name_en = Some(read_text(field).await?),
            "price" => form.fields.price = Some(read_text(field).await?),
            "photo" => form.photo = read_file(field).await?,
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

/// Read the file part called `field_name`, ignoring every other part.
pub async fn read_file_part(
    mut multipart: Multipart,
    field_name: &str,
) -> AppResult<Option<UploadedFile>> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        if field.name() == Some(field_name) {
            file = read_file(field).await?;
        }
    }
    Ok(file)
}

async fn read_text(field: Field<'_>) -> AppResult<String> {
    field.text().await.map_err(bad_form)
}

/// Browsers send an empty, unnamed file part when no file was chosen;
/// that is treated as "no file".
async fn read_file(field: Field<'_>) -> AppResult<Option<UploadedFile>> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let content_type = field.content_type().map(str::to_string);
    let data = field.bytes().await.map_err(bad_form)?;

    if file_name.is_empty() && data.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadedFile {
        file_name,
        content_type,
        data,
    }))
}

fn bad_form(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart form: {}", err.body_text()))
}
