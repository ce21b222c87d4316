//! Dish photo rules: accepted formats, size limit, object naming, and
//! recovery of object names from stored `img` values.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::CoreError;

/// Maximum accepted photo size (10 MiB).
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// Content type used when an upload does not declare one.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Image formats accepted for dish photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Jpeg,
    Png,
    Webp,
}

impl PhotoFormat {
    /// Resolve the format from a lower-case file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// MIME type sent with the upload.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }
}

/// A photo file that passed type and size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedPhoto {
    pub format: PhotoFormat,
    /// Lower-case extension from the original filename, without the dot.
    pub extension: String,
}

impl CheckedPhoto {
    /// Generate a collision-resistant object name for this photo.
    pub fn object_name(&self) -> String {
        dish_object_name(&self.extension, Utc::now(), Uuid::new_v4())
    }
}

/// Lower-case extension of `filename`, without the dot. Empty if none.
pub fn file_extension(filename: &str) -> String {
    let base = base_name(filename);
    match base.rfind('.') {
        Some(idx) => base[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// Check that a dish photo's filename has an accepted extension.
pub fn check_photo_name(filename: &str) -> Result<CheckedPhoto, CoreError> {
    let extension = file_extension(filename);
    let format = PhotoFormat::from_extension(&extension).ok_or_else(|| {
        CoreError::Validation(
            "Invalid file type. Only jpg, jpeg, png, webp are allowed".to_string(),
        )
    })?;
    Ok(CheckedPhoto { format, extension })
}

/// Check a dish photo's filename and size.
pub fn check_photo(filename: &str, size: usize) -> Result<CheckedPhoto, CoreError> {
    let checked = check_photo_name(filename)?;
    check_size(size)?;
    Ok(checked)
}

/// Reject empty files and files over [`MAX_PHOTO_BYTES`].
pub fn check_size(size: usize) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".to_string()));
    }
    if size > MAX_PHOTO_BYTES {
        return Err(CoreError::Validation(format!(
            "File is too large ({size} bytes). Maximum is {MAX_PHOTO_BYTES} bytes"
        )));
    }
    Ok(())
}

/// Object name for a dish photo: `dish_{unix_seconds}_{uuid}.{ext}`.
pub fn dish_object_name(extension: &str, now: DateTime<Utc>, id: Uuid) -> String {
    if extension.is_empty() {
        format!("dish_{}_{id}", now.timestamp())
    } else {
        format!("dish_{}_{id}.{extension}", now.timestamp())
    }
}

/// Object name for a raw upload: `{uuid}_{sanitized filename}`.
pub fn upload_object_name(filename: &str, id: Uuid) -> String {
    let sanitized: String = base_name(filename)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        id.to_string()
    } else {
        format!("{id}_{sanitized}")
    }
}

/// Extract the storage object name from a stored `img` value.
///
/// Legacy rows hold a full public URL; the object name is its last path
/// segment. Newer rows hold the bare object name. Returns `None` for empty
/// values and for URLs without a usable last segment.
pub fn object_name_from_img(img: &str) -> Option<&str> {
    let img = img.trim();
    if img.is_empty() {
        return None;
    }
    if img.starts_with("https://") || img.starts_with("http://") {
        let without_suffix = img.split(['?', '#']).next().unwrap_or(img);
        let (_, path) = without_suffix.split_once("://")?;
        let (_, path) = path.split_once('/')?;
        return path.rsplit('/').find(|s| !s.is_empty());
    }
    Some(img)
}

/// Strip any directory components a client may have sent.
fn base_name(filename: &str) -> &str {
    filename.rsplit(['/', '\\']).next().unwrap_or(filename)
}
