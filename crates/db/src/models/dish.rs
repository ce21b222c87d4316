//! Dish entity model and DTOs.

use cookorder_core::dish::{ValidDish, ValidDishPatch};
use cookorder_core::types::DbId;
use sqlx::FromRow;

/// A row from the `dishes` table.
///
/// `img` is stored in the `photo_url` column: an object name, a legacy
/// full URL, or empty.
#[derive(Debug, Clone, FromRow)]
pub struct Dish {
    pub id: DbId,
    pub name_ja: String,
    pub name_en: String,
    pub price: i32,
    #[sqlx(rename = "photo_url")]
    pub img: String,
}

/// DTO for inserting a new dish.
#[derive(Debug, Clone)]
pub struct CreateDish {
    pub name_ja: String,
    pub name_en: String,
    pub price: i32,
    pub img: String,
}

impl CreateDish {
    pub fn new(fields: ValidDish, img: String) -> Self {
        Self {
            name_ja: fields.name_ja,
            name_en: fields.name_en,
            price: fields.price,
            img,
        }
    }
}

/// DTO for a partial update. `None` fields keep the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateDish {
    pub name_ja: Option<String>,
    pub name_en: Option<String>,
    pub price: Option<i32>,
    pub img: Option<String>,
}

impl UpdateDish {
    pub fn new(patch: ValidDishPatch, img: Option<String>) -> Self {
        Self {
            name_ja: patch.name_ja,
            name_en: patch.name_en,
            price: patch.price,
            img,
        }
    }
}
