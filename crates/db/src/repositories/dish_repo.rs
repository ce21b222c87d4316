//! Repository for the `dishes` table.

use cookorder_core::types::DbId;
use sqlx::PgPool;

use crate::models::dish::{CreateDish, Dish, UpdateDish};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name_ja, name_en, price, photo_url";

/// Provides CRUD and search operations for dishes.
pub struct DishRepo;

impl DishRepo {
    /// Insert a new dish, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDish) -> Result<Dish, sqlx::Error> {
        let query = format!(
            "INSERT INTO dishes (name_ja, name_en, price, photo_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(&input.name_ja)
            .bind(&input.name_en)
            .bind(input.price)
            .bind(&input.img)
            .fetch_one(pool)
            .await
    }

    /// Find a dish by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes WHERE id = $1");
        sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all dishes, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes ORDER BY id");
        sqlx::query_as::<_, Dish>(&query).fetch_all(pool).await
    }

    /// Case-insensitive match of an `ILIKE` pattern against either name.
    ///
    /// Build `pattern` with `cookorder_core::search::name_pattern`.
    pub async fn search_by_name(pool: &PgPool, pattern: &str) -> Result<Vec<Dish>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dishes
             WHERE name_ja ILIKE $1 OR name_en ILIKE $1
             ORDER BY id"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Update a dish. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDish,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!(
            "UPDATE dishes SET
                name_ja = COALESCE($2, name_ja),
                name_en = COALESCE($3, name_en),
                price = COALESCE($4, price),
                photo_url = COALESCE($5, photo_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .bind(&input.name_ja)
            .bind(&input.name_en)
            .bind(input.price)
            .bind(&input.img)
            .fetch_optional(pool)
            .await
    }

    /// Delete a dish by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
