//! Integration tests for `DishRepo` against a real database:
//! - Create assigns ids and stores the object name
//! - Partial update keeps unspecified columns
//! - Search is case-insensitive, treats spaces as wildcards, escapes metacharacters
//! - Delete reports whether a row was removed

use cookorder_core::search::name_pattern;
use cookorder_db::models::dish::{CreateDish, UpdateDish};
use cookorder_db::repositories::DishRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_dish(name_ja: &str, name_en: &str, price: i32) -> CreateDish {
    CreateDish {
        name_ja: name_ja.to_string(),
        name_en: name_en.to_string(),
        price,
        img: format!("dish_0_{}.jpg", name_en.to_lowercase().replace(' ', "_")),
    }
}

async fn search(pool: &PgPool, query: &str) -> Vec<String> {
    let pattern = name_pattern(query).unwrap();
    DishRepo::search_by_name(pool, &pattern)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name_en)
        .collect()
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find(pool: PgPool) {
    let created = DishRepo::create(&pool, &new_dish("カレーライス", "Curry Rice", 800))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.img, "dish_0_curry_rice.jpg");

    let found = DishRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.name_ja, "カレーライス");
    assert_eq!(found.name_en, "Curry Rice");
    assert_eq!(found.price, 800);
    assert_eq!(found.img, created.img);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_returns_none(pool: PgPool) {
    assert!(DishRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_by_id(pool: PgPool) {
    let a = DishRepo::create(&pool, &new_dish("うどん", "Udon", 500)).await.unwrap();
    let b = DishRepo::create(&pool, &new_dish("そば", "Soba", 550)).await.unwrap();

    let all = DishRepo::list(&pool).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_price_only_keeps_other_columns(pool: PgPool) {
    let dish = DishRepo::create(&pool, &new_dish("ラーメン", "Ramen", 900)).await.unwrap();

    let updated = DishRepo::update(
        &pool,
        dish.id,
        &UpdateDish {
            price: Some(950),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.price, 950);
    assert_eq!(updated.name_ja, "ラーメン");
    assert_eq!(updated.name_en, "Ramen");
    assert_eq!(updated.img, dish.img);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_photo(pool: PgPool) {
    let dish = DishRepo::create(&pool, &new_dish("天ぷら", "Tempura", 1200)).await.unwrap();

    let updated = DishRepo::update(
        &pool,
        dish.id,
        &UpdateDish {
            img: Some("dish_1_new.png".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.img, "dish_1_new.png");
    assert_eq!(updated.price, 1200);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let result = DishRepo::update(
        &pool,
        424_242,
        &UpdateDish {
            price: Some(100),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_space_is_wildcard_and_case_insensitive(pool: PgPool) {
    DishRepo::create(&pool, &new_dish("カレーライス", "Curry Rice", 800)).await.unwrap();
    DishRepo::create(&pool, &new_dish("カツカレー", "Katsu Curry", 1000)).await.unwrap();
    DishRepo::create(&pool, &new_dish("親子丼", "Oyakodon", 700)).await.unwrap();

    assert_eq!(search(&pool, "curry rice").await, vec!["Curry Rice"]);
    assert_eq!(search(&pool, "CURRY").await, vec!["Curry Rice", "Katsu Curry"]);
    assert_eq!(search(&pool, "カレー").await, vec!["Curry Rice", "Katsu Curry"]);
    assert!(search(&pool, "sushi").await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_escapes_like_metacharacters(pool: PgPool) {
    DishRepo::create(&pool, &new_dish("ジュース", "100% Juice", 300)).await.unwrap();
    DishRepo::create(&pool, &new_dish("ジュース大", "1000 Juice", 400)).await.unwrap();

    assert_eq!(search(&pool, "100%").await, vec!["100% Juice"]);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete(pool: PgPool) {
    let dish = DishRepo::create(&pool, &new_dish("餃子", "Gyoza", 450)).await.unwrap();

    assert!(DishRepo::delete(&pool, dish.id).await.unwrap());
    assert!(DishRepo::find_by_id(&pool, dish.id).await.unwrap().is_none());
    assert!(!DishRepo::delete(&pool, dish.id).await.unwrap());
}
