//! User queries

use shared::models::User;
use sqlx::SqlitePool;

const USER_COLUMNS: &str =
    "id, name, email, hashed_password, role, phone, profile_picture, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lookup by (already lowercased) email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
    sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, name, email, hashed_password, role, phone, profile_picture, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.role)
    .bind(&user.phone)
    .bind(&user.profile_picture)
    .bind(user.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Overwrite the editable profile fields
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    phone: &str,
    profile_picture: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET name = ?, phone = ?, profile_picture = ? WHERE id = ?")
        .bind(name)
        .bind(phone)
        .bind(profile_picture)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_password(
    pool: &SqlitePool,
    id: i64,
    hashed_password: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET hashed_password = ? WHERE id = ?")
        .bind(hashed_password)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
