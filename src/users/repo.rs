use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgExecutor, FromRow};
use time::OffsetDateTime;

/// A row of the `users` table. Serialized verbatim, `password` included:
/// the wire contract returns it as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub mobile_number: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Field set for an insert; `id` and `created_at` are assigned by the store.
#[derive(Debug)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub mobile_number: String,
}

impl User {
    pub async fn list_all<'e, E>(exec: E) -> Result<Vec<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, mobile_number, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(exec)
        .await
    }

    pub async fn find_by_id<'e, E>(exec: E, id: i64) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, mobile_number, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(exec)
        .await
    }

    /// Lookup used only by the uniqueness checks.
    pub async fn find_by_email<'e, E>(exec: E, email: &str) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, mobile_number, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(exec)
        .await
    }

    pub async fn insert<'e, E>(exec: E, new_user: &NewUser) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password, mobile_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, email, password, mobile_number, created_at
            "#,
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(&new_user.mobile_number)
        .fetch_one(exec)
        .await
    }

    /// Full-row write of an already-merged entity. `id` and `created_at`
    /// never change.
    pub async fn update<'e, E>(exec: E, user: &User) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, password = $5, mobile_number = $6
            WHERE id = $1
            RETURNING id, first_name, last_name, email, password, mobile_number, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.mobile_number)
        .fetch_one(exec)
        .await
    }

    /// Returns false when no row matched.
    pub async fn delete<'e, E>(exec: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
