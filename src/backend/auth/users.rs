/**
 * User Model and Database Operations
 *
 * This module handles account rows in the `users` table. Every statement binds
 * its arguments; nothing is spliced into SQL text.
 */

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User struct representing a row in the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Row id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// bcrypt hash of the password
    pub hash_pass: String,
}

/// Public part of a user, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `name` - Display name
/// * `email` - User email
/// * `hash_pass` - Hashed password
///
/// # Returns
/// Created user or error. A duplicate email surfaces as a unique-violation
/// database error (see [`is_unique_violation`]).
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    hash_pass: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, hash_pass)
        VALUES (?, ?, ?)
        RETURNING id, name, email, hash_pass
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(hash_pass)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, hash_pass
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get the public profile for an email
pub async fn get_profile_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<UserProfile>, sqlx::Error> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT name, email
        FROM users
        WHERE email = ?
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Delete the user with this email
///
/// # Returns
/// Number of rows removed (0 or 1)
pub async fn delete_user_by_email(pool: &SqlitePool, email: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE email = ?")
        .bind(email)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// True if `err` is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::connect_in_memory;
    use pretty_assertions::assert_eq;

    async fn pool() -> SqlitePool {
        connect_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let pool = pool().await;

        let created = create_user(&pool, "Ada", "ada@example.com", "$2b$hash").await.unwrap();
        let fetched = get_user_by_email(&pool, "ada@example.com").await.unwrap().unwrap();

        assert_eq!(created.id, fetched.id);
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.hash_pass, "$2b$hash");
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let pool = pool().await;

        assert!(get_user_by_email(&pool, "nobody@example.com").await.unwrap().is_none());
        assert!(get_profile_by_email(&pool, "nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let pool = pool().await;

        create_user(&pool, "Ada", "ada@example.com", "h1").await.unwrap();
        let err = create_user(&pool, "Other", "ada@example.com", "h2").await.unwrap_err();

        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_profile_omits_hash() {
        let pool = pool().await;
        create_user(&pool, "Ada", "ada@example.com", "secret-hash").await.unwrap();

        let profile = get_profile_by_email(&pool, "ada@example.com").await.unwrap().unwrap();

        assert_eq!(
            profile,
            UserProfile {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_delete_user() {
        let pool = pool().await;
        create_user(&pool, "Ada", "ada@example.com", "h").await.unwrap();

        assert_eq!(delete_user_by_email(&pool, "ada@example.com").await.unwrap(), 1);
        assert_eq!(delete_user_by_email(&pool, "ada@example.com").await.unwrap(), 0);
        assert!(get_user_by_email(&pool, "ada@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_with_quote_is_bound_not_spliced() {
        let pool = pool().await;
        create_user(&pool, "Ada", "ada@example.com", "h").await.unwrap();

        let hostile = "x' OR '1'='1";
        assert!(get_user_by_email(&pool, hostile).await.unwrap().is_none());
        assert_eq!(delete_user_by_email(&pool, hostile).await.unwrap(), 0);
    }
}
