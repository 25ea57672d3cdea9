//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                user_name,
                name,
                password_hash,
                user_role,
                token_version,
                email_verified,
                email_verified_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.user_name.as_str())
        .bind(user.name.as_deref())
        .bind(user.password_hash.as_phc_string())
        .bind(user.user_role.id())
        .bind(user.token_version)
        .bind(user.email_verified)
        .bind(user.email_verified_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                user_name,
                name,
                password_hash,
                user_role,
                token_version,
                email_verified,
                email_verified_at,
                deleted_at,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                user_name,
                name,
                password_hash,
                user_role,
                token_version,
                email_verified,
                email_verified_at,
                deleted_at,
                created_at,
                updated_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_name = $1)")
                .bind(user_name.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_token_version(&self, user_id: &UserId) -> AuthResult<Option<i32>> {
        let version: Option<i32> = sqlx::query_scalar(
            "SELECT token_version FROM users WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(version)
    }

    async fn increment_token_version(&self, user_id: &UserId) -> AuthResult<Option<i32>> {
        let version: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET token_version = token_version + 1,
                updated_at = now()
            WHERE user_id = $1 AND deleted_at IS NULL
            RETURNING token_version
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(version)
    }

    async fn update_password(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        expected_version: Option<i32>,
    ) -> AuthResult<Option<i32>> {
        let version: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET password_hash = $2,
                token_version = token_version + 1,
                updated_at = now()
            WHERE user_id = $1
              AND deleted_at IS NULL
              AND ($3::INTEGER IS NULL OR token_version = $3)
            RETURNING token_version
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(password_hash.as_phc_string())
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await?;

        Ok(version)
    }

    async fn update_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<Option<i32>> {
        let version: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET user_role = $2,
                token_version = token_version + 1,
                updated_at = now()
            WHERE user_id = $1 AND deleted_at IS NULL
            RETURNING token_version
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role.id())
        .fetch_optional(&self.pool)
        .await?;

        Ok(version)
    }

    async fn soft_delete(&self, user_id: &UserId) -> AuthResult<Option<i32>> {
        let version: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET deleted_at = now(),
                token_version = token_version + 1,
                updated_at = now()
            WHERE user_id = $1 AND deleted_at IS NULL
            RETURNING token_version
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(version)
    }

    async fn mark_email_verified(&self, user_id: &UserId) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET email_verified = TRUE,
                email_verified_at = now(),
                updated_at = now()
            WHERE user_id = $1 AND deleted_at IS NULL AND email_verified = FALSE
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }
}

/// A concurrent registration can pass the `exists_by_*` checks and still
/// lose on the unique index.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some("users_user_name_key") => AuthError::UserNameTaken,
                _ => AuthError::EmailTaken,
            };
        }
    }
    AuthError::from(err)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    user_name: String,
    name: Option<String>,
    password_hash: String,
    user_role: i16,
    token_version: i32,
    email_verified: bool,
    email_verified_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            user_name: UserName::from_db(self.user_name),
            name: self.name,
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            user_role,
            token_version: self.token_version,
            email_verified: self.email_verified,
            email_verified_at: self.email_verified_at,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
