use chrono::{DateTime, Utc};
use gateward_core::{
    Email, NewUser, Password, ResetToken, Role, User, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres, Row, postgres::PgRow};
use uuid::Uuid;

use super::compute_password_hash;

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password.clone())
            .await
            .map_err(UserStoreError::HashingError)?;

        let id = Uuid::new_v4();
        let query = sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, role)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(new_user.email.as_ref().expose_secret().as_str())
        .bind(password_hash.expose_secret().as_str())
        .bind(new_user.role.as_str());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        User::parse(id, new_user.email, password_hash, new_user.role, None, None)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn find_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, role, reset_token, reset_token_expiry
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Storing reset token in PostgreSQL", skip_all)]
    async fn store_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET reset_token = $1, reset_token_expiry = $2
                WHERE email = $3
            "#,
        )
        .bind(token.as_str())
        .bind(expires_at)
        .bind(email.as_ref().expose_secret().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Consuming reset token in PostgreSQL", skip_all)]
    async fn consume_reset_token(
        &self,
        token: &ResetToken,
        new_password: Password,
        now: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::HashingError)?;

        // One conditional update: token match, expiry validity, hash
        // swap, and clearing of the token fields are a single row-atomic
        // statement, so a live token can be consumed by at most one
        // caller.
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1, reset_token = NULL, reset_token_expiry = NULL
                WHERE reset_token = $2 AND reset_token_expiry >= $3
            "#,
        )
        .bind(password_hash.expose_secret().as_str())
        .bind(token.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::InvalidOrExpiredToken);
        }

        Ok(())
    }
}

fn user_from_row(row: &PgRow) -> Result<User, UserStoreError> {
    let id: Uuid = get_column(row, "id")?;
    let email: String = get_column(row, "email")?;
    let password_hash: String = get_column(row, "password_hash")?;
    let role: String = get_column(row, "role")?;
    let reset_token: Option<String> = get_column(row, "reset_token")?;
    let reset_token_expiry: Option<DateTime<Utc>> = get_column(row, "reset_token_expiry")?;

    let email = Email::try_from(email).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
    let role: Role = role
        .parse()
        .map_err(|e: gateward_core::UnknownRole| UserStoreError::UnexpectedError(e.to_string()))?;
    let reset_token = reset_token
        .map(ResetToken::try_from)
        .transpose()
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

    User::parse(
        id,
        email,
        Secret::from(password_hash),
        role,
        reset_token,
        reset_token_expiry,
    )
    .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
}

fn get_column<'r, T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>>(
    row: &'r PgRow,
    column: &str,
) -> Result<T, UserStoreError> {
    row.try_get(column)
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
}
