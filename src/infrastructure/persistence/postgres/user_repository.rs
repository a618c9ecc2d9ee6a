use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
  value_objects::{Email, Username},
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  username: String,
  email: String,
  password_hash: String,
  is_admin: bool,
  is_approved: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.username,
      row.email,
      row.password_hash,
      row.is_admin,
      row.is_approved,
      row.created_at,
      row.updated_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (
                id,
                username,
                email,
                password_hash,
                is_admin,
                is_approved,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id,
                username,
                email,
                password_hash,
                is_admin,
                is_approved,
                created_at,
                updated_at
            "#,
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.is_admin)
    .bind(user.is_approved)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash, is_admin, is_approved, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash, is_admin, is_approved, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash, is_admin, is_approved, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
    )
    .bind(username.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            UPDATE users
            SET
                is_admin = $2,
                is_approved = $3,
                updated_at = $4
            WHERE id = $1
            RETURNING id, username, email, password_hash, is_admin, is_approved, created_at, updated_at
            "#,
    )
    .bind(user.id)
    .bind(user.is_admin)
    .bind(user.is_approved)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::RowNotFound) => Err(AuthError::Repository(RepositoryError::NotFound)),
      Err(e) => Err(e.into()),
    }
  }

  async fn list_all(&self) -> Result<Vec<User>, AuthError> {
    let rows = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash, is_admin, is_approved, created_at, updated_at
            FROM users
            ORDER BY username
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn count(&self) -> Result<i64, AuthError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
      .fetch_one(&self.pool)
      .await?;

    Ok(count)
  }
}
