//! `SQLite` implementation of [`UserRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use nutrihub_app::ports::UserRepository;
use nutrihub_domain::error::NutriHubError;
use nutrihub_domain::id::UserId;
use nutrihub_domain::user::User;

use crate::codec::{decode, decode_ts, encode_ts};
use crate::error::{StorageError, conflict_or_storage};

struct Wrapper(User);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(User {
            id: decode(&id)?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            created_at: decode_ts(&created_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (id, name, email, created_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";

/// `SQLite`-backed user repository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: User) -> Result<User, NutriHubError> {
        sqlx::query(INSERT)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(encode_ts(user.created_at))
            .execute(&self.pool)
            .await
            .map_err(|err| conflict_or_storage(err, "User", "email", &user.email))?;

        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, NutriHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }
}
