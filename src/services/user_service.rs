use crate::dto::dashboard_dto::RecruiterRef;
use crate::models::user::{Role, User, UserRow};
use anyhow::Result;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, role, full_name, phone, avatar, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Resolve an id to a recruiter, for the performance views. `None` when
    /// the user is missing or has a different role.
    pub async fn find_recruiter(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self
            .find_by_id(id)
            .await?
            .filter(|u| u.role == Role::Recruiter))
    }

    /// Id/username pairs for the dashboard filter dropdowns.
    pub async fn list_recruiters(&self) -> Result<Vec<RecruiterRef>> {
        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            "SELECT id, username FROM users WHERE role = $1 ORDER BY username ASC",
        )
        .bind(Role::Recruiter.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, username)| RecruiterRef { id, username })
            .collect())
    }

    pub async fn usernames_for(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, username FROM users WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}
