/// Task model and database operations
///
/// Tasks are the records the ownership-enforcement layer guards. Every query
/// in this module that reads or mutates an existing row is scoped by
/// `user_id`, so a task id belonging to another user behaves exactly like an
/// id that doesn't exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     text VARCHAR(255) NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The owner reference is written once at creation and no operation here
/// updates it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Task model representing a single to-do item
///
/// Serializes to the wire shape
/// `{id, text, completed, user_id, createdAt, updatedAt}`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Task text (non-empty, at most 255 chars after trimming; validated at
    /// the API boundary)
    pub text: String,

    /// Completion flag, false on creation
    pub completed: bool,

    /// Owning user; immutable after creation
    pub user_id: Uuid,

    /// When the task was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Owning user (the authenticated caller)
    pub user_id: Uuid,

    /// Task text, already trimmed and validated
    pub text: String,
}

/// Input for updating a task
///
/// Only non-None fields are written; `updated_at` is always bumped.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New task text, already trimmed and validated
    pub text: Option<String>,

    /// New completion flag
    pub completed: Option<bool>,
}

impl Task {
    /// Creates a new task owned by `data.user_id`
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, text)
            VALUES ($1, $2)
            RETURNING id, text, completed, user_id, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.text)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user, oldest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, text, completed, user_id, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by ID, restricted to the given owner
    ///
    /// Returns None both when the id doesn't exist and when it belongs to a
    /// different user; callers cannot tell the two apart.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, text, completed, user_id, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Updates a task, restricted to the given owner
    ///
    /// Builds the SET list dynamically from the fields present in `data`; the
    /// WHERE clause keeps the write ownership-scoped so the update and the
    /// ownership check are a single atomic statement.
    ///
    /// Returns the updated task, or None if no row matched `(id, owner_id)`.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.text.is_some() {
            bind_count += 1;
            query.push_str(&format!(", text = ${}", bind_count));
        }
        if data.completed.is_some() {
            bind_count += 1;
            query.push_str(&format!(", completed = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 AND user_id = $2 \
             RETURNING id, text, completed, user_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id).bind(owner_id);

        if let Some(text) = data.text {
            q = q.bind(text);
        }
        if let Some(completed) = data.completed {
            q = q.bind(completed);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task, restricted to the given owner
    ///
    /// Returns true if a row was removed, false if no row matched
    /// `(id, owner_id)`; absent and foreign-owned ids are indistinguishable.
    pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
