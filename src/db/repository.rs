use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::db::{EventRepository, ScheduleRepository, TodoRepository, UserRepository};
use crate::models::{Event, EventFields, Schedule, Todo, User};
use crate::time::now_rfc3339;

const EVENT_COLUMNS: &str =
    "id, schedule_id, content, date, start_time, end_time, created_at, updated_at";

/// SQLite-backed store for every entity.
#[derive(Clone)]
pub struct SqliteRepository {
    db: SqlitePool,
}

impl SqliteRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn find_user(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password, created_at, updated_at FROM users WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password, created_at, updated_at FROM users WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
    }

    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<User, sqlx::Error> {
        let now = now_rfc3339();

        let id = sqlx::query(
            "INSERT INTO users (email, password, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)"
        )
        .bind(email)
        .bind(password_hash)
        .bind(&now)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        Ok(User {
            id,
            email: email.to_string(),
            password: password_hash.to_string(),
            created_at: now.clone(),
            updated_at: now,
        })
    }
}

#[async_trait]
impl ScheduleRepository for SqliteRepository {
    async fn find_schedule_by_user(&self, user_id: i64) -> Result<Option<Schedule>, sqlx::Error> {
        sqlx::query_as::<_, Schedule>(
            "SELECT id, user_id, created_at, updated_at FROM schedules WHERE user_id = ?"
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
    }

    async fn insert_schedule(&self, user_id: i64) -> Result<Schedule, sqlx::Error> {
        let now = now_rfc3339();

        let id = sqlx::query(
            "INSERT INTO schedules (user_id, created_at, updated_at) VALUES (?1, ?2, ?2)"
        )
        .bind(user_id)
        .bind(&now)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        Ok(Schedule {
            id,
            user_id,
            created_at: now.clone(),
            updated_at: now,
        })
    }
}

#[async_trait]
impl EventRepository for SqliteRepository {
    async fn fetch_events(&self, schedule_id: i64) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE schedule_id = ? ORDER BY id"
        ))
        .bind(schedule_id)
        .fetch_all(&self.db)
        .await
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    async fn find_event_in_schedule(
        &self,
        schedule_id: i64,
        id: i64,
    ) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ? AND schedule_id = ?"
        ))
        .bind(id)
        .bind(schedule_id)
        .fetch_optional(&self.db)
        .await
    }

    async fn insert_event(&self, schedule_id: i64, fields: &EventFields) -> Result<Event, sqlx::Error> {
        let now = now_rfc3339();

        let id = sqlx::query(
            r#"
            INSERT INTO events
                (schedule_id, content, date, start_time, end_time, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#
        )
        .bind(schedule_id)
        .bind(&fields.content)
        .bind(&fields.date)
        .bind(&fields.start_time)
        .bind(&fields.end_time)
        .bind(&now)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        Ok(Event {
            id,
            schedule_id,
            content: fields.content.clone(),
            date: fields.date.clone(),
            start_time: fields.start_time.clone(),
            end_time: fields.end_time.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn update_event(
        &self,
        schedule_id: i64,
        id: i64,
        fields: &EventFields,
    ) -> Result<bool, sqlx::Error> {
        let now = now_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE events
            SET content = ?1,
                date = ?2,
                start_time = ?3,
                end_time = ?4,
                updated_at = ?5
            WHERE id = ?6 AND schedule_id = ?7
            "#
        )
        .bind(&fields.content)
        .bind(&fields.date)
        .bind(&fields.start_time)
        .bind(&fields.end_time)
        .bind(&now)
        .bind(id)
        .bind(schedule_id)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(result > 0)
    }

    async fn delete_event(&self, schedule_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = ? AND schedule_id = ?")
            .bind(id)
            .bind(schedule_id)
            .execute(&self.db)
            .await?
            .rows_affected();

        Ok(result > 0)
    }

    async fn page_timeless_events(
        &self,
        schedule_id: i64,
        date: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Event>, i64), sqlx::Error> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE schedule_id = ? AND date = ? AND start_time IS NULL
            ORDER BY id
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(schedule_id)
        .bind(date)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM events WHERE schedule_id = ? AND date = ? AND start_time IS NULL"
        )
        .bind(schedule_id)
        .bind(date)
        .fetch_one(&self.db)
        .await?;

        Ok((events, total))
    }

    async fn page_timed_events(
        &self,
        schedule_id: i64,
        date: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Event>, i64), sqlx::Error> {
        // Open-ended events sort after ranged ones sharing a start time.
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE schedule_id = ? AND date = ? AND start_time IS NOT NULL
            ORDER BY start_time ASC, end_time IS NULL, end_time ASC, id ASC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(schedule_id)
        .bind(date)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM events WHERE schedule_id = ? AND date = ? AND start_time IS NOT NULL"
        )
        .bind(schedule_id)
        .bind(date)
        .fetch_one(&self.db)
        .await?;

        Ok((events, total))
    }
}

#[async_trait]
impl TodoRepository for SqliteRepository {
    async fn insert_todo(&self, schedule_id: i64, content: &str) -> Result<Todo, sqlx::Error> {
        let now = now_rfc3339();

        let id = sqlx::query(
            "INSERT INTO todos (schedule_id, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)"
        )
        .bind(schedule_id)
        .bind(content)
        .bind(&now)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        Ok(Todo {
            id,
            schedule_id,
            content: content.to_string(),
            created_at: now.clone(),
            updated_at: now,
        })
    }
}
