pub mod repository;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::error::AppError;
use crate::models::{Event, EventFields, Schedule, Todo, User};

pub use repository::SqliteRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: i64) -> Result<Option<User>, sqlx::Error>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<User, sqlx::Error>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_schedule_by_user(&self, user_id: i64) -> Result<Option<Schedule>, sqlx::Error>;
    async fn insert_schedule(&self, user_id: i64) -> Result<Schedule, sqlx::Error>;
}

/// Event storage. Every lookup except `find_event` is filtered by schedule.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn fetch_events(&self, schedule_id: i64) -> Result<Vec<Event>, sqlx::Error>;
    async fn find_event(&self, id: i64) -> Result<Option<Event>, sqlx::Error>;
    async fn find_event_in_schedule(
        &self,
        schedule_id: i64,
        id: i64,
    ) -> Result<Option<Event>, sqlx::Error>;
    async fn insert_event(&self, schedule_id: i64, fields: &EventFields) -> Result<Event, sqlx::Error>;
    /// Returns false when no event with `id` exists in the schedule.
    async fn update_event(
        &self,
        schedule_id: i64,
        id: i64,
        fields: &EventFields,
    ) -> Result<bool, sqlx::Error>;
    async fn delete_event(&self, schedule_id: i64, id: i64) -> Result<bool, sqlx::Error>;
    /// Events on `date` without a start time, plus the total match count.
    async fn page_timeless_events(
        &self,
        schedule_id: i64,
        date: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Event>, i64), sqlx::Error>;
    /// Events on `date` with a start time ordered by start then end, plus the
    /// total match count.
    async fn page_timed_events(
        &self,
        schedule_id: i64,
        date: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Event>, i64), sqlx::Error>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn insert_todo(&self, schedule_id: i64, content: &str) -> Result<Todo, sqlx::Error>;
}

/// Open a pool and bring the schema up to date.
///
/// An in-memory database lives inside a single connection, so the pool is
/// pinned to one connection that is never recycled.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let in_memory = database_url.contains(":memory:");

    let mut options = SqlitePoolOptions::new();
    options = if in_memory {
        options.max_connections(1).idle_timeout(None::<Duration>).max_lifetime(None::<Duration>)
    } else {
        options.max_connections(max_connections)
    };

    let pool = options.connect(database_url).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    Ok(pool)
}
