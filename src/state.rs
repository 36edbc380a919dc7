use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtKeys, PasswordHasher};
use crate::config::AppConfig;
use crate::db::{EventRepository, ScheduleRepository, SqliteRepository, TodoRepository, UserRepository};
use crate::services::{EventService, ScheduleScope, TodoService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub users: Arc<dyn UserRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub events: Arc<dyn EventRepository>,
    pub todos: Arc<dyn TodoRepository>,
    pub keys: Arc<JwtKeys>,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &AppConfig) -> Self {
        let repo = Arc::new(SqliteRepository::new(db.clone()));

        Self {
            db,
            users: repo.clone(),
            schedules: repo.clone(),
            events: repo.clone(),
            todos: repo,
            keys: Arc::new(JwtKeys::new(&config.jwt_secret, config.jwt_ttl_hours)),
            hasher: PasswordHasher::new(config.bcrypt_cost),
        }
    }

    fn scope(&self) -> ScheduleScope {
        ScheduleScope::new(self.users.clone(), self.schedules.clone())
    }

    pub fn event_service(&self) -> EventService {
        EventService::new(self.scope(), self.events.clone())
    }

    pub fn todo_service(&self) -> TodoService {
        TodoService::new(self.scope(), self.todos.clone())
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(
            self.users.clone(),
            self.schedules.clone(),
            self.keys.clone(),
            self.hasher,
        )
    }
}
