use std::sync::Arc;

use tracing::info;

use crate::db::TodoRepository;
use crate::error::AppError;
use crate::models::{NewTodoRequest, Schedule, Todo};
use crate::services::ScheduleScope;

#[derive(Clone)]
pub struct TodoService {
    scope: ScheduleScope,
    todos: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(scope: ScheduleScope, todos: Arc<dyn TodoRepository>) -> Self {
        Self { scope, todos }
    }

    pub async fn for_user(&self, user_id: i64) -> Result<ScheduleTodos, AppError> {
        let schedule = self.scope.resolve(user_id).await?;
        Ok(ScheduleTodos {
            schedule,
            todos: self.todos.clone(),
        })
    }
}

pub struct ScheduleTodos {
    schedule: Schedule,
    todos: Arc<dyn TodoRepository>,
}

impl ScheduleTodos {
    pub async fn add_todo(&self, req: NewTodoRequest) -> Result<Todo, AppError> {
        let todo = self.todos.insert_todo(self.schedule.id, &req.content).await?;
        info!("created todo {} in schedule {}", todo.id, self.schedule.id);
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ScheduleRepository, SqliteRepository, UserRepository, connect};

    #[tokio::test]
    async fn test_add_todo() {
        let pool = connect("sqlite::memory:", 1).await.expect("Failed to create test db");
        let repo = Arc::new(SqliteRepository::new(pool));
        let service = TodoService::new(ScheduleScope::new(repo.clone(), repo.clone()), repo.clone());

        let user = repo.insert_user("a@example.com", "hash").await.unwrap();

        // スケジュールがまだ無い
        assert!(matches!(service.for_user(user.id).await, Err(AppError::ScheduleNotFound)));

        let schedule = repo.insert_schedule(user.id).await.unwrap();
        let todo = service
            .for_user(user.id)
            .await
            .expect("Failed to resolve schedule")
            .add_todo(NewTodoRequest { content: "장보기".to_string() })
            .await
            .expect("Failed to add todo");
        assert_eq!(todo.content, "장보기");
        assert_eq!(todo.schedule_id, schedule.id);
    }
}
