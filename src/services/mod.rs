pub mod event_service;
pub mod scope;
pub mod todo_service;
pub mod user_service;

pub use event_service::{EventService, PAGE_SIZE, ScheduleEvents};
pub use scope::ScheduleScope;
pub use todo_service::{ScheduleTodos, TodoService};
pub use user_service::UserService;
