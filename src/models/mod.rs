pub mod event;
pub mod schedule;
pub mod todo;
pub mod user;

pub use event::{
    Event, EventFields, NewEventRequest, PageQuery, TimedEvent, TimedPage, TimelessPage,
    UpdateEventRequest,
};
pub use schedule::Schedule;
pub use todo::{NewTodoRequest, Todo};
pub use user::{Credentials, LoginResponse, User};
