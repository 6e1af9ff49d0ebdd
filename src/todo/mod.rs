pub mod item;
pub mod priority;

pub use item::{NewTodo, TodoItem, TodoStatus};
pub use priority::Priority;
