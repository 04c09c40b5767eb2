pub mod task;
pub mod viewport;

pub use task::Task;
pub use viewport::{Direction, Viewport};
