mod entry;
pub mod todos;

pub use entry::{API_PREFIX, router};
