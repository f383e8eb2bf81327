//! Client side of the todo board: the HTTP seam and the state cache that is
//! re-fetched after every mutation.

mod api;
mod board;
mod error;

pub use api::{HttpTodoApi, TodoApi};
pub use board::{NOTICE_TTL, Notice, Operation, TodoBoard};
pub use error::{ClientError, ClientResult};
