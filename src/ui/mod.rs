//! Terminal presentation of the board. Everything here is a pure projection
//! of client state; nothing reaches the server directly.

mod command;
mod view;

pub use command::{Command, CommandError, HELP, confirm_prompt, is_affirmative};
pub use view::{BoardView, RowView, Stats};
