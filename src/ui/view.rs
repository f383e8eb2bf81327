use askama::Template;

use crate::{
    client::{TodoApi, TodoBoard},
    types::TodoResponse,
};

const STRIKE: char = '\u{0336}';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl Stats {
    pub fn of(todos: &[TodoResponse]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|todo| todo.completed).count();
        Self {
            total,
            completed,
            remaining: total - completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: i64,
    pub checkbox: &'static str,
    /// Title as displayed; struck through when completed.
    pub title: String,
    pub completed: bool,
}

impl RowView {
    fn project(todo: &TodoResponse) -> Self {
        let (checkbox, title) = if todo.completed {
            ("[x]", strike(&todo.title))
        } else {
            ("[ ]", todo.title.clone())
        };
        Self {
            id: todo.id,
            checkbox,
            title,
            completed: todo.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "board.txt")]
pub struct BoardView {
    pub rows: Vec<RowView>,
    pub stats: Stats,
    pub loading: bool,
    pub notice: Option<String>,
}

impl BoardView {
    /// Rows keep the order the server returned.
    pub fn project(todos: &[TodoResponse], loading: bool, notice: Option<&str>) -> Self {
        Self {
            rows: todos.iter().map(RowView::project).collect(),
            stats: Stats::of(todos),
            loading,
            notice: notice.map(str::to_string),
        }
    }

    pub fn of<A: TodoApi>(board: &TodoBoard<A>) -> Self {
        Self::project(board.todos(), board.is_loading(), board.notice())
    }

    /// Shown while a fetch is outstanding. The cached rows stay hidden but
    /// their counts remain.
    pub fn loading<A: TodoApi>(board: &TodoBoard<A>) -> Self {
        Self::project(board.todos(), true, None)
    }

    pub fn is_empty(&self) -> bool {
        !self.loading && self.rows.is_empty()
    }
}

fn strike(title: &str) -> String {
    title.chars().flat_map(|ch| [ch, STRIKE]).collect()
}
