use crate::{db::dao::TodoDao, db::entities::todo, error::AppError};

pub const TITLE_REQUIRED: &str = "Title is required and cannot be empty";
pub const INVALID_TODO_ID: &str = "Invalid todo ID";

const FETCH_FAILED: &str = "Failed to fetch todos";
const CREATE_FAILED: &str = "Failed to create todo";
const UPDATE_FAILED: &str = "Failed to update todo";
const DELETE_FAILED: &str = "Failed to delete todo";

/// The four todo operations. Holds no state of its own; every call is answered
/// from the store.
#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub async fn list(&self) -> Result<Vec<todo::Model>, AppError> {
        self.todo_dao
            .list_newest_first()
            .await
            .map_err(|err| AppError::from_dao(err, FETCH_FAILED))
    }

    pub async fn create(&self, title: Option<&str>) -> Result<todo::Model, AppError> {
        let title = normalize_title(title)?;
        let created = self
            .todo_dao
            .create(title)
            .await
            .map_err(|err| AppError::from_dao(err, CREATE_FAILED))?;
        tracing::debug!(id = created.id, "todo created");
        Ok(created)
    }

    pub async fn toggle(&self, raw_id: &str) -> Result<todo::Model, AppError> {
        let id = parse_todo_id(raw_id)?;
        self.todo_dao
            .toggle_completed(id)
            .await
            .map_err(|err| AppError::from_dao(err, UPDATE_FAILED))
    }

    pub async fn delete(&self, raw_id: &str) -> Result<todo::Model, AppError> {
        let id = parse_todo_id(raw_id)?;
        let deleted = self
            .todo_dao
            .delete(id)
            .await
            .map_err(|err| AppError::from_dao(err, DELETE_FAILED))?;
        tracing::debug!(id, "todo deleted");
        Ok(deleted)
    }
}

pub fn normalize_title(title: Option<&str>) -> Result<&str, AppError> {
    let trimmed = title.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(TITLE_REQUIRED));
    }
    Ok(trimmed)
}

/// Whole-segment integer parse; `"12abc"` and `"1.5"` are rejected.
pub fn parse_todo_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request(INVALID_TODO_ID))
}
