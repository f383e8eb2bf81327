use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    services::{ServiceContext, TodoService},
    state::AppState,
    types::{CreateTodoRequest, TodoResponse},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(toggle_todo).delete(delete_todo))
        .with_state(state)
}

async fn list_todos(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TodoResponse>> {
    let todos = todo_service_from_state(state.as_ref()).list().await?;
    JsonApiResponse::listed(todos.into_iter().map(TodoResponse::from).collect())
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<TodoResponse> {
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let service = todo_service_from_state(state.as_ref());
    let todo = service.create(body.title.as_deref()).await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "Todo created successfully", todo.into())
}

async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<TodoResponse> {
    let service = todo_service_from_state(state.as_ref());
    let todo = service.toggle(&id).await?;
    JsonApiResponse::with_status(StatusCode::OK, "Todo updated successfully", todo.into())
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<TodoResponse> {
    let service = todo_service_from_state(state.as_ref());
    let todo = service.delete(&id).await?;
    JsonApiResponse::with_status(StatusCode::OK, "Todo deleted successfully", todo.into())
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
