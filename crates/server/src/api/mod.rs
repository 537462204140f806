use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use server_api::{
    add_task, change_task_status, delete_task, greet, list_tasks, list_tasks_page,
    update_task_description,
};
use shared::{
    domain::{Task, TaskId},
    error::{ApiError, ApiException, ErrorCode},
    protocol::{
        AddTaskResponse, ChangeStatusRequest, GreetRequest, GreetResponse, PageQuery, TaskAck,
        TaskList, UpdateDescriptionRequest,
    },
};
use tracing::{debug, warn};

use crate::app_state::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/greet", post(http_greet))
        .route("/tasks", post(http_add_task).get(http_list_tasks))
        .route("/tasks/page", get(http_list_tasks_page))
        .route("/tasks/:task_id/status", put(http_change_task_status))
        .route("/tasks/:task_id/description", put(http_update_task_description))
        .route("/tasks/:task_id", delete(http_delete_task))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_greet(Json(req): Json<GreetRequest>) -> Json<GreetResponse> {
    debug!(name_len = req.name.len(), "greet");
    Json(GreetResponse {
        greeting: greet(&req.name),
    })
}

async fn http_add_task(
    State(state): State<Arc<AppState>>,
    Json(task): Json<Task>,
) -> Json<AddTaskResponse> {
    let task_id = add_task(&state.api, task).await;
    Json(AddTaskResponse { task_id })
}

async fn http_list_tasks(State(state): State<Arc<AppState>>) -> Json<TaskList> {
    Json(list_tasks(&state.api).await)
}

async fn http_list_tasks_page(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PageQuery>,
) -> ApiResult<TaskList> {
    list_tasks_page(&state.api, q.page_no, q.page_size)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn http_change_task_status(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<u64>,
    Json(req): Json<ChangeStatusRequest>,
) -> ApiResult<TaskAck> {
    change_task_status(&state.api, TaskId(task_id), req.status)
        .await
        .map(|()| Json(TaskAck::done()))
        .map_err(error_response)
}

async fn http_update_task_description(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<u64>,
    Json(req): Json<UpdateDescriptionRequest>,
) -> ApiResult<TaskAck> {
    update_task_description(&state.api, TaskId(task_id), req.description)
        .await
        .map(|()| Json(TaskAck::done()))
        .map_err(error_response)
}

async fn http_delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<u64>,
) -> ApiResult<TaskAck> {
    delete_task(&state.api, TaskId(task_id))
        .await
        .map(|()| Json(TaskAck::done()))
        .map_err(error_response)
}

fn error_response(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    };
    warn!(code = ?err.code, message = %err.message, "request failed");
    (status, Json(ApiError::from(err)))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
