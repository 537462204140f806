use std::sync::Arc;

use shared::{
    domain::{Task, TaskId, TaskStatus},
    error::{ApiException, ErrorCode},
};
use tokio::sync::RwLock;
use tracing::debug;

pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

/// In-memory task list shared by every request handler. Lives as long as the server.
#[derive(Clone, Default)]
pub struct TaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone)]
pub struct ApiContext {
    pub tasks: TaskStore,
    pub max_page_size: u64,
}

impl Default for ApiContext {
    fn default() -> Self {
        Self {
            tasks: TaskStore::new(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

pub fn greet(name: &str) -> String {
    format!("Hello, {name}!")
}

pub async fn add_task(ctx: &ApiContext, task: Task) -> TaskId {
    let mut tasks = ctx.tasks.tasks.write().await;
    tasks.push(task);
    let task_id = TaskId(tasks.len() as u64);
    debug!(%task_id, "task added");
    task_id
}

pub async fn list_tasks(ctx: &ApiContext) -> Vec<Task> {
    ctx.tasks.tasks.read().await.clone()
}

pub async fn list_tasks_page(
    ctx: &ApiContext,
    page_no: u64,
    page_size: u64,
) -> Result<Vec<Task>, ApiException> {
    if page_no == 0 {
        return Err(validation("page_no starts at 1"));
    }
    if page_size == 0 || page_size > ctx.max_page_size {
        return Err(validation(format!(
            "page_size must be between 1 and {}",
            ctx.max_page_size
        )));
    }

    let tasks = ctx.tasks.tasks.read().await;
    let start = (page_no - 1).saturating_mul(page_size);
    if start >= tasks.len() as u64 {
        return Err(ApiException::new(
            ErrorCode::NotFound,
            format!("page {page_no} is past the end of the task list"),
        ));
    }
    let start = start as usize;
    let end = start.saturating_add(page_size as usize).min(tasks.len());
    Ok(tasks[start..end].to_vec())
}

pub async fn change_task_status(
    ctx: &ApiContext,
    task_id: TaskId,
    status: TaskStatus,
) -> Result<(), ApiException> {
    let mut tasks = ctx.tasks.tasks.write().await;
    let task = task_mut(&mut tasks, task_id)?;
    task.status = status;
    debug!(%task_id, %status, "task status changed");
    Ok(())
}

pub async fn update_task_description(
    ctx: &ApiContext,
    task_id: TaskId,
    description: String,
) -> Result<(), ApiException> {
    let mut tasks = ctx.tasks.tasks.write().await;
    let task = task_mut(&mut tasks, task_id)?;
    task.description = description;
    debug!(%task_id, "task description updated");
    Ok(())
}

/// Removes the task; every later task moves down one id.
pub async fn delete_task(ctx: &ApiContext, task_id: TaskId) -> Result<(), ApiException> {
    let mut tasks = ctx.tasks.tasks.write().await;
    let index = task_index(&tasks, task_id)?;
    tasks.remove(index);
    debug!(%task_id, remaining = tasks.len(), "task deleted");
    Ok(())
}

fn task_index(tasks: &[Task], task_id: TaskId) -> Result<usize, ApiException> {
    let index = task_id
        .0
        .checked_sub(1)
        .map(|index| index as usize)
        .filter(|index| *index < tasks.len());
    index.ok_or_else(|| not_found(task_id))
}

fn task_mut(tasks: &mut [Task], task_id: TaskId) -> Result<&mut Task, ApiException> {
    let index = task_index(tasks, task_id)?;
    Ok(&mut tasks[index])
}

fn not_found(task_id: TaskId) -> ApiException {
    ApiException::new(ErrorCode::NotFound, format!("task {task_id} not found"))
}

fn validation(message: impl Into<String>) -> ApiException {
    ApiException::new(ErrorCode::Validation, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str) -> Task {
        Task {
            title: title.to_string(),
            description: format!("{title} description"),
            status: TaskStatus::Todo,
        }
    }

    async fn setup(titles: &[&str]) -> ApiContext {
        let ctx = ApiContext::default();
        for title in titles {
            add_task(&ctx, task(title)).await;
        }
        ctx
    }

    #[test]
    fn greet_forwards_name_verbatim() {
        assert_eq!(greet("Alice"), "Hello, Alice!");
        assert_eq!(greet(""), "Hello, !");
        assert_eq!(greet("  Zoë  "), "Hello,   Zoë  !");
    }

    #[tokio::test]
    async fn add_task_returns_one_based_position() {
        let ctx = ApiContext::default();
        assert_eq!(add_task(&ctx, task("a")).await, TaskId(1));
        assert_eq!(add_task(&ctx, task("b")).await, TaskId(2));
        assert_eq!(list_tasks(&ctx).await.len(), 2);
    }

    #[tokio::test]
    async fn change_status_and_description_hit_the_right_task() {
        let ctx = setup(&["a", "b"]).await;
        change_task_status(&ctx, TaskId(2), TaskStatus::Done)
            .await
            .expect("status");
        update_task_description(&ctx, TaskId(1), "rewritten".into())
            .await
            .expect("description");

        let tasks = list_tasks(&ctx).await;
        assert_eq!(tasks[0].description, "rewritten");
        assert_eq!(tasks[0].status, TaskStatus::Todo);
        assert_eq!(tasks[1].status, TaskStatus::Done);
    }

    #[tokio::test]
    async fn unknown_task_ids_are_not_found() {
        let ctx = setup(&["a"]).await;
        for task_id in [TaskId(0), TaskId(2)] {
            let err = change_task_status(&ctx, task_id, TaskStatus::Done)
                .await
                .expect_err("should fail");
            assert_eq!(err.code, ErrorCode::NotFound);
            let err = delete_task(&ctx, task_id).await.expect_err("should fail");
            assert_eq!(err.code, ErrorCode::NotFound);
        }
    }

    #[tokio::test]
    async fn delete_shifts_later_ids_down() {
        let ctx = setup(&["a", "b", "c"]).await;
        delete_task(&ctx, TaskId(1)).await.expect("delete");

        let tasks = list_tasks(&ctx).await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "b");

        update_task_description(&ctx, TaskId(2), "now c".into())
            .await
            .expect("description");
        assert_eq!(list_tasks(&ctx).await[1].title, "c");
        assert_eq!(list_tasks(&ctx).await[1].description, "now c");
    }

    #[tokio::test]
    async fn pages_are_one_based_and_last_page_is_short() {
        let ctx = setup(&["a", "b", "c", "d", "e"]).await;

        let first = list_tasks_page(&ctx, 1, 2).await.expect("page 1");
        assert_eq!(
            first.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
            ["a", "b"]
        );
        let last = list_tasks_page(&ctx, 3, 2).await.expect("page 3");
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].title, "e");

        let err = list_tasks_page(&ctx, 4, 2).await.expect_err("past end");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn page_arguments_are_validated() {
        let ctx = setup(&["a"]).await;
        for (page_no, page_size) in [(0, 1), (1, 0), (1, DEFAULT_MAX_PAGE_SIZE + 1)] {
            let err = list_tasks_page(&ctx, page_no, page_size)
                .await
                .expect_err("invalid page");
            assert_eq!(err.code, ErrorCode::Validation);
        }
    }
}
