use std::time::{Duration, Instant};

use super::{
    api::TodoApi,
    error::{ClientError, ClientResult},
};
use crate::types::TodoResponse;

/// How long a failure notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Toggle,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::Fetch => "Failed to fetch todos",
            Self::Create => "Failed to create todo",
            Self::Toggle => "Failed to update todo",
            Self::Delete => "Failed to delete todo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
    raised_at: Instant,
}

impl Notice {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) < ttl
    }
}

/// Client-side cache of the server's list. Every mutation is followed by a
/// full re-fetch; the list is only ever replaced wholesale by a successful
/// fetch and is never patched locally.
pub struct TodoBoard<A> {
    api: A,
    todos: Vec<TodoResponse>,
    loading: bool,
    notice: Option<Notice>,
    notice_ttl: Duration,
}

impl<A: TodoApi> TodoBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
            loading: false,
            notice: None,
            notice_ttl: NOTICE_TTL,
        }
    }

    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    pub fn todos(&self) -> &[TodoResponse] {
        &self.todos
    }

    pub fn find(&self, id: i64) -> Option<&TodoResponse> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice_at(Instant::now())
    }

    pub fn notice_at(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| notice.is_visible_at(now, self.notice_ttl))
            .map(Notice::message)
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.loading = true;
        self.notice = None;
        let result = self.api.list().await;
        self.loading = false;

        match result {
            Ok(todos) => {
                self.todos = todos;
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::Fetch, err)),
        }
    }

    /// Blank titles are ignored without contacting the server.
    pub async fn add(&mut self, title: &str) -> ClientResult<()> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(());
        }
        self.notice = None;

        match self.api.create(title).await {
            Ok(_) => self.refresh().await,
            Err(err) => Err(self.fail(Operation::Create, err)),
        }
    }

    pub async fn toggle(&mut self, id: i64) -> ClientResult<()> {
        self.notice = None;
        match self.api.toggle(id).await {
            Ok(_) => self.refresh().await,
            Err(err) => Err(self.fail(Operation::Toggle, err)),
        }
    }

    /// Callers are expected to have confirmed with the user first.
    pub async fn remove(&mut self, id: i64) -> ClientResult<()> {
        self.notice = None;
        match self.api.delete(id).await {
            Ok(_) => self.refresh().await,
            Err(err) => Err(self.fail(Operation::Delete, err)),
        }
    }

    fn fail(&mut self, operation: Operation, err: ClientError) -> ClientError {
        let message = err.user_message(operation.failure_message());
        tracing::warn!(?operation, error = %err, "todo request failed");
        self.notice = Some(Notice {
            message,
            raised_at: Instant::now(),
        });
        err
    }
}
