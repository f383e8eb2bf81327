use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};

use super::error::{ClientError, ClientResult};
use crate::{response::Envelope, routes::API_PREFIX, types::TodoResponse};

/// The four calls the board needs from the server.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<TodoResponse>>;
    async fn create(&self, title: &str) -> ClientResult<TodoResponse>;
    async fn toggle(&self, id: i64) -> ClientResult<TodoResponse>;
    async fn delete(&self, id: i64) -> ClientResult<TodoResponse>;
}

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    title: &'a str,
}

#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    http: Client,
    todos_url: String,
}

impl HttpTodoApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        let todos_url = format!("{}{API_PREFIX}/todos", base_url.trim_end_matches('/'));
        Self { http, todos_url }
    }

    pub fn todos_url(&self) -> &str {
        &self.todos_url
    }

    fn todo_url(&self, id: i64) -> String {
        format!("{}/{id}", self.todos_url)
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> ClientResult<Vec<TodoResponse>> {
        let resp = self.http.get(&self.todos_url).send().await?;
        read_envelope(resp).await
    }

    async fn create(&self, title: &str) -> ClientResult<TodoResponse> {
        let resp = self
            .http
            .post(&self.todos_url)
            .json(&CreateBody { title })
            .send()
            .await?;
        read_envelope(resp).await
    }

    async fn toggle(&self, id: i64) -> ClientResult<TodoResponse> {
        let resp = self.http.patch(self.todo_url(id)).send().await?;
        read_envelope(resp).await
    }

    async fn delete(&self, id: i64) -> ClientResult<TodoResponse> {
        let resp = self.http.delete(self.todo_url(id)).send().await?;
        read_envelope(resp).await
    }
}

async fn read_envelope<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    decode_envelope(status.as_u16(), &bytes)
}

fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> ClientResult<T> {
    let is_success = (200..300).contains(&status);
    match serde_json::from_slice::<Envelope<T>>(body) {
        Ok(Envelope::Success { data, .. }) if is_success => Ok(data),
        Ok(Envelope::Error { message, .. }) => Err(ClientError::Api { status, message }),
        Ok(Envelope::Success { .. }) | Err(_) => Err(ClientError::Unexpected { status }),
    }
}
