//! reqwest-backed clients for the remote collaborator contracts.
//!
//! One thin client per contract, all sharing the same plumbing: a base
//! URL, JSON bodies, and a uniform status-to-error mapping. Requests are
//! fired as-is — retries and sequencing are the caller's concern.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::exercise::{Comment, ExerciseService, Folder};
use super::payment::{CreatedOrder, OrderRequest, OrderStatus, PaymentGateway, PaymentOrder};
use super::users::{Page, UserAccount, UserDirectory, UserDraft, UserQuery, UserUpdate};
use super::ServiceError;

/// Shared request plumbing for the HTTP clients.
#[derive(Clone)]
struct ApiClient {
    base: String,
    client: Client,
}

impl ApiClient {
    fn new(base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn check(path: &str, response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(path.to_string()));
        }
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected(format!("{}: {}", status, body)));
        }
        if !status.is_success() {
            return Err(ServiceError::Transport(format!("{} on {}", status, path)));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ServiceError> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        Ok(Self::check(path, response).await?.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Ok(Self::check(path, response).await?.json().await?)
    }

    async fn post_empty(&self, path: &str) -> Result<(), ServiceError> {
        let response = self.client.post(self.url(path)).send().await?;
        Self::check(path, response).await?;
        Ok(())
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Ok(Self::check(path, response).await?.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<(), ServiceError> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check(path, response).await?;
        Ok(())
    }
}

/// HTTP client for the user administration endpoints.
#[derive(Clone)]
pub struct HttpUserDirectory {
    api: ApiClient,
}

impl HttpUserDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(base_url),
        }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list(&self, query: &UserQuery) -> Result<Page<UserAccount>, ServiceError> {
        let mut params = vec![
            ("page".to_string(), query.page.to_string()),
            ("limit".to_string(), query.limit.to_string()),
        ];
        if let Some(search) = &query.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(role) = &query.role {
            params.push(("roleName".to_string(), role.clone()));
        }
        if let Some(status) = query.status {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(sort) = &query.sort {
            params.push(("sort".to_string(), sort.to_string()));
        }
        self.api.get_json("/users", &params).await
    }

    async fn create(&self, draft: &UserDraft) -> Result<UserAccount, ServiceError> {
        self.api.post_json("/users", draft).await
    }

    async fn update(&self, id: u64, update: &UserUpdate) -> Result<UserAccount, ServiceError> {
        self.api.put_json(&format!("/users/{}", id), update).await
    }

    async fn deactivate(&self, id: u64) -> Result<(), ServiceError> {
        self.api.delete(&format!("/users/{}", id)).await
    }

    async fn restore(&self, id: u64) -> Result<(), ServiceError> {
        self.api.post_empty(&format!("/users/{}/restore", id)).await
    }
}

/// HTTP client for the payment endpoints.
#[derive(Clone)]
pub struct HttpPaymentGateway {
    api: ApiClient,
}

impl HttpPaymentGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(base_url),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder, ServiceError> {
        self.api.post_json("/orders", request).await
    }

    async fn order_status(&self, order_id: &str) -> Result<OrderStatus, ServiceError> {
        let order: PaymentOrder = self
            .api
            .get_json(&format!("/orders/{}", order_id), &[])
            .await?;
        Ok(order.status)
    }

    async fn cancel_order(&self, order_id: &str) -> Result<(), ServiceError> {
        self.api
            .post_empty(&format!("/orders/{}/cancel", order_id))
            .await
    }
}

#[derive(Serialize)]
struct LikeBody {
    user_id: u64,
    liked: bool,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    author_id: u64,
    body: &'a str,
}

/// HTTP client for the exercise content endpoints.
#[derive(Clone)]
pub struct HttpExerciseService {
    api: ApiClient,
}

impl HttpExerciseService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(base_url),
        }
    }
}

#[async_trait]
impl ExerciseService for HttpExerciseService {
    async fn folder(&self, id: &str) -> Result<Folder, ServiceError> {
        self.api.get_json(&format!("/folders/{}", id), &[]).await
    }

    async fn set_liked(
        &self,
        folder_id: &str,
        user_id: u64,
        liked: bool,
    ) -> Result<Folder, ServiceError> {
        self.api
            .post_json(
                &format!("/folders/{}/like", folder_id),
                &LikeBody { user_id, liked },
            )
            .await
    }

    async fn add_comment(
        &self,
        folder_id: &str,
        author_id: u64,
        body: &str,
    ) -> Result<Comment, ServiceError> {
        self.api
            .post_json(
                &format!("/folders/{}/comments", folder_id),
                &CommentBody { author_id, body },
            )
            .await
    }

    async fn delete_folder(&self, id: &str) -> Result<(), ServiceError> {
        self.api.delete(&format!("/folders/{}", id)).await
    }
}
