use crate::Result;
use crate::api::models::NewPost;
use crate::http::{RequestOptions, Response, TransportClient};

/// JSONPlaceholder REST 资源
///
/// 一个方法对应一次 HTTP 调用；不做断言，也不解释响应。
pub struct UsersApi {
    client: TransportClient,
}

impl UsersApi {
    pub fn new(client: TransportClient) -> Self {
        Self { client }
    }

    fn with_default_headers(&self) -> Result<RequestOptions> {
        Ok(RequestOptions::new().headers(self.client.default_headers()?))
    }

    pub async fn get_users(&self) -> Result<Response> {
        self.client.get("/users", self.with_default_headers()?).await
    }

    pub async fn get_user_by_id(&self, id: u64) -> Result<Response> {
        let path = format!("/users/{}", id);
        self.client.get(&path, self.with_default_headers()?).await
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<Response> {
        let options = self.with_default_headers()?.json(post)?;
        self.client.post("/posts", options).await
    }

    /// 不带任何请求头，用于匿名访问场景
    pub async fn get_users_without_auth(&self) -> Result<Response> {
        self.client.get("/users", RequestOptions::new()).await
    }
}
