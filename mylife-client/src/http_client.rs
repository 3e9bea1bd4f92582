use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::models::{AuthResponse, PostDetail, PostInput, PostSummary, ProfileDetail};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

/// Fields every response carries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeHead {
    message: String,
    is_success: bool,
    status_code: u16,
    #[serde(default)]
    errors: Vec<String>,
}

impl EnvelopeHead {
    /// Message with the per-field errors appended, if any.
    fn describe(self) -> String {
        if self.errors.is_empty() {
            self.message
        } else {
            format!("{}: {}", self.message, self.errors.join("; "))
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(flatten)]
    payload: T,
}

#[derive(Debug, Deserialize)]
struct PostsPayload {
    posts: Vec<PostSummary>,
}

#[derive(Debug, Deserialize)]
struct PostIdPayload {
    id: Uuid,
}

/// Splits a response body into its envelope head and, on success, the payload.
fn decode<T: DeserializeOwned>(http_status: u16, body: &[u8]) -> ClientResult<T> {
    check_head(http_status, body)?;
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    Ok(envelope.payload)
}

fn check_head(http_status: u16, body: &[u8]) -> ClientResult<EnvelopeHead> {
    let head = match serde_json::from_slice::<EnvelopeHead>(body) {
        Ok(head) => head,
        Err(_) if !(200..300).contains(&http_status) => {
            return Err(ClientError::from_status(
                http_status,
                format!("http status {http_status}"),
            ));
        }
        Err(err) => return Err(ClientError::Decode(err)),
    };

    if !head.is_success {
        let status = head.status_code;
        return Err(ClientError::from_status(status, head.describe()));
    }
    Ok(head)
}

#[derive(Debug, Clone)]
/// REST transport for the MyLife API.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<(u16, Vec<u8>)> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let (status, body) = self.send(request).await?;
        decode(status, &body)
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        bio: Option<&str>,
    ) -> ClientResult<AuthResponse> {
        let payload = RegisterRequestDto {
            username,
            email,
            password,
            bio,
        };
        self.call(
            self.request(Method::POST, "/api/auth/register", None)
                .json(&payload),
        )
        .await
    }

    pub(crate) async fn login(&self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        let payload = LoginRequestDto { username, password };
        self.call(self.request(Method::POST, "/api/auth/login", None).json(&payload))
            .await
    }

    pub(crate) async fn list_posts(&self) -> ClientResult<Vec<PostSummary>> {
        let payload: PostsPayload = self
            .call(self.request(Method::GET, "/api/posts", None))
            .await?;
        Ok(payload.posts)
    }

    pub(crate) async fn get_post(&self, id: Uuid) -> ClientResult<PostDetail> {
        self.call(self.request(Method::GET, &format!("/api/posts/{id}"), None))
            .await
    }

    pub(crate) async fn create_post(&self, token: &str, input: &PostInput) -> ClientResult<Uuid> {
        let payload: PostIdPayload = self
            .call(
                self.request(Method::POST, "/api/posts", Some(token))
                    .json(input),
            )
            .await?;
        Ok(payload.id)
    }

    pub(crate) async fn update_post(
        &self,
        token: &str,
        id: Uuid,
        input: &PostInput,
    ) -> ClientResult<Uuid> {
        let payload: PostIdPayload = self
            .call(
                self.request(Method::PUT, &format!("/api/posts/{id}"), Some(token))
                    .json(input),
            )
            .await?;
        Ok(payload.id)
    }

    pub(crate) async fn delete_post(&self, token: &str, id: Uuid) -> ClientResult<()> {
        let (status, body) = self
            .send(self.request(Method::DELETE, &format!("/api/posts/{id}"), Some(token)))
            .await?;
        check_head(status, &body).map(|_| ())
    }

    pub(crate) async fn get_profile(&self, id: Uuid) -> ClientResult<ProfileDetail> {
        self.call(self.request(Method::GET, &format!("/api/profiles/{id}"), None))
            .await
    }

    pub(crate) async fn my_profile(&self, token: &str) -> ClientResult<ProfileDetail> {
        self.call(self.request(Method::GET, "/api/profiles/me", Some(token)))
            .await
    }
}
