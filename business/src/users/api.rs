//! Calls against the `/api/v1/auth/*` user endpoints.
//!
//! Every request carries the session token verbatim in `Authorization`. Any
//! non-2xx status is a failure; bodies of create/update/change-password
//! responses are not interpreted.

use crate::http::{Client, HttpError, RequestBuilder, Response};
use crate::{BusinessConfig, Session};

use super::model::{
    ChangePasswordRequest, CreateUserRequest, DeleteUserResponse, ListUsersResponse,
    UpdateUserRequest, User,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsersApiError {
    #[error("You are not signed in")]
    MissingCredential,
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Server returned status {0}")]
    Status(u16),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("The server rejected the request")]
    Rejected,
    #[error("SuperAdmin accounts cannot be deleted")]
    Protected,
}

impl From<HttpError> for UsersApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Encode(message) => Self::Decode(message),
            HttpError::Transport(message) => Self::Transport(message),
        }
    }
}

pub type ApiResult<T> = Result<T, UsersApiError>;

/// Credentialed handle for one command run.
#[derive(Debug, Clone)]
pub struct UsersApi {
    config: BusinessConfig,
    token: String,
}

impl UsersApi {
    pub fn new(config: BusinessConfig, token: impl Into<String>) -> Self {
        Self {
            config,
            token: token.into(),
        }
    }

    /// Fails with [`UsersApiError::MissingCredential`] when the session has no token.
    pub fn from_parts(config: &BusinessConfig, session: &Session) -> ApiResult<Self> {
        session
            .token()
            .map(|token| Self::new(config.clone(), token))
            .ok_or(UsersApiError::MissingCredential)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", self.token.as_str())
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = self.authorized(request).send().await?;
        if !response.is_success() {
            return Err(UsersApiError::Status(response.status));
        }
        Ok(response)
    }

    /// GET `getAllUsers`
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        let response = self
            .send(Client::get(self.config.auth_url("getAllUsers")))
            .await?;
        let body: ListUsersResponse = response
            .json()
            .map_err(|e| UsersApiError::Decode(format!("getAllUsers: {e}")))?;
        if !body.success {
            return Err(UsersApiError::Rejected);
        }
        Ok(body.data)
    }

    /// POST `create-account`
    pub async fn create_account(&self, body: &CreateUserRequest) -> ApiResult<()> {
        let request = Client::post(self.config.auth_url("create-account")).json(body)?;
        self.send(request).await.map(drop)
    }

    /// PUT `updateUser/{id}`
    pub async fn update_user(&self, body: &UpdateUserRequest) -> ApiResult<()> {
        let endpoint = format!("updateUser/{}", urlencoding::encode(&body.user_id));
        let request = Client::put(self.config.auth_url(&endpoint)).json(body)?;
        self.send(request).await.map(drop)
    }

    /// POST `change-password`
    pub async fn change_password(&self, body: &ChangePasswordRequest) -> ApiResult<()> {
        let request = Client::post(self.config.auth_url("change-password")).json(body)?;
        self.send(request).await.map(drop)
    }

    /// DELETE `deleteUser/{id}`. Succeeds only when the body says `success: true`.
    pub async fn delete_user(&self, id: &str) -> ApiResult<()> {
        let endpoint = format!("deleteUser/{}", urlencoding::encode(id));
        let response = self
            .send(Client::delete(self.config.auth_url(&endpoint)))
            .await?;
        let body: DeleteUserResponse = response
            .json()
            .map_err(|e| UsersApiError::Decode(format!("deleteUser: {e}")))?;
        if body.success {
            Ok(())
        } else {
            Err(UsersApiError::Rejected)
        }
    }
}
