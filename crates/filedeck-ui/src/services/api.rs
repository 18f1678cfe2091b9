//! HTTP client for the FileDeck REST API.

use filedeck_api_models::{
    DELETE_PATH, DeleteFilesRequest, ErrorBody, FileListResponse, LOGIN_PATH, LoginRequest,
    LoginResponse, MessageResponse, PAGE_PARAM, REGISTER_PATH, RegisterRequest, SEARCH_PARAM,
    SEARCH_PATH, UPLOAD_FILE_FIELD, UPLOAD_PATH, UPLOAD_USER_FIELD, user_files_path,
};
use filedeck_core::{ActionError, ClientConfig, Session};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::{File, FormData};

/// Failures talking to the API.
#[derive(Debug, Clone, Error)]
pub(crate) enum ApiError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("server responded with status {status}")]
    Http { status: u16, body: ErrorBody },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied error document, when there was one.
    pub(crate) const fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Http { body, .. } => Some(body),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

impl From<ApiError> for ActionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status, body } => Self::Request {
                status: Some(status),
                body,
            },
            ApiError::Network(_) | ApiError::Decode(_) => Self::transport(),
        }
    }
}

fn network(err: &gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    config: ClientConfig,
}

impl ApiClient {
    pub(crate) const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub(crate) const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn checked(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response
            .binary()
            .await
            .map(|bytes| ErrorBody::from_slice(&bytes))
            .unwrap_or_default();
        Err(ApiError::Http { status, body })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        Self::checked(response)
            .await?
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub(crate) async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<MessageResponse, ApiError> {
        let response = Request::post(&self.url(REGISTER_PATH))
            .json(request)
            .map_err(|err| network(&err))?
            .send()
            .await
            .map_err(|err| network(&err))?;
        let response = Self::checked(response).await?;
        Ok(response.json::<MessageResponse>().await.unwrap_or_default())
    }

    pub(crate) async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = Request::post(&self.url(LOGIN_PATH))
            .json(request)
            .map_err(|err| network(&err))?
            .send()
            .await
            .map_err(|err| network(&err))?;
        Self::decode(response).await
    }

    pub(crate) async fn list_files(
        &self,
        session: &Session,
        user_id: i64,
        page: u32,
    ) -> Result<FileListResponse, ApiError> {
        let url = format!("{}?{PAGE_PARAM}={page}", self.url(&user_files_path(user_id)));
        let response = Request::get(&url)
            .header("Authorization", &session.bearer())
            .send()
            .await
            .map_err(|err| network(&err))?;
        Self::decode(response).await
    }

    pub(crate) async fn search_files(
        &self,
        session: &Session,
        query: &str,
    ) -> Result<FileListResponse, ApiError> {
        let url = format!(
            "{}?{SEARCH_PARAM}={}",
            self.url(SEARCH_PATH),
            urlencoding::encode(query)
        );
        let response = Request::get(&url)
            .header("Authorization", &session.bearer())
            .send()
            .await
            .map_err(|err| network(&err))?;
        Self::decode(response).await
    }

    pub(crate) async fn upload_file(
        &self,
        session: &Session,
        user_id: i64,
        file: &File,
    ) -> Result<(), ApiError> {
        let form = FormData::new().map_err(|err| ApiError::Network(format!("{err:?}")))?;
        form.append_with_str(UPLOAD_USER_FIELD, &user_id.to_string())
            .map_err(|err| ApiError::Network(format!("{err:?}")))?;
        form.append_with_blob_and_filename(UPLOAD_FILE_FIELD, file, &file.name())
            .map_err(|err| ApiError::Network(format!("{err:?}")))?;
        let response = Request::post(&self.url(UPLOAD_PATH))
            .header("Authorization", &session.bearer())
            .body(form)
            .send()
            .await
            .map_err(|err| network(&err))?;
        Self::checked(response).await.map(|_| ())
    }

    pub(crate) async fn delete_files(
        &self,
        session: &Session,
        request: &DeleteFilesRequest,
    ) -> Result<(), ApiError> {
        let response = Request::delete(&self.url(DELETE_PATH))
            .header("Authorization", &session.bearer())
            .json(request)
            .map_err(|err| network(&err))?
            .send()
            .await
            .map_err(|err| network(&err))?;
        Self::checked(response).await.map(|_| ())
    }
}
