/*
[INPUT]:  Base URL, method, path, parameters, encoding and token for one API call
[OUTPUT]: One HTTP exchange and a typed Response delivered to a callback
[POS]:    HTTP layer - request construction, execution, classification, decoding
[UPDATE]: When changing URL/body/header composition or status classification
*/

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, warn};
use url::Url;

use crate::http::cache::CachePolicy;
use crate::http::client::Transport;
use crate::http::delivery::DeliveryContext;
use crate::http::params::{Params, params_to_form, params_to_json};
use crate::http::{Error, RequestError, Response, ResponseError};
use crate::types::{DecodeError, Model};

/// User agent sent when the caller does not configure one
pub const DEFAULT_USER_AGENT: &str = "Coinpaprika API Client";

const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Serialization used for parameters of non-GET requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyEncoding {
    #[default]
    Json,
    UrlEncode,
}

/// Description of one API call returning `M`.
///
/// Nothing is validated at construction; every failure surfaces as a
/// `Response::Failure` when the request is executed. A `Request` holds no
/// mutable state and may be performed any number of times.
pub struct Request<M> {
    base_url: Url,
    method: Method,
    path: String,
    params: Option<Params>,
    user_agent: String,
    body_encoding: BodyEncoding,
    authorization_token: Option<String>,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> Request<M> {
    /// Create a request.
    ///
    /// - `base_url`: API root, like `https://api.coinpaprika.com/v1/`
    /// - `path`: endpoint path, like `tickers/btc-bitcoin`
    /// - `params`: query items for GET, body fields otherwise
    pub fn new(base_url: Url, method: Method, path: impl Into<String>, params: Option<Params>) -> Self {
        Self {
            base_url,
            method,
            path: path.into(),
            params,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            body_encoding: BodyEncoding::default(),
            authorization_token: None,
            _model: PhantomData,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_body_encoding(mut self, body_encoding: BodyEncoding) -> Self {
        self.body_encoding = body_encoding;
        self
    }

    pub fn with_authorization_token(mut self, token: impl Into<String>) -> Self {
        self.authorization_token = Some(token.into());
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Final request URL: base plus path, plus query items for GET
    pub fn url(&self) -> Result<Url, RequestError> {
        let mut url = self.base_url.clone();

        if !self.path.is_empty() {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RequestError::UnableToCreateRequest)?;
            segments
                .pop_if_empty()
                .extend(self.path.split('/').filter(|segment| !segment.is_empty()));
        }

        if self.method == Method::Get {
            if let Some(params) = self.params.as_ref().filter(|params| !params.is_empty()) {
                let mut query = url.query_pairs_mut();
                for (key, value) in params {
                    query.append_pair(key, &value.to_string());
                }
            }
        }

        Ok(url)
    }

    fn encode_body(&self) -> Result<Option<Vec<u8>>, RequestError> {
        if self.method == Method::Get {
            return Ok(None);
        }
        let Some(params) = self.params.as_ref().filter(|params| !params.is_empty()) else {
            return Ok(None);
        };

        match self.body_encoding {
            BodyEncoding::Json => {
                let object = params_to_json(params).ok_or(RequestError::UnableToEncodeParams)?;
                serde_json::to_vec(&object)
                    .map(Some)
                    .map_err(|_| RequestError::UnableToEncodeParams)
            }
            BodyEncoding::UrlEncode => Ok(Some(params_to_form(params).into_bytes())),
        }
    }

    fn headers(&self, cache_policy: CachePolicy) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();

        // Applied in JSON mode regardless of method, GET included.
        if self.body_encoding == BodyEncoding::Json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        if let Some(token) = &self.authorization_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| RequestError::UnableToCreateRequest)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|_| RequestError::UnableToCreateRequest)?,
        );

        cache_policy.apply(&mut headers);
        Ok(headers)
    }

    /// Build the HTTP request without sending it
    pub fn build_request(
        &self,
        client: &Client,
        cache_policy: Option<CachePolicy>,
    ) -> Result<reqwest::Request, RequestError> {
        let url = self.url()?;
        let headers = self.headers(cache_policy.unwrap_or_default())?;
        let body = self.encode_body()?;

        let mut builder = client.request(self.method.into(), url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        builder
            .build()
            .map_err(|_| RequestError::UnableToCreateRequest)
    }

    /// Execute one HTTP exchange and classify its outcome
    pub async fn execute(&self, transport: &Transport, cache_policy: Option<CachePolicy>) -> Response<M> {
        let request = match self.build_request(transport.http_client(), cache_policy) {
            Ok(request) => request,
            Err(err) => {
                warn!(request = %self, error = %err, "failed to build request");
                return Response::Failure(err.into());
            }
        };

        debug!(request = %self, "sending request");

        let http_response = match transport.http_client().execute(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(request = %self, error = %err, "transport failure");
                return Response::Failure(Error::Transport(err));
            }
        };

        let status = http_response.status();
        let body = match http_response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                warn!(request = %self, status = status.as_u16(), error = %err, "failed to read response body");
                return Response::Failure(Error::Transport(err));
            }
        };

        debug!(request = %self, status = status.as_u16(), bytes = body.len(), "response received");
        handle_response(status, &body)
    }

    /// Execute the request in the background and hand the result to `callback`.
    ///
    /// Returns immediately. The exchange runs on the transport's runtime and
    /// the callback runs exactly once on `context`, or as a separate task on
    /// the transport's runtime when no context is given.
    pub fn perform<F>(
        &self,
        transport: &Transport,
        context: Option<Arc<dyn DeliveryContext>>,
        cache_policy: Option<CachePolicy>,
        callback: F,
    ) where
        F: FnOnce(Response<M>) + Send + 'static,
    {
        let request = self.clone();
        let context: Arc<dyn DeliveryContext> =
            context.unwrap_or_else(|| Arc::new(transport.handle().clone()));
        let task_transport = transport.clone();

        transport.handle().spawn(async move {
            let response = request.execute(&task_transport, cache_policy).await;
            context.deliver(Box::new(move || callback(response)));
        });
    }
}

fn handle_response<M: Model>(status: StatusCode, body: &[u8]) -> Response<M> {
    if !status.is_success() {
        let err = ResponseError::from_status(status.as_u16(), Some(body));
        debug!(status = status.as_u16(), error = %err, "request rejected");
        return Response::Failure(err.into());
    }

    if body.is_empty() {
        return Response::Failure(ResponseError::EmptyResponse.into());
    }

    match M::decode(body) {
        Ok(value) => Response::Success(value),
        Err(err) => {
            report_decode_failure::<M>(&err, body);
            Response::Failure(ResponseError::UnableToDecodeResponse.into())
        }
    }
}

fn report_decode_failure<M>(err: &DecodeError, body: &[u8]) {
    let model = std::any::type_name::<M>();
    let raw = String::from_utf8_lossy(body);

    error!(
        model,
        path = %err.path,
        category = err.category(),
        line = err.source.line(),
        column = err.source.column(),
        problem = %err.source,
        raw = %raw,
        "unable to decode response"
    );

    #[cfg(all(debug_assertions, feature = "strict-decode"))]
    panic!("{model}: {err} from {raw}");
}

impl<M> Clone for Request<M> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            method: self.method,
            path: self.path.clone(),
            params: self.params.clone(),
            user_agent: self.user_agent.clone(),
            body_encoding: self.body_encoding,
            authorization_token: self.authorization_token.clone(),
            _model: PhantomData,
        }
    }
}

impl<M> fmt::Debug for Request<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("model", &std::any::type_name::<M>())
            .field("base_url", &self.base_url.as_str())
            .field("method", &self.method)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("user_agent", &self.user_agent)
            .field("body_encoding", &self.body_encoding)
            .field("authorization_token", &self.authorization_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// `GET: https://api.coinpaprika.com/v1/tickers limit=5`
impl<M> fmt::Display for Request<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .flatten()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        write!(f, "{}: {}{} {}", self.method.as_str(), self.base_url, self.path, params)
    }
}

/// An executable API call. Implemented by [`Request`]; callers can substitute
/// their own implementations in tests.
#[async_trait]
pub trait Requestable: Send + Sync {
    type Model: Model;

    async fn execute(&self, transport: &Transport, cache_policy: Option<CachePolicy>) -> Response<Self::Model>;

    fn perform<F>(
        &self,
        transport: &Transport,
        context: Option<Arc<dyn DeliveryContext>>,
        cache_policy: Option<CachePolicy>,
        callback: F,
    ) where
        F: FnOnce(Response<Self::Model>) + Send + 'static;
}

#[async_trait]
impl<M: Model> Requestable for Request<M> {
    type Model = M;

    async fn execute(&self, transport: &Transport, cache_policy: Option<CachePolicy>) -> Response<M> {
        Request::execute(self, transport, cache_policy).await
    }

    fn perform<F>(
        &self,
        transport: &Transport,
        context: Option<Arc<dyn DeliveryContext>>,
        cache_policy: Option<CachePolicy>,
        callback: F,
    ) where
        F: FnOnce(Response<M>) + Send + 'static,
    {
        Request::perform(self, transport, context, cache_policy, callback)
    }
}
