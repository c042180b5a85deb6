//! 通用 HTTP 请求封装
//! 按提供方路由: 基础 URL + 路径 + 查询串，统一 JSON 请求头，非 2xx 转为错误

use crate::error::Error;
use crate::provider::{ProviderId, ProviderRegistry};
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36 (dramakita)";

/// 全局 HTTP 客户端
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .brotli(true)
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// 查询参数的标量值
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{}", n),
            QueryValue::Float(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            QueryValue::Float(n) => write!(f, "{}", n),
            QueryValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Str(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Str(s)
    }
}

impl From<&String> for QueryValue {
    fn from(s: &String) -> Self {
        QueryValue::Str(s.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

impl From<f64> for QueryValue {
    fn from(n: f64) -> Self {
        QueryValue::Float(n)
    }
}

macro_rules! int_query_value {
    ($($t:ty),*) => {
        $(impl From<$t> for QueryValue {
            fn from(n: $t) -> Self {
                QueryValue::Int(n as i64)
            }
        })*
    };
}

int_query_value!(i32, i64, u32, u64, usize);

/// 请求参数，默认 GET、无查询、无请求体、无额外请求头
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// 按插入顺序编码，`None` 会被丢弃
    pub query: Vec<(String, Option<QueryValue>)>,
    /// 仅在非 GET 请求时发送
    pub body: Option<serde_json::Value>,
    /// 与默认请求头冲突时以调用方为准
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), Some(value.into())));
        self
    }

    pub fn query_opt<V: Into<QueryValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query.push((key.into(), value.map(Into::into)));
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// 构建查询串: `[(a, 1), (b, "x")] -> ?a=1&b=x`，全部为空时返回空串
pub fn build_query(params: &[(String, Option<QueryValue>)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut appended = false;
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, &value.to_string());
            appended = true;
        }
    }
    if appended {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

/// 已组装好、尚未发送的请求
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// 按提供方路由的 API 客户端
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    registry: ProviderRegistry,
}

impl ApiClient {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), registry)
    }

    pub fn with_client(client: Client, registry: ProviderRegistry) -> Self {
        Self { client, registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn base_url(&self, provider: ProviderId) -> crate::Result<&str> {
        self.registry.base_url(provider)
    }

    /// 组装请求，不做任何网络 I/O
    pub fn prepare(
        &self,
        provider: ProviderId,
        path: &str,
        options: &RequestOptions,
    ) -> crate::Result<PreparedRequest> {
        let base = self.registry.base_url(provider)?;
        let url = format!("{}{}{}", base, path, build_query(&options.query));
        url::Url::parse(&url).map_err(|source| Error::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &options.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        let body = match (&options.method, &options.body) {
            (Method::Get, _) | (_, None) | (_, Some(serde_json::Value::Null)) => None,
            (_, Some(body)) => Some(serde_json::to_string(body).map_err(Error::Encode)?),
        };

        Ok(PreparedRequest {
            method: options.method,
            url,
            headers,
            body,
        })
    }

    /// 向指定提供方发送请求并把 JSON 响应解析为 `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        provider: ProviderId,
        path: &str,
        options: RequestOptions,
    ) -> crate::Result<T> {
        let prepared = self.prepare(provider, path, &options)?;
        self.send(prepared).await
    }

    /// 同 [`ApiClient::request`]，提供方以字符串标识给出
    pub async fn request_named<T: DeserializeOwned>(
        &self,
        provider: &str,
        path: &str,
        options: RequestOptions,
    ) -> crate::Result<T> {
        let (provider, _) = self.registry.resolve(provider)?;
        self.request(provider, path, options).await
    }

    async fn send<T: DeserializeOwned>(&self, prepared: PreparedRequest) -> crate::Result<T> {
        debug!("{:?} {}", prepared.method, prepared.url);

        let mut req = self
            .client
            .request(prepared.method.into(), &prepared.url)
            .headers(prepared.headers);
        if let Some(body) = prepared.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Error::Parse)
    }
}
