/// Thin wrapper around `reqwest::Client` that buffers the response body so
/// predicates can inspect both the raw text and its JSON form.
use std::time::Duration;

use tracing::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HttpError: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to deserialize http response into the specified type: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Response {
    status: reqwest::StatusCode,
    text: String,
}

impl Response {
    pub fn status(&self) -> reqwest::StatusCode {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.text)?)
    }

    async fn from(res: reqwest::Response) -> Self {
        Response {
            status: res.status(),
            text: res.text().await.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Default)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    /// Construct a client with a bounded per-request timeout.
    pub fn new(timeout: Duration) -> Result<Client, Error> {
        Ok(Client {
            inner: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn request(&self, method: reqwest::Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        RequestBuilder {
            inner: self.inner.request(method, url),
        }
    }
}

pub struct RequestBuilder {
    inner: reqwest::RequestBuilder,
}

impl RequestBuilder {
    pub fn json<T: serde::Serialize + ?Sized>(mut self, json: &T) -> RequestBuilder {
        self.inner = self.inner.json(json);
        self
    }

    pub async fn send(self) -> Result<Response, Error> {
        let res = self.inner.send().await?;
        debug!("{} {}", res.status(), res.url());
        Ok(Response::from(res).await)
    }
}
