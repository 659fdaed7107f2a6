use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::error;

/// Thin JSON helper over `reqwest`, shared by the content-service clients.
/// Every request carries the configured timeout; a timed-out call surfaces as
/// a plain request error to the caller.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("To build the HTTP client");
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// GET that maps a 404 to `Ok(None)` so that callers can branch on
    /// absence without treating it as a failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<Option<T>> {
        let res = match self.client.get(&self.url(path)).send().await {
            Ok(res) => res,
            Err(e) => {
                error!(
                    "[Network Error] Content API GET {} error. Error message: {:?}",
                    path, e
                );
                return Err(anyhow::Error::new(e));
            }
        };
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let res = res.error_for_status().map_err(|e| {
            error!(
                "[Unexpected Response] Content API GET {} error. Error message: {:?}",
                path, e
            );
            anyhow::Error::new(e)
        })?;
        res.json::<T>().await.map(Some).map_err(|e| {
            error!(
                "[Unexpected Response] Content API GET {} error. Error message: {:?}",
                path, e
            );
            anyhow::Error::new(e)
        })
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        body: &impl Serialize,
        path: &str,
    ) -> anyhow::Result<T> {
        let req = self.client.post(&self.url(path)).json(body);
        Self::execute("POST", path, req).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        body: &impl Serialize,
        path: &str,
    ) -> anyhow::Result<T> {
        let req = self.client.patch(&self.url(path)).json(body);
        Self::execute("PATCH", path, req).await
    }

    async fn execute<T: DeserializeOwned>(
        method: &str,
        path: &str,
        req: reqwest::RequestBuilder,
    ) -> anyhow::Result<T> {
        match req.send().await {
            Ok(res) => {
                let res = res.error_for_status().map_err(|e| {
                    error!(
                        "[Unexpected Response] Content API {} {} error. Error message: {:?}",
                        method, path, e
                    );
                    anyhow::Error::new(e)
                })?;
                res.json::<T>().await.map_err(|e| {
                    error!(
                        "[Unexpected Response] Content API {} {} error. Error message: {:?}",
                        method, path, e
                    );
                    anyhow::Error::new(e)
                })
            }
            Err(e) => {
                error!(
                    "[Network Error] Content API {} {} error. Error message: {:?}",
                    method, path, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}
