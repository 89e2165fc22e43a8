/*
 * Copyright 2026 Mockgate Team
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use crate::error::MockError;
use crate::provider::{MockResponseProvider, ProviderOptions};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Default logical name for the object-store-backed provider.
pub const OBJECT_STORE_NAME: &str = "ObjectStore";

/// Default configuration section under `mock.provider`.
pub const OBJECT_STORE_SECTION: &str = "object_store";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreOptions {
    /// Base endpoint URL of the store, e.g. "http://127.0.0.1:10000/devstore".
    pub connection_string: String,
    /// Container (first path segment) holding the mock objects.
    pub container_name: String,
}

impl ProviderOptions for ObjectStoreOptions {
    fn validate(&self) -> Result<(), String> {
        if self.connection_string.trim().is_empty() {
            return Err("connection_string must not be empty".to_string());
        }
        if self.container_name.trim().is_empty() {
            return Err("container_name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Narrow read contract against one container of an object store.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    fn container_name(&self) -> &str;

    async fn exists(&self, key: &str) -> Result<bool, MockError>;

    async fn read(&self, key: &str) -> Result<String, MockError>;
}

/// Creates connected clients. Construction performs a connectivity probe;
/// an unreachable store is a configuration error, not a not-found.
#[async_trait]
pub trait ObjectStoreClientFactory: Send + Sync {
    async fn create(
        &self,
        connection_string: &str,
        container_name: &str,
    ) -> Result<Arc<dyn ObjectStoreClient>, MockError>;
}

/// Identity of a cached client: the exact credentials and container it was
/// built for.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ClientCacheKey {
    connection_string: String,
    container_name: String,
}

/// Single-entry client cache.
///
/// Configuration changes are rare, so this is an LRU of one: a lookup with a
/// different key constructs a new client and drops the previous entry
/// (in-flight requests keep their own Arc; the old client is dropped, never
/// force-closed). The mutex guarantees at most one construction per key
/// under concurrent first use.
pub struct CachingClientFactory {
    inner: Arc<dyn ObjectStoreClientFactory>,
    cache: Mutex<Option<(ClientCacheKey, Arc<dyn ObjectStoreClient>)>>,
}

impl CachingClientFactory {
    pub fn new(inner: Arc<dyn ObjectStoreClientFactory>) -> Self {
        Self {
            inner,
            cache: Mutex::new(None),
        }
    }

    pub async fn get_or_create(
        &self,
        connection_string: &str,
        container_name: &str,
    ) -> Result<Arc<dyn ObjectStoreClient>, MockError> {
        let key = ClientCacheKey {
            connection_string: connection_string.to_string(),
            container_name: container_name.to_string(),
        };

        let mut cache = self.cache.lock().await;
        if let Some((cached_key, client)) = cache.as_ref() {
            if *cached_key == key {
                return Ok(client.clone());
            }
            debug!(
                container = %container_name,
                "Object store configuration changed, replacing cached client"
            );
        }

        let client = self.inner.create(connection_string, container_name).await?;
        *cache = Some((key, client.clone()));
        Ok(client)
    }
}

/// HTTP-addressed object store client: objects live at
/// `{connection_string}/{container}/{key}`, existence is probed with HEAD
/// and content read with GET.
pub struct HttpObjectStoreClient {
    http: reqwest::Client,
    base_url: String,
    container_name: String,
}

impl HttpObjectStoreClient {
    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.container_name,
            key
        )
    }
}

#[async_trait]
impl ObjectStoreClient for HttpObjectStoreClient {
    fn container_name(&self) -> &str {
        &self.container_name
    }

    async fn exists(&self, key: &str) -> Result<bool, MockError> {
        let response = self
            .http
            .head(self.object_url(key))
            .send()
            .await
            .map_err(|e| {
                MockError::Unexpected(anyhow::anyhow!("Existence probe for [{}] failed: {}", key, e))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if response.status().is_success() {
            return Ok(true);
        }

        Err(MockError::Unexpected(anyhow::anyhow!(
            "Object store returned {} probing [{}]",
            response.status(),
            key
        )))
    }

    async fn read(&self, key: &str) -> Result<String, MockError> {
        let response = self
            .http
            .get(self.object_url(key))
            .send()
            .await
            .map_err(|e| {
                MockError::Unexpected(anyhow::anyhow!("Reading [{}] failed: {}", key, e))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MockError::ContentNotFound(format!(
                "Unable to locate [{}/{}]",
                self.container_name, key
            )));
        }

        if !response.status().is_success() {
            return Err(MockError::Unexpected(anyhow::anyhow!(
                "Object store returned {} reading [{}]",
                response.status(),
                key
            )));
        }

        response.text().await.map_err(|e| {
            MockError::Unexpected(anyhow::anyhow!("Reading body of [{}] failed: {}", key, e))
        })
    }
}

pub struct HttpObjectStoreClientFactory {
    http: reqwest::Client,
}

impl HttpObjectStoreClientFactory {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpObjectStoreClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStoreClientFactory for HttpObjectStoreClientFactory {
    async fn create(
        &self,
        connection_string: &str,
        container_name: &str,
    ) -> Result<Arc<dyn ObjectStoreClient>, MockError> {
        let client = HttpObjectStoreClient {
            http: self.http.clone(),
            base_url: connection_string.to_string(),
            container_name: container_name.to_string(),
        };

        // Connectivity check. Any HTTP answer means the store is reachable;
        // only a transport failure is treated as a configuration error.
        let container_url = format!(
            "{}/{}",
            connection_string.trim_end_matches('/'),
            container_name
        );
        self.http.head(&container_url).send().await.map_err(|e| {
            MockError::Configuration(format!(
                "Unable to access object store container '{}': {}",
                container_name, e
            ))
        })?;

        Ok(Arc::new(client))
    }
}

/// Serves mock content from an object store, probing for existence before
/// reading so an absent object surfaces as not-found rather than a raw
/// transport error.
pub struct ObjectStoreProvider {
    options: ObjectStoreOptions,
    clients: Arc<CachingClientFactory>,
}

impl ObjectStoreProvider {
    pub fn new(options: ObjectStoreOptions, clients: Arc<CachingClientFactory>) -> Self {
        Self { options, clients }
    }
}

#[async_trait]
impl MockResponseProvider for ObjectStoreProvider {
    fn name(&self) -> &str {
        OBJECT_STORE_NAME
    }

    async fn get_response(&self, identifier: &str) -> Result<(String, String), MockError> {
        let client = self
            .clients
            .get_or_create(&self.options.connection_string, &self.options.container_name)
            .await?;

        if !client.exists(identifier).await? {
            return Err(MockError::ContentNotFound(format!(
                "Unable to locate [{}/{}]",
                client.container_name(),
                identifier
            )));
        }

        let content = client.read(identifier).await?;
        Ok((content, self.name().to_string()))
    }
}
