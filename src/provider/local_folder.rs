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
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default logical name for the folder-backed provider.
pub const LOCAL_FOLDER_STORE_NAME: &str = "LocalFolderStore";

/// Default configuration section under `mock.provider`.
pub const LOCAL_FOLDER_STORE_SECTION: &str = "local_folder_store";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalFolderStoreOptions {
    pub folder_path: String,
}

impl ProviderOptions for LocalFolderStoreOptions {
    fn validate(&self) -> Result<(), String> {
        if self.folder_path.trim().is_empty() {
            return Err("folder_path must not be empty".to_string());
        }
        Ok(())
    }
}

/// File system seam so provider behavior can be tested without touching
/// disk.
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

pub struct TokioFileSystem;

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// Serves mock content from files under a configured root directory. The
/// identifier is joined onto the root; a missing file is a not-found error,
/// not a configuration error.
pub struct LocalFolderStoreProvider {
    folder_path: PathBuf,
    file_system: Arc<dyn FileSystem>,
}

impl LocalFolderStoreProvider {
    pub fn new(options: LocalFolderStoreOptions) -> Self {
        Self::with_file_system(options, Arc::new(TokioFileSystem))
    }

    pub fn with_file_system(
        options: LocalFolderStoreOptions,
        file_system: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            folder_path: PathBuf::from(options.folder_path),
            file_system,
        }
    }
}

#[async_trait]
impl MockResponseProvider for LocalFolderStoreProvider {
    fn name(&self) -> &str {
        LOCAL_FOLDER_STORE_NAME
    }

    async fn get_response(&self, identifier: &str) -> Result<(String, String), MockError> {
        let file_path = self.folder_path.join(identifier);

        if !self.file_system.exists(&file_path).await {
            return Err(MockError::ContentNotFound(format!(
                "Unable to locate [{}]",
                file_path.display()
            )));
        }

        let content = self
            .file_system
            .read_to_string(&file_path)
            .await
            .map_err(|e| {
                MockError::Unexpected(anyhow::anyhow!(
                    "Failed to read [{}]: {}",
                    file_path.display(),
                    e
                ))
            })?;

        Ok((content, self.name().to_string()))
    }
}
