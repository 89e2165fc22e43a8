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

pub mod factory;
pub mod local_folder;
pub mod object_store;

pub use factory::{DeferredProviderFactory, MockProviderFactory, ProviderRegistry};
pub use local_folder::LocalFolderStoreProvider;
pub use object_store::ObjectStoreProvider;

use crate::error::MockError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// A backend that turns a mock content identifier into raw stored content.
///
/// `get_response` returns the content together with the serving provider's
/// logical name so the middleware can echo it in a diagnostic header.
#[async_trait]
pub trait MockResponseProvider: Send + Sync {
    /// The provider's stable logical name (e.g. "LocalFolderStore").
    fn name(&self) -> &str;

    async fn get_response(&self, identifier: &str) -> Result<(String, String), MockError>;
}

/// Structural validation for provider options bound from configuration.
pub trait ProviderOptions: DeserializeOwned {
    fn validate(&self) -> Result<(), String>;
}
