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

use crate::config::ProviderConfig;
use crate::error::MockError;
use crate::provider::local_folder::{
    LocalFolderStoreOptions, LocalFolderStoreProvider, LOCAL_FOLDER_STORE_NAME,
    LOCAL_FOLDER_STORE_SECTION,
};
use crate::provider::object_store::{
    CachingClientFactory, HttpObjectStoreClientFactory, ObjectStoreOptions, ObjectStoreProvider,
    OBJECT_STORE_NAME, OBJECT_STORE_SECTION,
};
use crate::provider::{MockResponseProvider, ProviderOptions};
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};

/// Creates the configured provider. Invoked once per request that reaches
/// the provider stage; implementations must be safe to re-invoke.
pub trait MockProviderFactory: Send + Sync {
    fn create(&self) -> Result<Arc<dyn MockResponseProvider>, MockError>;
}

pub type ConfigureOptions<O> = Box<dyn Fn(&mut O) + Send + Sync>;
type Initializer<O> = Box<dyn Fn(O) -> Result<Arc<dyn MockResponseProvider>, MockError> + Send + Sync>;

/// Deferred, runtime-safe provider factory.
///
/// The provider's configuration section may be absent when the process
/// starts (common when config is populated by the environment), so every
/// `create` re-reads the current section snapshot: missing section and
/// failed validation are reported at first use, not at startup. Binding
/// order: serde bind, programmatic override, structural validation.
pub struct DeferredProviderFactory<O: ProviderOptions> {
    provider_name: String,
    section_name: String,
    sections: Arc<ArcSwap<ProviderConfig>>,
    configure: Option<ConfigureOptions<O>>,
    initializer: Initializer<O>,
}

impl<O: ProviderOptions> DeferredProviderFactory<O> {
    pub fn new(
        provider_name: impl Into<String>,
        section_name: impl Into<String>,
        sections: Arc<ArcSwap<ProviderConfig>>,
        configure: Option<ConfigureOptions<O>>,
        initializer: Initializer<O>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            section_name: section_name.into(),
            sections,
            configure,
            initializer,
        }
    }
}

impl<O: ProviderOptions> MockProviderFactory for DeferredProviderFactory<O> {
    fn create(&self) -> Result<Arc<dyn MockResponseProvider>, MockError> {
        let provider_config = self.sections.load();
        let section = provider_config
            .sections
            .get(&self.section_name)
            .ok_or_else(|| {
                MockError::Configuration(format!(
                    "Missing the configuration section for the '{}' mock provider",
                    self.provider_name
                ))
            })?;

        let mut options: O = serde_yaml::from_value(section.clone()).map_err(|e| {
            MockError::InvalidOptions(format!(
                "Failed to bind the '{}' section: {}",
                self.section_name, e
            ))
        })?;

        if let Some(configure) = &self.configure {
            configure(&mut options);
        }

        options.validate().map_err(MockError::InvalidOptions)?;

        let provider = (self.initializer)(options)?;
        if provider.name() != self.provider_name {
            return Err(MockError::Configuration(format!(
                "Provider has name '{}' but was registered as '{}'",
                provider.name(),
                self.provider_name
            )));
        }

        Ok(provider)
    }
}

/// Holds the single registered provider factory for the process.
#[derive(Default)]
pub struct ProviderRegistry {
    factory: Mutex<Option<Arc<dyn MockProviderFactory>>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the provider factory. A second registration is a startup
    /// defect and fails.
    pub fn register(&self, factory: Arc<dyn MockProviderFactory>) -> anyhow::Result<()> {
        let mut slot = self.factory.lock().expect("provider registry poisoned");
        if slot.is_some() {
            anyhow::bail!("Only one mock response provider can be registered.");
        }
        *slot = Some(factory);
        Ok(())
    }

    pub fn factory(&self) -> Result<Arc<dyn MockProviderFactory>, MockError> {
        self.factory
            .lock()
            .expect("provider registry poisoned")
            .clone()
            .ok_or_else(|| {
                MockError::Configuration(
                    "No mock response provider has been registered.".to_string(),
                )
            })
    }
}

/// Factory for the folder-backed provider bound to the default
/// `local_folder_store` section.
pub fn local_folder_store_factory(
    sections: Arc<ArcSwap<ProviderConfig>>,
    configure: Option<ConfigureOptions<LocalFolderStoreOptions>>,
) -> Arc<dyn MockProviderFactory> {
    Arc::new(DeferredProviderFactory::new(
        LOCAL_FOLDER_STORE_NAME,
        LOCAL_FOLDER_STORE_SECTION,
        sections,
        configure,
        Box::new(|options| Ok(Arc::new(LocalFolderStoreProvider::new(options)) as Arc<_>)),
    ))
}

/// Factory for the object-store-backed provider bound to the default
/// `object_store` section. The client cache is created once here and shared
/// across every provider instance the factory hands out.
pub fn object_store_factory(
    sections: Arc<ArcSwap<ProviderConfig>>,
    configure: Option<ConfigureOptions<ObjectStoreOptions>>,
) -> Arc<dyn MockProviderFactory> {
    let clients = Arc::new(CachingClientFactory::new(Arc::new(
        HttpObjectStoreClientFactory::new(),
    )));

    Arc::new(DeferredProviderFactory::new(
        OBJECT_STORE_NAME,
        OBJECT_STORE_SECTION,
        sections,
        configure,
        Box::new(move |options| {
            Ok(Arc::new(ObjectStoreProvider::new(options, clients.clone())) as Arc<_>)
        }),
    ))
}
