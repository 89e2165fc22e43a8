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

use crate::config::ResponseTypeMetadata;
use crate::options::MockOptionsCell;
use crate::resolver::reference::MockReference;
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;

/// Looks up configured mock identifiers for declared response types.
///
/// Holds its own lowercased snapshot of `response_mappings`, replaced
/// atomically whenever the options cell installs a new snapshot. The change
/// handler rejects an update whose mapping is empty, which keeps the
/// previous snapshot in place and surfaces the update as a configuration
/// error to whoever triggered it.
pub struct ResponseMappingResolver {
    mappings: Arc<ArcSwap<HashMap<String, String>>>,
}

impl ResponseMappingResolver {
    pub fn new(options: &MockOptionsCell) -> anyhow::Result<Self> {
        let mappings: Arc<ArcSwap<HashMap<String, String>>> =
            Arc::new(ArcSwap::from_pointee(HashMap::new()));

        let snapshot = mappings.clone();
        options.subscribe(Box::new(move |opts| {
            if opts.response_mappings.is_empty() {
                anyhow::bail!("response_mappings doesn't contain any mappings");
            }

            let lowered: HashMap<String, String> = opts
                .response_mappings
                .iter()
                .map(|(key, identifier)| (key.to_ascii_lowercase(), identifier.clone()))
                .collect();
            snapshot.store(Arc::new(lowered));
            Ok(())
        }))?;

        Ok(Self { mappings })
    }

    /// Walks the metadata list in declaration order and returns a reference
    /// for the first key with a configured identifier. The key is the type's
    /// full name, suffixed with `.variant` when a non-blank variant was
    /// requested. Lookup is case-insensitive; the reported key keeps the
    /// computed casing.
    pub fn try_resolve(
        &self,
        metadata: &[&ResponseTypeMetadata],
        variant: Option<&str>,
    ) -> Option<MockReference> {
        let mappings = self.mappings.load();

        for meta in metadata {
            let type_name = match meta.type_name.as_deref() {
                Some(name) => name,
                None => continue,
            };

            let key = match variant {
                Some(v) if !v.trim().is_empty() => format!("{}.{}", type_name, v),
                _ => type_name.to_string(),
            };

            if let Some(identifier) = mappings.get(&key.to_ascii_lowercase()) {
                return Some(MockReference::new(identifier.clone(), key));
            }
        }

        None
    }
}
