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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub mock: MockConfig,
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    4
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Mocking behavior switches consumed by the policies and resolvers.
///
/// The process holds these as an immutable snapshot in a
/// [`crate::options::MockOptionsCell`]; a configuration reload replaces the
/// whole snapshot, never mutates it in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockOptions {
    /// Master switch. When false every request bypasses mocking.
    #[serde(default)]
    pub use_mock: bool,

    /// Request path prefixes that always bypass mocking,
    /// e.g. ["/swagger", "/health", "/metrics"].
    #[serde(default)]
    pub excluded_request_paths: Vec<String>,

    /// Fully-qualified response type name (optionally suffixed with
    /// ".variant") to mock content identifier. Keys are matched
    /// case-insensitively.
    #[serde(default)]
    pub response_mappings: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    #[serde(flatten)]
    pub options: MockOptions,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Provider selection plus the raw, still-untyped provider sections.
///
/// Sections stay as `serde_yaml::Value` until the deferred factory binds
/// them, so a section that is absent at startup only fails at first use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub sections: HashMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub name: String,
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub responses: Vec<ResponseTypeMetadata>,
}

/// A declared (status code, response type) pair attached to an endpoint.
///
/// An entry without a `type` is the "unspecified result" marker and never
/// participates in mapping resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTypeMetadata {
    pub status: u16,
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            mock: MockConfig {
                options: MockOptions::default(),
                provider: ProviderConfig::default(),
            },
            endpoints: Vec::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            workers: default_workers(),
            host: default_host(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
