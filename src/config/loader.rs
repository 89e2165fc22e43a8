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

use crate::config::types::Config;
use anyhow::Context;
use std::fs;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> anyhow::Result<Config> {
        let config: Config =
            serde_yaml::from_str(content).with_context(|| "Failed to parse YAML configuration")?;

        Self::validate(&config)?;

        Ok(config)
    }

    fn validate(config: &Config) -> anyhow::Result<()> {
        if config.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if config.server.workers == 0 {
            anyhow::bail!("Server workers cannot be 0");
        }

        for path in &config.mock.options.excluded_request_paths {
            if !path.starts_with('/') {
                anyhow::bail!("Excluded request path '{}' must start with '/'", path);
            }
        }

        for endpoint in &config.endpoints {
            if endpoint.name.trim().is_empty() {
                anyhow::bail!("Endpoint name cannot be empty");
            }

            if endpoint.method.trim().is_empty() {
                anyhow::bail!("Endpoint '{}' method cannot be empty", endpoint.name);
            }

            if !endpoint.path.starts_with('/') {
                anyhow::bail!(
                    "Endpoint '{}' path must start with '/': {}",
                    endpoint.name,
                    endpoint.path
                );
            }

            for response in &endpoint.responses {
                if !(100..=599).contains(&response.status) {
                    anyhow::bail!(
                        "Endpoint '{}' declares invalid status code {}",
                        endpoint.name,
                        response.status
                    );
                }

                if let Some(type_name) = &response.type_name {
                    if type_name.trim().is_empty() {
                        anyhow::bail!(
                            "Endpoint '{}' declares an empty response type; omit 'type' instead",
                            endpoint.name
                        );
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config_str = r#"
server:
  port: 8080
  workers: 4

mock:
  use_mock: true
  excluded_request_paths: ["/health"]
  response_mappings:
    "demo.WeatherForecast": "weather.json"
  provider:
    name: "LocalFolderStore"
    local_folder_store:
      folder_path: "./mocks"

endpoints:
  - name: "GetWeather"
    method: GET
    path: /weather
    responses:
      - status: 200
        type: "demo.WeatherForecast"
        "#;

        let config = ConfigLoader::from_str(config_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.mock.options.use_mock);
        assert_eq!(config.endpoints.len(), 1);
        assert_eq!(config.endpoints[0].name, "GetWeather");
        assert_eq!(
            config.endpoints[0].responses[0].type_name.as_deref(),
            Some("demo.WeatherForecast")
        );
        assert_eq!(config.mock.provider.name, "LocalFolderStore");
    }

    #[test]
    fn test_invalid_port() {
        let config_str = r#"
server:
  port: 0

mock:
  use_mock: false
        "#;

        let result = ConfigLoader::from_str(config_str);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("port cannot be 0"));
    }

    #[test]
    fn test_empty_endpoint_name() {
        let config_str = r#"
mock:
  use_mock: false

endpoints:
  - name: ""
    method: GET
    path: /test
        "#;

        let result = ConfigLoader::from_str(config_str);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Endpoint name cannot be empty"));
    }

    #[test]
    fn test_excluded_path_must_be_rooted() {
        let config_str = r#"
mock:
  use_mock: true
  excluded_request_paths: ["health"]
        "#;

        let result = ConfigLoader::from_str(config_str);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must start with '/'"));
    }

    #[test]
    fn test_invalid_status_code() {
        let config_str = r#"
mock:
  use_mock: true

endpoints:
  - name: "Bad"
    method: GET
    path: /bad
    responses:
      - status: 99
        type: "demo.Bad"
        "#;

        let result = ConfigLoader::from_str(config_str);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("invalid status code 99"));
    }

    #[test]
    fn test_missing_provider_section_still_loads() {
        // The provider section may be absent at startup; the deferred factory
        // reports it at first use instead.
        let config_str = r#"
mock:
  use_mock: true
  response_mappings:
    "demo.WeatherForecast": "weather.json"
  provider:
    name: "LocalFolderStore"
        "#;

        let config = ConfigLoader::from_str(config_str).unwrap();
        assert!(config.mock.provider.sections.is_empty());
    }
}
