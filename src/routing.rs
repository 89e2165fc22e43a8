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

use crate::config::{EndpointConfig, ResponseTypeMetadata};
use actix_web::http::header::HeaderMap;
use regex::Regex;
use std::collections::HashMap;

/// A declared route with its response-type metadata, in declaration order.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub name: String,
    pub method: String,
    pub path: String,
    pub responses: Vec<ResponseTypeMetadata>,
}

impl From<EndpointConfig> for Endpoint {
    fn from(config: EndpointConfig) -> Self {
        Self {
            name: config.name,
            method: config.method,
            path: config.path,
            responses: config.responses,
        }
    }
}

/// Everything the policies and resolvers need to know about one request:
/// method, path, headers, and the matched endpoint (if any).
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub headers: &'a HeaderMap,
    pub endpoint: Option<&'a Endpoint>,
}

impl<'a> RequestContext<'a> {
    pub fn endpoint_name(&self) -> &str {
        self.endpoint.map(|e| e.name.as_str()).unwrap_or("unknown")
    }
}

/// Matches incoming requests against the declared endpoints.
///
/// Paths support `:param` segments and `*` wildcards. Endpoints are ordered
/// by specificity so an exact path wins over a parameterized one, which wins
/// over a wildcard.
#[derive(Clone)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
    path_patterns: HashMap<String, Regex>,
}

impl EndpointRegistry {
    pub fn new(mut endpoints: Vec<Endpoint>) -> Self {
        let mut path_patterns = HashMap::new();

        endpoints.sort_by(|a, b| {
            let a_score = Self::path_specificity_score(&a.path);
            let b_score = Self::path_specificity_score(&b.path);

            if a_score != b_score {
                b_score.cmp(&a_score)
            } else {
                b.path.len().cmp(&a.path.len())
            }
        });

        for endpoint in &endpoints {
            let normalized_path = Self::normalize_path(&endpoint.path);
            let pattern = Self::compile_path_pattern(&normalized_path);
            path_patterns.insert(endpoint.path.clone(), pattern);
        }

        Self {
            endpoints,
            path_patterns,
        }
    }

    pub fn from_config(endpoints: Vec<EndpointConfig>) -> Self {
        Self::new(endpoints.into_iter().map(Endpoint::from).collect())
    }

    /// Finds the declared endpoint matching the request, or `None`. Absence
    /// is a normal outcome here; the endpoint-exists policy turns it into a
    /// bypass so the framework's own 404 handling proceeds.
    pub fn find_match(&self, method: &str, path: &str) -> Option<&Endpoint> {
        let normalized_request_path = Self::normalize_path(path);

        self.endpoints.iter().find(|endpoint| {
            endpoint.method.eq_ignore_ascii_case(method)
                && self.matches_path(&endpoint.path, &normalized_request_path)
        })
    }

    fn path_specificity_score(path: &str) -> u32 {
        if path.contains('*') {
            1
        } else if path.contains(':') {
            2
        } else {
            3
        }
    }

    fn normalize_path(path: &str) -> String {
        let mut normalized = String::new();
        let mut last_was_slash = false;

        for c in path.chars() {
            if c == '/' {
                if !last_was_slash {
                    normalized.push(c);
                    last_was_slash = true;
                }
            } else {
                normalized.push(c);
                last_was_slash = false;
            }
        }

        if normalized.len() > 1 && normalized.ends_with('/') {
            normalized.pop();
        }

        if normalized.is_empty() {
            "/".to_string()
        } else {
            normalized
        }
    }

    fn matches_path(&self, endpoint_path: &str, request_path: &str) -> bool {
        if let Some(pattern) = self.path_patterns.get(endpoint_path) {
            pattern.is_match(request_path)
        } else {
            Self::normalize_path(endpoint_path) == request_path
        }
    }

    fn compile_path_pattern(path: &str) -> Regex {
        let mut pattern = String::new();
        let mut in_param = false;

        for c in path.chars() {
            match c {
                ':' => {
                    in_param = true;
                    pattern.push_str("([^/]+)");
                }
                '/' => {
                    if in_param {
                        in_param = false;
                    }
                    pattern.push_str("\\/");
                }
                '*' => {
                    pattern.push_str(".*");
                }
                _ => {
                    if !in_param {
                        pattern.push(c);
                    }
                }
            }
        }

        Regex::new(&format!("^{}$", pattern)).unwrap_or_else(|_| Regex::new("^$").unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(method: &str, path: &str) -> Endpoint {
        Endpoint {
            name: "Test".to_string(),
            method: method.to_string(),
            path: path.to_string(),
            responses: vec![ResponseTypeMetadata {
                status: 200,
                type_name: Some("demo.Model".to_string()),
            }],
        }
    }

    #[test]
    fn test_find_match_exact_path() {
        let registry = EndpointRegistry::new(vec![
            endpoint("GET", "/api/users"),
            endpoint("POST", "/api/users"),
        ]);

        let matched = registry.find_match("GET", "/api/users").unwrap();
        assert_eq!(matched.method, "GET");

        let matched = registry.find_match("POST", "/api/users").unwrap();
        assert_eq!(matched.method, "POST");
    }

    #[test]
    fn test_find_match_with_params() {
        let registry = EndpointRegistry::new(vec![endpoint("GET", "/users/:id")]);

        let matched = registry.find_match("GET", "/users/123").unwrap();
        assert_eq!(matched.path, "/users/:id");
    }

    #[test]
    fn test_find_match_no_match_is_none() {
        let registry = EndpointRegistry::new(vec![endpoint("GET", "/api/users")]);
        assert!(registry.find_match("GET", "/api/products").is_none());
    }

    #[test]
    fn test_matches_path_with_wildcard() {
        let registry = EndpointRegistry::new(vec![endpoint("GET", "/api/*")]);

        assert!(registry.find_match("GET", "/api/users").is_some());
        assert!(registry.find_match("GET", "/api/users/123").is_some());
    }

    #[test]
    fn test_case_insensitive_method() {
        let registry = EndpointRegistry::new(vec![endpoint("GET", "/test")]);
        assert!(registry.find_match("get", "/test").is_some());
    }

    #[test]
    fn test_find_match_trailing_slash() {
        let registry = EndpointRegistry::new(vec![endpoint("GET", "/api/users")]);
        assert!(registry.find_match("GET", "/api/users/").is_some());
    }

    #[test]
    fn test_find_match_duplicate_slashes() {
        let registry = EndpointRegistry::new(vec![endpoint("GET", "/api/users")]);
        assert!(registry.find_match("GET", "//api///users").is_some());
    }

    #[test]
    fn test_find_match_precedence() {
        let registry = EndpointRegistry::new(vec![
            endpoint("GET", "/api/*"),
            endpoint("GET", "/api/users"),
            endpoint("GET", "/api/:id"),
        ]);

        assert_eq!(registry.find_match("GET", "/api/users").unwrap().path, "/api/users");
        assert_eq!(registry.find_match("GET", "/api/123").unwrap().path, "/api/:id");
    }

    #[test]
    fn test_metadata_declaration_order_is_kept() {
        let mut first = endpoint("GET", "/multi");
        first.responses = vec![
            ResponseTypeMetadata {
                status: 200,
                type_name: Some("demo.First".to_string()),
            },
            ResponseTypeMetadata {
                status: 200,
                type_name: Some("demo.Second".to_string()),
            },
        ];

        let registry = EndpointRegistry::new(vec![first]);
        let matched = registry.find_match("GET", "/multi").unwrap();
        assert_eq!(matched.responses[0].type_name.as_deref(), Some("demo.First"));
        assert_eq!(matched.responses[1].type_name.as_deref(), Some("demo.Second"));
    }
}
