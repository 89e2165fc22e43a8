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

use crate::options::MockOptionsCell;
use crate::routing::RequestContext;
use std::sync::Arc;

/// A predicate deciding whether a request should skip mocking entirely.
///
/// Policies are independent and evaluated with OR semantics; the first one
/// returning `Some(reason)` wins and its reason is logged. Reasons are
/// diagnostics only.
pub trait MockingPolicy: Send + Sync {
    fn should_bypass(&self, ctx: &RequestContext<'_>) -> Option<String>;
}

/// Bypasses mocking while the `use_mock` flag is off. Reads the current
/// options snapshot on every call, so it reacts to configuration changes
/// immediately.
pub struct UseMockPolicy {
    options: Arc<MockOptionsCell>,
}

impl UseMockPolicy {
    pub fn new(options: Arc<MockOptionsCell>) -> Self {
        Self { options }
    }
}

impl MockingPolicy for UseMockPolicy {
    fn should_bypass(&self, _ctx: &RequestContext<'_>) -> Option<String> {
        if !self.options.current().use_mock {
            Some("Mocking disabled".to_string())
        } else {
            None
        }
    }
}

/// Bypasses mocking for request paths under any configured excluded prefix.
///
/// Matching is case-insensitive, trailing-slash-tolerant on both sides, and
/// stops at segment boundaries: excluding `/api` covers `/API/`, `/api` and
/// `/api/sub` but not `/apiary`.
pub struct ExcludePathPolicy {
    options: Arc<MockOptionsCell>,
}

impl ExcludePathPolicy {
    pub fn new(options: Arc<MockOptionsCell>) -> Self {
        Self { options }
    }

    fn is_path_excluded(excluded_request_paths: &[String], request_path: &str) -> bool {
        let normalized_request = request_path.trim_end_matches('/').to_ascii_lowercase();

        excluded_request_paths.iter().any(|excluded| {
            let prefix = excluded.trim_end_matches('/').to_ascii_lowercase();
            if prefix.is_empty() {
                // Excluding "/" excludes everything.
                return true;
            }

            normalized_request == prefix
                || normalized_request.starts_with(&format!("{}/", prefix))
        })
    }
}

impl MockingPolicy for ExcludePathPolicy {
    fn should_bypass(&self, ctx: &RequestContext<'_>) -> Option<String> {
        let options = self.options.current();
        if Self::is_path_excluded(&options.excluded_request_paths, ctx.path) {
            Some(format!("'{}' path is excluded", ctx.path))
        } else {
            None
        }
    }
}

/// Bypasses mocking when no declared endpoint matches the request, so the
/// framework's own 404 handling proceeds untouched.
pub struct EndpointExistsPolicy;

impl MockingPolicy for EndpointExistsPolicy {
    fn should_bypass(&self, ctx: &RequestContext<'_>) -> Option<String> {
        if ctx.endpoint.is_none() {
            Some("No endpoint found".to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MockOptions, ResponseTypeMetadata};
    use crate::routing::Endpoint;
    use actix_web::http::header::HeaderMap;
    use std::collections::HashMap;

    fn options_cell(use_mock: bool, excluded: &[&str]) -> Arc<MockOptionsCell> {
        Arc::new(MockOptionsCell::new(MockOptions {
            use_mock,
            excluded_request_paths: excluded.iter().map(|s| s.to_string()).collect(),
            response_mappings: HashMap::from([(
                "demo.Model".to_string(),
                "demo.json".to_string(),
            )]),
        }))
    }

    fn test_endpoint() -> Endpoint {
        Endpoint {
            name: "Test".to_string(),
            method: "GET".to_string(),
            path: "/test".to_string(),
            responses: vec![ResponseTypeMetadata {
                status: 200,
                type_name: Some("demo.Model".to_string()),
            }],
        }
    }

    fn ctx<'a>(path: &'a str, headers: &'a HeaderMap, endpoint: Option<&'a Endpoint>) -> RequestContext<'a> {
        RequestContext {
            method: "GET",
            path,
            headers,
            endpoint,
        }
    }

    #[test]
    fn test_use_mock_policy_bypasses_when_disabled() {
        let headers = HeaderMap::new();
        let endpoint = test_endpoint();

        let policy = UseMockPolicy::new(options_cell(false, &[]));
        let reason = policy.should_bypass(&ctx("/test", &headers, Some(&endpoint)));
        assert_eq!(reason.as_deref(), Some("Mocking disabled"));

        let policy = UseMockPolicy::new(options_cell(true, &[]));
        assert!(policy.should_bypass(&ctx("/test", &headers, Some(&endpoint))).is_none());
    }

    #[test]
    fn test_use_mock_policy_reacts_to_option_changes() {
        let cell = options_cell(true, &[]);
        let policy = UseMockPolicy::new(cell.clone());
        let headers = HeaderMap::new();

        assert!(policy.should_bypass(&ctx("/test", &headers, None)).is_none());

        let mut next = (*cell.current()).clone();
        next.use_mock = false;
        cell.replace(next).unwrap();

        assert!(policy.should_bypass(&ctx("/test", &headers, None)).is_some());
    }

    #[test]
    fn test_exclude_path_case_insensitive_and_slash_tolerant() {
        let policy = ExcludePathPolicy::new(options_cell(true, &["/api"]));
        let headers = HeaderMap::new();

        assert!(policy.should_bypass(&ctx("/API/", &headers, None)).is_some());
        assert!(policy.should_bypass(&ctx("/api", &headers, None)).is_some());
        assert!(policy.should_bypass(&ctx("/api/sub", &headers, None)).is_some());
        assert!(policy.should_bypass(&ctx("/apiary", &headers, None)).is_none());
    }

    #[test]
    fn test_exclude_path_trailing_slash_in_config() {
        let policy = ExcludePathPolicy::new(options_cell(true, &["/swagger/"]));
        let headers = HeaderMap::new();

        assert!(policy.should_bypass(&ctx("/swagger", &headers, None)).is_some());
        assert!(policy.should_bypass(&ctx("/swagger/index.html", &headers, None)).is_some());
        assert!(policy.should_bypass(&ctx("/swaggerx", &headers, None)).is_none());
    }

    #[test]
    fn test_exclude_path_reason_names_the_path() {
        let policy = ExcludePathPolicy::new(options_cell(true, &["/health"]));
        let headers = HeaderMap::new();

        let reason = policy.should_bypass(&ctx("/health", &headers, None)).unwrap();
        assert_eq!(reason, "'/health' path is excluded");
    }

    #[test]
    fn test_exclude_path_empty_list_never_bypasses() {
        let policy = ExcludePathPolicy::new(options_cell(true, &[]));
        let headers = HeaderMap::new();
        assert!(policy.should_bypass(&ctx("/anything", &headers, None)).is_none());
    }

    #[test]
    fn test_endpoint_exists_policy() {
        let policy = EndpointExistsPolicy;
        let headers = HeaderMap::new();
        let endpoint = test_endpoint();

        let reason = policy.should_bypass(&ctx("/test", &headers, None));
        assert_eq!(reason.as_deref(), Some("No endpoint found"));

        assert!(policy.should_bypass(&ctx("/test", &headers, Some(&endpoint))).is_none());
    }
}
