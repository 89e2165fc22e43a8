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
use crate::routing::RequestContext;

/// Filters the matched endpoint's declared response metadata by status code.
///
/// Entries without a declared type (the "unspecified result" marker) are
/// skipped. Declaration order is preserved and nothing is deduplicated.
/// Never fails: no matched endpoint or no qualifying entries yields an empty
/// list.
#[derive(Default)]
pub struct EndpointMetadataResolver;

impl EndpointMetadataResolver {
    pub fn get_metadata<'a>(
        &self,
        ctx: &RequestContext<'a>,
        status_code: u16,
    ) -> Vec<&'a ResponseTypeMetadata> {
        match ctx.endpoint {
            Some(endpoint) => endpoint
                .responses
                .iter()
                .filter(|meta| meta.status == status_code && meta.type_name.is_some())
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Endpoint;
    use actix_web::http::header::HeaderMap;

    fn endpoint_with(responses: Vec<ResponseTypeMetadata>) -> Endpoint {
        Endpoint {
            name: "Test".to_string(),
            method: "GET".to_string(),
            path: "/test".to_string(),
            responses,
        }
    }

    fn ctx<'a>(headers: &'a HeaderMap, endpoint: Option<&'a Endpoint>) -> RequestContext<'a> {
        RequestContext {
            method: "GET",
            path: "/test",
            headers,
            endpoint,
        }
    }

    #[test]
    fn test_filters_by_status_code() {
        let endpoint = endpoint_with(vec![
            ResponseTypeMetadata {
                status: 200,
                type_name: Some("demo.Ok".to_string()),
            },
            ResponseTypeMetadata {
                status: 404,
                type_name: Some("demo.Error".to_string()),
            },
        ]);
        let headers = HeaderMap::new();

        let resolver = EndpointMetadataResolver;
        let metadata = resolver.get_metadata(&ctx(&headers, Some(&endpoint)), 200);

        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].type_name.as_deref(), Some("demo.Ok"));
    }

    #[test]
    fn test_skips_unspecified_result_entries() {
        let endpoint = endpoint_with(vec![
            ResponseTypeMetadata {
                status: 200,
                type_name: None,
            },
            ResponseTypeMetadata {
                status: 200,
                type_name: Some("demo.Ok".to_string()),
            },
        ]);
        let headers = HeaderMap::new();

        let resolver = EndpointMetadataResolver;
        let metadata = resolver.get_metadata(&ctx(&headers, Some(&endpoint)), 200);

        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].type_name.as_deref(), Some("demo.Ok"));
    }

    #[test]
    fn test_no_endpoint_returns_empty() {
        let headers = HeaderMap::new();
        let resolver = EndpointMetadataResolver;
        assert!(resolver.get_metadata(&ctx(&headers, None), 200).is_empty());
    }

    #[test]
    fn test_keeps_declaration_order_without_dedup() {
        let endpoint = endpoint_with(vec![
            ResponseTypeMetadata {
                status: 200,
                type_name: Some("demo.First".to_string()),
            },
            ResponseTypeMetadata {
                status: 200,
                type_name: Some("demo.Second".to_string()),
            },
            ResponseTypeMetadata {
                status: 200,
                type_name: Some("demo.First".to_string()),
            },
        ]);
        let headers = HeaderMap::new();

        let resolver = EndpointMetadataResolver;
        let metadata = resolver.get_metadata(&ctx(&headers, Some(&endpoint)), 200);

        let names: Vec<_> = metadata.iter().map(|m| m.type_name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["demo.First", "demo.Second", "demo.First"]);
    }
}
