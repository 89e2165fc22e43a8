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

pub mod mapping;
pub mod metadata;
pub mod reference;

pub use mapping::ResponseMappingResolver;
pub use metadata::EndpointMetadataResolver;
pub use reference::{MockReference, MockReferenceResult};

use crate::routing::RequestContext;
use actix_web::http::header::HeaderMap;

pub const MOCK_STATUS_HEADER: &str = "x-mock-status";
pub const MOCK_VARIANT_HEADER: &str = "x-mock-variant";

/// Orchestrates header parsing, endpoint metadata lookup and response
/// mapping lookup into a single pass/fail decision.
///
/// The decision tree, in order:
/// 1. `X-Mock-Status` absent or empty -> 400
/// 2. `X-Mock-Status` not an integer -> 400
/// 3. no declared metadata for that status -> 501
/// 4. mapping hit -> found, answering with the requested status
/// 5. no mapping for status (and variant, when given) -> 404
///
/// Steps short-circuit strictly in this order; ties in step 4 go to the
/// first metadata entry in declaration order.
pub struct MockReferenceResolver {
    metadata_resolver: EndpointMetadataResolver,
    mapping_resolver: ResponseMappingResolver,
}

impl MockReferenceResolver {
    pub fn new(
        metadata_resolver: EndpointMetadataResolver,
        mapping_resolver: ResponseMappingResolver,
    ) -> Self {
        Self {
            metadata_resolver,
            mapping_resolver,
        }
    }

    pub fn try_resolve(&self, ctx: &RequestContext<'_>) -> MockReferenceResult {
        let endpoint_name = ctx.endpoint_name();
        let variant = header_value(ctx.headers, MOCK_VARIANT_HEADER);

        let mock_status = header_value(ctx.headers, MOCK_STATUS_HEADER);
        let mock_status = match mock_status {
            Some(value) if !value.is_empty() => value,
            _ => {
                return MockReferenceResult::not_found(
                    "Missing required 'X-Mock-Status' header.",
                    400,
                );
            }
        };

        let status_code: u16 = match mock_status.parse() {
            Ok(code) => code,
            Err(_) => {
                return MockReferenceResult::not_found(
                    format!("'{}' is not a valid StatusCode.", mock_status),
                    400,
                );
            }
        };

        let metadata = self.metadata_resolver.get_metadata(ctx, status_code);
        if metadata.is_empty() {
            return MockReferenceResult::not_found(
                format!(
                    "No [{}] status code metadata was found for endpoint [{}]",
                    status_code, endpoint_name
                ),
                501,
            );
        }

        if let Some(reference) = self.mapping_resolver.try_resolve(&metadata, variant) {
            return MockReferenceResult::found(reference, status_code);
        }

        let mut error_message = format!(
            "No [{}] status code mapping was found for endpoint [{}]",
            status_code, endpoint_name
        );
        if let Some(variant) = variant.filter(|v| !v.trim().is_empty()) {
            error_message = format!("{} and variant [{}]", error_message, variant);
        }

        MockReferenceResult::not_found(error_message, 404)
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
