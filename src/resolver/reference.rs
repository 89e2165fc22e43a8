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

/// The resolved pair locating a stored mock payload: the content identifier
/// (file name, object key, ...) and the mapping key that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockReference {
    pub identifier: String,
    pub key: String,
}

impl MockReference {
    pub fn new(identifier: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            key: key.into(),
        }
    }
}

/// Outcome of a resolution attempt. Exactly one of `reference` or
/// `error_message` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockReferenceResult {
    pub reference: Option<MockReference>,
    pub status_code: u16,
    pub error_message: Option<String>,
}

impl MockReferenceResult {
    /// A successful lookup; the status code is the one requested through the
    /// `X-Mock-Status` header.
    pub fn found(reference: MockReference, status_code: u16) -> Self {
        Self {
            reference: Some(reference),
            status_code,
            error_message: None,
        }
    }

    /// A failed lookup with the HTTP status the middleware should answer
    /// with (400/404/501).
    pub fn not_found(error: impl Into<String>, status_code: u16) -> Self {
        Self {
            reference: None,
            status_code,
            error_message: Some(error.into()),
        }
    }

    pub fn was_found(&self) -> bool {
        self.reference.is_some()
    }
}
