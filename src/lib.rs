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

//! Mockgate intercepts HTTP traffic and answers declared endpoints with
//! pre-recorded mock payloads instead of calling the live backend.
//!
//! The pipeline per request: bypass policies decide whether the request is
//! mocked at all, the resolver turns the `X-Mock-Status` and `X-Mock-Variant`
//! headers plus the endpoint's response metadata into a content identifier,
//! and the registered provider (local folder or object store) fetches the
//! payload.

pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod options;
pub mod policies;
pub mod provider;
pub mod resolver;
pub mod routing;

pub use error::MockError;
pub use middleware::{MockResponse, MockResponseState};
pub use options::MockOptionsCell;
