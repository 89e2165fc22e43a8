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

use thiserror::Error;

/// Failures raised by the provider and configuration layers.
///
/// Resolver and policy outcomes are plain values and never use this type;
/// the middleware is the only place these errors are turned into HTTP
/// responses.
#[derive(Debug, Error)]
pub enum MockError {
    /// The resolved identifier does not exist in the backing store.
    #[error("{0}")]
    ContentNotFound(String),

    /// A configuration section is missing, a provider is misregistered, or a
    /// backend is unreachable. Indicates a deployment defect.
    #[error("{0}")]
    Configuration(String),

    /// Provider options failed to bind or did not pass structural validation.
    #[error("{0}")]
    InvalidOptions(String),

    /// Anything else.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_passes_message_through() {
        let err = MockError::ContentNotFound("Unable to locate [mocks/x.json]".to_string());
        assert_eq!(err.to_string(), "Unable to locate [mocks/x.json]");

        let err = MockError::Configuration("Missing section".to_string());
        assert_eq!(err.to_string(), "Missing section");
    }

    #[test]
    fn test_unexpected_wraps_anyhow() {
        let err = MockError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.to_string(), "boom");
    }
}
