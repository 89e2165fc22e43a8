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

use crate::error::MockError;
use crate::policies::MockingPolicy;
use crate::provider::ProviderRegistry;
use crate::resolver::{MockReference, MockReferenceResolver, MockReferenceResult};
use crate::routing::{EndpointRegistry, RequestContext};
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use futures::future::LocalBoxFuture;
use std::future::ready;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};
use tracing::{debug, error, info, warn};

pub const MOCK_IDENTIFIER_HEADER: &str = "X-Mock-Identifier";
pub const MOCK_PROVIDER_HEADER: &str = "X-Mock-Provider";

/// The wired collaborators the middleware runs against. Assembled once by
/// the host and shared across workers.
pub struct MockResponseState {
    registry: EndpointRegistry,
    policies: Vec<Box<dyn MockingPolicy>>,
    resolver: MockReferenceResolver,
    providers: Arc<ProviderRegistry>,
}

impl MockResponseState {
    pub fn new(
        registry: EndpointRegistry,
        policies: Vec<Box<dyn MockingPolicy>>,
        resolver: MockReferenceResolver,
        providers: Arc<ProviderRegistry>,
    ) -> Self {
        Self {
            registry,
            policies,
            resolver,
            providers,
        }
    }
}

/// Middleware that intercepts requests and serves mock responses.
///
/// Per request: evaluate the bypass policies (first hit forwards the request
/// untouched), resolve a mock reference from headers and route metadata
/// (failures answer directly with the resolver's status and message), then
/// fetch the content through the registered provider. Provider and
/// configuration failures are translated to HTTP here and nowhere else.
pub struct MockResponse {
    state: Arc<MockResponseState>,
}

impl MockResponse {
    pub fn new(state: Arc<MockResponseState>) -> Self {
        Self { state }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MockResponse
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Transform = MockResponseService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MockResponseService {
            service: Rc::new(service),
            state: self.state.clone(),
        }))
    }
}

pub struct MockResponseService<S> {
    service: Rc<S>,
    state: Arc<MockResponseState>,
}

enum Decision {
    Bypass(String),
    Fail(MockReferenceResult),
    Serve(MockReference, u16),
}

impl<S, B> Service<ServiceRequest> for MockResponseService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let state = self.state.clone();

        Box::pin(async move {
            let request_id = uuid::Uuid::new_v4().to_string();

            let decision = {
                let endpoint = state.registry.find_match(req.method().as_str(), req.path());
                let ctx = RequestContext {
                    method: req.method().as_str(),
                    path: req.path(),
                    headers: req.headers(),
                    endpoint,
                };

                if let Some(reason) = state
                    .policies
                    .iter()
                    .find_map(|policy| policy.should_bypass(&ctx))
                {
                    Decision::Bypass(reason)
                } else {
                    let result = state.resolver.try_resolve(&ctx);
                    let status_code = result.status_code;
                    match result.reference {
                        Some(ref reference) => Decision::Serve(reference.clone(), status_code),
                        None => Decision::Fail(result),
                    }
                }
            };

            match decision {
                Decision::Bypass(reason) => {
                    debug!(request_id = %request_id, "{}, skipping mocking", reason);
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Decision::Fail(result) => {
                    let message = result.error_message.unwrap_or_default();
                    warn!(request_id = %request_id, "{}", message);
                    let response = plain_response(result.status_code, message);
                    Ok(req.into_response(response).map_into_right_body())
                }
                Decision::Serve(reference, status_code) => {
                    match fetch(&state, &reference).await {
                        Ok((content, provider_name)) => {
                            info!(
                                request_id = %request_id,
                                "Serving mock {} via {}", reference.key, provider_name
                            );
                            let response = mock_response(
                                status_code,
                                &reference.identifier,
                                &provider_name,
                                content,
                            );
                            Ok(req.into_response(response).map_into_right_body())
                        }
                        Err(err) => {
                            let (status_code, message) = translate_error(&err);
                            error!(request_id = %request_id, detail = %err, "{}", message);
                            let response = plain_response(status_code, message);
                            Ok(req.into_response(response).map_into_right_body())
                        }
                    }
                }
            }
        })
    }
}

async fn fetch(
    state: &MockResponseState,
    reference: &MockReference,
) -> Result<(String, String), MockError> {
    let provider = state.providers.factory()?.create()?;
    provider.get_response(&reference.identifier).await
}

/// Single error-to-HTTP translation point. Backend and configuration detail
/// stays in the logs; only the unexpected case echoes the raw error text.
fn translate_error(err: &MockError) -> (u16, String) {
    match err {
        MockError::ContentNotFound(_) => (404, "Mock file was not found.".to_string()),
        MockError::Configuration(_) => (
            500,
            "An application configuration error occurred. See logs for more details.".to_string(),
        ),
        MockError::InvalidOptions(_) => (
            500,
            "Application configuration is missing or invalid. See logs for more details."
                .to_string(),
        ),
        MockError::Unexpected(e) => (500, format!("An unhandled error occurred. - {}", e)),
    }
}

fn plain_response(status_code: u16, body: String) -> HttpResponse {
    HttpResponse::build(
        StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .insert_header((header::CONTENT_TYPE, "text/plain"))
    .body(body)
}

fn mock_response(
    status_code: u16,
    identifier: &str,
    provider_name: &str,
    body: String,
) -> HttpResponse {
    HttpResponse::build(
        StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .insert_header((MOCK_IDENTIFIER_HEADER, identifier))
    .insert_header((MOCK_PROVIDER_HEADER, provider_name))
    .insert_header((header::CONTENT_TYPE, "application/json"))
    .body(body)
}
