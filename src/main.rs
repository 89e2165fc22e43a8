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

use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use arc_swap::ArcSwap;
use clap::Parser;
use mockgate::config::{Config, ConfigLoader, ProviderConfig};
use mockgate::logging::init_logging;
use mockgate::middleware::{MockResponse, MockResponseState};
use mockgate::options::MockOptionsCell;
use mockgate::policies::{EndpointExistsPolicy, ExcludePathPolicy, MockingPolicy, UseMockPolicy};
use mockgate::provider::factory::{
    local_folder_store_factory, object_store_factory, MockProviderFactory,
};
use mockgate::provider::local_folder::LOCAL_FOLDER_STORE_NAME;
use mockgate::provider::object_store::OBJECT_STORE_NAME;
use mockgate::provider::ProviderRegistry;
use mockgate::resolver::{EndpointMetadataResolver, MockReferenceResolver, ResponseMappingResolver};
use mockgate::routing::EndpointRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/mockgate-config.yaml")]
    config: PathBuf,

    #[arg(long, default_value = "false")]
    hot_reload: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ConfigLoader::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    init_logging(&config.logging);

    let options = Arc::new(MockOptionsCell::new(config.mock.options.clone()));
    let provider_sections = Arc::new(ArcSwap::from_pointee(config.mock.provider.clone()));

    let providers = Arc::new(ProviderRegistry::new());
    providers.register(select_factory(&config, provider_sections.clone())?)?;

    let resolver = MockReferenceResolver::new(
        EndpointMetadataResolver,
        ResponseMappingResolver::new(&options)
            .context("Failed to initialize response mapping resolver")?,
    );

    let policies: Vec<Box<dyn MockingPolicy>> = vec![
        Box::new(UseMockPolicy::new(options.clone())),
        Box::new(ExcludePathPolicy::new(options.clone())),
        Box::new(EndpointExistsPolicy),
    ];

    let state = Arc::new(MockResponseState::new(
        EndpointRegistry::from_config(config.endpoints.clone()),
        policies,
        resolver,
        providers,
    ));

    if args.hot_reload {
        start_hot_reload(&args.config, options.clone(), provider_sections.clone())?;
    }

    let bind_address = (config.server.host.clone(), config.server.port);
    info!(
        "Mockgate listening on {}:{} ({} endpoints, provider '{}')",
        config.server.host,
        config.server.port,
        config.endpoints.len(),
        config.mock.provider.name
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(MockResponse::new(state.clone()))
            .default_service(web::to(downstream))
    })
    .workers(config.server.workers)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();
    tokio::select! {
        result = server => {
            result?;
            info!("Server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            server_handle.stop(true).await;
            info!("Server shutdown complete");
        }
    }

    Ok(())
}

/// Stands in for the live backend. Requests that the middleware bypasses
/// land here.
async fn downstream() -> HttpResponse {
    HttpResponse::NotFound().body("No live backend is configured for this route.")
}

fn select_factory(
    config: &Config,
    sections: Arc<ArcSwap<ProviderConfig>>,
) -> anyhow::Result<Arc<dyn MockProviderFactory>> {
    match config.mock.provider.name.as_str() {
        LOCAL_FOLDER_STORE_NAME => Ok(local_folder_store_factory(sections, None)),
        OBJECT_STORE_NAME => Ok(object_store_factory(sections, None)),
        other => anyhow::bail!("Unknown mock provider '{}'", other),
    }
}

#[cfg(feature = "hot-reload")]
fn start_hot_reload(
    config_path: &PathBuf,
    options: Arc<MockOptionsCell>,
    provider_sections: Arc<ArcSwap<ProviderConfig>>,
) -> anyhow::Result<()> {
    use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(tx, NotifyConfig::default())?;
    watcher.watch(config_path, RecursiveMode::NonRecursive)?;

    let config_path = config_path.clone();
    tokio::task::spawn_blocking(move || {
        // The watcher must stay alive for as long as we want events.
        let _watcher = watcher;
        while let Ok(event) = rx.recv() {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("Configuration watch error: {}", e);
                    continue;
                }
            };

            if !matches!(event.kind, notify::EventKind::Modify(_)) {
                continue;
            }

            info!("Configuration file modified, reloading...");
            match ConfigLoader::from_file(&config_path) {
                Ok(new_config) => {
                    match options.replace(new_config.mock.options) {
                        Ok(()) => {
                            provider_sections.store(Arc::new(new_config.mock.provider));
                            info!("Configuration reloaded successfully");
                        }
                        Err(e) => {
                            tracing::error!(
                                "Rejected configuration update, keeping previous options: {}",
                                e
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to reload configuration: {}", e);
                }
            }
        }
    });

    Ok(())
}

#[cfg(not(feature = "hot-reload"))]
fn start_hot_reload(
    _config_path: &PathBuf,
    _options: Arc<MockOptionsCell>,
    _provider_sections: Arc<ArcSwap<ProviderConfig>>,
) -> anyhow::Result<()> {
    info!("Hot reload feature is not enabled");
    Ok(())
}
