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

use crate::config::LoggingConfig;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

/// Installs the global tracing subscriber from the logging config.
///
/// Safe to call more than once; a subscriber already set by a test harness
/// or an embedding application wins.
pub fn init_logging(config: &LoggingConfig) {
    use tracing::dispatcher::has_been_set;
    if has_been_set() {
        info!("A tracing subscriber is already set, skipping initialization");
        return;
    }

    let subscriber =
        Registry::default().with(tracing_subscriber::EnvFilter::new(&config.level));

    if config.format == "json" {
        let _ = subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .try_init();
    } else {
        let _ = subscriber.with(tracing_subscriber::fmt::layer()).try_init();
    }
}
