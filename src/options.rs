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

use crate::config::MockOptions;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};

type ChangeHandler = Box<dyn Fn(&MockOptions) -> anyhow::Result<()> + Send + Sync>;

/// Process-wide holder of the current [`MockOptions`] snapshot.
///
/// Readers always see a complete snapshot; [`replace`](Self::replace) first
/// runs every subscribed change handler against the candidate options and
/// only installs the snapshot if all of them accept it. A rejected update
/// leaves the previous snapshot in place.
pub struct MockOptionsCell {
    current: ArcSwap<MockOptions>,
    handlers: Mutex<Vec<ChangeHandler>>,
}

impl MockOptionsCell {
    pub fn new(initial: MockOptions) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Returns the current options snapshot.
    pub fn current(&self) -> Arc<MockOptions> {
        self.current.load_full()
    }

    /// Registers a change handler and immediately runs it against the current
    /// snapshot, so subscribers derive their initial state the same way they
    /// handle updates. Fails if the handler rejects the current snapshot.
    pub fn subscribe(&self, handler: ChangeHandler) -> anyhow::Result<()> {
        handler(&self.current.load())?;
        self.handlers
            .lock()
            .expect("options handler list poisoned")
            .push(handler);
        Ok(())
    }

    /// Replaces the options snapshot, notifying subscribers synchronously.
    /// If any handler rejects the candidate, the snapshot is not installed
    /// and the error is returned to the caller.
    pub fn replace(&self, next: MockOptions) -> anyhow::Result<()> {
        let handlers = self
            .handlers
            .lock()
            .expect("options handler list poisoned");
        for handler in handlers.iter() {
            handler(&next)?;
        }

        self.current.store(Arc::new(next));
        Ok(())
    }
}
