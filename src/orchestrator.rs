//! Orchestrator: one engine per discovered target
//!
//! The orchestrator is generic over the handle type so the same start /
//! pause / snapshot logic drives DOM-bound engines in the browser and
//! simulated engines in tests. Engines run independently; there is no
//! shared clock between them.

use std::fmt::Display;

use crate::config::ConfigDocument;
use crate::models::{EngineSnapshot, TargetConfig};

/// Control surface of one constructed engine
pub trait EngineHandle {
    fn start(&mut self);
    fn pause(&mut self);
    /// Detach from every signal; must be safe to call repeatedly
    fn disconnect(&mut self);
    fn snapshot(&self) -> EngineSnapshot;
}

pub struct Orchestrator<H> {
    instances: Vec<H>,
    reduced_motion: bool,
}

impl<H: EngineHandle> Orchestrator<H> {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            instances: Vec::new(),
            reduced_motion,
        }
    }

    /// Build one engine per `(key, element)` pair, looking each key up in
    /// `document`. A target that fails to build is logged and skipped.
    /// Returns how many engines were added.
    pub fn setup<E, I, F, BuildErr>(&mut self, document: &ConfigDocument, elements: I, mut build: F) -> usize
    where
        I: IntoIterator<Item = (String, E)>,
        F: FnMut(&str, TargetConfig, E) -> Result<H, BuildErr>,
        BuildErr: Display,
    {
        let before = self.instances.len();
        for (key, element) in elements {
            if !document.contains(&key) {
                log::debug!("no config for target '{}', using defaults", key);
            }
            match build(&key, document.target(&key), element) {
                Ok(handle) => self.instances.push(handle),
                Err(err) => log::warn!("failed to bind target '{}': {}", key, err),
            }
        }
        let added = self.instances.len() - before;
        log::info!("bound {} typewriter target(s)", added);
        added
    }

    pub fn start_all(&mut self) {
        if self.reduced_motion {
            return;
        }
        for instance in &mut self.instances {
            instance.start();
        }
    }

    pub fn pause_all(&mut self) {
        for instance in &mut self.instances {
            instance.pause();
        }
    }

    /// Disconnect and drop every engine
    pub fn disconnect_all(&mut self) {
        for instance in &mut self.instances {
            instance.disconnect();
        }
        self.instances.clear();
    }

    pub fn state(&self) -> Vec<EngineSnapshot> {
        self.instances.iter().map(EngineHandle::snapshot).collect()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
