//! Process-wide renderer.
//!
//! The current renderer is swapped as a whole under a lock. Handles returned
//! earlier keep the instance they were given alive.

use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;

use crate::EventRenderer;

lazy_static! {
    static ref CURRENT: RwLock<Arc<EventRenderer>> =
        RwLock::new(Arc::new(EventRenderer::new(false)));
}

/// The process-wide renderer. Created disabled on first use.
pub fn get_current_renderer() -> Arc<EventRenderer> {
    match CURRENT.read() {
        Ok(current) => Arc::clone(&current),
        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
    }
}

/// Replace the process-wide renderer with a fresh one (mode detection runs
/// again) and return it.
pub fn configure(enabled: bool) -> Arc<EventRenderer> {
    let renderer = Arc::new(EventRenderer::new(enabled));
    install(Arc::clone(&renderer));
    tracing::debug!(enabled, mode = ?renderer.mode(), "configured renderer");
    renderer
}

fn install(renderer: Arc<EventRenderer>) {
    match CURRENT.write() {
        Ok(mut current) => *current = renderer,
        Err(poisoned) => *poisoned.into_inner() = renderer,
    }
}
