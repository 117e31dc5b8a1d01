#![doc(test(attr(deny(warnings))))]

//! Image Wizard drives the guided "Create a new image" flow: release,
//! target environment, registration, and review, ending in an image request
//! handed to a submission collaborator.

pub mod cli;
pub mod config;
pub mod errors;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Image wizard tracing initialized.");
    });
}
