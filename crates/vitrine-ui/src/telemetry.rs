//! Browser logging initialisation.
//!
//! # Design
//! - Routes `tracing` events to the devtools console through `tracing-wasm`.
//! - Installs the panic hook so Rust panics surface with a message.
//! - Safe to call more than once; only the first call has an effect.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the console subscriber and panic hook.
pub fn init_logging() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if let Err(err) = tracing_wasm::try_set_as_global_default() {
            tracing::debug!(error = %err, "keeping the subscriber installed by the host");
        }
    });
}
