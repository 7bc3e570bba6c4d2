//! Page entry point: installs logging and attaches the self-contained controllers.

use tracing::{error, info};
use wasm_bindgen::prelude::*;

use crate::core::error::UiError;
use crate::dom::{self, alerts, product};
use crate::telemetry;

/// Attach the alert and product controllers once the DOM is ready.
///
/// The theme switcher is not started here; pages opt in through
/// `StyleSwitcher.initStyleSwitcher`.
#[wasm_bindgen(js_name = runApp)]
pub fn run_app() {
    telemetry::init_logging();
    if let Err(err) = start() {
        error!(error = %err, "page controllers not attached");
    }
}

fn start() -> Result<(), UiError> {
    let document = dom::document()?;
    dom::on_dom_ready(&document, |document| {
        if let Err(err) = alerts::attach(document) {
            error!(error = %err, "alert controller not attached");
        }
        if let Err(err) = product::attach(document) {
            error!(error = %err, "product controller not attached");
        }
        info!("page controllers attached");
    });
    Ok(())
}
