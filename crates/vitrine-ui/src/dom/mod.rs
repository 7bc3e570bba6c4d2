//! Browser bindings that project core state into the page.
//!
//! # Design
//! - Optional elements are looked up lazily and their absence is a silent no-op.
//! - Deferred effects use one-shot `gloo` timers that are never cancelled.
//! - Page-lifetime listeners are forgotten rather than stored.

pub(crate) mod alerts;
pub(crate) mod product;
pub(crate) mod storage;
pub(crate) mod theme;

use gloo::events::EventListener;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::core::error::UiError;

impl From<UiError> for JsValue {
    fn from(err: UiError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Map a JS exception into a [`UiError`] tagged with the failing operation.
pub(crate) fn dom_err(operation: &'static str) -> impl FnOnce(JsValue) -> UiError {
    move |err| UiError::Dom {
        operation,
        detail: format!("{err:?}"),
    }
}

pub(crate) fn document() -> Result<Document, UiError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or(UiError::NoDocument)
}

/// Every element matching `selector`, in document order.
pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, UiError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(dom_err("querySelectorAll"))?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Set an inline style property; non-HTML elements are left untouched.
pub(crate) fn set_style(element: &Element, property: &str, value: &str) -> Result<(), UiError> {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return Ok(());
    };
    element
        .style()
        .set_property(property, value)
        .map_err(dom_err("style.setProperty"))
}

/// Log-and-continue wrapper for effects that run inside event callbacks.
pub(crate) fn log_failure(result: Result<(), UiError>) {
    if let Err(err) = result {
        debug!(error = %err, "dom update skipped");
    }
}

/// Run `ready` once the document has been parsed.
pub(crate) fn on_dom_ready<F>(document: &Document, ready: F)
where
    F: FnOnce(&Document) + 'static,
{
    if document.ready_state() == "loading" {
        let target = document.clone();
        EventListener::once(document, "DOMContentLoaded", move |_| ready(&target)).forget();
    } else {
        ready(document);
    }
}
