//! DOM projection of the theme switcher and its JS-facing handle.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlOptionElement, HtmlSelectElement};

use crate::core::error::UiError;
use crate::core::theme::{
    READY_ATTRIBUTE, SELECTOR_ID, STATUS_ALERT_ID, STATUS_MESSAGE_ID, ThemeChoice, ThemeListener,
    ThemeOptions, ThemeSurface, ThemeSwitcher, change_count_message, notify,
};
use crate::dom::storage::LocalPreferenceStore;
use crate::dom::{document, dom_err, log_failure, set_style};

type DomSwitcher = ThemeSwitcher<DomThemeSurface, LocalPreferenceStore>;

/// Marker classes go on `target`; everything else is looked up by id.
pub(crate) struct DomThemeSurface {
    target: Element,
}

impl DomThemeSurface {
    pub(crate) const fn new(target: Element) -> Self {
        Self { target }
    }

    pub(crate) fn retarget(&mut self, target: Element) {
        self.target = target;
    }
}

fn selector_element() -> Option<HtmlSelectElement> {
    document()
        .ok()?
        .get_element_by_id(SELECTOR_ID)?
        .dyn_into::<HtmlSelectElement>()
        .ok()
}

fn fill_options(select: &HtmlSelectElement, choices: &[ThemeChoice]) -> Result<(), UiError> {
    select.set_length(0);
    for choice in choices {
        let option = HtmlOptionElement::new_with_text_and_value(&choice.label, &choice.value)
            .map_err(dom_err("new Option"))?;
        select
            .append_child(&option)
            .map_err(dom_err("appendChild"))?;
    }
    Ok(())
}

impl ThemeSurface for DomThemeSurface {
    fn add_class(&mut self, class: &str) {
        log_failure(
            self.target
                .class_list()
                .add_1(class)
                .map_err(dom_err("classList.add")),
        );
    }

    fn remove_class(&mut self, class: &str) {
        log_failure(
            self.target
                .class_list()
                .remove_1(class)
                .map_err(dom_err("classList.remove")),
        );
    }

    fn mark_ready(&mut self) {
        let Some(root) = document().ok().and_then(|doc| doc.document_element()) else {
            return;
        };
        log_failure(
            root.set_attribute(READY_ATTRIBUTE, "1")
                .map_err(dom_err("setAttribute")),
        );
    }

    fn fill_selector(&mut self, choices: &[ThemeChoice], current: &str) -> bool {
        let Some(select) = selector_element() else {
            return false;
        };
        log_failure(fill_options(&select, choices));
        select.set_value(current);
        true
    }

    fn sync_selector(&mut self, theme: &str) {
        if let Some(select) = selector_element() {
            select.set_value(theme);
        }
    }

    fn announce_change(&mut self, count: u64) {
        let Ok(doc) = document() else {
            return;
        };
        let (Some(alert), Some(message)) = (
            doc.get_element_by_id(STATUS_ALERT_ID),
            doc.get_element_by_id(STATUS_MESSAGE_ID),
        ) else {
            return;
        };
        message.set_text_content(Some(&change_count_message(count)));
        log_failure(set_style(&alert, "display", "block"));
        log_failure(set_style(&alert, "opacity", "1"));
    }
}

/// Resolve the JS options object into a target element and typed options.
fn read_options(options: &JsValue) -> Result<(Element, ThemeOptions), UiError> {
    let root = document()?
        .document_element()
        .ok_or(UiError::NoDocument)?;
    if options.is_undefined() || options.is_null() {
        return Ok((root, ThemeOptions::default()));
    }

    let target = js_sys::Reflect::get(options, &JsValue::from_str("target"))
        .ok()
        .and_then(|value| value.dyn_into::<Element>().ok())
        .unwrap_or(root);
    let parsed = js_sys::JSON::stringify(options)
        .ok()
        .and_then(|raw| raw.as_string())
        .map_or_else(
            || Ok(ThemeOptions::default()),
            |raw| ThemeOptions::from_json(&raw),
        )
        .unwrap_or_else(|err| {
            debug!(error = %err, "falling back to default theme options");
            ThemeOptions::default()
        });
    Ok((target, parsed))
}

fn set_theme_shared(switcher: &Rc<RefCell<DomSwitcher>>, name: &str) -> bool {
    let outcome = {
        let mut switcher = switcher.borrow_mut();
        switcher
            .apply_theme(name)
            .map(|change| (change, switcher.listeners()))
    };
    match outcome {
        Ok((change, listeners)) => {
            notify(&listeners, &change.theme);
            true
        }
        Err(_) => false,
    }
}

/// Theme switcher handle exposed to the host page.
#[wasm_bindgen(js_name = StyleSwitcher)]
#[derive(Clone)]
pub struct StyleSwitcherHandle {
    switcher: Rc<RefCell<DomSwitcher>>,
    selector_binding: Rc<RefCell<Option<EventListener>>>,
}

#[wasm_bindgen(js_class = StyleSwitcher)]
impl StyleSwitcherHandle {
    /// Build a switcher from an options object and apply the initial theme.
    ///
    /// # Errors
    ///
    /// Fails only when the page has no document.
    #[wasm_bindgen(js_name = initStyleSwitcher)]
    pub fn init_style_switcher(options: JsValue) -> Result<Self, JsValue> {
        let (target, options) = read_options(&options)?;
        let switcher = ThemeSwitcher::new(
            DomThemeSurface::new(target),
            LocalPreferenceStore,
            &options,
        );
        let handle = Self {
            switcher: Rc::new(RefCell::new(switcher)),
            selector_binding: Rc::new(RefCell::new(None)),
        };
        handle.bind_selector();
        Ok(handle)
    }

    /// Re-derive all state from a new options object. Returns the handle for chaining.
    ///
    /// # Errors
    ///
    /// Fails only when the page has no document.
    pub fn initialize(&self, options: JsValue) -> Result<Self, JsValue> {
        let (target, options) = read_options(&options)?;
        {
            let mut switcher = self.switcher.borrow_mut();
            switcher.detach();
            switcher.surface_mut().retarget(target);
            switcher.initialize(&options);
        }
        self.bind_selector();
        Ok(self.clone())
    }

    /// Switch to `name`. Returns `false` for unknown themes.
    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, name: &str) -> bool {
        set_theme_shared(&self.switcher, name)
    }

    /// Active theme name.
    #[wasm_bindgen(js_name = getTheme)]
    #[must_use]
    pub fn get_theme(&self) -> String {
        self.switcher.borrow().theme().to_string()
    }

    /// Register a change listener; anything that is not a function is ignored.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: JsValue) {
        let Ok(callback) = callback.dyn_into::<js_sys::Function>() else {
            debug!("ignoring non-callable theme listener");
            return;
        };
        let listener: ThemeListener = Rc::new(move |theme: &str| {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(theme)) {
                warn!(error = ?err, "theme listener threw");
            }
        });
        self.switcher.borrow_mut().on_change(listener);
    }

    fn bind_selector(&self) {
        let binding = if self.switcher.borrow().has_selector() {
            selector_element().map(|select| {
                let switcher = Rc::clone(&self.switcher);
                EventListener::new(&select, "change", move |event| {
                    let value = event
                        .target()
                        .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
                        .map(|select| select.value());
                    if let Some(value) = value {
                        set_theme_shared(&switcher, &value);
                    }
                })
            })
        } else {
            None
        };
        // Replacing the binding drops, and so detaches, the previous listener.
        *self.selector_binding.borrow_mut() = binding;
    }
}
