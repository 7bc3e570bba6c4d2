//! Product card demo: exclusive option groups and the add-to-cart flash.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::core::error::UiError;
use crate::core::selection::{
    ACTIVE_CLASS, CART_BUTTON_SELECTOR, CONFIRM_BACKGROUND, CONFIRM_REVERT_MS, CartConfirmation,
    OptionGroup, SelectionGroup,
};
use crate::dom::{dom_err, log_failure, query_all};

pub(crate) fn attach(document: &Document) -> Result<(), UiError> {
    for group in OptionGroup::ALL {
        wire_group(document, group)?;
    }
    wire_cart_button(document)
}

fn wire_group(document: &Document, group: OptionGroup) -> Result<(), UiError> {
    let options = Rc::new(query_all(document, &group.selector())?);
    let state = Rc::new(RefCell::new(SelectionGroup::new(options.len())));

    for (index, option) in options.iter().enumerate() {
        let options = Rc::clone(&options);
        let state = Rc::clone(&state);
        EventListener::new(option, "click", move |_| {
            let selected = state.borrow_mut().select(index);
            if selected {
                render_group(&options, &state.borrow());
            }
        })
        .forget();
    }
    debug!(group = group.class(), options = options.len(), "option group wired");
    Ok(())
}

fn render_group(options: &[Element], group: &SelectionGroup) {
    for (index, option) in options.iter().enumerate() {
        let classes = option.class_list();
        let result = if group.is_active(index) {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
        log_failure(result.map_err(dom_err("classList")));
    }
}

fn wire_cart_button(document: &Document) -> Result<(), UiError> {
    let Some(button) = document
        .query_selector(CART_BUTTON_SELECTOR)
        .map_err(dom_err("querySelector"))?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(());
    };

    let target = button.clone();
    EventListener::new(&button, "click", move |_| {
        let confirmation = CartConfirmation::capture(target.text_content().unwrap_or_default());
        target.set_text_content(Some(confirmation.confirmed_label()));
        log_failure(
            target
                .style()
                .set_property("background-color", CONFIRM_BACKGROUND)
                .map_err(dom_err("style.setProperty")),
        );

        let target = target.clone();
        Timeout::new(CONFIRM_REVERT_MS, move || {
            target.set_text_content(Some(confirmation.original_label()));
            log_failure(
                target
                    .style()
                    .remove_property("background-color")
                    .map(|_| ())
                    .map_err(dom_err("style.removeProperty")),
            );
        })
        .forget();
    })
    .forget();
    Ok(())
}
