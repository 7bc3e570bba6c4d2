//! Alert banners: dismiss wiring, synthesis, and the random-alert trigger.

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, warn};
use web_sys::{Document, Element};

use crate::core::alerts::{
    ALERT_CLASS, AlertRecord, CLOSE_CLASS, CLOSE_GLYPH, CONTAINER_SELECTOR, DISMISS_DELAY_MS,
    DismissMode, FADE_IN_DELAY_MS, SHOW_ALERT_ID, random_alert,
};
use crate::core::error::UiError;
use crate::dom::{dom_err, log_failure, query_all, set_style};

/// Wire every dismiss control already in the page plus the random-alert trigger.
pub(crate) fn attach(document: &Document) -> Result<(), UiError> {
    for button in query_all(document, &format!(".{CLOSE_CLASS}"))? {
        wire_close(&button, DismissMode::AUTHORED);
    }

    if let Some(trigger) = document.get_element_by_id(SHOW_ALERT_ID) {
        let document = document.clone();
        let mut rng = SmallRng::seed_from_u64(entropy_seed());
        EventListener::new(&trigger, "click", move |_| {
            let record = random_alert(&mut rng);
            if let Err(err) = show_alert(&document, &record) {
                warn!(error = %err, "failed to show alert");
            }
        })
        .forget();
    }
    Ok(())
}

fn entropy_seed() -> u64 {
    js_sys::Date::now().to_bits() ^ js_sys::Math::random().to_bits()
}

fn wire_close(button: &Element, mode: DismissMode) {
    let control = button.clone();
    EventListener::new(button, "click", move |_| {
        match control.closest(&format!(".{ALERT_CLASS}")) {
            Ok(Some(alert)) => dismiss(&alert, mode),
            Ok(None) => debug!("dismiss control outside an alert"),
            Err(err) => debug!(error = ?err, "closest() failed"),
        }
    })
    .forget();
}

/// Fade the alert out, then hide or remove it once the transition had time to play.
fn dismiss(alert: &Element, mode: DismissMode) {
    log_failure(set_style(alert, "opacity", "0"));
    let alert = alert.clone();
    Timeout::new(DISMISS_DELAY_MS, move || match mode {
        DismissMode::Hide => log_failure(set_style(&alert, "display", "none")),
        DismissMode::Remove => alert.remove(),
    })
    .forget();
}

/// Insert a new banner at the top of the demo container and fade it in.
pub(crate) fn show_alert(document: &Document, record: &AlertRecord) -> Result<(), UiError> {
    let Some(container) = document
        .query_selector(CONTAINER_SELECTOR)
        .map_err(dom_err("querySelector"))?
    else {
        debug!("alert container missing");
        return Ok(());
    };

    let alert = create(document, "div")?;
    alert.set_class_name(&record.class_name());

    let heading = create(document, "h3")?;
    heading.set_text_content(Some(&record.title));
    let body = create(document, "p")?;
    body.set_text_content(Some(&record.message));
    let close = create(document, "button")?;
    close.set_class_name(CLOSE_CLASS);
    close.set_text_content(Some(CLOSE_GLYPH));

    for child in [&heading, &body, &close] {
        alert.append_child(child).map_err(dom_err("appendChild"))?;
    }
    wire_close(&close, DismissMode::SYNTHESIZED);

    container
        .insert_before(&alert, container.first_child().as_ref())
        .map_err(dom_err("insertBefore"))?;

    let fading = alert.clone();
    Timeout::new(FADE_IN_DELAY_MS, move || {
        log_failure(set_style(&fading, "opacity", "1"));
    })
    .forget();

    debug!(severity = %record.severity, "alert shown");
    Ok(())
}

fn create(document: &Document, tag: &str) -> Result<Element, UiError> {
    document
        .create_element(tag)
        .map_err(dom_err("createElement"))
}
