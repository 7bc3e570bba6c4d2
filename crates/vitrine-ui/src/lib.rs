#![cfg_attr(not(target_arch = "wasm32"), forbid(unsafe_code))]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Vitrine page helpers: theme switcher, alert banners, and the product card demo.
//!
//! The `core` module holds DOM-free state and runs on every target. Browser
//! bindings live behind `target_arch = "wasm32"`.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod telemetry;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
#[cfg(target_arch = "wasm32")]
pub use dom::theme::StyleSwitcherHandle;

pub use crate::core::alerts::{AlertRecord, Severity};
pub use crate::core::error::{StorageError, ThemeError, UiError};
pub use crate::core::selection::{OptionGroup, ProductSelections, SelectionGroup};
pub use crate::core::storage::{MemoryStore, PreferenceStore};
pub use crate::core::theme::{ThemeChange, ThemeOptions, ThemeSurface, ThemeSwitcher};

#[cfg(test)]
mod tests {
    use crate::core::alerts::Severity;
    use crate::core::selection::OptionGroup;
    use crate::core::theme::theme_class;

    #[test]
    fn css_contract_names_are_stable() {
        assert_eq!(theme_class("dark"), "theme-dark");
        let severity_classes: Vec<String> =
            Severity::ALL.iter().map(|severity| severity.css_class()).collect();
        assert_eq!(
            severity_classes,
            ["alert-info", "alert-success", "alert-warning", "alert-error"]
        );
        assert_eq!(OptionGroup::Size.class(), "size-selector");
    }
}
