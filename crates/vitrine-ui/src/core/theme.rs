//! Theme registry, switcher options, and the switcher state itself.
//!
//! # Design
//! - [`ThemeSwitcher`] is the single source of truth for the active theme name.
//! - Page projections (marker class, selector control, status alert) go through
//!   [`ThemeSurface`] so the switcher runs without a browser.
//! - Listeners are snapshotted before they run, so a listener may call back into
//!   the switcher or register more listeners.

use std::rc::Rc;

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::core::error::ThemeError;
use crate::core::storage::PreferenceStore;

/// Storage key used when the options do not name one.
pub const DEFAULT_STORAGE_KEY: &str = "site-theme";
/// Registry used when the options do not provide a usable one.
pub const DEFAULT_THEMES: [&str; 2] = ["light", "dark"];
/// Fallback theme when nothing valid is persisted.
pub const DEFAULT_THEME: &str = "light";
/// Prefix of the marker class applied to the target element.
pub const THEME_CLASS_PREFIX: &str = "theme-";
/// Attribute set on the document root once the first theme is applied.
pub const READY_ATTRIBUTE: &str = "data-theme-ready";
/// Element id of the optional `<select>` control.
pub const SELECTOR_ID: &str = "theme-select";
/// Element id of the optional status alert.
pub const STATUS_ALERT_ID: &str = "themeAlert";
/// Element id of the status alert's message slot.
pub const STATUS_MESSAGE_ID: &str = "themeAlertMessage";

/// Callback invoked with the new theme name after every successful change.
pub type ThemeListener = Rc<dyn Fn(&str)>;

/// CSS marker class for a theme name.
#[must_use]
pub fn theme_class(name: &str) -> String {
    format!("{THEME_CLASS_PREFIX}{name}")
}

/// Selector label for a theme name (`"dark"` becomes `"Dark"`).
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Status alert text shown after the theme changed `count` times.
#[must_use]
pub fn change_count_message(count: u64) -> String {
    format!("Temaet er blevet skiftet {count} gange")
}

/// Options accepted by the switcher initializer.
///
/// Fields of the wrong shape are treated as absent, so a sloppy options object
/// degrades to the defaults instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeOptions {
    /// Storage key for the persisted theme.
    #[serde(deserialize_with = "lenient")]
    pub key: Option<String>,
    /// Allowed theme names, in selector order.
    #[serde(deserialize_with = "lenient")]
    pub themes: Option<Vec<String>>,
    /// Theme used when nothing valid is persisted.
    #[serde(deserialize_with = "lenient")]
    pub default_theme: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl ThemeOptions {
    /// Options with an explicit registry and default theme.
    #[must_use]
    pub fn with_themes<I, S>(themes: I, default_theme: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: None,
            themes: Some(themes.into_iter().map(Into::into).collect()),
            default_theme: Some(default_theme.to_string()),
        }
    }

    /// Decode options from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidOptions`] when the payload is not valid JSON
    /// or not an object.
    pub fn from_json(raw: &str) -> Result<Self, ThemeError> {
        serde_json::from_str(raw).map_err(|err| ThemeError::InvalidOptions {
            detail: err.to_string(),
        })
    }

    /// Normalise the options into a usable configuration.
    #[must_use]
    pub fn resolve(&self) -> ThemeConfig {
        let key = self
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .unwrap_or(DEFAULT_STORAGE_KEY)
            .to_string();
        let registry = self
            .themes
            .as_ref()
            .map_or_else(ThemeRegistry::default, |names| ThemeRegistry::new(names));
        let requested = self
            .default_theme
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_THEME);
        let default_theme = if registry.contains(requested) {
            requested.to_string()
        } else {
            warn!(
                theme = requested,
                fallback = registry.first(),
                "default theme is not registered"
            );
            registry.first().to_string()
        };
        ThemeConfig {
            key,
            registry,
            default_theme,
        }
    }
}

/// Resolved switcher configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Storage key for the persisted theme.
    pub key: String,
    /// Allowed theme names.
    pub registry: ThemeRegistry,
    /// Fallback theme, always a registry member.
    pub default_theme: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeOptions::default().resolve()
    }
}

/// Ordered, non-empty set of allowed theme names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeRegistry {
    names: Vec<String>,
}

impl ThemeRegistry {
    /// Build a registry, dropping names that cannot be class tokens and repeats.
    /// Falls back to [`DEFAULT_THEMES`] when nothing usable remains.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                debug!(theme = name, "skipping theme name that is not a class token");
                continue;
            }
            if !cleaned.iter().any(|known| known == name) {
                cleaned.push(name.to_string());
            }
        }
        if cleaned.is_empty() {
            return Self::default();
        }
        Self { names: cleaned }
    }

    /// Registered names in configuration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    /// First registered name.
    #[must_use]
    pub fn first(&self) -> &str {
        self.names.first().map_or(DEFAULT_THEME, String::as_str)
    }

    /// Marker classes for every registered theme.
    pub fn classes(&self) -> impl Iterator<Item = String> + '_ {
        self.names.iter().map(|name| theme_class(name))
    }

    /// Entries for the selector control.
    #[must_use]
    pub fn choices(&self) -> Vec<ThemeChoice> {
        self.names
            .iter()
            .map(|name| ThemeChoice {
                value: name.clone(),
                label: capitalize(name),
            })
            .collect()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self {
            names: DEFAULT_THEMES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// One `<option>` of the selector control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeChoice {
    /// Option value (the theme name).
    pub value: String,
    /// Visible label.
    pub label: String,
}

/// Page projections driven by the switcher.
///
/// Implementations treat missing optional elements as no-ops.
pub trait ThemeSurface {
    /// Add a class to the target element.
    fn add_class(&mut self, class: &str);
    /// Remove a class from the target element.
    fn remove_class(&mut self, class: &str);
    /// Flag the document root as themed.
    fn mark_ready(&mut self);
    /// Replace the selector's options and select `current`.
    /// Returns `false` when the page has no selector.
    fn fill_selector(&mut self, choices: &[ThemeChoice], current: &str) -> bool;
    /// Show `theme` as the selector's value.
    fn sync_selector(&mut self, theme: &str);
    /// Reveal the status alert with the new change count.
    fn announce_change(&mut self, count: u64);
}

/// Outcome of a successful theme change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeChange {
    /// Theme now active.
    pub theme: String,
    /// Theme active before the call.
    pub previous: String,
    /// Whether the call changed the active theme.
    pub changed: bool,
    /// Change counter after the call.
    pub change_count: u64,
}

/// Invoke every listener with `theme`, in order.
pub fn notify(listeners: &[ThemeListener], theme: &str) {
    for listener in listeners {
        listener(theme);
    }
}

/// Active theme state plus its projections.
pub struct ThemeSwitcher<S, P> {
    config: ThemeConfig,
    current: String,
    change_count: u64,
    listeners: Vec<ThemeListener>,
    selector_present: bool,
    surface: S,
    store: P,
}

impl<S, P> std::fmt::Debug for ThemeSwitcher<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSwitcher")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("change_count", &self.change_count)
            .field("listeners", &self.listeners.len())
            .field("selector_present", &self.selector_present)
            .finish_non_exhaustive()
    }
}

impl<S: ThemeSurface, P: PreferenceStore> ThemeSwitcher<S, P> {
    /// Build a switcher and apply the initial theme.
    pub fn new(surface: S, store: P, options: &ThemeOptions) -> Self {
        let config = ThemeConfig::default();
        let mut switcher = Self {
            current: config.default_theme.clone(),
            config,
            change_count: 0,
            listeners: Vec::new(),
            selector_present: false,
            surface,
            store,
        };
        switcher.initialize(options);
        switcher
    }

    /// Re-derive the configuration and active theme from `options`.
    ///
    /// The change counter and registered listeners survive re-initialisation.
    pub fn initialize(&mut self, options: &ThemeOptions) -> &mut Self {
        let config = options.resolve();
        self.detach();

        let restored = match self.store.read(&config.key) {
            Ok(Some(saved)) if config.registry.contains(&saved) => Some(saved),
            Ok(Some(saved)) => {
                debug!(theme = %saved, "ignoring persisted theme outside the registry");
                None
            }
            Ok(None) => None,
            Err(err) => {
                debug!(error = %err, "theme preference unavailable");
                None
            }
        };
        self.current = restored.unwrap_or_else(|| config.default_theme.clone());
        self.config = config;

        let current = self.current.clone();
        self.apply_class(&current);
        self.selector_present = self
            .surface
            .fill_selector(&self.config.registry.choices(), &current);
        self.surface.mark_ready();
        debug!(theme = %current, key = %self.config.key, "theme switcher initialised");
        self
    }

    /// Change the active theme and project it, without running listeners.
    ///
    /// Use [`ThemeSwitcher::listeners`] and [`notify`] afterwards when the
    /// switcher sits behind a borrow that listeners may need.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] when `name` is not registered; no
    /// state changes in that case.
    pub fn apply_theme(&mut self, name: &str) -> Result<ThemeChange, ThemeError> {
        if !self.config.registry.contains(name) {
            warn!(theme = name, "unknown theme requested");
            return Err(ThemeError::UnknownTheme {
                name: name.to_string(),
            });
        }

        let changed = self.current != name;
        if changed {
            self.change_count += 1;
            self.surface.announce_change(self.change_count);
        }
        let previous = std::mem::replace(&mut self.current, name.to_string());
        self.apply_class(name);

        if let Err(err) = self.store.write(&self.config.key, name) {
            debug!(error = %err, "theme preference not persisted");
        }
        self.surface.sync_selector(name);

        Ok(ThemeChange {
            theme: name.to_string(),
            previous,
            changed,
            change_count: self.change_count,
        })
    }

    /// Change the active theme, project it, and notify listeners.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] when `name` is not registered.
    pub fn set_theme(&mut self, name: &str) -> Result<ThemeChange, ThemeError> {
        let change = self.apply_theme(name)?;
        let listeners = self.listeners();
        notify(&listeners, &change.theme);
        Ok(change)
    }

    /// Register a change listener. Duplicates are kept.
    pub fn on_change(&mut self, listener: ThemeListener) {
        self.listeners.push(listener);
    }

    /// Snapshot of the registered listeners.
    #[must_use]
    pub fn listeners(&self) -> Vec<ThemeListener> {
        self.listeners.clone()
    }

    /// Remove every registered marker class from the target.
    pub fn detach(&mut self) {
        for class in self.config.registry.classes() {
            self.surface.remove_class(&class);
        }
    }

    fn apply_class(&mut self, theme: &str) {
        self.detach();
        self.surface.add_class(&theme_class(theme));
    }

    /// Active theme name.
    #[must_use]
    pub fn theme(&self) -> &str {
        &self.current
    }

    /// Number of calls that actually changed the theme.
    #[must_use]
    pub const fn change_count(&self) -> u64 {
        self.change_count
    }

    /// Resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Whether the last initialisation found a selector control.
    #[must_use]
    pub const fn has_selector(&self) -> bool {
        self.selector_present
    }

    /// Projection target.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable projection target, e.g. to retarget before re-initialising.
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Preference backend.
    #[must_use]
    pub const fn store(&self) -> &P {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use crate::core::testing::RecordingSurface;
    use std::cell::RefCell;

    fn switcher(
        store: MemoryStore,
        options: &ThemeOptions,
    ) -> ThemeSwitcher<RecordingSurface, MemoryStore> {
        ThemeSwitcher::new(RecordingSurface::new(), store, options)
    }

    #[test]
    fn capitalize_handles_edge_cases() {
        assert_eq!(capitalize("dark"), "Dark");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("ølstue"), "Ølstue");
    }

    #[test]
    fn options_fall_back_to_defaults() {
        let config = ThemeOptions::default().resolve();
        assert_eq!(config.key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.registry.names(), ["light", "dark"]);
        assert_eq!(config.default_theme, "light");
    }

    #[test]
    fn options_tolerate_wrong_shapes() -> Result<(), ThemeError> {
        let options = ThemeOptions::from_json(r#"{"key":"","themes":"dark","defaultTheme":7}"#)?;
        assert_eq!(options.key.as_deref(), Some(""));
        assert_eq!(options.themes, None);
        assert_eq!(options.default_theme, None);
        let config = options.resolve();
        assert_eq!(config.key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.registry.names(), ["light", "dark"]);
        assert_eq!(config.default_theme, "light");

        let options =
            ThemeOptions::from_json(r#"{"key":"k","themes":["a","b"],"defaultTheme":"b"}"#)?;
        let config = options.resolve();
        assert_eq!(config.key, "k");
        assert_eq!(config.registry.names(), ["a", "b"]);
        assert_eq!(config.default_theme, "b");
        Ok(())
    }

    #[test]
    fn options_reject_non_objects() {
        assert!(matches!(
            ThemeOptions::from_json(r#""dark""#),
            Err(ThemeError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn unregistered_default_falls_back_to_first_theme() {
        let config = ThemeOptions::with_themes(["dark", "retro"], "light").resolve();
        assert_eq!(config.default_theme, "dark");
    }

    #[test]
    fn registry_drops_unusable_names() {
        let registry = ThemeRegistry::new(["dark", "", "dark", "high contrast", "retro"]);
        assert_eq!(registry.names(), ["dark", "retro"]);
        assert_eq!(ThemeRegistry::new(Vec::<String>::new()), ThemeRegistry::default());
    }

    #[test]
    fn initialize_restores_valid_persisted_theme() {
        let switcher = switcher(
            MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "dark"),
            &ThemeOptions::default(),
        );
        assert_eq!(switcher.theme(), "dark");
        assert!(switcher.surface().has_class("theme-dark"));
        assert!(switcher.surface().is_ready());
    }

    #[test]
    fn initialize_ignores_unknown_persisted_theme() {
        let switcher = switcher(
            MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "sepia"),
            &ThemeOptions::default(),
        );
        assert_eq!(switcher.theme(), "light");
    }

    #[test]
    fn initialize_survives_unavailable_storage() {
        let mut switcher = switcher(MemoryStore::unavailable(), &ThemeOptions::default());
        assert_eq!(switcher.theme(), "light");
        assert!(switcher.set_theme("dark").is_ok());
        assert_eq!(switcher.theme(), "dark");
    }

    #[test]
    fn unknown_theme_is_rejected_without_mutation() {
        let mut switcher = switcher(MemoryStore::new(), &ThemeOptions::default());
        let err = switcher.set_theme("sepia");
        assert_eq!(
            err,
            Err(ThemeError::UnknownTheme {
                name: "sepia".to_string()
            })
        );
        assert_eq!(switcher.theme(), "light");
        assert_eq!(switcher.change_count(), 0);
        assert_eq!(switcher.store().get(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn change_counter_ignores_reapplying_the_same_theme() -> Result<(), ThemeError> {
        let mut switcher = switcher(MemoryStore::new(), &ThemeOptions::default());
        let sequence = ["dark", "dark", "light", "light", "dark"];
        for name in sequence {
            switcher.set_theme(name)?;
        }
        assert_eq!(switcher.theme(), "dark");
        assert_eq!(switcher.change_count(), 3);
        assert_eq!(switcher.surface().announcements(), [1, 2, 3]);
        Ok(())
    }

    #[test]
    fn selector_is_filled_and_kept_in_sync() -> Result<(), ThemeError> {
        let mut switcher = ThemeSwitcher::new(
            RecordingSurface::with_selector(),
            MemoryStore::new(),
            &ThemeOptions::with_themes(["light", "dark", "retro"], "light"),
        );
        assert!(switcher.has_selector());
        let labels: Vec<&str> = switcher
            .surface()
            .selector_choices()
            .iter()
            .map(|choice| choice.label.as_str())
            .collect();
        assert_eq!(labels, ["Light", "Dark", "Retro"]);
        assert_eq!(switcher.surface().selected(), Some("light"));

        switcher.set_theme("retro")?;
        assert_eq!(switcher.surface().selected(), Some("retro"));
        Ok(())
    }

    #[test]
    fn listeners_may_reenter_through_a_shared_handle() -> Result<(), ThemeError> {
        let shared = Rc::new(RefCell::new(switcher(
            MemoryStore::new(),
            &ThemeOptions::default(),
        )));
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let shared_ref = Rc::clone(&shared);
            let seen = Rc::clone(&seen);
            shared.borrow_mut().on_change(Rc::new(move |theme: &str| {
                seen.borrow_mut()
                    .push((theme.to_string(), shared_ref.borrow().change_count()));
            }));
        }

        let (change, listeners) = {
            let mut switcher = shared.borrow_mut();
            let change = switcher.apply_theme("dark")?;
            (change, switcher.listeners())
        };
        notify(&listeners, &change.theme);

        assert_eq!(seen.borrow().as_slice(), [("dark".to_string(), 1)]);
        Ok(())
    }

    #[test]
    fn reinitialize_strips_classes_of_the_previous_registry() -> Result<(), ThemeError> {
        let mut switcher = switcher(MemoryStore::new(), &ThemeOptions::default());
        switcher.set_theme("dark")?;
        switcher.initialize(&ThemeOptions::with_themes(["retro", "paper"], "paper"));
        assert_eq!(switcher.theme(), "paper");
        assert_eq!(switcher.surface().classes(), ["theme-paper"]);
        assert_eq!(switcher.change_count(), 1);
        Ok(())
    }
}
