//! Alert banner model: severities, canned demo alerts, and dismissal timing.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::core::error::UiError;

/// Class shared by every alert banner.
pub const ALERT_CLASS: &str = "alert";
/// Class of the dismiss control inside an alert.
pub const CLOSE_CLASS: &str = "alert-close";
/// Container that receives synthesized alerts.
pub const CONTAINER_SELECTOR: &str = ".demo-section";
/// Id of the "show random alert" trigger.
pub const SHOW_ALERT_ID: &str = "show-alert";
/// Glyph rendered inside the dismiss control.
pub const CLOSE_GLYPH: &str = "×";
/// Delay between the fade-out and hiding or removing a dismissed alert.
pub const DISMISS_DELAY_MS: u32 = 300;
/// Delay before a freshly inserted alert fades in.
pub const FADE_IN_DELAY_MS: u32 = 10;

/// Closed set of alert categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information.
    #[default]
    Info,
    /// Completed action.
    Success,
    /// Potentially harmful follow-up.
    Warning,
    /// Failed action.
    Error,
}

impl Severity {
    /// Every severity, in display order.
    pub const ALL: [Self; 4] = [Self::Info, Self::Success, Self::Warning, Self::Error];

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Styling class, e.g. `alert-warning`.
    #[must_use]
    pub fn css_class(self) -> String {
        format!("{ALERT_CLASS}-{}", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = UiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str() == value)
            .ok_or_else(|| UiError::UnknownSeverity {
                value: value.to_string(),
            })
    }
}

/// What happens to an alert once its fade-out delay has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissMode {
    /// Keep the node but stop displaying it (alerts authored in the page).
    Hide,
    /// Detach the node from the document (synthesized alerts).
    Remove,
}

impl DismissMode {
    /// Mode for alerts authored in the page markup.
    pub const AUTHORED: Self = Self::Hide;
    /// Mode for alerts built at runtime.
    pub const SYNTHESIZED: Self = Self::Remove;
}

/// A banner waiting to be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertRecord {
    /// Styling category.
    pub severity: Severity,
    /// Heading text.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl AlertRecord {
    /// Build a record; a missing severity means [`Severity::Info`].
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Option<Severity>) -> Self {
        Self {
            severity: severity.unwrap_or_default(),
            title: title.into(),
            message: message.into(),
        }
    }

    /// Full class attribute for the banner element.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("{ALERT_CLASS} {}", self.severity.css_class())
    }
}

/// Static demo alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CannedAlert {
    /// Styling category.
    pub severity: Severity,
    /// Heading text.
    pub title: &'static str,
    /// Body text.
    pub message: &'static str,
}

impl From<CannedAlert> for AlertRecord {
    fn from(alert: CannedAlert) -> Self {
        Self::new(alert.title, alert.message, Some(alert.severity))
    }
}

/// Alerts offered by the "show random alert" trigger.
pub const CANNED_ALERTS: [CannedAlert; 4] = [
    CannedAlert {
        severity: Severity::Info,
        title: "Information",
        message: "Dette er en informationsbesked. Den er nyttig til at give brugeren vigtige oplysninger.",
    },
    CannedAlert {
        severity: Severity::Success,
        title: "Succes!",
        message: "Din handling blev gennemført korrekt. Alt gik efter hensigten.",
    },
    CannedAlert {
        severity: Severity::Warning,
        title: "Advarsel!",
        message: "Dette er en advarsel. Fortsætter du, kan det have uønskede konsekvenser.",
    },
    CannedAlert {
        severity: Severity::Error,
        title: "Fejl!",
        message: "Der opstod en fejl. Prøv igen senere eller kontakt support.",
    },
];

/// Pick one of [`CANNED_ALERTS`] uniformly at random.
pub fn random_alert<R: Rng + ?Sized>(rng: &mut R) -> AlertRecord {
    let index = rng.random_range(0..CANNED_ALERTS.len());
    CANNED_ALERTS[index].into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    #[test]
    fn severity_parses_and_renders_classes() -> Result<(), UiError> {
        assert_eq!("warning".parse::<Severity>()?, Severity::Warning);
        assert_eq!(Severity::Error.css_class(), "alert-error");
        assert!(matches!(
            "fatal".parse::<Severity>(),
            Err(UiError::UnknownSeverity { .. })
        ));
        Ok(())
    }

    #[test]
    fn dismissal_fades_before_detaching() {
        assert_eq!(DISMISS_DELAY_MS, 300);
        assert_eq!(FADE_IN_DELAY_MS, 10);
        assert_eq!(DismissMode::AUTHORED, DismissMode::Hide);
        assert_eq!(DismissMode::SYNTHESIZED, DismissMode::Remove);
    }

    #[test]
    fn missing_severity_defaults_to_info() {
        let record = AlertRecord::new("Hej", "Besked", None);
        assert_eq!(record.severity, Severity::Info);
        assert_eq!(record.class_name(), "alert alert-info");
    }

    #[test]
    fn canned_alerts_cover_every_severity() {
        let severities: HashSet<Severity> =
            CANNED_ALERTS.iter().map(|alert| alert.severity).collect();
        assert_eq!(severities.len(), Severity::ALL.len());
    }

    #[test]
    fn random_alerts_come_from_the_canned_set() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let alert = random_alert(&mut rng);
            assert!(Severity::ALL.contains(&alert.severity));
            assert!(!alert.title.is_empty());
            assert!(!alert.message.is_empty());
            assert!(
                CANNED_ALERTS
                    .iter()
                    .any(|canned| AlertRecord::from(*canned) == alert)
            );
            seen.insert(alert.severity);
        }
        assert_eq!(seen.len(), 4);
    }
}
