//! Product card state: exclusive option groups and the add-to-cart flash.

/// Class marking the selected option of a group.
pub const ACTIVE_CLASS: &str = "active";
/// Selector used to find the add-to-cart control (first match wins).
pub const CART_BUTTON_SELECTOR: &str = "button";
/// Label shown while the add-to-cart confirmation is visible.
pub const CONFIRM_LABEL: &str = "✓ Tilføjet!";
/// Background shown while the add-to-cart confirmation is visible.
pub const CONFIRM_BACKGROUND: &str = "#48bb78";
/// How long the confirmation stays before reverting.
pub const CONFIRM_REVERT_MS: u32 = 1500;

/// Independent option groups on the product card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionGroup {
    /// Color swatches.
    Color,
    /// Size buttons.
    Size,
}

impl OptionGroup {
    /// Every group wired on page load.
    pub const ALL: [Self; 2] = [Self::Color, Self::Size];

    /// Class shared by the group's options.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Color => "color-selector",
            Self::Size => "size-selector",
        }
    }

    /// CSS selector for the group's options.
    #[must_use]
    pub fn selector(self) -> String {
        format!(".{}", self.class())
    }
}

/// At most one active option among `len` siblings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionGroup {
    len: usize,
    active: Option<usize>,
}

impl SelectionGroup {
    /// Group with nothing selected yet.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, active: None }
    }

    /// Activate `index`, deactivating every sibling. Out-of-range indices are
    /// ignored and return `false`.
    pub const fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Currently active option.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Whether `index` is the active option.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Number of options in the group.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the group has no options.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Selection state of both groups on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductSelections {
    color: SelectionGroup,
    size: SelectionGroup,
}

impl ProductSelections {
    /// Card with `colors` color options and `sizes` size options.
    #[must_use]
    pub const fn new(colors: usize, sizes: usize) -> Self {
        Self {
            color: SelectionGroup::new(colors),
            size: SelectionGroup::new(sizes),
        }
    }

    /// Handle a click on option `index` of `group`.
    pub const fn click(&mut self, group: OptionGroup, index: usize) -> bool {
        self.group_mut(group).select(index)
    }

    /// Read one group.
    #[must_use]
    pub const fn group(&self, group: OptionGroup) -> &SelectionGroup {
        match group {
            OptionGroup::Color => &self.color,
            OptionGroup::Size => &self.size,
        }
    }

    const fn group_mut(&mut self, group: OptionGroup) -> &mut SelectionGroup {
        match group {
            OptionGroup::Color => &mut self.color,
            OptionGroup::Size => &mut self.size,
        }
    }
}

/// Label swap performed by the add-to-cart control.
///
/// The revert timer is never cancelled: a second click while the confirmation
/// is visible captures [`CONFIRM_LABEL`] as the label to restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartConfirmation {
    original_label: String,
}

impl CartConfirmation {
    /// Remember the label shown at click time.
    #[must_use]
    pub fn capture(current_label: impl Into<String>) -> Self {
        Self {
            original_label: current_label.into(),
        }
    }

    /// Label shown during the confirmation.
    #[must_use]
    pub const fn confirmed_label(&self) -> &'static str {
        CONFIRM_LABEL
    }

    /// Label restored once the confirmation expires.
    #[must_use]
    pub fn original_label(&self) -> &str {
        &self.original_label
    }
}
