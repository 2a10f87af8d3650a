//! Bar content types: kind, spec, and display duration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::config::SchedulerConfig;

/// Default max progress for determinate bars.
pub const DEFAULT_PROGRESS_MAX: u32 = 100;

/// Callback invoked by the presenter when the bar's action is activated.
pub type ActionHandler = Arc<dyn Fn() + Send + Sync>;

/// Opaque icon reference, interpreted by the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRef(pub String);

/// Layout kind of a bar.
///
/// The kind constrains which optional [`BarSpec`] fields are meaningful;
/// admission normalizes fields that the kind does not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarKind {
    /// Message with an action button.
    Action,
    /// Message with a determinate progress bar and percentage.
    Determinate,
    /// Message with an indeterminate progress bar.
    Indeterminate,
    /// Message only.
    Message,
    /// Plain bar, optional action and icon.
    Normal,
    /// Bar with a horizontal progress bar.
    Horizontal,
    /// Bar with a circular progress bar.
    Circular,
}

impl BarKind {
    /// Kinds whose progress display responds to `set_progress`.
    pub fn has_progress(self) -> bool {
        matches!(self, Self::Determinate | Self::Horizontal | Self::Circular)
    }

    /// Kinds representing an active operation the user should not
    /// casually swipe away.
    pub fn forbids_swipe_dismiss(self) -> bool {
        matches!(
            self,
            Self::Determinate | Self::Indeterminate | Self::Horizontal | Self::Circular
        )
    }

    /// Kinds whose layout renders an action slot.
    pub fn supports_action(self) -> bool {
        matches!(
            self,
            Self::Action | Self::Normal | Self::Horizontal | Self::Circular
        )
    }
}

/// How long a bar stays in the slot before auto-advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowDuration {
    /// Short fixed duration (configurable, default 1500 ms).
    Short,
    /// Long fixed duration (configurable, default 2750 ms).
    Long,
    /// Stay until manually dismissed.
    ///
    /// Coerced to the configured short duration when promoted with more
    /// bars still queued behind it, so a run of indefinite bars cycles
    /// instead of stalling on the first.
    Indefinite,
    /// Exact duration in milliseconds.
    Millis(u64),
}

impl ShowDuration {
    /// Resolve to a wall-clock duration. `None` means no auto-advance.
    pub fn resolve(self, config: &SchedulerConfig) -> Option<Duration> {
        match self {
            Self::Short => Some(Duration::from_millis(config.short_millis)),
            Self::Long => Some(Duration::from_millis(config.long_millis)),
            Self::Indefinite => None,
            Self::Millis(ms) => Some(Duration::from_millis(ms)),
        }
    }
}

/// Display information for one bar, immutable once enqueued.
///
/// Fields are plain data; invariants are enforced at admission via
/// [`BarSpec::validate`] and [`BarSpec::normalized`], not by the setters.
#[derive(Clone)]
pub struct BarSpec {
    pub kind: BarKind,
    pub message: String,
    /// Action label, meaningful only for kinds with an action slot.
    pub action: Option<String>,
    pub on_action: Option<ActionHandler>,
    pub icon: Option<IconRef>,
    /// Max progress for determinate display. Default 100.
    pub progress_max: u32,
    /// When false, an input-blocking overlay is shown while displayed.
    pub allow_user_input: bool,
    /// Forced false at admission for in-progress kinds.
    pub swipe_to_dismiss: bool,
    /// Run the progress bar in indeterminate mode (Horizontal/Circular).
    pub indeterminate: bool,
    /// Show progress as a percentage, determinate kinds only.
    pub show_progress_percentage: bool,
    /// Opaque caller payload, passed through to the presenter untouched.
    pub metadata: Option<serde_json::Value>,
}

impl BarSpec {
    /// Create a bar of the given kind with default presentation flags.
    pub fn new(kind: BarKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            on_action: None,
            icon: None,
            progress_max: DEFAULT_PROGRESS_MAX,
            allow_user_input: false,
            swipe_to_dismiss: false,
            indeterminate: false,
            show_progress_percentage: true,
            metadata: None,
        }
    }

    /// Check admission invariants: non-empty message, `progress_max >= 1`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.message.is_empty() {
            return Err(Error::EmptyMessage);
        }
        if self.progress_max == 0 {
            return Err(Error::InvalidProgressMax(self.progress_max));
        }
        Ok(())
    }

    /// Copy with flags the kind does not support cleared.
    ///
    /// Swipe-to-dismiss is dropped for in-progress kinds and the action
    /// is dropped for kinds without an action slot. The caller's flags
    /// are never trusted blindly at admission.
    pub fn normalized(&self) -> Self {
        let mut spec = self.clone();
        if spec.kind.forbids_swipe_dismiss() {
            spec.swipe_to_dismiss = false;
        }
        if !spec.kind.supports_action() {
            spec.action = None;
            spec.on_action = None;
        }
        spec
    }
}

impl fmt::Debug for BarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarSpec")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("has_action_handler", &self.on_action.is_some())
            .field("icon", &self.icon)
            .field("progress_max", &self.progress_max)
            .field("allow_user_input", &self.allow_user_input)
            .field("swipe_to_dismiss", &self.swipe_to_dismiss)
            .field("indeterminate", &self.indeterminate)
            .field("show_progress_percentage", &self.show_progress_percentage)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_message() {
        let spec = BarSpec::new(BarKind::Message, "");
        assert!(matches!(spec.validate(), Err(Error::EmptyMessage)));
    }

    #[test]
    fn validate_rejects_zero_progress_max() {
        let mut spec = BarSpec::new(BarKind::Determinate, "working");
        spec.progress_max = 0;
        assert!(matches!(
            spec.validate(),
            Err(Error::InvalidProgressMax(0))
        ));
    }

    #[test]
    fn validate_accepts_defaults() {
        let spec = BarSpec::new(BarKind::Normal, "hello");
        assert!(spec.validate().is_ok());
        assert_eq!(spec.progress_max, DEFAULT_PROGRESS_MAX);
    }

    #[test]
    fn normalized_drops_swipe_for_progress_kinds() {
        for kind in [
            BarKind::Determinate,
            BarKind::Indeterminate,
            BarKind::Horizontal,
            BarKind::Circular,
        ] {
            let mut spec = BarSpec::new(kind, "busy");
            spec.swipe_to_dismiss = true;
            assert!(!spec.normalized().swipe_to_dismiss, "kind {kind:?}");
        }
    }

    #[test]
    fn normalized_keeps_swipe_for_message_kinds() {
        for kind in [BarKind::Action, BarKind::Message, BarKind::Normal] {
            let mut spec = BarSpec::new(kind, "hi");
            spec.swipe_to_dismiss = true;
            assert!(spec.normalized().swipe_to_dismiss, "kind {kind:?}");
        }
    }

    #[test]
    fn normalized_drops_action_for_message_only_kinds() {
        let mut spec = BarSpec::new(BarKind::Determinate, "copying");
        spec.action = Some("CANCEL".into());
        spec.on_action = Some(Arc::new(|| {}));
        let normalized = spec.normalized();
        assert!(normalized.action.is_none());
        assert!(normalized.on_action.is_none());

        let mut spec = BarSpec::new(BarKind::Action, "undo?");
        spec.action = Some("UNDO".into());
        assert_eq!(spec.normalized().action.as_deref(), Some("UNDO"));
    }

    #[test]
    fn duration_resolution_uses_config() {
        let config = SchedulerConfig::default();
        assert_eq!(
            ShowDuration::Short.resolve(&config),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(
            ShowDuration::Long.resolve(&config),
            Some(Duration::from_millis(2750))
        );
        assert_eq!(
            ShowDuration::Millis(420).resolve(&config),
            Some(Duration::from_millis(420))
        );
        assert_eq!(ShowDuration::Indefinite.resolve(&config), None);
    }
}
