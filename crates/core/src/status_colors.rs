//! View-model for the gradebook "Statuses" modal.
//!
//! The modal shows one color picker per submission status. Picking a color
//! updates the local color set immediately and then hands the full set to a
//! caller-supplied [`AfterUpdateStatusColors`] implementation for
//! persistence. A failed update is reported back to the caller; the local
//! colors are left as picked and [`StatusesModal::revert_colors`] is
//! available if the caller wants to undo them.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The five submission statuses that carry a gradebook color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    Late,
    Missing,
    Resubmitted,
    Dropped,
    Excused,
}

impl StatusLabel {
    /// Display order used by the modal.
    pub const ALL: [StatusLabel; 5] = [
        StatusLabel::Late,
        StatusLabel::Missing,
        StatusLabel::Resubmitted,
        StatusLabel::Dropped,
        StatusLabel::Excused,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Late => "late",
            Self::Missing => "missing",
            Self::Resubmitted => "resubmitted",
            Self::Dropped => "dropped",
            Self::Excused => "excused",
        }
    }
}

/// A complete status color set. All five statuses are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusColors {
    pub late: String,
    pub missing: String,
    pub resubmitted: String,
    pub dropped: String,
    pub excused: String,
}

impl StatusColors {
    pub fn get(&self, status: StatusLabel) -> &str {
        match status {
            StatusLabel::Late => &self.late,
            StatusLabel::Missing => &self.missing,
            StatusLabel::Resubmitted => &self.resubmitted,
            StatusLabel::Dropped => &self.dropped,
            StatusLabel::Excused => &self.excused,
        }
    }

    pub fn set(&mut self, status: StatusLabel, color: String) {
        let slot = match status {
            StatusLabel::Late => &mut self.late,
            StatusLabel::Missing => &mut self.missing,
            StatusLabel::Resubmitted => &mut self.resubmitted,
            StatusLabel::Dropped => &mut self.dropped,
            StatusLabel::Excused => &mut self.excused,
        };
        *slot = color;
    }

    /// The colors as a JSON object keyed by status name.
    pub fn to_map(&self) -> Map<String, Value> {
        StatusLabel::ALL
            .iter()
            .map(|status| {
                (
                    status.as_str().to_string(),
                    Value::String(self.get(*status).to_string()),
                )
            })
            .collect()
    }
}

/// Persists a status color set on behalf of the modal.
#[async_trait]
pub trait AfterUpdateStatusColors: Send + Sync {
    type Error: Send;

    /// Persist the full, already-updated color set.
    async fn after_update_status_colors(&self, colors: &StatusColors) -> Result<(), Self::Error>;
}

/// Where keyboard focus should go after a picker is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    ColorPickerButton(StatusLabel),
}

// ---------------------------------------------------------------------------
// Modal state
// ---------------------------------------------------------------------------

/// State of the statuses modal: open/closed, the local colors, and which
/// status (if any) has its color picker expanded.
pub struct StatusesModal {
    is_open: bool,
    colors: StatusColors,
    open_picker: Option<StatusLabel>,
    on_close: Box<dyn FnMut() + Send>,
}

impl fmt::Debug for StatusesModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusesModal")
            .field("is_open", &self.is_open)
            .field("colors", &self.colors)
            .field("open_picker", &self.open_picker)
            .finish_non_exhaustive()
    }
}

impl StatusesModal {
    /// Create a closed modal holding a copy of `colors`.
    pub fn new(colors: &StatusColors, on_close: impl FnMut() + Send + 'static) -> Self {
        Self {
            is_open: false,
            colors: colors.clone(),
            open_picker: None,
            on_close: Box::new(on_close),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn colors(&self) -> &StatusColors {
        &self.colors
    }

    pub fn open_picker(&self) -> Option<StatusLabel> {
        self.open_picker
    }

    pub fn is_picker_shown(&self, status: StatusLabel) -> bool {
        self.open_picker == Some(status)
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Close the modal and notify the owner.
    pub fn close(&mut self) {
        self.is_open = false;
        self.open_picker = None;
        (self.on_close)();
    }

    /// Show or hide the picker for `status`. Showing one hides any other.
    pub fn toggle_picker(&mut self, status: StatusLabel, shown: bool) {
        self.open_picker = if shown { Some(status) } else { None };
    }

    /// The picker for `status` was dismissed; focus returns to its button.
    pub fn picker_after_close(&mut self, status: StatusLabel) -> FocusTarget {
        self.open_picker = None;
        FocusTarget::ColorPickerButton(status)
    }

    /// Replace the local color for `status`, returning the full updated set.
    pub fn set_status_color(&mut self, status: StatusLabel, color: impl Into<String>) -> StatusColors {
        self.colors.set(status, color.into());
        self.colors.clone()
    }

    /// Optimistically apply a color, then persist the full set through
    /// `updater`. On success the picker closes; on failure the error is
    /// returned and the local colors keep the new value.
    pub async fn update_status_color<U>(
        &mut self,
        status: StatusLabel,
        color: impl Into<String>,
        updater: &U,
    ) -> Result<(), U::Error>
    where
        U: AfterUpdateStatusColors + ?Sized,
    {
        let colors = self.set_status_color(status, color);
        updater.after_update_status_colors(&colors).await?;
        self.open_picker = None;
        Ok(())
    }

    /// Replace the local colors wholesale, e.g. after a failed update.
    pub fn revert_colors(&mut self, previous: StatusColors) {
        self.colors = previous;
    }
}
