//! Gradebook settings stored inside the user preference map.
//!
//! Layout under `preferences.gradebook_settings`:
//!
//! ```text
//! {
//!   "<course_id>": { ...per-course settings... },
//!   "colors": { "late": "#...", "missing": "#...", ... }
//! }
//! ```
//!
//! The colors map is shared by every course, so it sits beside the per-course
//! subtrees rather than inside one.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::error::{CoreError, ValidationErrors};
use crate::preferences::{deep_merge, get_path, permit, Permit, MAX_PREFERENCES_BYTES};
use crate::types::DbId;

/// Preference key holding all gradebook settings.
pub const GRADEBOOK_SETTINGS_KEY: &str = "gradebook_settings";

/// Key of the shared status color map inside [`GRADEBOOK_SETTINGS_KEY`].
pub const COLORS_KEY: &str = "colors";

/// Fields a client may write. Everything else is dropped before merging.
pub const PERMITTED_SETTINGS: &[(&str, Permit)] = &[
    (
        "filter_columns_by",
        Permit::Hash(&[
            ("context_module_id", Permit::Scalar),
            ("grading_period_id", Permit::Scalar),
            ("assignment_group_id", Permit::Scalar),
        ]),
    ),
    ("filter_rows_by", Permit::Hash(&[("section_id", Permit::Scalar)])),
    ("selected_view_options_filters", Permit::ScalarArray),
    ("show_concluded_enrollments", Permit::Scalar),
    ("show_inactive_enrollments", Permit::Scalar),
    ("show_unpublished_assignments", Permit::Scalar),
    ("student_column_display_as", Permit::Scalar),
    ("student_column_secondary_info", Permit::Scalar),
    ("sort_rows_by_column_id", Permit::Scalar),
    ("sort_rows_by_setting_key", Permit::Scalar),
    ("sort_rows_by_direction", Permit::Scalar),
    (
        COLORS_KEY,
        Permit::Hash(&[
            ("late", Permit::Scalar),
            ("missing", Permit::Scalar),
            ("resubmitted", Permit::Scalar),
            ("dropped", Permit::Scalar),
            ("excused", Permit::Scalar),
        ]),
    ),
];

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// A permitted gradebook settings update for one course.
#[derive(Debug, Clone, PartialEq)]
pub struct GradebookSettingsUpdate {
    pub course_id: DbId,
    /// Permitted per-course settings (everything except colors).
    pub settings: Map<String, Value>,
    /// Permitted status colors; empty when the request sent none.
    pub colors: Map<String, Value>,
}

impl GradebookSettingsUpdate {
    /// Build an update from a request body of the form
    /// `{ "gradebook_settings": { ... } }`.
    ///
    /// Fails only when the `gradebook_settings` key itself is missing or
    /// empty. Unknown or malformed fields inside it are dropped.
    pub fn from_params(course_id: DbId, body: &Value) -> Result<Self, CoreError> {
        let params = body
            .get(GRADEBOOK_SETTINGS_KEY)
            .filter(|v| !is_blank(v))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "param is missing or the value is empty: {GRADEBOOK_SETTINGS_KEY}"
                ))
            })?;

        let mut settings = permit(params, PERMITTED_SETTINGS);
        let colors = match settings.remove(COLORS_KEY) {
            Some(Value::Object(colors)) => colors,
            _ => Map::new(),
        };

        Ok(Self {
            course_id,
            settings,
            colors,
        })
    }

    /// Build an update that only touches the shared color map.
    pub fn colors_only(course_id: DbId, colors: Map<String, Value>) -> Self {
        Self {
            course_id,
            settings: Map::new(),
            colors,
        }
    }

    /// The patch merged into the preference map.
    pub fn to_patch(&self) -> Value {
        let mut gradebook = Map::new();
        gradebook.insert(
            self.course_id.to_string(),
            Value::Object(self.settings.clone()),
        );
        gradebook.insert(COLORS_KEY.to_string(), Value::Object(self.colors.clone()));
        json!({ GRADEBOOK_SETTINGS_KEY: gradebook })
    }

    /// Deep-merge this update into `preferences`.
    ///
    /// A preference map that is not a JSON object is treated as empty.
    pub fn apply(&self, preferences: &mut Value) {
        if !preferences.is_object() {
            *preferences = Value::Object(Map::new());
        }
        deep_merge(preferences, self.to_patch());
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// The response body after a successful update: the course's settings and
/// the shared colors.
pub fn updated_settings(preferences: &Value, course_id: DbId) -> Value {
    let course_key = course_id.to_string();
    let course_settings = get_path(preferences, &[GRADEBOOK_SETTINGS_KEY, &course_key])
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));
    let colors = get_path(preferences, &[GRADEBOOK_SETTINGS_KEY, COLORS_KEY])
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));

    let mut gradebook = Map::new();
    gradebook.insert(course_key, course_settings);
    gradebook.insert(COLORS_KEY.to_string(), colors);
    json!({ GRADEBOOK_SETTINGS_KEY: gradebook })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"))
}

/// Returns `true` for `#rgb` and `#rrggbb` color strings.
pub fn is_valid_color(color: &str) -> bool {
    hex_color_regex().is_match(color)
}

/// Check a preference map before it is saved.
pub fn validate_preferences(preferences: &Value) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(Value::Object(colors)) =
        get_path(preferences, &[GRADEBOOK_SETTINGS_KEY, COLORS_KEY])
    {
        for (status, color) in colors {
            let valid = color.as_str().is_some_and(is_valid_color);
            if !valid {
                errors.add(
                    format!("{GRADEBOOK_SETTINGS_KEY}.{COLORS_KEY}.{status}"),
                    "is not a valid color",
                );
            }
        }
    }

    let size = preferences.to_string().len();
    if size > MAX_PREFERENCES_BYTES {
        errors.add(
            "preferences",
            format!("is too long ({size} bytes > {MAX_PREFERENCES_BYTES} bytes)"),
        );
    }

    errors.into_result()
}
