use std::sync::Arc;

use cron_period_parser::{parse_cron_period, FieldValue};
use serde::Deserialize;
use tracing::debug;

use crate::editor::{CronPeriodEditor, CustomValue, OnChange};
use crate::errors::{EditorError, Result};

/// Expression shown by an editor created without an initial value
pub const DEFAULT_INITIAL: &str = "* * * * *";

/// Configuration options for initializing a period editor.
///
/// EditorOptions provides a builder-style API, and can also be read from a
/// TOML document (every key is optional):
///
/// ```toml
/// initial = "0 10 * * 1"
/// allow_interval_expression = true
/// url_set = "/set/"
///
/// [[custom_values]]
/// label = "every weekday"
/// expression = "0 9 * * 1,2,3,4,5"
/// ```
///
/// # Example
///
/// ```rust
/// use cron_period::{Category, EditorOptions, Selection};
///
/// let editor = EditorOptions::default()
///     .initial("9 10 * * *")
///     .url_set("/set/")
///     .init()
///     .unwrap();
///
/// assert_eq!(&Selection::Period(Category::Day), editor.selection());
/// assert_eq!("9 10 * * *", editor.value().unwrap());
/// assert!(!editor.is_changed());
/// ```
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Expression loaded when the editor is created
    initial: Option<String>,

    /// Whether the "every N periods" interval is offered
    allow_interval_expression: Option<bool>,

    /// Named expressions offered next to the six periods
    custom_values: Vec<CustomValue>,

    /// Where the caller posts saved values; only enables the save controls
    url_set: Option<String>,

    /// Called after every change of the editor state
    #[serde(skip)]
    on_change: Option<OnChange>,
}

impl EditorOptions {
    /// Reads options from a TOML document.
    ///
    /// The change callback cannot be configured this way; chain
    /// [`EditorOptions::on_change`] on the result.
    pub fn from_toml(document: &str) -> Result<Self> {
        Ok(toml::from_str(document)?)
    }

    /// Initializes an editor with the configured options.
    ///
    /// Parses the initial value, selects its period and loads the values of
    /// the blocks shown for it. The assembled value becomes the saved value,
    /// so a fresh editor never reports a change.
    ///
    /// # Errors
    /// Fails with [`EditorError::InvalidInitial`] when the initial value is
    /// not a supported expression.
    pub fn init(self) -> Result<CronPeriodEditor> {
        let initial = self
            .initial
            .unwrap_or_else(|| String::from(DEFAULT_INITIAL));
        let period =
            parse_cron_period(&initial).map_err(|source| EditorError::InvalidInitial {
                initial: initial.clone(),
                source,
            })?;

        let mut editor = CronPeriodEditor {
            selection: crate::Selection::Period(period.category),
            interval: 1,
            minute: FieldValue::single(0),
            hour: FieldValue::single(0),
            day_of_month: FieldValue::single(1),
            month: FieldValue::single(1),
            day_of_week: FieldValue::single(0),
            allow_interval_expression: self.allow_interval_expression.unwrap_or(true),
            custom_values: self.custom_values,
            url_set: self.url_set,
            saved_value: String::new(),
            on_change: None,
        };
        editor.apply(&period);
        editor.saved_value = editor.value()?;
        editor.on_change = self.on_change;

        debug!(initial = %initial, value = %editor.saved_value, "cron:editor:init");
        Ok(editor)
    }

    /// Sets the expression the editor starts with.
    ///
    /// # Default
    /// If not specified, defaults to `* * * * *`.
    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Enables or disables the "every N periods" interval.
    ///
    /// When disabled the interval block is never shown and assembled values
    /// never carry a repeat step.
    ///
    /// # Default
    /// If not specified, intervals are allowed.
    pub fn allow_interval_expression(mut self, value: bool) -> Self {
        self.allow_interval_expression = Some(value);
        self
    }

    /// Adds a named expression that can be selected instead of a period.
    ///
    /// The expression is returned verbatim when selected and is not validated.
    pub fn custom_value(mut self, label: impl Into<String>, expression: impl Into<String>) -> Self {
        self.custom_values.push(CustomValue {
            label: label.into(),
            expression: expression.into(),
        });
        self
    }

    /// Sets the URL saved values are posted to.
    ///
    /// Without it the save controls stay hidden and
    /// [`CronPeriodEditor::save_request`] returns `None`.
    pub fn url_set(mut self, value: impl Into<String>) -> Self {
        self.url_set = Some(value.into());
        self
    }

    /// Registers a callback run after every change made through the editor.
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&CronPeriodEditor) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }
}
