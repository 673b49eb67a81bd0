use std::collections::BTreeMap;
use std::sync::Arc;

use cron_period_parser::{
    assemble_cron_period, parse_cron_period, Category, CronPeriod, CronPeriodError, Field,
    FieldValue, MalformedExpression, RepeatSpec,
};
use getset::Getters;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::errors::{EditorError, Result};

/// Callback run after the editor state changed
pub type OnChange = Arc<dyn Fn(&CronPeriodEditor) + Send + Sync>;

/// A group of inputs shown for a period
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// "every N" periods
    Interval,
    /// Minutes past the hour
    Mins,
    /// Hour and minute of the day
    Time,
    /// Day of the week
    Dow,
    /// Day of the month
    Dom,
    Month,
}

impl Block {
    /// Blocks shown for a period, in display order
    pub fn for_category(category: Category) -> &'static [Block] {
        match category {
            Category::Minute => &[Block::Interval],
            Category::Hour => &[Block::Interval, Block::Mins],
            Category::Day => &[Block::Interval, Block::Time],
            Category::Week => &[Block::Interval, Block::Dow, Block::Time],
            Category::Month => &[Block::Interval, Block::Dom, Block::Time],
            Category::Year => &[Block::Dom, Block::Month, Block::Time],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Block::Interval => "interval",
            Block::Mins => "mins",
            Block::Time => "time",
            Block::Dow => "dow",
            Block::Dom => "dom",
            Block::Month => "month",
        }
    }

    /// Expression fields edited through this block
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Block::Interval => &[],
            Block::Mins => &[Field::Minute],
            Block::Time => &[Field::Hour, Field::Minute],
            Block::Dow => &[Field::DayOfWeek],
            Block::Dom => &[Field::DayOfMonth],
            Block::Month => &[Field::Month],
        }
    }
}

/// What the period selector currently points at
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Period(Category),
    /// A configured custom value, by label
    Custom(String),
}

/// A named expression offered next to the six periods
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CustomValue {
    pub label: String,
    pub expression: String,
}

/// What a caller should post to persist the current value
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct SaveRequest {
    pub url: String,
    /// `{"cron": "<expression>"}`
    pub body: serde_json::Value,
}

/// UI-free state of a period picker
///
/// Holds the selected period, one value per field and the interval, and
/// turns them back and forth into an expression. Rendering, events and the
/// transport of saved values belong to the caller.
#[derive(Getters)]
pub struct CronPeriodEditor {
    #[getset(get = "pub")]
    pub(crate) selection: Selection,
    #[getset(get = "pub")]
    pub(crate) interval: u32,
    pub(crate) minute: FieldValue,
    pub(crate) hour: FieldValue,
    pub(crate) day_of_month: FieldValue,
    pub(crate) month: FieldValue,
    pub(crate) day_of_week: FieldValue,
    #[getset(get = "pub")]
    pub(crate) allow_interval_expression: bool,
    #[getset(get = "pub")]
    pub(crate) custom_values: Vec<CustomValue>,
    #[getset(get = "pub")]
    pub(crate) url_set: Option<String>,
    pub(crate) saved_value: String,
    pub(crate) on_change: Option<OnChange>,
}

impl CronPeriodEditor {
    /// Value currently held for `field`
    pub fn field_value(&self, field: Field) -> &FieldValue {
        match field {
            Field::Minute => &self.minute,
            Field::Hour => &self.hour,
            Field::DayOfMonth => &self.day_of_month,
            Field::Month => &self.month,
            Field::DayOfWeek => &self.day_of_week,
        }
    }

    fn field_value_mut(&mut self, field: Field) -> &mut FieldValue {
        match field {
            Field::Minute => &mut self.minute,
            Field::Hour => &mut self.hour,
            Field::DayOfMonth => &mut self.day_of_month,
            Field::Month => &mut self.month,
            Field::DayOfWeek => &mut self.day_of_week,
        }
    }

    /// Last value known to be saved
    pub fn saved_value(&self) -> &str {
        &self.saved_value
    }

    /// Blocks to show for the current selection
    pub fn visible_blocks(&self) -> Vec<Block> {
        match &self.selection {
            Selection::Period(category) => Block::for_category(*category)
                .iter()
                .copied()
                .filter(|block| *block != Block::Interval || self.allow_interval_expression)
                .collect(),
            Selection::Custom(_) => Vec::new(),
        }
    }

    /// Load the period and block values of a classified expression
    pub(crate) fn apply(&mut self, period: &CronPeriod) {
        for block in Block::for_category(period.category) {
            for field in block.fields() {
                *self.field_value_mut(*field) = period.field(*field).clone();
            }
        }
        self.interval = period.repeat.map(|r| r.step).unwrap_or(1);
        self.selection = Selection::Period(period.category);
    }

    fn notify(&self) {
        if let Some(on_change) = self.on_change.clone() {
            on_change(self);
        }
    }

    /// Replaces the editor state with a parsed expression.
    ///
    /// Fields not shown for the parsed period keep their previous value. The
    /// interval becomes the repeat step, or 1 without one.
    ///
    /// # Errors
    /// The expression is rejected as a whole and the state is left untouched.
    pub fn set_value(&mut self, expression: &str) -> Result<()> {
        let period = parse_cron_period(expression).map_err(|e| {
            warn!(expression, error = %e, "cron:editor:rejected");
            e
        })?;

        self.apply(&period);
        debug!(
            expression,
            category = %period.category,
            interval = self.interval,
            "cron:editor:set_value"
        );
        self.notify();
        Ok(())
    }

    /// Assembles the expression described by the current state.
    ///
    /// Only the fields shown for the selected period are concrete. When the
    /// interval is above 1 the repeat field of the period carries it as a
    /// step; years never repeat. A custom selection returns its expression.
    pub fn value(&self) -> Result<String> {
        let category = match &self.selection {
            Selection::Period(category) => *category,
            Selection::Custom(label) => return Ok(self.custom_expression(label)?.to_string()),
        };

        let values: BTreeMap<Field, String> = Block::for_category(category)
            .iter()
            .flat_map(|block| block.fields())
            .map(|field| (*field, self.field_value(*field).to_string()))
            .collect();

        let repeat = if self.repeat_active() {
            category
                .repeat_field()
                .map(|field| RepeatSpec::new(self.interval, field))
        } else {
            None
        };

        Ok(assemble_cron_period(category, &values, repeat)?)
    }

    fn custom_expression(&self, label: &str) -> Result<&str> {
        self.custom_values
            .iter()
            .find(|custom| custom.label == label)
            .map(|custom| custom.expression.as_str())
            .ok_or_else(|| EditorError::UnknownCustomValue(label.to_string()))
    }

    /// Selects one of the six periods
    pub fn select_period(&mut self, category: Category) {
        self.selection = Selection::Period(category);
        debug!(category = %category, "cron:editor:select_period");
        self.notify();
    }

    /// Selects a configured custom value by label
    pub fn select_custom(&mut self, label: &str) -> Result<()> {
        self.custom_expression(label)?;
        self.selection = Selection::Custom(label.to_string());
        debug!(label, "cron:editor:select_custom");
        self.notify();
        Ok(())
    }

    /// Sets the "every N periods" interval; values below 1 count as 1.
    ///
    /// The interval becomes a step on the repeat field of the period, which
    /// only takes a single value: while that field holds a list,
    /// [`CronPeriodEditor::value`] fails with an inconsistent assembly.
    pub fn set_interval(&mut self, interval: u32) {
        self.interval = interval.max(1);
        debug!(interval = self.interval, "cron:editor:set_interval");
        self.notify();
    }

    /// Sets the value of one field, checked against the field boundaries.
    ///
    /// # Errors
    /// An empty list, a value outside the field boundaries, or a list on the
    /// field carrying the active interval is rejected and the state is left
    /// untouched.
    pub fn set_field_value(&mut self, field: Field, value: FieldValue) -> Result<()> {
        if let Err(error) = self.check_field_value(field, &value) {
            warn!(field = %field, error = %error, "cron:editor:rejected");
            return Err(error.into());
        }

        debug!(field = %field, value = %value, "cron:editor:set_field_value");
        *self.field_value_mut(field) = value;
        self.notify();
        Ok(())
    }

    fn check_field_value(
        &self,
        field: Field,
        value: &FieldValue,
    ) -> core::result::Result<(), CronPeriodError> {
        let FieldValue::Values(values) = value else {
            return Ok(());
        };

        if values.is_empty() {
            return Err(MalformedExpression::InvalidToken {
                field,
                token: String::new(),
            }
            .into());
        }

        if let Some(invalid) = values.iter().find(|v| !field.contains(**v)) {
            return Err(CronPeriodError::OutOfRange {
                field,
                value: invalid.to_string(),
                expression: value.to_string(),
            });
        }

        if let Selection::Period(category) = self.selection {
            if values.len() > 1 && self.repeat_active() && category.repeat_field() == Some(field) {
                return Err(CronPeriodError::InconsistentAssembly {
                    category,
                    reason: format!(
                        "{field} repeats every {} and takes a single value",
                        self.interval
                    ),
                });
            }
        }

        Ok(())
    }

    fn repeat_active(&self) -> bool {
        self.allow_interval_expression && self.interval > 1
    }

    /// Whether the current value differs from the saved one
    ///
    /// A state that cannot be assembled counts as changed.
    pub fn is_changed(&self) -> bool {
        self.value()
            .map(|value| value != self.saved_value)
            .unwrap_or(true)
    }

    /// Whether save controls should be offered: a save URL is configured and
    /// the value changed
    pub fn controls_visible(&self) -> bool {
        self.url_set.is_some() && self.is_changed()
    }

    /// The request persisting the current value, when a save URL is configured
    pub fn save_request(&self) -> Result<Option<SaveRequest>> {
        let Some(url) = &self.url_set else {
            return Ok(None);
        };

        Ok(Some(SaveRequest {
            url: url.clone(),
            body: json!({ "cron": self.value()? }),
        }))
    }

    /// Records a successful save of `expression`
    pub fn mark_saved(&mut self, expression: impl Into<String>) {
        self.saved_value = expression.into();
        debug!(saved = %self.saved_value, "cron:editor:saved");
    }
}
