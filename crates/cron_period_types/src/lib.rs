use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five positional fields of a cron expression
///
/// ```crontab
/// ┌───────────── minute (0 - 59)
/// │ ┌───────────── hour (0 - 23)
/// │ │ ┌───────────── day of the month (1 - 31)
/// │ │ │ ┌───────────── month (1 - 12)
/// │ │ │ │ ┌───────────── day of the week (0 - 6) (Sunday to Saturday)
/// │ │ │ │ │
/// * * * * *
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl Field {
    /// Every field, in expression order
    pub const ALL: [Field; 5] = [
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
    ];

    /// Zero based position of the field in an expression
    pub fn index(&self) -> u8 {
        match self {
            Field::Minute => 0,
            Field::Hour => 1,
            Field::DayOfMonth => 2,
            Field::Month => 3,
            Field::DayOfWeek => 4,
        }
    }

    /// One based position, as shown in diagnostics
    pub fn column(&self) -> u8 {
        self.index() + 1
    }

    pub fn from_index(index: u8) -> Option<Field> {
        Field::ALL.get(usize::from(index)).copied()
    }

    /// Inclusive `(min, max)` bounds of a concrete value for this field
    pub fn boundaries(&self) -> (u32, u32) {
        match self {
            Field::Minute => (0, 59),
            Field::Hour => (0, 23),
            Field::DayOfMonth => (1, 31),
            Field::Month => (1, 12),
            Field::DayOfWeek => (0, 6),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        let (min, max) = self.boundaries();
        value >= min && value <= max
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth => "day_of_month",
            Field::Month => "month",
            Field::DayOfWeek => "day_of_week",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("Unknown cron field name `{0}`")]
pub struct UnknownFieldError(pub String);

impl FromStr for Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" | "min" => Ok(Field::Minute),
            "hour" => Ok(Field::Hour),
            "day_of_month" | "dom" | "day" => Ok(Field::DayOfMonth),
            "month" => Ok(Field::Month),
            "day_of_week" | "dow" => Ok(Field::DayOfWeek),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

/// The value held by a single field once any repeat step has been stripped
///
/// Lists keep the order (and duplicates) they were written with.
#[derive(Debug, PartialEq, Eq, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    #[default]
    Any,
    Values(Vec<u32>),
}

impl FieldValue {
    pub fn single(value: u32) -> Self {
        FieldValue::Values(vec![value])
    }

    pub fn is_any(&self) -> bool {
        matches!(self, FieldValue::Any)
    }

    pub fn shape(&self) -> FieldShape {
        match self {
            FieldValue::Any => FieldShape::Wildcard,
            FieldValue::Values(_) => FieldShape::Concrete,
        }
    }

    /// The single concrete value, if this is neither a wildcard nor a list
    pub fn as_single(&self) -> Option<u32> {
        match self {
            FieldValue::Values(values) if values.len() == 1 => Some(values[0]),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Any => f.write_str("*"),
            FieldValue::Values(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Whether a position of a category pattern holds a wildcard or concrete values
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldShape {
    Wildcard,
    Concrete,
}

use FieldShape::{Concrete as X, Wildcard as W};

/// Category patterns, tried top to bottom; the first match wins
pub const CATEGORY_PATTERNS: [(Category, [FieldShape; 5]); 6] = [
    (Category::Minute, [W, W, W, W, W]),
    (Category::Hour, [X, W, W, W, W]),
    (Category::Day, [X, X, W, W, W]),
    (Category::Week, [X, X, W, W, X]),
    (Category::Month, [X, X, X, W, W]),
    (Category::Year, [X, X, X, X, W]),
];

/// The recurrence shape of an expression
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Minute,
        Category::Hour,
        Category::Day,
        Category::Week,
        Category::Month,
        Category::Year,
    ];

    /// Wildcard/concrete shape over the five fields
    pub fn pattern(&self) -> [FieldShape; 5] {
        match self {
            Category::Minute => CATEGORY_PATTERNS[0].1,
            Category::Hour => CATEGORY_PATTERNS[1].1,
            Category::Day => CATEGORY_PATTERNS[2].1,
            Category::Week => CATEGORY_PATTERNS[3].1,
            Category::Month => CATEGORY_PATTERNS[4].1,
            Category::Year => CATEGORY_PATTERNS[5].1,
        }
    }

    /// Field whose repeat step expresses "every N periods"
    ///
    /// A year has no such field.
    pub fn repeat_field(&self) -> Option<Field> {
        match self {
            Category::Minute => Some(Field::Minute),
            Category::Hour => Some(Field::Hour),
            Category::Day => Some(Field::DayOfMonth),
            Category::Week => Some(Field::DayOfWeek),
            Category::Month => Some(Field::Month),
            Category::Year => None,
        }
    }

    /// Category implied by a repeat step on `field`, regardless of the other fields
    pub fn from_repeat_field(field: Field) -> Category {
        match field {
            Field::Minute => Category::Minute,
            Field::Hour => Category::Hour,
            Field::DayOfMonth => Category::Day,
            Field::Month => Category::Month,
            Field::DayOfWeek => Category::Week,
        }
    }

    /// First category whose pattern matches `shapes`
    pub fn from_shapes(shapes: &[FieldShape; 5]) -> Option<Category> {
        CATEGORY_PATTERNS
            .iter()
            .find(|(_, pattern)| pattern == shapes)
            .map(|(category, _)| *category)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Minute => "minute",
            Category::Hour => "hour",
            Category::Day => "day",
            Category::Week => "week",
            Category::Month => "month",
            Category::Year => "year",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("Unknown period `{0}`, expected one of minute, hour, day, week, month, year")]
pub struct UnknownCategoryError(pub String);

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategoryError(s.to_string()))
    }
}

/// A `/step` suffix carried by one field of an expression
#[derive(Debug, PartialEq, Eq, Clone, Copy, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
pub struct RepeatSpec {
    pub step: u32,
    pub field_index: u8,
}

impl RepeatSpec {
    pub fn new(step: u32, field: Field) -> Self {
        Self {
            step,
            field_index: field.index(),
        }
    }

    pub fn field(&self) -> Option<Field> {
        Field::from_index(self.field_index)
    }
}

/// A validated and classified cron expression
///
/// The repeat field keeps its base value (`*` or a single number) and the
/// step lives in `repeat`.
#[derive(Debug, PartialEq, Eq, Clone, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct CronPeriod {
    pub category: Category,
    pub minutes: FieldValue,
    pub hours: FieldValue,
    pub days: FieldValue,
    pub months: FieldValue,
    /// Days of week
    pub dows: FieldValue,
    pub repeat: Option<RepeatSpec>,
}

impl CronPeriod {
    pub fn field(&self, field: Field) -> &FieldValue {
        match field {
            Field::Minute => &self.minutes,
            Field::Hour => &self.hours,
            Field::DayOfMonth => &self.days,
            Field::Month => &self.months,
            Field::DayOfWeek => &self.dows,
        }
    }

    /// Fields in expression order
    pub fn fields(&self) -> [&FieldValue; 5] {
        [
            &self.minutes,
            &self.hours,
            &self.days,
            &self.months,
            &self.dows,
        ]
    }

    /// Field values keyed by field, in the shape the assembler accepts back
    ///
    /// ```rust
    /// use cron_period_types::{Category, CronPeriod, Field, FieldValue};
    ///
    /// let period = CronPeriod {
    ///     category: Category::Week,
    ///     minutes: FieldValue::single(0),
    ///     hours: FieldValue::single(10),
    ///     days: FieldValue::Any,
    ///     months: FieldValue::Any,
    ///     dows: FieldValue::Values(vec![1, 6]),
    ///     repeat: None,
    /// };
    /// let values = period.values_by_field();
    /// assert_eq!("10", values[&Field::Hour]);
    /// assert_eq!("1,6", values[&Field::DayOfWeek]);
    /// ```
    pub fn values_by_field(&self) -> BTreeMap<Field, String> {
        Field::ALL
            .into_iter()
            .map(|field| (field, self.field(field).to_string()))
            .collect()
    }
}

/// Canonical rendering: single spaces, lists joined by commas, the repeat
/// field written as `base/step`
impl fmt::Display for CronPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repeat_field = self.repeat.and_then(|r| r.field());
        for (field, value) in Field::ALL.into_iter().zip(self.fields()) {
            if field != Field::Minute {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
            if let (Some(repeat), Some(repeat_field)) = (self.repeat, repeat_field) {
                if repeat_field == field {
                    write!(f, "/{}", repeat.step)?;
                }
            }
        }
        Ok(())
    }
}
