use cron_period_types::{Category, FieldShape, FieldValue, RepeatSpec};

use crate::CronPeriodError;

/// Determine the category of range-validated field values
///
/// A repeat step decides the category on its own. Otherwise the wildcard
/// shape of the fields is matched against the category patterns in order.
pub(crate) fn classify(
    values: &[FieldValue; 5],
    repeat: Option<RepeatSpec>,
    cleaned: &str,
) -> Result<Category, CronPeriodError> {
    if let Some(field) = repeat.and_then(|r| r.field()) {
        return Ok(Category::from_repeat_field(field));
    }

    let shapes: [FieldShape; 5] = std::array::from_fn(|i| values[i].shape());
    Category::from_shapes(&shapes).ok_or_else(|| CronPeriodError::UnsupportedCombination {
        expression: cleaned.to_string(),
    })
}
