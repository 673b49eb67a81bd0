use cron_period_types::Field;

/// A `/step` suffix as written, before validation
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RawRepeat<'a> {
    pub step: &'a str,
    pub field_index: u8,
}

impl RawRepeat<'_> {
    pub fn field(&self) -> Option<Field> {
        Field::from_index(self.field_index)
    }
}

/// Expression tokens with every `/step` suffix reduced to its base
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RepeatExtraction<'a> {
    pub tokens: Vec<&'a str>,
    /// Only the first stepped token, scanning left to right
    pub repeat: Option<RawRepeat<'a>>,
}

impl RepeatExtraction<'_> {
    /// The cleaned expression, tokens joined by single spaces
    pub fn cleaned(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Strip repeat steps from an expression without validating anything
///
/// Later stepped tokens are still reduced to their base, but their step is
/// dropped.
///
/// ```rust
/// use cron_period_parser::extract_repeat;
///
/// let extraction = extract_repeat("*/5 2/3 * * *");
/// assert_eq!("* 2 * * *", extraction.cleaned());
/// let repeat = extraction.repeat.unwrap();
/// assert_eq!(("5", 0), (repeat.step, repeat.field_index));
/// ```
pub fn extract_repeat(expression: &str) -> RepeatExtraction<'_> {
    let mut repeat = None;
    let tokens = expression
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| match token.split_once('/') {
            Some((base, step)) => {
                if let (None, Ok(field_index)) = (repeat, u8::try_from(index)) {
                    repeat = Some(RawRepeat { step, field_index });
                }
                base
            }
            None => token,
        })
        .collect();

    RepeatExtraction { tokens, repeat }
}
