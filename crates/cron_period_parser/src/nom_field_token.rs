use nom::{
    branch::alt,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, opt},
    multi::separated_list1,
    sequence::{pair, preceded},
    IResult,
};

/// Base of a field token, before any range check
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) enum TokenBase<'a> {
    Wildcard,
    /// One or more comma separated digit runs
    Numbers(Vec<&'a str>),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct FieldToken<'a> {
    pub base: TokenBase<'a>,
    pub step: Option<&'a str>,
}

/// Attempts to parse `*` or `*/N`
fn wildcard_token(input: &str) -> IResult<&str, FieldToken<'_>> {
    map(
        preceded(char('*'), opt(preceded(char('/'), digit1))),
        |step| FieldToken {
            base: TokenBase::Wildcard,
            step,
        },
    )(input)
}

/// Attempts to parse a single number followed by `/N`
fn stepped_number_token(input: &str) -> IResult<&str, FieldToken<'_>> {
    map(
        pair(digit1, preceded(char('/'), digit1)),
        |(base, step)| FieldToken {
            base: TokenBase::Numbers(vec![base]),
            step: Some(step),
        },
    )(input)
}

/// Attempts to parse comma separated numbers; a list never carries a step
fn number_list_token(input: &str) -> IResult<&str, FieldToken<'_>> {
    map(separated_list1(char(','), digit1), |numbers| FieldToken {
        base: TokenBase::Numbers(numbers),
        step: None,
    })(input)
}

/// Parse a whole field token
pub(crate) fn nom_field_token(input: &str) -> IResult<&str, FieldToken<'_>> {
    all_consuming(alt((
        wildcard_token,
        stepped_number_token,
        number_list_token,
    )))(input)
}
