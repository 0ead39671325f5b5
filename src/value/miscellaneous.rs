// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for the RFC 5545 Section 3.3 value grammars.

use std::borrow::Cow;

use chumsky::Parser;
use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Failure reasons when a specific value type was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A date value was expected
    Date,
    /// A 32-bit unsigned integer value was expected
    U32,
    /// A non-zero 32-bit unsigned integer value was expected
    PositiveU32,
    /// A recurrence rule part occurred more than once
    RRuleDuplicatePart,
    /// A recurrence rule is missing its FREQ part
    RRuleRequiredFreq,
    /// A recurrence rule carries both COUNT and UNTIL
    RRuleCountUntilExclusion,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            ValueExpected::U32 => Self::Label(Cow::Borrowed("u32 out of range")),
            ValueExpected::PositiveU32 => Self::Label(Cow::Borrowed("expected non-zero integer")),
            ValueExpected::RRuleDuplicatePart => {
                Self::Label(Cow::Borrowed("recurrence rule part occurs more than once"))
            }
            ValueExpected::RRuleRequiredFreq => {
                Self::Label(Cow::Borrowed("recurrence rule requires a FREQ part"))
            }
            ValueExpected::RRuleCountUntilExclusion => {
                Self::Label(Cow::Borrowed("COUNT and UNTIL are mutually exclusive"))
            }
        }
    }
}

/// Parse a run of digits into a `u32`, rejecting overflow.
pub(crate) fn u32_value<'src, I, E>() -> impl Parser<'src, I, u32, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .collect::<String>()
        .try_map_with(|str, e| match lexical::parse_partial::<u32, _>(&str) {
            Ok((v, n)) if n == str.len() => Ok(v),
            Ok(_) | Err(_) => Err(E::Error::expected_found(
                [ValueExpected::U32],
                None,
                e.span(),
            )),
        })
}

/// Parse a run of digits into a non-zero `u32`.
pub(crate) fn u32_non_zero<'src, I, E>() -> impl Parser<'src, I, u32, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    u32_value().try_map(|v, span| match v {
        0 => Err(E::Error::expected_found(
            [ValueExpected::PositiveU32],
            None,
            span,
        )),
        v => Ok(v),
    })
}

/// Optional leading sign, `true` unless `-`.
pub(crate) fn is_positive<'src, I, E>() -> impl Parser<'src, I, bool, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        pub(crate) fn $fname<'src, I, E>() -> impl Parser<'src, I, $ty, E> + Copy
        where
            I: Input<'src, Token = char, Span = SimpleSpan>,
            E: ParserExtra<'src, I>,
        {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(u8_0_1 : u8 => { '0', '1' });
define_digit_select!(u8_0_2 : u8 => { '0', '1', '2' });
define_digit_select!(u8_0_3 : u8 => { '0', '1', '2', '3' });
define_digit_select!(u8_0_5 : u8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(u8_0_9 : u8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(u8_1_9 : u8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_3 : i8 => { '0', '1', '2', '3' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_4 : i8 => { '1', '2', '3', '4' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_5 : i16 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(i16_0_6 : i16 => { '0', '1', '2', '3', '4', '5', '6' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_1_2 : i16 => { '1', '2' });
define_digit_select!(i16_1_9 : i16 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });

#[cfg(test)]
mod tests {
    use chumsky::input::Stream;

    use super::*;

    fn parse_u32(src: &str) -> Result<u32, Vec<Rich<'_, char>>> {
        let stream = Stream::from_iter(src.chars());
        u32_value::<'_, _, extra::Err<_>>()
            .parse(stream)
            .into_result()
    }

    #[test]
    fn parses_u32() {
        for (src, expected) in [("0", 0), ("7", 7), ("4294967295", u32::MAX)] {
            assert_eq!(parse_u32(src).unwrap(), expected);
        }

        for src in ["", "4294967296", "12a", "-1"] {
            assert!(parse_u32(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_non_zero_u32() {
        fn parse(src: &str) -> Result<u32, Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            u32_non_zero::<'_, _, extra::Err<_>>()
                .parse(stream)
                .into_result()
        }

        assert_eq!(parse("12").unwrap(), 12);
        assert!(parse("0").is_err(), "zero should fail");
    }
}
