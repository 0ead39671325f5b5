// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule type as defined in RFC 5545 Section 3.3.10.

use std::fmt::{self, Display};

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use thiserror::Error;

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{ValueDate, ValueDateTime, value_date, value_date_time};
use crate::value::miscellaneous::{
    ValueExpected, i8_0_1, i8_0_3, i8_0_9, i8_1_2, i8_1_4, i8_1_9, i16_0_5, i16_0_6, i16_0_9,
    i16_1_2, i16_1_9, is_positive, u8_0_1, u8_0_2, u8_0_3, u8_0_5, u8_0_9, u8_1_9, u32_non_zero,
};

/// A recurrence rule.
///
/// `count` and `until` are mutually exclusive; the parser and the builder
/// methods both reject a rule that carries both. Every `by_*` list is empty
/// when the corresponding part is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub freq: RecurrenceFrequency,
    /// Last occurrence boundary, at the precision it was written with
    pub until: Option<RuleEnd>,
    /// Total number of occurrences, counted from the seed
    pub count: Option<u32>,
    /// Interval between periods, at least 1
    pub interval: u32,
    /// Second specifier
    pub by_second: Vec<u8>,
    /// Minute specifier
    pub by_minute: Vec<u8>,
    /// Hour specifier
    pub by_hour: Vec<u8>,
    /// Day of month specifier
    pub by_month_day: Vec<i8>,
    /// Day of year specifier
    pub by_year_day: Vec<i16>,
    /// Week number specifier
    pub by_week_no: Vec<i8>,
    /// Month specifier
    pub by_month: Vec<u8>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Position within each period's candidate set
    pub by_set_pos: Vec<i16>,
    /// First day of the week for WEEKLY and BYWEEKNO computation
    pub wkst: WeekDay,
}

/// The UNTIL terminator of a [`RecurrenceRule`].
///
/// A bare date bounds occurrences at day granularity, even against a seed
/// carrying a time of day; a date-time bounds them at the instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEnd {
    /// Date-valued UNTIL
    Date(ValueDate),
    /// Date-time-valued UNTIL
    DateTime(ValueDateTime),
}

impl Display for RuleEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleEnd::Date(date) => write!(f, "{date}"),
            RuleEnd::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<ValueDate> for RuleEnd {
    fn from(date: ValueDate) -> Self {
        RuleEnd::Date(date)
    }
}

impl From<ValueDateTime> for RuleEnd {
    fn from(dt: ValueDateTime) -> Self {
        RuleEnd::DateTime(dt)
    }
}

/// Error raised when builder methods would produce an invalid rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleError {
    /// COUNT and UNTIL set on the same rule
    #[error("COUNT and UNTIL are mutually exclusive")]
    CountAndUntil,

    /// COUNT of zero
    #[error("COUNT must be positive")]
    ZeroCount,

    /// INTERVAL of zero
    #[error("INTERVAL must be positive")]
    ZeroInterval,
}

impl RecurrenceRule {
    /// An unbounded rule at the given frequency with all parts defaulted.
    #[must_use]
    pub const fn new(freq: RecurrenceFrequency) -> Self {
        RecurrenceRule {
            freq,
            until: None,
            count: None,
            interval: 1,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_day: Vec::new(),
            by_set_pos: Vec::new(),
            wkst: WeekDay::Monday,
        }
    }

    /// Bound the rule to a total number of occurrences.
    ///
    /// # Errors
    ///
    /// Fails when `count` is zero or the rule already carries UNTIL.
    pub fn with_count(mut self, count: u32) -> Result<Self, RuleError> {
        if self.until.is_some() {
            return Err(RuleError::CountAndUntil);
        }
        if count == 0 {
            return Err(RuleError::ZeroCount);
        }
        self.count = Some(count);
        Ok(self)
    }

    /// Bound the rule to occurrences at or before the given boundary.
    ///
    /// # Errors
    ///
    /// Fails when the rule already carries COUNT.
    pub fn with_until(mut self, until: impl Into<RuleEnd>) -> Result<Self, RuleError> {
        if self.count.is_some() {
            return Err(RuleError::CountAndUntil);
        }
        self.until = Some(until.into());
        Ok(self)
    }

    /// Set the interval between periods.
    ///
    /// # Errors
    ///
    /// Fails when `interval` is zero.
    pub fn with_interval(mut self, interval: u32) -> Result<Self, RuleError> {
        if interval == 0 {
            return Err(RuleError::ZeroInterval);
        }
        self.interval = interval;
        Ok(self)
    }
}

impl Display for RecurrenceRule {
    /// Serialize in a normalized part order, defaults omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: Display>(f: &mut fmt::Formatter<'_>, kw: &str, items: &[T]) -> fmt::Result {
            if items.is_empty() {
                return Ok(());
            }
            write!(f, ";{kw}=")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;
        if let Some(until) = self.until {
            write!(f, ";{KW_RRULE_UNTIL}={until}")?;
        }
        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        if self.interval != 1 {
            write!(f, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }
        list(f, KW_RRULE_BYSECOND, &self.by_second)?;
        list(f, KW_RRULE_BYMINUTE, &self.by_minute)?;
        list(f, KW_RRULE_BYHOUR, &self.by_hour)?;
        list(f, KW_RRULE_BYDAY, &self.by_day)?;
        list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        list(f, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        list(f, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        list(f, KW_RRULE_BYSETPOS, &self.by_set_pos)?;
        if self.wkst != WeekDay::Monday {
            write!(f, ";{KW_RRULE_WKST}={}", self.wkst)?;
        }
        Ok(())
    }
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[expect(missing_docs)]
pub enum RecurrenceFrequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceFrequency::Secondly => write!(f, "{KW_RRULE_FREQ_SECONDLY}"),
            RecurrenceFrequency::Minutely => write!(f, "{KW_RRULE_FREQ_MINUTELY}"),
            RecurrenceFrequency::Hourly => write!(f, "{KW_RRULE_FREQ_HOURLY}"),
            RecurrenceFrequency::Daily => write!(f, "{KW_RRULE_FREQ_DAILY}"),
            RecurrenceFrequency::Weekly => write!(f, "{KW_RRULE_FREQ_WEEKLY}"),
            RecurrenceFrequency::Monthly => write!(f, "{KW_RRULE_FREQ_MONTHLY}"),
            RecurrenceFrequency::Yearly => write!(f, "{KW_RRULE_FREQ_YEARLY}"),
        }
    }
}

/// Day of week with optional occurrence within the period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,
    /// Ordinal within the month or year, negative from the end
    pub occurrence: Option<i8>,
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(occurrence) = self.occurrence {
            write!(f, "{occurrence}")?;
        }
        write!(f, "{}", self.day)
    }
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekDay::Sunday => write!(f, "{KW_DAY_SU}"),
            WeekDay::Monday => write!(f, "{KW_DAY_MO}"),
            WeekDay::Tuesday => write!(f, "{KW_DAY_TU}"),
            WeekDay::Wednesday => write!(f, "{KW_DAY_WE}"),
            WeekDay::Thursday => write!(f, "{KW_DAY_TH}"),
            WeekDay::Friday => write!(f, "{KW_DAY_FR}"),
            WeekDay::Saturday => write!(f, "{KW_DAY_SA}"),
        }
    }
}

impl From<WeekDay> for jiff::civil::Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Sunday => jiff::civil::Weekday::Sunday,
            WeekDay::Monday => jiff::civil::Weekday::Monday,
            WeekDay::Tuesday => jiff::civil::Weekday::Tuesday,
            WeekDay::Wednesday => jiff::civil::Weekday::Wednesday,
            WeekDay::Thursday => jiff::civil::Weekday::Thursday,
            WeekDay::Friday => jiff::civil::Weekday::Friday,
            WeekDay::Saturday => jiff::civil::Weekday::Saturday,
        }
    }
}

impl From<jiff::civil::Weekday> for WeekDay {
    fn from(day: jiff::civil::Weekday) -> Self {
        match day {
            jiff::civil::Weekday::Sunday => WeekDay::Sunday,
            jiff::civil::Weekday::Monday => WeekDay::Monday,
            jiff::civil::Weekday::Tuesday => WeekDay::Tuesday,
            jiff::civil::Weekday::Wednesday => WeekDay::Wednesday,
            jiff::civil::Weekday::Thursday => WeekDay::Thursday,
            jiff::civil::Weekday::Friday => WeekDay::Friday,
            jiff::civil::Weekday::Saturday => WeekDay::Saturday,
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
pub(crate) fn value_rrule<'src, I, E>() -> impl Parser<'src, I, RecurrenceRule, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    recur_rule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
        .try_map(build_from_parts::<I, E::Error>)
}

fn build_from_parts<'src, I, Err>(parts: Vec<Part>, span: I::Span) -> Result<RecurrenceRule, Err>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    Err: LabelError<'src, I, ValueExpected>,
{
    let dup = || Err::expected_found([ValueExpected::RRuleDuplicatePart], None, span);

    let mut freq = None;
    let mut rule = RecurrenceRule::new(RecurrenceFrequency::Daily);
    let mut interval = None;
    let mut wkst = None;

    for part in parts {
        match part {
            Part::Freq(f) if freq.is_none() => freq = Some(f),
            Part::Until(u) if rule.until.is_none() => rule.until = Some(u),
            Part::Count(c) if rule.count.is_none() => rule.count = Some(c),
            Part::Interval(i) if interval.is_none() => interval = Some(i),
            Part::BySecond(v) if rule.by_second.is_empty() => rule.by_second = v,
            Part::ByMinute(v) if rule.by_minute.is_empty() => rule.by_minute = v,
            Part::ByHour(v) if rule.by_hour.is_empty() => rule.by_hour = v,
            Part::ByMonthDay(v) if rule.by_month_day.is_empty() => rule.by_month_day = v,
            Part::ByYearDay(v) if rule.by_year_day.is_empty() => rule.by_year_day = v,
            Part::ByWeekNo(v) if rule.by_week_no.is_empty() => rule.by_week_no = v,
            Part::ByMonth(v) if rule.by_month.is_empty() => rule.by_month = v,
            Part::ByDay(v) if rule.by_day.is_empty() => rule.by_day = v,
            Part::BySetPos(v) if rule.by_set_pos.is_empty() => rule.by_set_pos = v,
            Part::Wkst(w) if wkst.is_none() => wkst = Some(w),
            _ => return Err(dup()),
        }
    }

    rule.freq =
        freq.ok_or_else(|| Err::expected_found([ValueExpected::RRuleRequiredFreq], None, span))?;

    if rule.until.is_some() && rule.count.is_some() {
        return Err(Err::expected_found(
            [ValueExpected::RRuleCountUntilExclusion],
            None,
            span,
        ));
    }

    rule.interval = interval.unwrap_or(1);
    rule.wkst = wkst.unwrap_or(WeekDay::Monday);
    Ok(rule)
}

#[derive(Debug, Clone)]
enum Part {
    Freq(RecurrenceFrequency),
    Until(RuleEnd),
    Count(u32),
    Interval(u32),
    BySecond(Vec<u8>),
    ByMinute(Vec<u8>),
    ByHour(Vec<u8>),
    ByMonthDay(Vec<i8>),
    ByYearDay(Vec<i16>),
    ByWeekNo(Vec<i8>),
    ByMonth(Vec<u8>),
    ByDay(Vec<WeekDayNum>),
    BySetPos(Vec<i16>),
    Wkst(WeekDay),
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn recur_rule_part<'src, I, E>() -> impl Parser<'src, I, Part, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let kw = |kw| just(kw).ignore_then(just('='));

    let freq = kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq);
    let until = kw(KW_RRULE_UNTIL).ignore_then(enddate()).map(Part::Until);
    let count = kw(KW_RRULE_COUNT)
        .ignore_then(u32_non_zero())
        .map(Part::Count);
    let interval = kw(KW_RRULE_INTERVAL)
        .ignore_then(u32_non_zero())
        .map(Part::Interval);
    let by_second = kw(KW_RRULE_BYSECOND)
        .ignore_then(byseclist())
        .map(Part::BySecond);
    let by_minute = kw(KW_RRULE_BYMINUTE)
        .ignore_then(byminlist())
        .map(Part::ByMinute);
    let by_hour = kw(KW_RRULE_BYHOUR)
        .ignore_then(byhrlist())
        .map(Part::ByHour);
    let by_day = kw(KW_RRULE_BYDAY)
        .ignore_then(bywdaylist())
        .map(Part::ByDay);
    let by_month_day = kw(KW_RRULE_BYMONTHDAY)
        .ignore_then(bymodaylist())
        .map(Part::ByMonthDay);
    let by_year_day = kw(KW_RRULE_BYYEARDAY)
        .ignore_then(byyrdaylist())
        .map(Part::ByYearDay);
    let by_week_no = kw(KW_RRULE_BYWEEKNO)
        .ignore_then(bywknolist())
        .map(Part::ByWeekNo);
    let by_month = kw(KW_RRULE_BYMONTH)
        .ignore_then(bymolist())
        .map(Part::ByMonth);
    let by_set_pos = kw(KW_RRULE_BYSETPOS)
        .ignore_then(bysplist())
        .map(Part::BySetPos);
    let wkst = kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst);

    choice((
        freq,
        until,
        count,
        interval,
        by_second,
        by_minute,
        by_hour,
        by_day,
        by_month_day,
        by_year_day,
        by_week_no,
        by_month,
        by_set_pos,
        wkst,
    ))
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src, I, E>() -> impl Parser<'src, I, RecurrenceFrequency, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_RRULE_FREQ_SECONDLY).to(RecurrenceFrequency::Secondly),
        just(KW_RRULE_FREQ_MINUTELY).to(RecurrenceFrequency::Minutely),
        just(KW_RRULE_FREQ_HOURLY).to(RecurrenceFrequency::Hourly),
        just(KW_RRULE_FREQ_DAILY).to(RecurrenceFrequency::Daily),
        just(KW_RRULE_FREQ_WEEKLY).to(RecurrenceFrequency::Weekly),
        just(KW_RRULE_FREQ_MONTHLY).to(RecurrenceFrequency::Monthly),
        just(KW_RRULE_FREQ_YEARLY).to(RecurrenceFrequency::Yearly),
    ))
}

/// ```txt
/// enddate     = date / date-time
/// ```
///
/// The two forms are kept apart: a bare date bounds at day granularity.
fn enddate<'src, I, E>() -> impl Parser<'src, I, RuleEnd, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    choice((
        value_date_time().map(RuleEnd::DateTime),
        value_date().map(RuleEnd::Date),
    ))
}

/// ```txt
/// byseclist   = ( seconds *("," seconds) )
/// ```
fn byseclist<'src, I, E>() -> impl Parser<'src, I, Vec<u8>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    seconds().separated_by(just(',')).collect()
}

/// ```txt
/// seconds     = 1*2DIGIT       ;0 to 60
/// ```
fn seconds<'src, I, E>() -> impl Parser<'src, I, u8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| a * 10 + b), // 00-59
        just("60").to(60),                                // 60
        u8_0_9(),                                         // 0-9
    ))
}

/// ```txt
/// byminlist   = ( minutes *("," minutes) )
/// ```
fn byminlist<'src, I, E>() -> impl Parser<'src, I, Vec<u8>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    minutes().separated_by(just(',')).collect()
}

/// ```txt
/// minutes     = 1*2DIGIT       ;0 to 59
/// ```
fn minutes<'src, I, E>() -> impl Parser<'src, I, u8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| a * 10 + b), // 00-59
        u8_0_9(),                                         // 0-9
    ))
}

/// ```txt
/// byhrlist    = ( hour *("," hour) )
/// ```
fn byhrlist<'src, I, E>() -> impl Parser<'src, I, Vec<u8>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    hour().separated_by(just(',')).collect()
}

/// ```txt
/// hour        = 1*2DIGIT       ;0 to 23
/// ```
fn hour<'src, I, E>() -> impl Parser<'src, I, u8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_1().then(u8_0_9()).map(|(a, b)| a * 10 + b), // 00-19
        just('2').ignore_then(u8_0_3()).map(|b| 20 + b),  // 20-23
        u8_0_9(),                                         // 0-9
    ))
}

/// ```txt
/// bywdaylist  = ( weekdaynum *("," weekdaynum) )
/// ```
fn bywdaylist<'src, I, E>() -> impl Parser<'src, I, Vec<WeekDayNum>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    weekdaynum().separated_by(just(',')).collect()
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// plus        = "+"
/// minus       = "-"
/// ```
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekDayNum, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordwk())
        .map(|(positive, n)| if positive { n } else { -n })
        .or_not()
        .then(weekday())
        .map(|(occurrence, day)| WeekDayNum { day, occurrence })
}

/// ```txt
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn ordwk<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        i8_1_4().then(i8_0_9()).map(|(a, b)| a * 10 + b), // 10-49
        just('5').ignore_then(i8_0_3()).map(|a| 50 + a),  // 50-53
        just('0').ignore_then(i8_1_9()),                  // 01-09
        i8_1_9(),                                         // 1-9
    ))
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, WeekDay, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_DAY_SU).to(WeekDay::Sunday),
        just(KW_DAY_MO).to(WeekDay::Monday),
        just(KW_DAY_TU).to(WeekDay::Tuesday),
        just(KW_DAY_WE).to(WeekDay::Wednesday),
        just(KW_DAY_TH).to(WeekDay::Thursday),
        just(KW_DAY_FR).to(WeekDay::Friday),
        just(KW_DAY_SA).to(WeekDay::Saturday),
    ))
}

/// ```txt
/// bymodaylist = ( monthdaynum *("," monthdaynum) )
/// ```
fn bymodaylist<'src, I, E>() -> impl Parser<'src, I, Vec<i8>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    monthdaynum().separated_by(just(',')).collect()
}

/// ```txt
/// monthdaynum = [plus / minus] ordmoday
/// ```
fn monthdaynum<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordmoday())
        .map(|(positive, n)| if positive { n } else { -n })
}

/// ```txt
/// ordmoday    = 1*2DIGIT       ;1 to 31
/// ```
fn ordmoday<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        i8_1_2().then(i8_0_9()).map(|(a, b)| a * 10 + b), // 10-29
        just('3').ignore_then(i8_0_1()).map(|a| 30 + a),  // 30-31
        just('0').or_not().ignore_then(i8_1_9()),         // 1-9 / 01-09
    ))
}

/// ```txt
/// byyrdaylist = ( yeardaynum *("," yeardaynum) )
/// ```
fn byyrdaylist<'src, I, E>() -> impl Parser<'src, I, Vec<i16>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    yeardaynum().separated_by(just(',')).collect()
}

/// ```txt
/// yeardaynum  = [plus / minus] ordyrday
/// ```
fn yeardaynum<'src, I, E>() -> impl Parser<'src, I, i16, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordyrday())
        .map(|(positive, n)| if positive { n } else { -n })
}

/// ```txt
/// ordyrday    = 1*3DIGIT      ;1 to 366
/// ```
fn ordyrday<'src, I, E>() -> impl Parser<'src, I, i16, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let i16_1_99 = i16_1_9().then(i16_0_9().or_not()).map(|(a, b)| match b {
        Some(b) => a * 10 + b, // 10-99
        None => a,             // 1-9
    });

    choice((
        just('3').ignore_then(choice((
            just('6').ignore_then(i16_0_6()).map(|a| 360 + a), // 360-366
            i16_0_5().then(i16_0_9()).map(|(a, b)| 300 + a * 10 + b), // 300-359
        ))),
        i16_1_2()
            .then(i16_0_9())
            .then(i16_0_9())
            .map(|((a, b), c)| a * 100 + b * 10 + c), // 100-299
        just('0').or_not().ignore_then(choice((
            just('0').ignore_then(i16_0_9()), // 01-09 / 001-009
            i16_1_99,                         // 1-9 / 10-99 / 01-09 / 010-099
        ))),
    ))
}

/// ```txt
/// bywknolist  = ( weeknum *("," weeknum) )
/// ```
fn bywknolist<'src, I, E>() -> impl Parser<'src, I, Vec<i8>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    weeknum().separated_by(just(',')).collect()
}

/// ```txt
/// weeknum     = [plus / minus] ordwk
/// ```
fn weeknum<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordwk())
        .map(|(positive, n)| if positive { n } else { -n })
}

/// ```txt
/// bymolist    = ( monthnum *("," monthnum) )
/// ```
fn bymolist<'src, I, E>() -> impl Parser<'src, I, Vec<u8>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    monthnum().separated_by(just(',')).collect()
}

/// ```txt
/// monthnum    = 1*2DIGIT       ;1 to 12
/// ```
fn monthnum<'src, I, E>() -> impl Parser<'src, I, u8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just('0').ignore_then(u8_1_9()),                 // 01-09
        just('1').ignore_then(u8_0_2()).map(|a| 10 + a), // 10-12
        u8_1_9(),                                        // 1-9
    ))
}

/// ```txt
/// bysplist    = ( setposday *("," setposday) )
/// setposday   = yeardaynum
/// ```
fn bysplist<'src, I, E>() -> impl Parser<'src, I, Vec<i16>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    yeardaynum().separated_by(just(',')).collect()
}

#[cfg(test)]
mod tests {
    use chumsky::extra;
    use chumsky::input::Stream;

    use super::*;
    use crate::value::datetime::{ValueDate, ValueTime};

    fn parse(src: &'_ str) -> Result<RecurrenceRule, Vec<Rich<'_, char>>> {
        let stream = Stream::from_iter(src.chars());
        value_rrule::<'_, _, extra::Err<_>>()
            .parse(stream)
            .into_result()
    }

    #[test]
    fn parses_rrule_freq_only() {
        let freqs = [
            ("FREQ=SECONDLY", RecurrenceFrequency::Secondly),
            ("FREQ=MINUTELY", RecurrenceFrequency::Minutely),
            ("FREQ=HOURLY", RecurrenceFrequency::Hourly),
            ("FREQ=DAILY", RecurrenceFrequency::Daily),
            ("FREQ=WEEKLY", RecurrenceFrequency::Weekly),
            ("FREQ=MONTHLY", RecurrenceFrequency::Monthly),
            ("FREQ=YEARLY", RecurrenceFrequency::Yearly),
        ];

        for (src, expected_freq) in freqs {
            let result = parse(src).unwrap();
            assert_eq!(result.freq, expected_freq, "Failed for {src}");
            assert!(result.until.is_none());
            assert!(result.count.is_none());
            assert_eq!(result.interval, 1);
            assert_eq!(result.wkst, WeekDay::Monday);
        }
    }

    #[test]
    fn parses_rrule_with_interval() {
        let result = parse("FREQ=DAILY;INTERVAL=2").unwrap();
        assert_eq!(result.freq, RecurrenceFrequency::Daily);
        assert_eq!(result.interval, 2);
    }

    #[test]
    fn parses_rrule_with_until_datetime() {
        let result = parse("FREQ=DAILY;UNTIL=19971224T000000Z").unwrap();
        assert_eq!(result.freq, RecurrenceFrequency::Daily);

        let RuleEnd::DateTime(until) = result.until.unwrap() else {
            panic!("date-time UNTIL expected");
        };
        assert_eq!(until.date.year, 1997);
        assert_eq!(until.date.month, 12);
        assert_eq!(until.date.day, 24);
        assert!(until.time.utc);
    }

    #[test]
    fn parses_rrule_with_until_date() {
        // a bare date stays a date, it is not widened to midnight
        let result = parse("FREQ=DAILY;UNTIL=19971224").unwrap();
        let RuleEnd::Date(until) = result.until.unwrap() else {
            panic!("date UNTIL expected");
        };
        assert_eq!(until.year, 1997);
        assert_eq!(until.month, 12);
        assert_eq!(until.day, 24);
    }

    #[test]
    fn parses_rrule_with_count() {
        let result = parse("FREQ=DAILY;COUNT=10").unwrap();
        assert_eq!(result.freq, RecurrenceFrequency::Daily);
        assert_eq!(result.count, Some(10));
    }

    #[test]
    fn parses_rrule_with_byday() {
        // Simple days
        let result = parse("FREQ=WEEKLY;BYDAY=MO,WE,FR").unwrap();
        assert_eq!(result.by_day.len(), 3);

        let first = result.by_day.first().unwrap();
        assert_eq!(first.day, WeekDay::Monday);
        assert_eq!(first.occurrence, None);
        assert_eq!(result.by_day.get(1).unwrap().day, WeekDay::Wednesday);
        assert_eq!(result.by_day.get(2).unwrap().day, WeekDay::Friday);

        // With occurrence
        let result = parse("FREQ=MONTHLY;BYDAY=1MO,-1MO").unwrap();
        assert_eq!(result.by_day.len(), 2);

        let first = result.by_day.first().unwrap();
        assert_eq!(first.day, WeekDay::Monday);
        assert_eq!(first.occurrence, Some(1));

        let second = result.by_day.get(1).unwrap();
        assert_eq!(second.day, WeekDay::Monday);
        assert_eq!(second.occurrence, Some(-1));
    }

    #[test]
    fn parses_rrule_with_time_filters() {
        let result = parse("FREQ=DAILY;BYHOUR=9,10,11,12,13,14,15,16").unwrap();
        assert_eq!(result.by_hour, vec![9, 10, 11, 12, 13, 14, 15, 16]);

        let result = parse("FREQ=DAILY;BYMINUTE=0,20,40").unwrap();
        assert_eq!(result.by_minute, vec![0, 20, 40]);

        let result = parse("FREQ=HOURLY;BYSECOND=0,15,30,45").unwrap();
        assert_eq!(result.by_second, vec![0, 15, 30, 45]);
    }

    #[test]
    fn parses_rrule_with_date_parts() {
        let result = parse("FREQ=MONTHLY;BYMONTHDAY=1,15,-1").unwrap();
        assert_eq!(result.by_month_day, vec![1, 15, -1]);

        let result = parse("FREQ=YEARLY;BYYEARDAY=1,100,200,-1").unwrap();
        assert_eq!(result.by_year_day, vec![1, 100, 200, -1]);

        let result = parse("FREQ=YEARLY;BYWEEKNO=20,21,-1").unwrap();
        assert_eq!(result.by_week_no, vec![20, 21, -1]);

        let result = parse("FREQ=YEARLY;BYMONTH=1,2,3").unwrap();
        assert_eq!(result.by_month, vec![1, 2, 3]);
    }

    #[test]
    fn parses_rrule_with_bysetpos() {
        let result = parse("FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1").unwrap();
        assert_eq!(result.by_set_pos, vec![-1]);
    }

    #[test]
    fn parses_rrule_with_wkst() {
        let result = parse("FREQ=WEEKLY;WKST=SU").unwrap();
        assert_eq!(result.wkst, WeekDay::Sunday);
    }

    #[test]
    fn parses_rrule_complex() {
        // Example from RFC 5545
        let src = "FREQ=YEARLY;INTERVAL=2;BYMONTH=1;BYDAY=SU;BYHOUR=8,9;BYMINUTE=30";
        let result = parse(src).unwrap();
        assert_eq!(result.freq, RecurrenceFrequency::Yearly);
        assert_eq!(result.interval, 2);
        assert_eq!(result.by_month, vec![1]);
        assert_eq!(result.by_day.len(), 1);
        assert_eq!(result.by_day.first().unwrap().day, WeekDay::Sunday);
        assert_eq!(result.by_hour, vec![8, 9]);
        assert_eq!(result.by_minute, vec![30]);
    }

    #[test]
    fn rejects_missing_freq() {
        assert!(parse("INTERVAL=2;COUNT=10").is_err(), "Missing FREQ should fail");
    }

    #[test]
    fn rejects_until_and_count_together() {
        let src = "FREQ=DAILY;UNTIL=19971224T000000Z;COUNT=10";
        assert!(parse(src).is_err(), "UNTIL and COUNT together should fail");
    }

    #[test]
    fn handles_reordered_parts() {
        let result = parse("COUNT=10;INTERVAL=2;FREQ=DAILY").unwrap();
        assert_eq!(result.freq, RecurrenceFrequency::Daily);
        assert_eq!(result.count, Some(10));
        assert_eq!(result.interval, 2);
    }

    #[test]
    fn rejects_duplicate_parts() {
        let test_cases = [
            ("FREQ=DAILY;FREQ=WEEKLY", "FREQ"),
            (
                "FREQ=DAILY;UNTIL=19971224T000000Z;UNTIL=19971225T000000Z",
                "UNTIL",
            ),
            ("FREQ=DAILY;COUNT=10;COUNT=20", "COUNT"),
            ("FREQ=DAILY;INTERVAL=1;INTERVAL=2", "INTERVAL"),
            ("FREQ=WEEKLY;BYDAY=MO;BYDAY=FR", "BYDAY"),
            ("FREQ=DAILY;BYHOUR=9;BYHOUR=10", "BYHOUR"),
        ];

        for (src, part_name) in test_cases {
            assert!(
                parse(src).is_err(),
                "Duplicate {part_name} should fail for input: {src}"
            );
        }
    }

    #[test]
    fn rejects_zero_count_and_interval() {
        assert!(parse("FREQ=DAILY;COUNT=0").is_err(), "COUNT=0 should fail");
        assert!(
            parse("FREQ=DAILY;INTERVAL=0").is_err(),
            "INTERVAL=0 should fail"
        );
    }

    #[test]
    fn builder_enforces_count_until_exclusion() {
        let until = ValueDateTime {
            date: ValueDate {
                year: 2026,
                month: 1,
                day: 1,
            },
            time: ValueTime::new(0, 0, 0, true),
        };

        let rule = RecurrenceRule::new(RecurrenceFrequency::Daily)
            .with_count(3)
            .unwrap();
        assert_eq!(rule.with_until(until), Err(RuleError::CountAndUntil));

        let rule = RecurrenceRule::new(RecurrenceFrequency::Daily)
            .with_until(until)
            .unwrap();
        assert_eq!(rule.with_count(3), Err(RuleError::CountAndUntil));

        let rule = RecurrenceRule::new(RecurrenceFrequency::Daily);
        assert_eq!(rule.with_count(0), Err(RuleError::ZeroCount));
        let rule = RecurrenceRule::new(RecurrenceFrequency::Daily);
        assert_eq!(rule.with_interval(0), Err(RuleError::ZeroInterval));
    }

    #[test]
    fn displays_normalized_order() {
        let cases = [
            ("FREQ=DAILY;COUNT=10", "FREQ=DAILY;COUNT=10"),
            ("COUNT=10;INTERVAL=2;FREQ=DAILY", "FREQ=DAILY;COUNT=10;INTERVAL=2"),
            (
                "FREQ=YEARLY;BYDAY=SU;BYMONTH=1;INTERVAL=2;BYHOUR=8,9",
                "FREQ=YEARLY;INTERVAL=2;BYHOUR=8,9;BYDAY=SU;BYMONTH=1",
            ),
            ("FREQ=WEEKLY;WKST=SU;BYDAY=MO,-1FR", "FREQ=WEEKLY;BYDAY=MO,-1FR;WKST=SU"),
            // defaults omitted
            ("FREQ=WEEKLY;INTERVAL=1;WKST=MO", "FREQ=WEEKLY"),
            (
                "FREQ=DAILY;UNTIL=19971224T000000Z",
                "FREQ=DAILY;UNTIL=19971224T000000Z",
            ),
            ("FREQ=DAILY;UNTIL=19971224", "FREQ=DAILY;UNTIL=19971224"),
        ];
        for (src, expected) in cases {
            assert_eq!(parse(src).unwrap().to_string(), expected, "Failed for {src}");
        }
    }

    #[test]
    fn display_round_trips_field_wise() {
        let sources = [
            "FREQ=YEARLY;INTERVAL=2;BYMONTH=1;BYDAY=SU;BYHOUR=8,9;BYMINUTE=30",
            "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1",
            "FREQ=WEEKLY;COUNT=6;BYDAY=MO,WE,FR",
            "FREQ=YEARLY;BYWEEKNO=20;WKST=SU",
        ];
        for src in sources {
            let rule = parse(src).unwrap();
            let reparsed = parse(&rule.to_string()).unwrap();
            assert_eq!(rule, reparsed, "Display of {src} should reparse equal");
        }
    }
}
