use chrono::Month;
use serde::{Deserialize, Serialize};

use campuserp_core::{DomainError, DomainResult};
use campuserp_students::Student;

/// A semester's tuition rate covers exactly this many months.
pub const TUITION_MONTHS_PER_SEMESTER: i64 = 6;

/// Named fee category driving which calculation rule applies.
///
/// Only tuition and admission carry a rule of their own; every other head
/// bills zero unless an explicit override amount is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeHead {
    Tuition,
    Admission,
    Exam,
    Library,
    Transport,
}

impl core::fmt::Display for FeeHead {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            FeeHead::Tuition => "Tuition Fee",
            FeeHead::Admission => "Admission Fee",
            FeeHead::Exam => "Exam Fee",
            FeeHead::Library => "Library Fee",
            FeeHead::Transport => "Transport Fee",
        };
        f.write_str(name)
    }
}

/// Parse a month given as a full English name (case-insensitive).
pub fn parse_month(name: &str) -> DomainResult<Month> {
    let month = match name.trim().to_ascii_lowercase().as_str() {
        "january" => Month::January,
        "february" => Month::February,
        "march" => Month::March,
        "april" => Month::April,
        "may" => Month::May,
        "june" => Month::June,
        "july" => Month::July,
        "august" => Month::August,
        "september" => Month::September,
        "october" => Month::October,
        "november" => Month::November,
        "december" => Month::December,
        other => {
            return Err(DomainError::validation(format!("unknown month '{other}'")));
        }
    };
    Ok(month)
}

/// Inclusive month range; `to` before `from` wraps around year-end, so
/// December→February is a valid 3-month range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub from: Month,
    pub to: Month,
}

impl MonthRange {
    pub fn new(from: Month, to: Month) -> Self {
        Self { from, to }
    }

    pub fn count(&self) -> i64 {
        month_count(self.from, self.to)
    }
}

/// Number of months in the inclusive range, wrapping across year-end.
pub fn month_count(from: Month, to: Month) -> i64 {
    let from = from.number_from_month() as i64;
    let to = to.number_from_month() as i64;
    if to >= from {
        to - from + 1
    } else {
        (12 - from) + to + 1
    }
}

/// Integer division by the semester month count, rounding half up.
fn monthly_tuition(semester_rate: i64) -> i64 {
    (semester_rate + TUITION_MONTHS_PER_SEMESTER / 2) / TUITION_MONTHS_PER_SEMESTER
}

/// Billable amount for one student.
///
/// Rules, in priority order:
/// 1. a strictly positive override is used verbatim regardless of head;
/// 2. tuition bills the monthly rate (semester rate over six months) times
///    the month count;
/// 3. admission bills the admission rate verbatim, ignoring the range;
/// 4. every other head bills zero.
pub fn assess_fee(
    student: &Student,
    head: FeeHead,
    override_amount: Option<i64>,
    range: MonthRange,
) -> i64 {
    if let Some(amount) = override_amount {
        if amount > 0 {
            return amount;
        }
    }

    match head {
        FeeHead::Tuition => monthly_tuition(student.rates.tuition_fee) * range.count(),
        FeeHead::Admission => student.rates.admission_fee,
        FeeHead::Exam | FeeHead::Library | FeeHead::Transport => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campuserp_core::AdmissionNo;
    use campuserp_students::FeeRates;
    use proptest::prelude::*;

    fn student(tuition: i64, admission: i64) -> Student {
        let mut s = Student::new(AdmissionNo::new("A-1").unwrap(), "Test");
        s.rates = FeeRates {
            tuition_fee: tuition,
            admission_fee: admission,
            ..FeeRates::default()
        };
        s
    }

    #[test]
    fn month_count_examples() {
        assert_eq!(month_count(Month::January, Month::June), 6);
        assert_eq!(month_count(Month::November, Month::February), 4);
        assert_eq!(month_count(Month::March, Month::March), 1);
        assert_eq!(month_count(Month::December, Month::February), 3);
    }

    #[test]
    fn tuition_spreads_semester_rate_over_six_months() {
        let s = student(60_000, 5_000);
        let range = MonthRange::new(Month::January, Month::June);
        assert_eq!(assess_fee(&s, FeeHead::Tuition, None, range), 60_000);

        let one_month = MonthRange::new(Month::March, Month::March);
        assert_eq!(assess_fee(&s, FeeHead::Tuition, None, one_month), 10_000);
    }

    #[test]
    fn tuition_rounding_is_half_up() {
        // 50_000 / 6 = 8333.33… → 8333 per month.
        let s = student(50_000, 0);
        let one_month = MonthRange::new(Month::March, Month::March);
        assert_eq!(assess_fee(&s, FeeHead::Tuition, None, one_month), 8_333);

        // 45_003 / 6 = 7500.5 → 7501.
        let s = student(45_003, 0);
        assert_eq!(assess_fee(&s, FeeHead::Tuition, None, one_month), 7_501);
    }

    #[test]
    fn positive_override_wins_regardless_of_head() {
        let s = student(60_000, 5_000);
        let range = MonthRange::new(Month::January, Month::June);
        for head in [FeeHead::Tuition, FeeHead::Admission, FeeHead::Exam] {
            assert_eq!(assess_fee(&s, head, Some(5_000), range), 5_000);
        }
    }

    #[test]
    fn zero_or_negative_override_is_ignored() {
        let s = student(60_000, 5_000);
        let range = MonthRange::new(Month::January, Month::June);
        assert_eq!(assess_fee(&s, FeeHead::Tuition, Some(0), range), 60_000);
        assert_eq!(assess_fee(&s, FeeHead::Tuition, Some(-10), range), 60_000);
    }

    #[test]
    fn admission_ignores_the_month_range() {
        let s = student(60_000, 5_000);
        let wide = MonthRange::new(Month::January, Month::December);
        let narrow = MonthRange::new(Month::March, Month::March);
        assert_eq!(assess_fee(&s, FeeHead::Admission, None, wide), 5_000);
        assert_eq!(assess_fee(&s, FeeHead::Admission, None, narrow), 5_000);
    }

    #[test]
    fn other_heads_bill_zero_without_override() {
        let s = student(60_000, 5_000);
        let range = MonthRange::new(Month::January, Month::June);
        assert_eq!(assess_fee(&s, FeeHead::Library, None, range), 0);
    }

    #[test]
    fn parse_month_accepts_any_case() {
        assert_eq!(parse_month("january").unwrap(), Month::January);
        assert_eq!(parse_month(" DECEMBER ").unwrap(), Month::December);
        assert!(parse_month("Janury").is_err());
    }

    proptest! {
        /// Any month range, wrapped or not, counts between 1 and 12 months.
        #[test]
        fn month_count_is_bounded(from in 1u32..=12, to in 1u32..=12) {
            let from = Month::try_from(from as u8).unwrap();
            let to = Month::try_from(to as u8).unwrap();
            let n = month_count(from, to);
            prop_assert!((1..=12).contains(&n));
        }
    }
}
