use crate::types::Lifespan;

use chrono::NaiveDate;

/// The one date format both the producer and consumer sides agree on.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, thiserror::Error)]
pub enum LifespanError {
    #[error("Failed to parse date '{0}': expected YYYY-MM-DD")]
    DateParse(String),
    #[error("Death date {death} precedes birth date {birth}")]
    NegativeSpan { birth: NaiveDate, death: NaiveDate },
}

/// Computes the age at death from two `YYYY-MM-DD` strings.
///
/// Whole years are `floor(D / 365.25)` over the calendar day difference `D`;
/// the leftover is `D mod 365.25` rounded to the nearest day. Every caller
/// goes through here so producer and consumer can never disagree on the
/// arithmetic.
pub fn age_at_death(birth: &str, death: &str) -> Result<Lifespan, LifespanError> {
    let birth_date = parse_date(birth)?;
    let death_date = parse_date(death)?;

    let total_days = (death_date - birth_date).num_days();
    if total_days < 0 {
        return Err(LifespanError::NegativeSpan {
            birth: birth_date,
            death: death_date,
        });
    }

    let years = (total_days as f64 / DAYS_PER_YEAR).floor() as i64;
    let days = (total_days as f64 % DAYS_PER_YEAR).round() as i64;

    Ok(Lifespan { years, days })
}

fn parse_date(date: &str) -> Result<NaiveDate, LifespanError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| LifespanError::DateParse(date.to_string()))
}
