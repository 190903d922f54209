use crate::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// A date as typed by the user, together with the calendar date it denotes.
///
/// The text is kept verbatim so that rendering gives back exactly what was parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DateToken {
    value: String,
    date: Date,
}

impl DateToken {
    pub fn new(value: impl Into<String>) -> Result<Self, Error> {
        let value = value.into();
        let date = parse_date(&value).ok_or_else(|| Error::Date(value.clone()))?;
        Ok(Self { value, date })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn date(&self) -> Date {
        self.date
    }
}

fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .or_else(|_| OffsetDateTime::parse(value, &Rfc3339).map(|datetime| datetime.date()))
        .or_else(|_| Date::parse(value, &Iso8601::DEFAULT))
        .ok()
}

impl FromStr for DateToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for DateToken {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Display for DateToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
