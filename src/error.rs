use crate::parser::{is_date_char, single_filter};
use crate::query::Qualifier;
use crate::token::DateToken;
use chumsky::Parser;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `position` is a byte offset into the parsed input.
    #[error("Failed to parse at position {position}: expected {expected}")]
    Parse { position: usize, expected: Expected },
    #[error("Invalid date: {0}")]
    Date(String),
}

impl Error {
    pub(crate) fn parse(input: &str, position: usize) -> Self {
        let position = rejected_value(input, position).unwrap_or(position);
        Self::Parse {
            position,
            expected: Expected::at(input, position),
        }
    }
}

/// What the parser was looking for when it gave up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Expected {
    Qualifier,
    Separator,
    Value(ValueKind),
    EndOfInput,
    QuoteTerminator,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    ExtendedBool,
    Identifier,
    User,
    DateRange,
    CountRange,
    Property,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Qualifier => f.write_str("qualifier or word"),
            Self::Separator => f.write_str("whitespace"),
            Self::Value(kind) => write!(f, "{kind}"),
            Self::EndOfInput => f.write_str("end of input"),
            Self::QuoteTerminator => f.write_str("closing quote"),
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ExtendedBool => "true, false or only",
            Self::Identifier => "identifier",
            Self::User => "@username or user id",
            Self::DateRange => "date or date range",
            Self::CountRange => "count or count range",
            Self::Property => "property count or property flag",
        })
    }
}

impl From<Qualifier> for ValueKind {
    fn from(value: Qualifier) -> Self {
        match value {
            Qualifier::Draft => Self::ExtendedBool,
            Qualifier::Kind | Qualifier::Category => Self::Identifier,
            Qualifier::Creator => Self::User,
            Qualifier::Created => Self::DateRange,
            Qualifier::Images => Self::CountRange,
            Qualifier::Properties => Self::Property,
        }
    }
}

impl Expected {
    /// Classify a failure by looking at the filter which was being parsed at `position`.
    pub(crate) fn at(input: &str, position: usize) -> Self {
        let head = input.get(..position).unwrap_or(input);
        let rest = &input[head.len()..];

        if rest.starts_with(char::is_whitespace) {
            return Self::EndOfInput;
        }

        let filter = &head[filter_start(head)..];

        if let Some(quoted) = filter.strip_prefix('"') {
            return match quoted.contains('"') {
                true => Self::Separator,
                false => Self::QuoteTerminator,
            };
        }

        if filter.is_empty() {
            return Self::Qualifier;
        }

        // a complete filter, directly followed by more text
        if single_filter().parse(filter).into_result().is_ok() {
            return Self::Separator;
        }

        match qualified(filter) {
            Some((qualifier, _)) => Self::Value(qualifier.into()),
            None => Self::Separator,
        }
    }
}

/// Split a filter into its qualifier and the text after the `:`.
fn qualified(filter: &str) -> Option<(Qualifier, &str)> {
    Qualifier::ALL.into_iter().find_map(|qualifier| {
        filter
            .strip_prefix(qualifier.name())
            .and_then(|value| value.strip_prefix(':'))
            .map(|value| (qualifier, value))
    })
}

/// Start of a value ending at `position` which has the right characters, but was still
/// rejected: a date which isn't on the calendar, or a count above 255.
fn rejected_value(input: &str, position: usize) -> Option<usize> {
    let head = input.get(..position)?;
    let (qualifier, value) = qualified(&head[filter_start(head)..])?;

    let is_value_char: fn(char) -> bool = match qualifier {
        Qualifier::Created => |c| is_date_char(&c),
        Qualifier::Images | Qualifier::Properties => |c| c.is_ascii_digit(),
        _ => return None,
    };

    let value = &value[value.trim_end_matches(is_value_char).len()..];
    let valid = match qualifier {
        Qualifier::Created => DateToken::new(value).is_ok(),
        _ => value.parse::<u8>().is_ok(),
    };

    match value.is_empty() || valid {
        true => None,
        false => Some(position - value.len()),
    }
}

/// Offset of the filter the end of `head` belongs to.
fn filter_start(head: &str) -> usize {
    let mut start = 0;
    let mut quoted = false;
    let mut at_start = true;

    for (i, c) in head.char_indices() {
        if quoted {
            quoted = c != '"';
        } else if c.is_whitespace() {
            start = i + c.len_utf8();
            at_start = true;
        } else {
            quoted = at_start && c == '"';
            at_start = false;
        }
    }

    start
}
