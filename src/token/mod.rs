mod date;

pub use self::date::*;

use std::fmt::{Display, Formatter};
use std::ops::{Bound, RangeBounds, RangeInclusive};

/// A comparison against one value, or an interval between two.
///
/// * `images:3` (equal)
/// * `images:>=3` (greater than or equal to 3)
/// * `images:1..10` (between 1 and 10, both inclusive)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ordered<T> {
    Equal(T),
    Less(T),
    Greater(T),
    LessEqual(T),
    GreaterEqual(T),
    Between(T, T),
}

impl<T> Ordered<T> {
    pub fn from_range(range: RangeInclusive<T>) -> Self {
        let (from, to) = range.into_inner();
        Ordered::Between(from, to)
    }
}

impl<T> RangeBounds<T> for Ordered<T> {
    fn start_bound(&self) -> Bound<&T> {
        match self {
            Ordered::Equal(value) | Ordered::GreaterEqual(value) => Bound::Included(value),
            Ordered::Greater(value) => Bound::Excluded(value),
            Ordered::Between(from, _) => Bound::Included(from),
            Ordered::Less(_) | Ordered::LessEqual(_) => Bound::Unbounded,
        }
    }

    fn end_bound(&self) -> Bound<&T> {
        match self {
            Ordered::Equal(value) | Ordered::LessEqual(value) => Bound::Included(value),
            Ordered::Less(value) => Bound::Excluded(value),
            Ordered::Between(_, to) => Bound::Included(to),
            Ordered::Greater(_) | Ordered::GreaterEqual(_) => Bound::Unbounded,
        }
    }
}

impl<T: Display> Display for Ordered<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Ordered::Equal(value) => write!(f, "{value}"),
            Ordered::Less(value) => write!(f, "<{value}"),
            Ordered::Greater(value) => write!(f, ">{value}"),
            Ordered::LessEqual(value) => write!(f, "<={value}"),
            Ordered::GreaterEqual(value) => write!(f, ">={value}"),
            Ordered::Between(from, to) => write!(f, "{from}..{to}"),
        }
    }
}

/// A boolean which can also ask for "only" the matching entries: `draft:only`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExtendedBool {
    Bool(bool),
    Only,
}

impl From<bool> for ExtendedBool {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl Display for ExtendedBool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Only => f.write_str("only"),
        }
    }
}

/// Reference to a user, either by id or by `@name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum User {
    /// 36 characters of hex digits and dashes
    UserId(String),
    /// Rendered with a leading `@`
    Username(String),
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserId(id) => f.write_str(id),
            Self::Username(name) => write!(f, "@{name}"),
        }
    }
}
