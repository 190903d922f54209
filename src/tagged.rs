//! Diagnostic rendering which keeps the variant names.
//!
//! `Filter::Word("x")` and `Filter::Category("x")` render differently here (`word(x)` and
//! `category(x)`), while the canonical text form shows `x` and `category:x`.

use crate::query::{Filter, Query};
use crate::token::{Ordered, User};
use std::fmt::{Display, Formatter};

pub trait Tagged {
    fn fmt_tagged(&self, f: &mut Formatter<'_>) -> std::fmt::Result;

    fn tagged(&self) -> TaggedDisplay<'_, Self> {
        TaggedDisplay(self)
    }
}

pub struct TaggedDisplay<'a, T: ?Sized>(&'a T);

impl<T: Tagged + ?Sized> Display for TaggedDisplay<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt_tagged(f)
    }
}

impl<T: Display> Tagged for Ordered<T> {
    fn fmt_tagged(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Ordered::Equal(value) => write!(f, "eq({value})"),
            Ordered::Less(value) => write!(f, "lt({value})"),
            Ordered::Greater(value) => write!(f, "gt({value})"),
            Ordered::LessEqual(value) => write!(f, "le({value})"),
            Ordered::GreaterEqual(value) => write!(f, "ge({value})"),
            Ordered::Between(from, to) => write!(f, "between({from},{to})"),
        }
    }
}

impl Tagged for User {
    fn fmt_tagged(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            User::UserId(id) => write!(f, "user_id({id})"),
            User::Username(name) => write!(f, "username({name})"),
        }
    }
}

impl Tagged for Filter {
    fn fmt_tagged(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Word(word) => write!(f, "word({word})"),
            Filter::QuotedString(text) => write!(f, "quoted_string({text})"),
            Filter::IsDraft(draft) => write!(f, "is_draft({draft})"),
            Filter::Kind(kind) => write!(f, "kind({kind})"),
            Filter::Category(category) => write!(f, "category({category})"),
            Filter::Creator(user) => write!(f, "creator({})", user.tagged()),
            Filter::Creation(range) => write!(f, "creation({})", range.tagged()),
            Filter::ImagesCount(range) => write!(f, "images_count({})", range.tagged()),
            Filter::PropertiesCount { kind, range } => {
                write!(f, "properties_count({kind},{})", range.tagged())
            }
            Filter::HasProperty { kind, id, value } => {
                write!(f, "has_property({kind},{id},{value})")
            }
        }
    }
}

impl Tagged for Query {
    fn fmt_tagged(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            filter.fmt_tagged(f)?;
        }
        Ok(())
    }
}
