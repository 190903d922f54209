use crate::token::{DateToken, ExtendedBool, Ordered, User};
use std::fmt::{Display, Formatter};

/// The names of the structured filters, `name:value`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Qualifier {
    Draft,
    Kind,
    Category,
    Creator,
    Created,
    Images,
    Properties,
}

impl Qualifier {
    pub const ALL: [Qualifier; 7] = [
        Self::Draft,
        Self::Kind,
        Self::Category,
        Self::Creator,
        Self::Created,
        Self::Images,
        Self::Properties,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Kind => "kind",
            Self::Category => "category",
            Self::Creator => "creator",
            Self::Created => "created",
            Self::Images => "images",
            Self::Properties => "properties",
        }
    }
}

impl Display for Qualifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One unit of a search query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Plain keyword: `park`
    Word(String),
    /// Phrase: `"La Dame du Lac"`
    QuotedString(String),
    /// `draft:true`, `draft:only`
    IsDraft(ExtendedBool),
    /// `kind:indoor_parkour_park`
    Kind(String),
    /// `category:spot`
    Category(String),
    /// `creator:@someone`
    Creator(User),
    /// `created:>=2021-01-01`
    Creation(Ordered<DateToken>),
    /// `images:1..10`
    ImagesCount(Ordered<u8>),
    /// `properties:benefit:>2`
    PropertiesCount { kind: String, range: Ordered<u8> },
    /// `properties:feature/big_wall:true`
    HasProperty { kind: String, id: String, value: bool },
}

impl Filter {
    /// The qualifier this filter was introduced with, if any.
    pub fn qualifier(&self) -> Option<Qualifier> {
        Some(match self {
            Self::Word(_) | Self::QuotedString(_) => return None,
            Self::IsDraft(_) => Qualifier::Draft,
            Self::Kind(_) => Qualifier::Kind,
            Self::Category(_) => Qualifier::Category,
            Self::Creator(_) => Qualifier::Creator,
            Self::Creation(_) => Qualifier::Created,
            Self::ImagesCount(_) => Qualifier::Images,
            Self::PropertiesCount { .. } | Self::HasProperty { .. } => Qualifier::Properties,
        })
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(qualifier) = self.qualifier() {
            write!(f, "{qualifier}:")?;
        }

        match self {
            Self::Word(word) => f.write_str(word),
            Self::QuotedString(text) => write!(f, r#""{text}""#),
            Self::IsDraft(draft) => write!(f, "{draft}"),
            Self::Kind(kind) => f.write_str(kind),
            Self::Category(category) => f.write_str(category),
            Self::Creator(user) => write!(f, "{user}"),
            Self::Creation(range) => write!(f, "{range}"),
            Self::ImagesCount(range) => write!(f, "{range}"),
            Self::PropertiesCount { kind, range } => write!(f, "{kind}:{range}"),
            Self::HasProperty { kind, id, value } => write!(f, "{kind}/{id}:{value}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Query {
    pub filters: Vec<Filter>,
}

impl Query {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }
}

impl From<Vec<Filter>> for Query {
    fn from(filters: Vec<Filter>) -> Self {
        Self { filters }
    }
}

impl FromIterator<Filter> for Query {
    fn from_iter<T: IntoIterator<Item = Filter>>(iter: T) -> Self {
        Self {
            filters: Vec::from_iter(iter),
        }
    }
}

impl IntoIterator for Query {
    type Item = Filter;
    type IntoIter = std::vec::IntoIter<Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.into_iter()
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{filter}")?;
        }
        Ok(())
    }
}
