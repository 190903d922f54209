//! Parse search bar queries like `kind:park created:>=2021-01-01 "La Dame du Lac"` into a list
//! of typed filters, and render them back into the same text.
//!
//! ```
//! use spot_query::prelude::*;
//!
//! let query = parse_query("kind:indoor_parkour_park images:1..10 wall").unwrap();
//! assert_eq!(
//!     query.filters(),
//!     &[
//!         Filter::Kind("indoor_parkour_park".into()),
//!         Filter::ImagesCount(Ordered::Between(1, 10)),
//!         Filter::Word("wall".into()),
//!     ]
//! );
//! assert_eq!(query.to_string(), "kind:indoor_parkour_park images:1..10 wall");
//! ```

mod error;
pub mod parser;
pub mod query;
pub mod tagged;
pub mod token;

#[cfg(feature = "serde")]
mod serde;

pub use error::*;

pub mod prelude {
    pub use crate::query::{Filter, Qualifier, Query};
    pub use crate::tagged::Tagged;
    pub use crate::token::*;
    pub use crate::{parse_filter, parse_query, validate, Error, Expected, ValueKind};
}

pub use ::chumsky;

use chumsky::prelude::*;
use query::{Filter, Query};
use std::str::FromStr;
use tracing::{debug, trace};

fn failure(input: &str, errors: Vec<Simple<'_, char>>) -> Error {
    let position = errors
        .iter()
        .map(|err| err.span().start)
        .max()
        .unwrap_or_default();
    Error::parse(input, position)
}

/// Parse a complete query. Empty or blank input gives an empty query.
pub fn parse_query(input: &str) -> Result<Query, Error> {
    match parser::parser().parse(input).into_result() {
        Ok(query) => {
            trace!(input, filters = query.len(), "Parsed query");
            Ok(query)
        }
        Err(errors) => {
            let err = failure(input, errors);
            debug!(input, %err, "Rejected query");
            Err(err)
        }
    }
}

/// Check if the input is a valid query.
pub fn validate(input: &str) -> bool {
    parse_query(input).is_ok()
}

/// Parse exactly one filter, without any surrounding whitespace.
pub fn parse_filter(input: &str) -> Result<Filter, Error> {
    parser::single_filter()
        .parse(input)
        .into_result()
        .map_err(|errors| {
            let err = failure(input, errors);
            debug!(input, %err, "Rejected filter");
            err
        })
}

impl FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_query(s)
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_filter(s)
    }
}
