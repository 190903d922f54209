use crate::query::{Filter, Qualifier, Query};
use crate::token::{DateToken, ExtendedBool, Ordered, User};
use chumsky::prelude::*;

pub type Extra<'a> = extra::Err<Simple<'a, char>>;

fn invalid<'a>(span: SimpleSpan) -> Simple<'a, char> {
    <Simple<'a, char> as chumsky::error::Error<'a, &'a str>>::expected_found(None, None, span)
}

/// Zero or more whitespace characters.
pub fn whitespace<'a>() -> impl Parser<'a, &'a str, (), Extra<'a>> + Clone {
    any().filter(|c: &char| c.is_whitespace()).repeated()
}

/// One or more whitespace characters, between two filters.
pub fn separator<'a>() -> impl Parser<'a, &'a str, (), Extra<'a>> + Clone {
    any().filter(|c: &char| c.is_whitespace()).repeated().at_least(1)
}

pub fn boolean<'a>() -> impl Parser<'a, &'a str, bool, Extra<'a>> + Clone {
    just("true").to(true).or(just("false").to(false))
}

/// Decimal digits fitting into a `u8`, leading zeros are fine.
pub fn byte<'a>() -> impl Parser<'a, &'a str, u8, Extra<'a>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(|digits: &str, span| digits.parse::<u8>().map_err(|_| invalid(span)))
}

/// Letters, digits, `_`, `+` and `-`. May be empty.
pub fn ident<'a>() -> impl Parser<'a, &'a str, &'a str, Extra<'a>> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || matches!(c, '_' | '+' | '-'))
        .repeated()
        .to_slice()
}

pub fn quoted_string<'a>() -> impl Parser<'a, &'a str, &'a str, Extra<'a>> + Clone {
    just('"')
        .ignore_then(none_of('"').repeated().to_slice())
        .then_ignore(just('"'))
}

pub fn word<'a>() -> impl Parser<'a, &'a str, &'a str, Extra<'a>> + Clone {
    any()
        .filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .to_slice()
}

/// Anything up to the next whitespace or `.`, so that it can be used on both sides of `..`.
pub fn bounded_string<'a>() -> impl Parser<'a, &'a str, &'a str, Extra<'a>> + Clone {
    any()
        .filter(|c: &char| !(c.is_whitespace() || *c == '.'))
        .repeated()
        .to_slice()
}

pub fn extended_bool<'a>() -> impl Parser<'a, &'a str, ExtendedBool, Extra<'a>> + Clone {
    boolean()
        .map(ExtendedBool::Bool)
        .or(just("only").to(ExtendedBool::Only))
}

pub fn user_id<'a>() -> impl Parser<'a, &'a str, &'a str, Extra<'a>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_hexdigit() || *c == '-')
        .repeated()
        .exactly(36)
        .to_slice()
}

pub fn user<'a>() -> impl Parser<'a, &'a str, User, Extra<'a>> + Clone {
    just('@')
        .ignore_then(word())
        .map(|name: &str| User::Username(name.to_string()))
        .or(user_id().map(|id: &str| User::UserId(id.to_string())))
}

pub(crate) fn is_date_char(c: &char) -> bool {
    c.is_ascii_digit() || matches!(c, ':' | '+' | '-' | 'T' | 'W' | 'Z')
}

pub fn date<'a>() -> impl Parser<'a, &'a str, DateToken, Extra<'a>> + Clone {
    any()
        .filter(is_date_char)
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(|value: &str, span| DateToken::new(value).map_err(|_| invalid(span)))
}

/// Comparison or interval over the values of `value`.
///
/// Longer operators are tried first, so that `>=` is never read as `>` followed by `=`.
pub fn ordered<'a, T, P>(value: P) -> impl Parser<'a, &'a str, Ordered<T>, Extra<'a>> + Clone
where
    P: Parser<'a, &'a str, T, Extra<'a>> + Clone,
{
    choice((
        just(">=")
            .ignore_then(value.clone())
            .map(Ordered::GreaterEqual),
        just('>').ignore_then(value.clone()).map(Ordered::Greater),
        just("<=").ignore_then(value.clone()).map(Ordered::LessEqual),
        just('<').ignore_then(value.clone()).map(Ordered::Less),
        value
            .clone()
            .then_ignore(just(".."))
            .then(value.clone())
            .map(|(from, to)| Ordered::Between(from, to)),
        value.map(Ordered::Equal),
    ))
}

/// The qualifier name followed by its `:` separator.
pub fn keyword<'a>(qualifier: Qualifier) -> impl Parser<'a, &'a str, (), Extra<'a>> + Clone {
    just(qualifier.name()).then(just(':')).ignored()
}

/// Anything which starts a filter other than a plain word.
///
/// Once one of those matched, the filter must be parsed by the matching grammar, and a
/// failure there can't fall back to reading the text as a word.
fn committed_prefix<'a>() -> impl Parser<'a, &'a str, (), Extra<'a>> + Clone {
    choice((
        just('"').ignored(),
        keyword(Qualifier::Draft),
        keyword(Qualifier::Kind),
        keyword(Qualifier::Category),
        keyword(Qualifier::Creator),
        keyword(Qualifier::Created),
        keyword(Qualifier::Images),
        keyword(Qualifier::Properties),
    ))
}

fn properties<'a>() -> impl Parser<'a, &'a str, Filter, Extra<'a>> + Clone {
    let count = ident()
        .then_ignore(just(':'))
        .then(ordered(byte()))
        .map(|(kind, range)| Filter::PropertiesCount {
            kind: kind.to_string(),
            range,
        });

    let flag = ident()
        .then_ignore(just('/'))
        .then(ident())
        .then_ignore(just(':'))
        .then(boolean())
        .map(|((kind, id), value)| Filter::HasProperty {
            kind: kind.to_string(),
            id: id.to_string(),
            value,
        });

    count.or(flag)
}

pub fn filter<'a>() -> impl Parser<'a, &'a str, Filter, Extra<'a>> + Clone {
    let qualified = choice((
        keyword(Qualifier::Draft)
            .ignore_then(extended_bool())
            .map(Filter::IsDraft),
        keyword(Qualifier::Kind)
            .ignore_then(ident())
            .map(|kind: &str| Filter::Kind(kind.to_string())),
        keyword(Qualifier::Category)
            .ignore_then(ident())
            .map(|category: &str| Filter::Category(category.to_string())),
        keyword(Qualifier::Creator)
            .ignore_then(user())
            .map(Filter::Creator),
        keyword(Qualifier::Created)
            .ignore_then(ordered(date()))
            .map(Filter::Creation),
        keyword(Qualifier::Images)
            .ignore_then(ordered(byte()))
            .map(Filter::ImagesCount),
        keyword(Qualifier::Properties).ignore_then(properties()),
    ));

    choice((
        quoted_string().map(|text: &str| Filter::QuotedString(text.to_string())),
        qualified,
        committed_prefix()
            .not()
            .ignore_then(word())
            .map(|word: &str| Filter::Word(word.to_string())),
    ))
}

pub fn parser<'a>() -> impl Parser<'a, &'a str, Query, Extra<'a>> {
    whitespace()
        .ignore_then(
            filter()
                .separated_by(separator())
                .allow_trailing()
                .collect::<Vec<_>>(),
        )
        .then_ignore(end())
        .map(Query::new)
}

/// A single filter, spanning the whole input.
pub fn single_filter<'a>() -> impl Parser<'a, &'a str, Filter, Extra<'a>> {
    filter().then_ignore(end())
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(value: &str) -> DateToken {
        DateToken::new(value).unwrap()
    }

    fn assert_parse(query: &str, expected: Vec<Filter>) {
        let result = parser().parse(query).into_result().unwrap();

        assert_eq!(result, Query::new(expected));
    }

    fn assert_parse_err(query: &str) {
        assert!(parser().parse(query).has_errors(), "Should fail: {query}");
    }

    fn assert_filter(filter: &str, expected: Filter) {
        let result = single_filter().parse(filter).into_result().unwrap();

        assert_eq!(result, expected);
    }

    #[test]
    fn test_empty() {
        assert_parse("", vec![]);
        assert_parse("   \t ", vec![]);
    }

    #[test]
    fn test_words() {
        let expected = vec![
            Filter::Word("La".into()),
            Filter::Word("Dame".into()),
            Filter::Word("du".into()),
            Filter::Word("Lac".into()),
        ];

        assert_parse("La Dame du Lac", expected.clone());
        assert_parse("La Dame du Lac     ", expected.clone());
        assert_parse("La Dame du Lac  \t   ", expected.clone());
        assert_parse(" \t   La Dame du Lac     ", expected.clone());
        assert_parse("     La   Dame\tdu \t Lac", expected);
    }

    #[test]
    fn test_quoted() {
        assert_parse(
            "   \"La Dame du Lac\"  \t  \"Another text\" ",
            vec![
                Filter::QuotedString("La Dame du Lac".into()),
                Filter::QuotedString("Another text".into()),
            ],
        );
        assert_parse(r#""""#, vec![Filter::QuotedString("".into())]);
    }

    #[test]
    fn test_quoted_unterminated() {
        assert_parse_err(r#""La Dame du Lac"#);
        assert_parse_err(r#"foo "bar"#);
    }

    #[test]
    fn test_quoted_needs_separator() {
        assert_parse_err(r#""foo"bar"#);
    }

    #[test]
    fn test_word_with_quote() {
        assert_parse(r#"foo"bar"#, vec![Filter::Word(r#"foo"bar"#.into())]);
    }

    #[test]
    fn test_diacritics() {
        assert_filter("Äé':/", Filter::Word("Äé':/".into()));
    }

    #[test]
    fn test_draft() {
        assert_filter("draft:only", Filter::IsDraft(ExtendedBool::Only));
        assert_filter("draft:true", Filter::IsDraft(ExtendedBool::Bool(true)));
        assert_filter("draft:false", Filter::IsDraft(ExtendedBool::Bool(false)));
        assert_parse_err("draft:maybe");
        assert_parse_err("draft:");
    }

    #[test]
    fn test_kind() {
        assert_filter(
            "kind:indoor_parkour_park",
            Filter::Kind("indoor_parkour_park".into()),
        );
        assert_filter("kind:a+b-c_1", Filter::Kind("a+b-c_1".into()));
    }

    #[test]
    fn test_category_empty() {
        assert_parse("category:", vec![Filter::Category("".into())]);
    }

    #[test]
    fn test_qualifier_without_colon() {
        assert_parse("category", vec![Filter::Word("category".into())]);
        assert_parse("kindness", vec![Filter::Word("kindness".into())]);
        assert_parse("properties", vec![Filter::Word("properties".into())]);
    }

    #[test]
    fn test_unknown_qualifier() {
        assert_parse("color:red", vec![Filter::Word("color:red".into())]);
    }

    #[test]
    fn test_creator() {
        assert_filter(
            "creator:@remi_bardon",
            Filter::Creator(User::Username("remi_bardon".into())),
        );
        assert_filter(
            "creator:2f365abc-d755-4257-9641-5dad3068bc6a",
            Filter::Creator(User::UserId(
                "2f365abc-d755-4257-9641-5dad3068bc6a".into(),
            )),
        );
    }

    #[test]
    fn test_creator_invalid() {
        assert_parse_err("creator:G0000000-0000-4000-0000-000000000000");
        assert_parse_err("creator:2f365abc");
        assert_parse_err("creator:2f365abc-d755-4257-9641-5dad3068bc6a0");
        assert_parse_err("creator:@");
    }

    #[test]
    fn test_created() {
        assert_filter(
            "created:>=2021-01-01",
            Filter::Creation(Ordered::GreaterEqual(date("2021-01-01"))),
        );
        assert_filter(
            "created:>2021-01-01",
            Filter::Creation(Ordered::Greater(date("2021-01-01"))),
        );
        assert_filter(
            "created:<=2021-01-01",
            Filter::Creation(Ordered::LessEqual(date("2021-01-01"))),
        );
        assert_filter(
            "created:<2021-01-01",
            Filter::Creation(Ordered::Less(date("2021-01-01"))),
        );
        assert_filter(
            "created:2021-01-01",
            Filter::Creation(Ordered::Equal(date("2021-01-01"))),
        );
        assert_filter(
            "created:2021-01-01..2021-12-31",
            Filter::Creation(Ordered::Between(date("2021-01-01"), date("2021-12-31"))),
        );
        assert_filter(
            "created:2021-10-19T12:30:00Z",
            Filter::Creation(Ordered::Equal(date("2021-10-19T12:30:00Z"))),
        );
    }

    #[test]
    fn test_created_invalid() {
        assert_parse_err("created:2021-13-01");
        assert_parse_err("created:>=");
        assert_parse_err("created:yesterday");
        assert_parse_err("created:2021-01-01..");
    }

    #[test]
    fn test_images() {
        assert_filter(
            "images:1..10",
            Filter::ImagesCount(Ordered::from_range(1..=10)),
        );
        assert_filter("images:0", Filter::ImagesCount(Ordered::Equal(0)));
        assert_filter("images:007", Filter::ImagesCount(Ordered::Equal(7)));
        assert_filter("images:<255", Filter::ImagesCount(Ordered::Less(255)));
        assert_parse_err("images:256");
        assert_parse_err("images:>=-1");
        assert_parse_err("images:");
    }

    #[test]
    fn test_properties() {
        assert_filter(
            "properties:benefit:5",
            Filter::PropertiesCount {
                kind: "benefit".into(),
                range: Ordered::Equal(5),
            },
        );
        assert_filter(
            "properties:benefit:>=2",
            Filter::PropertiesCount {
                kind: "benefit".into(),
                range: Ordered::GreaterEqual(2),
            },
        );
        assert_filter(
            "properties:feature/big_wall:true",
            Filter::HasProperty {
                kind: "feature".into(),
                id: "big_wall".into(),
                value: true,
            },
        );
    }

    #[test]
    fn test_committed_qualifier() {
        assert_parse(
            "properties:feature/big_wall:true properties",
            vec![
                Filter::HasProperty {
                    kind: "feature".into(),
                    id: "big_wall".into(),
                    value: true,
                },
                Filter::Word("properties".into()),
            ],
        );
        assert_parse_err("properties:feature/big_wall:true properties:feature/med");
        assert_parse_err("kind:park images:many");
    }

    #[test]
    fn test_ordered_string() {
        let parser = ordered(bounded_string()).then_ignore(end());

        assert_eq!(
            parser.parse("a..b").into_result().unwrap(),
            Ordered::Between("a", "b")
        );
        assert_eq!(
            parser.parse(">=abc").into_result().unwrap(),
            Ordered::GreaterEqual("abc")
        );
        assert_eq!(
            parser.parse("abc").into_result().unwrap(),
            Ordered::Equal("abc")
        );
        assert_eq!(parser.parse("").into_result().unwrap(), Ordered::Equal(""));
    }

    #[test]
    fn test_filter_rejects_whitespace() {
        assert!(single_filter().parse("   La Dame du Lac").has_errors());
        assert!(single_filter().parse("La Dame du Lac   ").has_errors());
        assert!(single_filter().parse("\tLa").has_errors());
        assert!(single_filter()
            .parse("  \t  kind:indoor_parkour_park       ")
            .has_errors());
    }

    #[test]
    fn test_mixed() {
        assert_parse(
            "kind:indoor_parkour_park created:>=2021-01-01 images:1..10",
            vec![
                Filter::Kind("indoor_parkour_park".into()),
                Filter::Creation(Ordered::GreaterEqual(date("2021-01-01"))),
                Filter::ImagesCount(Ordered::Between(1, 10)),
            ],
        );
    }
}
