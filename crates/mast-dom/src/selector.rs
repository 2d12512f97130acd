//! Selector types and parsing.
//!
//! Selectors are tokenized with `cssparser`, so escapes, quoted strings and
//! comments behave as in a stylesheet. The supported grammar covers what
//! outlets and delegated events need:
//!
//! - type (`div`), universal (`*`), id (`#app`), class (`.slot`)
//! - attributes: `[x]`, `[x=v]`, `[x~=v]`, `[x|=v]`, `[x^=v]`, `[x$=v]`, `[x*=v]`
//! - pseudo-classes: `:root`, `:first-child`, `:last-child`, `:only-child`,
//!   `:empty`, `:not(<compound>)`
//! - combinators: descendant (` `), child (`>`), adjacent (`+`), general
//!   sibling (`~`)
//! - selector lists (`#a, #b`) through [`SelectorList`]

use std::fmt;
use std::str::FromStr;

use cssparser::{
    serialize_identifier, serialize_name, serialize_string, BasicParseErrorKind, ParseError,
    ParseErrorKind, Parser, ParserInput, ToCss, Token,
};

use crate::error::SelectorError;

/// A complete selector (e.g., `"section#main > ul.items li"`).
///
/// A selector consists of one or more compound parts connected by combinators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Compound parts, left to right.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Parse a single selector. Selector lists are rejected.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut selectors = SelectorList::parse(input)?.selectors;
        match selectors.pop() {
            Some(selector) if selectors.is_empty() => Ok(selector),
            _ => Err(SelectorError::UnexpectedList {
                selector: input.to_string(),
            }),
        }
    }

    /// Create an ID selector.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            parts: vec![SelectorPart::id_only(id)],
            combinators: vec![],
        }
    }

    /// Create a class selector.
    pub fn class(class_name: impl Into<String>) -> Self {
        Self {
            parts: vec![SelectorPart::class_only(class_name)],
            combinators: vec![],
        }
    }

    /// Add a descendant selector part.
    pub fn descendant(self, part: SelectorPart) -> Self {
        self.then(Combinator::Descendant, part)
    }

    /// Add a child selector part.
    pub fn child(self, part: SelectorPart) -> Self {
        self.then(Combinator::Child, part)
    }

    /// Add a selector part after `combinator`.
    pub fn then(mut self, combinator: Combinator, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(combinator);
        }
        self.parts.push(part);
        self
    }

    /// Get the rightmost (subject) selector part.
    pub fn subject(&self) -> Option<&SelectorPart> {
        self.parts.last()
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.combinators[i - 1])?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// Comma-separated selectors; an element matches if any of them matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorList {
    /// The selectors, in source order.
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    /// Parse a selector list such as `"#a, .b > c"`.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser_input = ParserInput::new(input);
        let mut parser = Parser::new(&mut parser_input);
        let selectors = parser
            .parse_comma_separated(|p| {
                parse_complex(p, input).map_err(|error| p.new_custom_error(error))
            })
            .map_err(|error| into_selector_error(error, input))?;
        Ok(Self { selectors })
    }

    /// Iterate over the selectors.
    pub fn iter(&self) -> std::slice::Iter<'_, Selector> {
        self.selectors.iter()
    }
}

impl From<Selector> for SelectorList {
    fn from(selector: Selector) -> Self {
        Self {
            selectors: vec![selector],
        }
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

/// A single compound segment (e.g., `"li.item[data-key]:first-child"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// Type selector (tag name or universal).
    pub type_selector: Option<TypeSelector>,
    /// ID selector (#id).
    pub id: Option<String>,
    /// Class selectors (.class).
    pub classes: Vec<String>,
    /// Attribute selectors ([name], [name=value], ...).
    pub attributes: Vec<AttributeSelector>,
    /// Structural pseudo-classes (:first-child, :not(...), ...).
    pub pseudo_classes: Vec<PseudoClass>,
}

impl SelectorPart {
    /// Create a type-only selector.
    pub fn type_only(tag: impl Into<String>) -> Self {
        Self {
            type_selector: Some(TypeSelector::Type(tag.into())),
            ..Default::default()
        }
    }

    /// Create a class-only selector.
    pub fn class_only(class_name: impl Into<String>) -> Self {
        Self {
            classes: vec![class_name.into()],
            ..Default::default()
        }
    }

    /// Create an ID-only selector.
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Add a class selector.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add a pseudo-class.
    pub fn with_pseudo_class(mut self, pseudo: PseudoClass) -> Self {
        self.pseudo_classes.push(pseudo);
        self
    }

    fn is_empty(&self) -> bool {
        self.type_selector.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudo_classes.is_empty()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_selector {
            Some(TypeSelector::Universal) => f.write_str("*")?,
            Some(TypeSelector::Type(t)) => serialize_identifier(t, f)?,
            None => {}
        }
        if let Some(id) = &self.id {
            f.write_str("#")?;
            serialize_name(id, f)?;
        }
        for class in &self.classes {
            f.write_str(".")?;
            serialize_identifier(class, f)?;
        }
        for attribute in &self.attributes {
            write!(f, "{}", attribute)?;
        }
        for pseudo in &self.pseudo_classes {
            write!(f, "{}", pseudo)?;
        }
        Ok(())
    }
}

/// Type selector - matches the element's tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// Matches any element (*).
    Universal,
    /// Matches a specific tag, ASCII case-insensitively.
    Type(String),
}

/// How an attribute value is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeOperator {
    /// `[x=v]`: exact match.
    #[default]
    Equals,
    /// `[x~=v]`: one of the whitespace-separated words.
    Includes,
    /// `[x|=v]`: exactly `v` or starting with `v-`.
    DashMatch,
    /// `[x^=v]`: starts with `v`.
    Prefix,
    /// `[x$=v]`: ends with `v`.
    Suffix,
    /// `[x*=v]`: contains `v`.
    Substring,
}

impl AttributeOperator {
    /// Test an attribute's actual value.
    pub fn test(self, expected: &str, actual: &str) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::Includes => {
                !expected.is_empty() && actual.split_ascii_whitespace().any(|word| word == expected)
            }
            Self::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Self::Prefix => !expected.is_empty() && actual.starts_with(expected),
            Self::Suffix => !expected.is_empty() && actual.ends_with(expected),
            Self::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

impl fmt::Display for AttributeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equals => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        })
    }
}

/// Attribute presence or value test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    /// Attribute name.
    pub name: String,
    /// Comparison applied to `value`.
    pub operator: AttributeOperator,
    /// Required value, or `None` for a presence test.
    pub value: Option<String>,
}

impl AttributeSelector {
    /// `[name]`
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator: AttributeOperator::Equals,
            value: None,
        }
    }

    /// `[name<operator>"value"]`
    pub fn compare(
        name: impl Into<String>,
        operator: AttributeOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            operator,
            value: Some(value.into()),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        serialize_identifier(&self.name, f)?;
        if let Some(value) = &self.value {
            write!(f, "{}", self.operator)?;
            serialize_string(value, f)?;
        }
        f.write_str("]")
    }
}

/// Structural pseudo-classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    /// The document root element.
    Root,
    /// First child of its parent.
    FirstChild,
    /// Last child of its parent.
    LastChild,
    /// Only child of its parent.
    OnlyChild,
    /// No children and no text.
    Empty,
    /// Negation of a compound selector.
    Not(Box<SelectorPart>),
}

impl PseudoClass {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "root" => Self::Root,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "only-child" => Self::OnlyChild,
            "empty" => Self::Empty,
            _ => return None,
        })
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(":root"),
            Self::FirstChild => f.write_str(":first-child"),
            Self::LastChild => f.write_str(":last-child"),
            Self::OnlyChild => f.write_str(":only-child"),
            Self::Empty => f.write_str(":empty"),
            Self::Not(part) => write!(f, ":not({})", part),
        }
    }
}

/// Combinator between selector parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (whitespace).
    Descendant,
    /// Child combinator (>).
    Child,
    /// Adjacent sibling combinator (+).
    AdjacentSibling,
    /// General sibling combinator (~).
    GeneralSibling,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::AdjacentSibling => " + ",
            Self::GeneralSibling => " ~ ",
        })
    }
}

/// Accumulates compound parts and the combinators between them.
#[derive(Default)]
struct ComplexBuilder {
    parts: Vec<SelectorPart>,
    combinators: Vec<Combinator>,
    current: SelectorPart,
    pending: Option<Combinator>,
}

impl ComplexBuilder {
    /// The compound being built. Starting a new compound after a finished
    /// one records the pending combinator, or a descendant one.
    fn part_mut(&mut self) -> &mut SelectorPart {
        if self.combinators.len() < self.parts.len() {
            self.combinators
                .push(self.pending.take().unwrap_or(Combinator::Descendant));
        }
        &mut self.current
    }

    fn end_compound(&mut self) {
        if !self.current.is_empty() {
            self.parts.push(std::mem::take(&mut self.current));
        }
    }

    /// Returns `false` when the combinator has nothing on its left.
    fn combinator(&mut self, combinator: Combinator) -> bool {
        self.end_compound();
        if self.parts.is_empty() || self.pending.is_some() {
            return false;
        }
        self.pending = Some(combinator);
        true
    }

    fn finish(mut self, source: &str) -> Result<Selector, SelectorError> {
        self.end_compound();
        if self.parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        if self.pending.is_some() {
            return Err(SelectorError::DanglingCombinator {
                selector: source.to_string(),
            });
        }
        Ok(Selector {
            parts: self.parts,
            combinators: self.combinators,
        })
    }
}

/// Parse one complex selector, up to the end of the (delimited) input.
fn parse_complex(parser: &mut Parser<'_, '_>, source: &str) -> Result<Selector, SelectorError> {
    let mut builder = ComplexBuilder::default();

    loop {
        let column = parser.current_source_location().column;
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match &token {
            Token::WhiteSpace(_) => builder.end_compound(),
            Token::Ident(name) => {
                if !builder.current.is_empty() {
                    return Err(unexpected(source, column, &token));
                }
                builder.part_mut().type_selector = Some(TypeSelector::Type(name.to_string()));
            }
            Token::Delim('*') => {
                if !builder.current.is_empty() {
                    return Err(unexpected(source, column, &token));
                }
                builder.part_mut().type_selector = Some(TypeSelector::Universal);
            }
            Token::IDHash(id) => {
                if builder.current.id.is_some() {
                    return Err(unexpected(source, column, &token));
                }
                builder.part_mut().id = Some(id.to_string());
            }
            Token::Delim('.') => {
                let class = expect_name(parser, source)?;
                builder.part_mut().classes.push(class);
            }
            Token::SquareBracketBlock => {
                let attribute = parser
                    .parse_nested_block(|p| {
                        parse_attribute(p, source).map_err(|error| p.new_custom_error(error))
                    })
                    .map_err(|error| into_selector_error(error, source))?;
                builder.part_mut().attributes.push(attribute);
            }
            Token::Colon => {
                let pseudo = parse_pseudo_class(parser, source)?;
                builder.part_mut().pseudo_classes.push(pseudo);
            }
            Token::Delim(c @ ('>' | '+' | '~')) => {
                let combinator = match *c {
                    '>' => Combinator::Child,
                    '+' => Combinator::AdjacentSibling,
                    _ => Combinator::GeneralSibling,
                };
                if !builder.combinator(combinator) {
                    return Err(unexpected(source, column, &token));
                }
            }
            _ => return Err(unexpected(source, column, &token)),
        }
    }

    builder.finish(source)
}

/// An identifier immediately following `.`.
fn expect_name(parser: &mut Parser<'_, '_>, source: &str) -> Result<String, SelectorError> {
    let column = parser.current_source_location().column;
    match parser.next_including_whitespace() {
        Ok(Token::Ident(name)) => Ok(name.to_string()),
        Ok(token) => Err(unexpected(source, column, token)),
        Err(_) => Err(end_of_input(source)),
    }
}

/// The contents of `[...]`.
fn parse_attribute(
    parser: &mut Parser<'_, '_>,
    source: &str,
) -> Result<AttributeSelector, SelectorError> {
    let column = parser.current_source_location().column;
    let name = match parser.next() {
        Ok(Token::Ident(name)) => name.to_string(),
        Ok(token) => return Err(unexpected(source, column, token)),
        Err(_) => return Err(end_of_input(source)),
    };

    let column = parser.current_source_location().column;
    let operator = match parser.next() {
        Err(_) => return Ok(AttributeSelector::exists(name)),
        Ok(Token::Delim('=')) => AttributeOperator::Equals,
        Ok(Token::IncludeMatch) => AttributeOperator::Includes,
        Ok(Token::DashMatch) => AttributeOperator::DashMatch,
        Ok(Token::PrefixMatch) => AttributeOperator::Prefix,
        Ok(Token::SuffixMatch) => AttributeOperator::Suffix,
        Ok(Token::SubstringMatch) => AttributeOperator::Substring,
        Ok(token) => return Err(unexpected(source, column, token)),
    };

    let column = parser.current_source_location().column;
    let value = match parser.next() {
        Ok(Token::Ident(value) | Token::QuotedString(value)) => value.to_string(),
        Ok(token) => return Err(unexpected(source, column, token)),
        Err(_) => return Err(end_of_input(source)),
    };

    let column = parser.current_source_location().column;
    match parser.next() {
        Err(_) => Ok(AttributeSelector::compare(name, operator, value)),
        Ok(token) => Err(unexpected(source, column, token)),
    }
}

/// The pseudo-class after a `:`.
fn parse_pseudo_class(
    parser: &mut Parser<'_, '_>,
    source: &str,
) -> Result<PseudoClass, SelectorError> {
    let column = parser.current_source_location().column;
    let token = match parser.next_including_whitespace() {
        Ok(token) => token.clone(),
        Err(_) => return Err(end_of_input(source)),
    };

    match &token {
        Token::Ident(name) => {
            PseudoClass::from_name(name).ok_or_else(|| unsupported(source, name.to_string()))
        }
        Token::Function(name) if name.eq_ignore_ascii_case("not") => {
            let inner = parser
                .parse_nested_block(|p| {
                    parse_complex(p, source).map_err(|error| p.new_custom_error(error))
                })
                .map_err(|error| into_selector_error(error, source))?;
            match <[SelectorPart; 1]>::try_from(inner.parts) {
                Ok([part]) => Ok(PseudoClass::Not(Box::new(part))),
                Err(parts) => {
                    let inner = Selector {
                        parts,
                        combinators: inner.combinators,
                    };
                    Err(unsupported(source, format!("not({})", inner)))
                }
            }
        }
        Token::Function(name) => Err(unsupported(source, format!("{}()", &**name))),
        _ => Err(unexpected(source, column, &token)),
    }
}

fn unexpected(source: &str, column: u32, token: &Token<'_>) -> SelectorError {
    SelectorError::UnexpectedToken {
        selector: source.to_string(),
        column,
        found: token.to_css_string(),
    }
}

fn unsupported(source: &str, name: String) -> SelectorError {
    SelectorError::UnsupportedPseudoClass {
        selector: source.to_string(),
        name,
    }
}

fn end_of_input(source: &str) -> SelectorError {
    SelectorError::UnexpectedEnd {
        selector: source.to_string(),
    }
}

fn into_selector_error(error: ParseError<'_, SelectorError>, source: &str) -> SelectorError {
    match error.kind {
        ParseErrorKind::Custom(error) => error,
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            unexpected(source, error.location.column, &token)
        }
        ParseErrorKind::Basic(_) => end_of_input(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let selector = Selector::parse("#app").unwrap();
        assert_eq!(selector, Selector::id("app"));
        assert_eq!(selector.to_string(), "#app");
    }

    #[test]
    fn test_parse_compound() {
        let selector = Selector::parse("li.item.active[data-key=\"a b\"]").unwrap();
        let part = selector.subject().unwrap();
        assert_eq!(part.type_selector, Some(TypeSelector::Type("li".into())));
        assert_eq!(part.classes, vec!["item".to_string(), "active".to_string()]);
        assert_eq!(
            part.attributes,
            vec![AttributeSelector::compare(
                "data-key",
                AttributeOperator::Equals,
                "a b"
            )]
        );
    }

    #[test]
    fn test_parse_combinators() {
        let selector = Selector::parse("  section#main >ul  .slot ").unwrap();
        assert_eq!(selector.parts.len(), 3);
        assert_eq!(
            selector.combinators,
            vec![Combinator::Child, Combinator::Descendant]
        );
        assert_eq!(selector.to_string(), "section#main > ul .slot");
    }

    #[test]
    fn test_parse_sibling_combinators() {
        let selector = Selector::parse("h1 + p~ul").unwrap();
        assert_eq!(
            selector.combinators,
            vec![Combinator::AdjacentSibling, Combinator::GeneralSibling]
        );
        assert_eq!(selector.to_string(), "h1 + p ~ ul");
    }

    #[test]
    fn test_parse_universal_and_presence() {
        let selector = Selector::parse("* [hidden]").unwrap();
        assert_eq!(selector.parts[0].type_selector, Some(TypeSelector::Universal));
        assert_eq!(selector.parts[1].attributes[0], AttributeSelector::exists("hidden"));
    }

    #[test]
    fn test_parse_escaped_identifiers() {
        let selector = Selector::parse(r"#row\:1 .a\.b").unwrap();
        assert_eq!(selector.parts[0].id.as_deref(), Some("row:1"));
        assert_eq!(selector.parts[1].classes, vec!["a.b".to_string()]);
        assert_eq!(selector.to_string(), r"#row\:1 .a\.b");
    }

    #[test]
    fn test_parse_attribute_operators() {
        let selector = Selector::parse("[lang|=\"en\"][class~=big][href^='http'][src$=png][title*=x]")
            .unwrap();
        let operators: Vec<_> = selector.parts[0]
            .attributes
            .iter()
            .map(|a| a.operator)
            .collect();
        assert_eq!(
            operators,
            vec![
                AttributeOperator::DashMatch,
                AttributeOperator::Includes,
                AttributeOperator::Prefix,
                AttributeOperator::Suffix,
                AttributeOperator::Substring,
            ]
        );
        assert_eq!(selector.parts[0].attributes[2].value.as_deref(), Some("http"));
    }

    #[test]
    fn test_attribute_operator_tests() {
        assert!(AttributeOperator::DashMatch.test("en", "en"));
        assert!(AttributeOperator::DashMatch.test("en", "en-US"));
        assert!(!AttributeOperator::DashMatch.test("en", "english"));
        assert!(AttributeOperator::Includes.test("b", "a b c"));
        assert!(!AttributeOperator::Includes.test("", "a b c"));
        assert!(!AttributeOperator::Prefix.test("", "anything"));
    }

    #[test]
    fn test_parse_pseudo_classes() {
        let selector = Selector::parse("li:first-child:NOT(.done)").unwrap();
        assert_eq!(
            selector.parts[0].pseudo_classes,
            vec![
                PseudoClass::FirstChild,
                PseudoClass::Not(Box::new(SelectorPart::class_only("done"))),
            ]
        );
        assert_eq!(selector.to_string(), "li:first-child:not(.done)");
    }

    #[test]
    fn test_parse_list() {
        let list = SelectorList::parse("#a, .b > c").unwrap();
        assert_eq!(list.selectors.len(), 2);
        assert_eq!(list.to_string(), "#a, .b > c");
        assert!(matches!(
            Selector::parse("#a, #b"),
            Err(SelectorError::UnexpectedList { .. })
        ));
    }

    #[test]
    fn test_builder_matches_parse() {
        let built = Selector::id("app").child(SelectorPart::class_only("slot"));
        assert_eq!(built, Selector::parse("#app > .slot").unwrap());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert!(SelectorList::parse("#a,").is_err());
        assert!(matches!(
            Selector::parse("#"),
            Err(SelectorError::UnexpectedToken { ref found, .. }) if found == "#"
        ));
        assert!(matches!(
            Selector::parse("div >"),
            Err(SelectorError::DanglingCombinator { .. })
        ));
        assert!(matches!(
            Selector::parse("> div"),
            Err(SelectorError::UnexpectedToken { column: 1, .. })
        ));
        assert!(matches!(
            Selector::parse("div > > p"),
            Err(SelectorError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            Selector::parse("li:hover"),
            Err(SelectorError::UnsupportedPseudoClass { ref name, .. }) if name == "hover"
        ));
        assert!(matches!(
            Selector::parse("li::before"),
            Err(SelectorError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            Selector::parse(":not(a b)"),
            Err(SelectorError::UnsupportedPseudoClass { .. })
        ));
        assert!(matches!(
            Selector::parse("[=x]"),
            Err(SelectorError::UnexpectedToken { .. })
        ));
    }
}
