//! Selector subset
//!
//! Just enough of CSS selector syntax for document queries: type, id, class,
//! attribute (presence, exact, prefix), `:not(...)`, descendant combinators
//! and comma-separated lists. No specificity, no cascade.

/// Comma-separated selector list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

/// One complex selector: a descendant chain of compounds, subject last
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub compounds: Vec<CompoundSelector>,
}

/// Parts that must all match on a single element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub parts: Vec<SelectorPart>,
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], [attr^=value]
    Attr {
        name: String,
        matcher: Option<AttributeMatcher>,
    },
    /// :not(...) over one compound selector
    Not(Box<CompoundSelector>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr^=value] - prefix match
    Prefix(String),
}

impl SelectorList {
    /// Parse a comma-separated selector list
    pub fn parse(input: &str) -> Option<Self> {
        let mut selectors = Vec::new();
        for part in input.split(',') {
            selectors.push(Selector::parse(part)?);
        }
        if selectors.is_empty() {
            return None;
        }
        Some(Self { selectors })
    }
}

impl Selector {
    /// Parse one complex selector (whitespace = descendant combinator)
    pub fn parse(input: &str) -> Option<Self> {
        let compounds: Vec<CompoundSelector> = input
            .split_whitespace()
            .map(CompoundSelector::parse)
            .collect::<Option<_>>()?;
        if compounds.is_empty() {
            return None;
        }
        Some(Self { compounds })
    }

    /// The subject compound plus the ancestor chain left of it
    pub fn split_subject(&self) -> Option<(&CompoundSelector, &[CompoundSelector])> {
        self.compounds.split_last()
    }
}

impl CompoundSelector {
    /// Parse a compound selector with no combinators
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        let bytes = input.as_bytes();
        let mut parts = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'*' => {
                    parts.push(SelectorPart::Universal);
                    i += 1;
                }
                b'#' => {
                    let (ident, next) = read_ident(input, i + 1)?;
                    parts.push(SelectorPart::Id(ident));
                    i = next;
                }
                b'.' => {
                    let (ident, next) = read_ident(input, i + 1)?;
                    parts.push(SelectorPart::Class(ident));
                    i = next;
                }
                b'[' => {
                    let close = input[i..].find(']')? + i;
                    parts.push(parse_attr(&input[i + 1..close])?);
                    i = close + 1;
                }
                b':' => {
                    let rest = &input[i + 1..];
                    let inner = rest.strip_prefix("not(")?;
                    let close = inner.find(')')?;
                    let nested = CompoundSelector::parse(&inner[..close])?;
                    parts.push(SelectorPart::Not(Box::new(nested)));
                    i += 1 + 4 + close + 1;
                }
                _ => {
                    let (ident, next) = read_ident(input, i)?;
                    parts.push(SelectorPart::Type(ident.to_ascii_lowercase()));
                    i = next;
                }
            }
        }

        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }

    /// Check this compound against a single element
    pub fn matches(&self, elem: &crate::ElementData) -> bool {
        self.parts.iter().all(|part| match part {
            SelectorPart::Universal => true,
            SelectorPart::Type(tag) => elem.tag == *tag,
            SelectorPart::Id(id) => elem.id.as_deref() == Some(id.as_str()),
            SelectorPart::Class(class) => elem.has_class(class),
            SelectorPart::Attr { name, matcher } => match (elem.attr(name), matcher) {
                (Some(_), None) => true,
                (Some(v), Some(AttributeMatcher::Exact(want))) => v == want,
                (Some(v), Some(AttributeMatcher::Prefix(want))) => {
                    !want.is_empty() && v.starts_with(want.as_str())
                }
                (None, _) => false,
            },
            SelectorPart::Not(inner) => !inner.matches(elem),
        })
    }
}

fn read_ident(input: &str, from: usize) -> Option<(String, usize)> {
    let rest = &input[from..];
    let len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    if len == 0 {
        return None;
    }
    Some((rest[..len].to_string(), from + len))
}

fn parse_attr(body: &str) -> Option<SelectorPart> {
    let body = body.trim();
    if let Some(eq) = body.find('=') {
        let (name, op_is_prefix) = if eq > 0 && body.as_bytes()[eq - 1] == b'^' {
            (&body[..eq - 1], true)
        } else {
            (&body[..eq], false)
        };
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let value = body[eq + 1..]
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();
        let matcher = if op_is_prefix {
            AttributeMatcher::Prefix(value)
        } else {
            AttributeMatcher::Exact(value)
        };
        Some(SelectorPart::Attr {
            name: name.to_string(),
            matcher: Some(matcher),
        })
    } else {
        if body.is_empty() {
            return None;
        }
        Some(SelectorPart::Attr {
            name: body.to_string(),
            matcher: None,
        })
    }
}
