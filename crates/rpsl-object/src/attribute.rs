//! Attribute types, values and the policy-expression tokenizer.

use std::fmt;
use std::str::FromStr;

/// Attribute names understood by the resolver.
///
/// Anything else is carried as [`AttributeType::Unknown`] so objects from a
/// full registry dump still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Route,
    Route6,
    Origin,
    MemberOf,
    MntBy,
    RouteSet,
    AsSet,
    Members,
    MpMembers,
    MbrsByRef,
    AutNum,
    AsName,
    Export,
    MpExport,
    Import,
    MpImport,
    Descr,
    Source,
    Unknown(String),
}

impl AttributeType {
    /// Returns the RPSL spelling of the attribute name.
    pub fn as_str(&self) -> &str {
        match self {
            AttributeType::Route => "route",
            AttributeType::Route6 => "route6",
            AttributeType::Origin => "origin",
            AttributeType::MemberOf => "member-of",
            AttributeType::MntBy => "mnt-by",
            AttributeType::RouteSet => "route-set",
            AttributeType::AsSet => "as-set",
            AttributeType::Members => "members",
            AttributeType::MpMembers => "mp-members",
            AttributeType::MbrsByRef => "mbrs-by-ref",
            AttributeType::AutNum => "aut-num",
            AttributeType::AsName => "as-name",
            AttributeType::Export => "export",
            AttributeType::MpExport => "mp-export",
            AttributeType::Import => "import",
            AttributeType::MpImport => "mp-import",
            AttributeType::Descr => "descr",
            AttributeType::Source => "source",
            AttributeType::Unknown(name) => name,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Ok(match name.as_str() {
            "route" => AttributeType::Route,
            "route6" => AttributeType::Route6,
            "origin" => AttributeType::Origin,
            "member-of" => AttributeType::MemberOf,
            "mnt-by" => AttributeType::MntBy,
            "route-set" => AttributeType::RouteSet,
            "as-set" => AttributeType::AsSet,
            "members" => AttributeType::Members,
            "mp-members" => AttributeType::MpMembers,
            "mbrs-by-ref" => AttributeType::MbrsByRef,
            "aut-num" => AttributeType::AutNum,
            "as-name" => AttributeType::AsName,
            "export" => AttributeType::Export,
            "mp-export" => AttributeType::MpExport,
            "import" => AttributeType::Import,
            "mp-import" => AttributeType::MpImport,
            "descr" => AttributeType::Descr,
            "source" => AttributeType::Source,
            _ => AttributeType::Unknown(name),
        })
    }
}

/// Keywords that open a new `(keyword, values)` pair in a policy expression.
pub const POLICY_KEYWORDS: &[&str] = &[
    "to", "at", "from", "action", "announce", "accept", "protocol", "into", "afi", "except",
    "refine", "networks",
];

/// Characters that always form a token of their own.
const DELIMITERS: &[char] = &['{', '}', '(', ')', ';'];

/// One `(keyword, values)` pair of a tokenized policy expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyToken {
    /// Lower-case keyword, or empty for words before the first keyword.
    pub keyword: String,
    /// Words following the keyword, in order.
    pub values: Vec<String>,
}

impl PolicyToken {
    pub fn new(keyword: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            keyword: keyword.into(),
            values,
        }
    }

    /// Returns true if this token's keyword is `keyword`.
    pub fn is(&self, keyword: &str) -> bool {
        self.keyword == keyword
    }
}

/// A single `name: value` attribute.
///
/// `value` keeps continuation lines (joined with `\n`) and comments exactly as
/// read; use [`clean_value`](Self::clean_value) for the semantic value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpslAttribute {
    attr_type: AttributeType,
    value: String,
}

impl RpslAttribute {
    pub fn new(attr_type: AttributeType, value: impl Into<String>) -> Self {
        Self {
            attr_type,
            value: value.into(),
        }
    }

    pub fn attr_type(&self) -> &AttributeType {
        &self.attr_type
    }

    /// The raw value as it appeared in the input.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The value with comments removed and whitespace collapsed.
    pub fn clean_value(&self) -> String {
        self.value
            .lines()
            .map(|line| match line.find('#') {
                Some(idx) => &line[..idx],
                None => line,
            })
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The clean value split into a comma separated list.
    pub fn values(&self) -> Vec<String> {
        self.clean_value()
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Tokenizes a policy expression into `(keyword, values)` pairs.
    ///
    /// `to AS2 1.1.1.1 at 2.2.2.2 announce {1.1.0.0/16}` becomes
    /// `[(to, [AS2, 1.1.1.1]), (at, [2.2.2.2]), (announce, [{, 1.1.0.0/16, }])]`.
    pub fn token_list(&self) -> Vec<PolicyToken> {
        let mut tokens: Vec<PolicyToken> = Vec::new();

        for word in split_words(&self.clean_value()) {
            let lower = word.to_ascii_lowercase();
            if POLICY_KEYWORDS.contains(&lower.as_str()) {
                tokens.push(PolicyToken::new(lower, Vec::new()));
                continue;
            }
            match tokens.last_mut() {
                Some(token) => token.values.push(word),
                None => tokens.push(PolicyToken::new("", vec![word])),
            }
        }

        tokens
    }
}

impl fmt::Display for RpslAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attr_type, self.clean_value())
    }
}

fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_whitespace() || c == ',' || DELIMITERS.contains(&c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            if DELIMITERS.contains(&c) {
                words.push(c.to_string());
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}
