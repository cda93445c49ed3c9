use http::HeaderName;
use miette::Diagnostic;
use std::{fmt, str::FromStr};
use thiserror::Error;

const REQUEST_TARGET: &str = "(request-target)";

/// Header name that can't take part in a signature
#[derive(Debug, Diagnostic, Error)]
#[error("Invalid signature component `{0}`")]
pub struct InvalidComponent(pub String);

/// Single entry of the `headers` list of a signature
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Component {
    /// The `(request-target)` pseudo-header (lowercased method, path and query)
    RequestTarget,

    /// A regular request header
    Header(HeaderName),
}

impl Component {
    /// Lowercased name of the component as it appears in the signing string
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RequestTarget => REQUEST_TARGET,
            Self::Header(name) => name.as_str(),
        }
    }
}

impl FromStr for Component {
    type Err = InvalidComponent;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.eq_ignore_ascii_case(REQUEST_TARGET) {
            return Ok(Self::RequestTarget);
        }

        // `HeaderName` normalises to lowercase
        HeaderName::from_bytes(raw.as_bytes())
            .map(Self::Header)
            .map_err(|_| InvalidComponent(raw.to_string()))
    }
}

impl From<HeaderName> for Component {
    fn from(value: HeaderName) -> Self {
        Self::Header(value)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of signature components
///
/// The order defines the order of lines in the signing string and is preserved exactly.
/// Names are case-folded on construction.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct SignedHeaders(Vec<Component>);

impl SignedHeaders {
    /// Build the list from header names, keeping their order
    pub fn from_names<I>(names: I) -> Result<Self, InvalidComponent>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// `(request-target)` and `date`, the least a signature has to cover
    #[must_use]
    pub fn minimum() -> Self {
        Self(vec![
            Component::RequestTarget,
            Component::Header(http::header::DATE),
        ])
    }

    /// Append a component
    pub fn push(&mut self, component: Component) {
        self.0.push(component);
    }

    /// Whether the list contains the component
    #[must_use]
    pub fn contains(&self, component: &Component) -> bool {
        self.0.contains(component)
    }

    /// Whether the list contains the header
    #[must_use]
    pub fn contains_header(&self, name: &HeaderName) -> bool {
        self.0
            .iter()
            .any(|component| matches!(component, Component::Header(header) if header == name))
    }

    /// Iterate over the components in order
    pub fn iter(&self) -> impl Iterator<Item = &Component> + '_ {
        self.0.iter()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of components
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for SignedHeaders {
    type Err = InvalidComponent;

    /// Parse the space-separated value of the `headers` parameter
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::from_names(raw.split_whitespace())
    }
}

impl FromIterator<Component> for SignedHeaders {
    fn from_iter<T: IntoIterator<Item = Component>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SignedHeaders {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for SignedHeaders {
    /// Space-joined, as it appears in the `headers` parameter
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&itertools::join(&self.0, " "))
    }
}
