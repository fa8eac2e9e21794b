use cerberus_error::{CerberusError, Result};
use regex::Regex;
use std::fmt;

/// Decides which animation clips are left out of every result set.
///
/// Implemented for closures so callers can plug in any strategy:
///
/// ```
/// use cerberus_tracer::ClipFilter;
/// let skip_wip = |name: &str| name.starts_with("WIP_");
/// assert!(skip_wip.excludes("WIP_Dance"));
/// ```
pub trait ClipFilter {
    fn excludes(&self, name: &str) -> bool;
}

impl<F: Fn(&str) -> bool> ClipFilter for F {
    fn excludes(&self, name: &str) -> bool {
        self(name)
    }
}

/// A single name-matching rule
#[derive(Debug, Clone)]
pub enum ExclusionRule {
    /// Substring match
    Contains { token: String, case_sensitive: bool },
    /// Regular expression match anywhere in the name
    Pattern(Regex),
}

impl ExclusionRule {
    pub fn contains<T: Into<String>>(token: T) -> Self {
        Self::Contains {
            token: token.into(),
            case_sensitive: true,
        }
    }

    pub fn contains_ignore_case<T: Into<String>>(token: T) -> Self {
        Self::Contains {
            token: token.into().to_lowercase(),
            case_sensitive: false,
        }
    }

    pub fn pattern(expr: &str) -> Result<Self> {
        Regex::new(expr)
            .map(Self::Pattern)
            .map_err(|e| CerberusError::tracer_invalid_exclusion(format!("'{expr}': {e}")))
    }

    /// Parse a rule expression.
    ///
    /// Accepted forms: `contains:<token>`, `icontains:<token>`, `regex:<expr>`,
    /// or a bare token, which is the same as `contains:<token>`.
    pub fn parse(expr: &str) -> Result<Self> {
        let rule = if let Some(token) = expr.strip_prefix("contains:") {
            Self::contains(token)
        } else if let Some(token) = expr.strip_prefix("icontains:") {
            Self::contains_ignore_case(token)
        } else if let Some(pattern) = expr.strip_prefix("regex:") {
            Self::pattern(pattern)?
        } else {
            Self::contains(expr)
        };

        let empty = match &rule {
            Self::Contains { token, .. } => token.is_empty(),
            Self::Pattern(regex) => regex.as_str().is_empty(),
        };
        if empty {
            return Err(CerberusError::tracer_invalid_exclusion(format!(
                "'{expr}': empty rule would exclude every clip"
            )));
        }
        Ok(rule)
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Contains {
                token,
                case_sensitive: true,
            } => name.contains(token.as_str()),
            Self::Contains {
                token,
                case_sensitive: false,
            } => name.to_lowercase().contains(token.as_str()),
            Self::Pattern(regex) => regex.is_match(name),
        }
    }
}

impl ClipFilter for ExclusionRule {
    fn excludes(&self, name: &str) -> bool {
        self.matches(name)
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains {
                token,
                case_sensitive: true,
            } => write!(f, "contains:{token}"),
            Self::Contains {
                token,
                case_sensitive: false,
            } => write!(f, "icontains:{token}"),
            Self::Pattern(regex) => write!(f, "regex:{}", regex.as_str()),
        }
    }
}

/// Rules evaluated in order; a name is excluded when any rule matches.
///
/// The default set holds the single rule `contains:proxy`, which drops the
/// placeholder clips avatar SDKs ship in their template controllers.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    rules: Vec<ExclusionRule>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self {
            rules: vec![ExclusionRule::contains("proxy")],
        }
    }
}

impl ExclusionSet {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        Self { rules }
    }

    /// A set that excludes nothing
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parse a list of rule expressions, see [`ExclusionRule::parse`]
    pub fn parse_all<S: AsRef<str>>(exprs: &[S]) -> Result<Self> {
        let rules = exprs
            .iter()
            .map(|expr| ExclusionRule::parse(expr.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn push(&mut self, rule: ExclusionRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl ClipFilter for ExclusionSet {
    fn excludes(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(name))
    }
}
