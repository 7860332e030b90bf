//! Single requirement entries and their version constraints.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").expect("static regex")
});

static NAME_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?").expect("static regex")
});

static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(===|~=|==|!=|<=|>=|<|>)\s*([A-Za-z0-9.*+!_-]+)$").expect("static regex")
});

/// Version comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    /// `~=`
    Compatible,
    /// `===`
    Arbitrary,
}

impl Comparison {
    fn parse(op: &str) -> Option<Self> {
        Some(match op {
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<=" => Self::LessEqual,
            ">=" => Self::GreaterEqual,
            "<" => Self::Less,
            ">" => Self::Greater,
            "~=" => Self::Compatible,
            "===" => Self::Arbitrary,
            _ => return None,
        })
    }

    /// Operator as written in a manifest.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Compatible => "~=",
            Self::Arbitrary => "===",
        }
    }
}

/// One `op version` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpecifier {
    pub op: Comparison,
    pub version: String,
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.version)
    }
}

/// Version constraint attached to a requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Comma separated clauses, all of which must hold.
    Specifiers(Vec<VersionSpecifier>),
    /// Direct reference (`name @ url`).
    Url(String),
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Specifiers(specs) => {
                let joined: Vec<String> = specs.iter().map(ToString::to_string).collect();
                f.write_str(&joined.join(","))
            }
            Self::Url(url) => write!(f, " @ {url}"),
        }
    }
}

/// A package the application needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub extras: Vec<String>,
    pub constraint: Option<VersionConstraint>,
    /// Environment marker, kept verbatim for pip to evaluate.
    pub marker: Option<String>,
    /// 1-based line the entry starts on.
    pub line: usize,
}

impl Requirement {
    /// Parses one requirement line with comments already stripped.
    ///
    /// Returns the rejection reason on failure.
    pub(super) fn parse(text: &str, line: usize) -> Result<Self, String> {
        let (body, marker) = match text.split_once(';') {
            Some((body, marker)) => {
                let marker = marker.trim();
                if marker.is_empty() {
                    return Err("empty environment marker after ';'".into());
                }
                (body.trim(), Some(marker.to_string()))
            }
            None => (text.trim(), None),
        };

        let name = NAME_PREFIX_RE
            .find(body)
            .map(|m| m.as_str())
            .ok_or_else(|| "does not start with a valid package name".to_string())?;
        let mut rest = body[name.len()..].trim_start();

        let mut extras = Vec::new();
        if let Some(after) = rest.strip_prefix('[') {
            let (inner, tail) = after
                .split_once(']')
                .ok_or_else(|| "unterminated extras list".to_string())?;
            for extra in inner.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                if !NAME_RE.is_match(extra) {
                    return Err(format!("invalid extra name `{extra}`"));
                }
                extras.push(extra.to_string());
            }
            rest = tail.trim_start();
        }

        let constraint = if rest.is_empty() {
            None
        } else if let Some(url) = rest.strip_prefix('@') {
            let url = url.trim();
            if url.is_empty() {
                return Err("missing URL after '@'".into());
            }
            Some(VersionConstraint::Url(url.to_string()))
        } else {
            Some(VersionConstraint::Specifiers(parse_specifiers(rest)?))
        };

        Ok(Self {
            name: name.to_string(),
            extras,
            constraint,
            marker,
            line,
        })
    }

    /// Name normalized for comparison: lowercase with `-`, `_` and `.` runs folded to `-`.
    pub fn normalized_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut last_sep = false;
        for c in self.name.chars() {
            if matches!(c, '-' | '_' | '.') {
                if !last_sep {
                    out.push('-');
                }
                last_sep = true;
            } else {
                out.push(c.to_ascii_lowercase());
                last_sep = false;
            }
        }
        out
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        if let Some(constraint) = &self.constraint {
            write!(f, "{constraint}")?;
        }
        if let Some(marker) = &self.marker {
            write!(f, "; {marker}")?;
        }
        Ok(())
    }
}

fn parse_specifiers(text: &str) -> Result<Vec<VersionSpecifier>, String> {
    let text = text.trim();
    let text = match text.strip_prefix('(') {
        Some(inner) => inner
            .strip_suffix(')')
            .ok_or_else(|| "unbalanced parenthesis in version constraint".to_string())?,
        None => text,
    };

    text.split(',')
        .map(str::trim)
        .map(|clause| {
            if clause.is_empty() {
                return Err("empty version clause".to_string());
            }
            let caps = SPECIFIER_RE
                .captures(clause)
                .ok_or_else(|| format!("invalid version clause `{clause}`"))?;
            let op = Comparison::parse(&caps[1])
                .ok_or_else(|| format!("unknown operator in `{clause}`"))?;
            Ok(VersionSpecifier {
                op,
                version: caps[2].to_string(),
            })
        })
        .collect()
}
