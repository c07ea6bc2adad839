//! Dotted version comparison for `plugin_version` rules.
//!
//! Versions are canonicalised before comparison: `_`, `-` and `+` become
//! `.`, and a `.` is inserted wherever a digit run meets a non-digit run, so
//! `"1.0rc1"` compares as `1.0.rc.1`.  Segments then compare left to right:
//!
//! - two numbers compare numerically;
//! - otherwise by rank: unknown label < `dev` < `alpha`/`a` < `beta`/`b`
//!   < `rc` < any number < `pl`/`p`.
//!
//! When one side runs out, the first extra segment of the longer side
//! decides: a number makes it greater (`2.0 < 2.0.1`), a pre-release label
//! makes it smaller (`2.0rc1 < 2.0`).

use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// VersionOperator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOperator {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl VersionOperator {
    /// Accepts both symbolic and mnemonic spellings (`>=` / `ge`).
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "<" | "lt" => Some(Self::Lt),
            "<=" | "le" => Some(Self::Le),
            "==" | "=" | "eq" => Some(Self::Eq),
            "!=" | "<>" | "ne" => Some(Self::Ne),
            ">=" | "ge" => Some(Self::Ge),
            ">" | "gt" => Some(Self::Gt),
            _ => None,
        }
    }

    /// Does `installed <op> required` hold?
    pub fn holds(self, installed: &str, required: &str) -> bool {
        let ord = compare_versions(installed, required);
        match self {
            Self::Lt => ord == Ordering::Less,
            Self::Le => ord != Ordering::Greater,
            Self::Eq => ord == Ordering::Equal,
            Self::Ne => ord != Ordering::Equal,
            Self::Ge => ord != Ordering::Less,
            Self::Gt => ord == Ordering::Greater,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Ge => ">=",
            Self::Gt => ">",
        }
    }
}

impl fmt::Display for VersionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Num(u64),
    Label(i8),
}

const NUMBER_RANK: i8 = 4;

impl Segment {
    fn parse(s: &str) -> Self {
        if s.bytes().all(|b| b.is_ascii_digit()) {
            return Segment::Num(s.parse().unwrap_or(u64::MAX));
        }
        let rank = match s.to_ascii_lowercase().as_str() {
            "dev" => 0,
            "alpha" | "a" => 1,
            "beta" | "b" => 2,
            "rc" => 3,
            "pl" | "p" => 5,
            _ => -1,
        };
        Segment::Label(rank)
    }

    fn rank(self) -> i8 {
        match self {
            Segment::Num(_) => NUMBER_RANK,
            Segment::Label(r) => r,
        }
    }

    fn cmp_to(self, other: Segment) -> Ordering {
        match (self, other) {
            (Segment::Num(a), Segment::Num(b)) => a.cmp(&b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// How a trailing segment ranks against "nothing": numbers extend a
    /// version, labels other than `pl` precede the release.
    fn cmp_to_end(self) -> Ordering {
        match self {
            Segment::Num(_) => Ordering::Greater,
            Segment::Label(r) => r.cmp(&NUMBER_RANK),
        }
    }
}

fn segments(version: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    for ch in version.trim().chars() {
        if matches!(ch, '.' | '_' | '-' | '+') {
            if !current.is_empty() {
                out.push(Segment::parse(&current));
                current.clear();
            }
            continue;
        }
        let is_digit = ch.is_ascii_digit();
        if !current.is_empty() && is_digit != current_is_digit {
            out.push(Segment::parse(&current));
            current.clear();
        }
        current_is_digit = is_digit;
        current.push(ch);
    }
    if !current.is_empty() {
        out.push(Segment::parse(&current));
    }
    out
}

/// Compare two version strings.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = l.cmp_to(*r);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    match left.len().cmp(&right.len()) {
        Ordering::Equal => Ordering::Equal,
        Ordering::Greater => left[right.len()].cmp_to_end(),
        Ordering::Less => right[left.len()].cmp_to_end().reverse(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
