//! Structural validation of documents.
//!
//! Each schema type implements [`Validate`] by hand, walking its own fields
//! through a [`Validator`]. A field is checked with a chain such as
//!
//! ```
//! # use vdoc_core::validate::Validator;
//! # let size: Option<i64> = Some(3);
//! # let min: Option<i64> = Some(2);
//! # let max: Option<i64> = Some(5);
//! let mut v = Validator::new("Pool");
//! v.field("Size", size).required().min(0).gte_field("Min", min).lte_field("Max", max);
//! assert!(v.finish().is_ok());
//! ```
//!
//! The first rule that fails ends the chain for that field. Other fields are
//! still checked, so a single pass reports every violation in the tree.

use std::fmt;

use crate::version::SchemaVersion;

/// A validation rule that a field can violate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present (and, for value types, non-empty).
    Required,
    /// Numbers must be at least N; strings and sequences must have at least N elements.
    Min(i64),
    /// Must be greater than or equal to the named sibling field.
    GteField(&'static str),
    /// Must be less than or equal to the named sibling field.
    LteField(&'static str),
    /// Must equal one of the listed literals.
    OneOf(&'static [&'static str]),
    /// Must be a `vX.Y.Z` version in the same major.minor series as the baseline.
    Version(SchemaVersion),
}

impl Rule {
    /// The short tag of the rule, without parameters.
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Min(_) => "min",
            Rule::GteField(_) => "gtefield",
            Rule::LteField(_) => "ltefield",
            Rule::OneOf(_) => "eq",
            Rule::Version(_) => "version",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "required"),
            Rule::Min(n) => write!(f, "min={}", n),
            Rule::GteField(other) => write!(f, "gtefield={}", other),
            Rule::LteField(other) => write!(f, "ltefield={}", other),
            Rule::OneOf(allowed) => {
                let alternatives: Vec<String> =
                    allowed.iter().map(|a| format!("eq={}", a)).collect();
                write!(f, "{}", alternatives.join("|"))
            }
            Rule::Version(baseline) => write!(f, "version=~v{}.{}", baseline.major, baseline.minor),
        }
    }
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Fully qualified in-memory path, e.g. `Config.Params.DefaultNodePool.Size`
    pub path: String,
    /// The last segment of `path`
    pub field: String,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}' ({}) failed on rule '{}'",
            self.field, self.path, self.rule
        )
    }
}

/// All violations found in a document, in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }

    /// Find the violation reported for a fully qualified path, if any.
    pub fn get(&self, path: &str) -> Option<&Violation> {
        self.0.iter().find(|v| v.path == path)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Implemented by every schema type that can be checked.
pub trait Validate {
    /// Report this value's violations into `v`, relative to its current path.
    fn validate_into(&self, v: &mut Validator);
}

/// Collects violations while walking a document.
pub struct Validator {
    path: Vec<String>,
    violations: Vec<Violation>,
}

impl Validator {
    /// Start a walk at the root type, e.g. `Config` or `State`.
    pub fn new(root: &str) -> Self {
        Validator {
            path: vec![root.to_string()],
            violations: Vec::new(),
        }
    }

    /// Begin checking a field. `None` means the field is absent.
    pub fn field<T>(&mut self, name: &str, value: Option<T>) -> Field<'_, T> {
        Field {
            validator: self,
            name: name.to_string(),
            value,
        }
    }

    pub fn report(&mut self, field: &str, rule: Rule) {
        let mut path = self.path.join(".");
        path.push('.');
        path.push_str(field);
        self.violations.push(Violation {
            path,
            field: field.to_string(),
            rule,
        });
    }

    pub fn finish(self) -> Result<(), Violations> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(Violations(self.violations))
        }
    }
}

/// Anything `min` can be applied to: numbers by value, strings by character
/// count, sequences by length.
pub trait Measure {
    fn measure(&self) -> i64;
}

impl Measure for i64 {
    fn measure(&self) -> i64 {
        *self
    }
}

impl Measure for str {
    fn measure(&self) -> i64 {
        self.chars().count() as i64
    }
}

impl Measure for String {
    fn measure(&self) -> i64 {
        self.as_str().measure()
    }
}

impl<E> Measure for [E] {
    fn measure(&self) -> i64 {
        self.len() as i64
    }
}

impl<E> Measure for Vec<E> {
    fn measure(&self) -> i64 {
        self.len() as i64
    }
}

impl<T: Measure + ?Sized> Measure for &T {
    fn measure(&self) -> i64 {
        (**self).measure()
    }
}

/// A field under validation. Once a rule fails, the value is dropped and the
/// remaining rules in the chain become no-ops.
pub struct Field<'v, T> {
    validator: &'v mut Validator,
    name: String,
    value: Option<T>,
}

impl<'v, T> Field<'v, T> {
    pub fn required(self) -> Self {
        if self.value.is_none() {
            self.validator.report(&self.name, Rule::Required);
        }
        self
    }

    fn check(mut self, ok: impl FnOnce(&T) -> bool, rule: impl FnOnce() -> Rule) -> Self {
        if self.value.as_ref().is_some_and(|value| !ok(value)) {
            self.validator.report(&self.name, rule());
            self.value = None;
        }
        self
    }

    /// Descend into a nested object. Absent values are skipped; chain
    /// `required` first if absence is an error.
    pub fn nested(mut self, f: impl FnOnce(&mut Validator, T)) {
        if let Some(value) = self.value.take() {
            self.validator.path.push(self.name);
            f(&mut *self.validator, value);
            self.validator.path.pop();
        }
    }
}

impl<'v, T: Measure> Field<'v, T> {
    /// Like `required`, but a present-but-empty value also counts as missing.
    pub fn non_empty(mut self) -> Self {
        let missing = self.value.as_ref().map_or(true, |value| value.measure() == 0);
        if missing {
            self.validator.report(&self.name, Rule::Required);
            self.value = None;
        }
        self
    }

    pub fn min(self, n: i64) -> Self {
        self.check(|value| value.measure() >= n, || Rule::Min(n))
    }
}

impl<'v> Field<'v, i64> {
    /// `other` is the sibling's value; the check is skipped when it is absent.
    pub fn gte_field(self, other_name: &'static str, other: Option<i64>) -> Self {
        self.check(
            |value| other.map_or(true, |other| *value >= other),
            || Rule::GteField(other_name),
        )
    }

    /// `other` is the sibling's value; the check is skipped when it is absent.
    pub fn lte_field(self, other_name: &'static str, other: Option<i64>) -> Self {
        self.check(
            |value| other.map_or(true, |other| *value <= other),
            || Rule::LteField(other_name),
        )
    }
}

impl<'v, T: AsRef<str>> Field<'v, T> {
    pub fn one_of(self, allowed: &'static [&'static str]) -> Self {
        self.check(
            |value| allowed.contains(&value.as_ref()),
            || Rule::OneOf(allowed),
        )
    }

    /// The value must parse as a version in the baseline's major.minor series.
    pub fn version(self, baseline: SchemaVersion) -> Self {
        self.check(
            |value| crate::version::check(&baseline, value.as_ref()).unwrap_or(false),
            || Rule::Version(baseline),
        )
    }
}

impl<'v, 'a, E> Field<'v, &'a [E]> {
    /// Check each element as a field of its own, named `Name[i]`.
    pub fn dive(self, mut f: impl FnMut(Field<'_, &'a E>)) {
        let Field {
            validator,
            name,
            value,
        } = self;
        if let Some(items) = value {
            for (i, item) in items.iter().enumerate() {
                f(Field {
                    validator: &mut *validator,
                    name: format!("{}[{}]", name, i),
                    value: Some(item),
                });
            }
        }
    }
}
