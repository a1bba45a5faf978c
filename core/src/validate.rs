//! Field-level validation.
//!
//! `#[derive(Validate)]` turns `#[validate(...)]` attributes into calls to the checks in this
//! module. Each field reports at most one violation: the first rule it fails, in the order
//! required, one_of, range, max_length.
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    Required,
    OneOf { allowed: &'static [&'static str] },
    Range { min: Option<i64>, max: Option<i64> },
    MaxLength { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    #[serde(flatten)]
    pub rule: Rule,
}

impl Violation {
    pub fn new(field: &'static str, rule: Rule) -> Self {
        Self { field, rule }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field;
        match &self.rule {
            Rule::Required => write!(f, "{field} is required"),
            Rule::OneOf { allowed } => write!(f, "{field} must be one of: {}", allowed.join(", ")),
            Rule::Range { min: Some(min), max: Some(max) } => write!(f, "{field} must be between {min} and {max}"),
            Rule::Range { min: Some(min), max: None } => write!(f, "{field} must be at least {min}"),
            Rule::Range { min: None, max: Some(max) } => write!(f, "{field} must be at most {max}"),
            Rule::Range { min: None, max: None } => write!(f, "{field} is out of range"),
            Rule::MaxLength { max } => write!(f, "{field} must be at most {max} characters"),
        }
    }
}

/// Every violation found on a value, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// The violation reported for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&Violation> {
        self.0.iter().find(|v| v.field == field)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether a value counts as provided. Zero values (empty, 0, false, None) don't.
pub trait Presence {
    fn is_present(&self) -> bool;
}

/// The textual form compared by `one_of`. `None` skips the rule.
pub trait Literal {
    fn literal(&self) -> Option<Cow<'_, str>>;
}

/// The numeric value compared by `min`/`max`. `None` skips the rule.
pub trait Bounded {
    fn bounded_value(&self) -> Option<i128>;
}

/// Length in characters compared by `max_length` and column sizes. `None` skips the rule.
pub trait Measured {
    fn char_len(&self) -> Option<usize>;
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl Literal for str {
    fn literal(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl Literal for String {
    fn literal(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<T: Literal> Literal for Option<T> {
    fn literal(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(Literal::literal)
    }
}

impl<T: Bounded> Bounded for Option<T> {
    fn bounded_value(&self) -> Option<i128> {
        self.as_ref().and_then(Bounded::bounded_value)
    }
}

impl Measured for str {
    fn char_len(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Measured for String {
    fn char_len(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl<T: Measured> Measured for Option<T> {
    fn char_len(&self) -> Option<usize> {
        self.as_ref().and_then(Measured::char_len)
    }
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl Presence for $t {
                fn is_present(&self) -> bool {
                    *self != 0
                }
            }

            impl Literal for $t {
                fn literal(&self) -> Option<Cow<'_, str>> {
                    Some(Cow::Owned(self.to_string()))
                }
            }

            impl Bounded for $t {
                fn bounded_value(&self) -> Option<i128> {
                    Some(*self as i128)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Presence for f32 {
    fn is_present(&self) -> bool {
        *self != 0.0
    }
}

impl Presence for f64 {
    fn is_present(&self) -> bool {
        *self != 0.0
    }
}

pub fn check_required<T: Presence + ?Sized>(value: &T) -> bool {
    value.is_present()
}

pub fn check_one_of<T: Literal + ?Sized>(value: &T, allowed: &[&str]) -> bool {
    match value.literal() {
        Some(v) => allowed.iter().any(|a| *a == v),
        None => true,
    }
}

pub fn check_range<T: Bounded + ?Sized>(value: &T, min: Option<i64>, max: Option<i64>) -> bool {
    let Some(v) = value.bounded_value() else {
        return true;
    };
    min.map_or(true, |min| v >= min as i128) && max.map_or(true, |max| v <= max as i128)
}

pub fn check_max_length<T: Measured + ?Sized>(value: &T, max: usize) -> bool {
    value.char_len().map_or(true, |len| len <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_are_absent() {
        assert!(!check_required(""));
        assert!(!check_required(&0i64));
        assert!(!check_required(&false));
        assert!(!check_required(&None::<String>));
        assert!(check_required(&Some(String::new())));
        assert!(check_required(&-1i32));
        assert!(check_required("x"));
    }

    #[test]
    fn test_one_of_is_exact() {
        let allowed = ["male", "female"];
        assert!(check_one_of("male", &allowed));
        assert!(check_one_of(&"female".to_string(), &allowed));
        assert!(!check_one_of("Male", &allowed));
        assert!(!check_one_of(" male", &allowed));
        assert!(!check_one_of("other", &allowed));
        assert!(check_one_of(&None::<String>, &allowed));
        assert!(check_one_of(&3u8, &["1", "3"]));
    }

    #[test]
    fn test_range_is_inclusive() {
        let in_range = |n: i64| check_range(&n, Some(1), Some(100));
        assert!(in_range(1));
        assert!(in_range(100));
        assert!(!in_range(0));
        assert!(!in_range(-5));
        assert!(!in_range(101));
        assert!(check_range(&u64::MAX, Some(0), None));
        assert!(!check_range(&u64::MAX, None, Some(i64::MAX)));
        assert!(check_range(&None::<i32>, Some(1), Some(2)));
    }

    #[test]
    fn test_max_length_counts_characters() {
        assert!(check_max_length("héllo", 5));
        assert!(!check_max_length("héllo!", 5));
        assert!(check_max_length(&"a".repeat(255), 255));
        assert!(!check_max_length(&"a".repeat(256), 255));
    }

    #[test]
    fn test_messages() {
        let mut errors = ValidationErrors::new();
        errors.push(Violation::new("Name", Rule::Required));
        errors.push(Violation::new("Gender", Rule::OneOf { allowed: &["male", "female"] }));
        errors.push(Violation::new("Age", Rule::Range { min: Some(1), max: Some(100) }));
        assert_eq!(
            errors.to_string(),
            "Name is required; Gender must be one of: male, female; Age must be between 1 and 100"
        );
        assert_eq!(errors.field("Age").map(|v| &v.rule), Some(&Rule::Range { min: Some(1), max: Some(100) }));
        assert!(errors.field("Nickname").is_none());
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_serialize() {
        let mut errors = ValidationErrors::new();
        errors.push(Violation::new("Gender", Rule::OneOf { allowed: &["male", "female"] }));
        errors.push(Violation::new("name", Rule::MaxLength { max: 255 }));
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"[{"field":"Gender","rule":"one_of","allowed":["male","female"]},{"field":"name","rule":"max_length","max":255}]"#
        );
    }
}
