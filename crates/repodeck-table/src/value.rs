//! Runtime value types for field lookup and comparison.
//!
//! [`Value`] is what a row hands back when the engine asks for a field. It
//! borrows from the row, so looking a field up never allocates.
//! [`OwnedValue`] is the owned twin, used where a value has to outlive the
//! row it came from (select options, for instance).

use std::cmp::Ordering;
use std::fmt;

/// Runtime value of a row field, borrowed from the row.
///
/// # Example
///
/// ```
/// use repodeck_table::{Number, Value};
///
/// struct Repo {
///     name: String,
///     stars: u64,
/// }
///
/// fn field<'a>(repo: &'a Repo, path: &str) -> Value<'a> {
///     match path {
///         "name" => Value::String(&repo.name),
///         "stars" => Value::Number(Number::U64(repo.stars)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or not representable.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Copies this value into an [`OwnedValue`].
    pub fn to_owned_value(&self) -> OwnedValue {
        match self {
            Value::String(s) => OwnedValue::String((*s).to_string()),
            Value::Number(n) => OwnedValue::Number(*n),
            Value::Timestamp(t) => OwnedValue::Timestamp(*t),
            Value::Bool(b) => OwnedValue::Bool(*b),
            Value::None => OwnedValue::None,
        }
    }

    /// Short type name, used in log output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Timestamp(_) => "timestamp",
            Value::Bool(_) => "bool",
            Value::None => "none",
        }
    }
}

/// Owned counterpart of [`Value`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OwnedValue {
    String(String),
    Number(Number),
    Timestamp(Timestamp),
    Bool(bool),
    #[default]
    None,
}

impl OwnedValue {
    /// Borrows this value as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            OwnedValue::String(s) => Value::String(s),
            OwnedValue::Number(n) => Value::Number(*n),
            OwnedValue::Timestamp(t) => Value::Timestamp(*t),
            OwnedValue::Bool(b) => Value::Bool(*b),
            OwnedValue::None => Value::None,
        }
    }

    /// Strict equality against a field value.
    ///
    /// Numbers compare across representations (`I64(3)` equals `U64(3)`).
    /// A `None` never equals anything, itself included, mirroring how a
    /// missing field never satisfies a select filter.
    pub fn equals(&self, field: &Value<'_>) -> bool {
        match (self, field) {
            (OwnedValue::String(a), Value::String(b)) => a == b,
            (OwnedValue::Number(a), Value::Number(b)) => a.compare(*b) == Some(Ordering::Equal),
            (OwnedValue::Timestamp(a), Value::Timestamp(b)) => a == b,
            (OwnedValue::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for OwnedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnedValue::String(s) => f.write_str(s),
            OwnedValue::Number(n) => write!(f, "{n}"),
            OwnedValue::Timestamp(t) => write!(f, "{}", t.as_millis()),
            OwnedValue::Bool(b) => write!(f, "{b}"),
            OwnedValue::None => Ok(()),
        }
    }
}

impl From<String> for OwnedValue {
    fn from(s: String) -> Self {
        OwnedValue::String(s)
    }
}

impl From<&str> for OwnedValue {
    fn from(s: &str) -> Self {
        OwnedValue::String(s.to_string())
    }
}

impl From<bool> for OwnedValue {
    fn from(b: bool) -> Self {
        OwnedValue::Bool(b)
    }
}

impl From<Timestamp> for OwnedValue {
    fn from(t: Timestamp) -> Self {
        OwnedValue::Timestamp(t)
    }
}

macro_rules! number_like {
    ($($t:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $cast)
                }
            }

            impl From<$t> for OwnedValue {
                fn from(n: $t) -> Self {
                    OwnedValue::Number(Number::from(n))
                }
            }

            impl AsValue for $t {
                fn as_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

number_like! {
    i8 => I64 as i64,
    i16 => I64 as i64,
    i32 => I64 as i64,
    i64 => I64 as i64,
    isize => I64 as i64,
    u8 => U64 as u64,
    u16 => U64 as u64,
    u32 => U64 as u64,
    u64 => U64 as u64,
    usize => U64 as u64,
    f32 => F64 as f64,
    f64 => F64 as f64,
}

/// Conversion from a field's Rust type into a borrowed [`Value`].
///
/// `#[derive(Row)]` calls this for every field not marked `nested` or `skip`.
pub trait AsValue {
    fn as_value(&self) -> Value<'_>;
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl AsValue for Timestamp {
    fn as_value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }
}

impl AsValue for OwnedValue {
    fn as_value(&self) -> Value<'_> {
        OwnedValue::as_value(self)
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.as_value(),
            None => Value::None,
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision.
/// Comparisons between variants are exact; no side is rounded through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

/// 2^63 and 2^64, both exact in `f64`.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

impl Number {
    /// Converts the number to f64. Large integers lose precision.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Compares two numbers by their exact value.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            None
        } else {
            Some(self.total_cmp(other))
        }
    }

    /// A total order over all numbers: exact value first, NaN after
    /// everything else. `-0.0` and `0.0` are equal.
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use repodeck_table::Number;
    ///
    /// assert_eq!(Number::I64(-1).total_cmp(Number::U64(0)), Ordering::Less);
    /// assert_eq!(Number::U64(9_007_199_254_740_993).total_cmp(Number::F64(9_007_199_254_740_992.0)), Ordering::Greater);
    /// assert_eq!(Number::F64(f64::NAN).total_cmp(Number::F64(f64::INFINITY)), Ordering::Greater);
    /// ```
    pub fn total_cmp(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.cmp(&b),
            (Number::U64(a), Number::U64(b)) => a.cmp(&b),
            (Number::I64(a), Number::U64(b)) => cmp_i64_u64(a, b),
            (Number::U64(a), Number::I64(b)) => cmp_i64_u64(b, a).reverse(),
            (Number::F64(a), Number::F64(b)) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                // non-NaN, so partial_cmp is total here
                (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            },
            (Number::F64(a), Number::I64(b)) => cmp_f64_i64(a, b),
            (Number::I64(a), Number::F64(b)) => cmp_f64_i64(b, a).reverse(),
            (Number::F64(a), Number::U64(b)) => cmp_f64_u64(a, b),
            (Number::U64(a), Number::F64(b)) => cmp_f64_u64(b, a).reverse(),
        }
    }
}

fn cmp_i64_u64(a: i64, b: u64) -> Ordering {
    match u64::try_from(a) {
        Ok(a) => a.cmp(&b),
        Err(_) => Ordering::Less,
    }
}

/// Orders a float against an integer once the integer part is known to fit.
fn cmp_fraction(f: f64, whole: Ordering) -> Ordering {
    whole.then_with(|| {
        let fract = f.fract();
        if fract > 0.0 {
            Ordering::Greater
        } else if fract < 0.0 {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
}

fn cmp_f64_i64(f: f64, n: i64) -> Ordering {
    if f.is_nan() || f >= TWO_POW_63 {
        Ordering::Greater
    } else if f < -TWO_POW_63 {
        Ordering::Less
    } else {
        // in range, so truncation is exact
        cmp_fraction(f, (f.trunc() as i64).cmp(&n))
    }
}

fn cmp_f64_u64(f: f64, n: u64) -> Ordering {
    if f.is_nan() || f >= TWO_POW_64 {
        Ordering::Greater
    } else if f < 0.0 {
        Ordering::Less
    } else {
        cmp_fraction(f, (f.trunc() as u64).cmp(&n))
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// ```
/// use repodeck_table::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }
}
