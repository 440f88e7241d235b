//! Sort direction and field-value ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::row::Row;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending order (smallest first).
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl SortOrder {
    /// Next order when a column header is clicked.
    ///
    /// The cycle is `None → Asc → Desc → Asc → …`; once a column is sorted
    /// it never goes back to unsorted.
    ///
    /// ```
    /// use repodeck_table::SortOrder;
    ///
    /// assert_eq!(SortOrder::cycle(None), SortOrder::Asc);
    /// assert_eq!(SortOrder::cycle(Some(SortOrder::Asc)), SortOrder::Desc);
    /// assert_eq!(SortOrder::cycle(Some(SortOrder::Desc)), SortOrder::Asc);
    /// ```
    pub fn cycle(current: Option<SortOrder>) -> SortOrder {
        match current {
            Some(SortOrder::Asc) => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}', expected asc or desc")),
        }
    }
}

/// Rank of a value's type when two types meet in one column.
fn type_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::Timestamp(_) => 2,
        Value::String(_) => 3,
        Value::None => 4,
    }
}

/// Compares two field values.
///
/// This is a total order. Values of one type compare naturally (numbers by
/// exact value, NaN last). Mixed types group as bools, numbers, timestamps,
/// strings, and missing values go after everything.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Orders two rows by the field at `path` in the given direction.
///
/// Missing values go last ascending and first descending.
pub fn compare_rows<T: Row + ?Sized>(a: &T, b: &T, path: &str, order: SortOrder) -> Ordering {
    order.apply(compare_values(&a.field(path), &b.field(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    #[test]
    fn apply_reverses_for_desc() {
        assert_eq!(SortOrder::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn cycle_never_returns_to_unsorted() {
        let mut order = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            let next = SortOrder::cycle(order);
            seen.push(next);
            order = Some(next);
        }
        assert_eq!(
            seen,
            vec![
                SortOrder::Asc,
                SortOrder::Desc,
                SortOrder::Asc,
                SortOrder::Desc,
                SortOrder::Asc
            ]
        );
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("up".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }

    #[test]
    fn compare_same_types() {
        assert_eq!(
            compare_values(&Value::String("apple"), &Value::String("banana")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(
                &Value::Number(Number::I64(20)),
                &Value::Number(Number::U64(10))
            ),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(
                &Value::Timestamp(Timestamp(1)),
                &Value::Timestamp(Timestamp(1))
            ),
            Ordering::Equal
        );
        assert_eq!(
            compare_values(&Value::Bool(false), &Value::Bool(true)),
            Ordering::Less
        );
    }

    #[test]
    fn missing_values_sort_last() {
        let none = Value::None;
        let some = Value::String("x");
        assert_eq!(compare_values(&none, &some), Ordering::Greater);
        assert_eq!(compare_values(&some, &none), Ordering::Less);
        assert_eq!(compare_values(&none, &none), Ordering::Equal);
    }

    #[test]
    fn mixed_types_group_by_kind() {
        let values = [
            Value::String("1"),
            Value::None,
            Value::Timestamp(Timestamp(5)),
            Value::Number(Number::I64(1)),
            Value::Bool(true),
        ];
        let mut sorted = values.to_vec();
        sorted.sort_by(compare_values);
        assert_eq!(
            sorted,
            vec![
                Value::Bool(true),
                Value::Number(Number::I64(1)),
                Value::Timestamp(Timestamp(5)),
                Value::String("1"),
                Value::None,
            ]
        );
        assert_eq!(
            compare_values(&Value::String("1"), &Value::Number(Number::I64(1))),
            Ordering::Greater
        );
    }

    #[test]
    fn comparison_is_transitive_across_types() {
        let values = [
            Value::Number(Number::I64(1)),
            Value::String("s5"),
            Value::Number(Number::U64(0)),
            Value::Number(Number::F64(0.5)),
            Value::Number(Number::F64(f64::NAN)),
            Value::None,
            Value::Bool(false),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(compare_values(a, b), compare_values(b, a).reverse());
                for c in &values {
                    if compare_values(a, b).is_le() && compare_values(b, c).is_le() {
                        assert!(compare_values(a, c).is_le(), "{a:?} <= {b:?} <= {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn compare_rows_by_path() {
        let a = serde_json::json!({ "owner": { "login": "alice" }, "stars": 5 });
        let b = serde_json::json!({ "owner": { "login": "bob" } });

        assert_eq!(
            compare_rows(&a, &b, "owner.login", SortOrder::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_rows(&a, &b, "owner.login", SortOrder::Desc),
            Ordering::Greater
        );
        // b has no stars, so it goes last ascending and first descending
        assert_eq!(compare_rows(&a, &b, "stars", SortOrder::Asc), Ordering::Less);
        assert_eq!(compare_rows(&a, &b, "stars", SortOrder::Desc), Ordering::Greater);
        assert_eq!(compare_rows(&a, &a, "missing", SortOrder::Asc), Ordering::Equal);
    }
}
