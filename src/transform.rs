//! Key renaming for records and arrays of records.

use smol_str::SmolStr;
use std::borrow::Cow;
use tracing::trace;

use crate::value::{FastMap, Record, RecordValue};

/// Source field name → destination field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformMapping {
    renames: FastMap<SmolStr, SmolStr>,
}

impl TransformMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: impl Into<SmolStr>, to: impl Into<SmolStr>) {
        self.renames.insert(from.into(), to.into());
    }

    #[inline]
    pub fn get(&self, from: &str) -> Option<&str> {
        self.renames.get(from).map(SmolStr::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.renames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Read a mapping out of an object value. Entries whose destination is
    /// not a string are skipped. `None` if `value` is not an object.
    pub fn from_value(value: &RecordValue) -> Option<Self> {
        let obj = value.as_object()?;
        Some(
            obj.iter()
                .filter_map(|(from, to)| Some((from.clone(), SmolStr::new(to.as_str()?))))
                .collect(),
        )
    }

    /// Output key for source key `key`. An empty destination counts as no
    /// rename.
    #[inline]
    pub fn rename<'a>(&'a self, key: &'a str) -> &'a str {
        match self.get(key) {
            Some(to) if !to.is_empty() => to,
            _ => key,
        }
    }
}

impl<K: Into<SmolStr>, V: Into<SmolStr>> FromIterator<(K, V)> for TransformMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            renames: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Rename the keys of one record. Unmapped fields pass through; field order
/// follows the source.
pub fn transform_record(record: &Record, mapping: &TransformMapping) -> Record {
    let mut out = Record::with_capacity_and_hasher(record.len(), Default::default());
    for (key, value) in record {
        let renamed = mapping.rename(key);
        let out_key = if renamed == key.as_str() {
            key.clone()
        } else {
            SmolStr::new(renamed)
        };
        out.insert(out_key, value.clone());
    }
    out
}

/// Rename keys of a record, or of every record in an array.
///
/// Without a mapping the source itself is handed back (`Cow::Borrowed`).
/// With a mapping, even an empty one, the result is always a new value.
/// Array elements and top-level values that are not objects are cloned
/// unchanged.
pub fn transform<'a>(
    source: &'a RecordValue,
    mapping: Option<&TransformMapping>,
) -> Cow<'a, RecordValue> {
    let Some(mapping) = mapping else {
        return Cow::Borrowed(source);
    };
    trace!(kind = source.kind(), renames = mapping.len(), "transforming keys");
    let out = match source {
        RecordValue::Object(record) => RecordValue::Object(transform_record(record, mapping)),
        RecordValue::Array(items) => RecordValue::Array(
            items
                .iter()
                .map(|item| match item {
                    RecordValue::Object(record) => {
                        RecordValue::Object(transform_record(record, mapping))
                    }
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    };
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    fn keys(value: &RecordValue) -> Vec<&str> {
        value
            .as_object()
            .map(|m| m.keys().map(SmolStr::as_str).collect())
            .unwrap_or_default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // No mapping / empty mapping
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_no_mapping_returns_same_object() {
        let source = record!({ "name" => "Alice", "age" => 30i64 });
        let out = transform(&source, None);
        assert!(matches!(out, Cow::Borrowed(r) if std::ptr::eq(r, &source)));
    }

    #[test]
    fn test_no_mapping_returns_same_array() {
        let source = RecordValue::Array(vec![record!({ "id" => 1i64, "value" => "A" })]);
        let out = transform(&source, None);
        assert!(matches!(out, Cow::Borrowed(r) if std::ptr::eq(r, &source)));
    }

    #[test]
    fn test_empty_mapping_returns_new_equal_object() {
        let source = record!({ "name" => "Alice", "age" => 30i64 });
        let mapping = TransformMapping::new();
        let out = transform(&source, Some(&mapping));
        assert!(matches!(out, Cow::Owned(_)));
        assert_eq!(out.as_ref(), &source);
        assert_eq!(keys(&out), ["name", "age"]);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Single object
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_rename_all_keys() {
        let source = record!({ "firstName" => "Bob", "lastName" => "Smith", "userAge" => 42i64 });
        let mapping: TransformMapping = [
            ("firstName", "name"),
            ("lastName", "surname"),
            ("userAge", "age"),
        ]
        .into_iter()
        .collect();
        let out = transform(&source, Some(&mapping));
        assert_eq!(
            out.into_owned(),
            record!({ "name" => "Bob", "surname" => "Smith", "age" => 42i64 })
        );
    }

    #[test]
    fn test_rename_some_keys_preserves_order() {
        let source = record!({ "firstName" => "Bob", "lastName" => "Smith" });
        let mapping: TransformMapping = [("firstName", "name")].into_iter().collect();
        let out = transform(&source, Some(&mapping));
        assert_eq!(keys(&out), ["name", "lastName"]);
        assert_eq!(out.get("name").and_then(|v| v.as_str()), Some("Bob"));
        assert_eq!(out.get("lastName").and_then(|v| v.as_str()), Some("Smith"));
    }

    #[test]
    fn test_source_untouched() {
        let source = record!({ "user_id" => 1i64, "user_name" => "Eve" });
        let before = source.clone();
        let mapping: TransformMapping = [("user_id", "id")].into_iter().collect();
        let out = transform(&source, Some(&mapping)).into_owned();
        assert_eq!(source, before);
        assert_eq!(out, record!({ "id" => 1i64, "user_name" => "Eve" }));
    }

    #[test]
    fn test_empty_destination_keeps_key() {
        let source = record!({ "a" => 1i64 });
        let mapping: TransformMapping = [("a", "")].into_iter().collect();
        let out = transform(&source, Some(&mapping));
        assert_eq!(keys(&out), ["a"]);
    }

    #[test]
    fn test_colliding_destination_keeps_first_position_last_value() {
        let source = record!({ "a" => 1i64, "b" => 2i64 });
        let mapping: TransformMapping = [("a", "x"), ("b", "x")].into_iter().collect();
        let out = transform(&source, Some(&mapping)).into_owned();
        assert_eq!(out, record!({ "x" => 2i64 }));
    }

    #[test]
    fn test_nested_values_are_not_renamed() {
        let source = record!({ "old" => { "old" => 1i64 } });
        let mapping: TransformMapping = [("old", "new")].into_iter().collect();
        let out = transform(&source, Some(&mapping)).into_owned();
        assert_eq!(out, record!({ "new" => { "old" => 1i64 } }));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Arrays
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_rename_each_element() {
        let source = RecordValue::Array(vec![
            record!({ "user_id" => 101i64, "item" => "Book", "price" => 15i64 }),
            record!({ "user_id" => 102i64, "item" => "Pen", "price" => 2i64, "status" => "in_stock" }),
        ]);
        let mapping: TransformMapping =
            [("user_id", "userId"), ("item", "product")].into_iter().collect();
        let out = transform(&source, Some(&mapping)).into_owned();
        assert_eq!(
            out,
            RecordValue::Array(vec![
                record!({ "userId" => 101i64, "product" => "Book", "price" => 15i64 }),
                record!({ "userId" => 102i64, "product" => "Pen", "price" => 2i64, "status" => "in_stock" }),
            ])
        );
    }

    #[test]
    fn test_empty_array() {
        let source = RecordValue::Array(vec![]);
        let mapping: TransformMapping = [("id", "identifier")].into_iter().collect();
        let out = transform(&source, Some(&mapping));
        assert!(matches!(out, Cow::Owned(_)));
        assert_eq!(out.into_owned(), RecordValue::Array(vec![]));
    }

    #[test]
    fn test_non_object_elements_pass_through() {
        let source = RecordValue::Array(vec![RecordValue::from(1i64), record!({ "a" => 1i64 })]);
        let mapping: TransformMapping = [("a", "b")].into_iter().collect();
        let out = transform(&source, Some(&mapping)).into_owned();
        assert_eq!(
            out,
            RecordValue::Array(vec![RecordValue::from(1i64), record!({ "b" => 1i64 })])
        );
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Mapping construction
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_mapping_from_value_skips_non_strings() {
        let value = record!({ "a" => "x", "b" => 5i64, "c" => "z" });
        let mapping = TransformMapping::from_value(&value).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("a"), Some("x"));
        assert_eq!(mapping.get("b"), None);
        assert_eq!(mapping.rename("b"), "b");
    }

    #[test]
    fn test_mapping_from_non_object() {
        assert!(TransformMapping::from_value(&RecordValue::from(1i64)).is_none());
    }
}
