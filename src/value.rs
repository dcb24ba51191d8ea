use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use smol_str::SmolStr;
use std::fmt;

/// Insertion-ordered map. Field order of a record is the order fields were
/// first written.
pub type FastMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// A record: field name to value, in insertion order.
pub type Record = FastMap<SmolStr, RecordValue>;

// ─── RecordNumber ───────────────────────────────────────────────────────────

/// Numeric field value. Unsigned values that fit in `i64` are always stored
/// as `I64`, so `5u64` and `5i64` read back as equal fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl RecordNumber {
    fn unsigned(u: u64) -> Self {
        i64::try_from(u).map_or(RecordNumber::U64(u), RecordNumber::I64)
    }

    fn from_json(n: &serde_json::Number) -> Self {
        match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => RecordNumber::I64(i),
            (None, Some(u)) => RecordNumber::U64(u),
            _ => RecordNumber::F64(n.as_f64().unwrap_or(f64::NAN)),
        }
    }

    /// Integer view; floats only when they carry no fraction and fit.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            RecordNumber::I64(i) => Some(i),
            RecordNumber::U64(u) => i64::try_from(u).ok(),
            RecordNumber::F64(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
            RecordNumber::F64(_) => None,
        }
    }
}

// ─── RecordValue ────────────────────────────────────────────────────────────

/// Any value a record field can hold.
///
/// `Null` is an explicit null. A field that was never written is *absent*,
/// which readers express as `Option::None` rather than as `Null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecordValue {
    #[default]
    Null,
    Bool(bool),
    Number(RecordNumber),
    Str(SmolStr),
    Array(Vec<RecordValue>),
    Object(Record),
}

impl RecordValue {
    /// An empty object.
    pub fn object() -> Self {
        RecordValue::Object(Record::default())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecordValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Record> {
        match self {
            RecordValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Field `key` of an object; `None` for absent fields and non-objects.
    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.as_object()?.get(key)
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordValue::Null => "null",
            RecordValue::Bool(_) => "bool",
            RecordValue::Number(_) => "number",
            RecordValue::Str(_) => "string",
            RecordValue::Array(_) => "array",
            RecordValue::Object(_) => "object",
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// ─── Serialize ──────────────────────────────────────────────────────────────

impl Serialize for RecordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordValue::Null => serializer.serialize_none(),
            RecordValue::Bool(b) => serializer.serialize_bool(*b),
            RecordValue::Number(n) => match n {
                RecordNumber::I64(i) => serializer.serialize_i64(*i),
                RecordNumber::U64(u) => serializer.serialize_u64(*u),
                RecordNumber::F64(f) => serializer.serialize_f64(*f),
            },
            RecordValue::Str(s) => serializer.serialize_str(s.as_str()),
            RecordValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for v in arr {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            RecordValue::Object(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k.as_str(), v)?;
                }
                m.end()
            }
        }
    }
}

// ─── Deserialize ────────────────────────────────────────────────────────────

struct RecordValueVisitor;

impl<'de> Visitor<'de> for RecordValueVisitor {
    type Value = RecordValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any self-describing value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<RecordValue, E> {
        Ok(RecordValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<RecordValue, E> {
        Ok(RecordValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<RecordValue, D::Error> {
        RecordValue::deserialize(d)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<RecordValue, E> {
        Ok(RecordValue::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<RecordValue, E> {
        Ok(RecordValue::from(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<RecordValue, E> {
        Ok(RecordValue::from(u))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<RecordValue, E> {
        Ok(RecordValue::from(f))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<RecordValue, E> {
        Ok(RecordValue::from(s))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<RecordValue, E> {
        Ok(RecordValue::from(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RecordValue, A::Error> {
        let mut arr = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(v) = seq.next_element()? {
            arr.push(v);
        }
        Ok(RecordValue::Array(arr))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RecordValue, A::Error> {
        let mut map =
            Record::with_capacity_and_hasher(access.size_hint().unwrap_or(0), FxBuildHasher);
        while let Some((k, v)) = access.next_entry::<SmolStr, RecordValue>()? {
            map.insert(k, v);
        }
        Ok(RecordValue::Object(map))
    }
}

impl<'de> Deserialize<'de> for RecordValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordValueVisitor)
    }
}

// ─── From impls ─────────────────────────────────────────────────────────────

impl From<f64> for RecordValue {
    fn from(n: f64) -> Self {
        RecordValue::Number(RecordNumber::F64(n))
    }
}

impl From<i64> for RecordValue {
    fn from(n: i64) -> Self {
        RecordValue::Number(RecordNumber::I64(n))
    }
}

impl From<i32> for RecordValue {
    fn from(n: i32) -> Self {
        RecordValue::Number(RecordNumber::I64(n as i64))
    }
}

impl From<u64> for RecordValue {
    fn from(n: u64) -> Self {
        RecordValue::Number(RecordNumber::unsigned(n))
    }
}

impl From<bool> for RecordValue {
    fn from(b: bool) -> Self {
        RecordValue::Bool(b)
    }
}

impl From<&str> for RecordValue {
    fn from(s: &str) -> Self {
        RecordValue::Str(SmolStr::from(s))
    }
}

impl From<String> for RecordValue {
    fn from(s: String) -> Self {
        RecordValue::Str(SmolStr::from(s))
    }
}

// ─── serde_json interop ─────────────────────────────────────────────────────

impl From<serde_json::Value> for RecordValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => RecordValue::Null,
            Json::Bool(b) => RecordValue::Bool(b),
            Json::Number(n) => RecordValue::Number(RecordNumber::from_json(&n)),
            Json::String(s) => RecordValue::from(s),
            Json::Array(items) => RecordValue::Array(items.into_iter().map(Self::from).collect()),
            Json::Object(fields) => RecordValue::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (SmolStr::from(k), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Non-finite floats have no JSON form and become `null`.
impl From<RecordValue> for serde_json::Value {
    fn from(val: RecordValue) -> Self {
        use serde_json::Value as Json;
        match val {
            RecordValue::Null => Json::Null,
            RecordValue::Bool(b) => Json::Bool(b),
            RecordValue::Number(RecordNumber::I64(i)) => Json::from(i),
            RecordValue::Number(RecordNumber::U64(u)) => Json::from(u),
            RecordValue::Number(RecordNumber::F64(f)) => {
                serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number)
            }
            RecordValue::Str(s) => Json::String(s.into()),
            RecordValue::Array(items) => Json::Array(items.into_iter().map(Json::from).collect()),
            RecordValue::Object(fields) => Json::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k.into(), Json::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Build a [`RecordValue::Object`] literal.
///
/// ```
/// use chainable_record::record;
///
/// let user = record!({ "name" => "Alice", "age" => 30i64, "profile" => { "bio" => "dev" } });
/// assert_eq!(user.get("name").and_then(|v| v.as_str()), Some("Alice"));
/// ```
#[macro_export]
macro_rules! record {
    ({ $($key:expr => $val:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut map = $crate::value::Record::default();
        $(
            map.insert(
                $crate::smol_str::SmolStr::new($key),
                $crate::value::RecordValue::from($crate::record!(@value $val))
            );
        )*
        $crate::value::RecordValue::Object(map)
    }};

    (@value { $($inner:tt)* }) => {
        $crate::record!({ $($inner)* })
    };

    (@value $val:expr) => {
        $val
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_that_fits_is_signed() {
        assert_eq!(RecordValue::from(5u64), RecordValue::from(5i64));
        assert_eq!(
            RecordValue::from(u64::MAX),
            RecordValue::Number(RecordNumber::U64(u64::MAX))
        );
    }

    #[test]
    fn test_as_i64_from_whole_float() {
        assert_eq!(RecordValue::from(3.0f64).as_i64(), Some(3));
        assert_eq!(RecordValue::from(3.5f64).as_i64(), None);
        assert_eq!(RecordValue::from("3").as_i64(), None);
    }

    #[test]
    fn test_json_interop() {
        let json = serde_json::json!({ "a": 1, "b": [true, null], "c": 2.5, "d": u64::MAX });
        let value = RecordValue::from(json.clone());
        assert_eq!(value.get("d"), Some(&RecordValue::from(u64::MAX)));
        assert_eq!(serde_json::Value::from(value.clone()), json);

        let parsed: RecordValue = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        let json = serde_json::Value::from(RecordValue::from(f64::NAN));
        assert!(json.is_null());
    }

    #[test]
    fn test_kind_and_get_on_non_object() {
        assert_eq!(RecordValue::Array(vec![]).kind(), "array");
        assert_eq!(RecordValue::from(1i64).get("x"), None);
        assert_eq!(crate::record!({ "x" => 1i64 }).get("x").and_then(RecordValue::as_i64), Some(1));
    }
}
