//! Chainable builder over a dynamic record.
//!
//! A [`Builder`] owns a private copy of its backing record. Fields can be read
//! and written directly with [`Builder::get`] / [`Builder::set`], or through
//! setters synthesized from a naming convention: `setUserName` writes
//! `userName`. Every setter call hands back the same builder, so calls chain:
//!
//! ```
//! use chainable_record::{Builder, chain};
//!
//! let mut user = Builder::new();
//! chain!(user => setName("Bob"), setAge(25)).unwrap();
//! assert_eq!(user.get("name").and_then(|v| v.as_str()), Some("Bob"));
//! ```

mod setter;

pub use setter::{Setter, setter_name, setter_target};

use serde::ser::{Serialize, Serializer};
use smol_str::SmolStr;
use std::fmt;
use tracing::debug;

use crate::error::BuilderError;
use crate::shape::{Seed, classify};
use crate::value::{Record, RecordValue};
use setter::SetterTable;

/// Result of looking a property name up on a builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Property<'a> {
    /// The name is setter-shaped.
    Setter(Setter),
    /// Any other name reads the backing record. `None` means absent.
    Field(Option<&'a RecordValue>),
}

/// Chainable wrapper around a backing record.
#[derive(Clone, Default)]
pub struct Builder {
    record: Record,
    setters: SetterTable,
}

/// Build from a runtime argument list (zero, one or two values).
///
/// * `[]` seeds an empty record.
/// * `[value, "name"]` seeds `{ name: value }`.
/// * `[object]` seeds a copy of `object`.
///
/// Anything else fails with [`BuilderError::InvalidConstruction`] before a
/// record is created.
pub fn create_builder(args: &[RecordValue]) -> Result<Builder, BuilderError> {
    let seed = classify(args)?;
    Ok(Builder::from_seed(seed))
}

impl Builder {
    /// An empty builder; every field reads as absent until set.
    pub fn new() -> Self {
        Self::from_seed(Seed::Empty)
    }

    /// A builder over a copy of `record`. Later writes never reach `record`.
    pub fn from_record(record: &Record) -> Self {
        Self::from_seed(Seed::FullValue(record.clone()))
    }

    /// A builder holding exactly one field.
    pub fn with_field(value: impl Into<RecordValue>, name: impl Into<SmolStr>) -> Self {
        Self::from_seed(Seed::SingleField {
            value: value.into(),
            name: name.into(),
        })
    }

    pub fn from_seed(seed: Seed) -> Self {
        let kind = seed.kind();
        let record = seed.into_record();
        debug!(seed = kind, fields = record.len(), "builder created");
        Self {
            record,
            setters: SetterTable::default(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Direct field access
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn get(&self, field: &str) -> Option<&RecordValue> {
        self.record.get(field)
    }

    /// Write a field straight into the backing record. Overwriting keeps the
    /// field's original position; new fields go last.
    #[inline]
    pub fn set(&mut self, field: impl Into<SmolStr>, value: impl Into<RecordValue>) {
        self.record.insert(field.into(), value.into());
    }

    #[inline]
    pub fn contains(&self, field: &str) -> bool {
        self.record.contains_key(field)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.record.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.record.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Setter synthesis
    // ════════════════════════════════════════════════════════════════════════

    /// Look up `name` the way a property access would: setter-shaped names
    /// yield a setter, everything else reads the field of that name.
    pub fn property(&self, name: &str) -> Property<'_> {
        match self.setters.peek(name) {
            Some(setter) => Property::Setter(setter),
            None => Property::Field(self.get(name)),
        }
    }

    /// The setter behind `name`, if `name` is setter-shaped.
    pub fn setter(&self, name: &str) -> Option<Setter> {
        self.setters.peek(name)
    }

    /// Call the setter named `name` with `value`, returning this builder.
    pub fn invoke_setter(
        &mut self,
        name: &str,
        value: impl Into<RecordValue>,
    ) -> Result<&mut Self, BuilderError> {
        let setter = self.setters.resolve(name).ok_or_else(|| BuilderError::NotASetter {
            name: SmolStr::new(name),
        })?;
        Ok(setter.call(self, value))
    }

    /// `(setter name, target field)` for every setter invoked so far, in
    /// the order they were first invoked.
    pub fn setter_table(&self) -> Vec<(SmolStr, SmolStr)> {
        self.setters.snapshot()
    }

    /// Number of cached setter entries.
    pub fn setter_count(&self) -> usize {
        self.setters.len()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Views
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn as_record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    pub fn to_value(&self) -> RecordValue {
        RecordValue::Object(self.record.clone())
    }
}

impl PartialEq for Builder {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("record", &self.record)
            .field("setters", &self.setters.len())
            .finish()
    }
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Serialize for Builder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

impl From<Record> for Builder {
    fn from(record: Record) -> Self {
        Self::from_seed(Seed::FullValue(record))
    }
}

impl From<Builder> for RecordValue {
    fn from(builder: Builder) -> Self {
        RecordValue::Object(builder.record)
    }
}

/// Call named setters on a builder in sequence.
///
/// `chain!(b => setName("Bob"), setAge(25))` expands to
/// `b.invoke_setter("setName", "Bob")` followed by
/// `.invoke_setter("setAge", 25)`, stopping at the first name that is not a
/// setter. Evaluates to `Result<&mut Builder, BuilderError>`.
#[macro_export]
macro_rules! chain {
    ($builder:expr => $($setter:ident ( $value:expr )),+ $(,)?) => {
        ::core::result::Result::<_, $crate::error::BuilderError>::Ok(&mut $builder)
            $(.and_then(|b| b.invoke_setter(::core::stringify!($setter), $value)))+
    };
}
