//! Construction dispatch: classify a runtime argument list into one of the
//! three ways a builder can be seeded.

use smol_str::SmolStr;
use tracing::debug;

use crate::error::{BuilderError, ConstructionFailure};
use crate::value::{Record, RecordValue};

/// How a builder's backing record is seeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    /// No arguments: start from an empty record.
    Empty,
    /// One object argument: start from a copy of it.
    FullValue(Record),
    /// A value plus the name of the field it belongs to.
    SingleField { value: RecordValue, name: SmolStr },
}

impl Seed {
    pub fn kind(&self) -> &'static str {
        match self {
            Seed::Empty => "empty",
            Seed::FullValue(_) => "full_value",
            Seed::SingleField { .. } => "single_field",
        }
    }

    /// The initial backing record this seed describes.
    pub fn into_record(self) -> Record {
        match self {
            Seed::Empty => Record::default(),
            Seed::FullValue(record) => record,
            Seed::SingleField { value, name } => {
                let mut record = Record::default();
                record.insert(name, value);
                record
            }
        }
    }
}

impl From<Record> for Seed {
    fn from(record: Record) -> Self {
        Seed::FullValue(record)
    }
}

/// Pick the call shape an argument list matches.
///
/// The checks run in a fixed order: an empty list, then a value paired with a
/// string field name, then a lone object. A value followed by a string always
/// seeds a single field, even when the value is itself an object.
pub fn classify(args: &[RecordValue]) -> Result<Seed, BuilderError> {
    let failure = match args {
        [] => return Ok(Seed::Empty),
        [value, RecordValue::Str(name)] => {
            return Ok(Seed::SingleField {
                value: value.clone(),
                name: name.clone(),
            });
        }
        [RecordValue::Object(record)] => return Ok(Seed::FullValue(record.clone())),
        [value] => ConstructionFailure::MissingFieldName {
            value_kind: value.kind(),
        },
        [_, name] => ConstructionFailure::FieldNameNotString {
            name_kind: name.kind(),
        },
        _ => ConstructionFailure::TooManyArguments { count: args.len() },
    };

    debug!(args = args.len(), ?failure, "rejected builder construction");
    Err(BuilderError::construction(failure))
}
