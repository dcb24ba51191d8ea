//! Chainable builders over dynamic records, plus key renaming.
//!
//! * [`builder`]: a [`Builder`] wraps a private copy of a record and exposes
//!   direct field access alongside setters synthesized from field names
//!   (`setUserName` writes `userName`), each returning the same builder.
//! * [`shape`]: classifies a runtime argument list into a construction
//!   [`Seed`].
//! * [`transform`]: renames the keys of a record or an array of records.

pub mod builder;
pub mod error;
pub mod shape;
pub mod transform;
pub mod types;
pub mod value;

#[doc(hidden)]
pub use smol_str;

pub use builder::{Builder, Property, Setter, create_builder, setter_name, setter_target};
pub use error::{BuilderError, ConstructionFailure};
pub use shape::{Seed, classify};
pub use transform::{TransformMapping, transform, transform_record};
pub use value::{FastMap, Record, RecordNumber, RecordValue};
