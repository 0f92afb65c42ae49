//! Explicit save/restore of component parameters.
//!
//! Each persistent component names its class, a schema version and the
//! ordered list of fields it stores. [`Persist::save`] writes exactly those
//! fields into a [`Record`]; [`Persist::load`] checks class, version and
//! field list and rebuilds the component through its validating constructor.
//! Call counters, histories and cached values are never stored.
//!
//! With the `serde` feature a [`Record`] serializes with any serde format.
//!
//! ```
//! use uqkit::copula::MarshallOlkin;
//! use uqkit::persist::Persist;
//!
//! let c = MarshallOlkin::new(0.3, 0.7).unwrap();
//! let record = c.save();
//! assert_eq!(record.class, "MarshallOlkinCopula");
//! assert_eq!(record.attribute_names(), vec!["alpha_", "beta_"]);
//!
//! let back = MarshallOlkin::load(&record).unwrap();
//! assert_eq!(back.alpha(), 0.3);
//! ```

use crate::error::{Error, Result};

/// One named field of a record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    /// Field name, e.g. `lambda_`.
    pub name: String,
    /// Field value; scalars are stored as one-element vectors.
    pub value: Vec<f64>,
}

/// Saved parameters of one component.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Class name of the component.
    pub class: String,
    /// Schema version the record was written with.
    pub version: u32,
    /// Fields in declaration order.
    pub attributes: Vec<Attribute>,
}

impl Record {
    /// Empty record for `class` at `version`.
    pub fn new(class: impl Into<String>, version: u32) -> Self {
        Self {
            class: class.into(),
            version,
            attributes: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Vec<f64>>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Field names in order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Value of field `name`.
    ///
    /// # Errors
    ///
    /// `Persist` if the field is missing.
    pub fn get(&self, name: &str) -> Result<&[f64]> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_slice())
            .ok_or_else(|| Error::Persist(format!("{}: missing field {name}", self.class)))
    }

    /// Scalar field `name`.
    ///
    /// # Errors
    ///
    /// `Persist` if the field is missing or does not hold exactly one value.
    pub fn scalar(&self, name: &str) -> Result<f64> {
        match self.get(name)? {
            [v] => Ok(*v),
            other => Err(Error::Persist(format!(
                "{}: field {name} holds {} values, expected one",
                self.class,
                other.len()
            ))),
        }
    }

    /// Check that this record was written by `T` with `T`'s current schema.
    ///
    /// # Errors
    ///
    /// `Persist` on a class, version or field-list mismatch.
    pub fn expect<T: Persist>(&self) -> Result<()> {
        if self.class != T::CLASS_NAME {
            return Err(Error::Persist(format!(
                "expected a {} record, got {}",
                T::CLASS_NAME,
                self.class
            )));
        }
        if self.version != T::SCHEMA_VERSION {
            return Err(Error::Persist(format!(
                "{}: unsupported schema version {} (current is {})",
                self.class,
                self.version,
                T::SCHEMA_VERSION
            )));
        }
        if self.attribute_names() != T::FIELDS {
            return Err(Error::Persist(format!(
                "{}: fields {:?} do not match {:?}",
                self.class,
                self.attribute_names(),
                T::FIELDS
            )));
        }
        Ok(())
    }
}

/// A component whose parameters can be saved and restored.
pub trait Persist: Sized {
    /// Class name written into records.
    const CLASS_NAME: &'static str;
    /// Current schema version.
    const SCHEMA_VERSION: u32;
    /// Stored fields, in order.
    const FIELDS: &'static [&'static str];

    /// Encode the parameters.
    fn save(&self) -> Record;

    /// Rebuild from a record, re-validating the parameters.
    fn load(record: &Record) -> Result<Self>;
}
