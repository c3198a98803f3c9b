//! Business-error catalog
//!
//! Projects declare their error vocabulary as [`ErrorDescriptor`] entries.
//! The catalog keeps registration order for output, and rejects duplicate
//! names and duplicate codes outright: both would silently shadow an
//! existing error in the generated classes.

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// One declared business error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Registry name in UPPER_SNAKE, e.g. `"NOT_FOUND_ERROR"`
    pub name: String,
    /// Numeric code, negative by convention
    pub code: i64,
    /// Human description, used as the default message
    pub description: String,
    /// Whether the error is shown to API callers
    pub show: bool,
    /// Whether occurrences are logged server side
    pub log: bool,
}

impl ErrorDescriptor {
    /// Create a descriptor shown to callers and not logged. Use [`show`] and
    /// [`log`] to override.
    ///
    /// [`show`]: ErrorDescriptor::show
    /// [`log`]: ErrorDescriptor::log
    pub fn new(name: impl Into<String>, code: i64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code,
            description: description.into(),
            show: true,
            log: false,
        }
    }

    /// Set whether the error is shown to API callers.
    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Set whether occurrences are logged server side.
    pub fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }
}

/// Ordered collection of declared errors
#[derive(Debug, Clone, Default)]
pub struct ErrorCatalog {
    errors: Vec<ErrorDescriptor>,
}

impl ErrorCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an error. Fails if the name or the code is already taken.
    pub fn register(&mut self, descriptor: ErrorDescriptor) -> Result<()> {
        for existing in &self.errors {
            if existing.name == descriptor.name {
                return Err(RegistryError::DuplicateErrorName(descriptor.name));
            }
            if existing.code == descriptor.code {
                return Err(RegistryError::DuplicateErrorCode {
                    code: descriptor.code,
                    existing: existing.name.clone(),
                    new: descriptor.name,
                });
            }
        }
        self.errors.push(descriptor);
        Ok(())
    }

    /// Iterate descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorDescriptor> {
        self.errors.iter()
    }

    /// Number of registered errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
