//! Runtime capabilities for location values
//!
//! Concrete location types list the operations they support natively. An
//! [`Extension`] is a named set of extra operations; attaching one to a
//! location produces an [`Extended`] value that answers to both sets, while
//! the original value stays untouched. [`implements_capability`] asks
//! whether a value, extended or not, provides every operation in a list.
//!
//! ```rust
//! use datalocations::capabilities::{implements_capability, Extension};
//! use datalocations::{DataLocation, Filepath};
//! use serde_json::json;
//!
//! let path = Filepath::from_location("/tmp/example").unwrap();
//! let extension = Extension::new()
//!     .with_operation("get_dummy_value", |_, _| Ok(json!("dummy value")));
//!
//! let extended = path.add_extension(&extension);
//! assert!(implements_capability(&extended, &["get_dummy_value"]));
//! assert!(!implements_capability(&path, &["get_dummy_value"]));
//! assert_eq!(extended.call("get_dummy_value", &[]).unwrap(), json!("dummy value"));
//! ```

use crate::error::{Error, Result};
use crate::locations::DataLocation;
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// What an extension operation sees when it is called
pub struct OperationContext<'a> {
    location: &'a dyn DataLocation,
    state: &'a Value,
}

impl<'a> OperationContext<'a> {
    /// The location the operation was called on
    pub fn location(&self) -> &'a dyn DataLocation {
        self.location
    }

    /// The extension state (the seed, or the location's own description)
    pub fn state(&self) -> &'a Value {
        self.state
    }
}

/// An attached operation
pub type Operation = Arc<dyn Fn(&OperationContext<'_>, &[Value]) -> Result<Value> + Send + Sync>;

/// A named set of operations that can be attached to a location
#[derive(Clone, Default)]
pub struct Extension {
    operations: IndexMap<String, Operation>,
    seed: Option<Value>,
}

impl Extension {
    /// Create an empty extension
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation; a later operation with the same name replaces it
    pub fn with_operation<F>(mut self, name: impl Into<String>, operation: F) -> Self
    where
        F: Fn(&OperationContext<'_>, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.operations.insert(name.into(), Arc::new(operation));
        self
    }

    /// Set the initial state handed to every operation
    pub fn with_seed(mut self, seed: Value) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Names of the operations in this extension, in insertion order
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Does this extension define the named operation?
    pub fn provides(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .field("seed", &self.seed)
            .finish()
    }
}

/// A location with extra operations attached
///
/// Derefs to the wrapped location, so every native operation is still
/// available. The operation table is shared between clones.
#[derive(Clone)]
pub struct Extended<L> {
    inner: L,
    operations: Arc<IndexMap<String, Operation>>,
    state: Value,
}

fn describe(location: &dyn DataLocation) -> Value {
    json!({
        "base": location.base(),
        "location": location.location(),
        "value": location.value_of(),
    })
}

impl<L: DataLocation> Extended<L> {
    /// Attach `extension` to `inner`
    pub fn new(inner: L, extension: &Extension) -> Self {
        let state = match &extension.seed {
            Some(seed) => seed.clone(),
            None => describe(&inner),
        };
        Self {
            inner,
            operations: Arc::new(extension.operations.clone()),
            state,
        }
    }

    /// Attach another extension, merging the operation tables
    ///
    /// Operations in `extension` replace existing ones with the same name.
    /// The state is replaced only when `extension` carries a seed.
    pub fn add_extension(&self, extension: &Extension) -> Extended<L>
    where
        L: Clone,
    {
        let mut operations = (*self.operations).clone();
        for (name, operation) in &extension.operations {
            operations.insert(name.clone(), Arc::clone(operation));
        }

        Self {
            inner: self.inner.clone(),
            operations: Arc::new(operations),
            state: extension.seed.clone().unwrap_or_else(|| self.state.clone()),
        }
    }

    /// Call an attached operation
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let operation = self
            .operations
            .get(name)
            .ok_or_else(|| Error::UnsupportedOperation(name.to_string()))?;

        let context = OperationContext {
            location: &self.inner,
            state: &self.state,
        };
        tracing::trace!(operation = name, location = %self.inner, "calling extension operation");
        operation(&context, args)
    }

    /// Names of the attached operations
    pub fn extension_operations(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// The extension state
    pub fn state(&self) -> &Value {
        &self.state
    }

    /// The wrapped location
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Drop the extensions and return the wrapped location
    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L> Deref for Extended<L> {
    type Target = L;

    fn deref(&self) -> &L {
        &self.inner
    }
}

impl<L: DataLocation> DataLocation for Extended<L> {
    fn base(&self) -> Option<&str> {
        self.inner.base()
    }

    fn location(&self) -> &str {
        self.inner.location()
    }

    fn value_of(&self) -> &str {
        self.inner.value_of()
    }

    fn operations(&self) -> &'static [&'static str] {
        self.inner.operations()
    }

    fn implements_operation(&self, name: &str) -> bool {
        self.inner.implements_operation(name) || self.operations.contains_key(name)
    }
}

impl<L: DataLocation> fmt::Display for Extended<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<L: fmt::Debug> fmt::Debug for Extended<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extended")
            .field("inner", &self.inner)
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .field("state", &self.state)
            .finish()
    }
}

/// Does `value` provide every operation in `names`?
///
/// Never fails: a missing operation simply yields `false`.
pub fn implements_capability(value: &dyn DataLocation, names: &[&str]) -> bool {
    value.implements_capability(names)
}

/// Attach `extension` to a copy of `value`
pub fn augment<L>(value: &L, extension: &Extension) -> Extended<L>
where
    L: DataLocation + Clone,
{
    Extended::new(value.clone(), extension)
}
