//! Operation name → factory table.
//!
//! Built once at startup from an enumerated list of operation
//! implementations, then shared read-only (typically behind `Arc`), so
//! concurrent lookups from in-flight dispatches need no locking.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::CoreError;
use crate::operation::{FnOperation, Operation, OperationContext};

/// Constructs a fresh executable unit for one invocation.
pub type OperationFactory = Box<dyn Fn(OperationContext) -> Box<dyn Operation> + Send + Sync>;

#[derive(Default)]
pub struct OperationRegistry {
    factories: HashMap<String, OperationFactory>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a factory under `name`.
    ///
    /// Fails with [`CoreError::DuplicateOperation`] if the name is taken,
    /// so a startup scan cannot silently shadow an earlier registration.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: OperationFactory,
    ) -> Result<(), CoreError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(CoreError::DuplicateOperation(name));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Register a closure-backed operation. See [`FnOperation`].
    pub fn register_fn<F>(&mut self, name: impl Into<String>, run: F) -> Result<(), CoreError>
    where
        F: Fn(OperationContext) -> anyhow::Result<Value> + Clone + Send + Sync + 'static,
    {
        let factory: OperationFactory =
            Box::new(move |ctx| Box::new(FnOperation::new(ctx, run.clone())));
        self.register(name, factory)
    }

    /// Look up the factory for `name`.
    pub fn resolve(&self, name: &str) -> Result<&OperationFactory, CoreError> {
        self.factories
            .get(name)
            .ok_or_else(|| CoreError::UnknownOperation(name.to_string()))
    }

    /// Resolve `name` and construct an executable unit for this invocation.
    pub fn instantiate(
        &self,
        name: &str,
        ctx: OperationContext,
    ) -> Result<Box<dyn Operation>, CoreError> {
        Ok(self.resolve(name)?(ctx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
