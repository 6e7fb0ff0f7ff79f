//! Suite registry
//!
//! Holds the suite types known to the harness in registration order. A
//! process-wide registry is populated once at startup through [`init`] and
//! [`register`], read through [`snapshot`], and cleared by [`shutdown`].

mod descriptor;

pub use descriptor::{
    BaseSuite, MethodInfo, MethodTable, Signature, Suite, SuiteDescriptor, SuiteInstance,
};

use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Ordered set of registered suite types
#[derive(Clone, Debug, Default)]
pub struct SuiteRegistry {
    suites: Vec<Arc<SuiteDescriptor>>,
}

impl SuiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register suite type `S`
    pub fn register<S: Suite>(&mut self) -> &mut Self {
        self.register_descriptor(SuiteDescriptor::of::<S>())
    }

    /// Register a descriptor; a second registration of the same name
    /// replaces the first and keeps its position
    pub fn register_descriptor(&mut self, descriptor: SuiteDescriptor) -> &mut Self {
        let descriptor = Arc::new(descriptor);
        match self
            .suites
            .iter_mut()
            .find(|s| s.name() == descriptor.name())
        {
            Some(existing) => {
                debug!("Replacing registered suite {}", descriptor.name());
                *existing = descriptor;
            }
            None => {
                debug!("Registered suite {}", descriptor.name());
                self.suites.push(descriptor);
            }
        }
        self
    }

    /// All descriptors in registration order
    pub fn all(&self) -> &[Arc<SuiteDescriptor>] {
        &self.suites
    }

    /// Find a suite by exact type name
    pub fn find(&self, name: &str) -> Option<&Arc<SuiteDescriptor>> {
        self.suites.iter().find(|s| s.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.suites.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

static GLOBAL: RwLock<Option<SuiteRegistry>> = RwLock::new(None);

/// Create the process-wide registry if it does not exist yet
pub fn init() {
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    if global.is_none() {
        debug!("Initialising suite registry");
        *global = Some(SuiteRegistry::new());
    }
}

/// Register suite type `S` in the process-wide registry, initialising it if needed
pub fn register<S: Suite>() {
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    global.get_or_insert_with(SuiteRegistry::new).register::<S>();
}

/// Copy of the process-wide registry; empty before [`init`] or after [`shutdown`]
pub fn snapshot() -> SuiteRegistry {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}

/// Drop the process-wide registry
pub fn shutdown() {
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    if global.take().is_some() {
        debug!("Suite registry shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{AppTest, Bare, EmptyTest, MixedTest};

    struct RenamedAppTest;

    impl Suite for RenamedAppTest {
        type Base = Bare;
        const NAME: &'static str = "AppTest";

        fn with_base(_base: Bare) -> Self {
            RenamedAppTest
        }

        fn methods(table: &mut MethodTable<Self>) {
            table.method("TestReplacement", |_: &mut Self| {});
        }
    }

    #[test]
    fn test_registration_order() {
        let mut registry = SuiteRegistry::new();
        registry
            .register::<MixedTest>()
            .register::<AppTest>()
            .register::<EmptyTest>();

        assert_eq!(registry.names(), vec!["MixedTest", "AppTest", "EmptyTest"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.find("AppTest").is_some());
        assert!(registry.find("apptest").is_none());
    }

    #[test]
    fn test_last_registration_wins_in_place() {
        let mut registry = SuiteRegistry::new();
        registry
            .register::<AppTest>()
            .register::<EmptyTest>()
            .register::<RenamedAppTest>();

        assert_eq!(registry.names(), vec!["AppTest", "EmptyTest"]);
        let app = registry.find("AppTest").unwrap();
        assert!(app.method("TestReplacement").is_some());
        assert!(app.method("TestHome").is_none());
    }

    #[test]
    fn test_descriptor_records_methods_and_base() {
        let descriptor = SuiteDescriptor::of::<MixedTest>();
        assert_eq!(descriptor.base_name(), "TestSuite");
        assert!(descriptor.base_methods().contains(&"Before"));

        let with_arg = descriptor.method("TestWithArg").unwrap();
        assert_eq!(with_arg.signature, Signature::new(1, 0));
        assert!(!with_arg.signature.is_receiver_only());
        assert!(descriptor
            .method("TestAlpha")
            .unwrap()
            .signature
            .is_receiver_only());
    }

    #[test]
    fn test_instance_calls_only_invocable_methods() {
        let descriptor = SuiteDescriptor::of::<MixedTest>();
        let mut instance = descriptor
            .instantiate(&crate::suite::Environment::default())
            .unwrap();

        assert!(matches!(instance.call("TestAlpha"), Some(Ok(()))));
        assert!(instance.call("TestWithArg").is_none());
        assert!(instance.call("TestMissing").is_none());
    }

    #[test]
    fn test_global_lifecycle() {
        init();
        register::<AppTest>();
        register::<EmptyTest>();
        init();

        let registry = snapshot();
        assert_eq!(registry.names(), vec!["AppTest", "EmptyTest"]);

        shutdown();
        assert!(snapshot().is_empty());
    }
}
