//! Test discovery
//!
//! A method of a suite is a test when it takes only the receiver, returns
//! nothing, is not part of the embedded base's method set, and its name starts
//! with `Test`. Declaration order is kept as test order.

use std::collections::HashSet;

use crate::models::{TestDesc, TestSuiteDesc};
use crate::registry::{MethodInfo, SuiteDescriptor, SuiteRegistry};

pub const TEST_PREFIX: &str = "Test";

/// Whether `method` qualifies as a test given the base method names
pub fn is_test_method(method: &MethodInfo, base_methods: &HashSet<&str>) -> bool {
    method.signature.is_receiver_only()
        && !base_methods.contains(method.name)
        && method.name.starts_with(TEST_PREFIX)
}

/// Describe the tests of one suite
pub fn describe(descriptor: &SuiteDescriptor) -> TestSuiteDesc {
    let base_methods: HashSet<&str> = descriptor.base_methods().iter().copied().collect();

    let tests = descriptor
        .methods()
        .iter()
        .filter(|m| is_test_method(m, &base_methods))
        .map(|m| TestDesc::new(m.name))
        .collect();

    TestSuiteDesc::new(descriptor.name(), tests)
}

/// Whether `test` names a discovered test of `descriptor`
pub fn is_test(descriptor: &SuiteDescriptor, test: &str) -> bool {
    let base_methods: HashSet<&str> = descriptor.base_methods().iter().copied().collect();
    descriptor
        .method(test)
        .is_some_and(|m| is_test_method(m, &base_methods))
}

/// Describe every registered suite, in registration order
pub fn list(registry: &SuiteRegistry) -> Vec<TestSuiteDesc> {
    registry.all().iter().map(|d| describe(d)).collect()
}
