//! Suites shared by unit tests

use std::cell::RefCell;

use crate::executor::Diagnostic;
use crate::registry::{BaseSuite, MethodTable, Suite};
use crate::suite::Environment;

thread_local! {
    static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Record a lifecycle call on the current thread
pub fn record(call: impl Into<String>) {
    CALLS.with(|calls| calls.borrow_mut().push(call.into()));
}

/// Drain the calls recorded on the current thread
pub fn take_calls() -> Vec<String> {
    CALLS.with(|calls| calls.borrow_mut().drain(..).collect())
}

/// Base with no environment dependencies
pub struct Bare;

impl BaseSuite for Bare {
    const NAME: &'static str = "TestSuite";
    const METHODS: &'static [&'static str] = &["Before", "After", "Assert", "TestHelper"];

    fn construct(_env: &Environment) -> anyhow::Result<Self> {
        Ok(Bare)
    }
}

pub struct AppTest {
    _base: Bare,
}

impl AppTest {
    fn test_home(&mut self) {}

    fn test_broken(&mut self) {
        panic!("not implemented");
    }
}

impl Suite for AppTest {
    type Base = Bare;
    const NAME: &'static str = "AppTest";

    fn with_base(base: Bare) -> Self {
        Self { _base: base }
    }

    fn methods(table: &mut MethodTable<Self>) {
        table
            .method("TestHome", Self::test_home)
            .method("TestBroken", Self::test_broken);
    }
}

pub struct LifecycleTest {
    _base: Bare,
    counter: u32,
}

impl LifecycleTest {
    fn before(&mut self) {
        self.counter += 1;
        record("Before");
    }

    fn after(&mut self) {
        self.counter -= 1;
        record("After");
    }

    fn test_counter(&mut self) -> Result<(), String> {
        record("TestCounter");
        if self.counter == 1 {
            Ok(())
        } else {
            Err(format!("counter was {}", self.counter))
        }
    }

    fn test_escaped(&mut self) {
        record("TestEscaped");
        panic!("<b>boom</b> & \"more\"");
    }

    fn test_diagnostic(&mut self) -> Result<(), Diagnostic> {
        record("TestDiagnostic");
        Err(Diagnostic::new("Assertion Failed", "expected 1, got 2"))
    }
}

impl Suite for LifecycleTest {
    type Base = Bare;
    const NAME: &'static str = "LifecycleTest";

    fn with_base(base: Bare) -> Self {
        Self {
            _base: base,
            counter: 0,
        }
    }

    fn methods(table: &mut MethodTable<Self>) {
        table
            .method("Before", Self::before)
            .method("After", Self::after)
            .method("TestCounter", Self::test_counter)
            .method("TestEscaped", Self::test_escaped)
            .method("TestDiagnostic", Self::test_diagnostic);
    }
}

pub struct FailingHooksTest {
    _base: Bare,
}

impl FailingHooksTest {
    fn before(&mut self) {
        record("Before");
        panic!("before failed");
    }

    fn after(&mut self) -> anyhow::Result<()> {
        record("After");
        anyhow::bail!("after failed")
    }

    fn test_never_runs(&mut self) {
        record("TestNeverRuns");
    }
}

impl Suite for FailingHooksTest {
    type Base = Bare;
    const NAME: &'static str = "FailingHooksTest";

    fn with_base(base: Bare) -> Self {
        Self { _base: base }
    }

    fn methods(table: &mut MethodTable<Self>) {
        table
            .method("Before", Self::before)
            .method("TestNeverRuns", Self::test_never_runs)
            .method("After", Self::after);
    }
}

pub struct FailingAfterTest {
    _base: Bare,
}

impl FailingAfterTest {
    fn test_passes(&mut self) {
        record("TestPasses");
    }

    fn after(&mut self) {
        record("After");
        panic!("after failed");
    }
}

impl Suite for FailingAfterTest {
    type Base = Bare;
    const NAME: &'static str = "FailingAfterTest";

    fn with_base(base: Bare) -> Self {
        Self { _base: base }
    }

    fn methods(table: &mut MethodTable<Self>) {
        table
            .method("TestPasses", Self::test_passes)
            .method("After", Self::after);
    }
}

/// Mix of tests, helpers and base methods for discovery
pub struct MixedTest {
    _base: Bare,
}

impl MixedTest {
    fn noop(&mut self) {}
}

impl Suite for MixedTest {
    type Base = Bare;
    const NAME: &'static str = "MixedTest";

    fn with_base(base: Bare) -> Self {
        Self { _base: base }
    }

    fn methods(table: &mut MethodTable<Self>) {
        table
            .method("TestOmega", Self::noop)
            .helper("TestWithArg", 1, 0)
            .helper("TestWithResult", 0, 1)
            .method("setupFixtures", Self::noop)
            .method("TestHelper", Self::noop)
            .method("Before", Self::noop)
            .method("TestAlpha", Self::noop);
    }
}

pub struct EmptyTest {
    _base: Bare,
}

impl Suite for EmptyTest {
    type Base = Bare;
    const NAME: &'static str = "EmptyTest";

    fn with_base(base: Bare) -> Self {
        Self { _base: base }
    }

    fn methods(_table: &mut MethodTable<Self>) {}
}

/// Base whose constructor always fails
pub struct Unavailable;

impl BaseSuite for Unavailable {
    const NAME: &'static str = "Unavailable";
    const METHODS: &'static [&'static str] = &[];

    fn construct(_env: &Environment) -> anyhow::Result<Self> {
        anyhow::bail!("database unavailable")
    }
}

pub struct UnavailableTest {
    _base: Unavailable,
}

impl UnavailableTest {
    fn test_anything(&mut self) {
        record("TestAnything");
    }
}

impl Suite for UnavailableTest {
    type Base = Unavailable;
    const NAME: &'static str = "UnavailableTest";

    fn with_base(base: Unavailable) -> Self {
        Self { _base: base }
    }

    fn methods(table: &mut MethodTable<Self>) {
        table.method("TestAnything", Self::test_anything);
    }
}
