//! Suite type descriptors
//!
//! Suites describe themselves by filling a [`MethodTable`] in declaration
//! order. The table records every method's name and shape; only
//! receiver-only methods carry a callable body.

use std::fmt;
use std::sync::Arc;

use crate::executor::{IntoOutcome, TestOutcome};
use crate::suite::Environment;

/// A base type embedded as the first field of every suite
pub trait BaseSuite: Sized + 'static {
    const NAME: &'static str;

    /// Names of the methods the base exposes to embedding suites
    const METHODS: &'static [&'static str];

    /// Build the shared test-support state handed to a fresh suite instance
    fn construct(env: &Environment) -> anyhow::Result<Self>;
}

/// A registrable test suite
pub trait Suite: Sized + 'static {
    type Base: BaseSuite;

    const NAME: &'static str;

    /// Create a fresh instance around an initialised base
    fn with_base(base: Self::Base) -> Self;

    /// Declare the suite's methods in order
    fn methods(table: &mut MethodTable<Self>);
}

/// Declared parameters and result values of a method, not counting the receiver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: usize,
    pub results: usize,
}

impl Signature {
    pub const RECEIVER_ONLY: Signature = Signature {
        params: 0,
        results: 0,
    };

    pub fn new(params: usize, results: usize) -> Self {
        Self { params, results }
    }

    pub fn is_receiver_only(&self) -> bool {
        *self == Self::RECEIVER_ONLY
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: &'static str,
    pub signature: Signature,
}

type Body<S> = Box<dyn Fn(&mut S) -> TestOutcome + Send + Sync>;

struct MethodEntry<S> {
    info: MethodInfo,
    body: Option<Body<S>>,
}

/// Ordered method table of one suite type
pub struct MethodTable<S> {
    entries: Vec<MethodEntry<S>>,
}

impl<S: 'static> MethodTable<S> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare a method taking only the receiver and returning nothing
    /// (or a `Result<(), E>` whose error is raised as a fault)
    pub fn method<R>(&mut self, name: &'static str, body: fn(&mut S) -> R) -> &mut Self
    where
        R: IntoOutcome + 'static,
    {
        let body: Body<S> = Box::new(move |suite: &mut S| body(suite).into_outcome());
        self.push(name, Signature::RECEIVER_ONLY, Some(body))
    }

    /// Declare a method of any other shape; the harness never calls it
    pub fn helper(&mut self, name: &'static str, params: usize, results: usize) -> &mut Self {
        self.push(name, Signature::new(params, results), None)
    }

    fn push(
        &mut self,
        name: &'static str,
        signature: Signature,
        body: Option<Body<S>>,
    ) -> &mut Self {
        let entry = MethodEntry {
            info: MethodInfo { name, signature },
            body,
        };
        // A redeclared name replaces the earlier entry in place
        match self.entries.iter_mut().find(|e| e.info.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    fn infos(&self) -> Vec<MethodInfo> {
        self.entries.iter().map(|e| e.info.clone()).collect()
    }

    fn body(&self, name: &str) -> Option<&Body<S>> {
        self.entries
            .iter()
            .find(|e| e.info.name == name)
            .and_then(|e| e.body.as_ref())
    }
}

/// A live suite instance with its base already initialised
pub trait SuiteInstance {
    /// Invoke a receiver-only method; `None` when there is no such method
    fn call(&mut self, method: &str) -> Option<TestOutcome>;
}

struct Instance<S> {
    suite: S,
    table: Arc<MethodTable<S>>,
}

impl<S: Suite> SuiteInstance for Instance<S> {
    fn call(&mut self, method: &str) -> Option<TestOutcome> {
        let body = self.table.body(method)?;
        Some(body(&mut self.suite))
    }
}

trait InstanceFactory: Send + Sync {
    fn instantiate(&self, env: &Environment) -> anyhow::Result<Box<dyn SuiteInstance>>;
}

struct TypedFactory<S> {
    table: Arc<MethodTable<S>>,
}

impl<S: Suite> InstanceFactory for TypedFactory<S> {
    fn instantiate(&self, env: &Environment) -> anyhow::Result<Box<dyn SuiteInstance>> {
        let base = S::Base::construct(env)?;
        Ok(Box::new(Instance {
            suite: S::with_base(base),
            table: Arc::clone(&self.table),
        }))
    }
}

/// Type-erased description of a registered suite type
#[derive(Clone)]
pub struct SuiteDescriptor {
    name: &'static str,
    base_name: &'static str,
    base_methods: &'static [&'static str],
    methods: Vec<MethodInfo>,
    factory: Arc<dyn InstanceFactory>,
}

impl SuiteDescriptor {
    pub fn of<S: Suite>() -> Self {
        let mut table = MethodTable::new();
        S::methods(&mut table);

        Self {
            name: S::NAME,
            base_name: S::Base::NAME,
            base_methods: S::Base::METHODS,
            methods: table.infos(),
            factory: Arc::new(TypedFactory {
                table: Arc::new(table),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn base_name(&self) -> &'static str {
        self.base_name
    }

    pub fn base_methods(&self) -> &'static [&'static str] {
        self.base_methods
    }

    /// Methods in declaration order
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Construct the base from `env` and a fresh suite around it
    pub fn instantiate(&self, env: &Environment) -> anyhow::Result<Box<dyn SuiteInstance>> {
        self.factory.instantiate(env)
    }
}

impl fmt::Debug for SuiteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteDescriptor")
            .field("name", &self.name)
            .field("base_name", &self.base_name)
            .field("methods", &self.methods)
            .finish()
    }
}
