//! Interned uninterpreted-function instances.
//!
//! An instance is a function symbol applied to argument variables.
//! Instances are content-addressed through the generic pool, so applying
//! the same function to the same arguments twice yields the same handle.

use smallvec::SmallVec;
use std::fmt;

use crate::pool::{EntryId, Pool};
use crate::variable::Variable;

/// A declared uninterpreted function symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UfFunction(u32);

impl UfFunction {
    /// Returns the raw index of this function symbol.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// A handle to an interned function instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UfInstance(EntryId);

impl UfInstance {
    /// Returns the underlying pool id.
    #[must_use]
    pub const fn id(self) -> EntryId {
        self.0
    }
}

/// The normalized content of an instance: function plus arguments.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct UfContent {
    function: UfFunction,
    args: SmallVec<[Variable; 4]>,
}

impl fmt::Display for UfContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(f{}", self.function.0)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone)]
struct FunctionDecl {
    name: String,
    arity: usize,
}

/// Declares function symbols and interns their instances.
#[derive(Debug, Default)]
pub struct UfPool {
    functions: Vec<FunctionDecl>,
    instances: Pool<UfContent>,
}

impl UfPool {
    /// Creates a new empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a function symbol with the given name and arity.
    pub fn declare(&mut self, name: &str, arity: usize) -> UfFunction {
        let id = u32::try_from(self.functions.len()).expect("function table capacity exceeded");
        self.functions.push(FunctionDecl {
            name: name.to_string(),
            arity,
        });
        UfFunction(id)
    }

    /// Returns the name of a declared function.
    ///
    /// # Panics
    ///
    /// Panics if the function was not declared in this pool.
    #[must_use]
    pub fn function_name(&self, f: UfFunction) -> &str {
        &self.functions[f.0 as usize].name
    }

    /// Interns an instance of `function` applied to `args`.
    ///
    /// Equal (function, args) content always yields the same handle.
    ///
    /// # Panics
    ///
    /// Panics if the argument count does not match the declared arity.
    pub fn instance(&mut self, function: UfFunction, args: &[Variable]) -> UfInstance {
        let decl = &self.functions[function.0 as usize];
        assert!(
            decl.arity == args.len(),
            "function {} expects {} arguments, got {}",
            decl.name,
            decl.arity,
            args.len()
        );
        let content = UfContent {
            function,
            args: SmallVec::from_slice(args),
        };
        UfInstance(self.instances.create(content, ()))
    }

    /// Returns the function symbol of an interned instance.
    #[must_use]
    pub fn function(&self, instance: UfInstance) -> UfFunction {
        self.instances.get(instance.0).function
    }

    /// Returns the argument variables of an interned instance.
    #[must_use]
    pub fn args(&self, instance: UfInstance) -> &[Variable] {
        &self.instances.get(instance.0).args
    }

    /// Releases one reference to an interned instance.
    ///
    /// # Panics
    ///
    /// Panics if the instance is not live in this pool.
    pub fn release(&mut self, instance: UfInstance) {
        self.instances.release(instance.0);
    }

    /// Returns the number of live instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if no instances are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Formats an instance as `(name arg...)`.
    #[must_use]
    pub fn display(&self, instance: UfInstance) -> String {
        let content = self.instances.get(instance.0);
        let mut out = format!("({}", self.functions[content.function.0 as usize].name);
        for arg in &content.args {
            out.push(' ');
            out.push_str(&arg.to_string());
        }
        out.push(')');
        out
    }

    /// Prints a diagnostic dump of all live instances.
    pub fn print(&self) {
        self.instances.print();
    }
}
