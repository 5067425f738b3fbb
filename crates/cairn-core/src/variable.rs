//! Fresh variables with stable ids.
//!
//! Variables are created fresh from a caller-owned pool and compared by
//! id only; the pool keeps their display names.

use std::fmt;

/// A variable, identified by its index in the owning `VariablePool`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Variable(u32);

impl Variable {
    /// Returns the raw index of this variable.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Issues fresh variables and remembers their names.
#[derive(Debug, Default)]
pub struct VariablePool {
    names: Vec<String>,
}

impl VariablePool {
    /// Creates a new empty variable pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh variable with the given display name.
    ///
    /// Names are not deduplicated; every call returns a new variable.
    pub fn fresh(&mut self, name: &str) -> Variable {
        let id = u32::try_from(self.names.len()).expect("variable pool capacity exceeded");
        self.names.push(name.to_string());
        Variable(id)
    }

    /// Returns the name of a variable issued by this pool.
    #[must_use]
    pub fn name(&self, var: Variable) -> Option<&str> {
        self.names.get(var.0 as usize).map(String::as_str)
    }

    /// Returns the number of variables issued so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no variables have been issued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
