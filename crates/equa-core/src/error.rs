//! Error types for the Equa core
//!
//! Fatal errors only: a `MalformedAst`-class violation means the external
//! front-end handed us an AST that breaks the input contract, and the
//! whole compilation unit is aborted. Everything an analysis *finds* (missing
//! match cases, type mismatches, unproved obligations) is a
//! [`Diagnostic`](crate::diagnostics::Diagnostic), never an `Error`.

use thiserror::Error;

/// Fatal errors raised before or during analysis
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Catch-all AST contract violation from the external front-end
    #[error("malformed AST: {0}")]
    MalformedAst(String),

    /// Two definitions share a name (functions, types, or constructors)
    #[error("duplicate definition of '{name}'")]
    DuplicateDefinition { name: String },

    /// A clause's pattern count disagrees with the declared signature
    #[error("function '{function}' declares {expected} parameter(s) but clause {clause} has {found} pattern(s)")]
    ClauseArity {
        function: String,
        clause: usize,
        expected: usize,
        found: usize,
    },

    /// A function definition carries no clauses at all
    #[error("function '{name}' has no clauses")]
    EmptyFunction { name: String },

    /// Reference to a type that was never declared
    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    /// Reference to a constructor that no declared type provides
    #[error("unknown constructor '{name}'")]
    UnknownConstructor { name: String },

    /// Constructor used with the wrong number of sub-patterns or arguments
    #[error("constructor '{name}' takes {expected} argument(s), found {found}")]
    ConstructorArity {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Application of a function that was never defined
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    /// Function applied with the wrong number of arguments
    #[error("function '{function}' takes {expected} argument(s), found {found}")]
    ApplicationArity {
        function: String,
        expected: usize,
        found: usize,
    },

    /// Variable used in an expression without a binding pattern
    #[error("unbound variable '{name}' in '{context}'")]
    UnboundVariable { name: String, context: String },
}

/// Result type alias for Equa core operations
pub type Result<T> = std::result::Result<T, Error>;
