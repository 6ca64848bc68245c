//! Equa AST — types, patterns, expressions, clauses, definitions
//!
//! These types are the contract boundary with the external front-end: the
//! tokenizer/parser produces them, this core analyzes them. All nodes are
//! immutable after construction and derive Debug, Clone, PartialEq,
//! Serialize, Deserialize. Analyses never rewrite the AST; verification
//! produces separate reports.
//!
//! Every structural node carries a [`Span`] so diagnostics can point back
//! into the source text. Builders default the span; front-ends attach real
//! positions with `with_span`.

use serde::{Deserialize, Serialize};

// ── Source positions ──────────────────────────────────────

/// Position in source text for error reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Span {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Span { line, column, offset }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ── Types ─────────────────────────────────────────────────

/// A type in the Equa type model.
///
/// `Even` and `Odd` are refinement tags: subtypes of `Integer` carrying a
/// provable predicate. The subtype DAG over these variants is precomputed
/// by [`TypeTable`](crate::types::TypeTable), never traversed at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Natural,
    Integer,
    Real,
    Boolean,
    Even,
    Odd,
    /// Function type `T1 -> T2`
    Function(Box<Type>, Box<Type>),
    /// User-declared algebraic type, resolved against [`TypeDef`]s
    Named(String),
}

impl Type {
    /// True for the numeric variants (including refinements)
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Type::Natural | Type::Integer | Type::Real | Type::Even | Type::Odd
        )
    }

    /// Base type with refinement tags stripped (`Even`/`Odd` → `Integer`)
    pub fn base(&self) -> Type {
        match self {
            Type::Even | Type::Odd => Type::Integer,
            other => other.clone(),
        }
    }

    /// True for the refinement tags whose membership is a proof obligation
    pub fn is_refinement(&self) -> bool {
        matches!(self, Type::Even | Type::Odd)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Type::Natural => write!(f, "Natural"),
            Type::Integer => write!(f, "Integer"),
            Type::Real => write!(f, "Real"),
            Type::Boolean => write!(f, "Boolean"),
            Type::Even => write!(f, "Even"),
            Type::Odd => write!(f, "Odd"),
            Type::Function(a, b) => write!(f, "{} -> {}", a, b),
            Type::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A user-declared algebraic type: a closed set of constructors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    pub constructors: Vec<Constructor>,
    pub span: Span,
}

/// One constructor of an algebraic type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    pub name: String,
    pub args: Vec<Type>,
}

impl Constructor {
    pub fn new(name: &str, args: Vec<Type>) -> Self {
        Constructor { name: name.to_string(), args }
    }
}

// ── Literals & patterns ───────────────────────────────────

/// Literal constants appearing in patterns and expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Real(f64),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Real(x) => write!(f, "{}", x),
        }
    }
}

/// A clause pattern: literal, binder, wildcard, or constructor.
///
/// `Natural` values are matched by the literal `0` and the builtin
/// constructor `Succ(p)`; positive literal patterns are accepted and
/// treated as nested `Succ` applications by the match compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    Wildcard,
    Var(String),
    Literal(Literal),
    Ctor { name: String, args: Vec<Pattern> },
}

impl Pattern {
    pub fn var(name: &str) -> Self {
        Pattern::Var(name.to_string())
    }

    pub fn int(n: i64) -> Self {
        Pattern::Literal(Literal::Int(n))
    }

    pub fn ctor(name: &str, args: Vec<Pattern>) -> Self {
        Pattern::Ctor { name: name.to_string(), args }
    }

    /// True if the pattern matches every value of its type
    pub fn is_irrefutable(&self) -> bool {
        matches!(self, Pattern::Wildcard | Pattern::Var(_))
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Var(name) => write!(f, "{}", name),
            Pattern::Literal(lit) => write!(f, "{}", lit),
            Pattern::Ctor { name, args } => {
                if args.is_empty() {
                    write!(f, "{}", name)
                } else {
                    write!(f, "{}(", name)?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ")")
                }
            }
        }
    }
}

// ── Expressions ───────────────────────────────────────────

/// Binary operators: arithmetic combinators and comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl BinOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge | BinOp::Eq | BinOp::Ne
        )
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        };
        write!(f, "{}", s)
    }
}

/// A pure expression tree; each node owns its children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Var(String),
    Literal(Literal),
    /// Constructor application, e.g. `Succ(n)` or `Cons(x, xs)`
    Ctor { name: String, args: Vec<Expr> },
    /// Function application by name against the definition table
    Apply { function: String, args: Vec<Expr> },
    Neg(Box<Expr>),
    Bin {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn var(name: &str) -> Self {
        ExprKind::Var(name.to_string()).into()
    }

    pub fn int(n: i64) -> Self {
        ExprKind::Literal(Literal::Int(n)).into()
    }

    pub fn real(x: f64) -> Self {
        ExprKind::Literal(Literal::Real(x)).into()
    }

    pub fn ctor(name: &str, args: Vec<Expr>) -> Self {
        ExprKind::Ctor { name: name.to_string(), args }.into()
    }

    pub fn apply(function: &str, args: Vec<Expr>) -> Self {
        ExprKind::Apply { function: function.to_string(), args }.into()
    }

    pub fn neg(inner: Expr) -> Self {
        ExprKind::Neg(Box::new(inner)).into()
    }

    pub fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        ExprKind::Bin {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
        .into()
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl From<ExprKind> for Expr {
    fn from(kind: ExprKind) -> Self {
        Expr { kind, span: Span::default() }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.kind {
            ExprKind::Var(name) => write!(f, "{}", name),
            ExprKind::Literal(lit) => write!(f, "{}", lit),
            ExprKind::Ctor { name, args } | ExprKind::Apply { function: name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            ExprKind::Neg(inner) => write!(f, "-{}", inner),
            ExprKind::Bin { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}

// ── Clauses, signatures, obligations, definitions ─────────

/// One `lhs pattern(s) = rhs` equation; owned by exactly one [`FunctionDef`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub patterns: Vec<Pattern>,
    pub rhs: Expr,
    pub span: Span,
}

impl Clause {
    pub fn new(patterns: Vec<Pattern>, rhs: Expr) -> Self {
        Clause { patterns, rhs, span: Span::default() }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, pattern) in self.patterns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", pattern)?;
        }
        write!(f, " = {}", self.rhs)
    }
}

/// Declared signature: parameter types and codomain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<Type>,
    pub codomain: Type,
}

impl Signature {
    pub fn new(params: Vec<Type>, codomain: Type) -> Self {
        Signature { params, codomain }
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, " × ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, " -> {}", self.codomain)
    }
}

/// A `require` obligation: hypothesis `var: Type`, goal `expr : Type`.
///
/// Immutable once parsed; verification attaches a separate
/// [`VerificationResult`](crate::verifier::VerificationResult) and never
/// mutates the obligation itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    pub var: String,
    pub hypothesis: Type,
    pub goal: Expr,
    pub goal_type: Type,
    pub span: Span,
}

impl Obligation {
    pub fn new(var: &str, hypothesis: Type, goal: Expr, goal_type: Type) -> Self {
        Obligation {
            var: var.to_string(),
            hypothesis,
            goal,
            goal_type,
            span: Span::default(),
        }
    }
}

impl std::fmt::Display for Obligation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "({}: {}) => {}: {}",
            self.var, self.hypothesis, self.goal, self.goal_type
        )
    }
}

/// A function definition: name, signature, ordered clauses, obligations.
///
/// Clause order matters — the first matching clause wins, mirroring
/// textual order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub signature: Signature,
    pub clauses: Vec<Clause>,
    pub obligations: Vec<Obligation>,
    pub span: Span,
}

impl FunctionDef {
    pub fn new(name: &str, signature: Signature, clauses: Vec<Clause>) -> Self {
        FunctionDef {
            name: name.to_string(),
            signature,
            clauses,
            obligations: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn with_obligation(mut self, obligation: Obligation) -> Self {
        self.obligations.push(obligation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_base_strips_refinements() {
        assert_eq!(Type::Even.base(), Type::Integer);
        assert_eq!(Type::Odd.base(), Type::Integer);
        assert_eq!(Type::Natural.base(), Type::Natural);
        assert_eq!(Type::Real.base(), Type::Real);
    }

    #[test]
    fn test_pattern_display() {
        let p = Pattern::ctor("Succ", vec![Pattern::var("n")]);
        assert_eq!(p.to_string(), "Succ(n)");
        assert_eq!(Pattern::Wildcard.to_string(), "_");
        assert_eq!(Pattern::int(0).to_string(), "0");
    }

    #[test]
    fn test_expr_display() {
        let e = Expr::bin(
            BinOp::Mul,
            Expr::var("x"),
            Expr::bin(BinOp::Add, Expr::var("x"), Expr::int(1)),
        );
        assert_eq!(e.to_string(), "(x * (x + 1))");
    }

    #[test]
    fn test_obligation_display() {
        let ob = Obligation::new(
            "x",
            Type::Integer,
            Expr::apply("f", vec![Expr::var("x")]),
            Type::Even,
        );
        assert_eq!(ob.to_string(), "(x: Integer) => f(x): Even");
    }

    #[test]
    fn test_ast_serialization_round_trip() {
        let def = FunctionDef::new(
            "f",
            Signature::new(vec![Type::Natural], Type::Natural),
            vec![
                Clause::new(vec![Pattern::int(0)], Expr::int(1)),
                Clause::new(
                    vec![Pattern::var("n")],
                    Expr::bin(
                        BinOp::Mul,
                        Expr::var("n"),
                        Expr::apply(
                            "f",
                            vec![Expr::bin(BinOp::Sub, Expr::var("n"), Expr::int(1))],
                        ),
                    ),
                ),
            ],
        );
        let json = serde_json::to_string(&def).unwrap();
        let back: FunctionDef = serde_json::from_str(&json).unwrap();
        assert_eq!(def, back);
    }
}
