//! # Equa Core
//!
//! Analysis core for Equa, a small pure functional language with
//! refinement types: pattern-match compilation, type checking, and
//! property verification over already-parsed programs.
//!
//! ## Architecture
//!
//! ```text
//!                      ┌──────────────────┐
//!   Program (AST)  ──► │ validate          │ ──► Error (fatal, abort)
//!                      └────────┬─────────┘
//!                               ▼
//!                      ┌──────────────────┐
//!                      │ matcher           │ ──► CompiledMatch
//!                      │   clause matrix → │     + exhaustiveness /
//!                      │   decision tree   │     unreachability findings
//!                      └────────┬─────────┘
//!                               ▼
//!                      ┌──────────────────┐
//!                      │ checker           │ ──► type mismatches
//!                      └────────┬─────────┘
//!                               ▼
//!                      ┌──────────────────┐
//!                      │ verifier          │ ──► VerificationResult
//!                      │   rule table +    │     (proved / refuted /
//!                      │   induction       │      unknown + witness)
//!                      └────────┬─────────┘
//!                               ▼
//!                         Report (all diagnostics, in order)
//! ```
//!
//! Parsing and all I/O live outside this crate: the input is an AST
//! handed over by an external front-end, the output is an [`Analysis`]
//! value for an external reporting layer.
//!
//! ## Guarantees
//!
//! - Analysis never stops at the first finding: every phase accumulates
//!   into the shared [`Report`].
//! - Compiled decision trees agree with first-match clause semantics.
//! - A `Proved` verdict is sound: every concrete input of the hypothesis
//!   type evaluates to a value of the goal type (up to divergence).
//! - The same program always produces the same `Analysis`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub mod ast;
pub mod checker;
pub mod diagnostics;
pub mod error;
pub mod eval;
pub mod matcher;
pub mod types;
pub mod verifier;

pub use ast::{
    BinOp, Clause, Constructor, Expr, ExprKind, FunctionDef, Literal, Obligation, Pattern,
    Signature, Span, Type, TypeDef,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Report, Severity};
pub use error::{Error, Result};
pub use eval::{eval, Evaluator, Value};
pub use matcher::CompiledMatch;
pub use types::TypeTable;
pub use verifier::{CaseAnalysis, VerificationResult, Verdict};

// ── Program ───────────────────────────────────────────────

/// A complete compilation unit: type declarations plus function
/// definitions, in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub type_defs: Vec<TypeDef>,
    pub functions: Vec<FunctionDef>,
}

impl Program {
    pub fn new(type_defs: Vec<TypeDef>, functions: Vec<FunctionDef>) -> Self {
        Program { type_defs, functions }
    }

    /// Look up a function definition by name
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Enforce the input contract on a front-end supplied AST: unique
    /// names, declared types and constructors, matching arities, and no
    /// unbound variables. Violations are fatal, not diagnostics.
    pub fn validate(&self, table: &TypeTable) -> Result<()> {
        let mut type_names = BTreeSet::new();
        let mut ctor_names = BTreeSet::new();
        for def in &self.type_defs {
            if !type_names.insert(def.name.as_str()) {
                return Err(Error::DuplicateDefinition { name: def.name.clone() });
            }
            for ctor in &def.constructors {
                // Succ is reserved for Natural
                if ctor.name == "Succ" || !ctor_names.insert(ctor.name.as_str()) {
                    return Err(Error::DuplicateDefinition { name: ctor.name.clone() });
                }
                for arg in &ctor.args {
                    check_type(arg, table)?;
                }
            }
        }

        let mut function_names = BTreeSet::new();
        for def in &self.functions {
            if !function_names.insert(def.name.as_str()) {
                return Err(Error::DuplicateDefinition { name: def.name.clone() });
            }
        }

        for def in &self.functions {
            self.validate_function(def, table)?;
        }
        Ok(())
    }

    fn validate_function(&self, def: &FunctionDef, table: &TypeTable) -> Result<()> {
        for param in &def.signature.params {
            check_type(param, table)?;
        }
        check_type(&def.signature.codomain, table)?;

        if def.clauses.is_empty() {
            return Err(Error::EmptyFunction { name: def.name.clone() });
        }

        for (index, clause) in def.clauses.iter().enumerate() {
            if clause.patterns.len() != def.signature.params.len() {
                return Err(Error::ClauseArity {
                    function: def.name.clone(),
                    clause: index + 1,
                    expected: def.signature.params.len(),
                    found: clause.patterns.len(),
                });
            }
            let mut bound = BTreeSet::new();
            for pattern in &clause.patterns {
                check_pattern(pattern, table, &mut bound, &def.name, index)?;
            }
            self.check_expr(&clause.rhs, &bound, table, &def.name)?;
        }

        for obligation in &def.obligations {
            check_type(&obligation.hypothesis, table)?;
            check_type(&obligation.goal_type, table)?;
            let mut bound = BTreeSet::new();
            bound.insert(obligation.var.clone());
            self.check_expr(&obligation.goal, &bound, table, &def.name)?;
        }
        Ok(())
    }

    fn check_expr(
        &self,
        expr: &Expr,
        bound: &BTreeSet<String>,
        table: &TypeTable,
        context: &str,
    ) -> Result<()> {
        match &expr.kind {
            ExprKind::Literal(_) => Ok(()),
            ExprKind::Var(name) => {
                if bound.contains(name) {
                    Ok(())
                } else {
                    Err(Error::UnboundVariable {
                        name: name.clone(),
                        context: context.to_string(),
                    })
                }
            }
            ExprKind::Neg(inner) => self.check_expr(inner, bound, table, context),
            ExprKind::Bin { lhs, rhs, .. } => {
                self.check_expr(lhs, bound, table, context)?;
                self.check_expr(rhs, bound, table, context)
            }
            ExprKind::Ctor { name, args } => {
                let (_, ctor) = table
                    .constructor(name)
                    .ok_or_else(|| Error::UnknownConstructor { name: name.clone() })?;
                if ctor.args.len() != args.len() {
                    return Err(Error::ConstructorArity {
                        name: name.clone(),
                        expected: ctor.args.len(),
                        found: args.len(),
                    });
                }
                for arg in args {
                    self.check_expr(arg, bound, table, context)?;
                }
                Ok(())
            }
            ExprKind::Apply { function, args } => {
                let callee = self
                    .function(function)
                    .ok_or_else(|| Error::UnknownFunction { name: function.clone() })?;
                if callee.signature.params.len() != args.len() {
                    return Err(Error::ApplicationArity {
                        function: function.clone(),
                        expected: callee.signature.params.len(),
                        found: args.len(),
                    });
                }
                for arg in args {
                    self.check_expr(arg, bound, table, context)?;
                }
                Ok(())
            }
        }
    }
}

fn check_type(ty: &Type, table: &TypeTable) -> Result<()> {
    match ty {
        Type::Named(name) if !table.is_declared(name) => {
            Err(Error::UnknownType { name: name.clone() })
        }
        Type::Function(a, b) => {
            check_type(a, table)?;
            check_type(b, table)
        }
        _ => Ok(()),
    }
}

fn check_pattern(
    pattern: &Pattern,
    table: &TypeTable,
    bound: &mut BTreeSet<String>,
    function: &str,
    clause: usize,
) -> Result<()> {
    match pattern {
        Pattern::Wildcard | Pattern::Literal(_) => Ok(()),
        Pattern::Var(name) => {
            if !bound.insert(name.clone()) {
                return Err(Error::MalformedAst(format!(
                    "variable '{}' bound more than once in clause {} of '{}'",
                    name,
                    clause + 1,
                    function
                )));
            }
            Ok(())
        }
        Pattern::Ctor { name, args } => {
            let (_, ctor) = table
                .constructor(name)
                .ok_or_else(|| Error::UnknownConstructor { name: name.clone() })?;
            if ctor.args.len() != args.len() {
                return Err(Error::ConstructorArity {
                    name: name.clone(),
                    expected: ctor.args.len(),
                    found: args.len(),
                });
            }
            for sub in args {
                check_pattern(sub, table, bound, function, clause)?;
            }
            Ok(())
        }
    }
}

// ── Analysis pipeline ─────────────────────────────────────

/// Everything the analysis produced for one program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// All diagnostics, in phase and declaration order
    pub report: Report,
    /// Compiled decision tree per function
    pub matches: BTreeMap<String, CompiledMatch>,
    /// One result per obligation, explicit and implicit
    pub results: Vec<VerificationResult>,
}

/// Run the full pipeline: validate, compile matches, type check, verify.
///
/// Validation failures abort with an [`Error`]; everything else lands in
/// the returned [`Analysis`]. Verification is skipped for functions with
/// error-level findings from the earlier phases, since induction over an
/// ill-typed or non-exhaustive function proves nothing.
pub fn analyze(program: &Program) -> Result<Analysis> {
    let table = TypeTable::new(&program.type_defs);
    program.validate(&table)?;

    let mut report = Report::new();
    let mut matches = BTreeMap::new();
    let mut results = Vec::new();
    // Functions whose refinement codomain is verified so far, in
    // declaration order; the verifier trusts only these callees at the
    // refinement, everything else at its base type
    let mut proved = BTreeSet::new();
    for def in &program.functions {
        let compiled = matcher::compile(def, &table, &mut report);
        let well_matched = compiled.is_exhaustive;
        matches.insert(def.name.clone(), compiled);
        // Later phases skip ill-formed functions; checking or inducting
        // over uncovered input space proves nothing
        if !well_matched {
            continue;
        }
        if !checker::check_function(def, program, &table, &mut report) {
            continue;
        }
        if def.signature.codomain.is_refinement() && def.signature.params.len() != 1 {
            // An obligation names a single hypothesis variable, so this
            // claim has no checkable form; say so rather than stay silent
            report.add_warning(
                DiagnosticKind::ObligationUnknown,
                &def.name,
                format!(
                    "codomain {} of '{}' is not verified: refinement \
                     claims cover single-parameter functions only",
                    def.signature.codomain, def.name
                ),
                Some(def.span.clone()),
            );
        }
        let augmented = with_implicit_obligation(def);
        let fn_results =
            verifier::verify_function(&augmented, program, &table, &proved, &mut report);
        let codomain_proved = augmented
            .obligations
            .iter()
            .zip(&fn_results)
            .any(|(o, r)| r.verdict == Verdict::Proved && claims_codomain(o, def));
        if def.signature.codomain.is_refinement() && codomain_proved {
            proved.insert(def.name.clone());
        }
        results.extend(fn_results);
    }

    Ok(Analysis { report, matches, results })
}

/// Whether an obligation states the function's own codomain claim,
/// `(x: param) => f(x): codomain`
fn claims_codomain(obligation: &Obligation, def: &FunctionDef) -> bool {
    obligation.goal_type == def.signature.codomain
        && matches!(
            &obligation.goal.kind,
            ExprKind::Apply { function, args }
                if *function == def.name && args.len() == 1
        )
}

/// A refinement codomain is itself a claim: `f : T -> Even` obliges
/// `(x: T) => f(x): Even` even when no explicit obligation says so
fn with_implicit_obligation(def: &FunctionDef) -> FunctionDef {
    if !def.signature.codomain.is_refinement() || def.signature.params.len() != 1 {
        return def.clone();
    }
    if def.obligations.iter().any(|o| claims_codomain(o, def)) {
        return def.clone();
    }
    def.clone().with_obligation(Obligation::new(
        "x",
        def.signature.params[0].clone(),
        Expr::apply(&def.name, vec![Expr::var("x")]),
        def.signature.codomain.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factorial() -> FunctionDef {
        FunctionDef::new(
            "fact",
            Signature::new(vec![Type::Natural], Type::Natural),
            vec![
                Clause::new(vec![Pattern::int(0)], Expr::int(1)),
                Clause::new(
                    vec![Pattern::var("n")],
                    Expr::bin(
                        BinOp::Mul,
                        Expr::var("n"),
                        Expr::apply(
                            "fact",
                            vec![Expr::bin(BinOp::Sub, Expr::var("n"), Expr::int(1))],
                        ),
                    ),
                ),
            ],
        )
        .with_obligation(Obligation::new(
            "n",
            Type::Natural,
            Expr::apply("fact", vec![Expr::var("n")]),
            Type::Natural,
        ))
    }

    /// f(x) = x * (x + 1) over the reals
    fn consecutive_product(goal_type: Type) -> FunctionDef {
        FunctionDef::new(
            "f",
            Signature::new(vec![Type::Real], Type::Real),
            vec![Clause::new(
                vec![Pattern::var("x")],
                Expr::bin(
                    BinOp::Mul,
                    Expr::var("x"),
                    Expr::bin(BinOp::Add, Expr::var("x"), Expr::int(1)),
                ),
            )],
        )
        .with_obligation(Obligation::new(
            "x",
            Type::Integer,
            Expr::apply("f", vec![Expr::var("x")]),
            goal_type,
        ))
    }

    #[test]
    fn test_factorial_end_to_end() {
        let program = Program::new(vec![], vec![factorial()]);
        let analysis = analyze(&program).unwrap();
        assert!(analysis.report.is_valid());
        assert!(analysis.report.diagnostics.is_empty());
        assert!(analysis.matches["fact"].is_exhaustive);
        assert_eq!(analysis.results.len(), 1);
        assert_eq!(analysis.results[0].verdict, Verdict::Proved);
    }

    #[test]
    fn test_consecutive_product_even_end_to_end() {
        let program = Program::new(vec![], vec![consecutive_product(Type::Even)]);
        let analysis = analyze(&program).unwrap();
        assert!(analysis.report.is_valid(), "{:?}", analysis.report.diagnostics);
        assert_eq!(analysis.results[0].verdict, Verdict::Proved);
    }

    #[test]
    fn test_duplicate_base_clause_is_unreachable() {
        let def = FunctionDef::new(
            "f",
            Signature::new(vec![Type::Natural], Type::Natural),
            vec![
                Clause::new(vec![Pattern::int(0)], Expr::int(1)),
                Clause::new(vec![Pattern::int(0)], Expr::int(2)),
                Clause::new(vec![Pattern::var("n")], Expr::var("n")),
            ],
        );
        let program = Program::new(vec![], vec![def]);
        let analysis = analyze(&program).unwrap();
        assert!(analysis.report.is_valid());
        let warnings = analysis.report.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, DiagnosticKind::UnreachableClause);
        assert!(warnings[0].message.contains("clause 2"));
    }

    #[test]
    fn test_zero_succ_clauses_are_exhaustive() {
        let complete = FunctionDef::new(
            "pred",
            Signature::new(vec![Type::Natural], Type::Natural),
            vec![
                Clause::new(vec![Pattern::int(0)], Expr::int(0)),
                Clause::new(
                    vec![Pattern::ctor("Succ", vec![Pattern::var("p")])],
                    Expr::var("p"),
                ),
            ],
        );
        let program = Program::new(vec![], vec![complete.clone()]);
        let analysis = analyze(&program).unwrap();
        assert!(analysis.report.diagnostics.is_empty());
        assert!(analysis.matches["pred"].is_exhaustive);

        // Dropping the successor clause leaves a hole with its witness
        let partial = FunctionDef::new(
            "pred",
            complete.signature.clone(),
            vec![complete.clauses[0].clone()],
        );
        let program = Program::new(vec![], vec![partial]);
        let analysis = analyze(&program).unwrap();
        assert!(!analysis.report.is_valid());
        let errors = analysis.report.errors();
        assert_eq!(errors[0].kind, DiagnosticKind::NonExhaustiveMatch);
        assert_eq!(errors[0].witness.as_deref(), Some("Succ(_)"));
    }

    #[test]
    fn test_odd_obligation_refuted_end_to_end() {
        let program = Program::new(vec![], vec![consecutive_product(Type::Odd)]);
        let analysis = analyze(&program).unwrap();
        assert!(!analysis.report.is_valid());
        assert_eq!(analysis.results[0].verdict, Verdict::Refuted);
        let error = &analysis.report.errors()[0];
        assert_eq!(error.kind, DiagnosticKind::ObligationRefuted);
        assert!(error.witness.is_some());
    }

    #[test]
    fn test_refinement_codomain_creates_implicit_obligation() {
        // No explicit obligation, but the Even codomain must be verified
        let def = FunctionDef::new(
            "double",
            Signature::new(vec![Type::Integer], Type::Even),
            vec![Clause::new(
                vec![Pattern::var("x")],
                Expr::bin(BinOp::Mul, Expr::int(2), Expr::var("x")),
            )],
        );
        let program = Program::new(vec![], vec![def]);
        let analysis = analyze(&program).unwrap();
        assert_eq!(analysis.results.len(), 1);
        assert_eq!(analysis.results[0].verdict, Verdict::Proved);
        assert!(analysis.report.is_valid());
    }

    #[test]
    fn test_refuted_callee_is_not_trusted_at_its_codomain() {
        // g declares -> Even but computes an odd value; f forwards to g.
        // Refuting g must leave f refuted as well, not proved off the
        // broken refinement tag.
        let g = FunctionDef::new(
            "g",
            Signature::new(vec![Type::Integer], Type::Even),
            vec![Clause::new(
                vec![Pattern::var("x")],
                Expr::bin(
                    BinOp::Add,
                    Expr::bin(BinOp::Mul, Expr::int(2), Expr::var("x")),
                    Expr::int(1),
                ),
            )],
        );
        let f = FunctionDef::new(
            "f",
            Signature::new(vec![Type::Integer], Type::Integer),
            vec![Clause::new(
                vec![Pattern::var("x")],
                Expr::apply("g", vec![Expr::var("x")]),
            )],
        )
        .with_obligation(Obligation::new(
            "x",
            Type::Integer,
            Expr::apply("f", vec![Expr::var("x")]),
            Type::Even,
        ));
        let program = Program::new(vec![], vec![g, f]);
        let analysis = analyze(&program).unwrap();
        assert_eq!(analysis.results.len(), 2);
        assert_eq!(analysis.results[0].verdict, Verdict::Refuted);
        assert_eq!(analysis.results[1].verdict, Verdict::Refuted);
        let witness = analysis.results[1].witness.as_deref().unwrap_or_default();
        assert!(witness.contains("gives 1"), "witness: {}", witness);
    }

    #[test]
    fn test_proved_callee_codomain_carries_over() {
        // g's Even codomain is verified first, so f may rely on it
        let g = FunctionDef::new(
            "g",
            Signature::new(vec![Type::Integer], Type::Even),
            vec![Clause::new(
                vec![Pattern::var("x")],
                Expr::bin(BinOp::Mul, Expr::int(2), Expr::var("x")),
            )],
        );
        let f = FunctionDef::new(
            "f",
            Signature::new(vec![Type::Integer], Type::Integer),
            vec![Clause::new(
                vec![Pattern::var("x")],
                Expr::apply("g", vec![Expr::var("x")]),
            )],
        )
        .with_obligation(Obligation::new(
            "x",
            Type::Integer,
            Expr::apply("f", vec![Expr::var("x")]),
            Type::Even,
        ));
        let program = Program::new(vec![], vec![g, f]);
        let analysis = analyze(&program).unwrap();
        assert!(analysis.report.is_valid());
        assert_eq!(analysis.results.len(), 2);
        assert!(analysis.results.iter().all(|r| r.verdict == Verdict::Proved));
    }

    #[test]
    fn test_multi_parameter_refinement_codomain_warns() {
        // No obligation can name two hypothesis variables, so the Even
        // claim on h stays unverified and must be flagged
        let def = FunctionDef::new(
            "h",
            Signature::new(vec![Type::Integer, Type::Integer], Type::Even),
            vec![Clause::new(
                vec![Pattern::var("x"), Pattern::var("y")],
                Expr::bin(BinOp::Add, Expr::var("x"), Expr::var("y")),
            )],
        );
        let program = Program::new(vec![], vec![def]);
        let analysis = analyze(&program).unwrap();
        assert!(analysis.results.is_empty());
        assert!(analysis.report.is_valid());
        let warnings = analysis.report.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, DiagnosticKind::ObligationUnknown);
        assert!(warnings[0].message.contains("not verified"));
    }

    #[test]
    fn test_ill_typed_function_is_not_verified() {
        let def = FunctionDef::new(
            "f",
            Signature::new(vec![Type::Natural], Type::Natural),
            vec![Clause::new(vec![Pattern::var("n")], Expr::real(0.5))],
        )
        .with_obligation(Obligation::new(
            "n",
            Type::Natural,
            Expr::apply("f", vec![Expr::var("n")]),
            Type::Natural,
        ));
        let program = Program::new(vec![], vec![def]);
        let analysis = analyze(&program).unwrap();
        assert!(!analysis.report.is_valid());
        assert!(analysis.results.is_empty());
    }

    #[test]
    fn test_unbound_variable_is_fatal() {
        let def = FunctionDef::new(
            "f",
            Signature::new(vec![Type::Natural], Type::Natural),
            vec![Clause::new(vec![Pattern::int(0)], Expr::var("ghost"))],
        );
        let program = Program::new(vec![], vec![def]);
        assert!(matches!(
            analyze(&program),
            Err(Error::UnboundVariable { ref name, .. }) if name == "ghost"
        ));
    }

    #[test]
    fn test_duplicate_function_is_fatal() {
        let def = FunctionDef::new(
            "f",
            Signature::new(vec![Type::Natural], Type::Natural),
            vec![Clause::new(vec![Pattern::var("n")], Expr::var("n"))],
        );
        let program = Program::new(vec![], vec![def.clone(), def]);
        assert!(matches!(
            analyze(&program),
            Err(Error::DuplicateDefinition { ref name }) if name == "f"
        ));
    }

    #[test]
    fn test_succ_is_a_reserved_constructor() {
        let shadow = TypeDef {
            name: "Weird".to_string(),
            constructors: vec![Constructor::new("Succ", vec![Type::Integer])],
            span: Span::default(),
        };
        let program = Program::new(vec![shadow], vec![]);
        assert!(matches!(
            analyze(&program),
            Err(Error::DuplicateDefinition { ref name }) if name == "Succ"
        ));
    }

    #[test]
    fn test_application_arity_is_fatal() {
        let callee = FunctionDef::new(
            "g",
            Signature::new(vec![Type::Natural], Type::Natural),
            vec![Clause::new(vec![Pattern::var("n")], Expr::var("n"))],
        );
        let caller = FunctionDef::new(
            "f",
            Signature::new(vec![Type::Natural], Type::Natural),
            vec![Clause::new(
                vec![Pattern::var("n")],
                Expr::apply("g", vec![Expr::var("n"), Expr::int(1)]),
            )],
        );
        let program = Program::new(vec![], vec![callee, caller]);
        assert!(matches!(
            analyze(&program),
            Err(Error::ApplicationArity { expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let program = Program::new(
            vec![],
            vec![factorial(), consecutive_product(Type::Even)],
        );
        let first = analyze(&program).unwrap();
        for _ in 0..100 {
            assert_eq!(analyze(&program).unwrap(), first);
        }
    }

    #[test]
    fn test_analysis_serialization_round_trip() {
        let program = Program::new(vec![], vec![factorial()]);
        let analysis = analyze(&program).unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        let back: Analysis = serde_json::from_str(&json).unwrap();
        assert_eq!(analysis, back);
    }

    #[test]
    fn test_program_serialization_round_trip() {
        let program = Program::new(vec![], vec![factorial()]);
        let json = serde_json::to_string(&program).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(program, back);
    }
}
