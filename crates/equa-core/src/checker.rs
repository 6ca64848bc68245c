//! Type checker — top-down checking against declared signatures
//!
//! Every function carries a signature, so no whole-program inference is
//! attempted: expressions are checked against declarations, and recursive
//! self-calls use the function's own declared signature. The checker never
//! stops at the first failure — on a mismatch it records a diagnostic and
//! continues with the expected type as a best guess, so a single pass
//! reports every type error in the program.
//!
//! Refinement tags are deliberately absent from arithmetic typing: the
//! product of two `Even` operands types as `Integer` here; deriving `Even`
//! back is the verifier's job.

use std::collections::BTreeMap;

use crate::ast::{BinOp, Expr, ExprKind, FunctionDef, Literal, Pattern, Type};
use crate::diagnostics::{DiagnosticKind, Report};
use crate::types::TypeTable;
use crate::Program;

/// Variable typing environment for one clause
type TypeEnv = BTreeMap<String, Type>;

/// Check one function definition against its declared signature.
/// Returns true when no new type errors were recorded (the verifier only
/// runs on well-typed functions).
pub fn check_function(
    def: &FunctionDef,
    program: &Program,
    table: &TypeTable,
    report: &mut Report,
) -> bool {
    let mut checker = Checker {
        program,
        table,
        function: &def.name,
        report,
        errors: 0,
    };

    for clause in &def.clauses {
        let mut env = TypeEnv::new();
        for (pattern, param_ty) in clause.patterns.iter().zip(&def.signature.params) {
            checker.bind_pattern(pattern, param_ty, &mut env);
        }
        let rhs_ty = checker.synth(&clause.rhs, &env);
        let expected = def.signature.codomain.base();
        if !checker.table.is_subtype(&rhs_ty, &expected) {
            checker.mismatch(&expected, &rhs_ty, &clause.rhs);
        }
    }

    // Obligation goals are checked for internal consistency only. The
    // claimed goal type may be strictly narrower than the goal's static
    // type (that narrowing is exactly what the verifier decides).
    for obligation in &def.obligations {
        let mut env = TypeEnv::new();
        env.insert(obligation.var.clone(), obligation.hypothesis.clone());
        let goal_ty = checker.synth(&obligation.goal, &env);
        if !goal_ty.is_numeric() && obligation.goal_type.is_numeric() {
            checker.mismatch(&obligation.goal_type.base(), &goal_ty, &obligation.goal);
        }
    }

    checker.errors == 0
}

struct Checker<'a> {
    program: &'a Program,
    table: &'a TypeTable,
    function: &'a str,
    report: &'a mut Report,
    errors: usize,
}

impl Checker<'_> {
    // ── Pattern binding ───────────────────────────────────

    /// Introduce a pattern's variables at the types the domain dictates
    fn bind_pattern(&mut self, pattern: &Pattern, expected: &Type, env: &mut TypeEnv) {
        match pattern {
            Pattern::Wildcard => {}
            Pattern::Var(name) => {
                env.insert(name.clone(), expected.clone());
            }
            Pattern::Literal(lit) => {
                let found = literal_type(lit);
                if !self.literal_inhabits(lit, expected) {
                    self.mismatch_message(expected, &found, "literal pattern");
                }
            }
            Pattern::Ctor { name, args } => match self.table.constructor(name) {
                Some((owner, ctor)) => {
                    if owner != *expected && owner != expected.base() {
                        self.mismatch_message(expected, &owner, "constructor pattern");
                    }
                    for (sub, arg_ty) in args.iter().zip(&ctor.args) {
                        self.bind_pattern(sub, arg_ty, env);
                    }
                }
                // Unknown constructors abort earlier in Program::validate
                None => {}
            },
        }
    }

    /// Whether a literal constant is a value of the expected type
    fn literal_inhabits(&self, lit: &Literal, expected: &Type) -> bool {
        match (lit, expected) {
            (Literal::Int(n), Type::Even) => n % 2 == 0,
            (Literal::Int(n), Type::Odd) => n % 2 != 0,
            _ => self.table.is_subtype(&literal_type(lit), &expected.base()),
        }
    }

    // ── Expression synthesis ──────────────────────────────

    /// Assign a principal type to an expression, emitting diagnostics and
    /// recovering with the expected type wherever the context disagrees
    fn synth(&mut self, expr: &Expr, env: &TypeEnv) -> Type {
        match &expr.kind {
            ExprKind::Literal(lit) => literal_type(lit),
            ExprKind::Var(name) => match env.get(name) {
                Some(ty) => ty.clone(),
                // Unbound variables abort earlier in Program::validate
                None => Type::Real,
            },
            ExprKind::Neg(inner) => {
                let ty = self.synth(inner, env);
                if !ty.is_numeric() {
                    self.mismatch(&Type::Integer, &ty, inner);
                    return Type::Integer;
                }
                // Negation leaves Natural: -n is an Integer
                self.table
                    .join_numeric(&ty.base(), &Type::Integer)
                    .unwrap_or(Type::Integer)
            }
            ExprKind::Bin { op, lhs, rhs } => {
                let lt = self.synth(lhs, env);
                let rt = self.synth(rhs, env);
                self.synth_binop(*op, &lt, &rt, lhs, rhs)
            }
            ExprKind::Ctor { name, args } => match self.table.constructor(name) {
                Some((owner, ctor)) => {
                    for (arg, arg_ty) in args.iter().zip(&ctor.args) {
                        let found = self.synth(arg, env);
                        if !self.table.is_subtype(&found, arg_ty) {
                            self.mismatch(arg_ty, &found, arg);
                        }
                    }
                    owner
                }
                None => Type::Real,
            },
            ExprKind::Apply { function, args } => {
                match self.program.function(function) {
                    Some(def) => {
                        for (arg, param_ty) in args.iter().zip(&def.signature.params) {
                            let found = self.synth(arg, env);
                            if !self.table.is_subtype(&found, param_ty) {
                                self.mismatch(param_ty, &found, arg);
                            }
                        }
                        // Applications surface the declared codomain as-is;
                        // arithmetic contexts strip the refinement base
                        def.signature.codomain.clone()
                    }
                    None => Type::Real,
                }
            }
        }
    }

    fn synth_binop(&mut self, op: BinOp, lt: &Type, rt: &Type, lhs: &Expr, rhs: &Expr) -> Type {
        let lt = self.require_numeric(lt, lhs);
        let rt = self.require_numeric(rt, rhs);
        if op.is_comparison() {
            return Type::Boolean;
        }
        if op == BinOp::Div {
            return Type::Real;
        }
        self.table
            .join_numeric(&lt.base(), &rt.base())
            .unwrap_or(Type::Integer)
    }

    fn require_numeric(&mut self, ty: &Type, at: &Expr) -> Type {
        if ty.is_numeric() {
            ty.clone()
        } else {
            self.mismatch(&Type::Real, ty, at);
            Type::Real
        }
    }

    // ── Diagnostics ───────────────────────────────────────

    fn mismatch(&mut self, expected: &Type, found: &Type, at: &Expr) {
        self.errors += 1;
        self.report.add_error(
            DiagnosticKind::TypeMismatch,
            self.function,
            format!("expected {}, found {} in '{}'", expected, found, at),
            Some(at.span.clone()),
        );
    }

    fn mismatch_message(&mut self, expected: &Type, found: &Type, context: &str) {
        self.errors += 1;
        self.report.add_error(
            DiagnosticKind::TypeMismatch,
            self.function,
            format!("expected {}, found {} in {}", expected, found, context),
            None,
        );
    }
}

/// Literal typing: non-negative integers are `Natural`, negative ones
/// `Integer`, decimals `Real`
fn literal_type(lit: &Literal) -> Type {
    match lit {
        Literal::Int(n) if *n >= 0 => Type::Natural,
        Literal::Int(_) => Type::Integer,
        Literal::Real(_) => Type::Real,
    }
}
