//! Property verifier — sound derivation with one-step induction
//!
//! Obligations `(x: T) => goal: R` are decided in three stages:
//!
//! 1. **Abstract derivation.** The goal is evaluated in an abstract domain
//!    of numeric class (`Natural`/`Integer`/`Real`) and parity
//!    (`Even`/`Odd`), using a fixed table of per-operator propagation
//!    rules. Every rule is exact: when no sound rule applies, the result
//!    degrades to unknown rather than guessing.
//! 2. **Case analysis.** A goal of the form `f(x)` over `f`'s own
//!    obligation is split along `f`'s clauses; a structurally decreasing
//!    self-call whose argument still satisfies the hypothesis type
//!    assumes the goal property (one-step induction). A direct goal over
//!    an `Integer`-class hypothesis whose parity matters is split into
//!    even/odd sub-cases.
//! 3. **Counterexample search.** When derivation fails, small concrete
//!    inputs of the hypothesis type are evaluated with bounded fuel; an
//!    output violating the goal type refutes the obligation with a
//!    witness. Otherwise the verdict is UNKNOWN — never silently PROVED.
//!
//! Guarantees: PROVED and REFUTED are mutually exclusive, and PROVED
//! implies every concrete input of the hypothesis type satisfies the goal
//! (partial correctness — divergence aside).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ast::{BinOp, Clause, Expr, ExprKind, FunctionDef, Literal, Obligation, Pattern, Type};
use crate::diagnostics::{DiagnosticKind, Report};
use crate::eval::{satisfies_type, Evaluator, Value, DEFAULT_FUEL};
use crate::types::TypeTable;
use crate::Program;

/// Smallest-magnitude bound for counterexample candidates
const WITNESS_BOUND: i64 = 8;

// ── Results ───────────────────────────────────────────────

/// Outcome of one verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Proved,
    Refuted,
    Unknown,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Verdict::Proved => write!(f, "proved"),
            Verdict::Refuted => write!(f, "refuted"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// One case of the exhaustive partition, with its justification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseAnalysis {
    /// Human-readable case description, e.g. `clause 2: fact(n)` or `x odd`
    pub label: String,
    /// The strongest property the rule table derived for this case
    pub derived: String,
    pub holds: bool,
}

/// Verdict plus per-case justification for one obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub function: String,
    pub obligation: String,
    pub verdict: Verdict,
    pub cases: Vec<CaseAnalysis>,
    /// Concrete counterexample, present exactly when refuted
    pub witness: Option<String>,
}

impl std::fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.obligation, self.verdict)?;
        if let Some(ref witness) = self.witness {
            write!(f, " (witness: {})", witness)?;
        }
        Ok(())
    }
}

// ── Abstract domain ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumClass {
    Natural,
    Integer,
    Real,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
    Even,
    Odd,
    Unknown,
}

/// Abstract value: what is known about a sub-expression's result.
/// `lower`/`upper` are inclusive value bounds when known; they let the
/// domain see that `n - 1` is still a `Natural` when `n ≥ 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Props {
    class: NumClass,
    parity: Parity,
    lower: Option<i64>,
    upper: Option<i64>,
}

impl Props {
    const UNKNOWN: Props = Props {
        class: NumClass::Unknown,
        parity: Parity::Unknown,
        lower: None,
        upper: None,
    };

    fn of_type(ty: &Type) -> Props {
        let (class, parity, lower) = match ty {
            Type::Natural => (NumClass::Natural, Parity::Unknown, Some(0)),
            Type::Integer => (NumClass::Integer, Parity::Unknown, None),
            Type::Real => (NumClass::Real, Parity::Unknown, None),
            Type::Even => (NumClass::Integer, Parity::Even, None),
            Type::Odd => (NumClass::Integer, Parity::Odd, None),
            _ => (NumClass::Unknown, Parity::Unknown, None),
        };
        Props { class, parity, lower, upper: None }
    }

    /// Whether the derived properties entail membership in `goal`
    fn satisfies(&self, goal: &Type) -> bool {
        match goal {
            Type::Natural => {
                self.class == NumClass::Natural
                    || (self.is_integral() && self.lower.is_some_and(|l| l >= 0))
            }
            Type::Integer => self.is_integral(),
            Type::Real => self.class != NumClass::Unknown,
            Type::Even => self.parity == Parity::Even && self.is_integral(),
            Type::Odd => self.parity == Parity::Odd && self.is_integral(),
            _ => false,
        }
    }

    /// Known to be an integer-valued quantity; parity rules are only
    /// sound over integral operands
    fn is_integral(&self) -> bool {
        matches!(self.class, NumClass::Natural | NumClass::Integer)
    }

    fn describe(&self) -> String {
        let class = match self.class {
            NumClass::Natural => "Natural",
            NumClass::Integer => "Integer",
            NumClass::Real => "Real",
            NumClass::Unknown => "unknown",
        };
        match self.parity {
            Parity::Even => format!("Even {}", class),
            Parity::Odd => format!("Odd {}", class),
            Parity::Unknown => class.to_string(),
        }
    }
}

fn literal_props(lit: &Literal) -> Props {
    match lit {
        Literal::Int(n) => Props {
            class: if *n >= 0 { NumClass::Natural } else { NumClass::Integer },
            parity: if n % 2 == 0 { Parity::Even } else { Parity::Odd },
            lower: Some(*n),
            upper: Some(*n),
        },
        Literal::Real(_) => Props {
            class: NumClass::Real,
            parity: Parity::Unknown,
            lower: None,
            upper: None,
        },
    }
}

// ── Propagation rules ─────────────────────────────────────
//
// Each rule is exact over its abstract inputs. Parity rules require both
// operands integral (a parity tag on a possibly-real quantity would let
// `Even * Real` derive nonsense).

fn add_class(a: NumClass, b: NumClass) -> NumClass {
    match (a, b) {
        (NumClass::Unknown, _) | (_, NumClass::Unknown) => NumClass::Unknown,
        (NumClass::Real, _) | (_, NumClass::Real) => NumClass::Real,
        (NumClass::Natural, NumClass::Natural) => NumClass::Natural,
        _ => NumClass::Integer,
    }
}

fn sub_class(a: NumClass, b: NumClass) -> NumClass {
    match (a, b) {
        (NumClass::Unknown, _) | (_, NumClass::Unknown) => NumClass::Unknown,
        (NumClass::Real, _) | (_, NumClass::Real) => NumClass::Real,
        // Natural - Natural can go negative, so only Integer is sound
        _ => NumClass::Integer,
    }
}

fn mul_class(a: NumClass, b: NumClass) -> NumClass {
    match (a, b) {
        (NumClass::Unknown, _) | (_, NumClass::Unknown) => NumClass::Unknown,
        (NumClass::Real, _) | (_, NumClass::Real) => NumClass::Real,
        (NumClass::Natural, NumClass::Natural) => NumClass::Natural,
        _ => NumClass::Integer,
    }
}

fn add_sub_parity(a: Props, b: Props) -> Parity {
    if !a.is_integral() || !b.is_integral() {
        return Parity::Unknown;
    }
    match (a.parity, b.parity) {
        (Parity::Even, Parity::Even) | (Parity::Odd, Parity::Odd) => Parity::Even,
        (Parity::Even, Parity::Odd) | (Parity::Odd, Parity::Even) => Parity::Odd,
        _ => Parity::Unknown,
    }
}

fn mul_parity(a: Props, b: Props) -> Parity {
    if !a.is_integral() || !b.is_integral() {
        return Parity::Unknown;
    }
    match (a.parity, b.parity) {
        (Parity::Even, _) | (_, Parity::Even) => Parity::Even,
        (Parity::Odd, Parity::Odd) => Parity::Odd,
        _ => Parity::Unknown,
    }
}

fn flip(parity: Parity) -> Parity {
    match parity {
        Parity::Even => Parity::Odd,
        Parity::Odd => Parity::Even,
        Parity::Unknown => Parity::Unknown,
    }
}

// Interval arithmetic on the optional bounds. Anything that could
// overflow `i64` drops the bound instead of wrapping.

fn opt_add(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    a?.checked_add(b?)
}

fn opt_sub(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    a?.checked_sub(b?)
}

fn add_bounds(a: Props, b: Props) -> (Option<i64>, Option<i64>) {
    (opt_add(a.lower, b.lower), opt_add(a.upper, b.upper))
}

fn sub_bounds(a: Props, b: Props) -> (Option<i64>, Option<i64>) {
    (opt_sub(a.lower, b.upper), opt_sub(a.upper, b.lower))
}

fn mul_bounds(a: Props, b: Props) -> (Option<i64>, Option<i64>) {
    // Products are bounded only when both operands are known non-negative;
    // mixed signs would need the full four-corner case split
    match (a.lower, b.lower) {
        (Some(x), Some(y)) if x >= 0 && y >= 0 => {
            let upper = match (a.upper, b.upper) {
                (Some(p), Some(q)) => p.checked_mul(q),
                _ => None,
            };
            (x.checked_mul(y), upper)
        }
        _ => (None, None),
    }
}

// ── Case facts ────────────────────────────────────────────

/// What one case of the analysis knows about its variables
#[derive(Debug, Clone, Default)]
struct CaseFacts {
    env: BTreeMap<String, Props>,
    /// Variables bound strictly inside a constructor pattern; passing one
    /// to a self-call is a structural decrease
    subterm_vars: BTreeSet<String>,
    /// Variables bound at a pattern root (the whole matched value)
    whole_vars: BTreeSet<String>,
}

impl CaseFacts {
    fn single(var: &str, props: Props) -> CaseFacts {
        let mut facts = CaseFacts::default();
        facts.env.insert(var.to_string(), props);
        facts
    }

    /// Facts established by a clause's patterns over the given domain types
    fn of_clause(patterns: &[Pattern], domain: &[Type], table: &TypeTable) -> CaseFacts {
        let mut facts = CaseFacts::default();
        for (pattern, ty) in patterns.iter().zip(domain) {
            facts.bind(pattern, ty, table, 0);
        }
        facts
    }

    fn bind(&mut self, pattern: &Pattern, ty: &Type, table: &TypeTable, depth: usize) {
        match pattern {
            Pattern::Wildcard | Pattern::Literal(_) => {}
            Pattern::Var(name) => {
                self.env.insert(name.clone(), Props::of_type(ty));
                if depth == 0 {
                    self.whole_vars.insert(name.clone());
                } else {
                    self.subterm_vars.insert(name.clone());
                }
            }
            Pattern::Ctor { name, args } => {
                if let Some((_, ctor)) = table.constructor(name) {
                    for (sub, arg_ty) in args.iter().zip(&ctor.args) {
                        self.bind(sub, arg_ty, table, depth + 1);
                    }
                }
            }
        }
    }
}

// ── Verification ──────────────────────────────────────────

/// Verify every obligation attached to a function, recording diagnostics
/// for refuted and unknown outcomes. `proved` names the functions whose
/// refinement codomain is already verified; only those callees are
/// trusted at the refinement.
pub fn verify_function(
    def: &FunctionDef,
    program: &Program,
    table: &TypeTable,
    proved: &BTreeSet<String>,
    report: &mut Report,
) -> Vec<VerificationResult> {
    let mut results = Vec::with_capacity(def.obligations.len());
    for obligation in &def.obligations {
        let result = verify_obligation(def, program, table, proved, obligation);
        match result.verdict {
            Verdict::Proved => {}
            Verdict::Refuted => {
                report.add_error_with_witness(
                    DiagnosticKind::ObligationRefuted,
                    &def.name,
                    format!("{} does not hold", obligation),
                    Some(obligation.span.clone()),
                    result.witness.clone().unwrap_or_default(),
                );
            }
            Verdict::Unknown => {
                report.add_warning(
                    DiagnosticKind::ObligationUnknown,
                    &def.name,
                    format!("{} could not be derived or refuted", obligation),
                    Some(obligation.span.clone()),
                );
            }
        }
        results.push(result);
    }
    results
}

/// Decide one obligation
pub fn verify_obligation(
    def: &FunctionDef,
    program: &Program,
    table: &TypeTable,
    proved: &BTreeSet<String>,
    obligation: &Obligation,
) -> VerificationResult {
    let deriver = Deriver {
        program,
        table,
        function: &def.name,
        hypothesis: &obligation.hypothesis,
        hypothesis_props: Props::of_type(&obligation.goal_type),
        proved,
    };

    let cases = if let Some(clause_cases) = inductive_cases(def, obligation, &deriver) {
        clause_cases
    } else {
        direct_cases(obligation, &deriver)
    };

    if !cases.is_empty() && cases.iter().all(|c| c.holds) {
        return VerificationResult {
            function: def.name.clone(),
            obligation: obligation.to_string(),
            verdict: Verdict::Proved,
            cases,
            witness: None,
        };
    }

    // Derivation failed for some case: try to refute concretely
    match search_counterexample(program, table, obligation) {
        Some((input, output)) => VerificationResult {
            function: def.name.clone(),
            obligation: obligation.to_string(),
            verdict: Verdict::Refuted,
            cases,
            witness: Some(format!("{} = {} gives {}", obligation.var, input, output)),
        },
        None => VerificationResult {
            function: def.name.clone(),
            obligation: obligation.to_string(),
            verdict: Verdict::Unknown,
            cases,
            witness: None,
        },
    }
}

/// Case split along the function's own clauses, when the goal is exactly
/// `f(x)` for the hypothesis variable. Each clause assumes the goal for
/// structurally decreasing self-calls whose argument still satisfies the
/// hypothesis type.
fn inductive_cases(
    def: &FunctionDef,
    obligation: &Obligation,
    deriver: &Deriver,
) -> Option<Vec<CaseAnalysis>> {
    match &obligation.goal.kind {
        ExprKind::Apply { function, args }
            if *function == def.name
                && args.len() == 1
                && matches!(&args[0].kind, ExprKind::Var(v) if *v == obligation.var) => {}
        _ => return None,
    }

    // Unary by the guard above; the hypothesis narrows the domain
    let domain = [obligation.hypothesis.clone()];
    let cases = def
        .clauses
        .iter()
        .enumerate()
        .map(|(index, clause)| {
            let mut facts = CaseFacts::of_clause(&clause.patterns, &domain, deriver.table);
            // A whole-value variable over Natural sits above every
            // literal the earlier clauses already claimed, so `n - 1`
            // in the second factorial clause stays Natural
            if obligation.hypothesis == Type::Natural {
                if let Some(Pattern::Var(name)) = clause.patterns.first() {
                    let floor = uncovered_floor(&def.clauses[..index]);
                    if let Some(props) = facts.env.get_mut(name) {
                        props.lower = Some(floor);
                    }
                }
            }
            let (derived, holds) =
                derive_with_split(deriver, &clause.rhs, &facts, &obligation.goal_type);
            CaseAnalysis {
                label: format!("clause {}: {}({})", index + 1, def.name, clause.patterns[0]),
                derived,
                holds,
            }
        })
        .collect();
    Some(cases)
}

/// Derive a property for one case, falling back to an even/odd split on
/// a single integral variable when the goal is a parity refinement
fn derive_with_split(
    deriver: &Deriver,
    expr: &Expr,
    facts: &CaseFacts,
    goal: &Type,
) -> (String, bool) {
    let props = deriver.derive(expr, facts);
    if props.satisfies(goal) {
        return (props.describe(), true);
    }
    if matches!(goal, Type::Even | Type::Odd) {
        let splittable: Vec<&String> = facts
            .env
            .iter()
            .filter(|(_, p)| p.is_integral() && p.parity == Parity::Unknown)
            .map(|(name, _)| name)
            .collect();
        for var in splittable {
            let proved = [Parity::Even, Parity::Odd].into_iter().all(|parity| {
                let mut split = facts.clone();
                if let Some(p) = split.env.get_mut(var) {
                    p.parity = parity;
                }
                deriver.derive(expr, &split).satisfies(goal)
            });
            if proved {
                return (format!("{} by parity split on {}", goal, var), true);
            }
        }
    }
    (props.describe(), false)
}

/// Direct derivation on the goal expression; when parity is at stake and
/// the hypothesis is an integral type of unknown parity, split even/odd
fn direct_cases(obligation: &Obligation, deriver: &Deriver) -> Vec<CaseAnalysis> {
    let hyp = Props::of_type(&obligation.hypothesis);
    let facts = CaseFacts::single(&obligation.var, hyp);
    let props = deriver.derive(&obligation.goal, &facts);
    if props.satisfies(&obligation.goal_type) {
        return vec![CaseAnalysis {
            label: format!("{}: {}", obligation.var, obligation.hypothesis),
            derived: props.describe(),
            holds: true,
        }];
    }

    let parity_goal = matches!(obligation.goal_type, Type::Even | Type::Odd);
    if parity_goal && hyp.is_integral() && hyp.parity == Parity::Unknown {
        return [Parity::Even, Parity::Odd]
            .into_iter()
            .map(|parity| {
                let split = Props { parity, ..hyp };
                let facts = CaseFacts::single(&obligation.var, split);
                let props = deriver.derive(&obligation.goal, &facts);
                CaseAnalysis {
                    label: format!(
                        "{} {}",
                        obligation.var,
                        if parity == Parity::Even { "even" } else { "odd" }
                    ),
                    derived: props.describe(),
                    holds: props.satisfies(&obligation.goal_type),
                }
            })
            .collect();
    }

    vec![CaseAnalysis {
        label: format!("{}: {}", obligation.var, obligation.hypothesis),
        derived: props.describe(),
        holds: false,
    }]
}

/// Abstract evaluator over the propagation rule table
struct Deriver<'a> {
    program: &'a Program,
    table: &'a TypeTable,
    function: &'a str,
    hypothesis: &'a Type,
    hypothesis_props: Props,
    /// Functions whose refinement codomain is already verified; only
    /// these may be trusted at the refinement, others at its base
    proved: &'a BTreeSet<String>,
}

impl Deriver<'_> {
    fn derive(&self, expr: &Expr, facts: &CaseFacts) -> Props {
        match &expr.kind {
            ExprKind::Literal(lit) => literal_props(lit),
            ExprKind::Var(name) => facts.env.get(name).copied().unwrap_or(Props::UNKNOWN),
            ExprKind::Neg(inner) => {
                let p = self.derive(inner, facts);
                let class = match p.class {
                    NumClass::Natural => NumClass::Integer,
                    other => other,
                };
                // Negation preserves parity
                Props {
                    class,
                    parity: p.parity,
                    lower: p.upper.and_then(i64::checked_neg),
                    upper: p.lower.and_then(i64::checked_neg),
                }
            }
            ExprKind::Bin { op, lhs, rhs } => {
                let a = self.derive(lhs, facts);
                let b = self.derive(rhs, facts);
                match op {
                    BinOp::Add => {
                        let (lower, upper) = add_bounds(a, b);
                        Props {
                            class: add_class(a.class, b.class),
                            parity: add_sub_parity(a, b),
                            lower,
                            upper,
                        }
                    }
                    BinOp::Sub => {
                        let (lower, upper) = sub_bounds(a, b);
                        Props {
                            class: sub_class(a.class, b.class),
                            parity: add_sub_parity(a, b),
                            lower,
                            upper,
                        }
                    }
                    BinOp::Mul => {
                        let (lower, upper) = mul_bounds(a, b);
                        Props {
                            class: mul_class(a.class, b.class),
                            parity: mul_parity(a, b),
                            lower,
                            upper,
                        }
                    }
                    // Quotients are real; no parity survives division
                    BinOp::Div => Props {
                        class: NumClass::Real,
                        parity: Parity::Unknown,
                        lower: None,
                        upper: None,
                    },
                    _ => Props::UNKNOWN,
                }
            }
            ExprKind::Ctor { name, args } if name == "Succ" => {
                let p = args
                    .first()
                    .map(|arg| self.derive(arg, facts))
                    .unwrap_or(Props::UNKNOWN);
                let class = if p.class == NumClass::Natural {
                    NumClass::Natural
                } else {
                    NumClass::Unknown
                };
                Props {
                    class,
                    parity: flip(p.parity),
                    lower: opt_add(p.lower, Some(1)),
                    upper: opt_add(p.upper, Some(1)),
                }
            }
            ExprKind::Ctor { .. } => Props::UNKNOWN,
            ExprKind::Apply { function, args } => {
                if *function == self.function {
                    // The induction hypothesis covers exactly the inputs
                    // that satisfy the hypothesis type, so the decreasing
                    // argument must demonstrably satisfy it too: under
                    // hypothesis Even, a call at `x - 1` is outside the
                    // hypothesis and yields no fact.
                    let hypothesis_applies = args.iter().any(|arg| {
                        is_decreasing(arg, facts)
                            && self.derive(arg, facts).satisfies(self.hypothesis)
                    });
                    if hypothesis_applies {
                        self.hypothesis_props
                    } else {
                        Props::UNKNOWN
                    }
                } else {
                    // Other functions are trusted at their declared
                    // codomain base; the refinement tag is honored only
                    // once the callee's own obligation has been proved
                    self.program
                        .function(function)
                        .map(|callee| {
                            let codomain = &callee.signature.codomain;
                            if codomain.is_refinement() && !self.proved.contains(function) {
                                Props::of_type(&codomain.base())
                            } else {
                                Props::of_type(codomain)
                            }
                        })
                        .unwrap_or(Props::UNKNOWN)
                }
            }
        }
    }
}

/// Structural decrease relative to the current case's pattern facts:
/// a variable bound under a constructor, or `v - k` (k ≥ 1) / `v / k`
/// (k ≥ 2) on a whole-value pattern variable
fn is_decreasing(arg: &Expr, facts: &CaseFacts) -> bool {
    match &arg.kind {
        ExprKind::Var(name) => facts.subterm_vars.contains(name),
        ExprKind::Bin { op, lhs, rhs } => {
            let whole_var = matches!(&lhs.kind, ExprKind::Var(v) if facts.whole_vars.contains(v));
            let step = match &rhs.kind {
                ExprKind::Literal(Literal::Int(k)) => *k,
                _ => return false,
            };
            whole_var
                && match op {
                    BinOp::Sub => step >= 1,
                    BinOp::Div => step >= 2,
                    _ => false,
                }
        }
        _ => false,
    }
}

/// Smallest natural not matched by any of the given unary clauses'
/// integer literal patterns. Values reaching a later clause are at
/// least this large when the covered literals start contiguously at 0.
fn uncovered_floor(earlier: &[Clause]) -> i64 {
    let covered: BTreeSet<i64> = earlier
        .iter()
        .filter_map(|clause| match clause.patterns.first() {
            Some(Pattern::Literal(Literal::Int(n))) => Some(*n),
            _ => None,
        })
        .collect();
    (0..).find(|k| !covered.contains(k)).unwrap_or(0)
}

// ── Counterexample search ─────────────────────────────────

/// Enumerate small concrete inputs of the hypothesis type and evaluate
/// the goal with bounded fuel, looking for an output outside the goal
/// type. Inputs that fail to evaluate (fuel, missing clause) are skipped.
fn search_counterexample(
    program: &Program,
    table: &TypeTable,
    obligation: &Obligation,
) -> Option<(Value, Value)> {
    for input in candidate_values(&obligation.hypothesis) {
        if !satisfies_type(&input, &obligation.hypothesis, table) {
            continue;
        }
        let mut env = BTreeMap::new();
        env.insert(obligation.var.clone(), input.clone());
        let mut evaluator = Evaluator::new(program, DEFAULT_FUEL);
        if let Ok(output) = evaluator.eval(&env, &obligation.goal) {
            if !satisfies_type(&output, &obligation.goal_type, table) {
                return Some((input, output));
            }
        }
    }
    None
}

/// Candidate inputs, smallest magnitude first so witnesses stay readable
fn candidate_values(hypothesis: &Type) -> Vec<Value> {
    match hypothesis {
        Type::Natural => (0..=WITNESS_BOUND).map(Value::Int).collect(),
        Type::Integer | Type::Even | Type::Odd => {
            let mut values = vec![Value::Int(0)];
            for k in 1..=WITNESS_BOUND {
                values.push(Value::Int(k));
                values.push(Value::Int(-k));
            }
            values
        }
        Type::Real => {
            let mut values = vec![Value::Int(0), Value::Real(0.5)];
            for k in 1..=WITNESS_BOUND {
                values.push(Value::Int(k));
                values.push(Value::Int(-k));
                values.push(Value::Real(k as f64 + 0.5));
                values.push(Value::Real(-(k as f64) - 0.5));
            }
            values
        }
        _ => Vec::new(),
    }
}
