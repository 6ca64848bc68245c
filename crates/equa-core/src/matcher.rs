//! Pattern-match compiler — clause matrices to decision trees
//!
//! Lowers a function's ordered clauses into a decision tree such that
//! every possible input reaches exactly one leaf `(clause, substitution)`,
//! matching first-clause-wins textual semantics. The compiler enforces two
//! policies rather than assuming them:
//!
//! - **Overlap**: a clause subsumed by earlier clauses never appears in a
//!   leaf and is flagged `UnreachableClause` (warning).
//! - **Exhaustiveness**: a constructor case no clause covers yields
//!   `NonExhaustiveMatch` (error) naming a concrete uncovered input shape;
//!   the function is marked ill-formed and later phases skip it. The
//!   compiler never invents a default case.
//!
//! Algorithm: split on the first non-variable pattern column, group rows
//! by head constructor (variable and wildcard rows are replicated into
//! every group, preserving relative order), recurse per group. `Natural`
//! is treated as the two-constructor type `{0, Succ}`; positive literal
//! patterns over `Natural` are expanded into `Succ` chains first.

use serde::{Deserialize, Serialize};

use crate::ast::{FunctionDef, Literal, Pattern, Type};
use crate::diagnostics::{DiagnosticKind, Report};
use crate::eval::Value;
use crate::types::TypeTable;

/// Positive `Natural` literal patterns up to this bound expand into
/// `Succ` chains; larger ones keep their literal head.
const MAX_NATURAL_LITERAL: i64 = 512;

/// Path from the argument tuple to a sub-value: the first index selects
/// the argument, the rest descend into constructor fields
pub type Occurrence = Vec<usize>;

/// Discriminating head of a pattern column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Head {
    Int(i64),
    Real(f64),
    Ctor(String),
}

impl Head {
    fn display(&self, arity: usize) -> String {
        match self {
            Head::Int(n) => n.to_string(),
            Head::Real(x) => x.to_string(),
            Head::Ctor(name) => {
                if arity == 0 {
                    name.clone()
                } else {
                    let holes = vec!["_"; arity].join(", ");
                    format!("{}({})", name, holes)
                }
            }
        }
    }
}

/// Compiled decision tree for one function's clause set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    /// Exactly one clause matched; `bindings` maps its pattern variables
    /// to input sub-values
    Leaf {
        clause: usize,
        bindings: Vec<(String, Occurrence)>,
    },
    /// Test the value at `occ` against each arm's head in order, falling
    /// back to `default` when none applies
    Switch {
        occ: Occurrence,
        arms: Vec<(Head, Decision)>,
        default: Option<Box<Decision>>,
    },
    /// Uncovered input space; only present in ill-formed functions
    Fail,
}

/// Result of compiling one function's clauses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledMatch {
    pub decision: Decision,
    /// False when any input shape reaches a `Fail` node
    pub is_exhaustive: bool,
}

// ── Compilation ───────────────────────────────────────────

/// One matrix cell: a pattern awaiting a value at `occ` of type `ty`
#[derive(Debug, Clone)]
struct Cell {
    occ: Occurrence,
    ty: Type,
    pattern: Pattern,
}

/// One matrix row: a clause's remaining cells plus bindings made so far
#[derive(Debug, Clone)]
struct Row {
    clause: usize,
    cells: Vec<Cell>,
    bindings: Vec<(String, Occurrence)>,
}

struct Compiler<'a> {
    table: &'a TypeTable,
    function: String,
    /// Current input shape, refined as compilation descends; used to
    /// build concrete uncovered-input witnesses
    shape: Vec<Pattern>,
    reached: Vec<bool>,
    exhaustive: bool,
    report: &'a mut Report,
}

/// Compile a function's clause set, recording unreachable-clause and
/// non-exhaustiveness diagnostics in `report`.
pub fn compile(def: &FunctionDef, table: &TypeTable, report: &mut Report) -> CompiledMatch {
    let rows: Vec<Row> = def
        .clauses
        .iter()
        .enumerate()
        .map(|(index, clause)| Row {
            clause: index,
            cells: clause
                .patterns
                .iter()
                .zip(&def.signature.params)
                .enumerate()
                .map(|(arg, (pattern, ty))| Cell {
                    occ: vec![arg],
                    ty: ty.clone(),
                    pattern: normalize(pattern, ty),
                })
                .collect(),
            bindings: Vec::new(),
        })
        .collect();

    let mut compiler = Compiler {
        table,
        function: def.name.clone(),
        shape: vec![Pattern::Wildcard; def.signature.params.len()],
        reached: vec![false; def.clauses.len()],
        exhaustive: true,
        report,
    };
    let decision = compiler.build(rows);

    for (index, reached) in compiler.reached.iter().enumerate() {
        if !reached {
            compiler.report.add_warning(
                DiagnosticKind::UnreachableClause,
                &def.name,
                format!(
                    "clause {} ({}) is unreachable: every matching input is claimed by an earlier clause",
                    index + 1,
                    def.clauses[index]
                        .patterns
                        .iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                Some(def.clauses[index].span.clone()),
            );
        }
    }

    CompiledMatch {
        decision,
        is_exhaustive: compiler.exhaustive,
    }
}

impl Compiler<'_> {
    fn build(&mut self, rows: Vec<Row>) -> Decision {
        let Some(first) = rows.first() else {
            self.record_uncovered();
            return Decision::Fail;
        };

        // First row irrefutable in every column: it wins outright
        if first.cells.iter().all(|c| c.pattern.is_irrefutable()) {
            let mut bindings = first.bindings.clone();
            for cell in &first.cells {
                if let Pattern::Var(name) = &cell.pattern {
                    bindings.push((name.clone(), cell.occ.clone()));
                }
            }
            self.reached[first.clause] = true;
            return Decision::Leaf { clause: first.clause, bindings };
        }

        // Split on the first non-variable column of the first row
        let column = first
            .cells
            .iter()
            .position(|c| !c.pattern.is_irrefutable())
            .unwrap_or(0);
        let occ = first.cells[column].occ.clone();
        let column_ty = first.cells[column].ty.clone();

        // Heads in order of first appearance
        let mut heads: Vec<Head> = Vec::new();
        for row in &rows {
            if let Some(cell) = row.cells.iter().find(|c| c.occ == occ) {
                if let Some(head) = pattern_head(&cell.pattern) {
                    if !heads.contains(&head) {
                        heads.push(head);
                    }
                }
            }
        }

        let mut arms = Vec::with_capacity(heads.len());
        for head in heads.iter() {
            let sub_types = self.head_arg_types(head);
            let specialized = specialize(&rows, &occ, head, &sub_types);
            let saved = self.shape.clone();
            set_shape(&mut self.shape, &occ, head_pattern(head, sub_types.len()));
            let sub_tree = self.build(specialized);
            self.shape = saved;
            arms.push((head.clone(), sub_tree));
        }

        // Rows irrefutable at this column form the default matrix
        let default_rows = defaults(&rows, &occ);
        let default = match self.missing_heads(&column_ty, &heads) {
            // Every constructor of the column type is covered; variable
            // rows were already replicated into each arm
            None => None,
            Some(missing) => {
                if default_rows.is_empty() {
                    self.exhaustive = false;
                    for (head, arity) in &missing {
                        let mut witness_shape = self.shape.clone();
                        set_shape(&mut witness_shape, &occ, head_pattern(head, *arity));
                        let witness = witness_shape
                            .iter()
                            .map(|p| p.to_string())
                            .collect::<Vec<_>>()
                            .join(", ");
                        self.report.add_error_with_witness(
                            DiagnosticKind::NonExhaustiveMatch,
                            &self.function,
                            format!(
                                "match is not exhaustive: no clause covers input shape ({})",
                                witness
                            ),
                            None,
                            witness,
                        );
                    }
                    Some(Box::new(Decision::Fail))
                } else {
                    // The default path means none of the covered heads
                    // matched; a missing head stands in for that region
                    let saved = self.shape.clone();
                    let (representative, arity) = &missing[0];
                    set_shape(&mut self.shape, &occ, head_pattern(representative, *arity));
                    let sub_tree = self.build(default_rows);
                    self.shape = saved;
                    Some(Box::new(sub_tree))
                }
            }
        };

        Decision::Switch { occ, arms, default }
    }

    /// Argument types carried by a head's sub-patterns
    fn head_arg_types(&self, head: &Head) -> Vec<Type> {
        match head {
            Head::Int(_) | Head::Real(_) => Vec::new(),
            Head::Ctor(name) => self
                .table
                .constructor(name)
                .map(|(_, ctor)| ctor.args)
                .unwrap_or_default(),
        }
    }

    /// Constructor cases of `ty` not covered by `heads`, or `None` when
    /// coverage is complete. Infinite-universe types (all numerics) are
    /// only complete via a default row, reported as a fresh literal.
    fn missing_heads(&self, ty: &Type, heads: &[Head]) -> Option<Vec<(Head, usize)>> {
        match ty {
            Type::Natural => {
                let mut missing = Vec::new();
                if !heads.contains(&Head::Int(0)) {
                    missing.push((Head::Int(0), 0));
                }
                if !heads.contains(&Head::Ctor("Succ".to_string())) {
                    missing.push((Head::Ctor("Succ".to_string()), 1));
                }
                if missing.is_empty() {
                    None
                } else {
                    Some(missing)
                }
            }
            Type::Named(name) => {
                let ctors = self.table.constructors_of(name)?;
                let missing: Vec<(Head, usize)> = ctors
                    .iter()
                    .filter(|c| !heads.contains(&Head::Ctor(c.name.clone())))
                    .map(|c| (Head::Ctor(c.name.clone()), c.args.len()))
                    .collect();
                if missing.is_empty() {
                    None
                } else {
                    Some(missing)
                }
            }
            // Literal patterns can never exhaust a numeric type
            _ => {
                let covered: Vec<i64> = heads
                    .iter()
                    .filter_map(|h| match h {
                        Head::Int(n) => Some(*n),
                        _ => None,
                    })
                    .collect();
                let fresh = (0..).find(|k| !covered.contains(k)).unwrap_or(0);
                Some(vec![(Head::Int(fresh), 0)])
            }
        }
    }

    fn record_uncovered(&mut self) {
        self.exhaustive = false;
        let witness = self
            .shape
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!(
            "match is not exhaustive: no clause covers input shape ({})",
            witness
        );
        self.report.add_error_with_witness(
            DiagnosticKind::NonExhaustiveMatch,
            &self.function,
            message,
            None,
            witness,
        );
    }
}

fn pattern_head(pattern: &Pattern) -> Option<Head> {
    match pattern {
        Pattern::Wildcard | Pattern::Var(_) => None,
        Pattern::Literal(Literal::Int(n)) => Some(Head::Int(*n)),
        Pattern::Literal(Literal::Real(x)) => Some(Head::Real(*x)),
        Pattern::Ctor { name, .. } => Some(Head::Ctor(name.clone())),
    }
}

fn head_pattern(head: &Head, arity: usize) -> Pattern {
    match head {
        Head::Int(n) => Pattern::Literal(Literal::Int(*n)),
        Head::Real(x) => Pattern::Literal(Literal::Real(*x)),
        Head::Ctor(name) => Pattern::Ctor {
            name: name.clone(),
            args: vec![Pattern::Wildcard; arity],
        },
    }
}

/// Expand positive `Natural` literals into `Succ` chains so that literal
/// and `Succ` patterns over the same column compare structurally
fn normalize(pattern: &Pattern, ty: &Type) -> Pattern {
    match (pattern, ty) {
        (Pattern::Literal(Literal::Int(n)), Type::Natural)
            if *n > 0 && *n <= MAX_NATURAL_LITERAL =>
        {
            let mut expanded = Pattern::Literal(Literal::Int(0));
            for _ in 0..*n {
                expanded = Pattern::Ctor {
                    name: "Succ".to_string(),
                    args: vec![expanded],
                };
            }
            expanded
        }
        (Pattern::Ctor { name, args }, _) if name == "Succ" => Pattern::Ctor {
            name: name.clone(),
            args: args.iter().map(|p| normalize(p, &Type::Natural)).collect(),
        },
        _ => pattern.clone(),
    }
}

/// Rows that participate in the arm for `head`: exact-head rows expand
/// their sub-patterns, irrefutable rows are replicated with wildcards
fn specialize(rows: &[Row], occ: &Occurrence, head: &Head, sub_types: &[Type]) -> Vec<Row> {
    let mut result = Vec::new();
    for row in rows {
        let Some(position) = row.cells.iter().position(|c| &c.occ == occ) else {
            result.push(row.clone());
            continue;
        };
        let cell = &row.cells[position];
        let sub_patterns: Option<Vec<Pattern>> = match &cell.pattern {
            Pattern::Wildcard => Some(vec![Pattern::Wildcard; sub_types.len()]),
            Pattern::Var(_) => Some(vec![Pattern::Wildcard; sub_types.len()]),
            p if pattern_head(p).as_ref() == Some(head) => match p {
                Pattern::Ctor { args, .. } => Some(args.clone()),
                _ => Some(Vec::new()),
            },
            _ => None,
        };
        let Some(sub_patterns) = sub_patterns else {
            continue;
        };

        let mut new_row = row.clone();
        let removed = new_row.cells.remove(position);
        if let Pattern::Var(name) = &removed.pattern {
            new_row.bindings.push((name.clone(), occ.clone()));
        }
        for (index, (sub, ty)) in sub_patterns.iter().zip(sub_types).enumerate() {
            let mut sub_occ = occ.clone();
            sub_occ.push(index);
            new_row.cells.insert(
                position + index,
                Cell {
                    occ: sub_occ,
                    ty: ty.clone(),
                    pattern: sub.clone(),
                },
            );
        }
        result.push(new_row);
    }
    result
}

/// Rows irrefutable at `occ`, with that cell discharged
fn defaults(rows: &[Row], occ: &Occurrence) -> Vec<Row> {
    let mut result = Vec::new();
    for row in rows {
        let Some(position) = row.cells.iter().position(|c| &c.occ == occ) else {
            result.push(row.clone());
            continue;
        };
        if !row.cells[position].pattern.is_irrefutable() {
            continue;
        }
        let mut new_row = row.clone();
        let removed = new_row.cells.remove(position);
        if let Pattern::Var(name) = &removed.pattern {
            new_row.bindings.push((name.clone(), occ.clone()));
        }
        result.push(new_row);
    }
    result
}

fn set_shape(shape: &mut [Pattern], occ: &[usize], pattern: Pattern) {
    let Some((&first, rest)) = occ.split_first() else {
        return;
    };
    let Some(slot) = shape.get_mut(first) else {
        return;
    };
    set_in_pattern(slot, rest, pattern);
}

fn set_in_pattern(slot: &mut Pattern, occ: &[usize], pattern: Pattern) {
    match occ.split_first() {
        None => *slot = pattern,
        Some((&index, rest)) => {
            if let Pattern::Ctor { args, .. } = slot {
                if let Some(sub) = args.get_mut(index) {
                    set_in_pattern(sub, rest, pattern);
                }
            }
        }
    }
}

// ── Decision-tree evaluation ──────────────────────────────

impl Decision {
    /// Walk the tree against concrete argument values, returning the
    /// selected clause and its substitution. Must agree with the
    /// first-match reference semantics in [`crate::eval::select_clause`].
    pub fn select(&self, args: &[Value]) -> Option<(usize, Vec<(String, Value)>)> {
        match self {
            Decision::Fail => None,
            Decision::Leaf { clause, bindings } => {
                let mut substitution = Vec::with_capacity(bindings.len());
                for (name, occ) in bindings {
                    substitution.push((name.clone(), value_at(args, occ)?));
                }
                Some((*clause, substitution))
            }
            Decision::Switch { occ, arms, default } => {
                let value = value_at(args, occ)?;
                for (head, sub_tree) in arms {
                    if head_matches(head, &value) {
                        return sub_tree.select(args);
                    }
                }
                default.as_ref().and_then(|d| d.select(args))
            }
        }
    }
}

fn head_matches(head: &Head, value: &Value) -> bool {
    match head {
        Head::Int(k) => value.as_integer() == Some(*k),
        Head::Real(x) => matches!(value, Value::Real(v) if v == x) || value.as_integer().map(|n| n as f64) == Some(*x),
        Head::Ctor(name) if name == "Succ" => value.as_integer().is_some_and(|n| n > 0),
        Head::Ctor(name) => matches!(value, Value::Ctor { name: vname, .. } if vname == name),
    }
}

/// Extract the sub-value an occurrence points at; `Succ` fields of an
/// integer `n > 0` are `n - 1`
fn value_at(args: &[Value], occ: &[usize]) -> Option<Value> {
    let (&first, rest) = occ.split_first()?;
    let mut current = args.get(first)?.clone();
    for &index in rest {
        current = match current {
            Value::Ctor { args, .. } => args.get(index)?.clone(),
            other => match other.as_integer() {
                Some(n) if n > 0 && index == 0 => Value::Int(n - 1),
                _ => return None,
            },
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Clause, Constructor, Expr, Signature, Span, TypeDef};
    use crate::eval::select_clause;

    fn natural_fn(clauses: Vec<Clause>) -> FunctionDef {
        FunctionDef::new(
            "f",
            Signature::new(vec![Type::Natural], Type::Natural),
            clauses,
        )
    }

    fn compile_fn(def: &FunctionDef, table: &TypeTable) -> (CompiledMatch, Report) {
        let mut report = Report::new();
        let compiled = compile(def, table, &mut report);
        (compiled, report)
    }

    fn list_type() -> TypeDef {
        TypeDef {
            name: "List".to_string(),
            constructors: vec![
                Constructor::new("Nil", vec![]),
                Constructor::new("Cons", vec![Type::Integer, Type::Named("List".to_string())]),
            ],
            span: Span::default(),
        }
    }

    #[test]
    fn test_zero_succ_clauses_are_exhaustive() {
        let def = natural_fn(vec![
            Clause::new(vec![Pattern::int(0)], Expr::int(1)),
            Clause::new(
                vec![Pattern::ctor("Succ", vec![Pattern::var("n")])],
                Expr::var("n"),
            ),
        ]);
        let table = TypeTable::new(&[]);
        let (compiled, report) = compile_fn(&def, &table);
        assert!(compiled.is_exhaustive, "{:?}", report.diagnostics);
        assert!(report.is_valid());
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_missing_succ_reports_witness() {
        let def = natural_fn(vec![Clause::new(vec![Pattern::int(0)], Expr::int(1))]);
        let table = TypeTable::new(&[]);
        let (compiled, report) = compile_fn(&def, &table);
        assert!(!compiled.is_exhaustive);
        let errors = report.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, DiagnosticKind::NonExhaustiveMatch);
        assert_eq!(errors[0].witness.as_deref(), Some("Succ(_)"));
    }

    #[test]
    fn test_wildcard_clears_non_exhaustiveness() {
        let def = natural_fn(vec![
            Clause::new(vec![Pattern::int(0)], Expr::int(1)),
            Clause::new(vec![Pattern::Wildcard], Expr::int(2)),
        ]);
        let table = TypeTable::new(&[]);
        let (compiled, report) = compile_fn(&def, &table);
        assert!(compiled.is_exhaustive);
        assert!(report.is_valid());
    }

    #[test]
    fn test_duplicate_literal_clause_is_unreachable() {
        let def = natural_fn(vec![
            Clause::new(vec![Pattern::int(0)], Expr::int(1)),
            Clause::new(vec![Pattern::int(0)], Expr::int(2)),
            Clause::new(vec![Pattern::var("n")], Expr::var("n")),
        ]);
        let table = TypeTable::new(&[]);
        let (_, report) = compile_fn(&def, &table);
        let warnings = report.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, DiagnosticKind::UnreachableClause);
        assert!(warnings[0].message.contains("clause 2"));
    }

    #[test]
    fn test_clause_after_wildcard_is_unreachable() {
        let def = natural_fn(vec![
            Clause::new(vec![Pattern::var("n")], Expr::var("n")),
            Clause::new(vec![Pattern::int(0)], Expr::int(1)),
        ]);
        let table = TypeTable::new(&[]);
        let (compiled, report) = compile_fn(&def, &table);
        assert!(compiled.is_exhaustive);
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn test_integer_literals_never_exhaust() {
        let def = FunctionDef::new(
            "g",
            Signature::new(vec![Type::Integer], Type::Integer),
            vec![
                Clause::new(vec![Pattern::int(0)], Expr::int(0)),
                Clause::new(vec![Pattern::int(1)], Expr::int(1)),
            ],
        );
        let table = TypeTable::new(&[]);
        let (compiled, report) = compile_fn(&def, &table);
        assert!(!compiled.is_exhaustive);
        // Witness is a literal the clauses do not cover
        assert_eq!(report.errors()[0].witness.as_deref(), Some("2"));
    }

    #[test]
    fn test_adt_missing_constructor_named_in_witness() {
        let def = FunctionDef::new(
            "len",
            Signature::new(vec![Type::Named("List".to_string())], Type::Natural),
            vec![Clause::new(vec![Pattern::ctor("Nil", vec![])], Expr::int(0))],
        );
        let table = TypeTable::new(&[list_type()]);
        let (compiled, report) = compile_fn(&def, &table);
        assert!(!compiled.is_exhaustive);
        assert_eq!(report.errors()[0].witness.as_deref(), Some("Cons(_, _)"));
    }

    #[test]
    fn test_adt_all_constructors_exhaustive() {
        let def = FunctionDef::new(
            "len",
            Signature::new(vec![Type::Named("List".to_string())], Type::Natural),
            vec![
                Clause::new(vec![Pattern::ctor("Nil", vec![])], Expr::int(0)),
                Clause::new(
                    vec![Pattern::ctor("Cons", vec![Pattern::var("x"), Pattern::var("xs")])],
                    Expr::bin(
                        crate::ast::BinOp::Add,
                        Expr::int(1),
                        Expr::apply("len", vec![Expr::var("xs")]),
                    ),
                ),
            ],
        );
        let table = TypeTable::new(&[list_type()]);
        let (compiled, report) = compile_fn(&def, &table);
        assert!(compiled.is_exhaustive, "{:?}", report.diagnostics);
        assert!(report.is_valid());
    }

    #[test]
    fn test_every_natural_reaches_exactly_one_leaf() {
        // Decision tree and linear first-match must agree on every input
        let def = natural_fn(vec![
            Clause::new(vec![Pattern::int(0)], Expr::int(10)),
            Clause::new(vec![Pattern::int(1)], Expr::int(11)),
            Clause::new(
                vec![Pattern::ctor("Succ", vec![Pattern::var("n")])],
                Expr::var("n"),
            ),
        ]);
        let table = TypeTable::new(&[]);
        let (compiled, report) = compile_fn(&def, &table);
        assert!(compiled.is_exhaustive, "{:?}", report.diagnostics);

        for n in 0..=50i64 {
            let args = [Value::Int(n)];
            let by_tree = compiled.decision.select(&args).map(|(c, _)| c);
            let by_scan = select_clause(&def.clauses, &args).map(|(c, _)| c);
            assert_eq!(by_tree, by_scan, "disagreement at input {}", n);
            assert!(by_tree.is_some(), "input {} reached no leaf", n);
        }
    }

    #[test]
    fn test_leaf_bindings_extract_sub_values() {
        let def = natural_fn(vec![
            Clause::new(vec![Pattern::int(0)], Expr::int(1)),
            Clause::new(
                vec![Pattern::ctor("Succ", vec![Pattern::var("p")])],
                Expr::var("p"),
            ),
        ]);
        let table = TypeTable::new(&[]);
        let (compiled, _) = compile_fn(&def, &table);
        let (clause, bindings) = compiled.decision.select(&[Value::Int(4)]).unwrap();
        assert_eq!(clause, 1);
        assert_eq!(bindings, vec![("p".to_string(), Value::Int(3))]);
    }

    #[test]
    fn test_two_argument_matrix() {
        // ack-style shape: split proceeds column by column
        let def = FunctionDef::new(
            "h",
            Signature::new(vec![Type::Natural, Type::Natural], Type::Natural),
            vec![
                Clause::new(vec![Pattern::int(0), Pattern::var("m")], Expr::var("m")),
                Clause::new(
                    vec![
                        Pattern::ctor("Succ", vec![Pattern::var("n")]),
                        Pattern::int(0),
                    ],
                    Expr::var("n"),
                ),
                Clause::new(
                    vec![
                        Pattern::ctor("Succ", vec![Pattern::var("n")]),
                        Pattern::ctor("Succ", vec![Pattern::var("m")]),
                    ],
                    Expr::var("m"),
                ),
            ],
        );
        let table = TypeTable::new(&[]);
        let (compiled, report) = compile_fn(&def, &table);
        assert!(compiled.is_exhaustive, "{:?}", report.diagnostics);

        for n in 0..=6i64 {
            for m in 0..=6i64 {
                let args = [Value::Int(n), Value::Int(m)];
                let by_tree = compiled.decision.select(&args).map(|(c, _)| c);
                let by_scan = select_clause(&def.clauses, &args).map(|(c, _)| c);
                assert_eq!(by_tree, by_scan, "disagreement at ({}, {})", n, m);
            }
        }
    }
}
