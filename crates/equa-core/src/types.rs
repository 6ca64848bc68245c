//! Type table — subtype DAG and constructor resolution
//!
//! Refinement subtyping is a closed tagged-variant hierarchy: the DAG over
//! the builtin numeric types (`Even ≤ Integer`, `Odd ≤ Integer`,
//! `Natural ≤ Integer ≤ Real`) is computed once when the table is built
//! and answered from the closure afterwards, never re-traversed. User
//! algebraic types participate only reflexively; function types relate by
//! equality.

use std::collections::BTreeMap;

use crate::ast::{Constructor, Type, TypeDef};

/// Scalar types participating in the subtype DAG, in rank order
const SCALARS: [Type; 6] = [
    Type::Even,
    Type::Odd,
    Type::Natural,
    Type::Integer,
    Type::Real,
    Type::Boolean,
];

/// Direct subtype edges; the closure is computed in [`TypeTable::new`]
const EDGES: [(Type, Type); 4] = [
    (Type::Even, Type::Integer),
    (Type::Odd, Type::Integer),
    (Type::Natural, Type::Integer),
    (Type::Integer, Type::Real),
];

/// Precomputed subtype relation plus the user type-definition table
#[derive(Debug, Clone)]
pub struct TypeTable {
    /// `closure[a][b]` ⇔ scalar `a` is a (non-strict) subtype of scalar `b`
    closure: [[bool; SCALARS.len()]; SCALARS.len()],
    defs: BTreeMap<String, TypeDef>,
    /// Constructor name → owning type name (constructor names are unique
    /// across the program, enforced by `Program::validate`)
    ctor_owner: BTreeMap<String, String>,
}

impl TypeTable {
    /// Build the table: transitive closure of the numeric DAG plus an
    /// index of user-declared constructors.
    pub fn new(type_defs: &[TypeDef]) -> Self {
        let n = SCALARS.len();
        let mut closure = [[false; SCALARS.len()]; SCALARS.len()];
        for (i, row) in closure.iter_mut().enumerate() {
            row[i] = true;
        }
        for (sub, sup) in &EDGES {
            if let (Some(i), Some(j)) = (scalar_index(sub), scalar_index(sup)) {
                closure[i][j] = true;
            }
        }
        // Warshall closure over a 6-element carrier
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if closure[i][k] && closure[k][j] {
                        closure[i][j] = true;
                    }
                }
            }
        }

        let mut defs = BTreeMap::new();
        let mut ctor_owner = BTreeMap::new();
        for def in type_defs {
            for ctor in &def.constructors {
                ctor_owner.insert(ctor.name.clone(), def.name.clone());
            }
            defs.insert(def.name.clone(), def.clone());
        }

        TypeTable { closure, defs, ctor_owner }
    }

    // ── Subtyping ─────────────────────────────────────────

    /// Non-strict subtype check: `sub` is usable wherever `sup` is expected
    pub fn is_subtype(&self, sub: &Type, sup: &Type) -> bool {
        match (scalar_index(sub), scalar_index(sup)) {
            (Some(i), Some(j)) => self.closure[i][j],
            _ => sub == sup,
        }
    }

    /// Least common numeric supertype of two types, or `None` if either is
    /// not numeric. Refinement tags are never produced: the join of `Even`
    /// with itself is `Even` only by reflexivity; callers that must not
    /// yield refinements strip bases first.
    pub fn join_numeric(&self, a: &Type, b: &Type) -> Option<Type> {
        if !a.is_numeric() || !b.is_numeric() {
            return None;
        }
        let i = scalar_index(a)?;
        let j = scalar_index(b)?;
        // SCALARS is rank-ordered, so the first common supertype is least
        SCALARS
            .iter()
            .enumerate()
            .find(|(k, _)| self.closure[i][*k] && self.closure[j][*k])
            .map(|(_, t)| t.clone())
    }

    // ── Constructors ──────────────────────────────────────

    /// Resolve a constructor name to its owning type and signature.
    /// The builtin `Succ` belongs to `Natural`.
    pub fn constructor(&self, name: &str) -> Option<(Type, Constructor)> {
        if name == "Succ" {
            return Some((Type::Natural, Constructor::new("Succ", vec![Type::Natural])));
        }
        let owner = self.ctor_owner.get(name)?;
        let def = self.defs.get(owner)?;
        let ctor = def.constructors.iter().find(|c| c.name == name)?;
        Some((Type::Named(owner.clone()), ctor.clone()))
    }

    /// All constructors of a user algebraic type
    pub fn constructors_of(&self, name: &str) -> Option<&[Constructor]> {
        self.defs.get(name).map(|d| d.constructors.as_slice())
    }

    /// Whether a `Named` type was declared
    pub fn is_declared(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }
}

fn scalar_index(ty: &Type) -> Option<usize> {
    SCALARS.iter().position(|t| t == ty)
}
