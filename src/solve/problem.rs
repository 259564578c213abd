//! The constraint problem: boolean variables with biases, clauses,
//! cardinality constraints, and post-solve-valued domain variables.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::search::{SearchOutcome, run_search};

/// A boolean solver variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(pub u32);

impl BoolVar {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A finite-domain (menu of strings) variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FdVarId(pub u32);

impl FdVarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A real-interval variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RealVarId(pub u32);

impl RealVarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A signed boolean variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit {
    pub var: BoolVar,
    pub positive: bool,
}

impl Lit {
    pub fn pos(var: BoolVar) -> Self {
        Lit {
            var,
            positive: true,
        }
    }

    pub fn neg(var: BoolVar) -> Self {
        Lit {
            var,
            positive: false,
        }
    }

    pub fn negated(self) -> Self {
        Lit {
            var: self.var,
            positive: !self.positive,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Constraint {
    /// At least one literal true.
    Clause(Vec<Lit>),
    /// When every guard is true, between `min` and `max` of `lits` are true.
    Card {
        guards: Vec<Lit>,
        lits: Vec<Lit>,
        min: usize,
        max: usize,
    },
}

/// A menu variable: valued after the boolean solve by intersecting the
/// base menu with every rule whose conditions hold.
#[derive(Debug, Clone)]
pub struct FdSpec {
    /// The variable only receives a value when every guard is true.
    pub guards: Vec<Lit>,
    pub base_menu: Vec<String>,
    pub rules: Vec<(Vec<Lit>, Vec<String>)>,
}

/// An interval variable: valued uniformly from the intersection of the
/// base interval with every applicable tightening.
#[derive(Debug, Clone)]
pub struct RealSpec {
    pub guards: Vec<Lit>,
    pub low: f64,
    pub high: f64,
    pub rules: Vec<(Vec<Lit>, f64, f64)>,
}

/// A constraint problem under construction.
#[derive(Debug, Default)]
pub struct Problem {
    pub(crate) biases: Vec<f32>,
    pub(crate) constraints: Vec<Constraint>,
    fd_vars: Vec<FdSpec>,
    real_vars: Vec<RealSpec>,
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_var(&mut self) -> BoolVar {
        let var = BoolVar(self.biases.len() as u32);
        self.biases.push(0.5);
        var
    }

    pub fn num_vars(&self) -> usize {
        self.biases.len()
    }

    /// Set a variable's initial probability of being sampled true.
    pub fn initialize(&mut self, var: BoolVar, probability: f32) {
        self.biases[var.index()] = probability.clamp(0.0, 1.0);
    }

    pub fn assert_lit(&mut self, lit: Lit) {
        self.constraints.push(Constraint::Clause(vec![lit]));
    }

    pub fn or(&mut self, lits: Vec<Lit>) {
        self.constraints.push(Constraint::Clause(lits));
    }

    /// `antecedents → consequent`, as one clause.
    pub fn implies(&mut self, antecedents: &[Lit], consequent: Lit) {
        let mut clause: Vec<Lit> = antecedents.iter().map(|l| l.negated()).collect();
        clause.push(consequent);
        self.constraints.push(Constraint::Clause(clause));
    }

    pub fn at_least(&mut self, min: usize, lits: Vec<Lit>) {
        let max = lits.len();
        self.quantify(min, max, lits);
    }

    pub fn at_most(&mut self, max: usize, lits: Vec<Lit>) {
        self.quantify(0, max, lits);
    }

    pub fn exactly(&mut self, n: usize, lits: Vec<Lit>) {
        self.quantify(n, n, lits);
    }

    /// Exactly one of `lits`.
    pub fn unique(&mut self, lits: Vec<Lit>) {
        self.exactly(1, lits);
    }

    pub fn quantify(&mut self, min: usize, max: usize, lits: Vec<Lit>) {
        self.quantify_if(Vec::new(), min, max, lits);
    }

    /// Bounded cardinality, applicable only when every guard is true.
    pub fn quantify_if(&mut self, guards: Vec<Lit>, min: usize, max: usize, lits: Vec<Lit>) {
        let max = max.min(lits.len());
        self.constraints.push(Constraint::Card {
            guards,
            lits,
            min,
            max,
        });
    }

    pub fn unique_if(&mut self, guards: Vec<Lit>, lits: Vec<Lit>) {
        self.quantify_if(guards, 1, 1, lits);
    }

    pub fn add_fd_var(&mut self, spec: FdSpec) -> FdVarId {
        let id = FdVarId(self.fd_vars.len() as u32);
        self.fd_vars.push(spec);
        id
    }

    pub fn add_real_var(&mut self, spec: RealSpec) -> RealVarId {
        let id = RealVarId(self.real_vars.len() as u32);
        self.real_vars.push(spec);
        id
    }

    /// Search for a model. Contradictions and timeouts surface as `None`
    /// after the retry loop, never as an error.
    pub fn solve(&self, retries: usize, timeout: Duration, seed: Option<u64>) -> Option<Solution> {
        let deadline = Instant::now() + timeout;
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let conflict_limit = 10_000 + 50 * self.num_vars();
        for _ in 0..retries.max(1) {
            match run_search(self, &mut rng, conflict_limit, deadline) {
                SearchOutcome::Sat(values) => {
                    return Some(self.value_domains(values, &mut rng));
                }
                // The search is exhaustive, so unsat is definitive.
                SearchOutcome::Unsat => return None,
                SearchOutcome::Timeout => return None,
                SearchOutcome::ConflictLimit => continue,
            }
        }
        None
    }

    fn value_domains(&self, values: Vec<bool>, rng: &mut StdRng) -> Solution {
        let truth = |lit: &Lit| values[lit.var.index()] == lit.positive;

        let fd_values = self
            .fd_vars
            .iter()
            .map(|spec| {
                if !spec.guards.iter().all(&truth) {
                    return None;
                }
                let mut menu = spec.base_menu.clone();
                for (conditions, rule_menu) in &spec.rules {
                    if conditions.iter().all(&truth) {
                        let narrowed: Vec<String> = menu
                            .iter()
                            .filter(|v| rule_menu.contains(v))
                            .cloned()
                            .collect();
                        menu = if narrowed.is_empty() {
                            rule_menu.clone()
                        } else {
                            narrowed
                        };
                    }
                }
                if menu.is_empty() {
                    None
                } else {
                    Some(menu[rng.gen_range(0..menu.len())].clone())
                }
            })
            .collect();

        let real_values = self
            .real_vars
            .iter()
            .map(|spec| {
                if !spec.guards.iter().all(&truth) {
                    return None;
                }
                let (mut low, mut high) = (spec.low, spec.high);
                for (conditions, rule_low, rule_high) in &spec.rules {
                    if conditions.iter().all(&truth) {
                        low = low.max(*rule_low);
                        high = high.min(*rule_high);
                    }
                }
                if low > high {
                    (low, high) = (high, low);
                }
                Some(low + rng.r#gen::<f64>() * (high - low))
            })
            .collect();

        Solution {
            values,
            fd_values,
            real_values,
        }
    }
}

/// A model: a truth value for every boolean variable plus a value for
/// every applicable domain variable.
#[derive(Debug, Clone)]
pub struct Solution {
    values: Vec<bool>,
    fd_values: Vec<Option<String>>,
    real_values: Vec<Option<f64>>,
}

impl Solution {
    pub fn truth(&self, var: BoolVar) -> bool {
        self.values[var.index()]
    }

    pub fn lit_true(&self, lit: Lit) -> bool {
        self.truth(lit.var) == lit.positive
    }

    pub fn fd_value(&self, id: FdVarId) -> Option<&str> {
        self.fd_values[id.index()].as_deref()
    }

    pub fn real_value(&self, id: RealVarId) -> Option<f64> {
        self.real_values[id.index()]
    }
}
