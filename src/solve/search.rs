//! Randomized backtracking search with unit propagation.
//!
//! Decisions pick the lowest-indexed unassigned variable and sample its
//! value from the bias table, so authored densities and frequencies shape
//! which model comes out. The search is exhaustive: running out of
//! decisions to flip proves unsatisfiability.

use std::time::Instant;

use rand::Rng;
use rand::rngs::StdRng;

use super::problem::{BoolVar, Constraint, Lit, Problem};

pub(crate) enum SearchOutcome {
    Sat(Vec<bool>),
    Unsat,
    Timeout,
    ConflictLimit,
}

struct Frame {
    var: BoolVar,
    value: bool,
    trail_len: usize,
    flipped: bool,
}

struct State<'p> {
    problem: &'p Problem,
    assignment: Vec<Option<bool>>,
    trail: Vec<BoolVar>,
    frames: Vec<Frame>,
}

enum Propagation {
    Quiescent,
    Conflict,
}

impl<'p> State<'p> {
    fn value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.var.index()].map(|v| v == lit.positive)
    }

    fn assign(&mut self, var: BoolVar, value: bool) {
        self.assignment[var.index()] = Some(value);
        self.trail.push(var);
    }

    fn undo_to(&mut self, trail_len: usize) {
        while self.trail.len() > trail_len {
            let var = self.trail.pop().unwrap();
            self.assignment[var.index()] = None;
        }
    }

    /// Run every constraint to fixpoint, forcing unit consequences.
    fn propagate(&mut self) -> Propagation {
        loop {
            let mut forced: Vec<(BoolVar, bool)> = Vec::new();
            for c in &self.problem.constraints {
                match c {
                    Constraint::Clause(lits) => {
                        let mut unassigned: Option<Lit> = None;
                        let mut open = 0usize;
                        let mut satisfied = false;
                        for &lit in lits {
                            match self.value(lit) {
                                Some(true) => {
                                    satisfied = true;
                                    break;
                                }
                                Some(false) => {}
                                None => {
                                    open += 1;
                                    unassigned = Some(lit);
                                }
                            }
                        }
                        if satisfied {
                            continue;
                        }
                        match open {
                            0 => return Propagation::Conflict,
                            1 => {
                                let lit = unassigned.unwrap();
                                forced.push((lit.var, lit.positive));
                            }
                            _ => {}
                        }
                    }
                    Constraint::Card {
                        guards,
                        lits,
                        min,
                        max,
                    } => {
                        // Inapplicable until every guard is decided true.
                        match guards.iter().try_fold(true, |all, &g| {
                            self.value(g).map(|v| all && v)
                        }) {
                            Some(true) => {}
                            _ => continue,
                        }
                        let mut true_count = 0usize;
                        let mut open: Vec<Lit> = Vec::new();
                        for &lit in lits {
                            match self.value(lit) {
                                Some(true) => true_count += 1,
                                Some(false) => {}
                                None => open.push(lit),
                            }
                        }
                        if true_count > *max || true_count + open.len() < *min {
                            return Propagation::Conflict;
                        }
                        if !open.is_empty() {
                            if true_count == *max {
                                for lit in &open {
                                    forced.push((lit.var, !lit.positive));
                                }
                            } else if true_count + open.len() == *min {
                                for lit in &open {
                                    forced.push((lit.var, lit.positive));
                                }
                            }
                        }
                    }
                }
            }
            if forced.is_empty() {
                return Propagation::Quiescent;
            }
            for (var, value) in forced {
                match self.assignment[var.index()] {
                    None => self.assign(var, value),
                    Some(v) if v != value => return Propagation::Conflict,
                    Some(_) => {}
                }
            }
        }
    }

    fn next_unassigned(&self) -> Option<BoolVar> {
        self.assignment
            .iter()
            .position(Option::is_none)
            .map(|i| BoolVar(i as u32))
    }

    /// Backtrack to the most recent unflipped decision. False when the
    /// whole tree is exhausted.
    fn backtrack(&mut self) -> bool {
        while let Some(frame) = self.frames.pop() {
            if frame.flipped {
                continue;
            }
            self.undo_to(frame.trail_len);
            self.assign(frame.var, !frame.value);
            self.frames.push(Frame {
                var: frame.var,
                value: !frame.value,
                trail_len: frame.trail_len,
                flipped: true,
            });
            return true;
        }
        false
    }
}

pub(crate) fn run_search(
    problem: &Problem,
    rng: &mut StdRng,
    conflict_limit: usize,
    deadline: Instant,
) -> SearchOutcome {
    let mut state = State {
        problem,
        assignment: vec![None; problem.num_vars()],
        trail: Vec::new(),
        frames: Vec::new(),
    };
    let mut conflicts = 0usize;
    let mut steps = 0usize;

    loop {
        steps += 1;
        if steps % 256 == 0 && Instant::now() >= deadline {
            return SearchOutcome::Timeout;
        }
        match state.propagate() {
            Propagation::Conflict => {
                conflicts += 1;
                if conflicts > conflict_limit {
                    return SearchOutcome::ConflictLimit;
                }
                if !state.backtrack() {
                    return SearchOutcome::Unsat;
                }
            }
            Propagation::Quiescent => match state.next_unassigned() {
                None => {
                    let values = state
                        .assignment
                        .iter()
                        .map(|v| v.unwrap())
                        .collect();
                    return SearchOutcome::Sat(values);
                }
                Some(var) => {
                    let bias = problem.biases[var.index()];
                    let value = rng.r#gen::<f32>() < bias;
                    let trail_len = state.trail.len();
                    state.assign(var, value);
                    state.frames.push(Frame {
                        var,
                        value,
                        trail_len,
                        flipped: false,
                    });
                }
            },
        }
    }
}
