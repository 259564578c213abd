//! Constraint problem builder and the reference solver.
//!
//! The generator talks to this module exclusively through [`Problem`]:
//! `assert`, `implies`, `at_least` / `at_most` / `exactly`, `quantify` /
//! `quantify_if`, `unique`, `initialize`, and `solve(retries, timeout)`.
//! Any solver honoring that surface can stand in; the one here is a
//! randomized backtracking search with unit propagation over clauses,
//! native cardinality checking, and bias-guided value ordering, plus
//! finite-domain (menu) and real-interval variables valued after the
//! boolean search.

mod problem;
mod search;

pub use problem::{BoolVar, FdSpec, FdVarId, Lit, Problem, RealSpec, RealVarId, Solution};
