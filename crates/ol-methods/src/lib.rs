//! # ol-methods
//!
//! Numerical methods for option pricing: recombining binomial and
//! trinomial lattices and backward induction with optional early exercise.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod lattice;

pub use lattice::{
    price_american, price_european, roll_back, BinomialTree, Lattice, StockLattice,
    TrinomialTree, ValueLattice,
};
