//! Should I Sleep? - Sleep-Cycle Calculator
//!
//! This crate computes bed and wake times that line up with 90-minute sleep
//! cycles, and keeps the per-user state around it: mood, preferences and a
//! short calculation history.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
