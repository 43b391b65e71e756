//! Backend bridge: command definitions and the worker runtime that executes them.

pub mod commands;
pub mod runtime;
