//! Batch front end for the binary: command scripts in, reports out.

pub mod command;
pub mod csv;
pub mod report;
pub mod runner;
