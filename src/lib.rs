//! archscope - normalized module dependency graphs
//!
//! This crate builds one in-memory graph of a system's modules ("projects")
//! from Gradle report output and database schema rows, annotated with size
//! metrics and per-node/per-edge config values.

pub mod config;
pub mod database;
pub mod export;
pub mod graph;
pub mod parser;
pub mod storage;
