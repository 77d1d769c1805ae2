//! Member Register - Membership Register Backend
//!
//! This crate implements the register's admin analytics export: a per-member
//! statistics report gated behind an external administrative authority and
//! delivered as a delimited text document.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
