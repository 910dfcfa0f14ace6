//! Core types shared across armdiff facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! logging facility and by anything that asserts on emitted events.

pub mod schema;
