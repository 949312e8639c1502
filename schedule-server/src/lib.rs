//! Bus schedule server.
//!
//! A JSON API for managing bus lines, their route segments and timetables,
//! which answers: "if I take this segment, which bus do I change to next,
//! and how long do I wait?"

pub mod config;
pub mod connections;
pub mod domain;
pub mod shutdown;
pub mod store;
pub mod web;
