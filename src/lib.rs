//! # Timetable Board Client
//!
//! Client library for an external school timetabling optimization service.
//!
//! This crate never computes a schedule itself. It fetches timetable
//! problems and solutions over REST, transforms them into stable,
//! addressable view structures (cross-tab grids by teacher and by student
//! group, ranked constraint-score breakdowns), and drives the solve /
//! stop / poll lifecycle against the engine.
//!
//! ## Features
//!
//! - **Wire DTOs**: Serde models for the engine's camelCase JSON
//! - **Score Parsing**: composite `hard/medium/soft` score strings
//! - **Constraint Analysis**: severity classification and display ordering
//! - **Grid Building**: cross-tab schedule grids with collision-free cell keys
//! - **Polling**: solving state machine with a fixed-interval refresh loop
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: wire DTOs shared with the engine
//! - [`models`]: parsed value types (score components)
//! - [`services`]: pure transforms plus the schedule poller
//! - [`client`]: the `SolverEngine` trait and its reqwest implementation
//! - [`view`]: thin text adapter over the structured view data

pub mod api;
pub mod config;
pub mod models;

pub mod client;
pub mod services;

pub mod view;
