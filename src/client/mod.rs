//! Engine transport: the `SolverEngine` seam and its HTTP implementation.
//!
//! Everything above this module talks to the engine through the
//! [`SolverEngine`] trait object, so the polling loop and the binary can
//! be exercised against a mock engine in tests.

pub mod error;
pub mod http;

pub use error::{EngineError, EngineResult};
pub use http::HttpEngineClient;

use async_trait::async_trait;

use crate::api::{ConstraintDescriptor, ScoreAnalysis, Timetable};

/// Operations the external optimization service exposes to this client.
#[async_trait]
pub trait SolverEngine: Send + Sync {
    /// GET `/api/timetable/prepare/problem` — the prepared demo problem.
    async fn fetch_demo_problem(&self) -> EngineResult<Timetable>;

    /// GET `/api/timetable/{job_id}` — current schedule for a solve job.
    async fn fetch_schedule(&self, job_id: &str) -> EngineResult<Timetable>;

    /// POST `/api/timetable` — submit a problem; returns the plain-text
    /// job identifier.
    async fn start_solving(&self, problem: &Timetable) -> EngineResult<String>;

    /// DELETE `/api/timetable/{job_id}` — request early termination.
    async fn stop_solving(&self, job_id: &str) -> EngineResult<()>;

    /// PUT `/api/timetable/analyze` — score breakdown for a solution.
    async fn analyze(&self, solution: &Timetable) -> EngineResult<ScoreAnalysis>;

    /// GET `/api/timetable` — ids of all known solve jobs.
    async fn list_jobs(&self) -> EngineResult<Vec<String>>;

    /// GET `/api/constraint` — constraint settings.
    async fn list_constraints(&self) -> EngineResult<Vec<ConstraintDescriptor>>;

    /// PUT `/api/constraint/{id}/toggle` — enable or disable a constraint.
    async fn toggle_constraint(&self, id: i64, enabled: bool) -> EngineResult<()>;

    /// PUT `/api/constraint/{id}/weight` — change a constraint weight.
    async fn update_constraint_weight(&self, id: i64, weight: i64) -> EngineResult<()>;
}
