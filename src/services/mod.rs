//! Service layer: pure view transforms plus the polling loop.
//!
//! Everything here except [`poller`] is input-in/output-out: the grid
//! builder, the constraint ranking, the identifier codec and the color
//! palette all return plain data structures. The poller is the only
//! component that owns a timer.

pub mod analysis;
pub mod color;
pub mod grid;
pub mod ident;
pub mod poller;

pub use analysis::{rank_constraints, RankedConstraint};
pub use grid::{build_schedule_view, LessonCard, LessonGrid, ScheduleView};
pub use poller::SchedulePoller;
