//! Incremental gain calculators.
//!
//! `init` recomputes every gain from the assignment, dispatching on net
//! degree (two-pin and three-pin nets have dedicated paths). The
//! `update_move_*` functions return the gain deltas that a single move causes
//! on the other pins of one net; applied to the previous gains they reproduce
//! what `init` computes after the move. They must be called before the
//! assignment is updated.

mod bi;
mod kway;

pub use bi::BiGainCalc;
pub use kway::KWayGainCalc;
