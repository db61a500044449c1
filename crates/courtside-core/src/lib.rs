//! Domain types for the Courtside drill-recommendation engine.
//!
//! - [`StatKey`] / [`StatImpact`] / [`StatMap`] - the ten tracked statistics and
//!   whether higher is better
//! - [`GameRecord`] / [`DerivedStats`] - box-score lines and the percentages and
//!   totals derived from them
//! - [`Drill`], [`PracticeCategory`], [`Athlete`] - reference data, read through
//!   the provider traits in [`catalog`]
//! - [`TrainingSample`] - labeled attention profiles used to train the forest

pub use self::{catalog::*, record::*, sample::*, stat::*};

pub mod catalog;
pub mod record;
pub mod sample;
pub mod stat;
