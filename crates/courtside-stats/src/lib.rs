//! Statistical utilities for the Courtside project.
//!
//! - [`descriptive`]: mean, sample variance and sample standard deviation used to
//!   build league baselines for athlete scoring
//!
//! # Examples
//!
//! ```
//! use courtside_stats::descriptive::DescriptiveStats;
//!
//! let values = [10.0, 12.0, 14.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 12.0);
//! assert_eq!(stats.std_dev, 2.0);
//! ```

pub mod descriptive;
