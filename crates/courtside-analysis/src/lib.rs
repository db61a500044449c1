//! Athlete performance analysis.
//!
//! Turns raw box-score records into per-stat attention scores: how far an
//! athlete's recent averages sit from the league baseline, multiplied by the
//! negated stat impact. Negative scores are attention areas.
//!
//! # Workflow
//!
//! 1. **Window** ([`attention::recent_game_window`]): pick the last N game ids
//! 2. **Baseline** ([`attention::LeagueBaseline`]): mean and sample standard
//!    deviation of every stat over all athletes in the window
//! 3. **Score** ([`attention::analyze_player_performance`]): standardize the
//!    athlete's averages and split them into attention and excellence areas
//! 4. **Recommend**: feed [`attention::PerformanceAnalysis::attention_map`] to the
//!    forest predictor in `courtside-recommender`
//!
//! # Example
//!
//! ```
//! use courtside_analysis::attention::{CHART_GAMES_LIMIT, analyze_player_performance};
//! use courtside_core::GameRecord;
//!
//! let records = vec![
//!     GameRecord { player_id: 1, game_id: 1, turnovers: 8, ..GameRecord::default() },
//!     GameRecord { player_id: 2, game_id: 1, turnovers: 1, ..GameRecord::default() },
//!     GameRecord { player_id: 3, game_id: 1, turnovers: 2, ..GameRecord::default() },
//! ];
//! // fewest turnovers: z < 0 and -impact = +1, so the score is negative
//! let analysis = analyze_player_performance(2, &records, CHART_GAMES_LIMIT);
//! assert_eq!(analysis.attention_areas[0].label, "Turnovers");
//! assert!(analysis.attention_map().get_or_zero(courtside_core::StatKey::Turnovers) > 0.0);
//! ```

pub mod attention;
