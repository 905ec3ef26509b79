//! Partial-pressure blend solver for Nitrox/Trimix cylinder fills.
//!
//! Given a cylinder's current contents, a desired final state, and a set of
//! candidate source gases, this crate computes which gases to add and in
//! what amounts, venting the cylinder first ("bleed-down") when the request
//! is infeasible as stated. Multiple valid gas combinations are ranked by
//! estimated cost and sequenced into a safe fill order.
//!
//! Everything here is a pure synchronous computation over value inputs:
//! no I/O, no shared state, bounded iteration counts throughout.

pub mod alternatives;
pub mod bleed;
pub mod chart;
pub mod cost;
pub mod error;
pub mod fill_order;
pub mod linear;
pub mod plan;
pub mod reverse;
pub mod solve;
pub mod two_source;

pub use alternatives::{BlendAlternative, DEFAULT_MAX_ALTERNATIVES, generate_alternatives};
pub use bleed::{BLEED_SEARCH_ITERATIONS, bleed_down_two_source};
pub use chart::{ChartRow, project_chart};
pub use cost::{CostSettings, estimate_cost};
pub use error::{BlendError, BlendResult};
pub use fill_order::fill_order;
pub use linear::NGasSolution;
pub use plan::{BlendPlan, GasAmount, Step};
pub use reverse::{
    REVERSE_SEARCH_ITERATIONS, solve_max_target_helium, solve_required_start_pressure,
};
pub use solve::{BlendOutcome, Warning, solve_n_gas_blend, solve_two_source_blend};
pub use two_source::{solve_two_source, top_off_blend};
