//! Cost estimation for gas additions.

use gb_core::numeric::Real;
use gb_mix::GasComposition;

/// Pricing and tank geometry, supplied by the caller per solve.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSettings {
    /// Price per cubic foot of oxygen.
    pub price_per_cuft_o2: Real,
    /// Price per cubic foot of helium. Non-positive means unconfigured and
    /// switches pricing to the rank heuristic.
    pub price_per_cuft_he: Real,
    /// Tank internal volume at rated pressure, cubic feet.
    pub tank_volume_cuft: Real,
    /// Rated pressure the volume is quoted at, PSI.
    pub tank_rated_pressure: Real,
}

impl Default for CostSettings {
    fn default() -> Self {
        // AL80: 80 cuft at 3000 PSI, no pricing configured.
        Self {
            price_per_cuft_o2: 0.0,
            price_per_cuft_he: 0.0,
            tank_volume_cuft: 80.0,
            tank_rated_pressure: 3000.0,
        }
    }
}

/// Heuristic per-cuft rate used when helium pricing is unconfigured. Only
/// the ordering matters: air cheapest, oxygen-rich dearer, helium dearest.
const HEURISTIC_BASE_RATE: Real = 0.05;
const HEURISTIC_O2_WEIGHT: Real = 4.0;
const HEURISTIC_HE_WEIGHT: Real = 40.0;

/// Estimate the cost of adding `amount` PSI of `gas`.
///
/// Volume scales the pressure amount through the configured tank geometry;
/// the rate is either the configured per-component pricing or, when helium
/// pricing is absent, a rank-based heuristic that keeps alternative
/// ordering sensible without real prices.
pub fn estimate_cost(gas: &GasComposition, amount: Real, settings: &CostSettings) -> Real {
    if settings.tank_rated_pressure <= 0.0 || settings.tank_volume_cuft <= 0.0 {
        return 0.0;
    }
    let volume = amount.max(0.0) / settings.tank_rated_pressure * settings.tank_volume_cuft;
    let rate = if settings.price_per_cuft_he > 0.0 {
        gas.o2_fraction() * settings.price_per_cuft_o2
            + gas.he_fraction() * settings.price_per_cuft_he
    } else {
        HEURISTIC_BASE_RATE
            * (1.0 + HEURISTIC_O2_WEIGHT * gas.o2_fraction() + HEURISTIC_HE_WEIGHT * gas.he_fraction())
    };
    volume * rate
}
