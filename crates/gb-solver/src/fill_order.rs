//! Safe fill ordering for a set of gas additions.

use crate::plan::GasAmount;
use gb_core::numeric::STEP_EPSILON;

/// Order additions for filling: pure helium first, then pure oxygen, then
/// remaining gases by descending helium and descending oxygen content.
/// Zero-amount entries are dropped. The hazardous and expensive components
/// go in before diluent so a partial fill fails safe.
pub fn fill_order(additions: &[GasAmount]) -> Vec<GasAmount> {
    let mut ordered: Vec<GasAmount> = additions
        .iter()
        .filter(|ga| ga.amount > STEP_EPSILON)
        .cloned()
        .collect();

    ordered.sort_by(|a, b| {
        let rank = |ga: &GasAmount| -> u8 {
            if ga.source.composition.is_pure_helium() {
                0
            } else if ga.source.composition.is_pure_oxygen() {
                1
            } else {
                2
            }
        };
        rank(a).cmp(&rank(b)).then_with(|| {
            b.source
                .composition
                .he_percent()
                .partial_cmp(&a.source.composition.he_percent())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.source
                        .composition
                        .o2_percent()
                        .partial_cmp(&a.source.composition.o2_percent())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        })
    });
    ordered
}
