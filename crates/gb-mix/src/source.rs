//! Gas sources: named compositions and boundary-side selectors.

use crate::composition::GasComposition;
use crate::error::{MixError, MixResult};

/// Fixed preset gases every fill station has on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Air,
    Oxygen,
    Helium,
}

/// A user-defined bank gas (storage cylinder with a known mix).
#[derive(Debug, Clone, PartialEq)]
pub struct BankGas {
    pub id: String,
    pub name: String,
    pub composition: GasComposition,
}

/// How a caller names a gas. Resolved exactly once, at the boundary, into a
/// plain `GasSource`; solvers never see this type.
#[derive(Debug, Clone, PartialEq)]
pub enum GasSelector {
    Preset(Preset),
    Bank(String),
    Custom {
        name: Option<String>,
        composition: GasComposition,
    },
}

impl GasSelector {
    /// Resolve the selector against the configured bank list.
    pub fn resolve(&self, banks: &[BankGas]) -> MixResult<GasSource> {
        match self {
            GasSelector::Preset(Preset::Air) => Ok(GasSource::air()),
            GasSelector::Preset(Preset::Oxygen) => Ok(GasSource::oxygen()),
            GasSelector::Preset(Preset::Helium) => Ok(GasSource::helium()),
            GasSelector::Bank(id) => banks
                .iter()
                .find(|b| b.id == *id)
                .map(|b| GasSource::new(b.name.clone(), b.composition))
                .ok_or_else(|| MixError::UnknownBank { id: id.clone() }),
            GasSelector::Custom { name, composition } => {
                let name = name
                    .clone()
                    .unwrap_or_else(|| composition.to_string());
                Ok(GasSource::new(name, *composition))
            }
        }
    }
}

/// A named gas composition, ready for the solvers.
#[derive(Debug, Clone, PartialEq)]
pub struct GasSource {
    pub name: String,
    pub composition: GasComposition,
}

impl GasSource {
    pub fn new(name: impl Into<String>, composition: GasComposition) -> Self {
        Self {
            name: name.into(),
            composition,
        }
    }

    pub fn air() -> Self {
        Self::new("Air", GasComposition::air())
    }

    pub fn oxygen() -> Self {
        Self::new("Oxygen", GasComposition::oxygen())
    }

    pub fn helium() -> Self {
        Self::new("Helium", GasComposition::helium())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banks() -> Vec<BankGas> {
        vec![BankGas {
            id: "bank-1".to_string(),
            name: "Trimix Bank".to_string(),
            composition: GasComposition::new(21.0, 35.0).unwrap(),
        }]
    }

    #[test]
    fn preset_resolution() {
        let air = GasSelector::Preset(Preset::Air).resolve(&[]).unwrap();
        assert_eq!(air.name, "Air");
        assert_eq!(air.composition.o2_percent(), 21.0);

        let he = GasSelector::Preset(Preset::Helium).resolve(&[]).unwrap();
        assert!(he.composition.is_pure_helium());
    }

    #[test]
    fn bank_resolution() {
        let src = GasSelector::Bank("bank-1".to_string())
            .resolve(&banks())
            .unwrap();
        assert_eq!(src.name, "Trimix Bank");
        assert_eq!(src.composition.he_percent(), 35.0);
    }

    #[test]
    fn unknown_bank_fails() {
        let err = GasSelector::Bank("nope".to_string())
            .resolve(&banks())
            .unwrap_err();
        assert!(matches!(err, MixError::UnknownBank { .. }));
    }

    #[test]
    fn custom_gets_generated_name() {
        let sel = GasSelector::Custom {
            name: None,
            composition: GasComposition::new(18.0, 45.0).unwrap(),
        };
        let src = sel.resolve(&[]).unwrap();
        assert_eq!(src.name, "18.0/45.0");
    }
}
