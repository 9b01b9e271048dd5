use serde::{Deserialize, Serialize};

use super::errors::{Result, SessionError};
use crate::catalog::{ItemKind, MaterialType};
use crate::core::constants::{
    DEFAULT_ARMOR_RECIPE_POT, DEFAULT_PROFICIENCY, DEFAULT_STARTING_POT, DEFAULT_TECHNIQUE,
    DEFAULT_WEAPON_RECIPE_POT,
};
use crate::formula::FormulaStep;

/// Settings a session is started with. Also the settings half of a
/// [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub item_kind: ItemKind,
    pub starting_potential: i32,
    pub recipe_potential: i32,
    pub technique: u32,
    pub proficiency: u32,
    #[serde(default)]
    pub material_reduction: bool,
}

impl SessionConfig {
    pub fn for_item(item_kind: ItemKind) -> Self {
        let recipe_potential = match item_kind {
            ItemKind::Weapon => DEFAULT_WEAPON_RECIPE_POT,
            ItemKind::Armor => DEFAULT_ARMOR_RECIPE_POT,
        };
        Self {
            item_kind,
            starting_potential: DEFAULT_STARTING_POT,
            recipe_potential,
            technique: DEFAULT_TECHNIQUE,
            proficiency: DEFAULT_PROFICIENCY,
            material_reduction: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_potential < 1 {
            return Err(SessionError::InvalidConfiguration(format!(
                "starting potential must be at least 1, got {}",
                self.starting_potential
            )));
        }
        if self.recipe_potential < 1 {
            return Err(SessionError::InvalidConfiguration(format!(
                "recipe potential must be at least 1, got {}",
                self.recipe_potential
            )));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::for_item(ItemKind::Weapon)
    }
}

/// Lifecycle of a started session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Slots are editable
    Active,
    /// Finished; holds the frozen success rate
    Terminal(i32),
}

/// Everything needed to rebuild a session with `Session::auto_load`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub formula_steps: Vec<FormulaStep>,
    pub settings: SessionConfig,
}

/// Read-only view of one slot for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub index: usize,
    pub option_id: usize,
    pub option_name: Option<String>,
    pub material: Option<MaterialType>,
    pub committed_value: f64,
    pub pending_value: f64,
    pub committed_steps: i32,
    pub pending_steps: i32,
    /// Material cost of the pending edit, after cost reduction
    pub pending_cost: f64,
    pub is_valid: bool,
    pub max_stat: f64,
    pub max_steps: i32,
    /// The option can no longer be swapped or cleared
    pub option_locked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_depend_on_item_kind() {
        let weapon = SessionConfig::for_item(ItemKind::Weapon);
        let armor = SessionConfig::for_item(ItemKind::Armor);
        assert_eq!(weapon.recipe_potential, 46);
        assert_eq!(armor.recipe_potential, 44);
        assert_eq!(weapon.starting_potential, 99);
        assert_eq!(weapon.technique, 255);
        assert_eq!(SessionConfig::default(), weapon);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let mut config = SessionConfig::default();
        assert!(config.validate().is_ok());

        config.starting_potential = 0;
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidConfiguration(_))
        ));

        config.starting_potential = 1;
        config.recipe_potential = -3;
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_config_json_shape() {
        let config = SessionConfig::for_item(ItemKind::Armor);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"item_kind\":\"Armor\""));
        let parsed: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
