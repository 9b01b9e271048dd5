//! Step history records.

use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, SubAssign};

use crate::catalog::MaterialType;

/// Per-material amounts, in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Materials {
    pub metal: i64,
    pub cloth: i64,
    pub beast: i64,
    pub wood: i64,
    pub medicine: i64,
    pub mana: i64,
}

impl Materials {
    pub fn get(&self, material: MaterialType) -> i64 {
        match material {
            MaterialType::Metal => self.metal,
            MaterialType::Cloth => self.cloth,
            MaterialType::Beast => self.beast,
            MaterialType::Wood => self.wood,
            MaterialType::Medicine => self.medicine,
            MaterialType::Mana => self.mana,
        }
    }

    pub fn get_mut(&mut self, material: MaterialType) -> &mut i64 {
        match material {
            MaterialType::Metal => &mut self.metal,
            MaterialType::Cloth => &mut self.cloth,
            MaterialType::Beast => &mut self.beast,
            MaterialType::Wood => &mut self.wood,
            MaterialType::Medicine => &mut self.medicine,
            MaterialType::Mana => &mut self.mana,
        }
    }

    /// Largest single-material amount.
    pub fn max_amount(&self) -> i64 {
        MaterialType::ALL
            .iter()
            .map(|m| self.get(*m))
            .max()
            .unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        MaterialType::ALL.iter().map(|m| self.get(*m)).sum()
    }

    pub fn is_empty(&self) -> bool {
        MaterialType::ALL.iter().all(|m| self.get(*m) == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialType, i64)> + '_ {
        MaterialType::ALL.iter().map(move |m| (*m, self.get(*m)))
    }
}

impl AddAssign for Materials {
    fn add_assign(&mut self, rhs: Materials) {
        for material in MaterialType::ALL {
            *self.get_mut(material) += rhs.get(material);
        }
    }
}

impl SubAssign for Materials {
    fn sub_assign(&mut self, rhs: Materials) {
        for material in MaterialType::ALL {
            *self.get_mut(material) -= rhs.get(material);
        }
    }
}

/// One slot edit inside a committed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepChange {
    pub slot: usize,
    pub step_delta: i32,
    /// Catalog id when this step first assigned the option
    pub new_option: Option<usize>,
}

/// A committed step with everything needed to undo or replay it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaStep {
    pub changes: Vec<StepChange>,
    pub text: String,
    pub potential_before: i32,
    pub potential_after: i32,
    pub materials: Materials,
    pub max_materials_before: i64,
    pub max_materials_after: i64,
    /// Frozen success rate when this step ended the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<i32>,
}

/// Consecutive identical steps collapsed for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondensedStep {
    pub text: String,
    pub repeat: u32,
    pub potential_after: i32,
}

impl CondensedStep {
    /// `#N. <text> (xR) (P pot)`, numbered from 1
    pub fn display_line(&self, number: usize) -> String {
        let repeat = if self.repeat > 1 {
            format!(" (x{})", self.repeat)
        } else {
            String::new()
        };
        format!(
            "#{}. {}{} ({} pot)",
            number, self.text, repeat, self.potential_after
        )
    }
}
