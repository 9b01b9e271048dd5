//! Material budget warnings and efficiency figures derived from a session.

use crate::catalog::MaterialType;
use crate::core::constants::{
    BUDGET_WARNING_RATIO, HIGH_STEP_COST, LOW_EFFICIENCY_SCORE, SUGGESTED_PROFICIENCY,
    VERY_HIGH_STEP_COST,
};
use crate::formula::Materials;

use super::logic::Session;

/// Optional spending cap per material type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialBudget {
    limits: [Option<i64>; 6],
}

impl MaterialBudget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, material: MaterialType, limit: i64) -> Self {
        self.set_limit(material, limit);
        self
    }

    pub fn set_limit(&mut self, material: MaterialType, limit: i64) {
        self.limits[material.index()] = Some(limit);
    }

    pub fn limit(&self, material: MaterialType) -> Option<i64> {
        self.limits[material.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.limits.iter().all(Option::is_none)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialWarning {
    /// The costliest step spent more than [`HIGH_STEP_COST`] of one material
    HighStepCost(i64),
    /// The costliest step spent more than [`VERY_HIGH_STEP_COST`]
    VeryHighStepCost(i64),
    BudgetApproaching {
        material: MaterialType,
        spent: i64,
        limit: i64,
    },
    BudgetExceeded {
        material: MaterialType,
        spent: i64,
        limit: i64,
    },
}

impl MaterialWarning {
    pub fn severity(&self) -> Severity {
        match self {
            MaterialWarning::HighStepCost(_) | MaterialWarning::BudgetApproaching { .. } => {
                Severity::Warning
            }
            MaterialWarning::VeryHighStepCost(_) | MaterialWarning::BudgetExceeded { .. } => {
                Severity::Error
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            MaterialWarning::HighStepCost(cost) => {
                format!("High material cost per step: {}", cost)
            }
            MaterialWarning::VeryHighStepCost(cost) => {
                format!("Very high material cost per step: {}", cost)
            }
            MaterialWarning::BudgetApproaching {
                material,
                spent,
                limit,
            } => format!(
                "{} approaching budget limit: {}/{}",
                material.name(),
                spent,
                limit
            ),
            MaterialWarning::BudgetExceeded {
                material,
                spent,
                limit,
            } => format!("{} budget exceeded: {}/{}", material.name(), spent, limit),
        }
    }
}

/// Warnings for a per-step high-water mark and accumulated totals.
///
/// A step above [`VERY_HIGH_STEP_COST`] reports both step warnings. A
/// budget warns once spending passes [`BUDGET_WARNING_RATIO`] of its limit
/// and errors once the limit itself is passed.
pub fn material_warnings(
    max_per_step: i64,
    totals: &Materials,
    budget: &MaterialBudget,
) -> Vec<MaterialWarning> {
    let mut warnings = Vec::new();
    if max_per_step > HIGH_STEP_COST {
        warnings.push(MaterialWarning::HighStepCost(max_per_step));
    }
    if max_per_step > VERY_HIGH_STEP_COST {
        warnings.push(MaterialWarning::VeryHighStepCost(max_per_step));
    }

    for material in MaterialType::ALL {
        let Some(limit) = budget.limit(material) else {
            continue;
        };
        let spent = totals.get(material);
        if spent > limit {
            warnings.push(MaterialWarning::BudgetExceeded {
                material,
                spent,
                limit,
            });
        } else if spent as f64 > limit as f64 * BUDGET_WARNING_RATIO {
            warnings.push(MaterialWarning::BudgetApproaching {
                material,
                spent,
                limit,
            });
        }
    }
    warnings
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencySuggestion {
    LowEfficiency,
    RaiseProficiency,
    UseMaterialReduction,
}

impl EfficiencySuggestion {
    pub fn message(&self) -> &'static str {
        match self {
            EfficiencySuggestion::LowEfficiency => {
                "Consider stats with lower material costs or higher proficiency"
            }
            EfficiencySuggestion::RaiseProficiency => {
                "Increasing proficiency will reduce material costs"
            }
            EfficiencySuggestion::UseMaterialReduction => {
                "Consider the 10% material reduction passive if available"
            }
        }
    }
}

/// How many materials each point of consumed potential cost.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialEfficiency {
    /// Starting potential minus current potential
    pub potential_used: i32,
    pub total_materials: i64,
    /// Per-material amount divided by `potential_used`; zero when no
    /// potential has been used
    pub per_potential: [f64; 6],
    /// `100 - total / used`, floored at 0; 100 when no potential was used
    pub score: i32,
    pub suggestions: Vec<EfficiencySuggestion>,
}

impl MaterialEfficiency {
    pub fn per_potential(&self, material: MaterialType) -> f64 {
        self.per_potential[material.index()]
    }
}

impl Session {
    /// Step-cost and budget warnings for the committed materials.
    pub fn material_warnings(&self, budget: &MaterialBudget) -> Vec<MaterialWarning> {
        material_warnings(self.max_materials(), self.materials(), budget)
    }

    /// Efficiency of the committed formula; `None` before the first step.
    pub fn material_efficiency(&self) -> Option<MaterialEfficiency> {
        if self.formula().is_empty() {
            return None;
        }
        let config = self.config();
        let potential_used = config.starting_potential - self.current_potential();
        let materials = self.materials();
        let total_materials = materials.total();

        let mut per_potential = [0.0; 6];
        let mut score = 100;
        if potential_used > 0 {
            let used = potential_used as f64;
            for (material, amount) in materials.iter() {
                per_potential[material.index()] = amount as f64 / used;
            }
            score = (100.0 - total_materials as f64 / used).max(0.0).round() as i32;
        }

        let mut suggestions = Vec::new();
        if score < LOW_EFFICIENCY_SCORE {
            suggestions.push(EfficiencySuggestion::LowEfficiency);
        }
        if config.proficiency < SUGGESTED_PROFICIENCY {
            suggestions.push(EfficiencySuggestion::RaiseProficiency);
        }
        if !config.material_reduction {
            suggestions.push(EfficiencySuggestion::UseMaterialReduction);
        }

        Some(MaterialEfficiency {
            potential_used,
            total_materials,
            per_potential,
            score,
            suggestions,
        })
    }
}
