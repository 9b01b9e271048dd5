//! Enhancement option definitions and the catalog that indexes them.

use serde::{Deserialize, Serialize};

/// Crafting material consumed by an enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    Metal,
    Cloth,
    Beast,
    Wood,
    Medicine,
    Mana,
}

impl MaterialType {
    /// All material types in display order
    pub const ALL: [MaterialType; 6] = [
        MaterialType::Metal,
        MaterialType::Cloth,
        MaterialType::Beast,
        MaterialType::Wood,
        MaterialType::Medicine,
        MaterialType::Mana,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MaterialType::Metal => "Metal",
            MaterialType::Cloth => "Cloth",
            MaterialType::Beast => "Beast",
            MaterialType::Wood => "Wood",
            MaterialType::Medicine => "Medicine",
            MaterialType::Mana => "Mana",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<MaterialType> {
        MaterialType::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Position in [`MaterialType::ALL`]
    pub fn index(&self) -> usize {
        match self {
            MaterialType::Metal => 0,
            MaterialType::Cloth => 1,
            MaterialType::Beast => 2,
            MaterialType::Wood => 3,
            MaterialType::Medicine => 4,
            MaterialType::Mana => 5,
        }
    }
}

/// Kind of item being crafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "Weapon",
            ItemKind::Armor => "Armor",
        }
    }
}

/// Which item kinds may carry an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Applicability {
    Universal,
    WeaponOnly,
    ArmorOnly,
    Special,
}

impl Applicability {
    pub fn allows(&self, kind: ItemKind) -> bool {
        match self {
            Applicability::Universal | Applicability::Special => true,
            Applicability::WeaponOnly => kind == ItemKind::Weapon,
            Applicability::ArmorOnly => kind == ItemKind::Armor,
        }
    }
}

/// One selectable stat enhancement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementOption {
    pub name: String,
    pub material: MaterialType,
    /// Potential consumed per normal-range step
    pub potency_per_step: f64,
    pub base_cost: f64,
    pub category: String,
    pub applicability: Applicability,
    /// Value units per step (1 when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
    /// Value units per step past the normal cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_per_step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_deduction: Option<f64>,
    /// Explicit normal-range value cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    /// Negative values stop at the normal cap
    #[serde(default)]
    pub max_only: bool,
    #[serde(default)]
    pub no_negative: bool,
}

impl EnhancementOption {
    pub fn new(
        name: &str,
        material: MaterialType,
        potency_per_step: f64,
        base_cost: f64,
        category: &str,
        applicability: Applicability,
    ) -> Self {
        Self {
            name: name.to_string(),
            material,
            potency_per_step,
            base_cost,
            category: category.to_string(),
            applicability,
            step_size: None,
            bonus_per_step: None,
            bonus_ratio: None,
            bonus_deduction: None,
            max_value: None,
            max_only: false,
            no_negative: false,
        }
    }

    pub fn with_step(mut self, step_size: f64) -> Self {
        self.step_size = Some(step_size);
        self
    }

    pub fn with_bonus(mut self, bonus_per_step: f64) -> Self {
        self.bonus_per_step = Some(bonus_per_step);
        self
    }

    pub fn with_bonus_ratio(mut self, ratio: f64) -> Self {
        self.bonus_ratio = Some(ratio);
        self
    }

    pub fn with_bonus_deduction(mut self, deduction: f64) -> Self {
        self.bonus_deduction = Some(deduction);
        self
    }

    pub fn with_max(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn with_max_only(mut self) -> Self {
        self.max_only = true;
        self
    }

    pub fn with_no_negative(mut self) -> Self {
        self.no_negative = true;
        self
    }

    /// Value units per normal step
    pub fn unit(&self) -> f64 {
        self.step_size.unwrap_or(1.0)
    }

    pub fn is_available_for(&self, kind: ItemKind) -> bool {
        self.applicability.allows(kind)
    }
}

/// A catalog option paired with its stable id.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry<'a> {
    /// 1-based index into the full catalog
    pub id: usize,
    pub option: &'a EnhancementOption,
}

/// Options sharing a category, in catalog order.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub entries: Vec<CatalogEntry<'a>>,
}

/// Read-only, ordered option table. Id 0 means "no selection".
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    options: Vec<EnhancementOption>,
}

impl Default for Catalog {
    fn default() -> Self {
        super::data::default_catalog()
    }
}

impl Catalog {
    pub fn new(options: Vec<EnhancementOption>) -> Self {
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Option by 1-based id
    pub fn get(&self, id: usize) -> Option<&EnhancementOption> {
        id.checked_sub(1).and_then(|index| self.options.get(index))
    }

    /// Id of the first option with this name
    pub fn find(&self, name: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|option| option.name == name)
            .map(|index| index + 1)
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.options
            .iter()
            .enumerate()
            .map(|(index, option)| CatalogEntry {
                id: index + 1,
                option,
            })
    }

    /// Options usable on `kind`, grouped by category in first-seen order.
    pub fn options_for(&self, kind: ItemKind) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        for entry in self.entries().filter(|e| e.option.is_available_for(kind)) {
            let category = entry.option.category.as_str();
            match groups.iter_mut().find(|g| g.category == category) {
                Some(group) => group.entries.push(entry),
                None => groups.push(CategoryGroup {
                    category,
                    entries: vec![entry],
                }),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            EnhancementOption::new(
                "STR",
                MaterialType::Beast,
                5.0,
                25.0,
                "Stats",
                Applicability::Universal,
            ),
            EnhancementOption::new(
                "ATK",
                MaterialType::Beast,
                3.0,
                16.49,
                "Attack",
                Applicability::WeaponOnly,
            ),
            EnhancementOption::new(
                "DEF",
                MaterialType::Metal,
                3.0,
                16.49,
                "Defense",
                Applicability::ArmorOnly,
            ),
            EnhancementOption::new(
                "INT",
                MaterialType::Mana,
                5.0,
                25.0,
                "Stats",
                Applicability::Universal,
            ),
            EnhancementOption::new(
                "Aggro %",
                MaterialType::Mana,
                6.0,
                33.83,
                "Special",
                Applicability::Special,
            ),
        ])
    }

    #[test]
    fn test_material_from_name() {
        assert_eq!(MaterialType::from_name("beast"), Some(MaterialType::Beast));
        assert_eq!(MaterialType::from_name("MANA"), Some(MaterialType::Mana));
        assert_eq!(MaterialType::from_name("stone"), None);
    }

    #[test]
    fn test_ids_are_one_based() {
        let catalog = small_catalog();
        assert!(catalog.get(0).is_none());
        assert_eq!(catalog.get(1).map(|o| o.name.as_str()), Some("STR"));
        assert_eq!(catalog.get(5).map(|o| o.name.as_str()), Some("Aggro %"));
        assert!(catalog.get(6).is_none());
    }

    #[test]
    fn test_find_by_name() {
        let catalog = small_catalog();
        assert_eq!(catalog.find("INT"), Some(4));
        assert_eq!(catalog.find("LUK"), None);
    }

    #[test]
    fn test_weapon_filter_groups_by_category() {
        let catalog = small_catalog();
        let groups = catalog.options_for(ItemKind::Weapon);
        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Stats", "Attack", "Special"]);

        let stats_ids: Vec<usize> = groups[0].entries.iter().map(|e| e.id).collect();
        assert_eq!(stats_ids, vec![1, 4]);
    }

    #[test]
    fn test_armor_filter_excludes_weapon_only() {
        let catalog = small_catalog();
        let groups = catalog.options_for(ItemKind::Armor);
        let names: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.entries.iter().map(|e| e.option.name.as_str()))
            .collect();
        assert_eq!(names, vec!["STR", "INT", "DEF", "Aggro %"]);
    }

    #[test]
    fn test_material_index_matches_all_order() {
        for (i, material) in MaterialType::ALL.iter().enumerate() {
            assert_eq!(material.index(), i);
        }
    }

    #[test]
    fn test_unit_defaults_to_one() {
        let option = EnhancementOption::new(
            "STR",
            MaterialType::Beast,
            5.0,
            25.0,
            "Stats",
            Applicability::Universal,
        );
        assert_eq!(option.unit(), 1.0);
        assert_eq!(option.with_step(10.0).unit(), 10.0);
    }
}
