//! Bundled enhancement table.

use super::types::{Applicability, Catalog, EnhancementOption, MaterialType};

use super::types::Applicability::{ArmorOnly, Special, Universal, WeaponOnly};
use super::types::MaterialType::{Beast, Cloth, Mana, Metal, Wood};

pub const CAT_STATS: &str = "Enhance Stats";
pub const CAT_HP_MP: &str = "Enhance HP/MP";
pub const CAT_ATTACK: &str = "Enhance Attack";
pub const CAT_DEFENSE: &str = "Enhance Defense";
pub const CAT_ACCURACY: &str = "Enhance Accuracy";
pub const CAT_DODGE: &str = "Enhance Dodge";
pub const CAT_SPEED: &str = "Enhance Speed";
pub const CAT_CRITICAL: &str = "Enhance Critical";
pub const CAT_ELEMENTS: &str = "Enhance Elements";
pub const CAT_SPECIAL: &str = "Special Enhancement";
pub const CAT_AWAKEN: &str = "Awaken Elements";

const ELEMENTS: [&str; 6] = ["Fire", "Water", "Wind", "Earth", "Light", "Dark"];

fn opt(
    name: &str,
    material: MaterialType,
    pot: f64,
    cost: f64,
    category: &str,
    applicability: Applicability,
) -> EnhancementOption {
    EnhancementOption::new(name, material, pot, cost, category, applicability)
}

pub fn default_catalog() -> Catalog {
    let mut options = vec![
        // Stats
        opt("STR", Beast, 5.0, 25.0, CAT_STATS, Universal).with_bonus(1.0),
        opt("STR %", Beast, 10.0, 50.0, CAT_STATS, Universal),
        opt("INT", Mana, 5.0, 25.0, CAT_STATS, Universal).with_bonus(1.0),
        opt("INT %", Mana, 10.0, 50.0, CAT_STATS, Universal),
        opt("VIT", Metal, 5.0, 25.0, CAT_STATS, Universal).with_bonus(1.0),
        opt("VIT %", Metal, 10.0, 50.0, CAT_STATS, Universal),
        opt("AGI", Wood, 5.0, 25.0, CAT_STATS, Universal).with_bonus(1.0),
        opt("AGI %", Wood, 10.0, 50.0, CAT_STATS, Universal),
        opt("DEX", Cloth, 5.0, 25.0, CAT_STATS, Universal).with_bonus(1.0),
        opt("DEX %", Cloth, 10.0, 50.0, CAT_STATS, Universal),
        // HP/MP
        opt("Natural HP Regen", Metal, 5.0, 25.0, CAT_HP_MP, Universal).with_bonus(1.0),
        opt("Natural HP Regen %", Metal, 10.0, 50.0, CAT_HP_MP, Universal),
        opt("Natural MP Regen", Mana, 10.0, 50.0, CAT_HP_MP, Universal),
        opt("Natural MP Regen %", Mana, 20.0, 100.0, CAT_HP_MP, Universal),
        opt("MaxHP", Metal, 3.0, 16.49, CAT_HP_MP, Universal)
            .with_step(10.0)
            .with_bonus(10.0),
        opt("MaxHP %", Metal, 10.0, 50.0, CAT_HP_MP, Universal),
        opt("MaxMP", Mana, 6.0, 33.33, CAT_HP_MP, Universal)
            .with_step(10.0)
            .with_max(150.0),
        // Attack
        opt("ATK", Beast, 3.0, 16.49, CAT_ATTACK, WeaponOnly).with_bonus(1.0),
        opt("MATK", Mana, 3.0, 16.49, CAT_ATTACK, WeaponOnly).with_bonus(1.0),
        opt("ATK %", Beast, 10.0, 50.0, CAT_ATTACK, WeaponOnly),
        opt("MATK %", Mana, 10.0, 50.0, CAT_ATTACK, WeaponOnly),
        opt("Stability %", Beast, 20.0, 100.0, CAT_ATTACK, WeaponOnly),
        opt("Physical Pierce %", Beast, 20.0, 100.0, CAT_ATTACK, WeaponOnly),
        opt("Magic Pierce %", Mana, 20.0, 100.0, CAT_ATTACK, WeaponOnly),
        // Defense
        opt("DEF", Metal, 3.0, 16.49, CAT_DEFENSE, ArmorOnly).with_bonus(1.0),
        opt("MDEF", Metal, 3.0, 16.49, CAT_DEFENSE, ArmorOnly).with_bonus(1.0),
        opt("DEF %", Metal, 10.0, 50.0, CAT_DEFENSE, ArmorOnly),
        opt("MDEF %", Metal, 10.0, 50.0, CAT_DEFENSE, ArmorOnly),
        opt("Physical Resistance %", Metal, 10.0, 50.0, CAT_DEFENSE, ArmorOnly),
        opt("Magical Resistance %", Mana, 10.0, 50.0, CAT_DEFENSE, ArmorOnly),
        // Accuracy / Dodge
        opt("Accuracy", Wood, 20.0, 100.0, CAT_ACCURACY, WeaponOnly),
        opt("Accuracy %", Wood, 40.0, 200.0, CAT_ACCURACY, WeaponOnly),
        opt("Dodge", Cloth, 20.0, 100.0, CAT_DODGE, ArmorOnly),
        opt("Dodge %", Cloth, 40.0, 200.0, CAT_DODGE, ArmorOnly),
        // Speed
        opt("ASPD", Wood, 1.0, 1.5, CAT_SPEED, Universal).with_step(16.0),
        opt("ASPD %", Wood, 1.0, 1.5, CAT_SPEED, Universal),
        opt("CSPD", Cloth, 1.0, 1.5, CAT_SPEED, Universal).with_step(16.0),
        opt("CSPD %", Cloth, 1.0, 1.5, CAT_SPEED, Universal),
        // Critical
        opt("Critical Rate", Mana, 1.0, 1.0, CAT_CRITICAL, Universal)
            .with_bonus(1.0)
            .with_bonus_deduction(5.0),
        opt("Critical Rate %", Mana, 1.0, 1.0, CAT_CRITICAL, Universal),
        opt("Critical Damage", Mana, 3.0, 16.49, CAT_CRITICAL, Universal)
            .with_bonus(1.0)
            .with_bonus_ratio(0.5),
        opt("Critical Damage %", Mana, 10.0, 50.0, CAT_CRITICAL, Universal),
    ];

    for element in ELEMENTS {
        options.push(opt(
            &format!("% stronger against {element}"),
            Mana,
            5.0,
            25.0,
            CAT_ELEMENTS,
            Universal,
        ));
    }
    for element in ELEMENTS {
        options.push(opt(
            &format!("{element} resistance %"),
            Mana,
            5.0,
            25.0,
            CAT_ELEMENTS,
            Universal,
        ));
    }

    options.extend([
        opt("Aggro %", Mana, 6.0, 33.83, CAT_SPECIAL, Special)
            .with_bonus(1.0)
            .with_max_only(),
        opt("Guard Power %", Metal, 20.0, 100.0, CAT_SPECIAL, ArmorOnly),
        opt("Guard Recharge %", Metal, 20.0, 100.0, CAT_SPECIAL, ArmorOnly),
        opt("Evasion Recharge %", Cloth, 20.0, 100.0, CAT_SPECIAL, ArmorOnly),
    ]);

    for element in ELEMENTS {
        options.push(
            opt(
                &format!("{element} Element"),
                Mana,
                100.0,
                150.0,
                CAT_AWAKEN,
                WeaponOnly,
            )
            .with_max(1.0)
            .with_no_negative(),
        );
    }

    Catalog::new(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemKind;

    #[test]
    fn test_default_catalog_not_empty() {
        let catalog = default_catalog();
        assert!(catalog.len() > 40);
        assert_eq!(catalog.get(1).map(|o| o.name.as_str()), Some("STR"));
    }

    #[test]
    fn test_names_are_unique() {
        let catalog = default_catalog();
        let mut names: Vec<&str> = catalog.entries().map(|e| e.option.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_potency_positive() {
        for entry in default_catalog().entries() {
            assert!(entry.option.potency_per_step > 0.0, "{}", entry.option.name);
            assert!(entry.option.base_cost > 0.0, "{}", entry.option.name);
        }
    }

    #[test]
    fn test_awaken_elements_weapon_only() {
        let catalog = default_catalog();
        let armor: Vec<&str> = catalog
            .options_for(ItemKind::Armor)
            .into_iter()
            .map(|g| g.category)
            .collect();
        assert!(!armor.contains(&CAT_AWAKEN));
        assert!(!armor.contains(&CAT_ATTACK));
        assert!(armor.contains(&CAT_DEFENSE));
    }
}
