//! Command-line arguments for the `fillstat` binary.

use thiserror::Error;

use crate::catalog::{ItemKind, MaterialType};
use crate::session::{MaterialBudget, SessionConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("{0} expects a value")]
    MissingValue(&'static str),

    #[error("{flag} expects a whole number, got '{value}'")]
    InvalidNumber { flag: &'static str, value: String },

    #[error("--budget expects MATERIAL=AMOUNT, got '{0}'")]
    InvalidBudget(String),
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the editor with a fresh session, or the autosave when `resume` is set
    Run {
        config: SessionConfig,
        resume: bool,
        budget: MaterialBudget,
    },
    /// Print the autosaved formula and exit
    Show,
    Version,
    Help,
}

pub const HELP_TEXT: &str = "\
fillstat - fill stat crafting simulator

Usage: fillstat [show] [options]

Commands:
  show              Print the autosaved formula and exit

Options:
  --weapon          Craft a weapon (default)
  --armor           Craft an armor
  --pot N           Starting potential (default 99)
  --recipe N        Recipe potential (default 46 weapon, 44 armor)
  --tec N           Technique (default 255)
  --prof N          Proficiency (default 0)
  --mat-reduction   Material cost reduction passive
  --budget M=N      Warn when material M nears N (repeatable, e.g. beast=5000)
  --resume          Continue the autosaved session
  --version         Show version information
  --help            Show this help message";

fn number<T: std::str::FromStr>(
    flag: &'static str,
    value: Option<String>,
) -> Result<T, CliError> {
    let value = value.ok_or(CliError::MissingValue(flag))?;
    value
        .parse()
        .map_err(|_| CliError::InvalidNumber { flag, value })
}

/// Parses one `MATERIAL=AMOUNT` budget entry.
fn budget_entry(value: Option<String>) -> Result<(MaterialType, i64), CliError> {
    let value = value.ok_or(CliError::MissingValue("--budget"))?;
    let parsed = value.split_once('=').and_then(|(name, amount)| {
        let material = MaterialType::from_name(name.trim())?;
        let amount = amount.trim().parse::<i64>().ok().filter(|a| *a >= 0)?;
        Some((material, amount))
    });
    parsed.ok_or(CliError::InvalidBudget(value))
}

/// Parses arguments, program name excluded.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, CliError> {
    let mut args = args.into_iter();
    let mut kind = ItemKind::Weapon;
    let mut pot = None;
    let mut recipe = None;
    let mut tec = None;
    let mut prof = None;
    let mut material_reduction = false;
    let mut resume = false;
    let mut budget = MaterialBudget::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "show" => return Ok(Command::Show),
            "--weapon" => kind = ItemKind::Weapon,
            "--armor" => kind = ItemKind::Armor,
            "--pot" => pot = Some(number("--pot", args.next())?),
            "--recipe" => recipe = Some(number("--recipe", args.next())?),
            "--tec" => tec = Some(number("--tec", args.next())?),
            "--prof" => prof = Some(number("--prof", args.next())?),
            "--mat-reduction" => material_reduction = true,
            "--resume" => resume = true,
            "--budget" => {
                let (material, limit) = budget_entry(args.next())?;
                budget.set_limit(material, limit);
            }
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    // Item kind picks the defaults; explicit values override them
    let mut config = SessionConfig::for_item(kind);
    if let Some(pot) = pot {
        config.starting_potential = pot;
    }
    if let Some(recipe) = recipe {
        config.recipe_potential = recipe;
    }
    if let Some(tec) = tec {
        config.technique = tec;
    }
    if let Some(prof) = prof {
        config.proficiency = prof;
    }
    config.material_reduction = material_reduction;

    Ok(Command::Run {
        config,
        resume,
        budget,
    })
}
