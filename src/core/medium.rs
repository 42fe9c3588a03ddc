//! Plant tissue-culture media.
//!
//! Each recipe is a table of per-litre amounts (mg or µL per mL), scaled to the
//! volume being prepared.

use crate::core::units::round_to;
use crate::domain::model::{MediumInput, MediumParams, MediumResult};
use crate::domain::ports::Calculation;
use crate::utils::error::Result;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const MEDIUM_PH: f64 = 5.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediumType {
    Germination,
    CoCulture,
    Selection,
    Rooting,
}

impl MediumType {
    pub const ALL: [MediumType; 4] = [
        MediumType::Germination,
        MediumType::CoCulture,
        MediumType::Selection,
        MediumType::Rooting,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            MediumType::Germination => "germinacion",
            MediumType::CoCulture => "co_culture",
            MediumType::Selection => "selection",
            MediumType::Rooting => "rooting",
        }
    }

    pub fn recipe(&self) -> &'static [(Ingredient, f64)] {
        use Ingredient::*;
        match self {
            MediumType::Germination => &[(Ms, 2.4), (Sucrose, 15.0), (Agar, 8.0)],
            MediumType::CoCulture => &[
                (Ms, 4.8),
                (Sucrose, 30.0),
                (Agar, 8.0),
                (D24, 0.2),
                (Kinetin, 0.1),
            ],
            MediumType::Selection => &[
                (Ms, 4.8),
                (Sucrose, 30.0),
                (Agar, 8.0),
                (TransZeatin, 2.0),
                (Meropenem, 25.0),
                (Kanamycin, 75.0),
            ],
            MediumType::Rooting => &[
                (Ms, 4.8),
                (Sucrose, 30.0),
                (Agar, 8.0),
                (Iaa, 1.0),
                (Meropenem, 30.0),
                (Kanamycin, 75.0),
            ],
        }
    }
}

impl FromStr for MediumType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MediumType::ALL
            .into_iter()
            .find(|medium| medium.tag() == s)
            .ok_or_else(|| format!("unknown medium type '{}'", s))
    }
}

impl fmt::Display for MediumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingredient {
    /// Murashige & Skoog salts, g
    Ms,
    Sucrose,
    Agar,
    /// 2,4-D stock, µL
    D24,
    Kinetin,
    TransZeatin,
    Meropenem,
    Kanamycin,
    Iaa,
}

impl Ingredient {
    fn slot<'a>(&self, result: &'a mut MediumResult) -> &'a mut Option<f64> {
        match self {
            Ingredient::Ms => &mut result.ms_g,
            Ingredient::Sucrose => &mut result.sacarosa_g,
            Ingredient::Agar => &mut result.agar_g,
            Ingredient::D24 => &mut result.d24_ul,
            Ingredient::Kinetin => &mut result.kinetina_ul,
            Ingredient::TransZeatin => &mut result.tzeatina_ul,
            Ingredient::Meropenem => &mut result.meropenem_ul,
            Ingredient::Kanamycin => &mut result.kanamicina_ul,
            Ingredient::Iaa => &mut result.iaa_ul,
        }
    }
}

pub fn prepare_medium(medium: MediumType, volume_ml: f64) -> MediumResult {
    let mut result = MediumResult {
        h2o_ml: Some(volume_ml),
        ph: Some(MEDIUM_PH),
        ..MediumResult::default()
    };

    for (ingredient, per_ml) in medium.recipe() {
        *ingredient.slot(&mut result) = Some(round_to((volume_ml * per_ml) / 1000.0, 2));
    }

    result
}

/// Unknown tags, `null` and non-string tags give an empty result rather than
/// an error.
pub fn culture_medium(params: &MediumParams) -> MediumResult {
    let parsed = match &params.medium_type {
        Value::String(tag) => tag.parse::<MediumType>(),
        other => Err(format!("medium type {} is not a tag", other)),
    };

    match parsed {
        Ok(medium) => prepare_medium(medium, params.volume_ml),
        Err(reason) => {
            tracing::warn!("{}; returning an empty recipe", reason);
            MediumResult::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CultureMediumCalculator {
    pub defaults: MediumParams,
}

impl Calculation for CultureMediumCalculator {
    type Input = MediumInput;
    type Output = MediumResult;

    fn name(&self) -> &'static str {
        "medios"
    }

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(culture_medium(&input.resolve(&self.defaults)))
    }
}
