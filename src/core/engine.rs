use crate::config::toml_config::DefaultsConfig;
use crate::core::ligation::{LigationLevel1Calculator, LigationLevel2Calculator};
use crate::core::medium::CultureMediumCalculator;
use crate::core::pcr::{DreamTaqCalculator, PcrInitialCalculator};
use crate::domain::ports::Calculation;
use crate::utils::error::{MixError, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PcrInitial,
    PcrDreamTaq,
    LigationLevel1,
    LigationLevel2,
    CultureMedium,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::PcrInitial,
        Operation::PcrDreamTaq,
        Operation::LigationLevel1,
        Operation::LigationLevel2,
        Operation::CultureMedium,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::PcrInitial => "pcr_inicial",
            Operation::PcrDreamTaq => "pcr_dream_taq",
            Operation::LigationLevel1 => "lv1",
            Operation::LigationLevel2 => "lv2",
            Operation::CultureMedium => "medios",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Operation::PcrInitial => "pcr_initial",
            Operation::PcrDreamTaq => "dream_taq",
            Operation::LigationLevel1 => "ligation_level1",
            Operation::LigationLevel2 => "ligation_level2",
            Operation::CultureMedium => "culture_medium",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::PcrInitial => "50 µL PCR master mix with pipetting overage",
            Operation::PcrDreamTaq => "10 µL DreamTaq PCR master mix with pipetting overage",
            Operation::LigationLevel1 => "Level 1 Golden Gate ligations (BsaI), list of reactions",
            Operation::LigationLevel2 => "Level 2 Golden Gate ligation (BpiI) with N guides",
            Operation::CultureMedium => "Tissue-culture medium for a given volume",
        }
    }
}

impl FromStr for Operation {
    type Err = MixError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == key || op.alias() == key)
            .ok_or_else(|| MixError::UnknownOperation {
                name: key.to_string(),
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dispatches JSON requests to the calculators, filling absent fields from
/// the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct CalculationEngine {
    pcr_initial: PcrInitialCalculator,
    pcr_dream_taq: DreamTaqCalculator,
    ligation_level1: LigationLevel1Calculator,
    ligation_level2: LigationLevel2Calculator,
    culture_medium: CultureMediumCalculator,
}

impl CalculationEngine {
    pub fn new(defaults: DefaultsConfig) -> Self {
        Self {
            pcr_initial: PcrInitialCalculator {
                defaults: defaults.pcr_initial,
            },
            pcr_dream_taq: DreamTaqCalculator {
                defaults: defaults.pcr_dream_taq,
            },
            ligation_level1: LigationLevel1Calculator {
                defaults: defaults.ligation_level1,
            },
            ligation_level2: LigationLevel2Calculator {
                defaults: defaults.ligation_level2,
            },
            culture_medium: CultureMediumCalculator {
                defaults: defaults.culture_medium,
            },
        }
    }

    pub fn evaluate(&self, operation: Operation, payload: &Value) -> Result<Value> {
        tracing::debug!(operation = %operation, "Evaluating request");

        let result = match operation {
            Operation::PcrInitial => Self::run(&self.pcr_initial, payload),
            Operation::PcrDreamTaq => Self::run(&self.pcr_dream_taq, payload),
            Operation::LigationLevel1 => Self::run(&self.ligation_level1, payload),
            Operation::LigationLevel2 => Self::run(&self.ligation_level2, payload),
            Operation::CultureMedium => Self::run(&self.culture_medium, payload),
        };

        if let Err(e) = &result {
            tracing::warn!(operation = %operation, "Calculation rejected: {}", e);
        }
        result
    }

    pub fn evaluate_named(&self, operation: &str, payload: &Value) -> Result<Value> {
        let operation = operation.parse::<Operation>()?;
        self.evaluate(operation, payload)
    }

    /// `{"error": "..."}` body returned to clients for any failure.
    pub fn error_body(error: &MixError) -> Value {
        json!({ "error": error.to_string() })
    }

    fn run<C: Calculation>(calculation: &C, payload: &Value) -> Result<Value> {
        if !payload.is_object() {
            return Err(MixError::invalid_input(format!(
                "{} expects a JSON object, got {}",
                calculation.name(),
                payload
            )));
        }

        let input = C::Input::deserialize(payload)
            .map_err(|e| MixError::invalid_input(e.to_string()))?;
        let output = calculation.calculate(input)?;

        Ok(serde_json::to_value(output)?)
    }
}
