//! PCR master-mix recipes.
//!
//! Only reagents consumed per reaction are scaled by the overage factor;
//! template DNA is pipetted per tube and never scaled.

use crate::core::units::{extra_factor, round_to};
use crate::domain::model::{
    DreamTaqInput, DreamTaqParams, DreamTaqResult, PcrInitialInput, PcrInitialParams,
    PcrInitialResult,
};
use crate::domain::ports::Calculation;
use crate::utils::error::Result;

/// µL per 50 µL reaction.
mod initial_1x {
    pub const WATER: f64 = 32.6;
    pub const BUFFER: f64 = 10.0;
    pub const FORWARD: f64 = 2.0;
    pub const REVERSE: f64 = 2.0;
    pub const POLYMERASE: f64 = 0.4;
    pub const TOTAL: f64 = 50.0;
}

pub fn pcr_initial(params: &PcrInitialParams) -> PcrInitialResult {
    let n = params.num_reactions;

    let water_base = n * initial_1x::WATER;
    let buffer_base = n * initial_1x::BUFFER;
    let forward_base = n * initial_1x::FORWARD;
    let reverse_base = n * initial_1x::REVERSE;
    let dna_base = n * params.dna_volume;
    let polymerase_base = n * initial_1x::POLYMERASE;
    let total_base = n * initial_1x::TOTAL;

    let factor = extra_factor(params.extra_pct);
    let master_mix = (total_base - dna_base) * factor;

    PcrInitialResult {
        water: round_to(water_base * factor, 1),
        buffer: round_to(buffer_base * factor, 1),
        forward_primer: round_to(forward_base * factor, 1),
        reverse_primer: round_to(reverse_base * factor, 1),
        dna: round_to(dna_base, 1),
        polymerase: round_to(polymerase_base * factor, 1),
        total_base: round_to(total_base, 1),
        total_with_extra: round_to(master_mix + dna_base, 1),
        num_reactions: params.num_reactions,
        extra_pct: params.extra_pct,
        master_mix_volume: round_to(master_mix, 1),
        dna_total_volume: round_to(dna_base, 1),
    }
}

/// DreamTaq recipe, µL per 10 µL tube.
pub struct DreamTaqRecipe;

impl DreamTaqRecipe {
    pub const PER_TUBE: f64 = 10.0;
    pub const BUFFER: f64 = 1.0;
    pub const DNTPS: f64 = 0.2;
    pub const FORWARD: f64 = 0.4;
    pub const REVERSE: f64 = 0.4;
    pub const DREAM_TAQ: f64 = 0.08;
    pub const DNA: f64 = 1.0;

    /// Water that tops one tube up to [`Self::PER_TUBE`].
    pub fn water_per_reaction() -> f64 {
        let components = [
            Self::BUFFER,
            Self::DNTPS,
            Self::FORWARD,
            Self::REVERSE,
            Self::DREAM_TAQ,
        ]
        .iter()
        .sum::<f64>();
        Self::PER_TUBE - (components + Self::DNA)
    }
}

pub fn pcr_dream_taq(params: &DreamTaqParams) -> DreamTaqResult {
    let n = params.num_reactions;
    let water_1x = DreamTaqRecipe::water_per_reaction();
    let factor = extra_factor(params.extra_pct);

    let dna_base = DreamTaqRecipe::DNA * n;

    let master_mix_base = (water_1x
        + DreamTaqRecipe::BUFFER
        + DreamTaqRecipe::DNTPS
        + DreamTaqRecipe::FORWARD
        + DreamTaqRecipe::REVERSE
        + DreamTaqRecipe::DREAM_TAQ)
        * n;
    let master_mix_with_extra = master_mix_base * factor;

    let scaled = |per_reaction: f64| round_to(per_reaction * n * factor, 2);

    let result = DreamTaqResult {
        water: scaled(water_1x),
        buffer: scaled(DreamTaqRecipe::BUFFER),
        dntps: scaled(DreamTaqRecipe::DNTPS),
        forward_primer: scaled(DreamTaqRecipe::FORWARD),
        reverse_primer: scaled(DreamTaqRecipe::REVERSE),
        dream_taq: scaled(DreamTaqRecipe::DREAM_TAQ),
        dna: round_to(dna_base, 2),
        total_base: round_to(DreamTaqRecipe::PER_TUBE * n, 2),
        total_with_extra: round_to(master_mix_with_extra + dna_base, 2),
        per_tube: DreamTaqRecipe::PER_TUBE,
        num_reactions: params.num_reactions,
        extra_pct: params.extra_pct,
        master_mix_without_dna: round_to(master_mix_with_extra, 2),
        master_mix_without_dna_base: round_to(master_mix_base, 2),
        dna_total_volume: round_to(dna_base, 2),
        factor_extra: factor,
    };

    tracing::debug!(?result, "DreamTaq mix calculated");
    result
}

#[derive(Debug, Clone, Default)]
pub struct PcrInitialCalculator {
    pub defaults: PcrInitialParams,
}

impl Calculation for PcrInitialCalculator {
    type Input = PcrInitialInput;
    type Output = PcrInitialResult;

    fn name(&self) -> &'static str {
        "pcr_inicial"
    }

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(pcr_initial(&input.resolve(&self.defaults)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DreamTaqCalculator {
    pub defaults: DreamTaqParams,
}

impl Calculation for DreamTaqCalculator {
    type Input = DreamTaqInput;
    type Output = DreamTaqResult;

    fn name(&self) -> &'static str {
        "pcr_dream_taq"
    }

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(pcr_dream_taq(&input.resolve(&self.defaults)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_pcr_initial_defaults() {
        let params = PcrInitialParams::default();
        let result = pcr_initial(&params);

        assert_eq!(result.buffer, 231.0);
        assert_eq!(result.forward_primer, 46.2);
        assert_eq!(result.reverse_primer, 46.2);
        assert_eq!(result.dna, 31.5);
        assert_eq!(result.polymerase, 9.2);
        assert_eq!(result.total_base, 1050.0);
        assert!(close(result.water, 753.1, 1e-9));
        assert_eq!(result.num_reactions, 21.0);
        assert_eq!(result.extra_pct, 10.0);
    }

    #[test]
    fn test_pcr_initial_dna_is_not_scaled() {
        let params = PcrInitialParams::default();
        let result = pcr_initial(&params);

        let total_base = 21.0 * 50.0;
        let dna_base = 21.0 * 1.5;
        let expected = round_to((total_base - dna_base) * extra_factor(10.0) + dna_base, 1);
        assert_eq!(result.total_with_extra, expected);
        assert_eq!(result.dna_total_volume, round_to(dna_base, 1));
        assert!(close(
            result.total_with_extra,
            result.master_mix_volume + result.dna_total_volume,
            0.1 + 1e-9
        ));
    }

    #[test]
    fn test_pcr_initial_without_extra() {
        let params = PcrInitialParams {
            num_reactions: 2.0,
            dna_volume: 2.0,
            extra_pct: 0.0,
        };
        let result = pcr_initial(&params);

        assert_eq!(result.water, 65.2);
        assert_eq!(result.total_with_extra, 100.0);
        assert_eq!(result.master_mix_volume, 96.0);
    }

    #[test]
    fn test_dream_taq_water_per_reaction() {
        assert!(close(DreamTaqRecipe::water_per_reaction(), 6.92, 1e-9));
    }

    #[test]
    fn test_dream_taq_defaults() {
        let result = pcr_dream_taq(&DreamTaqParams::default());

        assert_eq!(result.water, 60.9);
        assert_eq!(result.buffer, 8.8);
        assert_eq!(result.dntps, 1.76);
        assert_eq!(result.forward_primer, 3.52);
        assert_eq!(result.reverse_primer, 3.52);
        assert_eq!(result.dream_taq, 0.7);
        assert_eq!(result.dna, 8.0);
        assert_eq!(result.total_base, 80.0);
        assert_eq!(result.master_mix_without_dna_base, 72.0);
        assert_eq!(result.master_mix_without_dna, 79.2);
        assert_eq!(result.total_with_extra, 87.2);
        assert_eq!(result.per_tube, 10.0);
        assert_eq!(result.factor_extra, extra_factor(10.0));
    }

    #[test]
    fn test_dream_taq_components_sum_to_total() {
        let result = pcr_dream_taq(&DreamTaqParams {
            num_reactions: 24.0,
            extra_pct: 15.0,
        });

        let sum = result.water
            + result.buffer
            + result.dntps
            + result.forward_primer
            + result.reverse_primer
            + result.dream_taq
            + result.dna;
        // 每個成分各自四捨五入到 2 位小數
        assert!(close(sum, result.total_with_extra, 0.04));
        assert_eq!(result.dna, 24.0);
    }

    #[test]
    fn test_calculator_applies_defaults_per_field() {
        let calculator = PcrInitialCalculator::default();
        let input = PcrInitialInput {
            num_reactions: Some(10.0),
            ..Default::default()
        };
        let result = calculator.calculate(input).unwrap();

        assert_eq!(result.num_reactions, 10.0);
        assert_eq!(result.dna, 15.0);
        assert_eq!(result.extra_pct, 10.0);
    }
}
