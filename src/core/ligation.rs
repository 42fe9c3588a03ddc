//! Golden Gate ligation set-ups.
//!
//! Every DNA species is dosed at [`TARGET_FMOL`](crate::core::units::TARGET_FMOL)
//! and water fills the rest of the reaction, never going below zero.

use crate::core::units::{femtomoles_per_ul, round_to, volume_for_target};
use crate::domain::model::{
    LigationBatchInput, LigationBatchResult, LigationL1Params, LigationL1Result, LigationL2Input,
    LigationL2Params, LigationL2Result,
};
use crate::domain::ports::Calculation;
use crate::utils::error::{MixError, Result};

/// Level 1 reaction, µL.
mod level1 {
    pub const TOTAL: f64 = 15.0;
    pub const BUFFER_T4: f64 = 1.5;
    pub const BSAI: f64 = 0.8;
    pub const T4_LIGASE: f64 = 0.4;
}

/// Level 2 reaction, µL.
mod level2 {
    pub const TOTAL: f64 = 20.0;
    pub const BUFFER_T4: f64 = 2.0;
    pub const BPII: f64 = 1.0;
    pub const T4_LIGASE: f64 = 0.5;
}

pub fn ligation_level1(params: &LigationL1Params) -> Result<LigationL1Result> {
    let fragment_fmol = femtomoles_per_ul(params.fragment_conc, params.fragment_bp)?;
    let plasmid1_fmol = femtomoles_per_ul(params.plasmid1_conc, params.plasmid1_bp)?;
    let plasmid2_fmol = femtomoles_per_ul(params.plasmid2_conc, params.plasmid2_bp)?;

    if params.dilution == 0.0 {
        return Err(MixError::invalid_input("float division by zero (dilution is 0)"));
    }
    let diluted_fragment_fmol = fragment_fmol / params.dilution;

    let fragment_volume = volume_for_target(diluted_fragment_fmol);
    let plasmid1_volume = volume_for_target(plasmid1_fmol);
    let plasmid2_volume = volume_for_target(plasmid2_fmol);

    let consumed = level1::BUFFER_T4
        + level1::BSAI
        + level1::T4_LIGASE
        + fragment_volume
        + plasmid1_volume
        + plasmid2_volume;
    let water = (level1::TOTAL - consumed).max(0.0);

    Ok(LigationL1Result {
        ligation_type: params.ligation_type.clone(),
        water: round_to(water, 3),
        buffer_t4: round_to(level1::BUFFER_T4, 3),
        bsai: round_to(level1::BSAI, 3),
        t4_ligase: round_to(level1::T4_LIGASE, 3),
        fragment_volume: round_to(fragment_volume, 3),
        plasmid1_volume: round_to(plasmid1_volume, 3),
        plasmid2_volume: round_to(plasmid2_volume, 3),
        total: round_to(level1::TOTAL, 3),
        fragment_fmol: round_to(fragment_fmol, 3),
        diluted_fragment_fmol: round_to(diluted_fragment_fmol, 3),
        plasmid1_fmol: round_to(plasmid1_fmol, 3),
        plasmid2_fmol: round_to(plasmid2_fmol, 3),
        dilution: params.dilution,
    })
}

pub fn ligation_level2(params: &LigationL2Params) -> Result<LigationL2Result> {
    let plasmid1_fmol = femtomoles_per_ul(params.plasmid1_conc, params.plasmid1_bp)?;
    let plasmid2_fmol = femtomoles_per_ul(params.plasmid2_conc, params.plasmid2_bp)?;
    let guide_fmol = femtomoles_per_ul(params.guide_conc, params.guide_bp)?;

    let plasmid1_volume = volume_for_target(plasmid1_fmol);
    let plasmid2_volume = volume_for_target(plasmid2_fmol);
    // 所有 guide 共用同一濃度與長度
    let guide_volume = volume_for_target(guide_fmol);

    let fixed = level2::BUFFER_T4 + level2::BPII + level2::T4_LIGASE;
    let variable = plasmid1_volume + plasmid2_volume + (guide_volume * params.num_guides as f64);
    let water = (level2::TOTAL - (fixed + variable)).max(0.0);

    Ok(LigationL2Result {
        water: round_to(water, 2),
        buffer_t4: level2::BUFFER_T4,
        bpii: level2::BPII,
        t4_ligase: level2::T4_LIGASE,
        plasmid1_volume: round_to(plasmid1_volume, 2),
        plasmid2_volume: round_to(plasmid2_volume, 2),
        total_volume: level2::TOTAL,
        num_guides: params.num_guides,
        plasmid1_fmol: round_to(plasmid1_fmol, 2),
        plasmid2_fmol: round_to(plasmid2_fmol, 2),
        guide_fmol: round_to(guide_fmol, 2),
        guide_volume: round_to(guide_volume, 2),
    })
}

#[derive(Debug, Clone, Default)]
pub struct LigationLevel1Calculator {
    pub defaults: LigationL1Params,
}

impl Calculation for LigationLevel1Calculator {
    type Input = LigationBatchInput;
    type Output = LigationBatchResult;

    fn name(&self) -> &'static str {
        "lv1"
    }

    /// Entries are independent; the first failing entry fails the whole batch.
    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        let entries = input
            .entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                ligation_level1(&entry.resolve(&self.defaults)).map_err(|e| {
                    tracing::error!("LV1 entry {} failed: {}", index, e);
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LigationBatchResult { entries })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LigationLevel2Calculator {
    pub defaults: LigationL2Params,
}

impl Calculation for LigationLevel2Calculator {
    type Input = LigationL2Input;
    type Output = LigationL2Result;

    fn name(&self) -> &'static str {
        "lv2"
    }

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        ligation_level2(&input.resolve(&self.defaults))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LigationL1Input;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_level1_defaults() {
        let result = ligation_level1(&LigationL1Params::default()).unwrap();

        // 139.7 ng/µL, 164 bp -> 1 290 650.4 fmol/µL; /15 -> 86 043.4
        assert!(close(result.fragment_fmol, 1_290_650.407, 1e-6));
        assert!(close(result.diluted_fragment_fmol, 86_043.36, 1e-6));
        assert!(close(result.fragment_volume, 0.465, 1e-9));
        assert!(close(result.plasmid1_volume, 0.893, 1e-9));
        assert!(close(result.plasmid2_volume, 0.994, 1e-9));
        assert!(close(result.water, 9.948, 1e-9));
        assert_eq!(result.total, 15.0);
        assert_eq!(result.buffer_t4, 1.5);
        assert_eq!(result.bsai, 0.8);
        assert_eq!(result.t4_ligase, 0.4);
        assert_eq!(result.dilution, 15.0);
        assert_eq!(result.ligation_type, "ligacion1");
    }

    #[test]
    fn test_level1_volumes_fill_reaction() {
        let result = ligation_level1(&LigationL1Params::default()).unwrap();
        let sum = result.water
            + result.buffer_t4
            + result.bsai
            + result.t4_ligase
            + result.fragment_volume
            + result.plasmid1_volume
            + result.plasmid2_volume;
        assert!(close(sum, 15.0, 0.004));
    }

    #[test]
    fn test_level1_non_positive_concentration_gives_zero_volume() {
        let params = LigationL1Params {
            fragment_conc: 0.0,
            plasmid1_conc: -5.0,
            ..LigationL1Params::default()
        };
        let result = ligation_level1(&params).unwrap();

        assert_eq!(result.fragment_volume, 0.0);
        assert_eq!(result.plasmid1_volume, 0.0);
        assert!(result.plasmid2_volume > 0.0);
    }

    #[test]
    fn test_level1_water_never_negative() {
        // 稀釋的 stock：體積總和超過 15 µL
        let params = LigationL1Params {
            fragment_conc: 0.5,
            plasmid1_conc: 0.5,
            plasmid2_conc: 0.5,
            ..LigationL1Params::default()
        };
        let result = ligation_level1(&params).unwrap();

        assert!(result.plasmid1_volume > 15.0);
        assert_eq!(result.water, 0.0);
    }

    #[test]
    fn test_level1_zero_dilution_is_invalid() {
        let params = LigationL1Params {
            dilution: 0.0,
            ..LigationL1Params::default()
        };
        assert!(matches!(
            ligation_level1(&params),
            Err(MixError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_level1_zero_length_is_invalid() {
        let params = LigationL1Params {
            plasmid2_bp: 0.0,
            ..LigationL1Params::default()
        };
        assert!(ligation_level1(&params).is_err());
    }

    #[test]
    fn test_level1_batch_preserves_order() {
        let calculator = LigationLevel1Calculator::default();
        let input = LigationBatchInput {
            entries: vec![
                LigationL1Input {
                    ligation_type: Some("a".to_string()),
                    dilution: Some(1.0),
                    ..Default::default()
                },
                LigationL1Input {
                    ligation_type: Some("b".to_string()),
                    ..Default::default()
                },
                LigationL1Input {
                    ligation_type: Some("c".to_string()),
                    dilution: Some(30.0),
                    ..Default::default()
                },
            ],
        };
        let result = calculator.calculate(input).unwrap();

        let names: Vec<_> = result
            .entries
            .iter()
            .map(|e| e.ligation_type.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(result.entries[0].dilution, 1.0);
        assert_eq!(result.entries[1].dilution, 15.0);
        assert!(result.entries[0].fragment_volume < result.entries[2].fragment_volume);
    }

    #[test]
    fn test_level1_empty_batch() {
        let calculator = LigationLevel1Calculator::default();
        let result = calculator.calculate(LigationBatchInput::default()).unwrap();
        assert!(result.entries.is_empty());
    }

    #[test]
    fn test_level2_defaults() {
        let result = ligation_level2(&LigationL2Params::default()).unwrap();

        assert!(close(result.plasmid1_fmol, 32_130.74, 1e-6));
        assert!(close(result.plasmid1_volume, 1.24, 1e-9));
        assert!(close(result.plasmid2_volume, 1.85, 1e-9));
        assert!(close(result.guide_volume, 0.67, 1e-9));
        assert!(close(result.water, 12.73, 1e-9));
        assert_eq!(result.total_volume, 20.0);
        assert_eq!(result.num_guides, 1);
    }

    #[test]
    fn test_level2_guides_share_one_volume() {
        let params = LigationL2Params {
            num_guides: 3,
            ..LigationL2Params::default()
        };
        let result = ligation_level2(&params).unwrap();
        let guides: Vec<_> = result.guide_volumes().collect();

        assert_eq!(guides.len(), 3);
        assert_eq!(guides[0].0, "guia1_vol");
        assert_eq!(guides[2].0, "guia3_vol");
        assert!(guides.iter().all(|(_, v)| *v == result.guide_volume));
    }

    #[test]
    fn test_level2_water_never_negative() {
        let params = LigationL2Params {
            num_guides: 40,
            ..LigationL2Params::default()
        };
        let result = ligation_level2(&params).unwrap();
        assert_eq!(result.water, 0.0);
    }

    #[test]
    fn test_level2_zero_guides_has_no_guide_fields() {
        let params = LigationL2Params {
            num_guides: 0,
            ..LigationL2Params::default()
        };
        let result = ligation_level2(&params).unwrap();
        assert_eq!(result.guide_volumes().count(), 0);
    }
}
