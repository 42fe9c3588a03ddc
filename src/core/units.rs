//! Shared arithmetic: molar conversion, overage factor and rounding.

use crate::utils::error::{MixError, Result};

/// Average mass of one base pair, g/mol.
pub const AVERAGE_BP_MASS: f64 = 660.0;

/// fmol of each species delivered into a ligation.
pub const TARGET_FMOL: f64 = 40.0;

/// ng/µL and bp -> fmol/µL.
///
/// A zero length has no defined molarity and is reported as invalid input.
pub fn femtomoles_per_ul(conc_ng_ul: f64, length_bp: f64) -> Result<f64> {
    let divisor = AVERAGE_BP_MASS * length_bp;
    if divisor == 0.0 {
        return Err(MixError::invalid_input("float division by zero (length is 0 bp)"));
    }
    Ok((conc_ng_ul * 1_000_000.0) / divisor * 1000.0)
}

/// µL needed to deliver [`TARGET_FMOL`]; 0 when the stock has no usable molarity.
pub fn volume_for_target(fmol_per_ul: f64) -> f64 {
    if fmol_per_ul > 0.0 {
        TARGET_FMOL / (fmol_per_ul / 1000.0)
    } else {
        0.0
    }
}

/// Pipetting overage multiplier, `1 + pct/100`.
pub fn extra_factor(extra_pct: f64) -> f64 {
    1.0 + (extra_pct / 100.0)
}

/// Rounds the exact binary value to `places` decimals, ties to even
/// (4.35 is stored as 4.3499… and gives 4.3).
pub fn round_to(value: f64, places: u32) -> f64 {
    format!("{:.*}", places as usize, value)
        .parse::<f64>()
        .unwrap_or(value)
}
