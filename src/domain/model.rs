//! Request and result records for every calculation.
//!
//! JSON keys keep the names used by the lab's web forms (`num_reacciones`,
//! `tipo_medio`, ...). Each operation has three shapes:
//! an `*Input` with every field optional as it arrives on the wire, a
//! `*Params` with every field resolved (its `Default` holds the nominal bench
//! values and it doubles as the defaults section of the TOML file), and a
//! `*Result` ready for serialisation.

use crate::utils::coerce;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// ============================
// PCR inicial
// ============================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PcrInitialParams {
    #[serde(rename = "num_reacciones")]
    pub num_reactions: f64,
    #[serde(rename = "volumen_adn")]
    pub dna_volume: f64,
    #[serde(rename = "porcentaje_extra")]
    pub extra_pct: f64,
}

impl Default for PcrInitialParams {
    fn default() -> Self {
        Self {
            num_reactions: 21.0,
            dna_volume: 1.5,
            extra_pct: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PcrInitialInput {
    #[serde(default, rename = "num_reacciones", deserialize_with = "coerce::number")]
    pub num_reactions: Option<f64>,
    #[serde(default, rename = "volumen_adn", deserialize_with = "coerce::number")]
    pub dna_volume: Option<f64>,
    #[serde(default, rename = "porcentaje_extra", deserialize_with = "coerce::number")]
    pub extra_pct: Option<f64>,
}

impl PcrInitialInput {
    pub fn resolve(self, defaults: &PcrInitialParams) -> PcrInitialParams {
        PcrInitialParams {
            num_reactions: self.num_reactions.unwrap_or(defaults.num_reactions),
            dna_volume: self.dna_volume.unwrap_or(defaults.dna_volume),
            extra_pct: self.extra_pct.unwrap_or(defaults.extra_pct),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PcrInitialResult {
    #[serde(rename = "agua")]
    pub water: f64,
    pub buffer: f64,
    #[serde(rename = "fw")]
    pub forward_primer: f64,
    #[serde(rename = "rv")]
    pub reverse_primer: f64,
    #[serde(rename = "adn")]
    pub dna: f64,
    #[serde(rename = "polimerasa")]
    pub polymerase: f64,
    pub total_base: f64,
    #[serde(rename = "total_con_extra")]
    pub total_with_extra: f64,
    #[serde(rename = "num_reacciones")]
    pub num_reactions: f64,
    #[serde(rename = "porcentaje_extra")]
    pub extra_pct: f64,
    #[serde(rename = "vol_master_mix")]
    pub master_mix_volume: f64,
    #[serde(rename = "vol_adn_total")]
    pub dna_total_volume: f64,
}

// ============================
// PCR DreamTaq
// ============================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DreamTaqParams {
    #[serde(rename = "num_reacciones")]
    pub num_reactions: f64,
    #[serde(rename = "porcentaje_extra")]
    pub extra_pct: f64,
}

impl Default for DreamTaqParams {
    fn default() -> Self {
        Self {
            num_reactions: 8.0,
            extra_pct: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DreamTaqInput {
    #[serde(default, rename = "num_reacciones", deserialize_with = "coerce::number")]
    pub num_reactions: Option<f64>,
    #[serde(default, rename = "porcentaje_extra", deserialize_with = "coerce::number")]
    pub extra_pct: Option<f64>,
}

impl DreamTaqInput {
    pub fn resolve(self, defaults: &DreamTaqParams) -> DreamTaqParams {
        DreamTaqParams {
            num_reactions: self.num_reactions.unwrap_or(defaults.num_reactions),
            extra_pct: self.extra_pct.unwrap_or(defaults.extra_pct),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DreamTaqResult {
    #[serde(rename = "agua")]
    pub water: f64,
    pub buffer: f64,
    pub dntps: f64,
    #[serde(rename = "fw")]
    pub forward_primer: f64,
    #[serde(rename = "rv")]
    pub reverse_primer: f64,
    pub dream_taq: f64,
    pub dna: f64,
    pub total_base: f64,
    #[serde(rename = "total_con_extra")]
    pub total_with_extra: f64,
    #[serde(rename = "por_tubo")]
    pub per_tube: f64,
    #[serde(rename = "num_reacciones")]
    pub num_reactions: f64,
    #[serde(rename = "porcentaje_extra")]
    pub extra_pct: f64,
    #[serde(rename = "master_mix_sin_adn")]
    pub master_mix_without_dna: f64,
    #[serde(rename = "master_mix_sin_adn_base")]
    pub master_mix_without_dna_base: f64,
    #[serde(rename = "vol_adn_total")]
    pub dna_total_volume: f64,
    pub factor_extra: f64,
}

// ============================
// Ligación nivel 1
// ============================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LigationL1Params {
    #[serde(rename = "tipo_ligacion")]
    pub ligation_type: String,
    #[serde(rename = "conc_fragmento")]
    pub fragment_conc: f64,
    #[serde(rename = "pb_fragmento")]
    pub fragment_bp: f64,
    #[serde(rename = "conc_plasmid1")]
    pub plasmid1_conc: f64,
    #[serde(rename = "pb_plasmid1")]
    pub plasmid1_bp: f64,
    #[serde(rename = "conc_plasmid2")]
    pub plasmid2_conc: f64,
    #[serde(rename = "pb_plasmid2")]
    pub plasmid2_bp: f64,
    #[serde(rename = "dilucion")]
    pub dilution: f64,
}

impl Default for LigationL1Params {
    fn default() -> Self {
        Self {
            ligation_type: "ligacion1".to_string(),
            fragment_conc: 139.7,
            fragment_bp: 164.0,
            plasmid1_conc: 146.9,
            plasmid1_bp: 4968.0,
            plasmid2_conc: 61.7,
            plasmid2_bp: 2323.0,
            dilution: 15.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LigationL1Input {
    #[serde(default, rename = "tipo_ligacion")]
    pub ligation_type: Option<String>,
    #[serde(default, rename = "conc_fragmento", deserialize_with = "coerce::number")]
    pub fragment_conc: Option<f64>,
    #[serde(default, rename = "pb_fragmento", deserialize_with = "coerce::number")]
    pub fragment_bp: Option<f64>,
    #[serde(default, rename = "conc_plasmid1", deserialize_with = "coerce::number")]
    pub plasmid1_conc: Option<f64>,
    #[serde(default, rename = "pb_plasmid1", deserialize_with = "coerce::number")]
    pub plasmid1_bp: Option<f64>,
    #[serde(default, rename = "conc_plasmid2", deserialize_with = "coerce::number")]
    pub plasmid2_conc: Option<f64>,
    #[serde(default, rename = "pb_plasmid2", deserialize_with = "coerce::number")]
    pub plasmid2_bp: Option<f64>,
    #[serde(default, rename = "dilucion", deserialize_with = "coerce::number")]
    pub dilution: Option<f64>,
}

impl LigationL1Input {
    pub fn resolve(self, defaults: &LigationL1Params) -> LigationL1Params {
        LigationL1Params {
            ligation_type: self
                .ligation_type
                .unwrap_or_else(|| defaults.ligation_type.clone()),
            fragment_conc: self.fragment_conc.unwrap_or(defaults.fragment_conc),
            fragment_bp: self.fragment_bp.unwrap_or(defaults.fragment_bp),
            plasmid1_conc: self.plasmid1_conc.unwrap_or(defaults.plasmid1_conc),
            plasmid1_bp: self.plasmid1_bp.unwrap_or(defaults.plasmid1_bp),
            plasmid2_conc: self.plasmid2_conc.unwrap_or(defaults.plasmid2_conc),
            plasmid2_bp: self.plasmid2_bp.unwrap_or(defaults.plasmid2_bp),
            dilution: self.dilution.unwrap_or(defaults.dilution),
        }
    }
}

/// Lista ordenada de ligaciones independientes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LigationBatchInput {
    #[serde(default, rename = "ligaciones")]
    pub entries: Vec<LigationL1Input>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LigationL1Result {
    #[serde(rename = "tipo_ligacion")]
    pub ligation_type: String,
    #[serde(rename = "agua")]
    pub water: f64,
    pub buffer_t4: f64,
    pub bsai: f64,
    #[serde(rename = "t4_ligasa")]
    pub t4_ligase: f64,
    #[serde(rename = "fragmento_pcr")]
    pub fragment_volume: f64,
    #[serde(rename = "plasmid1")]
    pub plasmid1_volume: f64,
    #[serde(rename = "plasmid2")]
    pub plasmid2_volume: f64,
    pub total: f64,
    #[serde(rename = "fmoles_fragmento")]
    pub fragment_fmol: f64,
    #[serde(rename = "fmoles_diluidos_fragmento")]
    pub diluted_fragment_fmol: f64,
    #[serde(rename = "fmoles_plasmid1")]
    pub plasmid1_fmol: f64,
    #[serde(rename = "fmoles_plasmid2")]
    pub plasmid2_fmol: f64,
    #[serde(rename = "dilucion")]
    pub dilution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LigationBatchResult {
    #[serde(rename = "ligaciones")]
    pub entries: Vec<LigationL1Result>,
}

// ============================
// Ligación nivel 2
// ============================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LigationL2Params {
    #[serde(rename = "num_guias")]
    pub num_guides: i64,
    #[serde(rename = "conc_plasmid1")]
    pub plasmid1_conc: f64,
    #[serde(rename = "pb_plasmid1")]
    pub plasmid1_bp: f64,
    #[serde(rename = "conc_plasmid2")]
    pub plasmid2_conc: f64,
    #[serde(rename = "pb_plasmid2")]
    pub plasmid2_bp: f64,
    #[serde(rename = "conc_guia")]
    pub guide_conc: f64,
    #[serde(rename = "pb_guia")]
    pub guide_bp: f64,
}

impl Default for LigationL2Params {
    fn default() -> Self {
        Self {
            num_guides: 1,
            plasmid1_conc: 132.2,
            plasmid1_bp: 6234.0,
            plasmid2_conc: 137.0,
            plasmid2_bp: 9623.0,
            guide_conc: 180.2,
            guide_bp: 4588.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LigationL2Input {
    #[serde(default, rename = "num_guias", deserialize_with = "coerce::integer")]
    pub num_guides: Option<i64>,
    #[serde(default, rename = "conc_plasmid1", deserialize_with = "coerce::number")]
    pub plasmid1_conc: Option<f64>,
    #[serde(default, rename = "pb_plasmid1", deserialize_with = "coerce::number")]
    pub plasmid1_bp: Option<f64>,
    #[serde(default, rename = "conc_plasmid2", deserialize_with = "coerce::number")]
    pub plasmid2_conc: Option<f64>,
    #[serde(default, rename = "pb_plasmid2", deserialize_with = "coerce::number")]
    pub plasmid2_bp: Option<f64>,
    #[serde(default, rename = "conc_guia", deserialize_with = "coerce::number")]
    pub guide_conc: Option<f64>,
    #[serde(default, rename = "pb_guia", deserialize_with = "coerce::number")]
    pub guide_bp: Option<f64>,
}

impl LigationL2Input {
    pub fn resolve(self, defaults: &LigationL2Params) -> LigationL2Params {
        LigationL2Params {
            num_guides: self.num_guides.unwrap_or(defaults.num_guides),
            plasmid1_conc: self.plasmid1_conc.unwrap_or(defaults.plasmid1_conc),
            plasmid1_bp: self.plasmid1_bp.unwrap_or(defaults.plasmid1_bp),
            plasmid2_conc: self.plasmid2_conc.unwrap_or(defaults.plasmid2_conc),
            plasmid2_bp: self.plasmid2_bp.unwrap_or(defaults.plasmid2_bp),
            guide_conc: self.guide_conc.unwrap_or(defaults.guide_conc),
            guide_bp: self.guide_bp.unwrap_or(defaults.guide_bp),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LigationL2Result {
    pub water: f64,
    pub buffer_t4: f64,
    pub bpii: f64,
    pub t4_ligase: f64,
    pub plasmid1_volume: f64,
    pub plasmid2_volume: f64,
    pub total_volume: f64,
    pub num_guides: i64,
    pub plasmid1_fmol: f64,
    pub plasmid2_fmol: f64,
    pub guide_fmol: f64,
    pub guide_volume: f64,
}

impl LigationL2Result {
    /// 每條 guide 的體積都相同，只是展示用的重複欄位
    pub fn guide_volumes(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        (1..=self.num_guides.max(0)).map(move |i| (format!("guia{}_vol", i), self.guide_volume))
    }
}

impl Serialize for LigationL2Result {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("agua", &self.water)?;
        map.serialize_entry("buffer_t4", &self.buffer_t4)?;
        map.serialize_entry("bpii", &self.bpii)?;
        map.serialize_entry("t4_ligasa", &self.t4_ligase)?;
        map.serialize_entry("plasmid1", &self.plasmid1_volume)?;
        map.serialize_entry("plasmid2", &self.plasmid2_volume)?;
        map.serialize_entry("volumen_total", &self.total_volume)?;
        map.serialize_entry("num_guias", &self.num_guides)?;
        map.serialize_entry("pmoles_plasmid1", &self.plasmid1_fmol)?;
        map.serialize_entry("pmoles_plasmid2", &self.plasmid2_fmol)?;
        map.serialize_entry("pmoles_guia", &self.guide_fmol)?;
        map.serialize_entry("vol_guia", &self.guide_volume)?;
        for (key, volume) in self.guide_volumes() {
            map.serialize_entry(&key, &volume)?;
        }
        map.end()
    }
}

// ============================
// Medios de cultivo
// ============================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediumParams {
    /// 原始標籤（任何 JSON 值）；不是已知字串標籤時產生空結果
    #[serde(rename = "tipo_medio")]
    pub medium_type: Value,
    #[serde(rename = "volumen_preparar")]
    pub volume_ml: f64,
}

impl Default for MediumParams {
    fn default() -> Self {
        Self {
            medium_type: Value::from("germinacion"),
            volume_ml: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediumInput {
    /// `Some(Value::Null)` when the key is sent as `null`
    #[serde(default, rename = "tipo_medio", deserialize_with = "coerce::raw")]
    pub medium_type: Option<Value>,
    #[serde(default, rename = "volumen_preparar", deserialize_with = "coerce::number")]
    pub volume_ml: Option<f64>,
}

impl MediumInput {
    pub fn resolve(self, defaults: &MediumParams) -> MediumParams {
        MediumParams {
            medium_type: self
                .medium_type
                .unwrap_or_else(|| defaults.medium_type.clone()),
            volume_ml: self.volume_ml.unwrap_or(defaults.volume_ml),
        }
    }
}

/// Amounts for one batch of medium. Fields a recipe does not use stay `None`
/// and are left out of the JSON; an unknown medium serialises as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediumResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h2o_ml: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ms_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sacarosa_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agar_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d24_ul: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinetina_ul: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tzeatina_ul: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meropenem_ul: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanamicina_ul: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iaa_ul: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
}

impl MediumResult {
    pub fn is_empty(&self) -> bool {
        *self == MediumResult::default()
    }
}
