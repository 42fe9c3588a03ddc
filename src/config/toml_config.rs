use crate::domain::model::{
    DreamTaqParams, LigationL1Params, LigationL2Params, MediumParams, PcrInitialParams,
};
use crate::utils::error::{MixError, Result};
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// 每個計算的預設輸入值；檔案中未列出的欄位沿用內建值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    #[serde(rename = "pcr_inicial")]
    pub pcr_initial: PcrInitialParams,
    pub pcr_dream_taq: DreamTaqParams,
    #[serde(rename = "lv1")]
    pub ligation_level1: LigationL1Params,
    #[serde(rename = "lv2")]
    pub ligation_level2: LigationL2Params,
    #[serde(rename = "medios")]
    pub culture_medium: MediumParams,
}

/// Largest guide count accepted as a configured default.
pub const MAX_DEFAULT_GUIDES: i64 = 96;

impl DefaultsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MixError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MixError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PCR_REACTIONS})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 載入檔案（若有），否則使用內建預設值
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                tracing::info!("Loading defaults from: {}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for DefaultsConfig {
    fn validate(&self) -> Result<()> {
        let numbers = [
            ("pcr_inicial.num_reacciones", self.pcr_initial.num_reactions),
            ("pcr_inicial.volumen_adn", self.pcr_initial.dna_volume),
            ("pcr_inicial.porcentaje_extra", self.pcr_initial.extra_pct),
            ("pcr_dream_taq.num_reacciones", self.pcr_dream_taq.num_reactions),
            ("pcr_dream_taq.porcentaje_extra", self.pcr_dream_taq.extra_pct),
            ("lv1.conc_fragmento", self.ligation_level1.fragment_conc),
            ("lv1.pb_fragmento", self.ligation_level1.fragment_bp),
            ("lv1.conc_plasmid1", self.ligation_level1.plasmid1_conc),
            ("lv1.pb_plasmid1", self.ligation_level1.plasmid1_bp),
            ("lv1.conc_plasmid2", self.ligation_level1.plasmid2_conc),
            ("lv1.pb_plasmid2", self.ligation_level1.plasmid2_bp),
            ("lv1.dilucion", self.ligation_level1.dilution),
            ("lv2.conc_plasmid1", self.ligation_level2.plasmid1_conc),
            ("lv2.pb_plasmid1", self.ligation_level2.plasmid1_bp),
            ("lv2.conc_plasmid2", self.ligation_level2.plasmid2_conc),
            ("lv2.pb_plasmid2", self.ligation_level2.plasmid2_bp),
            ("lv2.conc_guia", self.ligation_level2.guide_conc),
            ("lv2.pb_guia", self.ligation_level2.guide_bp),
            ("medios.volumen_preparar", self.culture_medium.volume_ml),
        ];
        for (field, value) in numbers {
            validate_finite(field, value)?;
        }

        validate_range(
            "lv2.num_guias",
            self.ligation_level2.num_guides,
            0,
            MAX_DEFAULT_GUIDES,
        )?;
        validate_non_empty_string("lv1.tipo_ligacion", &self.ligation_level1.ligation_type)?;
        match self.culture_medium.medium_type.as_str() {
            Some(tag) => validate_non_empty_string("medios.tipo_medio", tag)?,
            None => {
                return Err(MixError::ValidationError {
                    field: "medios.tipo_medio".to_string(),
                    value: self.culture_medium.medium_type.to_string(),
                    reason: "Default medium type must be a string".to_string(),
                })
            }
        }

        Ok(())
    }
}
