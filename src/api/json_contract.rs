use serde::{Deserialize, Serialize};

use crate::error::{GazeError, GazeResult};

use super::VizConfig;

pub const VIZ_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: VizConfig,
}

impl VizConfig {
    /// Plain JSON form of the config.
    pub fn to_json_pretty(&self) -> GazeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GazeError::InvalidData(format!("failed to serialize config json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> GazeResult<String> {
        let payload = VizConfigJsonContractV1 {
            schema_version: VIZ_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GazeError::InvalidData(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Parses a versioned contract document or, failing that, a plain config;
    /// the result is validated either way.
    pub fn from_json_str(input: &str) -> GazeResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| GazeError::InvalidData(format!("failed to parse config json: {e}")))?;

        let config = if value.get("schema_version").is_some() {
            let payload: VizConfigJsonContractV1 = serde_json::from_value(value).map_err(|e| {
                GazeError::InvalidData(format!("failed to parse config contract payload: {e}"))
            })?;
            if payload.schema_version != VIZ_CONFIG_JSON_SCHEMA_V1 {
                return Err(GazeError::InvalidData(format!(
                    "unsupported config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value)
                .map_err(|e| GazeError::InvalidData(format!("failed to parse config json: {e}")))?
        };

        config.validate()
    }
}
