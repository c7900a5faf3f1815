use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use nurseflow_core::{all_vitals, BandRule, VitalSign};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct VitalSummary {
    key: &'static str,
    name: &'static str,
    unit: &'static str,
}

#[derive(Serialize)]
pub struct VitalDetail {
    key: &'static str,
    name: &'static str,
    unit: &'static str,
    /// Evaluated in order; the first matching band applies.
    bands: &'static [BandRule],
}

pub async fn list_vitals() -> Json<Vec<VitalSummary>> {
    let vitals = all_vitals()
        .iter()
        .map(|v| VitalSummary {
            key: v.key(),
            name: v.name(),
            unit: v.unit(),
        })
        .collect();
    Json(vitals)
}

pub async fn get_vital_detail(Path(key): Path<String>) -> Result<Json<VitalDetail>, ApiError> {
    let vital: VitalSign = key.parse()?;

    Ok(Json(VitalDetail {
        key: vital.key(),
        name: vital.name(),
        unit: vital.unit(),
        bands: vital.bands(),
    }))
}
