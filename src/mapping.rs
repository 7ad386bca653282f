// src/mapping.rs
use chrono::NaiveDate;
use serde::Serialize;

use crate::extractors::record::ReservoirRecord;

/// The narrow shape consumed by the reservoir database update job.
#[derive(Debug, Clone, Serialize)]
pub struct ReservoirUpdate {
    pub id: i64,
    pub nombre: String,
    #[serde(rename = "aguaActualSAIH")]
    pub agua_actual_saih: f64,
    #[serde(rename = "fechaMedidaSAIH")]
    pub fecha_medida_saih: String,
}

impl ReservoirUpdate {
    pub fn from_record(record: &ReservoirRecord, measured_on: NaiveDate) -> Self {
        Self {
            id: record.id,
            nombre: record.name.clone(),
            agua_actual_saih: record.volume_current_hm3,
            fecha_medida_saih: measured_on.format("%Y-%m-%d").to_string(),
        }
    }
}

pub fn to_updates(records: &[ReservoirRecord], measured_on: NaiveDate) -> Vec<ReservoirUpdate> {
    records
        .iter()
        .map(|record| ReservoirUpdate::from_record(record, measured_on))
        .collect()
}
