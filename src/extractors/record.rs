// src/extractors/record.rs
use serde::Serialize;

use crate::extractors::classify::MIN_DATA_CELLS;
use crate::extractors::numeric::{parse_leading_int, parse_locale_number};
use crate::extractors::table::TableRow;

/// One reservoir's measurements as published on the status page.
///
/// Numeric fields are `NaN` when the source cell was blank, a placeholder
/// or unreadable; they serialize as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservoirRecord {
    pub id: i64,
    pub name: String,
    pub section_name: String,
    pub current_percentage: f64,
    pub total_capacity_hm3: f64,
    pub accumulated_today_mm: f64,
    pub volume_current_hm3: f64,
    pub accumulated_last_week_mm: f64,
    pub volume_last_week_hm3: f64,
    pub accumulated_last_year_mm: f64,
    pub volume_last_year_hm3: f64,
    pub chart_reference: Option<String>,
}

// NaN != NaN, so compare numeric fields bitwise: identical extractions must compare equal.
impl PartialEq for ReservoirRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.section_name == other.section_name
            && self
                .measurements()
                .iter()
                .zip(other.measurements().iter())
                .all(|(a, b)| a.to_bits() == b.to_bits())
            && self.chart_reference == other.chart_reference
    }
}

impl ReservoirRecord {
    /// The eight numeric fields in column order.
    pub fn measurements(&self) -> [f64; 8] {
        [
            self.current_percentage,
            self.total_capacity_hm3,
            self.accumulated_today_mm,
            self.volume_current_hm3,
            self.accumulated_last_week_mm,
            self.volume_last_week_hm3,
            self.accumulated_last_year_mm,
            self.volume_last_year_hm3,
        ]
    }
}

/// Builds a record from a data row's cells, in column order:
/// id, name, eight measurements, then the optional chart reference.
///
/// Returns `None` when the row is too short or its id is not numeric.
pub fn build_record(row: &TableRow, section_name: &str) -> Option<ReservoirRecord> {
    let cells = &row.cells;
    if cells.len() < MIN_DATA_CELLS {
        tracing::warn!("Rejecting row with {} cells (need {})", cells.len(), MIN_DATA_CELLS);
        return None;
    }

    let Some(id) = parse_leading_int(&cells[0]) else {
        tracing::warn!("Rejecting row in '{}': identifier '{}' is not numeric", section_name, cells[0]);
        return None;
    };

    let num = |i: usize| parse_locale_number(&cells[i]);

    Some(ReservoirRecord {
        id,
        name: cells[1].clone(),
        section_name: section_name.to_string(),
        current_percentage: num(2),
        total_capacity_hm3: num(3),
        accumulated_today_mm: num(4),
        volume_current_hm3: num(5),
        accumulated_last_week_mm: num(6),
        volume_last_week_hm3: num(7),
        accumulated_last_year_mm: num(8),
        volume_last_year_hm3: num(9),
        chart_reference: cells.get(10).cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> TableRow {
        TableRow::cells(cells.iter().copied())
    }

    #[test]
    fn test_full_row() {
        let r = row(&[
            "58", "EMBALSE DE BENINAR", "14,2", "68,00", "0,0", "9,86", "0,0", "9,90", "1,2", "12,01",
            "grafico?id=58",
        ]);
        let rec = build_record(&r, "ALMERÍA").unwrap();
        assert_eq!(rec.id, 58);
        assert_eq!(rec.name, "EMBALSE DE BENINAR");
        assert_eq!(rec.section_name, "ALMERÍA");
        assert_eq!(rec.current_percentage, 14.2);
        assert_eq!(rec.total_capacity_hm3, 68.0);
        assert_eq!(rec.volume_current_hm3, 9.86);
        assert_eq!(rec.volume_last_week_hm3, 9.9);
        assert_eq!(rec.accumulated_last_year_mm, 1.2);
        assert_eq!(rec.volume_last_year_hm3, 12.01);
        assert_eq!(rec.chart_reference.as_deref(), Some("grafico?id=58"));
    }

    #[test]
    fn test_ten_cells_has_no_chart_reference() {
        let r = row(&["3", "EMBALSE DE CHARCO REDONDO", "1", "2", "3", "4", "5", "6", "7", "8"]);
        let rec = build_record(&r, "CÁDIZ").unwrap();
        assert_eq!(rec.chart_reference, None);
        assert_eq!(rec.measurements(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_missing_readings_do_not_reject_row() {
        let r = row(&["373", "EMBALSE DE PIEDRAS", "n/d", "*", "", "n/d", "x", "1,5", "*", "*"]);
        let rec = build_record(&r, "HUELVA").unwrap();
        assert_eq!(rec.id, 373);
        assert!(rec.current_percentage.is_nan());
        assert!(rec.volume_current_hm3.is_nan());
        assert!(rec.accumulated_last_week_mm.is_nan());
        assert_eq!(rec.volume_last_week_hm3, 1.5);
    }

    #[test]
    fn test_short_row_rejected() {
        let r = row(&["1", "A", "1", "2", "3", "4", "5", "6", "7"]);
        assert!(build_record(&r, "X").is_none());
    }

    #[test]
    fn test_non_numeric_id_rejected() {
        let r = row(&["Nº", "Embalse", "1", "2", "3", "4", "5", "6", "7", "8"]);
        assert!(build_record(&r, "X").is_none());
    }

    #[test]
    fn test_name_spacing_kept() {
        let r = row(&["29", "EMBALSE DEL  GUADALTEBA", "1", "2", "3", "4", "5", "6", "7", "8"]);
        assert_eq!(build_record(&r, "MÁLAGA").unwrap().name, "EMBALSE DEL  GUADALTEBA");
    }

    #[test]
    fn test_nan_fields_serialize_as_null() {
        let r = row(&["1", "A", "n/d", "2", "3", "4", "5", "6", "7", "8"]);
        let json = serde_json::to_value(build_record(&r, "S").unwrap()).unwrap();
        assert!(json["currentPercentage"].is_null());
        assert_eq!(json["totalCapacityHm3"], 2.0);
        assert_eq!(json["sectionName"], "S");
        assert!(json["chartReference"].is_null());
    }

    #[test]
    fn test_records_with_nan_compare_equal() {
        let r = row(&["1", "A", "n/d", "2", "3", "4", "5", "6", "7", "8"]);
        assert_eq!(build_record(&r, "S"), build_record(&r, "S"));
    }
}
