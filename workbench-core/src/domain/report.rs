// workbench-core/src/domain/report.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonCompliantRow {
    /// 1-based position in the dataset.
    pub row_number: usize,
    /// Violation messages joined by `"; "`.
    pub reason: String,
    pub row_data: Vec<String>,
}

/// Outcome of one validation pass. Rebuilt from scratch on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComplianceReport {
    pub total_rows: usize,
    pub compliant_count: usize,
    pub non_compliant_count: usize,
    pub non_compliant_rows: Vec<NonCompliantRow>,
}

impl ComplianceReport {
    pub fn is_clean(&self) -> bool {
        self.non_compliant_count == 0
    }

    /// Percentage of compliant rows, two decimals. 0 for an empty dataset.
    pub fn compliance_rate(&self) -> f64 {
        percentage(self.compliant_count, self.total_rows)
    }

    /// Percentage of non-compliant rows, two decimals. 0 for an empty dataset.
    pub fn non_compliance_rate(&self) -> f64 {
        percentage(self.non_compliant_count, self.total_rows)
    }

    pub fn find(&self, row_number: usize) -> Option<&NonCompliantRow> {
        self.non_compliant_rows
            .iter()
            .find(|r| r.row_number == row_number)
    }
}

/// `part / whole * 100` rounded to two decimals, 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 5), 100.0);
    }

    #[test]
    fn test_rates_on_empty_report() {
        let report = ComplianceReport::default();
        assert!(report.is_clean());
        assert_eq!(report.compliance_rate(), 0.0);
        assert_eq!(report.non_compliance_rate(), 0.0);
    }
}
