use crate::class::types::ClassScanStats;

impl ClassScanStats {
    /// Count a token rejected by the named rule
    pub fn record_rejection(&mut self, rule: &str) {
        self.rejected_candidates += 1;
        *self.rejections_by_rule.entry(rule.to_string()).or_insert(0) += 1;
    }

    /// Percentage of files that were read successfully
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }

        let successful = self.total_files - self.error_files;
        (successful as f64 / self.total_files as f64) * 100.0
    }

    /// Share of candidates that made it through the filter
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_candidates == 0 {
            return 0.0;
        }

        let accepted = self.total_candidates - self.rejected_candidates;
        (accepted as f64 / self.total_candidates as f64) * 100.0
    }
}
