//! Chart records and the versioned frame the host keeps them in.

use serde::{Deserialize, Serialize};

/// One column of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Value, expected in `[0, ceiling]`
    pub y: f64,
    /// Category ordinal, sent back on click
    pub x: f64,
    /// Category name shown under the column
    pub label: String,
    /// Display value shown above the column
    pub value_label: String,
}

impl Record {
    pub fn new(y: f64, x: f64, label: impl Into<String>, value_label: impl Into<String>) -> Self {
        Self {
            y,
            x,
            label: label.into(),
            value_label: value_label.into(),
        }
    }
}

/// The preview frame: four months with percentage labels.
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new(0.5, 1.0, "jan", "50%"),
        Record::new(0.2, 2.0, "feb", "20%"),
        Record::new(0.3, 4.0, "mar", "30%"),
        Record::new(0.4, 5.0, "apr", "40%"),
    ]
}

/// Record sequence with a version that moves on every change.
///
/// Hosts compare the version with the one they last rendered to decide whether to render again.
#[derive(Debug, Clone, Default)]
pub struct RecordFrame {
    records: Vec<Record>,
    version: u64,
}

impl RecordFrame {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            version: 1,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
        self.bump();
    }

    pub fn reverse(&mut self) {
        self.records.reverse();
        self.bump();
    }

    pub fn rotate_left(&mut self) {
        if !self.records.is_empty() {
            self.records.rotate_left(1);
        }
        self.bump();
    }

    /// Keep the first `len` records.
    pub fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
        self.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_change_bumps_version() {
        let mut frame = RecordFrame::new(sample_records());
        let start = frame.version();

        frame.reverse();
        assert_eq!(frame.records()[0].label, "apr");
        frame.rotate_left();
        assert_eq!(frame.records()[0].label, "mar");
        frame.truncate(2);
        assert_eq!(frame.len(), 2);
        frame.replace(sample_records());
        assert_eq!(frame.version(), start + 4);
    }

    #[test]
    fn rotating_an_empty_frame_is_harmless() {
        let mut frame = RecordFrame::default();
        frame.rotate_left();
        assert!(frame.is_empty());
        assert_eq!(frame.version(), 1);
    }

    #[test]
    fn records_deserialize_from_json() {
        let record: Record =
            serde_json::from_str(r#"{"y":0.5,"x":1,"label":"jan","value_label":"50%"}"#).unwrap();
        assert_eq!(record, sample_records()[0]);
    }
}
