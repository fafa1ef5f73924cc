//! Feature records and batches.

use std::io;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::features::{Feature, FeatureValue};

/// All twenty features of one document, in output order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    prefix: String,
    values: Vec<(Feature, FeatureValue)>,
}

impl FeatureRecord {
    /// Assemble a record; features missing from `values` are set to `Int(0)`.
    pub fn new(prefix: impl Into<String>, values: impl IntoIterator<Item = (Feature, FeatureValue)>) -> Self {
        let mut slots: Vec<(Feature, FeatureValue)> = Feature::ALL
            .iter()
            .map(|&feature| (feature, FeatureValue::Int(0)))
            .collect();
        for (feature, value) in values {
            if let Some(slot) = slots.iter_mut().find(|(f, _)| *f == feature) {
                slot.1 = value;
            }
        }
        FeatureRecord {
            prefix: prefix.into(),
            values: slots,
        }
    }

    /// Every feature at integer zero.
    pub fn zeros(prefix: impl Into<String>) -> Self {
        Self::new(prefix, std::iter::empty())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn value(&self, feature: Feature) -> FeatureValue {
        self.values
            .iter()
            .find(|(f, _)| *f == feature)
            .map_or(FeatureValue::Int(0), |(_, value)| *value)
    }

    /// Look up by output key, with or without the prefix.
    pub fn get(&self, key: &str) -> Option<FeatureValue> {
        let name = key.strip_prefix(self.prefix.as_str()).unwrap_or(key);
        Feature::from_name(name)
            .or_else(|| Feature::from_name(key))
            .map(|feature| self.value(feature))
    }

    /// Prefixed keys in output order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.values
            .iter()
            .map(move |(feature, _)| format!("{}{}", self.prefix, feature.name()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, FeatureValue)> + '_ {
        self.keys().zip(self.values.iter().map(|(_, value)| *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.keys().map(|key| key.len()).max().unwrap_or(0);
        for (idx, (key, value)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{:width$}  {}", key, value, width = width)?;
        }
        Ok(())
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&key, &value)?;
        }
        map.end()
    }
}

/// Records for many documents, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBatch {
    prefix: String,
    records: Vec<FeatureRecord>,
}

impl FeatureBatch {
    pub fn new(prefix: impl Into<String>, records: Vec<FeatureRecord>) -> Self {
        FeatureBatch {
            prefix: prefix.into(),
            records,
        }
    }

    /// Column headers: the prefixed feature keys.
    pub fn columns(&self) -> Vec<String> {
        Feature::ALL
            .iter()
            .map(|feature| format!("{}{}", self.prefix, feature.name()))
            .collect()
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FeatureRecord> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One column of the table.
    pub fn column(&self, feature: Feature) -> Vec<FeatureValue> {
        self.records.iter().map(|record| record.value(feature)).collect()
    }

    /// Write the table as CSV: a header row, then one row per document.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(self.columns())?;
        for record in &self.records {
            out.write_record(record.values.iter().map(|(_, value)| value.to_string()))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FeatureBatch {
    type Item = &'a FeatureRecord;
    type IntoIter = std::slice::Iter<'a, FeatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for FeatureBatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}
