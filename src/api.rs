use crate::bestiary::Bestiary;
use crate::error::EncounterError;
use crate::fdf;
use crate::filler::fill_fields;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The result of filling an encounter: the complete ordered field-value
/// list for one reference sheet. Provides the FDF rendering for form
/// population plus JSON/YAML exports for inspection.
#[derive(Debug)]
pub struct EncounterSheet {
    fields: Vec<(String, String)>,
}

impl Serialize for EncounterSheet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Emitted entry by entry to preserve field order; duplicate keys
        // (the doubled to-hit field) stay duplicated, and consumers apply
        // last-write-wins just like the form does.
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl EncounterSheet {
    /// The flat `(field name, value)` sequence, in emission order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Renders the sheet as an FDF document ready to be loaded into the
    /// fillable form.
    #[must_use]
    pub fn to_fdf(&self) -> String {
        fdf::to_fdf(&self.fields)
    }

    /// Serializes the field list into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Serializes the field list into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }
}

/// Fills an encounter sheet from an ordered list of `(monster name, count)`
/// requests resolved against the bestiary.
///
/// This is the primary entry point. Per-monster fields appear in request
/// order, each monster's attacks in the monster's resolved order, and the
/// aggregate `encounter_xp` field last.
///
/// # Errors
///
/// Returns an `EncounterError` and no partial sheet if any name is unknown
/// or any record carries an unknown challenge rating.
pub fn fill(bestiary: &Bestiary, requests: &[(&str, u32)]) -> Result<EncounterSheet, EncounterError> {
    let fields = fill_fields(bestiary, requests)?;
    Ok(EncounterSheet { fields })
}
