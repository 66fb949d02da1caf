use crate::index::models::{
    owning_scope, Entry, Locator, MalformedEntryError, MalformedKind, Record, Reference,
};
use std::collections::BTreeMap;

/// Immutable symbol table. Built once from a static dataset, read-only
/// afterwards, so it can be shared freely without synchronization.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    entries: Vec<Entry>,
    /// Entry positions sorted by key, same-key runs in insertion order.
    order: Vec<usize>,
}

impl SymbolIndex {
    /// Validate and index a dataset. Entry order is preserved as supplied;
    /// keys may repeat across entries (later entries sort after earlier ones
    /// with the same key).
    pub fn load(entries: Vec<Entry>) -> Result<SymbolIndex, MalformedEntryError> {
        for (pos, entry) in entries.iter().enumerate() {
            if entry.references.is_empty() {
                return Err(MalformedEntryError {
                    entry: pos,
                    key: entry.key.clone(),
                    kind: MalformedKind::NoReferences,
                });
            }
            for (ref_pos, reference) in entry.references.iter().enumerate() {
                if reference.locator.is_empty() {
                    return Err(MalformedEntryError {
                        entry: pos,
                        key: entry.key.clone(),
                        kind: MalformedKind::EmptyLocator { reference: ref_pos },
                    });
                }
            }
        }

        let mut order: Vec<usize> = (0..entries.len()).collect();
        // Stable sort keeps insertion order inside each equal-key run.
        order.sort_by(|&a, &b| entries[a].key.cmp(&entries[b].key));
        Ok(SymbolIndex { entries, order })
    }

    /// Group flat wire records into entries (first occurrence of a key fixes
    /// entry order, later records with the same key append references) and load.
    pub fn from_records(records: Vec<Record>) -> Result<SymbolIndex, MalformedEntryError> {
        let mut entries: Vec<Entry> = Vec::new();
        let mut slots: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            let reference = Reference {
                scope: owning_scope(&record.label, &record.key),
                locator: Locator::parse(&record.locator),
                label: record.label,
            };
            match slots.get(&record.key) {
                Some(&slot) => entries[slot].references.push(reference),
                None => {
                    slots.insert(record.key.clone(), entries.len());
                    entries.push(Entry {
                        key: record.key,
                        references: vec![reference],
                    });
                }
            }
        }
        SymbolIndex::load(entries)
    }

    /// All references for an exact key, in original order. Entries sharing the
    /// key contribute in insertion order. Absent keys yield an empty vec.
    pub fn lookup_exact(&self, key: &str) -> Vec<&Reference> {
        let start = self
            .order
            .partition_point(|&i| self.entries[i].key.as_str() < key);
        self.order[start..]
            .iter()
            .take_while(|&&i| self.entries[i].key == key)
            .flat_map(|&i| self.entries[i].references.iter())
            .collect()
    }

    /// Every reference of every entry whose key starts with `prefix`, ordered
    /// lexicographically by key with insertion-order tie-break. The empty
    /// prefix returns the whole dataset.
    pub fn lookup_prefix(&self, prefix: &str) -> Vec<(&str, &Reference)> {
        let start = self
            .order
            .partition_point(|&i| self.entries[i].key.as_str() < prefix);
        self.order[start..]
            .iter()
            .take_while(|&&i| self.entries[i].key.starts_with(prefix))
            .flat_map(|&i| {
                let entry = &self.entries[i];
                entry
                    .references
                    .iter()
                    .map(move |r| (entry.key.as_str(), r))
            })
            .collect()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reference_count(&self) -> usize {
        self.entries.iter().map(|e| e.references.len()).sum()
    }

    /// Distinct owning scopes with reference counts, scope-sorted. References
    /// without a scope are grouped under the empty string by callers' choice;
    /// here they are simply skipped.
    pub fn scopes(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in &self.entries {
            for reference in &entry.references {
                if let Some(scope) = reference.scope.as_deref() {
                    *counts.entry(scope).or_insert(0) += 1;
                }
            }
        }
        counts
            .into_iter()
            .map(|(scope, n)| (scope.to_string(), n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(key: &str, label: &str, locator: &str) -> Reference {
        Reference {
            label: label.to_string(),
            locator: Locator::parse(locator),
            scope: owning_scope(label, key),
        }
    }

    fn entry(key: &str, refs: &[(&str, &str)]) -> Entry {
        Entry {
            key: key.to_string(),
            references: refs.iter().map(|(l, t)| reference(key, l, t)).collect(),
        }
    }

    fn sample() -> SymbolIndex {
        SymbolIndex::load(vec![
            entry(
                "setOrbit",
                &[
                    ("AstroLib::Orbit::setOrbit()", "class_orbit.html#a01"),
                    (
                        "AstroLib::Orbit::setOrbit(double, double)",
                        "class_orbit.html#a02",
                    ),
                ],
            ),
            entry(
                "setJulianDate",
                &[("AstroLib::JulianDate::setJulianDate()", "class_jd.html#a03")],
            ),
            entry("SunSensor", &[("SunSensor", "class_sun_sensor.html")]),
        ])
        .unwrap()
    }

    #[test]
    fn exact_lookup_preserves_overload_order() {
        let index = sample();
        let refs = index.lookup_exact("setOrbit");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].label, "AstroLib::Orbit::setOrbit()");
        assert_eq!(refs[0].locator.to_string(), "class_orbit.html#a01");
        assert_eq!(refs[1].locator.to_string(), "class_orbit.html#a02");
    }

    #[test]
    fn exact_lookup_missing_key_is_empty_not_error() {
        let index = sample();
        assert!(index.lookup_exact("missing").is_empty());
    }

    #[test]
    fn exact_lookup_is_case_sensitive() {
        let index = sample();
        assert_eq!(index.lookup_exact("SunSensor").len(), 1);
        assert!(index.lookup_exact("sunsensor").is_empty());
    }

    #[test]
    fn empty_prefix_returns_every_reference_once() {
        let index = sample();
        let all = index.lookup_prefix("");
        assert_eq!(all.len(), index.reference_count());
        // Lexicographic by key: SunSensor < setJulianDate < setOrbit (ASCII).
        assert_eq!(all[0].0, "SunSensor");
        assert_eq!(all[1].0, "setJulianDate");
        assert_eq!(all[2].0, "setOrbit");
        assert_eq!(all[3].0, "setOrbit");
    }

    #[test]
    fn prefix_lookup_is_monotonic() {
        let index = sample();
        let hits = index.lookup_prefix("set");
        assert!(hits.iter().all(|(k, _)| k.starts_with("set")));
        let expected: usize = index
            .entries()
            .iter()
            .filter(|e| e.key.starts_with("set"))
            .map(|e| e.references.len())
            .sum();
        assert_eq!(hits.len(), expected);
    }

    #[test]
    fn duplicate_keys_across_entries_keep_insertion_order() {
        let index = SymbolIndex::load(vec![
            entry("update", &[("Matrix::update()", "class_matrix.html#a1")]),
            entry("size", &[("Matrix::size()", "class_matrix.html#a2")]),
            entry("update", &[("Filters::update()", "class_filters.html#a3")]),
        ])
        .unwrap();
        let refs = index.lookup_exact("update");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].label, "Matrix::update()");
        assert_eq!(refs[1].label, "Filters::update()");

        let hits = index.lookup_prefix("up");
        assert_eq!(hits[0].1.label, "Matrix::update()");
        assert_eq!(hits[1].1.label, "Filters::update()");
    }

    #[test]
    fn zero_reference_entry_is_malformed() {
        let err = SymbolIndex::load(vec![Entry {
            key: "getQuaternion".to_string(),
            references: Vec::new(),
        }])
        .unwrap_err();
        assert_eq!(err.entry, 0);
        assert_eq!(err.key, "getQuaternion");
        assert_eq!(err.kind, MalformedKind::NoReferences);
    }

    #[test]
    fn empty_locator_is_malformed() {
        let err = SymbolIndex::load(vec![
            entry("sum", &[("Matrix::sum()", "class_matrix.html#a9")]),
            entry("trace", &[("Matrix::trace()", "")]),
        ])
        .unwrap_err();
        assert_eq!(err.entry, 1);
        assert_eq!(err.kind, MalformedKind::EmptyLocator { reference: 0 });
    }

    #[test]
    fn records_group_by_key_in_first_occurrence_order() {
        let index = SymbolIndex::from_records(vec![
            Record {
                key: "setOrbit".to_string(),
                label: "AstroLib::Orbit::setOrbit()".to_string(),
                locator: "class_orbit.html#a01".to_string(),
            },
            Record {
                key: "getRADEC".to_string(),
                label: "AstroLib::Orbit::getRADEC()".to_string(),
                locator: "class_orbit.html#a05".to_string(),
            },
            Record {
                key: "setOrbit".to_string(),
                label: "AstroLib::Orbit::setOrbit(double, double)".to_string(),
                locator: "class_orbit.html#a02".to_string(),
            },
        ])
        .unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.entries()[0].key, "setOrbit");
        assert_eq!(index.entries()[0].references.len(), 2);
        assert_eq!(
            index.entries()[0].references[1].locator.to_string(),
            "class_orbit.html#a02"
        );
        assert_eq!(
            index.entries()[0].references[0].scope.as_deref(),
            Some("AstroLib::Orbit")
        );
    }

    #[test]
    fn single_match_owner_label_keeps_full_scope() {
        // Doxygen emits the owner alone as the label when a key has one match.
        let index = SymbolIndex::from_records(vec![
            Record {
                key: "setDay".to_string(),
                label: "AstroLib::JulianDate".to_string(),
                locator: "../class_astro_lib_1_1_julian_date.html#a016".to_string(),
            },
            Record {
                key: "setOrbit".to_string(),
                label: "AstroLib::Orbit::setOrbit()".to_string(),
                locator: "../class_astro_lib_1_1_orbit.html#a3f2c".to_string(),
            },
        ])
        .unwrap();
        let refs = index.lookup_exact("setDay");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].scope.as_deref(), Some("AstroLib::JulianDate"));
        assert_eq!(
            index.lookup_exact("setOrbit")[0].scope.as_deref(),
            Some("AstroLib::Orbit")
        );
        assert_eq!(
            index.scopes(),
            vec![
                ("AstroLib::JulianDate".to_string(), 1),
                ("AstroLib::Orbit".to_string(), 1),
            ]
        );
    }

    #[test]
    fn scopes_counts_references_per_owner() {
        let index = sample();
        let scopes = index.scopes();
        assert_eq!(
            scopes,
            vec![
                ("AstroLib::JulianDate".to_string(), 1),
                ("AstroLib::Orbit".to_string(), 2),
            ]
        );
    }
}
