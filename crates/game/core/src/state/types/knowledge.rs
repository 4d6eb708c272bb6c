//! Knowledge codex: entries unlocked as a side effect of solving puzzles.

/// A codex entry. `found` flips to `true` at most once per session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnowledgeRecord {
    pub id: String,
    pub title: String,
    pub title_vi: String,
    pub content: String,
    pub content_vi: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub found: bool,
}

impl KnowledgeRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            title_vi: String::new(),
            content: String::new(),
            content_vi: String::new(),
            found: false,
        }
    }
}

/// The full codex plus the entry currently shown in the knowledge panel.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnowledgeState {
    records: Vec<KnowledgeRecord>,
    selected: Option<String>,
}

impl KnowledgeState {
    /// Builds the codex from a catalog.
    ///
    /// Every entry starts undiscovered; duplicate ids keep their first occurrence.
    pub fn from_catalog(catalog: impl IntoIterator<Item = KnowledgeRecord>) -> Self {
        let mut records: Vec<KnowledgeRecord> = Vec::new();
        for mut record in catalog {
            if records.iter().any(|existing| existing.id == record.id) {
                continue;
            }
            record.found = false;
            records.push(record);
        }
        Self {
            records,
            selected: None,
        }
    }

    pub fn records(&self) -> &[KnowledgeRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&KnowledgeRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn is_found(&self, id: &str) -> bool {
        self.get(id).is_some_and(|record| record.found)
    }

    pub fn found_count(&self) -> usize {
        self.records.iter().filter(|record| record.found).count()
    }

    pub fn found_ids(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|record| record.found)
            .map(|record| record.id.as_str())
    }

    /// Entry shown in the knowledge panel.
    pub fn selected(&self) -> Option<&KnowledgeRecord> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Marks `id` as found. Returns `true` only on the first discovery.
    pub fn mark_found(&mut self, id: &str) -> bool {
        match self.records.iter_mut().find(|record| record.id == id) {
            Some(record) if !record.found => {
                record.found = true;
                true
            }
            _ => false,
        }
    }

    /// Points the panel at a known entry, or clears it. Unknown ids are ignored.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        let next = match id {
            Some(id) if self.get(id).is_some() => Some(id.to_owned()),
            Some(_) => return false,
            None => None,
        };
        if self.selected == next {
            return false;
        }
        self.selected = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codex() -> KnowledgeState {
        KnowledgeState::from_catalog([
            KnowledgeRecord::new("manifesto", "The Communist Manifesto"),
            KnowledgeRecord::new("objective", "Objective Conditions"),
        ])
    }

    #[test]
    fn catalog_entries_start_undiscovered() {
        let mut preset = KnowledgeRecord::new("fpt", "FPT Spirit");
        preset.found = true;
        let state = KnowledgeState::from_catalog([preset.clone(), preset]);

        assert_eq!(state.records().len(), 1);
        assert_eq!(state.found_count(), 0);
    }

    #[test]
    fn mark_found_flips_once() {
        let mut state = codex();
        assert!(state.mark_found("manifesto"));
        assert!(!state.mark_found("manifesto"));
        assert!(!state.mark_found("unknown"));
        assert_eq!(state.found_count(), 1);
    }

    #[test]
    fn selection_only_points_at_known_entries() {
        let mut state = codex();
        assert!(state.select(Some("objective")));
        assert!(!state.select(Some("missing")));
        assert_eq!(state.selected().map(|r| r.id.as_str()), Some("objective"));
        assert!(state.select(None));
        assert!(state.selected().is_none());
    }
}
