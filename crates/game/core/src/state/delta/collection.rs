use std::collections::BTreeSet;

/// Additions and removals between two id-keyed collections.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionChanges {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl CollectionChanges {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Diffs two id sequences, keeping the order in which ids appear in `after`
/// for additions and in `before` for removals.
pub(super) fn diff_ids<'a>(
    before: impl Iterator<Item = &'a str>,
    after: impl Iterator<Item = &'a str>,
) -> CollectionChanges {
    let before: Vec<&str> = before.collect();
    let after: Vec<&str> = after.collect();
    let before_set: BTreeSet<&str> = before.iter().copied().collect();
    let after_set: BTreeSet<&str> = after.iter().copied().collect();

    CollectionChanges {
        added: after
            .iter()
            .filter(|id| !before_set.contains(*id))
            .map(|id| (*id).to_owned())
            .collect(),
        removed: before
            .iter()
            .filter(|id| !after_set.contains(*id))
            .map(|id| (*id).to_owned())
            .collect(),
    }
}
