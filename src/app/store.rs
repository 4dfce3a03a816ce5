//! The authoritative in-memory member list.

use std::collections::{BTreeSet, HashSet};
use tracing::warn;

use crate::source::{MemberId, MemberRecord};

/// Field-wise update; `None` leaves the stored value alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Ordered member records, unique by id.
#[derive(Clone, Debug, Default)]
pub struct MemberStore {
    records: Vec<MemberRecord>,
}

impl MemberStore {
    /// Empty store; filled by `load` once the fetch returns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents wholesale. Later duplicates of an id are dropped.
    pub fn load(&mut self, records: Vec<MemberRecord>) {
        let mut seen = HashSet::with_capacity(records.len());
        self.records = records
            .into_iter()
            .filter(|m| {
                let fresh = seen.insert(m.id.clone());
                if !fresh {
                    warn!(id = %m.id, "dropping duplicate member id");
                }
                fresh
            })
            .collect();
    }

    /// All records in load order.
    pub fn records(&self) -> &[MemberRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id. Linear; the list is small.
    pub fn get(&self, id: &MemberId) -> Option<&MemberRecord> {
        self.records.iter().find(|m| &m.id == id)
    }

    /// Whether `id` is still stored.
    pub fn contains(&self, id: &MemberId) -> bool {
        self.get(id).is_some()
    }

    /// Remove one record. Returns false if `id` was not present.
    pub fn delete_one(&mut self, id: &MemberId) -> bool {
        let before = self.records.len();
        self.records.retain(|m| &m.id != id);
        self.records.len() != before
    }

    /// Remove every record whose id is in `ids`; returns how many went away.
    pub fn delete_many(&mut self, ids: &BTreeSet<MemberId>) -> usize {
        let before = self.records.len();
        self.records.retain(|m| !ids.contains(&m.id));
        before - self.records.len()
    }

    /// Merge `patch` into the record with `id`. Returns false if it does not exist.
    pub fn update(&mut self, id: &MemberId, patch: MemberPatch) -> bool {
        let Some(record) = self.records.iter_mut().find(|m| &m.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(email) = patch.email {
            record.email = email;
        }
        if let Some(role) = patch.role {
            record.role = role;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(n: u32) -> MemberStore {
        let mut store = MemberStore::new();
        store.load(
            (1..=n)
                .map(|i| MemberRecord::new(i, format!("user{i}"), format!("u{i}@x.com"), "member"))
                .collect(),
        );
        store
    }

    #[test]
    fn load_drops_duplicate_ids() {
        let mut store = MemberStore::new();
        store.load(vec![
            MemberRecord::new("1", "first", "a@x.com", "member"),
            MemberRecord::new("1", "second", "b@x.com", "admin"),
            MemberRecord::new("2", "third", "c@x.com", "member"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&MemberId::from("1")).unwrap().name, "first");
    }

    #[test]
    fn delete_one_is_noop_for_unknown_id() {
        let mut store = store_of(3);
        assert!(!store.delete_one(&MemberId::from("9")));
        assert_eq!(store.len(), 3);
        assert!(store.delete_one(&MemberId::from(2u32)));
        assert!(!store.contains(&MemberId::from(2u32)));
    }

    #[test]
    fn delete_many_keeps_order_of_survivors() {
        let mut store = store_of(5);
        let ids: BTreeSet<MemberId> = [MemberId::from(2u32), MemberId::from(4u32), MemberId::from("x")]
            .into_iter()
            .collect();
        assert_eq!(store.delete_many(&ids), 2);
        let left: Vec<&str> = store.records().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(left, ["1", "3", "5"]);
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut store = store_of(2);
        let patch = MemberPatch {
            role: Some("admin".to_string()),
            ..Default::default()
        };
        assert!(store.update(&MemberId::from(1u32), patch.clone()));
        let m = store.get(&MemberId::from(1u32)).unwrap();
        assert_eq!(m.role, "admin");
        assert_eq!(m.name, "user1");
        assert!(!store.update(&MemberId::from("nope"), patch));
    }
}
