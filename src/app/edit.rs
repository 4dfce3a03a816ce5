//! Single-record edit session behind the edit modal.

use tracing::warn;

use super::store::{MemberPatch, MemberStore};
use crate::source::MemberId;

/// Editable fields, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    Name,
    Email,
    Role,
}

impl EditField {
    pub const ALL: [EditField; 3] = [EditField::Name, EditField::Email, EditField::Role];

    pub fn label(self) -> &'static str {
        match self {
            EditField::Name => "Name",
            EditField::Email => "Email Address",
            EditField::Role => "Role",
        }
    }

    pub fn next(self) -> Self {
        match self {
            EditField::Name => EditField::Email,
            EditField::Email => EditField::Role,
            EditField::Role => EditField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            EditField::Name => EditField::Role,
            EditField::Email => EditField::Name,
            EditField::Role => EditField::Email,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl MemberDraft {
    pub fn get(&self, field: EditField) -> &str {
        match field {
            EditField::Name => &self.name,
            EditField::Email => &self.email,
            EditField::Role => &self.role,
        }
    }

    fn into_patch(self) -> MemberPatch {
        MemberPatch {
            name: Some(self.name),
            email: Some(self.email),
            role: Some(self.role),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    target: MemberId,
    draft: MemberDraft,
    focus: EditField,
}

impl EditSession {
    /// Start editing `id`, copying its current values. `None` if it is not stored.
    pub fn open(store: &MemberStore, id: &MemberId) -> Option<Self> {
        let record = store.get(id)?;
        Some(Self {
            target: id.clone(),
            draft: MemberDraft {
                name: record.name.clone(),
                email: record.email.clone(),
                role: record.role.clone(),
            },
            // The form opens on the email input.
            focus: EditField::Email,
        })
    }

    pub fn target(&self) -> &MemberId {
        &self.target
    }

    pub fn draft(&self) -> &MemberDraft {
        &self.draft
    }

    pub fn focus(&self) -> EditField {
        self.focus
    }

    pub fn set_focus(&mut self, field: EditField) {
        self.focus = field;
    }

    /// Replace one draft value. Any string is accepted.
    pub fn set_field(&mut self, field: EditField, value: impl Into<String>) {
        let slot = match field {
            EditField::Name => &mut self.draft.name,
            EditField::Email => &mut self.draft.email,
            EditField::Role => &mut self.draft.role,
        };
        *slot = value.into();
    }

    /// Write the draft back. Returns false when the target no longer exists,
    /// in which case the store is untouched.
    pub fn commit(self, store: &mut MemberStore) -> bool {
        let applied = store.update(&self.target, self.draft.into_patch());
        if !applied {
            warn!(id = %self.target, "edit target vanished before commit");
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemberRecord;

    fn store() -> MemberStore {
        let mut s = MemberStore::new();
        s.load(vec![MemberRecord::new("3", "A", "a@x.com", "user")]);
        s
    }

    #[test]
    fn open_refuses_unknown_id() {
        assert!(EditSession::open(&store(), &MemberId::from("8")).is_none());
    }

    #[test]
    fn set_field_leaves_store_alone_until_commit() {
        let mut s = store();
        let id = MemberId::from("3");
        let mut session = EditSession::open(&s, &id).unwrap();
        session.set_field(EditField::Name, "B");
        assert_eq!(s.get(&id).unwrap().name, "A");
        assert_eq!(session.draft().get(EditField::Name), "B");

        assert!(session.commit(&mut s));
        let m = s.get(&id).unwrap();
        assert_eq!(m.name, "B");
        assert_eq!(m.email, "a@x.com");
        assert_eq!(m.role, "user");
    }

    #[test]
    fn commit_after_target_deleted_is_noop() {
        let mut s = store();
        let id = MemberId::from("3");
        let mut session = EditSession::open(&s, &id).unwrap();
        session.set_field(EditField::Role, "admin");
        s.delete_one(&id);
        assert!(!session.commit(&mut s));
        assert!(s.is_empty());
    }

    #[test]
    fn focus_cycles_through_fields() {
        let mut f = EditField::Name;
        for _ in 0..EditField::ALL.len() {
            f = f.next();
        }
        assert_eq!(f, EditField::Name);
        assert_eq!(EditField::Name.prev(), EditField::Role);
    }
}
