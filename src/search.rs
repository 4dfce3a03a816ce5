use crate::app::AppState;
use crate::app::pagination::{clamp_page, page_slice, total_pages};
use crate::source::MemberRecord;

/// True when any field of `member`, lowercased, contains `query_lower`.
/// `query_lower` must already be lowercase.
pub fn matches(member: &MemberRecord, query_lower: &str) -> bool {
    member
        .field_values()
        .iter()
        .any(|v| v.to_lowercase().contains(query_lower))
}

/// Filter `members` by `query`, keeping store order. An empty query keeps everything.
pub fn filter_members(members: &[MemberRecord], query: &str) -> Vec<MemberRecord> {
    if query.is_empty() {
        return members.to_vec();
    }
    let q = query.to_lowercase();
    members.iter().filter(|m| matches(m, &q)).cloned().collect()
}

/// Recompute the filtered view from the store and query, then pull the page
/// and cursor back inside the new bounds.
pub fn apply_search(app: &mut AppState) {
    app.members = filter_members(app.store.records(), &app.search_query);
    app.current_page = clamp_page(app.current_page, total_pages(app.members.len()));
    let rows = page_slice(&app.members, app.current_page).len();
    app.cursor = app.cursor.min(rows.saturating_sub(1));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<MemberRecord> {
        vec![
            MemberRecord::new("1", "Aaron Miles", "aaron@mailinator.com", "member"),
            MemberRecord::new("2", "Aishwarya Naik", "aishwarya@mailinator.com", "member"),
            MemberRecord::new("3", "Arvind Kumar", "arvind@mailinator.com", "admin"),
        ]
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let all = sample();
        assert_eq!(filter_members(&all, ""), all);
    }

    #[test]
    fn query_is_case_insensitive_across_fields() {
        let all = sample();
        let hits = filter_members(&all, "ADMIN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Arvind Kumar");

        let hits = filter_members(&all, "naik");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "2");
    }

    #[test]
    fn identity_is_searchable() {
        let hits = filter_members(&sample(), "3");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "3");
    }

    #[test]
    fn query_without_hits_yields_empty_view() {
        assert!(filter_members(&sample(), "zzz").is_empty());
    }

    #[test]
    fn apply_search_clamps_page_and_cursor() {
        let members: Vec<MemberRecord> = (1..=25)
            .map(|i| MemberRecord::new(i.to_string().as_str(), format!("user{i}"), "u@x.com", "member"))
            .collect();
        let mut app = AppState::with_members(members);
        app.current_page = 3;
        app.cursor = 4;
        app.search_query = "user1".to_string();
        apply_search(&mut app);
        // user1, user10..user19
        assert_eq!(app.members.len(), 11);
        assert_eq!(app.current_page, 2);
        assert_eq!(app.cursor, 0);
    }
}
