use std::collections::BTreeSet;

use ampa_models::{AmpaModelError, AssociationDirectory, Event, ProfileRole};
use itertools::Itertools;

/// Resolves the set of parent email addresses an event should reach.
///
/// An event with no targeting rows is a broadcast to every profile tagged
/// "parent"; rows restrict delivery to parents of students in the listed
/// classes. Null and empty emails are dropped, duplicates collapse under set
/// semantics (exact match, no normalization). An empty result is not an
/// error; a failed read is, and must reach the caller so it can tell "no
/// rules" apart from "query failed".
pub async fn resolve_recipients<D>(
    directory: &D,
    event: &Event,
) -> Result<BTreeSet<String>, AmpaModelError>
where
    D: AssociationDirectory + Sync,
{
    let targets = directory.event_targets(event.id).await?;

    let candidates: Vec<Option<String>> = if targets.is_empty() {
        trace!("event {} targets all parents", event.id);
        directory
            .profiles_by_role(ProfileRole::Parent)
            .await?
            .into_iter()
            .map(|p| p.email)
            .collect()
    } else {
        let class_ids: Vec<i64> = targets.iter().map(|t| t.class_id).unique().collect();
        trace!("event {} targets classes {:?}", event.id, class_ids);
        directory
            .student_parent_emails(&class_ids)
            .await?
            .into_iter()
            .map(|s| s.email)
            .collect()
    };

    let recipients: BTreeSet<String> = candidates
        .into_iter()
        .flatten()
        .filter(|email| !email.is_empty())
        .collect();
    if recipients.is_empty() {
        info!(
            "no recipients resolved for event {} ({:?})",
            event.id, event.title
        );
    }
    Ok(recipients)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::*;
    use chrono::{TimeZone, Utc};

    fn science_fair_setup() -> (MemoryDirectory, ampa_models::Event) {
        // Event "Science Fair" targets classes 5 and 6; the class-7 student's
        // parent must never hear about it.
        let event = event_on(
            "Science Fair",
            Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap(),
        );
        let p1 = parent(Some("a@x.com"));
        let p2 = parent(Some("b@x.com"));
        let p3 = parent(Some("c@x.com"));
        let dir = MemoryDirectory {
            events: vec![event.clone()],
            targets: vec![target(event.id, 5), target(event.id, 6)],
            students: vec![
                student(1, 5, p1.id),
                student(2, 6, p2.id),
                student(3, 7, p3.id),
            ],
            profiles: vec![p1, p2, p3],
            ..Default::default()
        };
        (dir, event)
    }

    #[tokio::test]
    async fn targeted_event_reaches_only_listed_classes() {
        let (dir, event) = science_fair_setup();
        let recipients = resolve_recipients(&dir, &event).await.unwrap();
        let expected: Vec<&str> = vec!["a@x.com", "b@x.com"];
        assert_eq!(recipients.into_iter().collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn broadcast_event_reaches_all_parents_but_not_admins() {
        // "Open House" has no targeting rows at all.
        let event = event_on(
            "Open House",
            Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
        );
        let dir = MemoryDirectory {
            events: vec![event.clone()],
            profiles: vec![
                parent(Some("a@x.com")),
                parent(Some("b@x.com")),
                admin("z@x.com"),
            ],
            ..Default::default()
        };
        let recipients = resolve_recipients(&dir, &event).await.unwrap();
        assert_eq!(
            recipients.into_iter().collect::<Vec<_>>(),
            vec!["a@x.com", "b@x.com"]
        );
    }

    #[tokio::test]
    async fn shared_parent_appears_once() {
        let event = event_on(
            "Field Trip",
            Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap(),
        );
        let p1 = parent(Some("a@x.com"));
        let dir = MemoryDirectory {
            events: vec![event.clone()],
            targets: vec![target(event.id, 5), target(event.id, 6)],
            students: vec![student(1, 5, p1.id), student(2, 6, p1.id)],
            profiles: vec![p1],
            ..Default::default()
        };
        let recipients = resolve_recipients(&dir, &event).await.unwrap();
        assert_eq!(recipients.len(), 1);
        assert!(recipients.contains("a@x.com"));
    }

    #[tokio::test]
    async fn null_and_empty_emails_are_dropped() {
        let event = event_on(
            "Open House",
            Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
        );
        let dir = MemoryDirectory {
            events: vec![event.clone()],
            profiles: vec![parent(None), parent(Some("")), parent(Some("a@x.com"))],
            ..Default::default()
        };
        let recipients = resolve_recipients(&dir, &event).await.unwrap();
        assert_eq!(recipients.into_iter().collect::<Vec<_>>(), vec!["a@x.com"]);
    }

    #[tokio::test]
    async fn unknown_classes_resolve_to_nobody() {
        // Targeting a class id nobody is enrolled in is a silent no-op, not
        // an error.
        let event = event_on(
            "Ghost Meeting",
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        );
        let dir = MemoryDirectory {
            events: vec![event.clone()],
            targets: vec![target(event.id, 99)],
            profiles: vec![parent(Some("a@x.com"))],
            ..Default::default()
        };
        let recipients = resolve_recipients(&dir, &event).await.unwrap();
        assert!(recipients.is_empty());
    }

    #[tokio::test]
    async fn targeting_fetch_failure_propagates() {
        let (mut dir, event) = science_fair_setup();
        dir.fail_targets_for = vec![event.id];
        assert!(resolve_recipients(&dir, &event).await.is_err());
    }

    #[tokio::test]
    async fn resolution_is_idempotent_over_a_snapshot() {
        let (dir, event) = science_fair_setup();
        let first = resolve_recipients(&dir, &event).await.unwrap();
        let second = resolve_recipients(&dir, &event).await.unwrap();
        assert_eq!(first, second);
    }
}
