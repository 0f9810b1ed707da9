use super::*;
use chrono::{FixedOffset, TimeZone};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn new_moment(title: &str) -> NewMoment {
    NewMoment {
        title: title.to_string(),
        ..NewMoment::default()
    }
}

#[test]
fn test_add_assigns_id_and_defaults() {
    let mut collection = MomentCollection::default();
    let now = at(2024, 3, 1, 10);

    let moment = collection
        .add(
            NewMoment {
                title: "  Sunrise walk  ".to_string(),
                notes: Some("cold but lovely".to_string()),
                image_uri: None,
                mood: Some("happy".to_string()),
            },
            now,
        )
        .unwrap();

    assert!(!moment.id.is_empty());
    assert_eq!(moment.title, "Sunrise walk");
    assert!(!moment.is_favorite);
    assert_eq!(moment.created_at, now);
    assert!(moment.updated_at.is_none());
    assert_eq!(moment.mood.as_deref(), Some("happy"));
}

#[test]
fn test_add_prepends_newest_first() {
    let mut collection = MomentCollection::default();
    collection.add(new_moment("first"), at(2024, 3, 1, 10)).unwrap();
    collection.add(new_moment("second"), at(2024, 3, 2, 10)).unwrap();

    let titles: Vec<_> = collection.as_slice().iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[test]
fn test_add_rejects_blank_title() {
    let mut collection = MomentCollection::default();
    let result = collection.add(new_moment("   "), at(2024, 3, 1, 10));
    match result {
        Err(AppError::Moment(msg)) => assert!(msg.contains("Title cannot be empty")),
        _ => panic!("Expected Moment error for blank title"),
    }
    assert!(collection.is_empty());
}

#[test]
fn test_add_rejects_unknown_mood() {
    let mut collection = MomentCollection::default();
    let result = collection.add(
        NewMoment {
            title: "x".to_string(),
            mood: Some("ecstatic".to_string()),
            ..NewMoment::default()
        },
        at(2024, 3, 1, 10),
    );
    assert!(matches!(result, Err(AppError::Moment(_))));
}

#[test]
fn test_blank_notes_are_dropped() {
    let mut collection = MomentCollection::default();
    let moment = collection
        .add(
            NewMoment {
                title: "x".to_string(),
                notes: Some("   ".to_string()),
                ..NewMoment::default()
            },
            at(2024, 3, 1, 10),
        )
        .unwrap();
    assert!(moment.notes.is_none());
    assert!(!moment.has_notes());
}

#[test]
fn test_update_patches_fields_and_stamps_time() {
    let mut collection = MomentCollection::default();
    let id = collection
        .add(new_moment("draft"), at(2024, 3, 1, 10))
        .unwrap()
        .id
        .clone();

    let later = at(2024, 3, 2, 8);
    let replaced = collection
        .update(
            &id,
            MomentUpdate {
                title: Some("final".to_string()),
                notes: Some("with a note".to_string()),
                image_uri: Some("/photos/a.jpg".to_string()),
                mood: Some("calm".to_string()),
            },
            later,
        )
        .unwrap();

    assert!(replaced.is_none());
    let moment = collection.get(&id).unwrap();
    assert_eq!(moment.title, "final");
    assert!(moment.is_perfect());
    assert_eq!(moment.updated_at, Some(later));
    assert_eq!(moment.created_at, at(2024, 3, 1, 10));
}

#[test]
fn test_update_returns_replaced_image() {
    let mut collection = MomentCollection::default();
    let id = collection
        .add(
            NewMoment {
                title: "x".to_string(),
                image_uri: Some("/photos/old.jpg".to_string()),
                ..NewMoment::default()
            },
            at(2024, 3, 1, 10),
        )
        .unwrap()
        .id
        .clone();

    let replaced = collection
        .update(
            &id,
            MomentUpdate {
                image_uri: Some("/photos/new.jpg".to_string()),
                ..MomentUpdate::default()
            },
            at(2024, 3, 1, 11),
        )
        .unwrap();
    assert_eq!(replaced.as_deref(), Some("/photos/old.jpg"));
}

#[test]
fn test_failed_update_leaves_moment_untouched() {
    let mut collection = MomentCollection::default();
    let id = collection
        .add(new_moment("keep"), at(2024, 3, 1, 10))
        .unwrap()
        .id
        .clone();

    let result = collection.update(
        &id,
        MomentUpdate {
            title: Some("new".to_string()),
            mood: Some("nope".to_string()),
            ..MomentUpdate::default()
        },
        at(2024, 3, 2, 10),
    );
    assert!(result.is_err());
    let moment = collection.get(&id).unwrap();
    assert_eq!(moment.title, "keep");
    assert!(moment.updated_at.is_none());
}

#[test]
fn test_update_blank_mood_clears_it() {
    let mut collection = MomentCollection::default();
    let id = collection
        .add(
            NewMoment {
                title: "rainy bus".to_string(),
                mood: Some("happy".to_string()),
                ..NewMoment::default()
            },
            at(2024, 3, 1, 10),
        )
        .unwrap()
        .id
        .clone();

    collection
        .update(
            &id,
            MomentUpdate {
                mood: Some(String::new()),
                ..MomentUpdate::default()
            },
            at(2024, 3, 2, 10),
        )
        .unwrap();

    let moment = collection.get(&id).unwrap();
    assert!(moment.mood.is_none());
    assert_eq!(moment.title, "rainy bus");
    assert_eq!(moment.updated_at, Some(at(2024, 3, 2, 10)));
}

#[test]
fn test_update_unknown_id() {
    let mut collection = MomentCollection::default();
    let result = collection.update("missing", MomentUpdate::default(), at(2024, 1, 1, 0));
    assert!(matches!(result, Err(AppError::Moment(_))));
}

#[test]
fn test_remove_and_toggle_favorite() {
    let mut collection = MomentCollection::default();
    let id = collection
        .add(new_moment("x"), at(2024, 3, 1, 10))
        .unwrap()
        .id
        .clone();

    assert!(collection.toggle_favorite(&id).unwrap());
    assert!(!collection.toggle_favorite(&id).unwrap());

    let removed = collection.remove(&id).unwrap();
    assert_eq!(removed.id, id);
    assert!(collection.is_empty());
    assert!(collection.remove(&id).is_err());
}

#[test]
fn test_random_moment() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut collection = MomentCollection::default();
    assert!(collection.random(&mut rng).is_none());

    collection.add(new_moment("only"), at(2024, 3, 1, 10)).unwrap();
    assert_eq!(collection.random(&mut rng).unwrap().title, "only");
}

#[test]
fn test_group_by_month_newest_first() {
    let mut collection = MomentCollection::default();
    collection.add(new_moment("jan a"), at(2024, 1, 5, 10)).unwrap();
    collection.add(new_moment("feb"), at(2024, 2, 10, 10)).unwrap();
    collection.add(new_moment("jan b"), at(2024, 1, 20, 10)).unwrap();

    let groups = collection.group_by_month(&Utc);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].month_name, "February 2024");
    assert_eq!(groups[1].month_name, "January 2024");
    let jan: Vec<_> = groups[1].moments.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(jan, vec!["jan b", "jan a"]);
}

#[test]
fn test_group_by_month_uses_given_timezone() {
    let mut collection = MomentCollection::default();
    // 23:30 UTC on Jan 31 is already February in UTC+2
    collection
        .add(
            new_moment("edge"),
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 30, 0).unwrap(),
        )
        .unwrap();

    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let groups = collection.group_by_month(&plus_two);
    assert_eq!(groups[0].month_name, "February 2024");
}
