use super::*;

/// Tests creating a new event slot.
///
/// Verifies that the repository creates an unassigned slot with the given
/// guild, date and type, and reports it as newly created.
///
/// Expected: Ok((true, event)) with empty name
#[tokio::test]
async fn creates_new_slot() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    let repo = EventRepository::new(db);
    let (created, event) = repo.create_if_absent(100, date, "Mission").await?;

    assert!(created);
    assert_eq!(event.guild_id, "100");
    assert_eq!(event.date, date);
    assert_eq!(event.event_type, "Mission");
    assert!(event.is_unassigned());

    Ok(())
}

/// Tests idempotence on the (guild, date, type) key.
///
/// Verifies that a second create for the same key returns the existing slot
/// unchanged instead of creating a duplicate.
///
/// Expected: Ok((false, existing)) with the first slot's id
#[tokio::test]
async fn returns_existing_slot_unchanged() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    let repo = EventRepository::new(db);
    let (_, first) = repo.create_if_absent(100, date, "Mission").await?;
    let (created, second) = repo.create_if_absent(100, date, "Mission").await?;

    assert!(!created);
    assert_eq!(second.id, first.id);

    Ok(())
}

/// Tests that the key includes the event type.
///
/// Verifies that a Training and a Mission slot can share a date.
///
/// Expected: Ok((true, _)) for both types on the same date
#[tokio::test]
async fn distinguishes_slots_by_type() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    let repo = EventRepository::new(db);
    let (first_created, _) = repo.create_if_absent(100, date, "Training").await?;
    let (second_created, _) = repo.create_if_absent(100, date, "Mission").await?;

    assert!(first_created);
    assert!(second_created);

    Ok(())
}
