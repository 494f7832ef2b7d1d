use super::*;
use test_utils::factory::event::EventFactory;

/// Tests assigning a mission to an open slot.
///
/// Verifies that name, creator id and creator name are all written.
///
/// Expected: Ok(true) and the row updated
#[tokio::test]
async fn writes_assignment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db, 100).await?;

    let repo = EventRepository::new(db);
    let assigned = repo
        .assign(AssignEventParams {
            event_id: event.id,
            name: "Operation Golden Ghost".to_string(),
            creator_id: 0,
            creator_name: "Moose".to_string(),
        })
        .await?;

    assert!(assigned);
    let stored = repo.get_by_id(event.id).await?.unwrap();
    assert_eq!(stored.name, "Operation Golden Ghost");
    assert_eq!(stored.creator_id, "0");
    assert_eq!(stored.creator_name, "Moose");
    assert!(!stored.is_unassigned());

    Ok(())
}

/// Tests assigning to a slot that already holds a mission.
///
/// Expected: Ok(false), the existing assignment untouched
#[tokio::test]
async fn does_not_overwrite_an_assigned_slot() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db, 100)
        .name("Operation Hand Picked")
        .creator_name("Badger")
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let assigned = repo
        .assign(AssignEventParams {
            event_id: event.id,
            name: "Operation Latecomer".to_string(),
            creator_id: 0,
            creator_name: "Moose".to_string(),
        })
        .await?;

    assert!(!assigned);
    let stored = repo.get_by_id(event.id).await?.unwrap();
    assert_eq!(stored.name, "Operation Hand Picked");
    assert_eq!(stored.creator_name, "Badger");

    Ok(())
}

/// Tests assigning to a non-existent event.
///
/// Expected: Ok(false), nothing written
#[tokio::test]
async fn returns_false_for_nonexistent_event() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EventRepository::new(db);
    let assigned = repo
        .assign(AssignEventParams {
            event_id: 999_999,
            name: "Operation Nowhere".to_string(),
            creator_id: 0,
            creator_name: "Nobody".to_string(),
        })
        .await?;

    assert!(!assigned);

    Ok(())
}
