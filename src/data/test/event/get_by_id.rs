use super::*;

/// Tests retrieving an event by ID.
///
/// Expected: Ok(Some(event)) matching the stored row
#[tokio::test]
async fn returns_event() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::event::create_event(db, 100).await?;

    let repo = EventRepository::new(db);
    let event = repo.get_by_id(stored.id).await?;

    assert!(event.is_some());
    let event = event.unwrap();
    assert_eq!(event.id, stored.id);
    assert_eq!(event.guild_id, stored.guild_id);
    assert_eq!(event.date, stored.date);

    Ok(())
}

/// Tests retrieving a non-existent event.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_nonexistent_event() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EventRepository::new(db);
    let event = repo.get_by_id(999_999).await?;

    assert!(event.is_none());

    Ok(())
}
