use super::*;
use test_utils::factory::event::EventFactory;

/// Tests that only unassigned slots inside the range are returned.
///
/// Verifies that assigned slots and slots outside the date range are
/// filtered out, and results come back ordered by date.
///
/// Expected: Ok with only the unassigned in-range slots, date ascending
#[tokio::test]
async fn filters_assigned_and_out_of_range() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();

    let late = EventFactory::new(db, 100)
        .date(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap())
        .build()
        .await?;
    let early = EventFactory::new(db, 100)
        .date(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap())
        .build()
        .await?;
    // Assigned slot in range, must not show up
    EventFactory::new(db, 100)
        .date(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
        .name("Operation Taken")
        .build()
        .await?;
    // Unassigned but outside the range
    EventFactory::new(db, 100)
        .date(NaiveDate::from_ymd_opt(2026, 4, 2).unwrap())
        .build()
        .await?;
    // Other guild
    EventFactory::new(db, 200)
        .date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap())
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let events = repo.get_unassigned_in_range(100, start, end).await?;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, early.id);
    assert_eq!(events[1].id, late.id);

    Ok(())
}

/// Tests an empty result when no slots match.
///
/// Expected: Ok(vec![])
#[tokio::test]
async fn returns_empty_when_no_slots() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EventRepository::new(db);
    let events = repo
        .get_unassigned_in_range(
            100,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        )
        .await?;

    assert!(events.is_empty());

    Ok(())
}
