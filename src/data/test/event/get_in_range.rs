use super::*;
use test_utils::factory::event::EventFactory;

/// Tests that assigned and unassigned slots are both returned.
///
/// The schedule display needs the full picture of the range, filled slots
/// included.
///
/// Expected: Ok with both slots, date ascending
#[tokio::test]
async fn includes_assigned_slots() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let assigned = EventFactory::new(db, 100)
        .date(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap())
        .name("Operation Filled")
        .build()
        .await?;
    let open = EventFactory::new(db, 100)
        .date(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let events = repo
        .get_in_range(
            100,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        )
        .await?;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, assigned.id);
    assert_eq!(events[1].id, open.id);

    Ok(())
}
