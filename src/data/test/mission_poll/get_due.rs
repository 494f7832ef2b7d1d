use super::*;
use test_utils::factory::mission_poll::MissionPollFactory;

/// Tests that only active polls past their end time are returned.
///
/// Verifies that still-running polls and terminal polls are excluded even
/// when their end time has passed.
///
/// Expected: Ok with only the overdue active poll
#[tokio::test]
async fn returns_only_overdue_active_polls() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event_a = factory::event::create_event(db, 100).await?;
    let event_b = factory::event::create_event(db, 100).await?;
    let event_c = factory::event::create_event(db, 100).await?;

    let overdue = MissionPollFactory::new(db, 100, event_a.id)
        .poll_end_time(Utc::now() - Duration::minutes(10))
        .build()
        .await?;
    // Still running
    MissionPollFactory::new(db, 100, event_b.id)
        .poll_end_time(Utc::now() + Duration::hours(1))
        .build()
        .await?;
    // Already failed, end time long past
    MissionPollFactory::new(db, 100, event_c.id)
        .status("failed")
        .poll_end_time(Utc::now() - Duration::hours(5))
        .build()
        .await?;

    let repo = MissionPollRepository::new(db);
    let due = repo.get_due(Utc::now()).await?;

    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, overdue.id);

    Ok(())
}

/// Tests ordering of multiple due polls.
///
/// Expected: Ok with polls ordered by end time ascending
#[tokio::test]
async fn orders_by_end_time() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event_a = factory::event::create_event(db, 100).await?;
    let event_b = factory::event::create_event(db, 100).await?;

    let later = MissionPollFactory::new(db, 100, event_a.id)
        .poll_end_time(Utc::now() - Duration::minutes(5))
        .build()
        .await?;
    let earlier = MissionPollFactory::new(db, 100, event_b.id)
        .poll_end_time(Utc::now() - Duration::hours(2))
        .build()
        .await?;

    let repo = MissionPollRepository::new(db);
    let due = repo.get_due(Utc::now()).await?;

    assert_eq!(due.len(), 2);
    assert_eq!(due[0].id, earlier.id);
    assert_eq!(due[1].id, later.id);

    Ok(())
}
