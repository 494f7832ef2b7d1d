use super::*;
use chrono::NaiveDate;
use test_utils::factory::event::EventFactory;
use test_utils::factory::mission_poll::MissionPollFactory;

/// Tests that winners come back joined with their event date.
///
/// The deduplication window is keyed to the target event's date, not to
/// when the poll ran, so the join matters.
///
/// Expected: Ok with the winner's thread id and the event's date
#[tokio::test]
async fn joins_winner_with_event_date() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event_date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    let event = EventFactory::new(db, 100)
        .date(event_date)
        .name("Operation Done")
        .build()
        .await?;
    MissionPollFactory::new(db, 100, event.id)
        .status("completed")
        .winning_thread_id(Some(1_002))
        .build()
        .await?;

    let repo = MissionPollRepository::new(db);
    let winners = repo.get_recent_winners(100).await?;

    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].winning_thread_id, 1_002);
    assert_eq!(winners[0].event_date, event_date);

    Ok(())
}

/// Tests that non-completed polls are excluded.
///
/// Active and failed polls have no winner to deduplicate against.
///
/// Expected: Ok(vec![])
#[tokio::test]
async fn excludes_polls_without_winner() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event_a = factory::event::create_event(db, 100).await?;
    let event_b = factory::event::create_event(db, 100).await?;

    MissionPollFactory::new(db, 100, event_a.id).build().await?;
    MissionPollFactory::new(db, 100, event_b.id)
        .status("failed")
        .build()
        .await?;

    let repo = MissionPollRepository::new(db);
    let winners = repo.get_recent_winners(100).await?;

    assert!(winners.is_empty());

    Ok(())
}

/// Tests guild isolation.
///
/// Expected: Ok(vec![]) for a guild with no completed polls
#[tokio::test]
async fn scopes_to_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = EventFactory::new(db, 100)
        .name("Operation Elsewhere")
        .build()
        .await?;
    MissionPollFactory::new(db, 100, event.id)
        .status("completed")
        .winning_thread_id(Some(1_001))
        .build()
        .await?;

    let repo = MissionPollRepository::new(db);
    let winners = repo.get_recent_winners(200).await?;

    assert!(winners.is_empty());

    Ok(())
}
