use super::*;

/// Tests inserting a poll for an event with no active poll.
///
/// Verifies the row is persisted as active with the thread ids intact and
/// in order.
///
/// Expected: Ok(Some(poll))
#[tokio::test]
async fn inserts_when_no_active_poll() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db, 100).await?;

    let repo = MissionPollRepository::new(db);
    let poll = repo.insert_if_no_active(poll_params(100, event.id)).await?;

    assert!(poll.is_some());
    let poll = poll.unwrap();
    assert_eq!(poll.status, PollStatus::Active);
    assert_eq!(poll.mission_thread_ids, vec![1_001, 1_002, 1_003]);
    assert_eq!(poll.target_event_id, event.id);
    assert!(poll.winning_thread_id.is_none());

    Ok(())
}

/// Tests the one-active-poll-per-event guard.
///
/// Verifies that a second insert for the same event is refused and no row
/// is written.
///
/// Expected: Ok(None) and exactly one stored poll
#[tokio::test]
async fn refuses_second_active_poll_for_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db, 100).await?;

    let repo = MissionPollRepository::new(db);
    let first = repo.insert_if_no_active(poll_params(100, event.id)).await?;
    let second = repo.insert_if_no_active(poll_params(100, event.id)).await?;

    assert!(first.is_some());
    assert!(second.is_none());
    let active = repo.get_active(Some(100)).await?;
    assert_eq!(active.len(), 1);

    Ok(())
}

/// Tests that a terminal poll does not block a new one.
///
/// A failed poll for the event is history, not a conflict.
///
/// Expected: Ok(Some(poll)) after the earlier poll failed
#[tokio::test]
async fn allows_new_poll_after_terminal_poll() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db, 100).await?;
    factory::mission_poll::MissionPollFactory::new(db, 100, event.id)
        .status("failed")
        .build()
        .await?;

    let repo = MissionPollRepository::new(db);
    let poll = repo.insert_if_no_active(poll_params(100, event.id)).await?;

    assert!(poll.is_some());

    Ok(())
}
