use super::*;

/// Tests failing a poll.
///
/// Verifies the status becomes failed with no winner recorded.
///
/// Expected: Ok(()) and the stored poll failed
#[tokio::test]
async fn sets_failed_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db, 100).await?;
    let poll = factory::mission_poll::create_poll(db, 100, event.id).await?;

    let repo = MissionPollRepository::new(db);
    repo.mark_failed(poll.id).await?;

    let stored = repo.get_by_id(poll.id).await?.unwrap();
    assert_eq!(stored.status, PollStatus::Failed);
    assert!(stored.winning_thread_id.is_none());

    Ok(())
}

/// Tests failing a non-existent poll.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_nonexistent_poll() {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MissionPollRepository::new(db);
    let result = repo.mark_failed(999_999).await;

    assert!(result.is_err());
}
