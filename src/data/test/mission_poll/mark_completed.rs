use super::*;

/// Tests completing a poll with its winner.
///
/// Verifies the status transition and the winning thread id write happen
/// together.
///
/// Expected: Ok(()) and the stored poll completed with the winner set
#[tokio::test]
async fn sets_status_and_winner() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db, 100).await?;
    let poll = factory::mission_poll::create_poll(db, 100, event.id).await?;

    let repo = MissionPollRepository::new(db);
    repo.mark_completed(poll.id, 1_002).await?;

    let stored = repo.get_by_id(poll.id).await?.unwrap();
    assert_eq!(stored.status, PollStatus::Completed);
    assert_eq!(stored.winning_thread_id, Some(1_002));

    Ok(())
}

/// Tests completing a non-existent poll.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_nonexistent_poll() {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MissionPollRepository::new(db);
    let result = repo.mark_completed(999_999, 1_001).await;

    assert!(result.is_err());
}
