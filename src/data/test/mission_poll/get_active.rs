use super::*;
use test_utils::factory::mission_poll::MissionPollFactory;

/// Tests listing active polls for one guild.
///
/// Expected: Ok with only the guild's active polls
#[tokio::test]
async fn lists_active_polls_for_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event_a = factory::event::create_event(db, 100).await?;
    let event_b = factory::event::create_event(db, 100).await?;
    let event_c = factory::event::create_event(db, 200).await?;

    let active = MissionPollFactory::new(db, 100, event_a.id).build().await?;
    MissionPollFactory::new(db, 100, event_b.id)
        .status("completed")
        .winning_thread_id(Some(1_001))
        .build()
        .await?;
    MissionPollFactory::new(db, 200, event_c.id).build().await?;

    let repo = MissionPollRepository::new(db);
    let polls = repo.get_active(Some(100)).await?;

    assert_eq!(polls.len(), 1);
    assert_eq!(polls[0].id, active.id);

    Ok(())
}

/// Tests the unscoped listing used by the monitor.
///
/// Expected: Ok with active polls across guilds
#[tokio::test]
async fn lists_active_polls_across_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event_a = factory::event::create_event(db, 100).await?;
    let event_b = factory::event::create_event(db, 200).await?;

    MissionPollFactory::new(db, 100, event_a.id).build().await?;
    MissionPollFactory::new(db, 200, event_b.id).build().await?;

    let repo = MissionPollRepository::new(db);
    let polls = repo.get_active(None).await?;

    assert_eq!(polls.len(), 2);

    Ok(())
}
