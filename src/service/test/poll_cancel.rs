use sea_orm::DatabaseConnection;
use test_utils::builder::TestBuilder;
use test_utils::context::TestContext;
use test_utils::factory::event::EventFactory;
use test_utils::factory::mission_poll::MissionPollFactory;

use crate::data::mission_poll::MissionPollRepository;
use crate::model::mission_poll::PollStatus;
use crate::service::poll::{PollError, PollService};
use crate::service::tag_catalog::TagCatalogCache;
use crate::service::test::stubs::{StubContentSource, StubDisplay, StubNotifier, StubVoteSurface};

const GUILD_ID: u64 = 4_000;

async fn poll_test_db() -> TestContext {
    TestBuilder::new().with_poll_tables().build().await.unwrap()
}

struct Stubs {
    vote: StubVoteSurface,
    source: StubContentSource,
    notifier: StubNotifier,
    display: StubDisplay,
    cache: TagCatalogCache,
}

impl Stubs {
    fn new() -> Self {
        Self {
            vote: StubVoteSurface::new(),
            source: StubContentSource::empty(),
            notifier: StubNotifier::new(),
            display: StubDisplay::new(),
            cache: TagCatalogCache::new(),
        }
    }

    fn service<'a>(&'a self, db: &'a DatabaseConnection) -> PollService<'a> {
        PollService::new(
            db,
            &self.vote,
            &self.source,
            &self.notifier,
            &self.display,
            &self.cache,
        )
    }
}

/// Expected: the poll goes to failed and both its messages are taken down.
#[tokio::test]
async fn cancels_an_active_poll() {
    let test = poll_test_db().await;
    let db = test.db.as_ref().unwrap();
    let event = EventFactory::new(db, GUILD_ID).build().await.unwrap();
    let model = MissionPollFactory::new(db, GUILD_ID, event.id)
        .links_message_id(Some(123_456))
        .build()
        .await
        .unwrap();

    let stubs = Stubs::new();
    let cancelled = stubs
        .service(db)
        .cancel_poll(GUILD_ID, model.id)
        .await
        .unwrap();
    assert_eq!(cancelled.id, model.id);

    let stored = MissionPollRepository::new(db)
        .get_by_id(model.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, PollStatus::Failed);
    assert!(stored.winning_thread_id.is_none());

    let deleted = stubs.vote.deleted_ids();
    assert_eq!(deleted.len(), 2);
    assert!(deleted.contains(&model.poll_message_id.parse().unwrap()));
    assert!(deleted.contains(&123_456));
}

/// Expected: an unknown poll id is rejected and nothing is deleted.
#[tokio::test]
async fn unknown_poll_is_rejected() {
    let test = poll_test_db().await;
    let db = test.db.as_ref().unwrap();

    let stubs = Stubs::new();
    let result = stubs.service(db).cancel_poll(GUILD_ID, 999).await;
    assert!(matches!(result, Err(PollError::PollNotFound)));
    assert!(stubs.vote.deleted_ids().is_empty());
}

/// Expected: a poll belonging to a different guild cannot be cancelled.
#[tokio::test]
async fn other_guilds_poll_is_rejected() {
    let test = poll_test_db().await;
    let db = test.db.as_ref().unwrap();
    let event = EventFactory::new(db, GUILD_ID).build().await.unwrap();
    let model = MissionPollFactory::new(db, GUILD_ID, event.id)
        .build()
        .await
        .unwrap();

    let stubs = Stubs::new();
    let result = stubs.service(db).cancel_poll(GUILD_ID + 1, model.id).await;
    assert!(matches!(result, Err(PollError::PollNotFound)));

    let stored = MissionPollRepository::new(db)
        .get_by_id(model.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, PollStatus::Active);
}

/// Expected: a poll that already reached a terminal status is not active
/// and cannot be cancelled again.
#[tokio::test]
async fn terminal_poll_cannot_be_cancelled() {
    let test = poll_test_db().await;
    let db = test.db.as_ref().unwrap();
    let event = EventFactory::new(db, GUILD_ID).build().await.unwrap();
    let model = MissionPollFactory::new(db, GUILD_ID, event.id)
        .status("completed")
        .winning_thread_id(Some(1_001))
        .build()
        .await
        .unwrap();

    let stubs = Stubs::new();
    let result = stubs.service(db).cancel_poll(GUILD_ID, model.id).await;
    assert!(matches!(result, Err(PollError::PollNotFound)));
}
