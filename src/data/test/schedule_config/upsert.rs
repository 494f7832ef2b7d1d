use super::*;

/// Tests inserting a configuration for a new guild.
///
/// Expected: Ok(config) with the provided channels set
#[tokio::test]
async fn inserts_new_config() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ScheduleConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ScheduleConfigRepository::new(db);
    let config = repo
        .upsert(UpsertScheduleConfigParams {
            guild_id: 100,
            briefing_channel_id: Some(101),
            log_channel_id: None,
            schedule_channel_id: None,
            schedule_message_id: None,
        })
        .await?;

    assert_eq!(config.guild_id, "100");
    assert_eq!(config.briefing_channel_id, Some("101".to_string()));
    assert!(config.log_channel_id.is_none());

    Ok(())
}

/// Tests partial update of an existing configuration.
///
/// Verifies that fields omitted from the params keep their stored values
/// instead of being cleared.
///
/// Expected: Ok(config) with the new log channel and the old briefing channel
#[tokio::test]
async fn preserves_omitted_fields_on_update() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ScheduleConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::schedule_config::create_config(db, 100).await?;

    let repo = ScheduleConfigRepository::new(db);
    let config = repo
        .upsert(UpsertScheduleConfigParams {
            guild_id: 100,
            briefing_channel_id: None,
            log_channel_id: Some(555),
            schedule_channel_id: None,
            schedule_message_id: None,
        })
        .await?;

    assert_eq!(config.log_channel_id, Some("555".to_string()));
    assert_eq!(config.briefing_channel_id, stored.briefing_channel_id);
    assert_eq!(config.schedule_channel_id, stored.schedule_channel_id);

    Ok(())
}
