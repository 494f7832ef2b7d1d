use super::*;

/// Tests retrieving an existing guild configuration.
///
/// Expected: Ok(Some(config)) matching the stored row
#[tokio::test]
async fn returns_config() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ScheduleConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::schedule_config::create_config(db, 100).await?;

    let repo = ScheduleConfigRepository::new(db);
    let config = repo.get(100).await?;

    assert!(config.is_some());
    let config = config.unwrap();
    assert_eq!(config.guild_id, "100");
    assert_eq!(config.briefing_channel_id, stored.briefing_channel_id);

    Ok(())
}

/// Tests retrieving an unconfigured guild.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ScheduleConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ScheduleConfigRepository::new(db);
    let config = repo.get(999).await?;

    assert!(config.is_none());

    Ok(())
}
