use crate::data::schedule_config::ScheduleConfigRepository;
use crate::model::schedule_config::UpsertScheduleConfigParams;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get;
mod upsert;
