use crate::data::event::EventRepository;
use crate::model::event::AssignEventParams;
use chrono::NaiveDate;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod assign;
mod create_if_absent;
mod get_by_id;
mod get_in_range;
mod get_unassigned_in_range;
