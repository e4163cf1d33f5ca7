use crate::server::{
    data::reading_list::ReadingListRepository, model::reading_list::CreateReadingListParams,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod add_item;
mod reorder;
