use crate::server::{
    data::book::BookRepository,
    model::book::{BookFilter, CreateBookParams, UpdateBookParams},
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod update;

fn params(title: &str, author_id: i32, category_id: i32) -> CreateBookParams {
    CreateBookParams {
        title: title.to_string(),
        author_id,
        category_id,
        isbn: None,
        description: None,
        publication_date: None,
        pages: Some(200),
        language: Some("en".to_string()),
        cover_url: None,
        pdf_url: None,
        epub_url: None,
        price: None,
        is_free: true,
        is_active: true,
    }
}
