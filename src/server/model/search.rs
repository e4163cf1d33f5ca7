use crate::{
    model::search::SearchAllDto,
    server::model::{author::Author, book::Book, category::Category},
};

/// Target of a search request, recorded in the search log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Books,
    Authors,
    Categories,
    All,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Authors => "authors",
            Self::Categories => "categories",
            Self::All => "all",
        }
    }
}

/// Combined results of a search across books, authors and categories.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchAll {
    pub query: String,
    pub books: Vec<Book>,
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
}

impl SearchAll {
    pub fn total(&self) -> u64 {
        (self.books.len() + self.authors.len() + self.categories.len()) as u64
    }

    pub fn into_dto(self) -> SearchAllDto {
        let total = self.total();

        SearchAllDto {
            query: self.query,
            books: self.books.into_iter().map(Book::into_dto).collect(),
            authors: self.authors.into_iter().map(Author::into_dto).collect(),
            categories: self.categories.into_iter().map(Category::into_dto).collect(),
            total,
        }
    }
}
