mod book;
mod favorite;
mod log;
mod reading_list;
