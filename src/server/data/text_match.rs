//! Case-insensitive substring filters shared by the search queries.
//!
//! Postgres matches with `ILIKE`, which folds case for every letter. SQLite's `LIKE` and
//! `LOWER` only fold ASCII, so on SQLite the query is matched in each of its common case
//! forms (as typed, lower, upper and capitalised). That covers words with an accented
//! initial such as "Émile" searched as "émile".

use sea_orm::{
    sea_query::{extension::postgres::PgExpr, Expr},
    ColumnTrait, Condition, DbBackend,
};

/// Builds a condition that holds when any of `columns` contains `text`, ignoring case.
pub fn contains_any<C>(backend: DbBackend, columns: &[C], text: &str) -> Condition
where
    C: ColumnTrait,
{
    let mut condition = Condition::any();

    for column in columns {
        match backend {
            DbBackend::Postgres => {
                condition =
                    condition.add(Expr::col(column.as_column_ref()).ilike(pattern(text)));
            }
            _ => {
                for variant in case_variants(text) {
                    condition = condition.add(column.like(pattern(&variant)));
                }
            }
        }
    }

    condition
}

fn pattern(text: &str) -> String {
    format!("%{}%", text)
}

/// Distinct case forms of `text`, in a stable order.
fn case_variants(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut chars = lower.chars();
    let capitalised = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    let mut variants: Vec<String> = Vec::with_capacity(4);
    for variant in [text.to_string(), lower.clone(), text.to_uppercase(), capitalised] {
        if !<[String]>::contains(&variants, &variant) {
            variants.push(variant);
        }
    }

    variants
}
