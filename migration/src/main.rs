use sea_orm_migration::prelude::*;

/// Runs migrations by hand, e.g. `cargo run -p migration -- status`.
///
/// Reads `DATABASE_URL`; the server applies pending migrations itself at startup.
#[tokio::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
