use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(codegate_activation_migration::Migrator).await;
}
