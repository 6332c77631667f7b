use std::sync::Arc;

use birthday_box_app::{
    clock::SystemClock,
    database::{self, Db},
    domain::orders::PgOrdersService,
};
use clap::{Args, Subcommand};

mod refund;
mod show;
mod status;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    Show(show::ShowOrderArgs),
    Status(status::OrderStatusArgs),
    Refund(refund::RefundOrderArgs),
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Show(args) => show::run(args).await,
        OrderSubcommand::Status(args) => status::run(args).await,
        OrderSubcommand::Refund(args) => refund::run(args).await,
    }
}

async fn orders_service(database_url: &str) -> Result<PgOrdersService, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(PgOrdersService::new(Db::new(pool), Arc::new(SystemClock)))
}
