use birthday_box_app::domain::orders::{OrdersService, records::OrderUuid};
use clap::Args;
use uuid::Uuid;

use super::orders_service;

#[derive(Debug, Args)]
pub(crate) struct RefundOrderArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Order UUID
    #[arg(long)]
    order: Uuid,
}

pub(crate) async fn run(args: RefundOrderArgs) -> Result<(), String> {
    let service = orders_service(&args.database_url).await?;

    service
        .refund(OrderUuid::from_uuid(args.order))
        .await
        .map_err(|error| format!("failed to refund order: {error}"))?;

    println!("refunded order {} and restocked its items", args.order);

    Ok(())
}
