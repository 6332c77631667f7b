use birthday_box_app::domain::orders::{
    OrdersService,
    records::{OrderStatus, OrderUuid},
};
use clap::Args;
use uuid::Uuid;

use super::orders_service;

#[derive(Debug, Args)]
pub(crate) struct OrderStatusArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Order UUID
    #[arg(long)]
    order: Uuid,

    /// New status: pending, completed or cancelled
    #[arg(long)]
    status: OrderStatus,
}

pub(crate) async fn run(args: OrderStatusArgs) -> Result<(), String> {
    let service = orders_service(&args.database_url).await?;

    service
        .update_status(OrderUuid::from_uuid(args.order), args.status)
        .await
        .map_err(|error| format!("failed to update order: {error}"))?;

    println!("order {} is {}", args.order, args.status);

    Ok(())
}
