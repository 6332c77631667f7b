use birthday_box_app::domain::orders::{OrdersService, records::OrderUuid};
use clap::Args;
use uuid::Uuid;

use super::orders_service;

#[derive(Debug, Args)]
pub(crate) struct ShowOrderArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Order UUID
    #[arg(long)]
    order: Uuid,
}

pub(crate) async fn run(args: ShowOrderArgs) -> Result<(), String> {
    let service = orders_service(&args.database_url).await?;

    let order = service
        .get_order(OrderUuid::from_uuid(args.order))
        .await
        .map_err(|error| format!("failed to load order: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("agency_uuid: {}", order.agency_uuid);
    println!("status: {}", order.status);
    println!(
        "child_birth_date: {}",
        order
            .child_birth_date
            .map_or_else(|| "unknown".to_string(), |value| value.to_string())
    );
    println!("child_age: {}", order.child_age);
    println!(
        "points: {} of {} used",
        order.points_used, order.points_assigned
    );
    println!("total_items: {}", order.total_items);
    println!("created_at: {}", order.created_at);

    for item in &order.items {
        println!(
            "  {} x{} @ {} = {} ({})",
            item.product_name, item.quantity, item.unit_points, item.subtotal, item.product_uuid
        );
    }

    Ok(())
}
