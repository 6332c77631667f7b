//! Database Config

use birthday_box_app::context::DraftBackend;
use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Where shopping drafts are kept between requests (postgres, memory)
    #[arg(long, env = "DRAFT_STORE", default_value_t = DraftBackend::Postgres)]
    pub draft_store: DraftBackend,
}
