use super::{http_transport, ServiceArgs};
use crate::catalog::load_catalog;
use crate::errors::AppResult;
use crate::presentation::{format_catalog, OutputFormat};
use crate::utils::time::{Clock, SystemClock};
use clap::Args;

/// List the reporting months available from the service
#[derive(Args)]
pub struct MonthsCommand {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Output format (console or json)
    #[arg(long, default_value = "console")]
    pub format: String,
}

impl MonthsCommand {
    pub async fn run(&self) -> AppResult<()> {
        let app_config = self.service.app_config()?;
        let transport = http_transport(app_config.service)?;

        let current = SystemClock.current_period();
        let catalog =
            load_catalog(&transport, current, app_config.dashboard.fallback_months).await;
        let selected = catalog.default_selection(current);

        print!(
            "{}",
            format_catalog(&catalog, selected, OutputFormat::parse(&self.format))?
        );
        Ok(())
    }
}
