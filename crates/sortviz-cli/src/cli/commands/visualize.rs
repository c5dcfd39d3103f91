//! Interactive visualizer (default command).

use anyhow::Result;
use sortviz_core::Session;
use sortviz_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let session = Session::new(config.delay_ms);
    if !session.commit_input(&config.values) {
        tracing::warn!("config has no values; starting empty");
    }
    sortviz_tui::run(session, config).await
}
