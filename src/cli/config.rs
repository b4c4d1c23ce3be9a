use srs_inspector::Config;
use tracing::instrument;

#[instrument(level = "debug", skip_all)]
pub fn show(config: &Config) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
