use anyhow::{Context, Result};

use crate::settings::ConfigArgs;

/// Handler for `racetime config`.
pub fn handle_config_command(args: ConfigArgs) -> Result<()> {
    let config = args.resolve()?;
    let rendered = config
        .to_toml_string()
        .context("failed to render analysis config")?;
    print!("{rendered}");
    Ok(())
}
