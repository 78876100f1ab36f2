use crate::context::ExecutionContext;
use anyhow::Result;
use traceit_runtime::Config;

pub fn handle(ctx: &ExecutionContext, api_url: Option<String>) -> Result<()> {
    let config_path = ctx.data_dir().join("config.toml");

    if config_path.exists() {
        let existing = Config::load_from(&config_path)?;
        println!("Config already exists at {}", config_path.display());
        println!("  api_url = {}", existing.api_url);
        if let Some(url) = api_url {
            let updated = Config { api_url: url };
            updated.save_to(&config_path)?;
            println!("Updated api_url to {}", updated.api_url);
        }
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(url) = api_url {
        config.api_url = url;
    }
    config.save_to(&config_path)?;

    println!("Wrote {}", config_path.display());
    println!("  api_url = {}", config.api_url);
    println!();
    println!("Next: traceit auth login --email <email> --password <password>");
    Ok(())
}
