use serde_json::json;

use crate::api::JiraClient;
use crate::cli::ConfigSetArgs;
use crate::config::{self, normalize_domain, Config};
use crate::error::{AppError, Result};
use crate::output::{or_dash, View};

pub fn set(view: &mut View, args: ConfigSetArgs) -> Result<()> {
    let path = config::config_path()?;
    let stored = config::load_file(&path)?;
    let updated = apply_set(stored, args)?;
    config::save_file(&path, &updated)?;
    view.success(&format!("Configuration saved to {}", path.display()))?;
    Ok(())
}

/// Merge the provided values over the stored file contents.
fn apply_set(mut stored: Config, args: ConfigSetArgs) -> Result<Config> {
    if args.domain.is_none() && args.email.is_none() && args.token.is_none() {
        return Err(AppError::usage(
            "nothing to set: pass --domain, --email or --token",
        ));
    }
    if let Some(domain) = args.domain {
        stored.domain = normalize_domain(&domain);
    }
    if let Some(email) = args.email {
        stored.email = email.trim().to_string();
    }
    if let Some(token) = args.token {
        stored.api_token = token.trim().to_string();
    }
    Ok(stored)
}

pub fn show(view: &mut View, config: &Config) -> Result<()> {
    let path = config::config_path()?;
    let token = config.masked_token();
    let pairs = [
        ("Domain", or_dash(&config.domain)),
        ("Email", or_dash(&config.email)),
        ("API token", or_dash(&token)),
        ("Config file", path.display().to_string()),
    ];
    let json = json!({
        "domain": config.domain,
        "email": config.email,
        "api_token": token,
        "path": path.display().to_string(),
        "configured": config.is_configured(),
    });
    view.render_record(&pairs, &json)?;

    if !config.is_configured() {
        view.warning("Configuration is incomplete. Run 'jtk config set' to add credentials.")?;
    }
    Ok(())
}

pub fn clear(view: &mut View) -> Result<()> {
    let path = config::config_path()?;
    config::clear(&path)?;
    view.success("Configuration cleared")?;
    Ok(())
}

/// Verify the credentials by fetching the authenticated user.
pub async fn test(view: &mut View, config: &Config) -> Result<()> {
    let client = JiraClient::new(config)?;
    let user = client.current_user().await?;
    view.success(&format!(
        "Authenticated as {} ({})",
        user.display_name,
        if user.email_address.is_empty() {
            client.email()
        } else {
            user.email_address.as_str()
        }
    ))?;
    Ok(())
}
