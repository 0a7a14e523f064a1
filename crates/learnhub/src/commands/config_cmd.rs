//! Config management command handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = config::config_path()?;
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let loaded = config::load_config_or_default();
            let out = output::render_single(
                &global.output,
                &loaded,
                detail,
                |loaded| loaded.default_profile.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { server, name } => {
            // Validate before persisting anything.
            let _: url::Url = server
                .parse()
                .map_err(|_| CliError::validation("server", format!("invalid URL: {server}")))?;

            let path = config::config_path()?;
            let mut loaded = config::load_config_or_default();
            loaded.profiles.insert(
                name.clone(),
                Profile {
                    server,
                    insecure: None,
                    refresh_interval_secs: None,
                    timeout_secs: None,
                },
            );
            if loaded.default_profile.is_none() {
                loaded.default_profile = Some(name.clone());
            }
            config::save_config(&loaded, &path)?;

            if !global.quiet {
                eprintln!("profile '{name}' saved to {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::SetToken { token } => {
            let profile = profile_name(global);
            let token = match token {
                Some(token) => token,
                None => rpassword::prompt_password("Session token: ")?,
            };
            if token.is_empty() {
                return Err(CliError::validation("token", "must not be empty"));
            }
            config::store_session_token(&profile, &token)?;
            if !global.quiet {
                eprintln!("token stored for profile '{profile}'");
            }
            Ok(())
        }

        ConfigCommand::ForgetToken => {
            let profile = profile_name(global);
            config::forget_session_token(&profile)?;
            if !global.quiet {
                eprintln!("token removed for profile '{profile}'");
            }
            Ok(())
        }
    }
}

fn profile_name(global: &GlobalOpts) -> String {
    let loaded = config::load_config_or_default();
    config::active_profile_name(global, &loaded)
}

fn detail(loaded: &Config) -> String {
    let mut lines = vec![format!(
        "default profile: {}",
        loaded.default_profile.as_deref().unwrap_or("(none)")
    )];
    for (name, profile) in &loaded.profiles {
        lines.push(format!("[{name}] server = {}", profile.server));
    }
    if loaded.profiles.is_empty() {
        lines.push("(no profiles; run `learnhub config init --server <URL>`)".into());
    }
    lines.join("\n")
}
