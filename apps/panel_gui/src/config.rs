use std::{collections::HashMap, fs};

const CONFIG_FILE: &str = "company_panel.toml";
const SERVER_URL_ENV: &str = "COMPANY_API_URL";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
        }
    }
}

/// Defaults, then the optional config file, then the environment.
/// The `--server-url` flag is applied on top by main.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        apply_file_config(&mut settings, &raw);
    }

    apply_env_override(&mut settings, std::env::var(SERVER_URL_ENV).ok());

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
    }
}

fn apply_env_override(settings: &mut Settings, value: Option<String>) {
    if let Some(server_url) = value {
        settings.server_url = server_url;
    }
}
