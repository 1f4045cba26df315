use bevy::prelude::*;
use bowling_shared::config::GameConfig;

/// Game configuration shared by every system.
#[derive(Resource, Deref, Clone, Debug, Default)]
pub struct GameSettings(pub GameConfig);

/// Apply `?rows=N&timeout=S` style overrides from a page URL query.
pub fn apply_query_overrides(mut config: GameConfig, query: &str) -> Result<GameConfig, String> {
    let query = query.trim_start_matches('?');
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "rows" => {
                config.pins.rows = value
                    .parse()
                    .map_err(|_| format!("rows must be a whole number, got {value:?}"))?;
            }
            "timeout" => {
                config.throw.roll_timeout = value
                    .parse()
                    .map_err(|_| format!("timeout must be a number, got {value:?}"))?;
            }
            _ => {}
        }
    }
    config.validate()?;
    Ok(config)
}

/// Resolve the game configuration. The second value describes a problem that
/// made us fall back to the defaults; it is logged once logging is up.
#[cfg(not(target_arch = "wasm32"))]
pub fn game_config_from_env_or_location() -> (GameConfig, Option<String>) {
    let Ok(path) = std::env::var("BOWLING_CONFIG") else {
        return (GameConfig::default(), None);
    };
    match GameConfig::load(&path) {
        Ok(config) => (config, None),
        Err(e) => (GameConfig::default(), Some(e.to_string())),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn game_config_from_env_or_location() -> (GameConfig, Option<String>) {
    let Some(window) = web_sys::window() else {
        return (GameConfig::default(), None);
    };
    let query = window.location().search().unwrap_or_default();
    match apply_query_overrides(GameConfig::default(), &query) {
        Ok(config) => (config, None),
        Err(e) => (GameConfig::default(), Some(e)),
    }
}
