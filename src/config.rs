use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use config::{Config, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "hub.yml";
const QUERY_RETRY_ENV: &str = "HUB_QUERY_RETRY";
const STALE_TIME_ENV: &str = "HUB_STALE_TIME_MS";
const GC_TIME_ENV: &str = "HUB_GC_TIME_MS";
const REFETCH_ACTIVE_ENV: &str = "HUB_REFETCH_ACTIVE";

const DEFAULT_RETRY: u32 = 1;
const DEFAULT_GC_TIME: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Extra attempts a read makes after its first failure
    pub query_retry: u32,
    /// How long fetched data counts as fresh. `None` never goes stale on its own
    pub stale_time: Option<Duration>,
    /// How long an entry without observers survives `gc`
    pub gc_time: Duration,
    /// Whether successful mutations refetch mounted queries right away
    pub refetch_active: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            query_retry: DEFAULT_RETRY,
            stale_time: Some(Duration::ZERO),
            gc_time: DEFAULT_GC_TIME,
            refetch_active: true,
        }
    }
}

#[derive(Deserialize, Default)]
struct FileConfig {
    query_retry: Option<u32>,
    stale_time_ms: Option<u64>,
    gc_time_ms: Option<u64>,
    refetch_active: Option<bool>,
}

fn load_file_config(path: &str) -> Result<FileConfig> {
    let settings = Config::builder()
        .add_source(File::with_name(path).required(false))
        .build()
        .map_err(|e| anyhow!("Failed to read config file {path}: {e}"))?;

    settings
        .try_deserialize::<FileConfig>()
        .map_err(|e| anyhow!("Failed to deserialize config file {path}: {e}"))
}

/// Try to parse env variable. If it's not set, return None. If it's invalid, treat it as an error.
fn try_from_env<T, F>(env_var: &str, f: F) -> Result<Option<T>>
where
    F: FnOnce(String) -> Result<T>,
{
    match std::env::var(env_var) {
        Ok(raw) => {
            let val = f(raw).map_err(|_| anyhow!("Failed to parse {}", env_var))?;
            Ok(Some(val))
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(_) => bail!("Could not read {env_var} from env"),
    }
}

fn parse_bool(raw: String) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("not a boolean: {other}"),
    }
}

/// Load settings from env with fallback to `hub.yml`, then to defaults
pub fn load() -> Result<Settings> {
    load_from(DEFAULT_CONFIG_PATH)
}

pub fn load_from(path: &str) -> Result<Settings> {
    let retry_opt = try_from_env(QUERY_RETRY_ENV, |s| s.parse::<u32>().map_err(|e| e.into()))?;
    let stale_opt = try_from_env(STALE_TIME_ENV, |s| s.parse::<u64>().map_err(|e| e.into()))?;
    let gc_opt = try_from_env(GC_TIME_ENV, |s| s.parse::<u64>().map_err(|e| e.into()))?;
    let refetch_opt = try_from_env(REFETCH_ACTIVE_ENV, parse_bool)?;

    let file = load_file_config(path)?;
    let defaults = Settings::default();

    let query_retry = retry_opt.or(file.query_retry).unwrap_or(defaults.query_retry);

    // u64::MAX in either source means "never stale"
    let stale_time = match stale_opt.or(file.stale_time_ms) {
        Some(u64::MAX) => None,
        Some(ms) => Some(Duration::from_millis(ms)),
        None => defaults.stale_time,
    };

    let gc_time = gc_opt
        .or(file.gc_time_ms)
        .map(Duration::from_millis)
        .unwrap_or(defaults.gc_time);

    let refetch_active = refetch_opt
        .or(file.refetch_active)
        .unwrap_or(defaults.refetch_active);

    if refetch_opt.is_none() && file.refetch_active.is_none() {
        tracing::debug!("{REFETCH_ACTIVE_ENV} is not set, refetching active queries by default");
    }

    Ok(Settings {
        query_retry,
        stale_time,
        gc_time,
        refetch_active,
    })
}
