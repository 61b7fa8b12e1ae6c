use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::{ClientConfig, DEFAULT_TIMEOUT, DEFAULT_URL};
use crate::error::{Error, Result};
use crate::util::strip_quotes;

#[derive(Debug, Default, PartialEq)]
struct RcConfig {
    url: Option<String>,
    key: Option<String>,
    timeout: Option<Duration>,
    verify: Option<bool>,
}

pub(crate) fn load_config(
    url: Option<String>,
    key: Option<String>,
    timeout: Option<Duration>,
) -> Result<ClientConfig> {
    resolve(
        url,
        key,
        timeout,
        |name| std::env::var(name).ok(),
        &rc_candidates(),
    )
}

fn resolve(
    url: Option<String>,
    key: Option<String>,
    timeout: Option<Duration>,
    env: impl Fn(&str) -> Option<String>,
    rc_candidates: &[PathBuf],
) -> Result<ClientConfig> {
    let mut url = url.or_else(|| env("NPS_API_URL"));
    let mut key = key.or_else(|| env("NPS_API_KEY"));
    let mut timeout = match timeout {
        Some(t) => Some(t),
        None => env("NPS_API_TIMEOUT")
            .map(|v| parse_timeout(&v).ok_or_else(|| invalid_timeout("NPS_API_TIMEOUT", &v)))
            .transpose()?,
    };
    let mut verify: Option<bool> = None;

    for rc_path in rc_candidates {
        if rc_path.exists() {
            let cfg = read_rc(rc_path)?;
            tracing::debug!(path = %rc_path.display(), "loaded NPS configuration file");

            url = url.or(cfg.url);
            key = key.or(cfg.key);
            timeout = timeout.or(cfg.timeout);
            verify = cfg.verify;
            break;
        }
    }

    let key = match key {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            if !rc_candidates.is_empty() {
                return Err(Error::Config(format!(
                    "Missing configuration: key (set NPS_API_KEY or put `key:` in one of: {})",
                    rc_candidates
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
            return Err(Error::Config(
                "Missing configuration: key (set NPS_API_KEY or create .npsrc)".to_string(),
            ));
        }
    };

    Ok(ClientConfig {
        url: url.unwrap_or_else(|| DEFAULT_URL.to_string()),
        key,
        timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        verify: verify.unwrap_or(true),
    })
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rc(&text, path)
}

fn parse_rc(text: &str, path: &Path) -> Result<RcConfig> {
    let mut cfg = RcConfig::default();

    // `key:` may be on one line with the token on the next.
    let mut pending_key: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(pk) = pending_key.take() {
            // URLs contain ':' too, so only a known `name:` ends the continuation.
            if !is_rc_entry(line) {
                cfg.set(pk, strip_quotes(line), path)?;
                continue;
            }
        }

        // Split on the first colon so `url: https://...` keeps its scheme.
        if let Some((k, v)) = line.split_once(':') {
            let k = k.trim();
            let v = strip_quotes(v.trim());
            if v.is_empty() {
                pending_key = Some(k);
            } else {
                cfg.set(k, v, path)?;
            }
        }
    }

    Ok(cfg)
}

const RC_KEYS: [&str; 4] = ["url", "key", "timeout", "verify"];

fn is_rc_entry(line: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(k, _)| RC_KEYS.contains(&k.trim()))
}

impl RcConfig {
    fn set(&mut self, k: &str, v: &str, path: &Path) -> Result<()> {
        match k {
            "url" => self.url = Some(v.to_string()),
            "key" => self.key = Some(v.to_string()),
            "timeout" => {
                let t = parse_timeout(v)
                    .ok_or_else(|| invalid_timeout(&path.display().to_string(), v))?;
                self.timeout = Some(t);
            }
            "verify" => self.verify = Some(v != "0"),
            _ => {}
        }
        Ok(())
    }
}

fn parse_timeout(v: &str) -> Option<Duration> {
    let secs: f64 = v.trim().parse().ok()?;
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

fn invalid_timeout(source: &str, v: &str) -> Error {
    Error::Config(format!(
        "invalid timeout {:?} in {} (expected a positive number of seconds)",
        v, source
    ))
}

fn rc_candidates() -> Vec<PathBuf> {
    // 1) NPS_RC (explicit)
    // 2) ./.npsrc
    // 3) ~/.npsrc
    if let Ok(p) = std::env::var("NPS_RC") {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".npsrc"));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".npsrc"));
    }
    v
}
