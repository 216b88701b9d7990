use anyhow::Result;
use chrono::Local;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_epoch_secs() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Default entry date: today in local time as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
