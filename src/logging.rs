use std::env;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Level::Error),
            "warn" | "warning" => Some(Level::Warn),
            "info" => Some(Level::Info),
            "debug" | "trace" => Some(Level::Debug),
            _ => None,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            _ => Level::Debug,
        }
    }
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

/// Set the stderr verbosity from `CATALOG_LOG`, raised to `info` by `--verbose`.
pub fn init(verbose: bool) {
    let from_env = env::var("CATALOG_LOG")
        .ok()
        .and_then(|raw| Level::parse(&raw))
        .unwrap_or(Level::Warn);
    let level = if verbose {
        from_env.max(Level::Info)
    } else {
        from_env
    };
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

fn enabled(level: Level) -> bool {
    level <= Level::from_u8(MAX_LEVEL.load(Ordering::Relaxed))
}

fn sanitize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_sep = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else if !ch.is_control() {
            out.push(ch);
            prev_sep = false;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "na".to_string()
    } else {
        trimmed.to_string()
    }
}

fn format_line(level: Level, stage: &str, fields: &[(&str, &str)]) -> String {
    let mut line = format!(
        "CATALOG_LOG level={} stage={}",
        level.as_str(),
        sanitize_value(stage)
    );
    for (key, value) in fields {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        line.push_str(&sanitize_value(value));
    }
    line
}

pub fn emit(level: Level, stage: &str, fields: &[(&str, &str)]) {
    if enabled(level) {
        eprintln!("{}", format_line(level, stage, fields));
    }
}

pub fn info(stage: &str, fields: &[(&str, &str)]) {
    emit(Level::Info, stage, fields);
}

pub fn warn(stage: &str, fields: &[(&str, &str)]) {
    emit(Level::Warn, stage, fields);
}

pub fn debug(stage: &str, fields: &[(&str, &str)]) {
    emit(Level::Debug, stage, fields);
}
