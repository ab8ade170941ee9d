//! `RUST_LOG`-style level filtering for the drains.
//!
//! Directives are a comma-separated list of `level` or
//! `module=level`, last match wins.  Invalid directives are silently
//! dropped so a bad environment variable never disables logging
//! entirely.

use slog::{Drain, Level, OwnedKVList, Record};
use std::{env, str::FromStr};

/// A single parsed directive.
struct Directive {
    prefix: Option<String>,
    level: Level,
}

impl Directive {
    fn parse(directive: &str) -> Option<Self> {
        let mut parts = directive.splitn(2, '=');

        match (parts.next(), parts.next()) {
            (Some(level), None) => Level::from_str(level).ok().map(|level| Self {
                prefix: None,
                level,
            }),
            (Some(prefix), Some(level)) => {
                if !prefix
                    .chars()
                    .all(|c| matches!(c, '0'..='9' | 'a'..='z' | 'A'..='Z' | ':' | '_'))
                {
                    return None;
                }
                Level::from_str(level).ok().map(|level| Self {
                    prefix: Some(prefix.to_string()),
                    level,
                })
            }
            _ => None,
        }
    }

    fn applies_to(&self, module: &str) -> bool {
        self.prefix
            .as_ref()
            .map_or(true, |prefix| module.starts_with(prefix.as_str()))
    }
}

/// Filtering drain configured from the environment.
pub struct Logger<T: Drain> {
    drain: T,
    directives: Vec<Directive>,
}

impl<T: Drain> Logger<T> {
    /// Wrap a drain, reading `RUST_LOG` with the given fallback
    /// filter.
    pub fn with_default_filter(drain: T, filter: &str) -> Self {
        let filter = env::var("RUST_LOG").unwrap_or_else(|_| filter.to_string());

        let directives = filter.split(',').filter_map(Directive::parse).collect();

        Self { drain, directives }
    }

    fn is_enabled(&self, module: &str, level: Level) -> bool {
        // Last matching directive decides.
        self.directives
            .iter()
            .filter(|directive| directive.applies_to(module))
            .last()
            .map(|directive| level <= directive.level)
            .unwrap_or_default()
    }
}

impl<T> Drain for Logger<T>
where
    T: Drain<Ok = ()>,
{
    type Ok = ();
    type Err = T::Err;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<(), T::Err> {
        if !self.is_enabled(record.module(), record.level()) {
            return Ok(());
        }

        self.drain.log(record, values)
    }
}
