// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration.
//!
//! Values come from `Default`, then environment overrides, then CLI flags (applied by the
//! binary).

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Delay between a user message and its synthetic reply.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);
/// Delay of the simulated proof analysis.
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_RENDER_WIDTH: u16 = 100;

pub const REPLY_DELAY_ENV: &str = "GILC_REPLY_DELAY_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantConfig {
    pub reply_delay: Duration,
    pub analysis_delay: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self { reply_delay: DEFAULT_REPLY_DELAY, analysis_delay: DEFAULT_ANALYSIS_DELAY }
    }
}

impl AssistantConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(ms) = env_millis(REPLY_DELAY_ENV)? {
            config.reply_delay = ms;
        }
        Ok(config)
    }

    pub fn with_reply_delay(mut self, reply_delay: Duration) -> Self {
        self.reply_delay = reply_delay;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Column budget for wrapped prose and table layout.
    pub width: u16,
    /// Append the raw description under an errored diagram.
    pub show_diagram_source_on_error: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { width: DEFAULT_RENDER_WIDTH, show_diagram_source_on_error: false }
    }
}

fn env_millis(name: &str) -> Result<Option<Duration>, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_millis(name, &raw).map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv {
            name: name.to_owned(),
            value: "<non-unicode>".to_owned(),
            reason: "expected an integer number of milliseconds".to_owned(),
        }),
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim().parse::<u64>().map(Duration::from_millis).map_err(|err| ConfigError::InvalidEnv {
        name: name.to_owned(),
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}
