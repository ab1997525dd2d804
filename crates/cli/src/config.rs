//! Configuration resolution
//!
//! Precedence, highest first: command-line flag or environment variable,
//! config file, built-in default.

use crate::GeneratorArgs;
use anyhow::Context;
use fsschema_codegen::GeneratorConfig;

/// Build the generator configuration for a run
pub fn resolve(args: &GeneratorArgs) -> anyhow::Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(prefix) = &args.table_prefix {
        config.table_prefix = prefix.clone();
    }
    if let Some(policy) = args.primary_key {
        config.primary_key = policy;
    }

    tracing::debug!(
        table_prefix = %config.table_prefix,
        primary_key = %config.primary_key,
        "resolved configuration",
    );
    Ok(config)
}
