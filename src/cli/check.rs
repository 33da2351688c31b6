//! `check` command: validate the configuration.

use anyhow::Result;

use crate::config::ProjectConfig;
use crate::log;
use crate::sync::Source;
use crate::utils::path::relative_to;
use crate::utils::plural_count;

/// Print one line per compiled source.
pub fn run_check(config: &ProjectConfig, sources: &[Source]) -> Result<()> {
    log!("check"; "using {}", config.config_path.display());

    for line in source_lines(config, sources) {
        log!("check"; "{}", line);
    }
    crate::debug_do! {
        for source in sources {
            let patterns: Vec<&str> = source.rules.include().iter().map(|p| p.source()).collect();
            log!("check"; "{}: include {:?}, placeholders {}",
                source.label, patterns, source.syntax.as_str());
        }
    }

    log!("check"; "ok, {}", plural_count(sources.len(), "source"));
    Ok(())
}

fn source_lines(config: &ProjectConfig, sources: &[Source]) -> Vec<String> {
    sources
        .iter()
        .map(|source| {
            format!(
                "{} -> {} (template {})",
                relative_to(&source.dir, &config.root),
                source.url,
                relative_to(&source.template, &config.root),
            )
        })
        .collect()
}
