//! `urlfmt regex|match|extract|fill|standardise` – offline template operations.

use anyhow::{Context, Result};
use urlfmt_core::config::UrlfmtConfig;
use urlfmt_core::{Arg, FormatUrl};

/// Parses command-line values with the parser of the verb each one fills.
/// Values past the last verb are kept as strings so `fill` can report them.
pub fn parse_values(format: &FormatUrl, values: &[String]) -> Result<Vec<Arg>> {
    let compiled = format.compile()?;
    values
        .iter()
        .enumerate()
        .map(|(i, value)| match compiled.groups().get(i) {
            Some(group) => group
                .parse(value)
                .with_context(|| format!("argument {} for %{}", i, group.verb.letter())),
            None => Ok(Arg::from(value.as_str())),
        })
        .collect()
}

pub fn run_regex(cfg: &UrlfmtConfig, format: &str) -> Result<()> {
    let format = cfg.resolve_format(format)?;
    println!("{}", format.regex()?);
    Ok(())
}

pub fn run_match(cfg: &UrlfmtConfig, format: &str, url: &str) -> Result<()> {
    let format = cfg.resolve_format(format)?;
    println!("{}", format.is_match(url));
    Ok(())
}

pub fn run_extract(cfg: &UrlfmtConfig, format: &str, url: &str) -> Result<()> {
    let format = cfg.resolve_format(format)?;
    let args = format.extract_args(url)?;
    for (i, arg) in args.iter().enumerate() {
        println!("{:<3} {:<7} {}", i, arg.type_name(), arg);
    }
    Ok(())
}

pub fn run_fill(cfg: &UrlfmtConfig, format: &str, values: &[String]) -> Result<()> {
    let format = cfg.resolve_format(format)?;
    let args = parse_values(&format, values)?;
    println!("{}", format.fill(&args)?);
    Ok(())
}

pub fn run_standardise(cfg: &UrlfmtConfig, format: &str, url: &str) -> Result<()> {
    let format = cfg.resolve_format(format)?;
    println!("{}", format.standardise(url)?);
    Ok(())
}
