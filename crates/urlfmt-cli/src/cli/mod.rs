//! CLI for urlfmt format URLs.

mod commands;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use urlfmt_core::config::{self, UrlfmtConfig};
use urlfmt_core::http::{HttpClient, Method};
use urlfmt_core::retry::RetryPolicy;

use commands::{
    run_extract, run_fill, run_formats, run_identify, run_json, run_match, run_regex, run_soup,
    run_standardise,
};

/// Top-level CLI for urlfmt.
#[derive(Debug, Parser)]
#[command(name = "urlfmt")]
#[command(about = "urlfmt: fill, match and reverse printf-style URL templates", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/urlfmt/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Request options shared by `soup` and `json`.
#[derive(Debug, Clone, Args)]
pub struct FetchOpts {
    /// Request method.
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request body.
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Extra request header as `Name: value`. May be repeated.
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Fetch this URL instead of the filled format.
    #[arg(long)]
    pub url: Option<String>,

    /// Attempts before giving up (default from config).
    #[arg(long, value_name = "N")]
    pub tries: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the regex a format compiles to.
    Regex {
        /// Named format or literal template.
        format: String,
    },

    /// Check whether a URL matches a format.
    Match {
        /// Named format or literal template.
        format: String,
        url: String,
    },

    /// Print the typed arguments a URL was filled with.
    Extract {
        /// Named format or literal template.
        format: String,
        url: String,
    },

    /// Fill a format. Values are written as they appear in a filled URL.
    Fill {
        /// Named format or literal template.
        format: String,
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Rewrite a URL into the canonical https form of a format.
    Standardise {
        /// Named format or literal template.
        format: String,
        url: String,
    },

    /// List the named formats that match a URL.
    Identify {
        url: String,
    },

    /// List the named formats from the config file.
    Formats,

    /// Fetch a format as HTML; print the whole page or the text of matching elements.
    Soup {
        /// Named format or literal template.
        format: String,
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,

        /// CSS selector; retried until it matches at least one element.
        #[arg(long, short = 's')]
        select: Option<String>,

        #[command(flatten)]
        fetch: FetchOpts,
    },

    /// Fetch a format as a JSON object and print it.
    Json {
        /// Named format or literal template.
        format: String,
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,

        /// JSON pointer (e.g. `/query_summary/num_reviews`); retried until present.
        #[arg(long, short = 'p')]
        pointer: Option<String>,

        /// Print on one line.
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        fetch: FetchOpts,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Regex { format } => run_regex(&cfg, &format)?,
            CliCommand::Match { format, url } => run_match(&cfg, &format, &url)?,
            CliCommand::Extract { format, url } => run_extract(&cfg, &format, &url)?,
            CliCommand::Fill { format, values } => run_fill(&cfg, &format, &values)?,
            CliCommand::Standardise { format, url } => run_standardise(&cfg, &format, &url)?,
            CliCommand::Identify { url } => run_identify(&cfg, &url),
            CliCommand::Formats => run_formats(&cfg),
            CliCommand::Soup {
                format,
                values,
                select,
                fetch,
            } => run_soup(&cfg, &format, &values, select.as_deref(), &fetch)?,
            CliCommand::Json {
                format,
                values,
                pointer,
                compact,
                fetch,
            } => run_json(&cfg, &format, &values, pointer.as_deref(), compact, &fetch)?,
        }

        Ok(())
    }
}

impl FetchOpts {
    pub fn method(&self) -> Result<Method> {
        match Method::parse(&self.method) {
            Some(m) => Ok(m),
            None => bail!("invalid request method {:?}", self.method),
        }
    }

    /// Splits each `Name: value` header.
    pub fn header_pairs(&self) -> Result<Vec<(String, String)>> {
        self.headers
            .iter()
            .map(|h| match h.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    Ok((name.trim().to_string(), value.trim().to_string()))
                }
                _ => bail!("header {:?} is not of the form `Name: value`", h),
            })
            .collect()
    }

    pub fn client_and_policy(&self, cfg: &UrlfmtConfig) -> Result<(HttpClient, RetryPolicy)> {
        let mut policy = cfg.retry.policy()?;
        if let Some(n) = self.tries {
            policy.max_attempts = n.max(1);
        }
        Ok((HttpClient::from_config(&cfg.http), policy))
    }
}

#[cfg(test)]
mod tests;
