//! `urlfmt soup|json` – fetch a format URL and print what came back.

use anyhow::{anyhow, Result};
use scraper::Selector;
use serde_json::Value;
use urlfmt_core::config::UrlfmtConfig;
use urlfmt_core::http::Request;
use urlfmt_core::FormatUrl;

use super::format::parse_values;
use crate::cli::FetchOpts;

/// The request `opts` describe: the filled format unless `--url` overrides it.
fn build_request(format: &FormatUrl, values: &[String], opts: &FetchOpts) -> Result<Request> {
    let url = match &opts.url {
        Some(url) => url.clone(),
        None => format.fill(&parse_values(format, values)?)?,
    };
    let body = opts.data.as_ref().map(|d| d.as_bytes().to_vec());
    let mut req = Request::new(opts.method()?, url, body)?;
    for (name, value) in opts.header_pairs()? {
        req = req.header(name, value);
    }
    Ok(req)
}

pub fn run_soup(
    cfg: &UrlfmtConfig,
    format: &str,
    values: &[String],
    select: Option<&str>,
    opts: &FetchOpts,
) -> Result<()> {
    let format = cfg.resolve_format(format)?;
    let req = build_request(&format, values, opts)?;
    let selector = select
        .map(|css| Selector::parse(css).map_err(|_| anyhow!("invalid CSS selector {:?}", css)))
        .transpose()?;
    let (client, policy) = opts.client_and_policy(cfg)?;

    tracing::info!(url = %req.url, "fetching soup");
    let mut lines = Vec::new();
    format.retry_soup(
        &client,
        Some(&req),
        &policy,
        |doc, resp| {
            lines.clear();
            match &selector {
                Some(selector) => {
                    lines.extend(
                        doc.select(selector)
                            .map(|el| el.text().collect::<String>().trim().to_string()),
                    );
                    if lines.is_empty() {
                        return Err(format!("no element matches (status {})", resp.status).into());
                    }
                }
                None => lines.push(doc.root_element().html()),
            }
            Ok(())
        },
        &[],
    )?;

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

pub fn run_json(
    cfg: &UrlfmtConfig,
    format: &str,
    values: &[String],
    pointer: Option<&str>,
    compact: bool,
    opts: &FetchOpts,
) -> Result<()> {
    let format = cfg.resolve_format(format)?;
    let req = build_request(&format, values, opts)?;
    let (client, policy) = opts.client_and_policy(cfg)?;

    tracing::info!(url = %req.url, "fetching JSON");
    let mut picked = Value::Null;
    format.retry_json(
        &client,
        Some(&req),
        &policy,
        |body, _| {
            let whole = Value::Object(body.clone());
            picked = match pointer {
                Some(p) => whole
                    .pointer(p)
                    .cloned()
                    .ok_or_else(|| format!("{:?} not found in response", p))?,
                None => whole,
            };
            Ok(())
        },
        &[],
    )?;

    let out = if compact {
        serde_json::to_string(&picked)?
    } else {
        serde_json::to_string_pretty(&picked)?
    };
    println!("{}", out);
    Ok(())
}
