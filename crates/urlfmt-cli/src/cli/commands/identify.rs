//! `urlfmt identify|formats` – look URLs up against the named formats.

use urlfmt_core::config::UrlfmtConfig;

pub fn run_identify(cfg: &UrlfmtConfig, url: &str) {
    let mut found = false;
    for (name, format) in cfg.identify(url) {
        found = true;
        match format.standardise(url) {
            Ok(canonical) => println!("{:<20} {}", name, canonical),
            Err(e) => println!("{:<20} ({})", name, e),
        }
    }
    if !found {
        println!("No named format matches {}.", url);
    }
}

pub fn run_formats(cfg: &UrlfmtConfig) {
    if cfg.formats.is_empty() {
        println!("No named formats in config.");
        return;
    }
    println!("{:<20} {}", "NAME", "FORMAT");
    for (name, format) in &cfg.formats {
        println!("{:<20} {}", name, format);
    }
}
