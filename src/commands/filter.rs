// Filter command - print the spec names a pattern selects

use anyhow::{Context, Result};
use std::io::BufRead;

use crate::cli::args::FilterArgs;
use crate::filter::SpecFilter;

pub fn handle_filter(args: &FilterArgs) -> Result<()> {
    let filter = if args.regex {
        SpecFilter::from_pattern(&args.pattern)?
    } else {
        SpecFilter::literal(&args.pattern)?
    };

    let names = if args.names.is_empty() {
        std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .context("Failed to read spec names from stdin")?
    } else {
        args.names.clone()
    };

    for name in select(&filter, &names) {
        println!("{}", name);
    }

    Ok(())
}

/// Names accepted by the filter, in input order
pub fn select<'a>(filter: &SpecFilter, names: &'a [String]) -> Vec<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|name| filter.matches(name))
        .collect()
}
