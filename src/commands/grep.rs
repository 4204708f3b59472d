// Grep command - print the --grep value found in client arguments

use anyhow::Result;

use crate::cli::args::GrepArgs;
use crate::filter::grep_option;

pub fn handle_grep(args: &GrepArgs) -> Result<()> {
    println!("{}", grep_option(&args.client_args()));
    Ok(())
}
