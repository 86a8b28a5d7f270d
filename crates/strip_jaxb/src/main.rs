// crates/strip_jaxb/src/main.rs

use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;

use strip_jaxb::{run, NormalizeConfig};

fn main() -> Result<()> {
    let matches = Command::new("strip_jaxb")
        .version("0.1.0")
        .about("Removes the non-deterministic header comment from xjc-generated ObjectFactory.java files")
        .arg(
            Arg::new("directory")
                .help("Root directory holding the generated sources")
                .num_args(1)
                .default_value("target/generated-sources"),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .num_args(1)
                .default_value("UTF-8")
                .help("Encoding used to read and write the source files"),
        )
        .arg(
            Arg::new("skip")
                .long("skip")
                .help("Do nothing")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config = NormalizeConfig {
        generated_directory: PathBuf::from(matches.get_one::<String>("directory").unwrap()),
        encoding: matches.get_one::<String>("encoding").unwrap().clone(),
        skip: *matches.get_one::<bool>("skip").unwrap(),
    };

    // A fatal error propagates out of main for a non-zero exit; per-file
    // failures were already logged inside run and leave the status at 0.
    let report = run(&config)?;

    if !config.skip {
        println!(
            "Done: {} stripped, {} already clean, {} failed",
            report.stripped.len(),
            report.unchanged.len(),
            report.failures.len()
        );
    }
    Ok(())
}
