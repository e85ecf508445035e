use clap::Parser;

use crate::extract::ExtractOptions;

#[derive(Parser, Debug)]
#[command(name = "runsfx")]
#[command(version)]
#[command(about = "This is an extractable and executable archive", long_about = None)]
#[command(after_help = "Examples:\n  \
  ./archive.run .              extract into the current directory\n  \
  ./archive.run -c -v out      create out/ and print every extracted file")]
pub struct Cli {
    /// Directory to extract the embedded archive into
    #[arg(value_name = "DESTINATION")]
    pub destination: Option<String>,

    /// Create DESTINATION if it does not exist
    #[arg(short = 'c', long = "create")]
    pub create: bool,

    /// Print each extracted file
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            create_destination: self.create,
            verbose: self.verbose,
            ..ExtractOptions::default()
        }
    }
}
