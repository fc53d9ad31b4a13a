mod backup;
mod init;
mod inspect;
mod kind;
mod logging;
mod options;
mod upgrade;

use std::io::IsTerminal as _;
use std::process::exit;

use anyhow::Result;
use clap::{ColorChoice, CommandFactory as _, Parser, Subcommand};
use options::Options;

fn main() {
    let args = Args::parse();
    handle_result(run_args(args));
}

fn run_args(args: Args) -> Result<()> {
    logging::set_up(&logging::Options {
        verbose: args.options.verbose,
        color: match args.options.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        },
    })?;
    match &args.command {
        Commands::Init(subargs) => init::init(subargs),
        Commands::Validate(subargs) => inspect::validate(subargs),
        Commands::Print(subargs) => inspect::print(subargs),
        Commands::Backup(subargs) => backup::backup(subargs),
        Commands::Upgrade(subargs) => upgrade::upgrade(subargs),
        Commands::GenerateMan => (|| {
            let cmd = Args::command();
            let man = clap_mangen::Man::new(cmd);
            let mut buffer: Vec<u8> = Default::default();
            man.render(&mut buffer)?;
            println!("{}", String::from_utf8(buffer)?);
            Ok(())
        })(),
        Commands::GenerateMarkdown => {
            let opts = clap_markdown::MarkdownOptions::new().show_footer(false);
            let markdown: String = clap_markdown::help_markdown_custom::<Args>(&opts);
            println!("{}", markdown);
            Ok(())
        }
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Args::command();
            clap_complete::generate(*shell, &mut cmd, "vdoc", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn handle_result(r: Result<()>) {
    match r {
        Ok(()) => {}
        Err(e) => {
            eprintln!("vdoc error: {:#}", e);
            exit(1);
        }
    }
}

/// vdoc: create, check and migrate versioned configuration and state documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a new document with default values
    Init(init::Args),

    /// Check a document against its schema and report unknown fields
    Validate(inspect::Args),

    /// Print a document in canonical form
    Print(inspect::Args),

    /// Copy a document to a new file before changing it
    Backup(backup::Args),

    /// Bring a document from an older schema version up to date and write it to a new file
    Upgrade(upgrade::Args),

    /// Generate markdown documentation for vdoc
    #[command(hide = true)]
    GenerateMarkdown,

    /// Generate a manpage for vdoc
    #[command(hide = true)]
    GenerateMan,

    /// Generate shell completion for vdoc
    #[command(hide = true)]
    GenerateCompletion {
        /// The shell to generate completion for
        #[arg(long)]
        shell: clap_complete::Shell,
    },
}
