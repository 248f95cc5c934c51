use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use liferules::LifeRule;
use rulecomp_lib::{CompileConfig, Neighborhood};
use std::path::PathBuf;

/// A tool to compile cellular automaton transition functions into rule tables.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a built-in transition function into a rule table.
    Table(TableArgs),

    /// Canonicalize and describe Life-like rule strings.
    Rule(RuleArgs),
}

/// Built-in transition functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OracleKind {
    /// Conway's Game of Life. State 1 is alive; other states never change.
    Life,

    /// WireWorld. Needs exactly 4 states.
    #[value(name = "wireworld")]
    WireWorld,

    /// The Life-like rule given by `--rule`. Needs the Moore neighborhood.
    LifeLike,
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// The transition function to compile.
    #[arg(value_enum)]
    pub oracle: OracleKind,

    /// Rule string for `life-like`, such as `B36/S23`, `B2/S34H` or `W30`.
    #[arg(short, long, default_value = "B3/S23")]
    pub rule: LifeRule,

    #[command(flatten)]
    pub config: CompileConfig,

    /// File to write the rule table to. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip checking the rule table against the transition function.
    ///
    /// The check goes through every sample again, and takes about as long as
    /// the compilation.
    #[arg(long)]
    pub no_verify: bool,
}

#[derive(Debug, Args)]
pub struct RuleArgs {
    /// Rule strings, such as `B3/S23`, `23/3`, `B03/S23` or `W30`.
    #[arg(required = true)]
    pub rules: Vec<String>,

    /// Print one JSON object per rule.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse and validate the command line arguments.
    pub fn parse_and_validate() -> Self {
        let cli = Self::parse();

        let args = match cli.command {
            Command::Table(args) => args,
            command => return Self { command },
        };

        let config = match args.config.check() {
            Ok(config) => config,
            Err(e) => Self::command().error(ErrorKind::ValueValidation, e).exit(),
        };

        match args.oracle {
            OracleKind::WireWorld if config.states != 4 => Self::command()
                .error(ErrorKind::ValueValidation, "wireworld needs exactly 4 states")
                .exit(),
            OracleKind::LifeLike if config.neighborhood != Neighborhood::Moore => Self::command()
                .error(
                    ErrorKind::ValueValidation,
                    "life-like rules need the Moore neighborhood",
                )
                .exit(),
            _ => {}
        }

        Self {
            command: Command::Table(TableArgs { config, ..args }),
        }
    }
}
