mod args;

use crate::args::{Cli, Command, OracleKind, RuleArgs, TableArgs};
use color_eyre::{eyre::WrapErr, Result};
use liferules::{Emulation, LifeRule, LifeRules, NamedRules};
use rulecomp_lib::{verify, Compiler, Life, LifeLike, Oracle, WireWorld};
use serde::Serialize;
use std::{
    fs::File,
    io::{stdout, BufWriter, Write},
};

/// What `rulecomp rule` reports about a rule string.
#[derive(Debug, Serialize)]
struct RuleReport<'a> {
    input: &'a str,
    canonical: &'a str,
    name: Option<&'a str>,
    has_b0_not_s8: bool,
    is_regular_life: bool,
    /// The rules the packed tables are built from: one, or even then odd.
    tables: Vec<String>,
}

/// Compile a transition function, write the rule table, then check it.
fn compile(args: &TableArgs, oracle: &impl Oracle) -> Result<()> {
    log::info!("Compiling with {}", serde_json::to_string(&args.config)?);
    let rules = Compiler::new(args.config).compile(oracle)?;

    match &args.output {
        Some(path) => {
            let mut file = BufWriter::new(
                File::create(path).wrap_err_with(|| format!("cannot create {}", path.display()))?,
            );
            rules.write_table(&mut file)?;
            file.flush()?;
            log::info!("Wrote {} rules to {}", rules.len(), path.display());
        }
        None => {
            let mut out = stdout().lock();
            rules.write_table(&mut out)?;
            out.flush()?;
        }
    }

    if !args.no_verify {
        match verify(&rules, oracle) {
            Ok(()) => log::info!("The rule table matches the transition function"),
            Err(e) => eprintln!("Warning: {e}"),
        }
    }

    Ok(())
}

fn run_table(args: TableArgs) -> Result<()> {
    match args.oracle {
        OracleKind::Life => compile(&args, &Life),
        OracleKind::WireWorld => compile(&args, &WireWorld),
        OracleKind::LifeLike => compile(&args, &LifeLike(args.rule)),
    }
}

fn run_rule(args: RuleArgs) -> Result<()> {
    let named = NamedRules::default();

    for input in &args.rules {
        let life = LifeRules::new(input).wrap_err_with(|| format!("invalid rule {input:?}"))?;
        let rule = life.life_rule();

        let tables = match rule.emulation() {
            Emulation::Direct(mask) | Emulation::Inverted(mask) => vec![mask],
            Emulation::Alternating { even, odd } => vec![even, odd],
        };
        let tables = tables
            .into_iter()
            .map(|mask| match rule.wolfram_number() {
                Some(_) => life.rule().to_string(),
                None => LifeRule::from_mask(mask, rule.is_hex()).to_string(),
            })
            .collect();

        let report = RuleReport {
            input,
            canonical: life.rule(),
            name: named.name_of(life.rule()),
            has_b0_not_s8: life.has_b0_not_s8(),
            is_regular_life: life.is_regular_life(),
            tables,
        };

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}", report.canonical);
            if let Some(name) = report.name {
                println!("  name: {name}");
            }
            println!("  has_b0_not_s8: {}", report.has_b0_not_s8);
            println!("  is_regular_life: {}", report.is_regular_life);
            println!("  tables: {}", report.tables.join(", "));
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let cli = Cli::parse_and_validate();

    match cli.command {
        Command::Table(args) => run_table(args),
        Command::Rule(args) => run_rule(args),
    }
}
