//! MTG Goldfish - Main Binary
//!
//! Terminal front end for the goldfish table: an interactive prompt plus
//! one-shot subcommands for scripting.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mtg_goldfish::{
    core::CardId,
    game::{
        default_menu, FileStore, MemoryStore, MenuAction, MenuCommand, Outcome, OutputFormat,
        ScryDestination, ScryKind, Session, SnapshotStore, Table, TableAction, TableConfig,
        TableLogger, VerbosityLevel,
    },
    loader::{CardCatalog, CARD_BACK},
    zones::Zone,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Verbosity level for table output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "goldfish")]
#[command(about = "MTG Goldfish - single-player card table", long_about = None)]
struct Cli {
    /// File the table is saved to after every action
    #[arg(long, default_value = "goldfish-state.json", value_name = "FILE")]
    state: PathBuf,

    /// Keep the table in memory only (nothing is read or written)
    #[arg(long)]
    memory: bool,

    /// JSON card catalog (default: built-in power nine catalog)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Set random seed for deterministic shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Verbosity level for table output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, default_value = "normal", short = 'v')]
    verbosity: VerbosityArg,

    /// Print table log lines as JSON objects, one per line
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive table on stdin
    Play,

    /// Apply commands in order, e.g. `goldfish run "draw 7" shuffle "scry 2"`
    Run {
        /// Commands as typed at the interactive prompt
        #[arg(required = true, value_name = "COMMANDS")]
        commands: Vec<String>,

        /// Confirm `restart` without asking
        #[arg(long)]
        yes: bool,
    },

    /// Print the saved table
    Show,

    /// List the menu actions
    Menu,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => CardCatalog::load_from_file(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => CardCatalog::builtin(),
    };
    let config = TableConfig {
        seed: cli.seed,
        ..TableConfig::default()
    };
    let mut logger = TableLogger::with_verbosity(cli.verbosity.into());
    if cli.json {
        logger.set_output_format(OutputFormat::Json);
    }
    let store: Box<dyn SnapshotStore> = if cli.memory {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(&cli.state))
    };

    if let Commands::Menu = cli.command {
        print_menu();
        return Ok(());
    }

    let mut session =
        Session::open(catalog, config, logger, store).context("opening goldfish table")?;

    match cli.command {
        Commands::Play => run_play(&mut session)?,
        Commands::Run { commands, yes } => run_commands(&mut session, &commands, yes)?,
        Commands::Show => print_table(session.table()),
        Commands::Menu => {}
    }

    Ok(())
}

fn run_commands(session: &mut Session, commands: &[String], yes: bool) -> Result<()> {
    for command in commands {
        if command.trim() == "restart" {
            if !yes {
                bail!("restart discards the table; pass --yes to confirm");
            }
            session.restart()?;
            continue;
        }
        let action: TableAction = command.parse()?;
        apply(session, action).with_context(|| format!("command '{command}' failed"))?;
    }
    print_table(session.table());
    Ok(())
}

fn run_play(session: &mut Session) -> Result<()> {
    println!("=== MTG Goldfish ===");
    println!("Type 'help' for commands.\n");
    print_table(session.table());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        prompt(session.table())?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        match verb {
            "quit" | "exit" | "q" => break,
            "help" | "?" => print_help(),
            "zones" | "show" => print_table(session.table()),
            "view" => match words.next().map(str::parse::<Zone>) {
                Some(Ok(zone)) => print_zone(session.table(), zone),
                Some(Err(err)) => eprintln!("{err}"),
                None => eprintln!("view needs a zone"),
            },
            "restart" => {
                if confirm(&mut lines)? {
                    session.restart()?;
                    print_table(session.table());
                }
            }
            "menu" => match words.next() {
                None => print_menu(),
                Some(key) => {
                    let count = words.next().map(str::parse::<usize>).transpose();
                    let command = match (key.parse::<MenuAction>(), count) {
                        (Ok(action), Ok(count)) => action.resolve(count),
                        (Err(err), _) => Err(err),
                        (_, Err(err)) => {
                            eprintln!("invalid number: {err}");
                            continue;
                        }
                    };
                    match command {
                        Ok(MenuCommand::Restart) => {
                            if confirm(&mut lines)? {
                                session.restart()?;
                                print_table(session.table());
                            }
                        }
                        Ok(MenuCommand::View(zone)) => print_zone(session.table(), zone),
                        Ok(MenuCommand::Apply(action)) => report(apply(session, action)),
                        Err(err) => eprintln!("{err}"),
                    }
                }
            },
            _ => match line.parse::<TableAction>() {
                Ok(action) => report(apply(session, action)),
                Err(err) => eprintln!("{err}"),
            },
        }
    }
    Ok(())
}

/// Apply one action and show the result
fn apply(session: &mut Session, action: TableAction) -> mtg_goldfish::Result<Outcome> {
    let outcome = session.dispatch(action)?;
    if let Outcome::Skipped(warning) = outcome {
        println!("{warning}");
    }
    let table = session.table();
    if table.pending_scry().is_some() {
        print_scry(table);
    } else if !matches!(action, TableAction::AssignScry { .. }) {
        print_summary(table);
    }
    Ok(outcome)
}

fn report(result: mtg_goldfish::Result<Outcome>) {
    if let Err(err) = result {
        eprintln!("{err}");
    }
}

fn prompt(table: &Table) -> Result<()> {
    match table.pending_scry() {
        Some(txn) => print!("{}> ", txn.kind()),
        None => print!("> "),
    }
    io::stdout().flush()?;
    Ok(())
}

fn confirm(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<bool> {
    print!("Restart game? This will reset all zones and add 99 placeholder cards to the library. [y/N] ");
    io::stdout().flush()?;
    let answer = lines.next().transpose()?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_help() {
    println!("Table commands:");
    println!("  draw [N]                        draw N cards (default 1)");
    println!("  shuffle                         shuffle the library");
    println!("  oracle                          shuffle the power nine into the library");
    println!("  timetwister                     hand and graveyard into library, shuffle, draw 7");
    println!("  exile-graveyard                 move the graveyard to exile");
    println!("  move ZONE INDEX ZONE [top|bottom]");
    println!("  scry N | surveil N              stage the top N cards");
    println!("  top SLOT | bottom SLOT | unassign SLOT");
    println!("  confirm | cancel                finish the scry or surveil");
    println!("Other:");
    println!("  zones, view ZONE, menu [KEY [N]], restart, help, quit");
}

fn print_menu() {
    println!("Menu:");
    for item in default_menu() {
        let count = if item.action.needs_count() { " N" } else { "" };
        println!("  {:<16} {}{count}", item.label, item.action.key());
    }
    for zone in [Zone::Library, Zone::Graveyard, Zone::Exile] {
        let view = MenuAction::View(zone);
        println!("  {:<16} {}", format!("View {}", zone.title()), view.key());
    }
}

fn print_summary(table: &Table) {
    let counts: Vec<String> = Zone::ALL
        .iter()
        .map(|&zone| format!("{} {}", zone.name(), table.zone(zone).len()))
        .collect();
    println!("[{}]", counts.join(", "));
}

fn print_table(table: &Table) {
    println!("=== Table ===");
    for zone in Zone::ALL {
        let cards = table.zone(zone);
        let mut line = format!("{:<12} ({:>3})", zone.title(), cards.len());
        if !zone.shows_face() && !cards.is_empty() {
            let back = CardId::new(CARD_BACK);
            line.push_str(&format!("  [{}]", table.catalog().display_name(&back)));
        } else if zone.shows_top_only() {
            if let Some(card) = cards.visible() {
                line.push_str(&format!("  top: {}", table.card_name(card)));
            }
        } else {
            let stacks: Vec<String> = cards
                .groups()
                .iter()
                .enumerate()
                .map(|(stack, group)| {
                    let name = table.catalog().display_name(&group.id);
                    match group.count {
                        1 => format!("[{stack}] {name}"),
                        n => format!("[{stack}] {name} x{n}"),
                    }
                })
                .collect();
            if !stacks.is_empty() {
                line.push_str(&format!("  {}", stacks.join(", ")));
            }
        }
        println!("{line}");
    }
    if table.pending_scry().is_some() {
        print_scry(table);
    }
}

/// Full zone listing with the indices `move` expects
fn print_zone(table: &Table, zone: Zone) {
    let cards = table.zone(zone);
    println!("View {} ({} cards)", zone.title(), cards.len());
    if zone == Zone::Library {
        for (index, card) in cards.cards().iter().enumerate() {
            println!("  {index:>3}  {}", table.card_name(card));
        }
        return;
    }
    for group in cards.groups() {
        let name = table.catalog().display_name(&group.id);
        match group.count {
            1 => println!("  {:>3}  {name}", group.first_index),
            n => println!("  {:>3}  {name} x{n}", group.first_index),
        }
    }
}

fn print_scry(table: &Table) {
    let Some(txn) = table.pending_scry() else {
        return;
    };
    let rejected = match txn.kind() {
        ScryKind::Scry => "Bottom of library",
        ScryKind::Surveil => "Graveyard",
    };
    for (label, pile) in [
        ("Unassigned", ScryDestination::Unassigned),
        ("Top of library", ScryDestination::Top),
        (rejected, ScryDestination::Bottom),
    ] {
        let names: Vec<String> = txn
            .pile(pile)
            .iter()
            .map(|&slot| format!("[{slot}] {}", table.card_name(&txn.staged()[slot])))
            .collect();
        println!("  {label:<18} {}", names.join(", "));
    }
}
