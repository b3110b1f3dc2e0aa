mod app;
mod help;
mod theme;
mod widget;
use crate::app::App;
use anyhow::Context;
use datefield::{DateField, ShortDate, SystemClock};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { date, log_file })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, log_file } => {
                if let Some(path) = log_file {
                    init_logging(&path)?;
                }
                let clock = SystemClock::local().context("failed to determine local time zone")?;
                let mut field = DateField::new(ShortDate, clock);
                if let Some(date) = date {
                    field = field.with_selected_date(date);
                }
                with_terminal(|terminal| {
                    App::new(field).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: datefield [-l|--log-file PATH] [YYYY-MM-DD]");
                println!();
                println!("Date-entry field with +N/-N day offsets and a popup calendar");
                println!();
                println!("Options:");
                println!("  -l PATH, --log-file PATH");
                println!("                    Write debug logs to PATH (filter with RUST_LOG)");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// The terminal is in use, so log records can only go to a file.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(
            parse(&[]).ok(),
            Some(Command::Run {
                date: None,
                log_file: None
            })
        );
    }

    #[test]
    fn test_date_and_log_file() {
        assert_eq!(
            parse(&["-l", "field.log", "2026-10-19"]).ok(),
            Some(Command::Run {
                date: Some(date!(2026 - 10 - 19)),
                log_file: Some(PathBuf::from("field.log")),
            })
        );
        assert_eq!(
            parse(&["--log-file=x.log"]).ok(),
            Some(Command::Run {
                date: None,
                log_file: Some(PathBuf::from("x.log")),
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).ok(), Some(Command::Help));
        assert_eq!(parse(&["-V"]).ok(), Some(Command::Version));
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["10/19/2026"]).is_err(), "dates must be YYYY-MM-DD");
        assert!(parse(&["2026-10-19", "2026-10-20"]).is_err(), "one date only");
        assert!(parse(&["--frobnicate"]).is_err(), "unknown option");
        assert!(parse(&["-l"]).is_err(), "missing log path");
    }
}
