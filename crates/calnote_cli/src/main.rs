//! Terminal front end for calendar notes.
//!
//! # Responsibility
//! - Drive the core editor session from line commands on stdin.
//! - Stand in for the calendar/dialog widgets: print marked dates, prompt
//!   for new tag names, and show non-fatal errors.
//!
//! Notes live in `notes.json` in the working directory.

use calnote_core::{
    default_log_level, init_logging, DateKey, EditorSession, JsonFileStorage, SessionConfig,
    SessionError, SessionEvent, SessionUi, TagChoice,
};
use std::collections::BTreeSet;
use std::io::{self, Write};

const LOG_DIR_NAME: &str = "logs";
const HELP: &str = "\
commands:
  open YYYY-MM-DD     switch to a date
  today               switch to the current date
  list                show entries for the open date
  add                 add a blank entry
  edit N TEXT         replace the text of entry N (not saved yet)
  blur N              leave entry N (saves every entry of the date)
  tag N NAME          set the tag of entry N (`+` creates a new tag)
  delete N            delete entry N
  tags                list known tags
  marks               list dates that have notes
  help                show this help
  quit                exit";

type Session = EditorSession<JsonFileStorage, TerminalUi>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Open(DateKey),
    Today,
    List,
    Add,
    Edit(usize, String),
    Blur(usize),
    Tag(usize, TagChoice),
    Delete(usize),
    Tags,
    Marks,
    Help,
    Quit,
}

/// Prints to stdout and reads dialog answers from stdin.
#[derive(Default)]
struct TerminalUi {
    marked: BTreeSet<DateKey>,
}

impl SessionUi for TerminalUi {
    fn mark_dates(&mut self, dates: &BTreeSet<DateKey>) {
        self.marked = dates.clone();
    }

    fn prompt_tag_name(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}: ");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn report_error(&mut self, error: &SessionError) {
        eprintln!("error: {error}");
    }
}

fn main() {
    if let Ok(cwd) = std::env::current_dir() {
        let log_dir = cwd.join(LOG_DIR_NAME);
        if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut session = match EditorSession::open_json(
        SessionConfig::default(),
        TerminalUi::default(),
        DateKey::today(),
    ) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    println!("calnote {} (type `help`)", calnote_core::core_version());
    print_entries(&session);

    let mut line = String::new();
    loop {
        print!("{}> ", session.open_date_key());
        if io::stdout().flush().is_err() {
            break;
        }
        line.clear();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(err) = run_command(&mut session, command) {
                    eprintln!("error: {err}");
                }
            }
            Err(message) => eprintln!("{message}"),
        }
    }
}

fn run_command(session: &mut Session, command: Command) -> Result<(), String> {
    match command {
        Command::Open(date) => {
            session.open_date(date);
            print_entries(session);
        }
        Command::Today => {
            session.open_date(DateKey::today());
            print_entries(session);
        }
        Command::List => print_entries(session),
        Command::Add => {
            session.handle(SessionEvent::AddEntryRequested).map_err(|e| e.to_string())?;
            print_entries(session);
        }
        Command::Edit(index, content) => {
            let entry = entry_id(session, index)?;
            session
                .handle(SessionEvent::ContentEdited { entry, content })
                .map_err(|e| e.to_string())?;
        }
        Command::Blur(index) => {
            let entry = entry_id(session, index)?;
            if let Some(report) = session
                .handle(SessionEvent::FocusLost(entry))
                .map_err(|e| e.to_string())?
            {
                println!("saved {} note(s) for {}", report.saved_records, report.date);
            }
        }
        Command::Tag(index, choice) => {
            let entry = entry_id(session, index)?;
            session
                .handle(SessionEvent::TagChosen { entry, choice })
                .map_err(|e| e.to_string())?;
            print_entries(session);
        }
        Command::Delete(index) => {
            let entry = entry_id(session, index)?;
            session
                .handle(SessionEvent::DeleteRequested(entry))
                .map_err(|e| e.to_string())?;
            print_entries(session);
        }
        Command::Tags => println!("{}", session.known_tags().join(", ")),
        Command::Marks => {
            let marks: Vec<String> = session.ui().marked.iter().map(|d| d.to_string()).collect();
            if marks.is_empty() {
                println!("(no notes yet)");
            } else {
                println!("{}", marks.join(" "));
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim_start();
    match name {
        "open" => DateKey::parse(rest.trim())
            .map(Command::Open)
            .map_err(|err| err.to_string()),
        "today" => Ok(Command::Today),
        "list" | "" => Ok(Command::List),
        "add" => Ok(Command::Add),
        "edit" => {
            let (index, text) = rest.split_once(' ').unwrap_or((rest, ""));
            Ok(Command::Edit(parse_index(index)?, text.to_string()))
        }
        "blur" => Ok(Command::Blur(parse_index(rest)?)),
        "tag" => {
            let (index, tag) = rest.split_once(' ').unwrap_or((rest, ""));
            let choice = match tag.trim() {
                "+" => TagChoice::CreateNew,
                other => TagChoice::Existing(other.to_string()),
            };
            Ok(Command::Tag(parse_index(index)?, choice))
        }
        "delete" => Ok(Command::Delete(parse_index(rest)?)),
        "tags" => Ok(Command::Tags),
        "marks" => Ok(Command::Marks),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}` (type `help`)")),
    }
}

fn parse_index(value: &str) -> Result<usize, String> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("expected an entry number, got `{}`", value.trim()))
}

fn entry_id(session: &Session, index: usize) -> Result<calnote_core::EntryId, String> {
    session
        .entries()
        .get(index)
        .map(|entry| entry.id())
        .ok_or_else(|| format!("no entry {index} (see `list`)"))
}

fn print_entries(session: &Session) {
    println!("== {}", session.open_date_key());
    for (index, entry) in session.entries().iter().enumerate() {
        let content = if entry.content.is_empty() {
            "(empty)"
        } else {
            entry.content.as_str()
        };
        println!("[{index}] <{}> {content}", entry.tag);
    }
}
