//! Line protocol for driving a book collector.
//!
//! Each input line is split on whitespace into a command and its arguments.
//! A blank line or end of input ends the session; the first failing command
//! aborts it.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use tracing::debug;

use crate::book::{Book, BookFactory};
use crate::collector::Collector;
use crate::errors::CommandError;

pub const DEFAULT_DATA_FILE: &str = "hw.data";

/// Session-wide settings, filled from command-line flags.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// File used by `load` and `save` when no filename is given.
    pub data_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

/// Book fields as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookArgs {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: u16,
    pub genre: String,
}

impl BookArgs {
    fn parse(
        &[title, author, publisher, year, genre]: &[&str; 5],
    ) -> Result<Self, CommandError> {
        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            publisher: publisher.to_string(),
            year: parse_number(year)?,
            genre: genre.to_string(),
        })
    }

    fn into_book(self) -> Result<Book, CommandError> {
        Ok(Book::new(
            self.title,
            self.author,
            self.publisher,
            self.year,
            self.genre,
        )?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(Option<PathBuf>),
    Save(Option<PathBuf>),
    Clean,
    Add(BookArgs),
    Remove(usize),
    Update(usize, BookArgs),
    View,
}

fn parse_number<N>(arg: &str) -> Result<N, CommandError>
where
    N: core::str::FromStr<Err = core::num::ParseIntError>,
{
    arg.parse().map_err(|source| CommandError::BadNumber {
        arg: arg.to_string(),
        source,
    })
}

fn expect_args(name: &'static str, args: &[&str], n: usize) -> Result<(), CommandError> {
    if args.len() == n {
        Ok(())
    } else {
        Err(CommandError::WrongArgCount(name))
    }
}

fn book_fields<'a, 'b>(
    name: &'static str,
    args: &'a [&'b str],
) -> Result<&'a [&'b str; 5], CommandError> {
    args.try_into().map_err(|_| CommandError::WrongArgCount(name))
}

impl Command {
    /// Parse a tokenized line; `tokens[0]` is the command name or alias.
    pub fn parse(tokens: &[&str]) -> Result<Self, CommandError> {
        let (&name, args) = tokens.split_first().ok_or(CommandError::Empty)?;
        match name {
            "l" | "load" => Ok(Command::Load(args.first().map(PathBuf::from))),
            "s" | "save" => Ok(Command::Save(args.first().map(PathBuf::from))),
            "c" | "clean" => {
                expect_args("clean", args, 0)?;
                Ok(Command::Clean)
            }
            "a" | "add" => {
                let fields = book_fields("add", args)?;
                Ok(Command::Add(BookArgs::parse(fields)?))
            }
            "r" | "remove" => {
                expect_args("remove", args, 1)?;
                Ok(Command::Remove(parse_number(args[0])?))
            }
            "u" | "update" => {
                let (&index, rest) = args
                    .split_first()
                    .ok_or(CommandError::WrongArgCount("update"))?;
                let fields = book_fields("update", rest)?;
                let index = parse_number(index)?;
                Ok(Command::Update(index, BookArgs::parse(fields)?))
            }
            "v" | "view" => {
                expect_args("view", args, 0)?;
                Ok(Command::View)
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Run the command against `col`, writing any listing to `out`.
    pub fn execute(
        self,
        col: &mut Collector<BookFactory>,
        config: &SessionConfig,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match self {
            Command::Load(path) => {
                let path = path.unwrap_or_else(|| config.data_file.clone());
                col.load_collection(&path)
                    .map_err(|source| CommandError::Load { path, source })
            }
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| config.data_file.clone());
                col.save_collection(&path)
                    .map_err(|source| CommandError::Save { path, source })
            }
            Command::Clean => {
                col.clean();
                Ok(())
            }
            Command::Add(args) => {
                col.add_item(Rc::new(args.into_book()?));
                Ok(())
            }
            Command::Remove(index) => Ok(col.remove_item(index)?),
            Command::Update(index, args) => {
                col.update_item(index, Rc::new(args.into_book()?))?;
                Ok(())
            }
            Command::View => view(col, out),
        }
    }
}

fn view(col: &Collector<BookFactory>, out: &mut dyn Write) -> Result<(), CommandError> {
    let mut count = 0;
    for (index, record) in col.iter_live() {
        writeln!(out, "[{index}] {record}")?;
        count += 1;
    }
    writeln!(out, "elements in collection: {count}")?;
    Ok(())
}

/// Tokenize and run a single line.
pub fn perform(
    line: &str,
    col: &mut Collector<BookFactory>,
    config: &SessionConfig,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let command = Command::parse(&tokens)?;
    debug!(?command, "executing");
    command.execute(col, config, out)
}

/// Read commands from `input` until a blank line or end of input. Stops at
/// the first failing command and returns its error.
pub fn run_session<R: BufRead>(
    input: R,
    col: &mut Collector<BookFactory>,
    config: &SessionConfig,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    for line in input.lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        perform(&line, col, config, out)?;
    }
    writeln!(out, "Execution completed successfully")?;
    Ok(())
}
