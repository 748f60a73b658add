//! Book: the record kind stored by the command-line tool.

use core::any::Any;
use core::fmt;
use std::io::{Read, Write};
use std::rc::Rc;

use crate::codec::{read_number, read_string, write_number, write_string};
use crate::errors::{Result, ValidationError};
use crate::record::{Record, RecordFactory};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_AUTHOR_LEN: usize = 150;
pub const MAX_PUBLISHER_LEN: usize = 300;
pub const MAX_GENRE_LEN: usize = 100;
pub const MAX_PUBLICATION_YEAR: u16 = 2021;

/// A book entry. Lengths are in bytes; the year may be 0 and the genre may
/// be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author: String,
    publisher: String,
    year: u16,
    genre: String,
}

fn bounded(
    field: &'static str,
    value: &str,
    max: usize,
    allow_empty: bool,
) -> core::result::Result<(), ValidationError> {
    if !allow_empty && value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.len() > max {
        return Err(ValidationError::TooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publisher: impl Into<String>,
        year: u16,
        genre: impl Into<String>,
    ) -> core::result::Result<Self, ValidationError> {
        let book = Self {
            title: title.into(),
            author: author.into(),
            publisher: publisher.into(),
            year,
            genre: genre.into(),
        };
        book.validate()?;
        Ok(book)
    }

    fn validate(&self) -> core::result::Result<(), ValidationError> {
        bounded("title", &self.title, MAX_TITLE_LEN, false)?;
        bounded("author", &self.author, MAX_AUTHOR_LEN, false)?;
        bounded("publisher", &self.publisher, MAX_PUBLISHER_LEN, false)?;
        if self.year > MAX_PUBLICATION_YEAR {
            return Err(ValidationError::YearOutOfRange {
                year: self.year,
                max: MAX_PUBLICATION_YEAR,
            });
        }
        bounded("genre", &self.genre, MAX_GENRE_LEN, true)
    }

    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn author(&self) -> &str {
        &self.author
    }
    pub fn publisher(&self) -> &str {
        &self.publisher
    }
    pub fn year(&self) -> u16 {
        self.year
    }
    pub fn genre(&self) -> &str {
        &self.genre
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.title, self.author, self.publisher, self.year, self.genre
        )
    }
}

impl Record for Book {
    fn write(&self, w: &mut dyn Write) -> Result<()> {
        debug_assert!(self.validate().is_ok(), "book invariant violated");
        write_string(w, &self.title, MAX_TITLE_LEN)?;
        write_string(w, &self.author, MAX_AUTHOR_LEN)?;
        write_string(w, &self.publisher, MAX_PUBLISHER_LEN)?;
        write_number(w, self.year)?;
        write_string(w, &self.genre, MAX_GENRE_LEN)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reads `Book` records in the order `Book::write` produces them.
#[derive(Debug, Default, Clone, Copy)]
pub struct BookFactory;

impl RecordFactory for BookFactory {
    fn read(&self, r: &mut dyn Read) -> Result<Rc<dyn Record>> {
        let title = read_string(r, MAX_TITLE_LEN)?;
        let author = read_string(r, MAX_AUTHOR_LEN)?;
        let publisher = read_string(r, MAX_PUBLISHER_LEN)?;
        let year = read_number::<u16>(r)?;
        let genre = read_string(r, MAX_GENRE_LEN)?;
        Ok(Rc::new(Book::new(title, author, publisher, year, genre)?))
    }
}
