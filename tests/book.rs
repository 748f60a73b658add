use rc_collector::book::{
    MAX_AUTHOR_LEN, MAX_GENRE_LEN, MAX_PUBLICATION_YEAR, MAX_PUBLISHER_LEN, MAX_TITLE_LEN,
};
use rc_collector::{Book, ValidationError};

fn s(n: usize) -> String {
    "x".repeat(n)
}

#[test]
fn title_boundaries() {
    assert!(Book::new(s(MAX_TITLE_LEN), "A", "P", 2000, "G").is_ok());
    assert_eq!(
        Book::new(s(MAX_TITLE_LEN + 1), "A", "P", 2000, "G"),
        Err(ValidationError::TooLong {
            field: "title",
            len: 101,
            max: 100
        })
    );
    assert_eq!(
        Book::new("", "A", "P", 2000, "G"),
        Err(ValidationError::Empty { field: "title" })
    );
}

#[test]
fn other_string_limits() {
    assert!(Book::new("T", s(MAX_AUTHOR_LEN), s(MAX_PUBLISHER_LEN), 1, s(MAX_GENRE_LEN)).is_ok());
    assert!(Book::new("T", s(MAX_AUTHOR_LEN + 1), "P", 1, "G").is_err());
    assert!(Book::new("T", "A", s(MAX_PUBLISHER_LEN + 1), 1, "G").is_err());
    assert!(Book::new("T", "A", "P", 1, s(MAX_GENRE_LEN + 1)).is_err());
    assert_eq!(
        Book::new("T", "", "P", 1, "G"),
        Err(ValidationError::Empty { field: "author" })
    );
    assert_eq!(
        Book::new("T", "A", "", 1, "G"),
        Err(ValidationError::Empty { field: "publisher" })
    );
}

#[test]
fn empty_genre_and_zero_year_accepted() {
    let b = Book::new("T", "A", "P", 0, "").unwrap();
    assert_eq!(b.year(), 0);
    assert_eq!(b.genre(), "");
}

#[test]
fn year_boundary() {
    assert!(Book::new("T", "A", "P", MAX_PUBLICATION_YEAR, "G").is_ok());
    assert_eq!(
        Book::new("T", "A", "P", MAX_PUBLICATION_YEAR + 1, "G"),
        Err(ValidationError::YearOutOfRange {
            year: 2022,
            max: 2021
        })
    );
}

#[test]
fn lengths_count_bytes() {
    // 50 two-byte characters fill the 100-byte title exactly.
    assert!(Book::new("é".repeat(50), "A", "P", 1, "G").is_ok());
    assert!(Book::new("é".repeat(51), "A", "P", 1, "G").is_err());
}
