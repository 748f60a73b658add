//! Collector: public layer over `SlotVec` that owns records through
//! `Rc<dyn Record>` handles and persists them as concatenated records.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::Result;
use crate::record::{Record, RecordFactory};
use crate::slot_vec::{IterLive, SlotVec};

pub struct Collector<F> {
    slots: SlotVec<Rc<dyn Record>>,
    factory: F,
}

impl<F: Default + RecordFactory> Default for Collector<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

/// Iterator over live records as `(index, handle)` pairs.
pub struct Iter<'a> {
    it: IterLive<'a, Rc<dyn Record>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Rc<dyn Record>);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
}

impl<F: RecordFactory> Collector<F> {
    pub fn new(factory: F) -> Self {
        Self {
            slots: SlotVec::new(),
            factory,
        }
    }

    /// Append a record and return its index.
    pub fn add_item(&mut self, record: Rc<dyn Record>) -> usize {
        let index = self.slots.push(record);
        debug!(index, "added item");
        index
    }

    /// Mark the item at `index` as removed. Later indices do not move.
    pub fn remove_item(&mut self, index: usize) -> Result<()> {
        self.slots.remove(index)?;
        debug!(index, "removed item");
        Ok(())
    }

    /// Replace the item at `index`; a removed slot becomes live again.
    pub fn update_item(&mut self, index: usize, record: Rc<dyn Record>) -> Result<()> {
        let _previous = self.slots.replace(index, record)?;
        debug!(index, "updated item");
        Ok(())
    }

    /// Handle at `index`, whether or not it has been removed.
    pub fn get_item(&self, index: usize) -> Result<&Rc<dyn Record>> {
        self.slots.get(index)
    }

    pub fn is_removed(&self, index: usize) -> Result<bool> {
        self.slots.is_removed(index)
    }

    /// Slot count, removed items included.
    pub fn get_size(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.slots.live_count()
    }

    pub fn iter_live(&self) -> Iter<'_> {
        Iter {
            it: self.slots.iter_live(),
        }
    }

    /// Purge removed items and renumber the rest contiguously.
    pub fn clean(&mut self) {
        let purged = self.slots.compact();
        debug!(purged, remaining = self.slots.len(), "cleaned collection");
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Write every live record in index order. Removed items are not
    /// persisted. Returns the number of records written.
    pub fn write_to(&self, w: &mut dyn Write) -> Result<usize> {
        let mut written = 0;
        for (_, record) in self.slots.iter_live() {
            record.write(w)?;
            written += 1;
        }
        w.flush()?;
        Ok(written)
    }

    /// Replace the contents with records decoded from `r` until it is
    /// exhausted. On any error the collector is left unchanged.
    pub fn read_from<R: BufRead>(&mut self, mut r: R) -> Result<usize> {
        let mut loaded = SlotVec::new();
        while !r.fill_buf()?.is_empty() {
            loaded.push(self.factory.read(&mut r)?);
        }
        let count = loaded.len();
        self.slots = loaded;
        Ok(count)
    }

    /// Load the collection from `path`, replacing the current contents only
    /// if the whole file decodes.
    pub fn load_collection(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let result = File::open(path)
            .map_err(Into::into)
            .and_then(|file| self.read_from(BufReader::new(file)));
        match result {
            Ok(count) => {
                debug!(path = %path.display(), count, "loaded collection");
                Ok(())
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "load failed");
                Err(err)
            }
        }
    }

    /// Save live records to `path`. Data goes to a uniquely named temporary
    /// file in the same directory that is renamed over `path` once fully
    /// written; on failure the temporary file is dropped and `path` is
    /// untouched.
    pub fn save_collection(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match self.save_via(path) {
            Ok(count) => {
                debug!(path = %path.display(), count, "saved collection");
                Ok(())
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "save failed");
                Err(err)
            }
        }
    }

    fn save_via(&self, path: &Path) -> Result<usize> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        let count = {
            let mut out = BufWriter::new(tmp.as_file_mut());
            self.write_to(&mut out)?
        };
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{Book, BookFactory};
    use crate::errors::CollectorError;

    fn book(title: &str) -> Rc<dyn Record> {
        Rc::new(Book::new(title, "A", "P", 2000, "g").unwrap())
    }

    fn titles(c: &Collector<BookFactory>) -> Vec<String> {
        c.iter_live()
            .map(|(_, r)| r.downcast_ref::<Book>().unwrap().title().to_string())
            .collect()
    }

    #[test]
    fn add_returns_previous_size() {
        let mut c = Collector::new(BookFactory);
        assert_eq!(c.add_item(book("a")), 0);
        assert_eq!(c.add_item(book("b")), 1);
        assert_eq!(c.get_size(), 2);
    }

    #[test]
    fn returned_handle_outlives_clean() {
        let mut c = Collector::new(BookFactory);
        c.add_item(book("keep"));
        let view = Rc::clone(c.get_item(0).unwrap());
        c.remove_item(0).unwrap();
        c.clean();
        assert_eq!(c.get_size(), 0);
        assert_eq!(view.downcast_ref::<Book>().unwrap().title(), "keep");
        assert_eq!(Rc::strong_count(&view), 1);
    }

    #[test]
    fn write_skips_removed() {
        let mut c = Collector::new(BookFactory);
        c.add_item(book("a"));
        c.add_item(book("b"));
        c.add_item(book("c"));
        c.remove_item(1).unwrap();

        let mut buf: Vec<u8> = Vec::new();
        assert_eq!(c.write_to(&mut buf).unwrap(), 2);

        let mut fresh = Collector::new(BookFactory);
        assert_eq!(fresh.read_from(buf.as_slice()).unwrap(), 2);
        assert_eq!(titles(&fresh), vec!["a", "c"]);
        assert!(!fresh.is_removed(1).unwrap());
    }

    /// Invariant: a failed read leaves the previous contents untouched.
    #[test]
    fn failed_read_is_all_or_nothing() {
        let mut src = Collector::new(BookFactory);
        src.add_item(book("x"));
        src.add_item(book("y"));
        let mut buf: Vec<u8> = Vec::new();
        src.write_to(&mut buf).unwrap();
        buf.pop();

        let mut c = Collector::new(BookFactory);
        c.add_item(book("old"));
        c.remove_item(0).unwrap();
        assert!(matches!(
            c.read_from(buf.as_slice()),
            Err(CollectorError::Truncated)
        ));
        assert_eq!(c.get_size(), 1);
        assert!(c.is_removed(0).unwrap());
    }

    #[test]
    fn empty_stream_loads_empty() {
        let mut c = Collector::new(BookFactory);
        c.add_item(book("gone"));
        assert_eq!(c.read_from(std::io::empty()).unwrap(), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn clear_empties_all_slots() {
        let mut c = Collector::new(BookFactory);
        c.add_item(book("a"));
        c.add_item(book("b"));
        c.remove_item(0).unwrap();

        c.clear();
        assert!(c.is_empty());
        assert_eq!(c.get_size(), 0);
        assert_eq!(c.live_count(), 0);
        assert!(matches!(
            c.get_item(0),
            Err(CollectorError::OutOfBounds { index: 0, size: 0 })
        ));
        assert_eq!(c.add_item(book("c")), 0);
    }

    /// Invariant: saving never touches a neighbouring file whose name is the
    /// target plus a suffix.
    #[test]
    fn save_leaves_neighbouring_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hw.data");
        let neighbour = dir.path().join("hw.data.tmp");
        std::fs::write(&neighbour, b"user data").unwrap();

        let mut c = Collector::new(BookFactory);
        c.add_item(book("a"));
        c.save_collection(&path).unwrap();

        assert_eq!(std::fs::read(&neighbour).unwrap(), b"user data");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 2);

        let mut fresh = Collector::new(BookFactory);
        fresh.load_collection(&path).unwrap();
        assert_eq!(titles(&fresh), vec!["a"]);
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hw.data");

        let mut c = Collector::new(BookFactory);
        c.add_item(book("old"));
        c.save_collection(&path).unwrap();
        let before = std::fs::read(&path).unwrap();

        // A directory in place of the target makes the final rename fail.
        let blocked = dir.path().join("blocked");
        std::fs::create_dir_all(blocked.join("inner")).unwrap();
        assert!(c.save_collection(&blocked).is_err());

        assert_eq!(std::fs::read(&path).unwrap(), before);
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 2);
    }
}
