use std::io::{self, BufRead};

use crate::types::Record;

/// Returns the identifier of a header line: everything before the first space,
/// or the whole header when it has none.
pub fn get_id(header: &[u8]) -> &[u8] {
    header.split(|&b| b == b' ').next().unwrap_or(header)
}

/// Groups lines of a FASTQ stream into 4-line records.
///
/// Lines are kept as raw bytes and their contents are not validated. A
/// trailing partial record (1 to 3 lines) is dropped without error;
/// `discarded_lines` reports how many lines that was.
pub struct RecordReader<R> {
    reader: R,
    line: Vec<u8>,
    discarded: usize,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            discarded: 0,
            done: false,
        }
    }

    /// Number of trailing lines dropped because they did not form a full record.
    pub fn discarded_lines(&self) -> usize {
        self.discarded
    }

    /// Reads one line without its `\n`. `None` at EOF.
    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        if self.line.last() == Some(&b'\n') {
            self.line.pop();
        }
        Ok(Some(std::mem::take(&mut self.line)))
    }

    fn read_record(&mut self) -> io::Result<Option<Record>> {
        let mut lines: [Vec<u8>; 4] = Default::default();
        for (i, slot) in lines.iter_mut().enumerate() {
            match self.next_line()? {
                Some(line) => *slot = line,
                None => {
                    self.discarded = i;
                    return Ok(None);
                }
            }
        }
        let [header, seq, comment, qual] = lines;
        Ok(Some(Record { header, seq, comment, qual }))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
