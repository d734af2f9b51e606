use super::char_scanner::CharScanner;

/// What a chunk of script text turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// Contiguous non-blank text; may span several lines
    Statement,
    /// One or more consecutive newlines separating statements
    Break,
    /// End of the script
    Eof,
}

/// A span of script text handed to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Statement text or break run
    pub kind: ChunkKind,
    /// Exact slice of the script this chunk covers
    pub text: &'a str,
    /// Script line the chunk starts on (1-indexed)
    pub line: usize,
}

/// Splits a script into statement chunks at blank lines
///
/// A single newline inside a statement is kept in the chunk text; two in a
/// row end the statement and start a break run.
pub struct ChunkSplitter<'a> {
    source: &'a str,
    scanner: CharScanner<'a>,
    /// Byte offset where the next chunk begins
    start: usize,
    /// Line where the next chunk begins
    start_line: usize,
}

impl<'a> ChunkSplitter<'a> {
    /// Creates a splitter over a whole script
    pub fn new(source: &'a str) -> Self {
        ChunkSplitter {
            source,
            scanner: CharScanner::new(source),
            start: 0,
            start_line: 1,
        }
    }

    /// Returns the next chunk; keeps returning `Eof` once the script is spent
    pub fn next_chunk(&mut self) -> Chunk<'a> {
        let start = self.start;
        let line = self.start_line;

        let kind = if start < self.scanner.offset() {
            // the first newline of this break run was consumed while ending
            // the previous statement
            self.scan_break()
        } else {
            match self.scanner.read() {
                None => ChunkKind::Eof,
                Some('\n') => self.scan_break(),
                Some(_) => self.scan_statement(),
            }
        };

        let end = match kind {
            ChunkKind::Statement => self.start,
            _ => {
                let (next_line, _) = self.scanner.position();
                self.start = self.scanner.offset();
                self.start_line = next_line;
                self.start
            }
        };

        Chunk {
            kind,
            text: &self.source[start..end],
            line,
        }
    }

    fn scan_break(&mut self) -> ChunkKind {
        loop {
            match self.scanner.read() {
                Some('\n') => continue,
                Some(_) => {
                    self.scanner.unread();
                    break;
                }
                None => break,
            }
        }
        ChunkKind::Break
    }

    /// Consumes a statement run and leaves `start` at its end
    fn scan_statement(&mut self) -> ChunkKind {
        loop {
            let before = self.scanner.offset();
            let (line, _) = self.scanner.position();
            match self.scanner.read() {
                None => {
                    self.start = self.scanner.offset();
                    self.start_line = self.scanner.position().0;
                    break;
                }
                Some('\n') if self.scanner.peek() == Some('\n') => {
                    self.start = before;
                    self.start_line = line;
                    break;
                }
                Some(_) => {}
            }
        }
        ChunkKind::Statement
    }
}

impl<'a> Iterator for ChunkSplitter<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let chunk = self.next_chunk();
        (chunk.kind != ChunkKind::Eof).then_some(chunk)
    }
}
