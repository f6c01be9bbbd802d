//! Streaming gogrep output into a display sink
//!
//! Pipe reads return arbitrary chunks: a line (or a multi-byte character)
//! can be split across two reads. [`OutputFilter`] keeps the incomplete
//! tail of each chunk until the rest arrives, so filtering always sees
//! whole lines and passthrough text is never cut inside a character.

use crate::sink::DisplaySink;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

const CHUNK_SIZE: usize = 8 * 1024;

/// Turns raw output chunks into text for the sink
#[derive(Debug, Default)]
pub struct OutputFilter {
    filter: Option<String>,
    /// Bytes of the current, not yet terminated line
    line: Vec<u8>,
    /// Incomplete UTF-8 sequence at the end of the last passthrough chunk
    utf8_tail: Vec<u8>,
    lines: Vec<String>,
}

impl OutputFilter {
    /// An empty filter behaves like no filter.
    pub fn new(filter: Option<&str>) -> Self {
        Self {
            filter: filter.filter(|f| !f.is_empty()).map(str::to_string),
            ..Self::default()
        }
    }

    pub fn is_filtering(&self) -> bool {
        self.filter.is_some()
    }

    /// Feed one chunk, returning the text to append.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        match self.filter.clone() {
            Some(filter) => {
                self.line.extend_from_slice(chunk);
                let mut out = Vec::new();
                while let Some(line) = self.take_line() {
                    if let Some(text) = self.keep_if_matching(line, &filter) {
                        out.push(text);
                    }
                }
                out
            }
            None => {
                self.line.extend_from_slice(chunk);
                while let Some(line) = self.take_line() {
                    self.lines.push(line);
                }
                let text = self.decode_passthrough(chunk);
                if text.is_empty() { Vec::new() } else { vec![text] }
            }
        }
    }

    /// Flush whatever is left once the stream has ended.
    pub fn finish(&mut self) -> Vec<String> {
        let rest = std::mem::take(&mut self.line);
        let rest = (!rest.is_empty()).then(|| decode_line(&rest));
        match self.filter.clone() {
            Some(filter) => rest
                .and_then(|line| self.keep_if_matching(line, &filter))
                .into_iter()
                .collect(),
            None => {
                self.lines.extend(rest);
                let tail = std::mem::take(&mut self.utf8_tail);
                if tail.is_empty() {
                    Vec::new()
                } else {
                    vec![String::from_utf8_lossy(&tail).into_owned()]
                }
            }
        }
    }

    /// Lines forwarded so far (all lines when not filtering)
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn take_line(&mut self) -> Option<String> {
        let pos = self.line.iter().position(|&b| b == b'\n')?;
        let raw: Vec<u8> = self.line.drain(..=pos).collect();
        Some(decode_line(&raw[..pos]))
    }

    fn keep_if_matching(&mut self, line: String, filter: &str) -> Option<String> {
        if !line.contains(filter) {
            return None;
        }
        let text = format!("{}\n", line);
        self.lines.push(line);
        Some(text)
    }

    fn decode_passthrough(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.utf8_tail);
        bytes.extend_from_slice(chunk);

        // Hold back a character that continues in the next chunk.
        let keep = match std::str::from_utf8(&bytes) {
            Ok(_) => bytes.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(_) => bytes.len(),
        };
        self.utf8_tail = bytes.split_off(keep);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Copy standard output to the sink, filtered by `filter`.
///
/// Returns the lines that were forwarded.
pub async fn relay_stdout<R, S>(
    reader: R,
    filter: Option<&str>,
    sink: &S,
) -> io::Result<Vec<String>>
where
    R: AsyncRead + Unpin,
    S: DisplaySink + ?Sized,
{
    relay(reader, OutputFilter::new(filter), sink).await
}

/// Copy standard error to the sink unfiltered.
pub async fn relay_stderr<R, S>(reader: R, sink: &S) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    S: DisplaySink + ?Sized,
{
    relay(reader, OutputFilter::new(None), sink).await.map(|_| ())
}

async fn relay<R, S>(
    mut reader: R,
    mut filter: OutputFilter,
    sink: &S,
) -> io::Result<Vec<String>>
where
    R: AsyncRead + Unpin,
    S: DisplaySink + ?Sized,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        for text in filter.push(&buf[..n]) {
            sink.append(&text)?;
        }
    }
    for text in filter.finish() {
        sink.append(&text)?;
    }
    Ok(filter.into_lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn feed(filter: &mut OutputFilter, chunks: &[&[u8]]) -> Vec<String> {
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend(filter.push(chunk));
        }
        out.extend(filter.finish());
        out
    }

    #[test]
    fn test_filter_keeps_matching_lines() {
        let mut filter = OutputFilter::new(Some("foo"));
        let out = feed(&mut filter, &[b"foo bar\n", b"baz\n"]);
        assert_eq!(out, vec!["foo bar\n".to_string()]);
        assert_eq!(filter.into_lines(), vec!["foo bar".to_string()]);
    }

    #[test]
    fn test_filter_joins_lines_split_across_chunks() {
        let mut filter = OutputFilter::new(Some("main.go"));
        let out = feed(
            &mut filter,
            &[
                b"/src/ma",
                b"in.go:3:2: x == nil\n/src/other.go:1:1: y\n/src/main",
                b".go:9:1: z",
            ],
        );
        assert_eq!(
            out,
            vec![
                "/src/main.go:3:2: x == nil\n".to_string(),
                "/src/main.go:9:1: z\n".to_string(),
            ]
        );
    }

    #[test]
    fn test_filter_strips_carriage_returns() {
        let mut filter = OutputFilter::new(Some("a"));
        let out = feed(&mut filter, &[b"a.go:1:1: x\r\nb.go:2:2: y\r\n"]);
        assert_eq!(out, vec!["a.go:1:1: x\n".to_string()]);
    }

    #[test]
    fn test_empty_filter_forwards_chunks_unsplit() {
        let mut filter = OutputFilter::new(Some(""));
        assert!(!filter.is_filtering());
        let out = feed(&mut filter, &[b"one\ntw", b"o\nthree"]);
        assert_eq!(out, vec!["one\ntw".to_string(), "o\nthree".to_string()]);
        assert_eq!(
            filter.into_lines(),
            vec!["one".to_string(), "two".to_string(), "three".to_string()]
        );
    }

    #[test]
    fn test_passthrough_holds_back_split_characters() {
        let text = "héllo\n".as_bytes();
        // 'é' is two bytes; split between them.
        let (first, second) = text.split_at(2);
        let mut filter = OutputFilter::new(None);
        let out = feed(&mut filter, &[first, second]);
        assert_eq!(out.concat(), "héllo\n");
        assert_eq!(out[0], "h");
    }

    #[test]
    fn test_passthrough_keeps_invalid_bytes_lossy() {
        let mut filter = OutputFilter::new(None);
        let out = feed(&mut filter, &[b"a\xffb"]);
        assert_eq!(out.concat(), "a\u{fffd}b");
    }

    #[tokio::test]
    async fn test_relay_stdout_to_sink() {
        let sink = MemorySink::new();
        let input: &[u8] = b"x.go:1:1: foo bar\ny.go:2:2: baz\n";
        let lines = relay_stdout(input, Some("foo"), &sink).await.unwrap();
        assert_eq!(sink.contents(), "x.go:1:1: foo bar\n");
        assert_eq!(lines, vec!["x.go:1:1: foo bar".to_string()]);
    }

    #[tokio::test]
    async fn test_relay_stderr_is_verbatim() {
        let sink = MemorySink::new();
        let input: &[u8] = b"cannot parse expr: 1:3: expected operand";
        relay_stderr(input, &sink).await.unwrap();
        assert_eq!(sink.contents(), "cannot parse expr: 1:3: expected operand");
    }
}
