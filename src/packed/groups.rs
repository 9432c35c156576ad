use crate::error::{Error, Result, Stream};
use std::convert::TryFrom;

/// A cursor over a flat token stream made of size-prefixed groups.
///
/// Each group is a leading count `n` followed by `n` records of `width`
/// tokens. The cursor never resynchronises: after a malformed size it yields
/// the error once and is exhausted.
pub struct SizePrefixed<'a> {
    stream: Stream,
    tokens: &'a [i32],
    width: usize,
    pos: usize,
}

impl<'a> SizePrefixed<'a> {
    pub fn new(stream: Stream, tokens: &'a [i32], width: usize) -> Self {
        SizePrefixed {
            stream,
            tokens,
            width,
            pos: 0,
        }
    }

    /// Index of the next size token in the whole stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// Reads the group of `graph`, failing if the stream is already exhausted.
    pub fn next_group(&mut self, graph: usize) -> Result<&'a [i32]> {
        let (stream, pos) = (self.stream, self.pos);
        self.next().unwrap_or_else(|| {
            Err(Error::format(
                stream,
                pos,
                format!("stream ended before the group of graph {}", graph),
            ))
        })
    }

    fn fail(&mut self, reason: String) -> Option<Result<&'a [i32]>> {
        self.tokens = &[];
        Some(Err(Error::format(self.stream, self.pos, reason)))
    }
}

impl<'a> Iterator for SizePrefixed<'a> {
    type Item = Result<&'a [i32]>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&size, rest) = self.tokens.split_first()?;
        let len = match usize::try_from(size)
            .ok()
            .and_then(|n| n.checked_mul(self.width))
        {
            Some(len) if len <= rest.len() => len,
            Some(_) => {
                return self.fail(format!(
                    "size {} needs {} tokens but only {} remain",
                    size,
                    size as usize * self.width,
                    rest.len()
                ))
            }
            None => return self.fail(format!("invalid size {}", size)),
        };
        let (head, tail) = rest.split_at(len);
        self.tokens = tail;
        self.pos += 1 + len;
        Some(Ok(head))
    }
}

/// Counts the well-formed groups before the end of the stream or its first
/// malformed size.
pub fn count_groups(stream: Stream, tokens: &[i32], width: usize) -> usize {
    SizePrefixed::new(stream, tokens, width)
        .take_while(Result::is_ok)
        .count()
}
