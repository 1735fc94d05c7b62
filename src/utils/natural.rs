use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::CharIndices;

/// Compare two strings in natural order, so that "ep2" comes before "ep10".
///
/// Digit runs compare by value, text runs case-insensitively. Ties are broken by the
/// plain byte order, so distinct strings never compare equal.
pub fn natural_cmp(a: impl AsRef<str>, b: impl AsRef<str>) -> Ordering {
    let (a, b) = (a.as_ref(), b.as_ref());
    let mut xs = Chunks::new(a);
    let mut ys = Chunks::new(b);
    loop {
        match (xs.next(), ys.next()) {
            (None, None) => break a.cmp(b),
            (None, Some(_)) => break Ordering::Less,
            (Some(_), None) => break Ordering::Greater,
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => {}
                ord => break ord,
            },
        }
    }
}

#[derive(Debug)]
enum Chunk<'a> {
    Num(&'a str),
    Text(&'a str),
}

impl Chunk<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Num(x), Chunk::Num(y)) => {
                let (tx, ty) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
                // a longer run without leading zeros is a bigger number, whatever its size.
                tx.len()
                    .cmp(&ty.len())
                    .then_with(|| tx.cmp(ty))
                    .then_with(|| x.len().cmp(&y.len()))
            }
            (Chunk::Text(x), Chunk::Text(y)) => x
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(y.chars().flat_map(char::to_lowercase)),
            (Chunk::Num(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Num(_)) => Ordering::Greater,
        }
    }
}

/// Splits a string into alternating runs of ASCII digits and everything else.
struct Chunks<'a> {
    s: &'a str,
    it: Peekable<CharIndices<'a>>,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Chunks {
            s,
            it: s.char_indices().peekable(),
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, c) = self.it.next()?;
        let digit = c.is_ascii_digit();
        let mut end = start + c.len_utf8();
        while let Some(&(i, c)) = self.it.peek()
            && c.is_ascii_digit() == digit
        {
            end = i + c.len_utf8();
            self.it.next();
        }
        let run = &self.s[start..end];
        Some(if digit { Chunk::Num(run) } else { Chunk::Text(run) })
    }
}
