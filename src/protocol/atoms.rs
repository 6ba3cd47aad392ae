//! Atom tokenizer
//!
//! Splits a reply line into whitespace-separated atoms, where a
//! double-quoted segment is a single atom with its whitespace intact.
//!
//! ```text
//! 151 "hello" wn "WordNet (r) 3.0 (2006)"
//!  │     │     │            │
//!  0     1     2            3
//! ```

/// Split one reply line into atoms.
///
/// Never fails. An unterminated quote makes the remainder of the line one
/// atom. Inside quotes a backslash escapes the following character.
pub fn split_atoms(line: &str) -> Vec<String> {
    let mut atoms = Vec::new();
    let mut chars = line.chars();
    let mut bare = String::new();

    while let Some(c) = chars.next() {
        if c == '"' {
            if !bare.is_empty() {
                atoms.push(std::mem::take(&mut bare));
            }
            atoms.push(read_quoted(&mut chars));
        } else if c.is_whitespace() {
            if !bare.is_empty() {
                atoms.push(std::mem::take(&mut bare));
            }
        } else {
            bare.push(c);
        }
    }

    if !bare.is_empty() {
        atoms.push(bare);
    }
    atoms
}

/// Consume a quoted atom up to (and including) the closing quote
fn read_quoted(chars: &mut std::str::Chars<'_>) -> String {
    let mut atom = String::new();
    while let Some(c) = chars.next() {
        match c {
            '"' => return atom,
            '\\' => match chars.next() {
                Some(escaped) => atom.push(escaped),
                None => atom.push('\\'),
            },
            _ => atom.push(c),
        }
    }
    atom
}

/// Whether a line carries a quoted atom at all
pub fn has_quoted_atom(line: &str) -> bool {
    line.contains('"')
}

/// Render a command argument as a single atom, quoting when needed
pub fn quote_atom(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\\' || c == '\'');
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
