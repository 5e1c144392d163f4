use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Pack text blocks into as few messages as possible.
///
/// Blocks are joined with a blank line and never exceed `max_len`
/// characters per message. A block that is too long on its own is split on
/// line boundaries first and on grapheme boundaries as a last resort; HTML
/// tags left open at a cut are closed there and reopened in the next message.
pub fn pack_messages<S: AsRef<str>>(blocks: &[S], max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut messages = Vec::new();
    let mut current = String::new();

    for block in blocks {
        let block = block.as_ref();
        let pieces = if char_len(block) > max_len {
            split_long(block, max_len)
        } else {
            vec![block.to_string()]
        };

        for piece in pieces {
            if current.is_empty() {
                current = piece;
            } else if char_len(&current) + 2 + char_len(&piece) <= max_len {
                current.push_str("\n\n");
                current.push_str(&piece);
            } else {
                messages.push(std::mem::replace(&mut current, piece));
            }
        }
    }

    if !current.is_empty() {
        messages.push(current);
    }
    trace!(count = messages.len(), "packed messages");
    messages
}

fn split_long(text: &str, max_len: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = Piece::default();

    for line in text.lines() {
        if piece.fits(line, true, max_len) {
            piece.push(line, true);
            continue;
        }
        if piece.has_content {
            pieces.push(piece.cut());
            if piece.fits(line, false, max_len) {
                piece.push(line, false);
                continue;
            }
        }
        for atom in atoms(line) {
            if piece.has_content && !piece.fits(atom, false, max_len) {
                pieces.push(piece.cut());
            }
            piece.push(atom, false);
        }
    }

    if piece.has_content {
        pieces.push(piece.cut());
    }
    pieces
}

/// A message under construction, together with the HTML tags still open at
/// its end.
#[derive(Default)]
struct Piece {
    text: String,
    open: Vec<String>,
    has_content: bool,
}

impl Piece {
    fn fits(&self, addition: &str, new_line: bool, max_len: usize) -> bool {
        let mut open = self.open.clone();
        track_tags(&mut open, addition);
        let sep = usize::from(new_line && self.has_content);
        char_len(&self.text) + sep + char_len(addition) + char_len(&closing_tags(&open)) <= max_len
    }

    fn push(&mut self, addition: &str, new_line: bool) {
        if new_line && self.has_content {
            self.text.push('\n');
        }
        self.text.push_str(addition);
        track_tags(&mut self.open, addition);
        self.has_content = true;
    }

    /// Finish this message and start the next one with the same tags open.
    fn cut(&mut self) -> String {
        let reopen: String = self.open.iter().map(|tag| format!("<{tag}>")).collect();
        let mut done = std::mem::replace(&mut self.text, reopen);
        done.push_str(&closing_tags(&self.open));
        self.has_content = false;
        done
    }
}

fn tag_name(tag: &str) -> &str {
    tag.split_whitespace().next().unwrap_or_default()
}

fn closing_tags(open: &[String]) -> String {
    open.iter()
        .rev()
        .map(|tag| format!("</{}>", tag_name(tag)))
        .collect()
}

/// Apply the tags found in `text` to the stack of open tags.
fn track_tags(open: &mut Vec<String>, text: &str) {
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        let tag = &rest[start + 1..start + len];
        match tag.strip_prefix('/') {
            Some(name) => {
                if let Some(pos) = open.iter().rposition(|t| tag_name(t) == name.trim()) {
                    open.truncate(pos);
                }
            }
            None => open.push(tag.to_string()),
        }
        rest = &rest[start + len + 1..];
    }
}

/// Split a line into pieces that must not be cut: tags, entities and
/// grapheme clusters.
fn atoms(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let unit = match rest.as_bytes()[0] {
            b'<' => rest.find('>').map(|i| i + 1),
            b'&' => rest.find(';').filter(|&i| i <= 10).map(|i| i + 1),
            _ => None,
        };
        let len = unit.unwrap_or_else(|| rest.graphemes(true).next().map_or(rest.len(), str::len));
        let (atom, tail) = rest.split_at(len);
        out.push(atom);
        rest = tail;
    }
    out
}
