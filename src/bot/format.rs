//! Formatting of rendered art for chat delivery.

/// Maximum length of a single Bot API text message, in characters.
pub const MAX_MESSAGE_LEN: usize = 4096;

const FENCE_OPEN: &str = "```\n";
const FENCE_CLOSE: &str = "\n```";

/// Characters added by wrapping text in a fence.
const FENCE_OVERHEAD: usize = FENCE_OPEN.len() + FENCE_CLOSE.len();

/// Escape text for use inside a MarkdownV2 `pre` block.
///
/// Only backtick and backslash are special there.
pub fn escape_code(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '`' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wrap text in a fenced code block, escaping as needed.
pub fn fenced(text: &str) -> String {
    format!("{}{}{}", FENCE_OPEN, escape_code(text), FENCE_CLOSE)
}

/// Split art into fenced blocks that each fit in `limit` characters.
///
/// Breaks happen between rows. A row that is too long on its own is cut
/// into pieces, never between an escape and the character it escapes.
pub fn fenced_chunks(text: &str, limit: usize) -> Vec<String> {
    let budget = limit.saturating_sub(FENCE_OVERHEAD).max(2);

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut current_lines = 0usize;

    for line in text.split('\n') {
        for piece in escaped_pieces(line, budget) {
            let piece_len = piece.chars().count();
            let separator = usize::from(current_lines > 0);

            if current_lines > 0 && current_len + separator + piece_len > budget {
                chunks.push(wrap(&current));
                current.clear();
                current_len = 0;
                current_lines = 0;
            }

            if current_lines > 0 {
                current.push('\n');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
            current_lines += 1;
        }
    }

    if current_lines > 0 {
        chunks.push(wrap(&current));
    }

    chunks
}

fn wrap(body: &str) -> String {
    format!("{}{}{}", FENCE_OPEN, body, FENCE_CLOSE)
}

/// Escape a line and cut it into pieces of at most `budget` characters.
/// Always yields at least one (possibly empty) piece.
fn escaped_pieces(line: &str, budget: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_len = 0usize;

    for c in line.chars() {
        let needs_escape = c == '`' || c == '\\';
        let len = if needs_escape { 2 } else { 1 };

        if piece_len + len > budget {
            pieces.push(std::mem::take(&mut piece));
            piece_len = 0;
        }
        if needs_escape {
            piece.push('\\');
        }
        piece.push(c);
        piece_len += len;
    }

    pieces.push(piece);
    pieces
}
