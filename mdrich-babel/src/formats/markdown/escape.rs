//! Markdown escaping and delimiter sizing.
//!
//! Pure functions over char slices. The exporter decides *where* a character sits (code, line
//! start, heading line); these functions decide what that position requires.

/// Marker of a list-item line: leading indentation width and marker width (spaces included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub indent: usize,
    pub width: usize,
}

impl ListMarker {
    pub fn len(&self) -> usize {
        self.indent + self.width
    }
}

/// Longest run of `c` in `content`.
pub fn longest_run(content: &[char], c: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for &ch in content {
        if ch == c {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Fence length for a code block: at least 3, and longer than any run inside the content.
pub fn fence_length(content: &[char], fence_char: char) -> usize {
    (longest_run(content, fence_char) + 1).max(3)
}

/// Opening and closing delimiters for an inline code span holding `content`.
///
/// The backtick run is one longer than the longest run inside; a space pads both sides when
/// the content starts or ends with a backtick, or starts and ends with a space (CommonMark
/// strips exactly one such space on each side).
pub fn code_span_delimiters(content: &[char]) -> (String, String) {
    let ticks = "`".repeat(longest_run(content, '`') + 1);
    let first = content.first().copied();
    let last = content.last().copied();
    let all_spaces = content.iter().all(|&c| c == ' ');
    let pad = first == Some('`')
        || last == Some('`')
        || (first == Some(' ') && last == Some(' ') && !all_spaces);
    if pad {
        (format!("{ticks} "), format!(" {ticks}"))
    } else {
        (ticks.clone(), ticks)
    }
}

/// Whether `c`, followed by `following`, needs a backslash outside code.
pub fn needs_escape(c: char, following: &[char]) -> bool {
    match c {
        '\\' | '*' | '_' | '`' | '[' | ']' => true,
        '&' => starts_entity(following),
        _ => false,
    }
}

/// `[A-Za-z0-9#]+;`, the shape of an entity or numeric character reference body.
fn starts_entity(following: &[char]) -> bool {
    let body = following
        .iter()
        .take_while(|c| c.is_ascii_alphanumeric() || **c == '#')
        .count();
    body > 0 && following.get(body) == Some(&';')
}

/// Where to insert a backslash so the first content of a line is not read as block syntax.
///
/// `line` starts at the first non-blank content character and runs to the end of the line.
/// Every list-marker shape counts, since the exporter writes list lines only for the markers
/// it recognizes itself. Returns the index of the character to escape.
pub fn line_start_escape(line: &[char]) -> Option<usize> {
    let first = *line.first()?;
    let ends_marker = |i: usize| line.get(i).map_or(true, |&c| is_blank(c));
    match first {
        '#' | '>' => Some(0),
        '~' if line.starts_with(&['~', '~', '~']) => Some(0),
        '-' | '+' | '=' if line.iter().all(|&c| c == first || is_blank(c)) => Some(0),
        '-' | '+' | '*' if ends_marker(1) => Some(0),
        c if c.is_ascii_digit() => {
            let digits = line.iter().take_while(|c| c.is_ascii_digit()).count();
            let is_marker = digits <= 9
                && matches!(line.get(digits), Some('.') | Some(')'))
                && ends_marker(digits + 1);
            is_marker.then_some(digits)
        }
        _ => None,
    }
}

/// Index of a trailing `#` run that would be read as a closing ATX sequence.
pub fn closing_hash_run(line: &[char]) -> Option<usize> {
    let trimmed = line.len() - line.iter().rev().take_while(|&&c| is_blank(c)).count();
    let content = &line[..trimmed];
    let hashes = content.iter().rev().take_while(|&&c| c == '#').count();
    if hashes == 0 {
        return None;
    }
    let start = trimmed - hashes;
    (start == 0 || is_blank(content[start - 1])).then_some(start)
}

/// Detect a list-item marker as the importer writes it: optional indentation, then `bullet`
/// or `1.`, then a space.
pub fn list_marker(line: &[char], bullet: char) -> Option<ListMarker> {
    let indent = line.iter().take_while(|&&c| is_blank(c)).count();
    let rest = &line[indent..];
    let width = if rest.starts_with(&[bullet, ' ']) {
        2
    } else if rest.starts_with(&['1', '.', ' ']) {
        3
    } else {
        return None;
    };
    Some(ListMarker { indent, width })
}

/// Whether `text` alone on a line is a thematic break: three or more `-`, `*` or `_`, blanks
/// allowed in between.
pub fn is_thematic_break(text: &str) -> bool {
    let text = text.trim_matches(is_blank);
    let Some(first) = text.chars().next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_')
        && text.chars().all(|c| c == first || is_blank(c))
        && text.chars().filter(|&c| c == first).count() >= 3
}

/// Link or image destination, wrapped in `<...>` when it would otherwise break the syntax.
pub fn link_destination(url: &str) -> String {
    let needs_angle = url
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '(' | ')' | '<' | '>'));
    if needs_angle {
        format!("<{}>", url.replace('<', "\\<").replace('>', "\\>"))
    } else {
        url.to_string()
    }
}

/// The `](destination "title")` tail of a link or image.
pub fn link_closer(url: &str, title: &str) -> String {
    if title.is_empty() {
        format!("]({})", link_destination(url))
    } else {
        let title = title.replace('\\', "\\\\").replace('"', "\\\"");
        format!("]({} \"{}\")", link_destination(url), title)
    }
}

/// Space or tab, the only whitespace markdown strips or folds.
pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}
