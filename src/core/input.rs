//! Key parsing for legacy (non-kitty) terminal byte sequences.

const ESC: char = '\x1b';

/// Split a raw terminal chunk into individual sequences.
///
/// Escape sequences (CSI, SS3, alt+char) and control bytes become their own
/// segments; runs of printable text are kept together.
pub fn split_sequences(data: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut index = 0;
    let mut text_start: Option<usize> = None;

    while index < data.len() {
        let Some(ch) = data[index..].chars().next() else {
            break;
        };

        if !is_control_char(ch) {
            text_start.get_or_insert(index);
            index += ch.len_utf8();
            continue;
        }

        if let Some(start) = text_start.take() {
            segments.push(&data[start..index]);
        }

        let len = if ch == ESC {
            escape_sequence_len(&data[index..])
        } else {
            ch.len_utf8()
        };
        segments.push(&data[index..index + len]);
        index += len;
    }

    if let Some(start) = text_start {
        segments.push(&data[start..]);
    }

    segments
}

fn is_control_char(ch: char) -> bool {
    (ch as u32) < 0x20 || ch == '\x7f'
}

/// Length in bytes of the escape sequence at the start of `data`.
fn escape_sequence_len(data: &str) -> usize {
    let bytes = data.as_bytes();
    match bytes.get(1) {
        None => 1,
        Some(b'[') => {
            let mut end = 2;
            while end < bytes.len() {
                let byte = bytes[end];
                end += 1;
                if (0x40..=0x7e).contains(&byte) {
                    return end;
                }
            }
            bytes.len()
        }
        Some(b'O') if bytes.len() > 2 => 3,
        Some(_) => {
            // ESC followed by one char is an alt chord; keep multi-byte chars intact.
            let next_len = data[1..].chars().next().map(char::len_utf8).unwrap_or(0);
            1 + next_len
        }
    }
}

/// Return the decoded text for printable input, or `None` for control sequences.
pub fn parse_text(data: &str) -> Option<String> {
    if data.is_empty() || data.chars().any(is_control_char) {
        return None;
    }
    Some(data.to_string())
}

/// Identify a single key sequence (see [`split_sequences`]) as a normalized key id.
pub fn parse_key(data: &str) -> Option<String> {
    let named = match data {
        "\r" | "\n" => "enter",
        "\x1b\r" => "alt+enter",
        "\t" => "tab",
        "\x1b[Z" => "shift+tab",
        "\x1b" => "escape",
        "\x7f" | "\x08" => "backspace",
        "\x1b\x7f" => "alt+backspace",
        "\x1b[A" | "\x1bOA" => "up",
        "\x1b[B" | "\x1bOB" => "down",
        "\x1b[C" | "\x1bOC" => "right",
        "\x1b[D" | "\x1bOD" => "left",
        "\x1b[1;5C" | "\x1b[1;3C" => "ctrl+right",
        "\x1b[1;5D" | "\x1b[1;3D" => "ctrl+left",
        "\x1b[H" | "\x1bOH" | "\x1b[1~" | "\x1b[7~" => "home",
        "\x1b[F" | "\x1bOF" | "\x1b[4~" | "\x1b[8~" => "end",
        "\x1b[2~" => "insert",
        "\x1b[3~" => "delete",
        "\x1b[5~" => "pageUp",
        "\x1b[6~" => "pageDown",
        "\x1bOP" | "\x1b[11~" => "f1",
        "\x1bOQ" | "\x1b[12~" => "f2",
        "\x1bOR" | "\x1b[13~" => "f3",
        "\x1bOS" | "\x1b[14~" => "f4",
        _ => "",
    };
    if !named.is_empty() {
        return Some(named.to_string());
    }

    let mut chars = data.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(ch), None, None) if ('\x01'..='\x1a').contains(&ch) => {
            let letter = (b'a' + (ch as u8 - 1)) as char;
            Some(format!("ctrl+{letter}"))
        }
        (Some(ESC), Some(ch), None) if !is_control_char(ch) => Some(format!("alt+{ch}")),
        _ => None,
    }
}
