//! Bordered text tables for terminal output.
//!
//! Content comes from the core as plain lines; this module only adds
//! borders and padding.

/// Frames `lines` in a box sized to the widest line.
pub fn boxed(lines: &[String]) -> Vec<String> {
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let border = format!("+{}+", "-".repeat(width));

    let mut framed = Vec::with_capacity(lines.len() + 2);
    framed.push(border.clone());
    framed.extend(lines.iter().map(|line| format!("|{}|", pad(line, width))));
    framed.push(border);
    framed
}

/// Title box followed by one box per block; the first line of each block
/// is its header and gets its own divider.
pub fn titled_blocks(title: &str, blocks: &[Vec<String>]) -> Vec<String> {
    let mut output = boxed(&[title.to_string()]);
    for block in blocks {
        let Some((header, body)) = block.split_first() else {
            continue;
        };
        let width = block
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let border = format!("+{}+", "-".repeat(width));

        output.push(border.clone());
        output.push(format!("|{}|", pad(header, width)));
        output.push(border.clone());
        if !body.is_empty() {
            output.extend(body.iter().map(|line| format!("|{}|", pad(line, width))));
            output.push(border);
        }
    }
    output
}

fn pad(line: &str, width: usize) -> String {
    let padding = width.saturating_sub(line.chars().count());
    format!("{line}{}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::{boxed, titled_blocks};

    #[test]
    fn boxed_pads_to_widest_line() {
        let lines = boxed(&["ab".to_string(), "abcd".to_string()]);
        assert_eq!(lines, vec!["+----+", "|ab  |", "|abcd|", "+----+"]);
    }

    #[test]
    fn titled_blocks_divides_header_from_body() {
        let blocks = vec![vec!["P1".to_string(), "body".to_string()]];
        let lines = titled_blocks("T", &blocks);
        assert_eq!(
            lines,
            vec!["+-+", "|T|", "+-+", "+----+", "|P1  |", "+----+", "|body|", "+----+"]
        );
    }
}
