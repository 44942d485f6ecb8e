//! Extraction of fenced code blocks from model replies.

/// Returns the bodies of all fenced (```` ``` ```` or `~~~`) code blocks in `text`.
///
/// The info string after the opening fence is dropped. A block left open at
/// the end of the text is still returned.
pub fn extract_code_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();
        match current.as_mut() {
            None => {
                if let Some(fence) = opening_fence(trimmed) {
                    current = Some((fence, Vec::new()));
                }
            }
            Some((fence, lines)) => {
                if trimmed.trim_end() == *fence {
                    blocks.push(lines.join("\n"));
                    current = None;
                } else {
                    lines.push(line);
                }
            }
        }
    }

    if let Some((_, lines)) = current
        && !lines.is_empty()
    {
        blocks.push(lines.join("\n"));
    }
    blocks
}

/// Joins extracted blocks for writing to a file, ending with a newline.
pub fn render_code_file(blocks: &[String]) -> String {
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn opening_fence(line: &str) -> Option<&'static str> {
    if line.starts_with("```") {
        Some("```")
    } else if line.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}
