//! Line tree with nested indentation.
//!
//! Generated class bodies are built as a tree of lines where each
//! nested block indents its contents by two spaces, then rendered to
//! one string.

/// One line of output, or an indented block of lines.
#[derive(Debug, Clone)]
pub enum Line {
    /// A single line of text.
    Text(String),
    /// A block indented one level deeper than its parent.
    Block(Vec<Line>),
}

impl Line {
    /// Creates a text line.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Creates an empty line.
    #[must_use]
    pub fn blank() -> Self {
        Self::Text(String::new())
    }

    /// Creates an indented block.
    #[must_use]
    pub fn block(lines: Vec<Line>) -> Self {
        Self::Block(lines)
    }
}

/// Renders a line tree with two-space indentation per nesting level.
#[must_use]
pub fn render(lines: &[Line]) -> String {
    let mut out = String::new();
    render_into(lines, 0, &mut out);
    out
}

fn render_into(lines: &[Line], depth: usize, out: &mut String) {
    for line in lines {
        match line {
            Line::Text(text) => {
                if !text.is_empty() {
                    for _ in 0..depth {
                        out.push(' ');
                    }
                    out.push_str(text);
                }
                out.push('\n');
            }
            Line::Block(inner) => render_into(inner, depth + 2, out),
        }
    }
}
