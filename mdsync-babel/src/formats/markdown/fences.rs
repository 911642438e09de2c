//! Fenced container scanning
//!
//!     comrak has no notion of `:::` blocks, so the source is split into segments before it
//!     ever reaches the markdown parser. A line that is exactly `:::`, optionally followed
//!     immediately by a `{...}` attribute list, opens a container; a bare `:::` line closes
//!     the innermost open one. Everything between fences is handed to comrak on its own.
//!
//!     Rules:
//!         - `:::{...}` always opens a new (possibly nested) container.
//!         - A bare `:::` closes the innermost container, or opens one when none is open.
//!         - Lines inside backtick or tilde code fences are never treated as container fences.
//!         - Containers still open at the end of input are closed there.
//!         - `:::{...}` with a malformed attribute list is ordinary text.

use crate::attributes::{parse_attribute_list, Attributes};

/// A piece of markup source: either plain markdown or a fenced container.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Markup(String),
    Container {
        attributes: Attributes,
        children: Vec<Segment>,
    },
}

#[derive(Debug, PartialEq)]
enum Fence {
    Open(Attributes),
    Bare,
}

/// Split markup into top-level segments, nesting containers.
pub fn split_containers(source: &str) -> Vec<Segment> {
    let mut root = Frame::new(Attributes::new());
    let mut stack: Vec<Frame> = Vec::new();
    let mut code_fence: Option<CodeFence> = None;

    for line in source.split_inclusive('\n') {
        if let Some(open) = &code_fence {
            if open.is_closed_by(line) {
                code_fence = None;
            }
            stack.last_mut().unwrap_or(&mut root).push_line(line);
            continue;
        }

        match container_fence(line) {
            Some(Fence::Bare) if !stack.is_empty() => {
                if let Some(frame) = stack.pop() {
                    let parent = stack.last_mut().unwrap_or(&mut root);
                    parent.push_segment(frame.into_segment());
                }
            }
            Some(Fence::Bare) => stack.push(Frame::new(Attributes::new())),
            Some(Fence::Open(attributes)) => stack.push(Frame::new(attributes)),
            None => {
                code_fence = CodeFence::opened_by(line);
                stack.last_mut().unwrap_or(&mut root).push_line(line);
            }
        }
    }

    while let Some(frame) = stack.pop() {
        let parent = stack.last_mut().unwrap_or(&mut root);
        parent.push_segment(frame.into_segment());
    }

    root.flush();
    root.children
}

fn container_fence(line: &str) -> Option<Fence> {
    let rest = line.trim_end().strip_prefix(":::")?;
    if rest.is_empty() {
        return Some(Fence::Bare);
    }
    let inner = rest.strip_prefix('{')?.strip_suffix('}')?;
    parse_attribute_list(inner).map(Fence::Open)
}

struct Frame {
    attributes: Attributes,
    children: Vec<Segment>,
    pending: String,
}

impl Frame {
    fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            children: Vec::new(),
            pending: String::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        self.pending.push_str(line);
    }

    fn push_segment(&mut self, segment: Segment) {
        self.flush();
        self.children.push(segment);
    }

    fn flush(&mut self) {
        if !self.pending.trim().is_empty() {
            self.children
                .push(Segment::Markup(std::mem::take(&mut self.pending)));
        }
        self.pending.clear();
    }

    fn into_segment(mut self) -> Segment {
        self.flush();
        Segment::Container {
            attributes: self.attributes,
            children: self.children,
        }
    }
}

/// An open backtick or tilde code fence.
struct CodeFence {
    marker: char,
    length: usize,
}

impl CodeFence {
    fn opened_by(line: &str) -> Option<Self> {
        let trimmed = strip_fence_indent(line)?;
        let marker = trimmed.chars().next().filter(|&c| matches!(c, '`' | '~'))?;
        let length = trimmed.chars().take_while(|&c| c == marker).count();
        if length < 3 {
            return None;
        }
        // Backtick fences may not carry backticks in their info string.
        if marker == '`' && trimmed[length..].contains('`') {
            return None;
        }
        Some(Self { marker, length })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        let Some(trimmed) = strip_fence_indent(line) else {
            return false;
        };
        let length = trimmed.chars().take_while(|&c| c == self.marker).count();
        length >= self.length && trimmed[length..].trim().is_empty()
    }
}

/// Fences may be indented by at most three spaces.
fn strip_fence_indent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    (indent <= 3).then(|| &line[indent..])
}
