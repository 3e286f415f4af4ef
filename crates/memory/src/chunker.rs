//! Split text into overlapping word windows, tracking the line range each covers.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk {
    pub text: String,
    /// 1-based, inclusive.
    pub start_line: usize,
    /// 1-based, inclusive.
    pub end_line: usize,
}

/// Chunk `content` into windows of `chunk_size` words, each sharing `overlap`
/// words with the previous one. Words keep their line breaks.
///
/// Content with no words at all still yields one chunk holding it verbatim,
/// so every embedded file has at least one fragment.
pub fn chunk_text(content: &str, chunk_size: usize, overlap: usize) -> Vec<RawChunk> {
    let words: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |w| (i + 1, w)))
        .collect();

    if words.is_empty() {
        return vec![RawChunk {
            text: content.to_string(),
            start_line: 1,
            end_line: content.lines().count().max(1),
        }];
    }

    let size = chunk_size.max(1);
    let step = size.saturating_sub(overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + size).min(words.len());
        let window = &words[start..end];
        chunks.push(RawChunk {
            text: join_window(window),
            start_line: window[0].0,
            end_line: window[window.len() - 1].0,
        });
        if end == words.len() {
            break;
        }
        start += step;
    }
    chunks
}

fn join_window(window: &[(usize, &str)]) -> String {
    let mut text = String::new();
    let mut prev_line = None;
    for (line, word) in window {
        match prev_line {
            None => {},
            Some(p) if p == *line => text.push(' '),
            Some(_) => text.push('\n'),
        }
        text.push_str(word);
        prev_line = Some(*line);
    }
    text
}
