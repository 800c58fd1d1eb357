use crate::error::{Error, ErrorKind};

// ----------------------------------------------------------------------------
// Source line

/// One cleaned source line, still pointing at the physical line it came from
/// so diagnostics can quote the original text.
#[derive(Debug, Clone)]
pub struct Line {
    pub num: usize,
    pub raw: String,
    pub text: String,
}

impl Line {
    fn new(num: usize, raw: &str, text: &str) -> Self {
        Self {
            num,
            raw: raw.to_string(),
            text: text.to_string(),
        }
    }
}

// ----------------------------------------------------------------------------
// Preprocess

fn clean(text: &str) -> &str {
    match text.split_once(';') {
        Some((code, _)) => code.trim(),
        None => text.trim(),
    }
}

/// `times <count> <text>` with a strict decimal count. Anything that does not
/// fit the shape is not a repetition directive and classifies as usual.
fn repeat_directive(text: &str) -> Result<Option<(usize, &str)>, ErrorKind> {
    let Some((keyword, rest)) = text.split_once(char::is_whitespace) else {
        return Ok(None);
    };
    if !keyword.eq_ignore_ascii_case("times") {
        return Ok(None);
    }
    let Some((count, body)) = rest.trim_start().split_once(char::is_whitespace) else {
        return Ok(None);
    };
    let body = body.trim_start();
    if body.is_empty() {
        return Ok(None);
    }
    let Ok(count) = count.parse::<i64>() else {
        return Ok(None);
    };
    if count < 0 {
        return Err(ErrorKind::NegativeRepeat(count));
    }
    Ok(Some((count as usize, body)))
}

/// Strip comments and blanks and expand repetition directives. Expanded
/// copies are inserted at the cursor, so they are processed next in document
/// order and may themselves be `times` lines.
pub fn preprocess(source: &str) -> Result<Vec<Line>, Error> {
    let mut pending: Vec<Line> = source
        .lines()
        .enumerate()
        .map(|(idx, raw)| Line::new(idx + 1, raw, raw))
        .collect();

    let mut lines = Vec::new();
    let mut idx = 0;
    while idx < pending.len() {
        let line = pending[idx].clone();
        idx += 1;
        let text = clean(&line.text);
        if text.is_empty() {
            continue;
        }
        match repeat_directive(text).map_err(|kind| kind.at(line.num, &line.raw))? {
            Some((count, body)) => {
                let copies = (0..count).map(|_| Line::new(line.num, &line.raw, body));
                pending.splice(idx..idx, copies);
            }
            None => lines.push(Line::new(line.num, &line.raw, text)),
        }
    }
    Ok(lines)
}
