// src/frontmatter/codec.rs
// =============================================================================
// Splits a YAML front-matter block off the top of a document and puts one
// back on.
//
//   ---
//   title: cordova-plugin-camera
//   ---
//   # Body starts here
//
// Parsing is best-effort: a block that isn't valid YAML, or isn't a mapping
// with string keys, is treated as if there were no block at all.
//
// Serialization goes through a BTreeMap, so keys always come out sorted and
// the same mapping always produces the same bytes.
// =============================================================================

use tracing::{debug, warn};

use super::FrontMatter;

const DELIMITER: &str = "---";

// Splits `text` into (front matter, body).
//
// The body borrows from `text`: it starts right after the closing delimiter
// line. Without a well-formed block the mapping is empty and the body is the
// whole text.
pub fn split(text: &str) -> (FrontMatter, &str) {
    let Some((yaml, body)) = find_block(text) else {
        return (FrontMatter::new(), text);
    };

    if yaml.trim().is_empty() {
        return (FrontMatter::new(), body);
    }

    match serde_yaml::from_str::<FrontMatter>(yaml) {
        Ok(front_matter) => (front_matter, body),
        Err(e) => {
            debug!(error = %e, "ignoring malformed front matter");
            (FrontMatter::new(), text)
        }
    }
}

// Serializes `front_matter` and puts it in front of `body`.
pub fn join(body: &str, front_matter: &FrontMatter) -> String {
    let yaml = match serde_yaml::to_string(front_matter) {
        Ok(yaml) => yaml,
        Err(e) => {
            warn!(error = %e, "could not serialize front matter, writing an empty block");
            String::new()
        }
    };

    let mut out = String::with_capacity(yaml.len() + body.len() + 2 * DELIMITER.len() + 2);
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&yaml);
    if !yaml.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(body);
    out
}

// Finds the raw YAML between the opening and closing delimiter lines,
// returning (yaml, body). A leading byte-order mark is skipped.
fn find_block(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = LineSpans::new(text);

    let (_, first, _) = lines.next()?;
    if !is_delimiter(first) {
        return None;
    }
    let yaml_start = first.len() + newline_len(text, first.len());

    for (start, line, end) in lines {
        if is_delimiter(line) {
            return Some((&text[yaml_start..start], &text[end..]));
        }
    }

    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn newline_len(text: &str, at: usize) -> usize {
    usize::from(text[at..].starts_with('\n'))
}

// Iterates over lines as (start, line without '\n', end after '\n')
struct LineSpans<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> LineSpans<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for LineSpans<'a> {
    type Item = (usize, &'a str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        let start = self.pos;
        let rest = &self.text[start..];
        let (line, end) = match rest.find('\n') {
            Some(i) => (&rest[..i], start + i + 1),
            None => (rest, self.text.len()),
        };

        self.pos = end;
        Some((start, line, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn mapping(pairs: &[(&str, &str)]) -> FrontMatter {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_split_without_block() {
        let text = "# Camera\n\nTake pictures.\n";
        let (fm, body) = split(text);
        assert!(fm.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_with_block() {
        let text = "---\ntitle: Camera\ndescription: Take pictures.\n---\n# Camera\n";
        let (fm, body) = split(text);
        assert_eq!(fm, mapping(&[("title", "Camera"), ("description", "Take pictures.")]));
        assert_eq!(body, "# Camera\n");
    }

    #[test]
    fn test_split_handles_crlf_and_trailing_spaces() {
        let text = "--- \r\ntitle: Camera\r\n---\r\nbody\r\n";
        let (fm, body) = split(text);
        assert_eq!(fm, mapping(&[("title", "Camera")]));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_split_empty_block() {
        let (fm, body) = split("---\n---\nbody");
        assert!(fm.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_block_at_end_of_text() {
        let (fm, body) = split("---\ntitle: x\n---");
        assert_eq!(fm, mapping(&[("title", "x")]));
        assert_eq!(body, "");
    }

    #[test]
    fn test_malformed_block_is_ignored() {
        for text in [
            "---\ntitle: [unclosed\n---\nbody\n",
            "---\n- just\n- a list\n---\nbody\n",
            "---\njust a scalar\n---\nbody\n",
        ] {
            let (fm, body) = split(text);
            assert!(fm.is_empty(), "{text:?}");
            assert_eq!(body, text);
        }
    }

    #[test]
    fn test_split_skips_byte_order_mark() {
        let (fm, body) = split("\u{feff}---\ntitle: x\n---\nbody");
        assert_eq!(fm, mapping(&[("title", "x")]));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_unclosed_block_is_not_a_block() {
        let text = "---\ntitle: x\nno closing line\n";
        let (fm, body) = split(text);
        assert!(fm.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_delimiter_must_open_the_text() {
        let text = "intro\n---\ntitle: x\n---\n";
        let (fm, body) = split(text);
        assert!(fm.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_join_sorts_keys() {
        let fm = mapping(&[("title", "Camera"), ("edit_link", "https://x/y")]);
        assert_eq!(
            join("# Camera\n", &fm),
            "---\nedit_link: https://x/y\ntitle: Camera\n---\n# Camera\n"
        );
    }

    #[test]
    fn test_join_then_split_returns_inputs() {
        let mut fm = mapping(&[("title", "Camera"), ("plugin_version", "8.0.0")]);
        fm.insert("tags".to_string(), serde_yaml::from_str("[a, b]").unwrap());
        fm.insert("weight".to_string(), Value::from(3));

        for body in ["", "# Camera\n", "\n\nleading blank lines\n", "no trailing newline"] {
            let joined = join(body, &fm);
            let (parsed, rest) = split(&joined);
            assert_eq!(parsed, fm);
            assert_eq!(rest, body);
        }

        let joined = join("body", &FrontMatter::new());
        let (parsed, rest) = split(&joined);
        assert!(parsed.is_empty());
        assert_eq!(rest, "body");
    }

    #[test]
    fn test_values_that_look_like_delimiters_survive() {
        let fm = mapping(&[("rule", "---")]);
        let joined = join("body\n", &fm);
        let (parsed, rest) = split(&joined);
        assert_eq!(parsed, fm);
        assert_eq!(rest, "body\n");
    }
}
