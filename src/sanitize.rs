//! Entity decoding and tag stripping for Reddit self-text HTML.
//!
//! Reddit serves `selftext_html` with its markup entity-escaped a second
//! time. [`decode_entities`] undoes that fixed escaping layer;
//! [`clean_html`] then reduces the markup to plain text for a terminal.
//! Entity references still present after cleaning are left encoded, so
//! escaped markup in post bodies can never re-materialize as live tags.

/// Decodes the fixed entity set Reddit double-escapes, in this order:
/// `&lt;` `&gt;` `&amp;` `&#34;` `&#39;`.
///
/// The order matters: decoding `&amp;` after `&lt;`/`&gt;` means an input
/// like `&amp;lt;` comes out as the literal text `&lt;`, not as a `<`.
pub fn decode_entities(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
}

/// Reduces an HTML fragment to plain text.
///
/// `script` and `style` elements are dropped together with their contents.
/// Every other tag is stripped; block-level tags break lines. Runs of
/// whitespace collapse to a single space. No entity decoding happens here.
pub fn clean_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        push_text(&mut out, &rest[..open]);
        let tail = &rest[open + 1..];
        let Some(close) = tail.find('>') else {
            // Unterminated tag, nothing renderable follows.
            rest = "";
            break;
        };
        let name = tag_name(&tail[..close]);
        rest = &tail[close + 1..];

        match name.as_str() {
            "script" | "style" => rest = skip_element(rest, &name),
            "p" | "br" | "li" | "/p" | "/li" | "/div" | "/blockquote" | "/pre" | "/h1"
            | "/h2" | "/h3" | "/h4" | "/h5" | "/h6" => push_line_break(&mut out),
            _ => {}
        }
    }

    push_text(&mut out, rest);
    out.trim().to_string()
}

/// Appends text with whitespace runs collapsed to single spaces.
fn push_text(out: &mut String, text: &str) {
    let mut last_was_space = out.ends_with(' ') || out.ends_with('\n') || out.is_empty();
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
}

fn push_line_break(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Lowercased element name of a tag body, with a leading `/` kept for
/// closing tags. Attributes and self-closing slashes are ignored.
fn tag_name(tag: &str) -> String {
    let tag = tag.trim_start();
    let mut name = String::new();
    for c in tag.chars() {
        if c == '/' && name.is_empty() {
            name.push(c);
        } else if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_lowercase());
        } else {
            break;
        }
    }
    name
}

/// Advances past `</name ...>`, discarding the element body. An element
/// left unterminated swallows the rest of the input.
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    let Some(start) = find_close_tag(rest, name) else {
        return "";
    };
    let after = &rest[start..];
    match after.find('>') {
        Some(end) => &after[end + 1..],
        None => "",
    }
}

/// Byte position of `</name`, matched ASCII case-insensitively.
fn find_close_tag(haystack: &str, name: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = format!("</{}", name);
    let needle = needle.as_bytes();
    if haystack.len() < needle.len() {
        return None;
    }

    'outer: for i in 0..=haystack.len() - needle.len() {
        for (j, b) in needle.iter().enumerate() {
            if !haystack[i + j].eq_ignore_ascii_case(b) {
                continue 'outer;
            }
        }
        return Some(i);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_fixed_entity_set() {
        assert_eq!(
            decode_entities("&lt;p&gt;it&#39;s &#34;fine&#34;&lt;/p&gt;"),
            "<p>it's \"fine\"</p>"
        );
    }

    #[test]
    fn amp_decodes_after_angle_brackets() {
        // A doubly escaped bracket stays encoded text instead of
        // becoming markup.
        assert_eq!(decode_entities("&amp;lt;script&amp;gt;"), "&lt;script&gt;");
    }

    #[test]
    fn strips_tags_and_keeps_text() {
        assert_eq!(clean_html("<div>hello <b>world</b></div>"), "hello world");
    }

    #[test]
    fn block_tags_break_lines() {
        assert_eq!(clean_html("<p>one</p><p>two</p>"), "one\ntwo");
        assert_eq!(clean_html("a<br>b<br/>c"), "a\nb\nc");
        assert_eq!(clean_html("<ul><li>x</li><li>y</li></ul>"), "x\ny");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(clean_html("a \n\t  b"), "a b");
    }

    #[test]
    fn script_elements_drop_their_contents() {
        assert_eq!(
            clean_html(r#"<p>before</p><script>alert("x")</script><p>after</p>"#),
            "before\nafter"
        );
        assert_eq!(
            clean_html("<style>body { color: red }</style>text"),
            "text"
        );
    }

    #[test]
    fn unterminated_script_swallows_the_rest() {
        assert_eq!(clean_html("safe<script>alert(1)"), "safe");
    }

    #[test]
    fn close_tag_match_is_case_insensitive() {
        assert_eq!(clean_html("<SCRIPT>alert(1)</Script>ok"), "ok");
    }

    #[test]
    fn remaining_entities_stay_encoded() {
        assert_eq!(clean_html("x &lt;script&gt; y"), "x &lt;script&gt; y");
    }

    #[test]
    fn escaped_script_never_renders_as_markup() {
        // Reddit's double-escaped encoding of a self post containing a
        // script tag.
        let wire = "&lt;div&gt;hi &amp;lt;script&amp;gt;alert(1)&amp;lt;/script&amp;gt;&lt;/div&gt;";
        let rendered = clean_html(&decode_entities(wire));
        assert!(!rendered.contains("<script"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn live_script_in_decoded_body_is_dropped() {
        let wire = "&lt;script&gt;alert(1)&lt;/script&gt;&lt;p&gt;body&lt;/p&gt;";
        let rendered = clean_html(&decode_entities(wire));
        assert_eq!(rendered, "body");
    }
}
