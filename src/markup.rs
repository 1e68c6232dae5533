//! Strips formula markup from HTML extract fragments.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::Event;
use tracing::warn;

const EXCLUDED_REGIONS: &[&str] = &["math"];
const MAX_REFERENCE_LEN: usize = 32;

pub fn strip_excluded_regions(fragment: &str) -> String {
    let mut reader = Reader::from_str(fragment);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut include_stack = vec![true];
    let mut output = String::with_capacity(fragment.len());

    loop {
        let position = usize::try_from(reader.buffer_position()).unwrap_or(fragment.len());
        match reader.read_event() {
            Ok(Event::Start(ref start)) => {
                let name = start.name();
                if is_tag_name(name.as_ref()) {
                    let included = !is_excluded(name.as_ref()) && top(&include_stack);
                    include_stack.push(included);
                } else if top(&include_stack) {
                    // A bare `<` in prose, e.g. `a < b`: keep it as text.
                    output.push('<');
                    output.push_str(&decode_entities(&String::from_utf8_lossy(start)));
                    output.push('>');
                }
            }
            Ok(Event::End(_)) => {
                // Stray closing tags never pop the base flag.
                if include_stack.len() > 1 {
                    include_stack.pop();
                }
            }
            Ok(Event::Text(ref text)) => {
                if top(&include_stack) {
                    output.push_str(&decode_entities(&String::from_utf8_lossy(text)));
                }
            }
            Ok(Event::CData(ref data)) => {
                if top(&include_stack) {
                    output.push_str(&String::from_utf8_lossy(data));
                }
            }
            Ok(Event::Eof) => break,
            Err(error) => {
                warn!(
                    position,
                    error = %error,
                    "markup fragment is malformed, keeping the rest as text"
                );
                if top(&include_stack) {
                    if let Some(rest) = fragment.get(position..) {
                        output.push_str(&decode_entities(rest));
                    }
                }
                break;
            }
            _ => {}
        }
    }

    output
}

fn top(stack: &[bool]) -> bool {
    stack.last().copied().unwrap_or(true)
}

fn is_tag_name(name: &[u8]) -> bool {
    name.first().is_some_and(u8::is_ascii_alphabetic)
}

fn is_excluded(name: &[u8]) -> bool {
    EXCLUDED_REGIONS
        .iter()
        .any(|region| region.as_bytes().eq_ignore_ascii_case(name))
}

fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let reference = tail
            .find(';')
            .filter(|&end| end <= MAX_REFERENCE_LEN)
            .and_then(|end| resolve_reference(&tail[..end]).map(|value| (end, value)));

        match reference {
            Some((end, value)) => {
                decoded.push_str(&value);
                rest = &tail[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = tail;
            }
        }
    }
    decoded.push_str(rest);

    Cow::Owned(decoded)
}

fn resolve_reference(name: &str) -> Option<Cow<'static, str>> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(|ch| Cow::Owned(ch.to_string()));
    }

    if name.is_empty() || !name.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
        return None;
    }
    resolve_html5_entity(name).map(Cow::Borrowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_region_is_dropped_and_neighbours_survive() {
        let fragment = "<p>Energy is <math>E = mc^2</math> famous.</p>";
        assert_eq!(strip_excluded_regions(fragment), "Energy is  famous.");
    }

    #[test]
    fn nested_tags_inside_math_stay_excluded() {
        let fragment =
            "<dl><dd><span><math><semantics><mi>x</mi></semantics></math></span></dd></dl>Next";
        assert_eq!(strip_excluded_regions(fragment), "Next");
    }

    #[test]
    fn whitespace_is_left_untouched() {
        let fragment = "<p>Text for section 1</p>\n\n\n";
        assert_eq!(strip_excluded_regions(fragment), "Text for section 1\n\n\n");
    }

    #[test]
    fn unbalanced_closing_tags_are_tolerated() {
        let fragment = "</span></div>kept <b>bold</b></p> tail";
        assert_eq!(strip_excluded_regions(fragment), "kept bold tail");
    }

    #[test]
    fn entities_are_resolved() {
        assert_eq!(
            strip_excluded_regions("Sun&ndash;Jupiter &amp; moons"),
            "Sun\u{2013}Jupiter & moons"
        );
    }

    #[test]
    fn unknown_entity_stays_verbatim_while_neighbours_decode() {
        assert_eq!(
            strip_excluded_regions("a &amp; b &bogus; c"),
            "a & b &bogus; c"
        );
        assert_eq!(
            strip_excluded_regions("3&times;4 &#8722; x &#x2212; y"),
            "3\u{d7}4 \u{2212} x \u{2212} y"
        );
        assert_eq!(strip_excluded_regions("AT&T rocks"), "AT&T rocks");
    }

    #[test]
    fn bare_angle_brackets_in_prose_are_text() {
        assert_eq!(
            strip_excluded_regions("<p>if a < b then c > d holds</p> after"),
            "if a < b then c > d holds after"
        );
        assert_eq!(strip_excluded_regions("x<3 and y>2"), "x<3 and y>2");
    }

    #[test]
    fn malformed_tail_is_kept_as_text() {
        assert_eq!(strip_excluded_regions("<p>x</p> a < b"), "x a < b");
    }

    #[test]
    fn uppercase_math_tag_is_excluded() {
        assert_eq!(strip_excluded_regions("a<MATH>b</MATH>c"), "ac");
    }
}
