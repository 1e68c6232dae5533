use crate::format::FormatRules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub start: usize,
    pub end: usize,
    pub title: String,
    /// 1 for top-level sections.
    pub depth: usize,
}

pub fn match_headings(body: &str, rules: &FormatRules) -> Vec<HeadingMatch> {
    rules
        .pattern()
        .captures_iter(body)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            Some(HeadingMatch {
                start: whole.start(),
                end: whole.end(),
                title: rules.title(&captures).to_string(),
                depth: rules.depth(&captures),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ExtractFormat;

    #[test]
    fn wiki_headings_report_offsets_and_depths() {
        let rules = FormatRules::new(ExtractFormat::Wiki).expect("rules");
        let body = "Summary\n\n== Alpha ==\nA\n\n==== Deep ====\nD";
        let matches = match_headings(body, &rules);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].title, "Alpha");
        assert_eq!(matches[0].depth, 1);
        assert_eq!(&body[..matches[0].start], "Summary");
        assert_eq!(&body[matches[0].end..matches[1].start], "A");
        assert_eq!(matches[1].title, "Deep");
        assert_eq!(matches[1].depth, 3);
    }

    #[test]
    fn single_newline_before_marker_is_not_a_heading() {
        let rules = FormatRules::new(ExtractFormat::Wiki).expect("rules");
        assert!(match_headings("Summary\n== Alpha ==\nA", &rules).is_empty());
    }

    #[test]
    fn html_headings_capture_raw_titles() {
        let rules = FormatRules::new(ExtractFormat::Html).expect("rules");
        let body = "<p>S</p>\n<h2>  Early life </h2>\n<p>E</p>\n<h4>Notes</h4>\n";
        let matches = match_headings(body, &rules);

        let titles: Vec<&str> = matches.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Early life", "Notes"]);
        let depths: Vec<usize> = matches.iter().map(|m| m.depth).collect();
        assert_eq!(depths, vec![1, 3]);
    }
}
