use anyhow::{Context, Result};
use clap::ValueEnum;
use regex::{Captures, Regex};

use crate::markup::strip_excluded_regions;

const WIKI_HEADING_PATTERN: &str = r"\n\n *(===*) (.*?) (===*) *\n";

// MediaWiki wraps heading titles in anchor spans; some pages also leak a bare `<span>Edit</span>`.
const HTML_HEADING_PATTERN: &str = concat!(
    r"\n? *<h(\d)[^>]*?>(<span[^>]*></span>)? *",
    r"(<span[^>]*>)? *(<span[^>]*></span>)? *(.*?) *",
    r"(</span>)?(<span>Edit</span>)?</h\d>\n?",
);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, ValueEnum)]
pub enum ExtractFormat {
    Wiki,
    Html,
    Natlang,
}

impl ExtractFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wiki => "wiki",
            Self::Html => "html",
            Self::Natlang => "natlang",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wiki" => Some(Self::Wiki),
            "html" => Some(Self::Html),
            "natlang" => Some(Self::Natlang),
            _ => None,
        }
    }
}

/// Heading recognition and text cleanup rules for one extract format.
#[derive(Debug, Clone)]
pub struct FormatRules {
    format: ExtractFormat,
    pattern: Regex,
}

impl FormatRules {
    pub fn new(format: ExtractFormat) -> Result<Self> {
        let source = match format {
            ExtractFormat::Wiki => WIKI_HEADING_PATTERN,
            ExtractFormat::Html | ExtractFormat::Natlang => HTML_HEADING_PATTERN,
        };
        let pattern = Regex::new(source)
            .with_context(|| format!("failed to compile {} heading regex", format.as_str()))?;

        Ok(Self { format, pattern })
    }

    pub fn format(&self) -> ExtractFormat {
        self.format
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn title<'h>(&self, captures: &Captures<'h>) -> &'h str {
        let group = match self.format {
            ExtractFormat::Wiki => 2,
            ExtractFormat::Html | ExtractFormat::Natlang => 5,
        };
        captures.get(group).map(|value| value.as_str()).unwrap_or_default()
    }

    pub fn depth(&self, captures: &Captures<'_>) -> usize {
        let raw = match self.format {
            ExtractFormat::Wiki => captures.get(1).map_or(0, |value| value.as_str().len()),
            ExtractFormat::Html | ExtractFormat::Natlang => captures
                .get(1)
                .and_then(|value| value.as_str().trim().parse::<usize>().ok())
                .unwrap_or(0),
        };

        // `==` and `<h2>` open top-level sections; the page title owns level one.
        raw.saturating_sub(1).max(1)
    }

    pub fn cleanup(&self, text: &str) -> String {
        match self.format {
            ExtractFormat::Wiki | ExtractFormat::Html => text.trim().to_string(),
            ExtractFormat::Natlang => strip_excluded_regions(text),
        }
    }

    pub fn query_extras(&self) -> &'static [(&'static str, &'static str)] {
        match self.format {
            ExtractFormat::Wiki => &[("explaintext", "1"), ("exsectionformat", "wiki")],
            ExtractFormat::Html | ExtractFormat::Natlang => &[],
        }
    }

    pub fn decorate(&self, title: &str, level: usize) -> String {
        match self.format {
            ExtractFormat::Html => format!("<h{level}>{title}</h{level}>"),
            ExtractFormat::Wiki | ExtractFormat::Natlang => title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiki_depth_counts_equals_signs() {
        let rules = FormatRules::new(ExtractFormat::Wiki).expect("rules");
        let body = "Intro\n\n== Top ==\ntext\n\n=== Nested ===\nmore";
        let depths: Vec<usize> = rules
            .pattern()
            .captures_iter(body)
            .map(|captures| rules.depth(&captures))
            .collect();
        assert_eq!(depths, vec![1, 2]);
    }

    #[test]
    fn html_title_skips_anchor_spans() {
        let rules = FormatRules::new(ExtractFormat::Html).expect("rules");
        let body = "<p>Intro</p>\n<h3><span id=\"History\">History</span></h3>\n<p>Body</p>";
        let captures = rules.pattern().captures(body).expect("heading match");
        assert_eq!(rules.title(&captures), "History");
        assert_eq!(rules.depth(&captures), 2);
    }

    #[test]
    fn only_html_decorates_headings() {
        let html = FormatRules::new(ExtractFormat::Html).expect("rules");
        let natlang = FormatRules::new(ExtractFormat::Natlang).expect("rules");
        assert_eq!(html.decorate("Origins", 3), "<h3>Origins</h3>");
        assert_eq!(natlang.decorate("Origins", 3), "Origins");
    }

    #[test]
    fn parse_accepts_mixed_case() {
        assert_eq!(ExtractFormat::parse(" NatLang "), Some(ExtractFormat::Natlang));
        assert_eq!(ExtractFormat::parse("plain"), None);
    }
}
