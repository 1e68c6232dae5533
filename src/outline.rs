use std::collections::HashMap;

use crate::format::FormatRules;
use crate::headings::{HeadingMatch, match_headings};
use crate::section::{Section, SectionId, SectionRef};

#[derive(Debug, Clone, Default)]
pub struct Outline {
    summary: String,
    nodes: Vec<Section>,
    roots: Vec<SectionId>,
    by_title: HashMap<String, SectionId>,
    titles: Vec<String>,
}

impl Outline {
    pub fn build(body: &str, rules: &FormatRules) -> Self {
        let headings = match_headings(body, rules);
        Self::from_headings(body, &headings, rules)
    }

    /// `open` holds the chain of sections that can still receive children, shallowest first.
    /// A heading at depth `d` keeps only the first `d - 1` entries, so any number of skipped
    /// levels in either direction resolves to the nearest shallower open section, or to the
    /// page itself when none is left.
    pub fn from_headings(body: &str, headings: &[HeadingMatch], rules: &FormatRules) -> Self {
        let mut outline = Self::default();
        let mut open: Vec<SectionId> = Vec::new();
        let mut last: Option<SectionId> = None;
        let mut cursor = 0;

        for heading in headings {
            let span = rules.cleanup(&body[cursor..heading.start]);
            match last {
                Some(previous) => outline.nodes[previous].text = span,
                None => outline.summary = span,
            }

            let depth = heading.depth.max(1);
            let title = rules.cleanup(&heading.title).trim().to_string();
            let id = outline.nodes.len();
            outline.nodes.push(Section::new(title.clone(), depth - 1));

            open.truncate(depth - 1);
            match open.last() {
                Some(&parent) => outline.nodes[parent].children.push(id),
                None => outline.roots.push(id),
            }
            open.push(id);

            outline.by_title.insert(title.clone(), id);
            outline.titles.push(title);
            cursor = heading.end;
            last = Some(id);
        }

        let tail = rules.cleanup(&body[cursor..]);
        match last {
            Some(previous) => outline.nodes[previous].text = tail,
            None => outline.summary = tail,
        }

        outline
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn sections(&self) -> Vec<SectionRef<'_>> {
        self.roots
            .iter()
            .map(|&id| SectionRef::new(self, id))
            .collect()
    }

    pub fn section_titles(&self) -> &[String] {
        &self.titles
    }

    /// Last section carrying `title`.
    pub fn section_by_title(&self, title: &str) -> Option<SectionRef<'_>> {
        self.by_title
            .get(title)
            .map(|&id| SectionRef::new(self, id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node(&self, id: SectionId) -> &Section {
        &self.nodes[id]
    }

    pub fn render(&self, rules: &FormatRules) -> String {
        let mut out = self.summary.trim().to_string();
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        self.render_sections(&self.roots, 2, rules, &mut out);
        out.trim_end().to_string()
    }

    fn render_sections(
        &self,
        ids: &[SectionId],
        level: usize,
        rules: &FormatRules,
        out: &mut String,
    ) {
        for &id in ids {
            let section = &self.nodes[id];
            out.push_str(&rules.decorate(&section.title, level));
            out.push('\n');
            out.push_str(&section.text);
            if !section.text.is_empty() {
                out.push_str("\n\n");
            }
            self.render_sections(&section.children, level + 1, rules, out);
        }
    }
}
