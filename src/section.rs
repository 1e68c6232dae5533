use std::fmt;

use crate::outline::Outline;

pub type SectionId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub level: usize,
    /// Text between this heading and the next heading of any depth.
    pub text: String,
    pub(crate) children: Vec<SectionId>,
}

impl Section {
    pub(crate) fn new(title: String, level: usize) -> Self {
        Self {
            title,
            level,
            text: String::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct SectionRef<'a> {
    outline: &'a Outline,
    id: SectionId,
}

impl<'a> SectionRef<'a> {
    pub(crate) fn new(outline: &'a Outline, id: SectionId) -> Self {
        Self { outline, id }
    }

    pub fn node(&self) -> &'a Section {
        self.outline.node(self.id)
    }

    pub fn title(&self) -> &'a str {
        &self.node().title
    }

    pub fn level(&self) -> usize {
        self.node().level
    }

    pub fn text(&self) -> &'a str {
        &self.node().text
    }

    pub fn sections(&self) -> Vec<SectionRef<'a>> {
        self.node()
            .children
            .iter()
            .map(|&child| SectionRef::new(self.outline, child))
            .collect()
    }
}

impl fmt::Debug for SectionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionRef")
            .field("id", &self.id)
            .field("title", &self.title())
            .field("level", &self.level())
            .finish()
    }
}

impl fmt::Display for SectionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children = self.sections();
        write!(
            f,
            "Section: {} ({}):\n{}\nSubsections ({}):\n",
            self.title(),
            self.level(),
            self.text(),
            children.len()
        )?;
        for (index, child) in children.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{child}")?;
        }
        Ok(())
    }
}
