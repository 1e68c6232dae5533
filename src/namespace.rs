//! MediaWiki namespace ids.

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(i64)]
pub enum Namespace {
    Main = 0,
    Talk = 1,
    User = 2,
    UserTalk = 3,
    Wikipedia = 4,
    WikipediaTalk = 5,
    File = 6,
    FileTalk = 7,
    MediaWiki = 8,
    MediaWikiTalk = 9,
    Template = 10,
    TemplateTalk = 11,
    Help = 12,
    HelpTalk = 13,
    Category = 14,
    CategoryTalk = 15,
    Portal = 100,
    PortalTalk = 101,
    Book = 108,
    BookTalk = 109,
    Draft = 118,
    DraftTalk = 119,
    EducationProgram = 446,
    EducationProgramTalk = 447,
    TimedText = 710,
    TimedTextTalk = 711,
    Module = 828,
    ModuleTalk = 829,
    Gadget = 2300,
    GadgetTalk = 2301,
    GadgetDefinition = 2302,
    GadgetDefinitionTalk = 2303,
}

const ALL: [Namespace; 32] = [
    Namespace::Main,
    Namespace::Talk,
    Namespace::User,
    Namespace::UserTalk,
    Namespace::Wikipedia,
    Namespace::WikipediaTalk,
    Namespace::File,
    Namespace::FileTalk,
    Namespace::MediaWiki,
    Namespace::MediaWikiTalk,
    Namespace::Template,
    Namespace::TemplateTalk,
    Namespace::Help,
    Namespace::HelpTalk,
    Namespace::Category,
    Namespace::CategoryTalk,
    Namespace::Portal,
    Namespace::PortalTalk,
    Namespace::Book,
    Namespace::BookTalk,
    Namespace::Draft,
    Namespace::DraftTalk,
    Namespace::EducationProgram,
    Namespace::EducationProgramTalk,
    Namespace::TimedText,
    Namespace::TimedTextTalk,
    Namespace::Module,
    Namespace::ModuleTalk,
    Namespace::Gadget,
    Namespace::GadgetTalk,
    Namespace::GadgetDefinition,
    Namespace::GadgetDefinitionTalk,
];

impl Namespace {
    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn from_id(id: i64) -> Option<Self> {
        ALL.iter().copied().find(|namespace| namespace.id() == id)
    }
}

impl From<Namespace> for i64 {
    fn from(namespace: Namespace) -> Self {
        namespace.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_lookup() {
        assert_eq!(Namespace::Category.id(), 14);
        assert_eq!(Namespace::from_id(2303), Some(Namespace::GadgetDefinitionTalk));
        assert_eq!(Namespace::from_id(16), None);
    }
}
