//! Shared capability set of every provision.
//!
//! Each concrete provision renders three addresses for itself: a routing
//! path, a heading and a legal citation. All three come in two forms:
//!
//! - **standalone** (`path`, `heading`, `citation`): the full address built
//!   from the provision's own numbers, joined to a caller-supplied prefix.
//! - **local** (`slug`, `label`, `cite_label`): the part a provision adds to
//!   its parent's already-rendered address.
//!
//! The standalone form of a child always equals its parent's standalone form
//! extended by the child's local form, which is what lets the rendered walks
//! in [`crate::tree`] thread prefixes downward without back-references.

use serde::Serialize;

use crate::config::DEFAULT_PATH_PREFIX;
use crate::numeral::to_roman;
use crate::types::{
    AmendSection, Amendment, Article, Clause, Constitution, EssayLink, Preamble, Section,
};

/// Kind of provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionKind {
    Constitution,
    Preamble,
    Article,
    Section,
    Clause,
    Amendment,
    AmendSection,
}

impl ProvisionKind {
    /// Get the string value used in exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constitution => "constitution",
            Self::Preamble => "preamble",
            Self::Article => "article",
            Self::Section => "section",
            Self::Clause => "clause",
            Self::Amendment => "amendment",
            Self::AmendSection => "amend_section",
        }
    }
}

/// Join a label to a rendered prefix with `", "`, or return it bare.
///
/// # Examples
/// ```
/// use usconstitution::provision::join_label;
///
/// assert_eq!(join_label("", "Preamble"), "Preamble");
/// assert_eq!(join_label("US Constitution", "Preamble"), "US Constitution, Preamble");
/// ```
#[must_use]
pub fn join_label(prefix: &str, label: &str) -> String {
    if prefix.is_empty() {
        label.to_string()
    } else {
        format!("{prefix}, {label}")
    }
}

/// Capabilities shared by every provision below the document root.
pub trait Provision {
    fn kind(&self) -> ProvisionKind;

    /// Path segment relative to the parent, without the leading slash.
    fn slug(&self) -> String;

    /// Heading fragment relative to the parent (e.g. `Section 8`).
    fn label(&self) -> String;

    /// Citation fragment relative to the parent (e.g. `§ 8`).
    fn cite_label(&self) -> String;

    /// Path from the document root, without a prefix.
    fn full_path(&self) -> String;

    /// Heading including every ancestor below the root.
    fn full_heading(&self) -> String;

    /// Citation including every ancestor below the root.
    fn full_citation(&self) -> String;

    /// Library of Congress identifier.
    fn loc_id(&self) -> String;

    fn num(&self) -> &str;
    fn name(&self) -> &str;
    fn content(&self) -> &str;
    fn essay_links(&self) -> &[EssayLink];

    fn path(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.full_path())
    }

    fn heading(&self, prefix: &str) -> String {
        join_label(prefix, &self.full_heading())
    }

    fn citation(&self, prefix: &str) -> String {
        join_label(prefix, &self.full_citation())
    }

    /// Path on the Constitution Annotated site.
    fn cleanpath(&self) -> String {
        self.path(DEFAULT_PATH_PREFIX)
    }
}

macro_rules! common_attributes {
    () => {
        fn num(&self) -> &str {
            &self.num
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn content(&self) -> &str {
            &self.content
        }

        fn essay_links(&self) -> &[EssayLink] {
            &self.essay_links
        }
    };
}

impl Provision for Preamble {
    fn kind(&self) -> ProvisionKind {
        ProvisionKind::Preamble
    }

    fn slug(&self) -> String {
        "preamble".to_string()
    }

    fn label(&self) -> String {
        "Preamble".to_string()
    }

    fn cite_label(&self) -> String {
        "Preamble".to_string()
    }

    fn full_path(&self) -> String {
        "/preamble".to_string()
    }

    fn full_heading(&self) -> String {
        self.label()
    }

    fn full_citation(&self) -> String {
        self.cite_label()
    }

    fn loc_id(&self) -> String {
        "Pre".to_string()
    }

    common_attributes!();
}

impl Provision for Article {
    fn kind(&self) -> ProvisionKind {
        ProvisionKind::Article
    }

    fn slug(&self) -> String {
        format!("article-{}", self.index)
    }

    fn label(&self) -> String {
        format!("Article {}", to_roman(self.index))
    }

    fn cite_label(&self) -> String {
        format!("art. {}", to_roman(self.index))
    }

    fn full_path(&self) -> String {
        format!("/{}", self.slug())
    }

    fn full_heading(&self) -> String {
        self.label()
    }

    fn full_citation(&self) -> String {
        self.cite_label()
    }

    fn loc_id(&self) -> String {
        format!("Art{}", to_roman(self.index))
    }

    common_attributes!();
}

impl Provision for Section {
    fn kind(&self) -> ProvisionKind {
        ProvisionKind::Section
    }

    fn slug(&self) -> String {
        format!("section-{}", self.index)
    }

    fn label(&self) -> String {
        format!("Section {}", self.index)
    }

    fn cite_label(&self) -> String {
        format!("§ {}", self.index)
    }

    fn full_path(&self) -> String {
        format!("/article-{}/{}", self.article_number, self.slug())
    }

    fn full_heading(&self) -> String {
        format!("Article {}, {}", to_roman(self.article_number), self.label())
    }

    fn full_citation(&self) -> String {
        format!("art. {}, {}", to_roman(self.article_number), self.cite_label())
    }

    fn loc_id(&self) -> String {
        format!("Art{}.S{}", to_roman(self.article_number), self.index)
    }

    common_attributes!();
}

impl Provision for Clause {
    fn kind(&self) -> ProvisionKind {
        ProvisionKind::Clause
    }

    fn slug(&self) -> String {
        format!("clause-{}", self.index)
    }

    fn label(&self) -> String {
        format!("Clause {}", self.index)
    }

    fn cite_label(&self) -> String {
        format!("cl. {}", self.index)
    }

    fn full_path(&self) -> String {
        let mut path = format!("/article-{}", self.article_number);
        if let Some(section) = self.section_number {
            path.push_str(&format!("/section-{section}"));
        }
        format!("{path}/{}", self.slug())
    }

    fn full_heading(&self) -> String {
        let mut heading = format!("Article {}", to_roman(self.article_number));
        if let Some(section) = self.section_number {
            heading.push_str(&format!(", Section {section}"));
        }
        join_label(&heading, &self.label())
    }

    fn full_citation(&self) -> String {
        let mut citation = format!("art. {}", to_roman(self.article_number));
        if let Some(section) = self.section_number {
            citation.push_str(&format!(", § {section}"));
        }
        join_label(&citation, &self.cite_label())
    }

    /// `ArtI.S8.C1`; clauses of an article without sections omit the `S` part.
    fn loc_id(&self) -> String {
        match self.section_number {
            Some(section) => format!(
                "Art{}.S{section}.C{}",
                to_roman(self.article_number),
                self.index
            ),
            None => format!("Art{}.C{}", to_roman(self.article_number), self.index),
        }
    }

    common_attributes!();
}

impl Provision for Amendment {
    fn kind(&self) -> ProvisionKind {
        ProvisionKind::Amendment
    }

    fn slug(&self) -> String {
        format!("amendment-{}", self.index)
    }

    fn label(&self) -> String {
        format!("Amendment {}", self.index)
    }

    fn cite_label(&self) -> String {
        format!("amend. {}", to_roman(self.index))
    }

    fn full_path(&self) -> String {
        format!("/{}", self.slug())
    }

    fn full_heading(&self) -> String {
        self.label()
    }

    fn full_citation(&self) -> String {
        self.cite_label()
    }

    fn loc_id(&self) -> String {
        format!("Amdt{}", self.index)
    }

    common_attributes!();
}

impl Provision for AmendSection {
    fn kind(&self) -> ProvisionKind {
        ProvisionKind::AmendSection
    }

    fn slug(&self) -> String {
        format!("section-{}", self.index)
    }

    fn label(&self) -> String {
        format!("Section {}", self.index)
    }

    fn cite_label(&self) -> String {
        format!("sec. {}", self.index)
    }

    fn full_path(&self) -> String {
        format!("/amendment-{}/{}", self.article_number, self.slug())
    }

    fn full_heading(&self) -> String {
        format!("Amendment {}, {}", self.article_number, self.label())
    }

    fn full_citation(&self) -> String {
        format!("amend. {}, {}", to_roman(self.article_number), self.cite_label())
    }

    fn loc_id(&self) -> String {
        format!("Amdt{}.S{}", self.article_number, self.index)
    }

    common_attributes!();
}

/// Child iterator of a node.
pub type Children<'a> = Box<dyn Iterator<Item = Node<'a>> + 'a>;

/// Borrowed view of any node in the tree, root included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Constitution(&'a Constitution),
    Preamble(&'a Preamble),
    Article(&'a Article),
    Section(&'a Section),
    Clause(&'a Clause),
    Amendment(&'a Amendment),
    AmendSection(&'a AmendSection),
}

impl<'a> Node<'a> {
    /// The provision behind this node; `None` for the root.
    #[must_use]
    pub fn as_provision(&self) -> Option<&'a dyn Provision> {
        match *self {
            Node::Constitution(_) => None,
            Node::Preamble(p) => Some(p),
            Node::Article(a) => Some(a),
            Node::Section(s) => Some(s),
            Node::Clause(c) => Some(c),
            Node::Amendment(a) => Some(a),
            Node::AmendSection(s) => Some(s),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ProvisionKind {
        self.as_provision()
            .map_or(ProvisionKind::Constitution, Provision::kind)
    }

    /// Routing path. The root returns `prefix` verbatim.
    #[must_use]
    pub fn path(&self, prefix: &str) -> String {
        self.as_provision()
            .map_or_else(|| prefix.to_string(), |p| p.path(prefix))
    }

    /// Heading. The root returns `prefix` verbatim.
    #[must_use]
    pub fn heading(&self, prefix: &str) -> String {
        self.as_provision()
            .map_or_else(|| prefix.to_string(), |p| p.heading(prefix))
    }

    /// Citation. The root returns `prefix` verbatim.
    #[must_use]
    pub fn citation(&self, prefix: &str) -> String {
        self.as_provision()
            .map_or_else(|| prefix.to_string(), |p| p.citation(prefix))
    }

    /// Library of Congress identifier; the root has none.
    #[must_use]
    pub fn loc_id(&self) -> Option<String> {
        self.as_provision().map(Provision::loc_id)
    }

    #[must_use]
    pub fn cleanpath(&self) -> String {
        self.path(DEFAULT_PATH_PREFIX)
    }

    #[must_use]
    pub fn slug(&self) -> String {
        self.as_provision().map(Provision::slug).unwrap_or_default()
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.as_provision().map(Provision::label).unwrap_or_default()
    }

    #[must_use]
    pub fn cite_label(&self) -> String {
        self.as_provision()
            .map(Provision::cite_label)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        match *self {
            Node::Constitution(c) => &c.name,
            _ => self.as_provision().map_or("", Provision::name),
        }
    }

    #[must_use]
    pub fn content(&self) -> &'a str {
        self.as_provision().map_or("", Provision::content)
    }

    #[must_use]
    pub fn essay_links(&self) -> &'a [EssayLink] {
        self.as_provision()
            .map(Provision::essay_links)
            .unwrap_or_default()
    }

    /// Direct children in document order.
    ///
    /// An article lists its sections, or its clauses when it has none.
    #[must_use]
    pub fn children(&self) -> Children<'a> {
        match *self {
            Node::Constitution(c) => Box::new(
                std::iter::once(Node::Preamble(&c.preamble))
                    .chain(c.articles.iter().map(Node::Article))
                    .chain(c.amendments.iter().map(Node::Amendment)),
            ),
            Node::Article(a) if !a.sections.is_empty() => {
                Box::new(a.sections.iter().map(Node::Section))
            }
            Node::Article(a) => Box::new(a.clauses.iter().map(Node::Clause)),
            Node::Section(s) => Box::new(s.clauses.iter().map(Node::Clause)),
            Node::Amendment(a) => Box::new(a.sections.iter().map(Node::AmendSection)),
            Node::Preamble(_) | Node::Clause(_) | Node::AmendSection(_) => {
                Box::new(std::iter::empty())
            }
        }
    }
}
