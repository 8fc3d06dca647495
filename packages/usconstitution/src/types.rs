//! Core data types for the provision tree.
//!
//! Every struct deserializes from the numbered JSON document produced by
//! [`crate::loader`]. Positional fields (`index`, `article_number`,
//! `section_number`) are required: the loader's numbering pre-pass writes
//! them, and [`Constitution::from_value`] rejects documents where they are
//! missing or disagree with list position.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConstitutionError, Result};
use crate::text::{deserialize_content, deserialize_trimmed, join_fragments};

/// Link to an essay in the Constitution Annotated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EssayLink {
    /// Site path of the essay.
    pub cleanpath: String,

    /// Essay title.
    pub title: String,

    /// Loc-id of the provision, followed by the essay's own suffix.
    pub loc_id: String,

    #[serde(default)]
    pub idnums: String,

    #[serde(default)]
    pub extid: String,

    /// Link to the essay on congress.gov (optional).
    #[serde(default)]
    pub govlink: Option<String>,

    /// Nested essays.
    #[serde(default)]
    pub children: Vec<EssayLink>,
}

/// The preamble ("We the People...").
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Preamble {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub num: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: String,

    #[serde(default)]
    pub essay_links: Vec<EssayLink>,
}

/// A clause of a section, or of an article that has no sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Clause {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub num: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: String,

    /// Number of the owning article.
    pub article_number: u32,

    /// Number of the owning section; `None` for article-level clauses.
    #[serde(default)]
    pub section_number: Option<u32>,

    /// 1-based position among sibling clauses.
    pub index: u32,

    #[serde(default)]
    pub essay_links: Vec<EssayLink>,
}

impl Clause {
    /// Create a clause addressed by its numbers.
    #[must_use]
    pub fn new(article_number: u32, section_number: Option<u32>, index: u32) -> Self {
        Self {
            article_number,
            section_number,
            index,
            ..Self::default()
        }
    }

    /// Set the clause text.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into().trim().to_string();
        self
    }
}

/// A numbered section of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub num: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub name: String,

    /// Section-level prose preceding the clauses.
    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: String,

    #[serde(default)]
    pub clauses: Vec<Clause>,

    /// Number of the owning article.
    pub article_number: u32,

    /// 1-based position among sibling sections.
    pub index: u32,

    #[serde(default)]
    pub essay_links: Vec<EssayLink>,
}

impl Section {
    /// Create a section addressed by its numbers.
    #[must_use]
    pub fn new(article_number: u32, index: u32) -> Self {
        Self {
            article_number,
            index,
            ..Self::default()
        }
    }

    /// Set the clauses.
    #[must_use]
    pub fn with_clauses(mut self, clauses: Vec<Clause>) -> Self {
        self.clauses = clauses;
        self
    }

    /// Clause by 1-based number.
    #[must_use]
    pub fn clause(&self, number: u32) -> Option<&Clause> {
        nth(&self.clauses, number)
    }

    /// Section prose followed by the text of every clause.
    #[must_use]
    pub fn fulltext(&self) -> String {
        join_fragments(
            std::iter::once(self.content.as_str())
                .chain(self.clauses.iter().map(|c| c.content.as_str()))
                .filter(|t| !t.is_empty()),
        )
    }

    fn validate(&self, position: usize, article: u32, path: &str) -> Result<()> {
        check_index(path, self.index, position)?;
        check_key(path, "article_number", self.article_number, article)?;

        for (k, clause) in self.clauses.iter().enumerate() {
            let clause_path = format!("{path}.clauses[{k}]");
            check_index(&clause_path, clause.index, k)?;
            check_key(&clause_path, "article_number", clause.article_number, article)?;
            if clause.section_number != Some(self.index) {
                return Err(ConstitutionError::schema(
                    clause_path,
                    format!(
                        "section_number {:?} does not match owning section {}",
                        clause.section_number, self.index
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// A top-level article.
///
/// Most articles are divided into sections. Article VI lists its clauses
/// directly, and Articles V and VII are a single paragraph of `content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub num: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: String,

    #[serde(default)]
    pub sections: Vec<Section>,

    /// Clauses of an article without sections.
    #[serde(default)]
    pub clauses: Vec<Clause>,

    /// 1-based article number.
    pub index: u32,

    #[serde(default)]
    pub essay_links: Vec<EssayLink>,
}

impl Article {
    /// Create an article addressed by its number.
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Set the sections.
    #[must_use]
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Set the article-level clauses.
    #[must_use]
    pub fn with_clauses(mut self, clauses: Vec<Clause>) -> Self {
        self.clauses = clauses;
        self
    }

    /// Set the article text.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into().trim().to_string();
        self
    }

    /// Section by 1-based number.
    #[must_use]
    pub fn section(&self, number: u32) -> Option<&Section> {
        nth(&self.sections, number)
    }

    /// Article-level clause by 1-based number.
    #[must_use]
    pub fn clause(&self, number: u32) -> Option<&Clause> {
        nth(&self.clauses, number)
    }

    fn validate(&self, position: usize, path: &str) -> Result<()> {
        check_index(path, self.index, position)?;

        if !self.sections.is_empty() && !self.clauses.is_empty() {
            return Err(ConstitutionError::schema(
                path,
                "article has both sections and clauses",
            ));
        }

        for (j, section) in self.sections.iter().enumerate() {
            section.validate(j, self.index, &format!("{path}.sections[{j}]"))?;
        }

        for (k, clause) in self.clauses.iter().enumerate() {
            let clause_path = format!("{path}.clauses[{k}]");
            check_index(&clause_path, clause.index, k)?;
            check_key(&clause_path, "article_number", clause.article_number, self.index)?;
            if let Some(section) = clause.section_number {
                return Err(ConstitutionError::schema(
                    clause_path,
                    format!("article-level clause carries section_number {section}"),
                ));
            }
        }
        Ok(())
    }
}

/// A numbered section of an amendment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AmendSection {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub num: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: String,

    /// Number of the owning amendment.
    #[serde(alias = "amendment_number")]
    pub article_number: u32,

    /// 1-based position among sibling sections.
    pub index: u32,

    #[serde(default)]
    pub essay_links: Vec<EssayLink>,
}

impl AmendSection {
    /// Create an amendment section addressed by its numbers.
    #[must_use]
    pub fn new(amendment_number: u32, index: u32) -> Self {
        Self {
            article_number: amendment_number,
            index,
            ..Self::default()
        }
    }

    /// Set the section text.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into().trim().to_string();
        self
    }
}

/// An amendment, either a single paragraph of `content` or a list of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Amendment {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub num: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: String,

    #[serde(default)]
    pub sections: Vec<AmendSection>,

    /// 1-based amendment number.
    pub index: u32,

    #[serde(default)]
    pub essay_links: Vec<EssayLink>,
}

impl Amendment {
    /// Create an amendment addressed by its number.
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into().trim().to_string();
        self
    }

    /// Set the sections.
    #[must_use]
    pub fn with_sections(mut self, sections: Vec<AmendSection>) -> Self {
        self.sections = sections;
        self
    }

    /// Set the amendment text.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into().trim().to_string();
        self
    }

    /// Section by 1-based number.
    #[must_use]
    pub fn section(&self, number: u32) -> Option<&AmendSection> {
        nth(&self.sections, number)
    }

    fn validate(&self, position: usize, path: &str) -> Result<()> {
        check_index(path, self.index, position)?;

        if !self.sections.is_empty() && !self.content.is_empty() {
            return Err(ConstitutionError::schema(
                path,
                "amendment has both sections and content",
            ));
        }

        for (j, section) in self.sections.iter().enumerate() {
            let section_path = format!("{path}.sections[{j}]");
            check_index(&section_path, section.index, j)?;
            check_key(&section_path, "article_number", section.article_number, self.index)?;
        }
        Ok(())
    }
}

/// The document root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Constitution {
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub name: String,

    pub preamble: Preamble,

    pub articles: Vec<Article>,

    pub amendments: Vec<Amendment>,

    /// Base for every rendered path, injected at load time.
    #[serde(default)]
    pub path_prefix: String,
}

impl Constitution {
    /// Assemble and validate a tree from already-numbered parts.
    ///
    /// # Errors
    ///
    /// Returns `ConstitutionError::Schema` if any index or foreign key
    /// disagrees with its position in the tree.
    pub fn new(
        name: impl Into<String>,
        preamble: Preamble,
        articles: Vec<Article>,
        amendments: Vec<Amendment>,
    ) -> Result<Self> {
        let constitution = Self {
            name: name.into().trim().to_string(),
            preamble,
            articles,
            amendments,
            path_prefix: String::new(),
        };
        constitution.validate()?;
        Ok(constitution)
    }

    /// Build the tree from a numbered JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConstitutionError::Schema` for missing or mistyped fields and
    /// for positional fields that disagree with the document structure. No
    /// partial tree is ever returned.
    pub fn from_value(value: Value) -> Result<Self> {
        let constitution: Self = serde_json::from_value(value)
            .map_err(|e| ConstitutionError::schema("$", e.to_string()))?;
        constitution.validate()?;
        Ok(constitution)
    }

    /// Set the base for rendered paths.
    #[must_use]
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// Article by 1-based number.
    #[must_use]
    pub fn article(&self, number: u32) -> Option<&Article> {
        nth(&self.articles, number)
    }

    /// Amendment by 1-based number.
    #[must_use]
    pub fn amendment(&self, number: u32) -> Option<&Amendment> {
        nth(&self.amendments, number)
    }

    fn validate(&self) -> Result<()> {
        for (i, article) in self.articles.iter().enumerate() {
            article.validate(i, &format!("articles[{i}]"))?;
        }
        for (i, amendment) in self.amendments.iter().enumerate() {
            amendment.validate(i, &format!("amendments[{i}]"))?;
        }
        Ok(())
    }
}

fn nth<T>(items: &[T], number: u32) -> Option<&T> {
    let position = usize::try_from(number.checked_sub(1)?).ok()?;
    items.get(position)
}

fn check_index(path: &str, index: u32, position: usize) -> Result<()> {
    let expected = position + 1;
    if usize::try_from(index).ok() == Some(expected) {
        Ok(())
    } else {
        Err(ConstitutionError::schema(
            path,
            format!("index {index} does not match position {expected}"),
        ))
    }
}

fn check_key(path: &str, field: &str, actual: u32, expected: u32) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(ConstitutionError::schema(
            path,
            format!("{field} {actual} does not match owning provision {expected}"),
        ))
    }
}
