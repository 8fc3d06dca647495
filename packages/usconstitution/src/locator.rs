//! Loc-id parsing.
//!
//! A loc-id is the Library of Congress identifier of a provision, e.g.
//! `ArtI.S8.C1`, optionally followed by an essay suffix (`ArtI.S8.C1.1.2`).
//! [`from_loc_id`] turns one back into a detached provision stub plus the
//! unconsumed suffix.
//!
//! Section and clause components are read as a single digit. Multi-digit
//! components (`ArtI.S10`, `ArtI.S8.C18`) are out of contract and rejected
//! with a parse error.

use crate::error::{ConstitutionError, Result};
use crate::numeral::from_roman;
use crate::provision::{Node, Provision, ProvisionKind};
use crate::types::{Amendment, Article, Clause, Constitution, EssayLink, Preamble, Section};

/// A provision addressed by a loc-id, not linked into any tree.
///
/// Stubs carry only their identifying numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionStub {
    Preamble(Preamble),
    Article(Article),
    Section(Section),
    Clause(Clause),
    Amendment(Amendment),
}

impl ProvisionStub {
    /// Borrow the stub as a node.
    #[must_use]
    pub fn node(&self) -> Node<'_> {
        match self {
            Self::Preamble(p) => Node::Preamble(p),
            Self::Article(a) => Node::Article(a),
            Self::Section(s) => Node::Section(s),
            Self::Clause(c) => Node::Clause(c),
            Self::Amendment(a) => Node::Amendment(a),
        }
    }

    fn provision(&self) -> &dyn Provision {
        match self {
            Self::Preamble(p) => p,
            Self::Article(a) => a,
            Self::Section(s) => s,
            Self::Clause(c) => c,
            Self::Amendment(a) => a,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ProvisionKind {
        self.provision().kind()
    }

    #[must_use]
    pub fn loc_id(&self) -> String {
        self.provision().loc_id()
    }

    #[must_use]
    pub fn path(&self, prefix: &str) -> String {
        self.provision().path(prefix)
    }

    #[must_use]
    pub fn heading(&self, prefix: &str) -> String {
        self.provision().heading(prefix)
    }

    #[must_use]
    pub fn citation(&self, prefix: &str) -> String {
        self.provision().citation(prefix)
    }
}

/// Parse a loc-id into a provision stub and the unconsumed remainder.
///
/// # Errors
///
/// Returns `ConstitutionError::Parse` if the input does not start with
/// `Pre`, `Art` or `Amdt`, or if a numeral after a recognized prefix is
/// malformed.
///
/// # Examples
/// ```
/// use usconstitution::from_loc_id;
///
/// let (stub, rest) = from_loc_id("ArtIII.S2.C2.4").unwrap();
/// assert_eq!(stub.loc_id(), "ArtIII.S2.C2");
/// assert_eq!(rest, "4");
/// assert!(from_loc_id("AnnIII.X2.Y1").is_err());
/// ```
pub fn from_loc_id(loc_id: &str) -> Result<(ProvisionStub, &str)> {
    let parsed = if loc_id.starts_with("Pre") {
        (ProvisionStub::Preamble(Preamble::default()), tail(loc_id, 4))
    } else if let Some(rest) = loc_id.strip_prefix("Art") {
        parse_article(loc_id, rest)?
    } else if let Some(rest) = loc_id.strip_prefix("Amdt") {
        let number = rest.split('.').next().unwrap_or(rest);
        let index = parse_number(number)
            .ok_or_else(|| ConstitutionError::parse(loc_id, "invalid amendment number"))?;
        (ProvisionStub::Amendment(Amendment::new(index)), after_first(loc_id))
    } else {
        return Err(ConstitutionError::parse(loc_id, "unrecognized prefix"));
    };

    tracing::trace!(
        loc_id = %loc_id,
        kind = parsed.0.kind().as_str(),
        rest = parsed.1,
        "Parsed loc-id"
    );
    Ok(parsed)
}

fn parse_article<'s>(loc_id: &'s str, rest: &str) -> Result<(ProvisionStub, &'s str)> {
    let numeral = rest.split('.').next().unwrap_or(rest);
    let article = from_roman(numeral)
        .ok_or_else(|| ConstitutionError::parse(loc_id, "invalid article numeral"))?;

    let Some(s_pos) = loc_id.find(".S") else {
        return Ok((ProvisionStub::Article(Article::new(article)), after_first(loc_id)));
    };
    let section = single_digit(loc_id, s_pos + 2, "section")?;

    let c_pos = tail(loc_id, s_pos).find(".C").map(|p| p + s_pos);
    match c_pos {
        Some(c_pos) => {
            let clause = single_digit(loc_id, c_pos + 2, "clause")?;
            Ok((
                ProvisionStub::Clause(Clause::new(article, Some(section), clause)),
                tail(loc_id, c_pos + 4),
            ))
        }
        None => Ok((
            ProvisionStub::Section(Section::new(article, section)),
            loc_id.splitn(3, '.').nth(2).unwrap_or(""),
        )),
    }
}

/// Input from byte `offset`, or empty when shorter.
fn tail(s: &str, offset: usize) -> &str {
    s.get(offset..).unwrap_or("")
}

/// Everything after the first `.`-delimited segment.
fn after_first(s: &str) -> &str {
    s.split_once('.').map_or("", |(_, rest)| rest)
}

fn single_digit(loc_id: &str, offset: usize, component: &str) -> Result<u32> {
    let mut digits = tail(loc_id, offset).chars();
    let number = digits
        .next()
        .and_then(|c| c.to_digit(10))
        .filter(|&n| n > 0)
        .ok_or_else(|| ConstitutionError::parse(loc_id, format!("invalid {component} number")))?;
    if digits.next().is_some_and(|c| c.is_ascii_digit()) {
        return Err(ConstitutionError::parse(
            loc_id,
            format!("multi-digit {component} number is out of contract"),
        ));
    }
    Ok(number)
}

/// Decimal number without sign or leading zeros.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Constitution {
    /// Find the node a stub addresses.
    #[must_use]
    pub fn resolve(&self, stub: &ProvisionStub) -> Option<Node<'_>> {
        match stub {
            ProvisionStub::Preamble(_) => Some(Node::Preamble(&self.preamble)),
            ProvisionStub::Article(a) => self.article(a.index).map(Node::Article),
            ProvisionStub::Section(s) => self
                .article(s.article_number)?
                .section(s.index)
                .map(Node::Section),
            ProvisionStub::Clause(c) => {
                let article = self.article(c.article_number)?;
                let clause = match c.section_number {
                    Some(section) => article.section(section)?.clause(c.index),
                    None => article.clause(c.index),
                };
                clause.map(Node::Clause)
            }
            ProvisionStub::Amendment(a) => self.amendment(a.index).map(Node::Amendment),
        }
    }

    /// Parse a loc-id and find its node in this tree.
    ///
    /// Unlike [`from_loc_id`], lookup also descends into amendment sections
    /// (`Amdt14.S1`) and clauses of articles without sections (`ArtVI.C2`),
    /// consuming that segment of the remainder.
    ///
    /// # Errors
    ///
    /// Returns `ConstitutionError::Parse` if the loc-id cannot be parsed.
    /// A well-formed loc-id naming a provision that does not exist is `Ok(None)`.
    pub fn lookup<'s>(&self, loc_id: &'s str) -> Result<Option<(Node<'_>, &'s str)>> {
        let (stub, rest) = from_loc_id(loc_id)?;
        Ok(self.resolve(&stub).map(|node| descend(node, rest)))
    }
}

fn descend<'a, 's>(node: Node<'a>, rest: &'s str) -> (Node<'a>, &'s str) {
    let (segment, remainder) = rest.split_once('.').unwrap_or((rest, ""));
    let child = match node {
        Node::Amendment(a) => segment
            .strip_prefix('S')
            .and_then(parse_number)
            .and_then(|n| a.section(n))
            .map(Node::AmendSection),
        Node::Article(a) if a.sections.is_empty() => segment
            .strip_prefix('C')
            .and_then(parse_number)
            .and_then(|n| a.clause(n))
            .map(Node::Clause),
        _ => None,
    };
    child.map_or((node, rest), |child| (child, remainder))
}

impl EssayLink {
    /// The provision this essay annotates, with the essay's own suffix.
    ///
    /// # Errors
    ///
    /// Returns `ConstitutionError::Parse` if the link's loc-id is malformed.
    pub fn provision(&self) -> Result<(ProvisionStub, &str)> {
        from_loc_id(&self.loc_id)
    }
}
