//! End-to-end tests against the embedded full document.

use pretty_assertions::assert_eq;

use usconstitution::loader::{number_document, EMBEDDED_DOCUMENT};
use usconstitution::numeral::{from_roman, to_roman};
use usconstitution::{
    from_loc_id, load_embedded, AmendSection, Constitution, LoadOptions, Node, Provision,
    ProvisionKind, RenderStyle,
};

/// Load the embedded document under the Constitution Annotated prefix.
fn conan() -> Constitution {
    load_embedded(&LoadOptions::with_prefix("/constitution-conan"))
        .unwrap_or_else(|e| panic!("Failed to load embedded document: {e}"))
}

/// Section and clause numbers the loc-id parser can read back.
fn within_single_digit_contract(node: &Node<'_>) -> bool {
    match node {
        Node::Section(s) => s.index <= 9,
        Node::Clause(c) => c.index <= 9 && c.section_number.map_or(true, |s| s <= 9),
        _ => true,
    }
}

#[test]
fn test_document_shape() {
    let constitution = conan();
    assert_eq!(constitution.name, "Constitution of the United States");
    assert_eq!(constitution.articles.len(), 7);
    assert_eq!(constitution.amendments.len(), 27);
    assert_eq!(constitution.tree().count(), 174);

    let sections: Vec<usize> = constitution.articles.iter().map(|a| a.sections.len()).collect();
    assert_eq!(sections, vec![10, 4, 3, 4, 0, 0, 0]);
}

#[test]
fn test_paths_of_full_document() {
    let paths: Vec<String> = conan().paths().collect();
    assert_eq!(paths[0], "/constitution-conan");
    assert_eq!(paths[1], "/constitution-conan/preamble");
    assert_eq!(paths[2], "/constitution-conan/article-1");
    assert_eq!(paths[3], "/constitution-conan/article-1/section-1");
    assert_eq!(paths[4], "/constitution-conan/article-1/section-1/clause-1");
    assert_eq!(
        paths.last().map(String::as_str),
        Some("/constitution-conan/amendment-27")
    );
}

#[test]
fn test_headings_of_full_document() {
    let headings: Vec<String> = conan().headings().collect();
    assert_eq!(headings[0], "US Constitution");
    assert_eq!(headings[1], "US Constitution, Preamble");
    assert_eq!(headings[2], "US Constitution, Article I");
    assert_eq!(headings[4], "US Constitution, Article I, Section 1, Clause 1");
    assert_eq!(
        headings.last().map(String::as_str),
        Some("US Constitution, Amendment 27")
    );
}

#[test]
fn test_citations_of_full_document() {
    let citations: Vec<String> = conan().citations().collect();
    assert_eq!(citations[0], "U.S. Const.");
    assert_eq!(citations[1], "U.S. Const., Preamble");
    assert!(citations.contains(&"U.S. Const., amend. XIV, sec. 1".to_string()));
    assert!(citations.contains(&"U.S. Const., art. VI, cl. 2".to_string()));
    assert!(citations.contains(&"U.S. Const., art. I, § 8, cl. 18".to_string()));
}

#[test]
fn test_amend_section_citation() {
    assert_eq!(AmendSection::new(5, 1).citation(""), "amend. V, sec. 1");
}

#[test]
fn test_amendment_eight() {
    let constitution = conan();
    let amendment = constitution.amendment(8).unwrap();
    assert_eq!(amendment.name, "Cruel and Unusual Punishment");
    assert_eq!(amendment.heading(""), "Amendment 8");
    assert_eq!(amendment.heading("US Constitution"), "US Constitution, Amendment 8");
    assert_eq!(amendment.citation(""), "amend. VIII");
}

#[test]
fn test_taxing_clause_loc_id() {
    let constitution = conan();
    let clause = constitution
        .article(1)
        .and_then(|a| a.section(8))
        .and_then(|s| s.clause(1))
        .unwrap();
    assert_eq!(clause.loc_id(), "ArtI.S8.C1");
    assert!(clause.content.starts_with("The Congress shall have Power To lay and collect Taxes"));
}

#[test]
fn test_article_six_has_clauses_only() {
    let constitution = conan();
    let article = constitution.article(6).unwrap();
    assert!(article.sections.is_empty());
    assert_eq!(article.clauses.len(), 3);
    assert_eq!(article.clauses[0].path(""), "/article-6/clause-1");
    assert_eq!(article.clauses[1].loc_id(), "ArtVI.C2");
}

#[test]
fn test_article_seven_is_content_only() {
    let constitution = conan();
    let article = constitution.article(7).unwrap();
    assert!(article.content.starts_with("The Ratification"));
    assert_eq!(Node::Article(article).children().count(), 0);
}

#[test]
fn test_fragmented_content_is_joined() {
    let constitution = conan();
    assert!(constitution.preamble.content.starts_with("We the People of the United States"));
    assert!(constitution.preamble.content.contains("general Welfare, and secure"));

    let twelfth = constitution.amendment(12).unwrap();
    assert!(twelfth.content.contains("to a choice. And if the House"));
}

#[test]
fn test_section_fulltext() {
    let constitution = conan();
    let section = constitution.article(1).and_then(|a| a.section(8)).unwrap();
    let fulltext = section.fulltext();
    assert!(fulltext.starts_with("The Congress shall have Power"));
    assert!(fulltext.ends_with("or in any Department or Officer thereof."));
}

#[test]
fn test_indices_match_positions() {
    let constitution = conan();
    for (i, article) in constitution.articles.iter().enumerate() {
        assert_eq!(article.index as usize, i + 1);
        for (j, section) in article.sections.iter().enumerate() {
            assert_eq!(section.index as usize, j + 1);
            assert_eq!(section.article_number, article.index);
            for (k, clause) in section.clauses.iter().enumerate() {
                assert_eq!(clause.index as usize, k + 1);
                assert_eq!(clause.section_number, Some(section.index));
            }
        }
    }
    for (i, amendment) in constitution.amendments.iter().enumerate() {
        assert_eq!(amendment.index as usize, i + 1);
        for (j, section) in amendment.sections.iter().enumerate() {
            assert_eq!(section.index as usize, j + 1);
            assert_eq!(section.article_number, amendment.index);
        }
    }
}

#[test]
fn test_tree_is_restartable() {
    let constitution = conan();
    let first: Vec<_> = constitution.tree().collect();
    let second: Vec<_> = constitution.tree().collect();
    assert_eq!(first, second);
    assert_eq!(first[0].kind(), ProvisionKind::Constitution);
}

#[test]
fn test_compounding_walks_equal_standalone() {
    let constitution = conan();
    let cases = [
        (RenderStyle::Path, "/constitution-conan"),
        (RenderStyle::Heading, "US Constitution"),
        (RenderStyle::Citation, "U.S. Const."),
        (RenderStyle::Heading, ""),
    ];
    for (style, prefix) in cases {
        let compounded: Vec<String> = constitution.node().render(style, prefix).collect();
        let mapped: Vec<String> = constitution
            .tree()
            .map(|node| style.standalone(&node, prefix))
            .collect();
        assert_eq!(compounded, mapped);
    }
}

#[test]
fn test_every_loc_id_parses_to_a_prefix_of_itself() {
    let constitution = conan();
    for node in constitution.tree().filter(within_single_digit_contract) {
        let Some(loc_id) = node.loc_id() else {
            continue;
        };
        let (stub, _) = from_loc_id(&loc_id).unwrap();
        assert!(loc_id.starts_with(&stub.loc_id()), "{loc_id} vs {}", stub.loc_id());
    }
}

#[test]
fn test_lookup_round_trips_within_contract() {
    let constitution = conan();
    for node in constitution.tree().filter(within_single_digit_contract) {
        let Some(loc_id) = node.loc_id() else {
            continue;
        };
        let found = constitution.lookup(&loc_id).unwrap();
        assert_eq!(found, Some((node, "")), "{loc_id}");
    }
}

#[test]
fn test_multi_digit_loc_ids_are_rejected_not_truncated() {
    let constitution = conan();
    for loc_id in ["ArtI.S8.C18", "ArtI.S10", "ArtI.S10.C1"] {
        let err = constitution.lookup(loc_id).unwrap_err();
        assert!(err.is_parse_error(), "{loc_id}");
    }

    let out_of_contract = constitution
        .tree()
        .filter(|node| !within_single_digit_contract(node))
        .filter_map(|node| node.loc_id());
    for loc_id in out_of_contract {
        assert!(from_loc_id(&loc_id).is_err(), "{loc_id}");
    }
}

#[test]
fn test_lookup_with_essay_suffix() {
    let constitution = conan();
    let (node, rest) = constitution.lookup("ArtIII.S2.C2.4").unwrap().unwrap();
    assert_eq!(node.citation("U.S. Const."), "U.S. Const., art. III, § 2, cl. 2");
    assert_eq!(rest, "4");
}

#[test]
fn test_unrecognized_loc_id() {
    let err = from_loc_id("AnnIII.X2.Y1").unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_essay_links_resolve_to_their_provision() {
    let constitution = conan();
    for node in constitution.tree() {
        for link in node.essay_links() {
            let (stub, rest) = link.provision().unwrap();
            assert_eq!(constitution.resolve(&stub), Some(node));
            assert!(!rest.is_empty());
        }
    }
    assert_eq!(constitution.preamble.essay_links.len(), 1);
}

#[test]
fn test_roman_numerals_round_trip() {
    for n in 1..=27 {
        assert_eq!(from_roman(&to_roman(n)), Some(n));
    }
    assert_eq!(to_roman(14), "XIV");
    assert_eq!(to_roman(27), "XXVII");
}

#[test]
fn test_cleanpath_ignores_load_prefix() {
    let constitution = load_embedded(&LoadOptions::default()).unwrap();
    let article = constitution.article(2).unwrap();
    assert_eq!(article.cleanpath(), "/constitution-conan/article-2");
    assert_eq!(constitution.paths().nth(1).as_deref(), Some("/preamble"));
}

#[test]
fn test_schema_violations_are_rejected() {
    let mut doc: serde_json::Value = serde_json::from_str(EMBEDDED_DOCUMENT).unwrap();
    number_document(&mut doc).unwrap();
    assert!(Constitution::from_value(doc.clone()).is_ok());

    let mut wrong_position = doc.clone();
    wrong_position["articles"][0]["sections"][7]["index"] = serde_json::json!(9);
    assert!(Constitution::from_value(wrong_position).unwrap_err().is_schema_error());

    let mut wrong_key = doc.clone();
    wrong_key["amendments"][13]["sections"][0]["article_number"] = serde_json::json!(13);
    assert!(Constitution::from_value(wrong_key).unwrap_err().is_schema_error());

    let mut missing_index = doc.clone();
    missing_index["amendments"][0]
        .as_object_mut()
        .unwrap()
        .remove("index");
    assert!(Constitution::from_value(missing_index).unwrap_err().is_schema_error());

    let mut both = doc;
    both["articles"][5]["sections"] = serde_json::json!([{"article_number": 6, "index": 1}]);
    let err = Constitution::from_value(both).unwrap_err();
    assert!(err.to_string().contains("both sections and clauses"));
}
