//! Integration tests for corpus loading.

use proptest::prelude::*;

use storyline_core::{entity::RelationKind, identifier::Id};
use storyline_parser::{error::ErrorCode, load};

const CORPUS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CORPUS>
  <ACTORS>
    <TA ID="TA1" NAME="Ariadne" MAIN="true"/>
    <TA ID="TA2" NAME="Theseus"/>
  </ACTORS>
  <LOCATIONS>
    <TL ID="TL1" NAME="Crete"/>
    <TL ID="TL2" NAME="Labyrinth" PARENTID="TL1"/>
    <TL ID="TL3" NAME="Naxos" PARENTID="TL99"/>
  </LOCATIONS>
  <TEXT>
    <TS ID="TS1" NAME="Thread" TEXT="Ariadne gives the thread." LOCATION="TL1" ACTORS="TA1,Theseus" PER="TA2"/>
    <TS ID="TS2" NAME="Maze" TEXT="Theseus enters the maze." LOCATION="TL2" ACTORS="TA2"/>
    <TS ID="TS3" NAME="Shore" TEXT="Ariadne wakes alone." LOCATION="TL3" ACTORS="TA1"/>
  </TEXT>
  <TREL ID="R1" FROM="TS2" TO="TS1" REL="AFTER" TRIGGER="then"/>
  <TREL ID="R2" FROM="TS3" TO="TS2" REL="IMMEDIATELY_AFTER"/>
</CORPUS>
"#;

#[test]
fn test_load_full_corpus() {
    let loaded = load(CORPUS).expect("corpus should load");
    let corpus = loaded.corpus();

    assert_eq!(corpus.actors().count(), 2);
    assert_eq!(corpus.locations().count(), 3);
    assert_eq!(corpus.speeches().count(), 3);
    assert_eq!(corpus.relations().len(), 2);
    assert!(loaded.warnings().is_empty());

    let ariadne = corpus.actor(Id::new("TA1")).unwrap();
    assert!(ariadne.is_main());
    assert!(!corpus.actor(Id::new("TA2")).unwrap().is_main());

    let thread = corpus.speech(Id::new("TS1")).unwrap();
    assert_eq!(thread.text(), "Ariadne gives the thread.");
    assert_eq!(thread.location().unwrap().name(), "Crete");
    // `Theseus` resolves by name
    assert!(thread.has_all_of_actors(&[Id::new("TA1"), Id::new("TA2")]));
    assert_eq!(thread.persons().len(), 1);

    let relation = &corpus.relations()[0];
    assert_eq!(relation.from().id(), Id::new("TS2"));
    assert_eq!(relation.to().id(), Id::new("TS1"));
    assert_eq!(relation.kind(), RelationKind::After);
    assert_eq!(relation.trigger(), "then");
}

#[test]
fn test_missing_parent_location_resolves_to_none() {
    let loaded = load(CORPUS).unwrap();
    let corpus = loaded.corpus();

    let naxos = corpus.location(Id::new("TL3")).unwrap();
    assert!(corpus.location_parent(naxos).is_none());

    let labyrinth = corpus.location(Id::new("TL2")).unwrap();
    assert_eq!(corpus.location_parent(labyrinth).unwrap().name(), "Crete");
}

#[test]
fn test_unresolved_actor_tokens_are_dropped_with_warning() {
    let source = r#"<C>
        <TA ID="TA1" NAME="Hero"/>
        <TS ID="TS1" ACTORS="TA1,Ghost,"/>
        <TS ID="TS2" ACTORS="Nobody"/>
    </C>"#;

    let loaded = load(source).expect("dropped tokens are not fatal");
    let corpus = loaded.corpus();

    assert_eq!(corpus.speech(Id::new("TS1")).unwrap().actors().len(), 1);
    assert!(corpus.speech(Id::new("TS2")).unwrap().actors().is_empty());

    let codes: Vec<_> = loaded.warnings().iter().map(|w| w.code()).collect();
    assert_eq!(codes, vec![Some(ErrorCode::E304), Some(ErrorCode::E304)]);
    assert!(loaded.warnings().iter().all(|w| w.severity().is_warning()));
}

#[test]
fn test_forward_references_resolve() {
    let source = r#"<C>
        <TREL ID="R1" FROM="TS2" TO="TS1" REL="BEFORE"/>
        <TS ID="TS1" ACTORS="TA1"/>
        <TS ID="TS2"/>
        <TA ID="TA1" NAME="Late"/>
    </C>"#;

    let loaded = load(source).unwrap();
    let corpus = loaded.corpus();

    assert_eq!(corpus.relations().len(), 1);
    assert!(corpus.speech(Id::new("TS1")).unwrap().has_actor(Id::new("TA1")));
}

#[test]
fn test_unknown_relation_kind_is_an_error() {
    let source = r#"<C>
        <TS ID="TS1"/><TS ID="TS2"/>
        <TREL ID="R1" FROM="TS2" TO="TS1" REL="DURING"/>
    </C>"#;

    let err = load(source).unwrap_err();
    assert_eq!(err.error_count(), 1);
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E302));
    assert!(diag.message().contains("DURING"));
    assert!(diag.help().unwrap().contains("IMMEDIATELY_BEFORE"));
}

#[test]
fn test_unknown_speech_reference_is_an_error() {
    let source = r#"<C>
        <TS ID="TS1"/>
        <TREL ID="R1" FROM="TS404" TO="TS1" REL="BEFORE"/>
    </C>"#;

    let err = load(source).unwrap_err();
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E303));
    assert!(diag.message().contains("TS404"));
}

#[test]
fn test_all_errors_are_reported_together() {
    let source = r#"<C>
        <TA NAME="No id"/>
        <TS ID="TS1"/>
        <TS ID="TS1"/>
        <TREL ID="R1" FROM="TS1" REL="AFTER"/>
    </C>"#;

    let err = load(source).unwrap_err();
    let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::E300, ErrorCode::E301, ErrorCode::E300]
    );

    // The duplicate points back at the first definition
    let duplicate = &err.diagnostics()[1];
    assert_eq!(duplicate.labels().len(), 2);
    assert!(duplicate.labels()[1].is_secondary());
}

#[test]
fn test_malformed_xml_is_an_error() {
    let err = load("<C><TS ID=\"TS1\"></C>").unwrap_err();

    assert_eq!(err.error_count(), 1);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
}

#[test]
fn test_empty_corpus_loads() {
    let loaded = load("<CORPUS/>").unwrap();

    assert!(loaded.corpus().relations().is_empty());
    assert_eq!(loaded.into_corpus().speeches().count(), 0);
}

proptest! {
    #[test]
    fn load_never_panics(source in ".{0,200}") {
        let _ = load(&source);
    }

    #[test]
    fn actor_lists_never_fail_the_load(tokens in proptest::collection::vec("[A-Za-z0-9 ]{0,6}", 0..6)) {
        let source = format!(
            r#"<C><TA ID="TA1" NAME="Hero"/><TS ID="TS1" ACTORS="{}"/></C>"#,
            tokens.join(",")
        );
        let loaded = load(&source);
        prop_assert!(loaded.is_ok());
    }
}
