use super::*;
use std::fs;

const DOC_A: &str = "<section id=\"t1\"><h1>Hello</h1></section><section id=\"p1\">\
<div class=\"headline\">Q1</div><div id=\"c1\" class=\"problem-text\">Solve <b>this</b></div>\
</section>";
const DOC_B: &str = "<section id=\"other\"><h1>Other</h1></section>";

#[test]
fn test_new_session_cannot_export() {
    let session = Session::new();
    assert!(matches!(session.state(), LoadState::Unresolved));
    assert_eq!(session.file_name(), None);
    assert_eq!(session.export(), Err(ExportError::NotReady));
}

#[test]
fn test_load_then_export() {
    let mut session = Session::new();
    session.load("problems.html", DOC_A.as_bytes());
    assert!(matches!(session.state(), LoadState::Ready { .. }));
    assert_eq!(session.open_regions(), 3);

    let file = session.export().unwrap();
    assert_eq!(file.file_name, "problems.html");
    assert_eq!(file.mime, "text/html");
    assert!(file.contents.starts_with("<section id=\"t1\">Hello</section>\n"));
}

#[test]
fn test_export_requires_opened_regions() {
    let mut session = Session::new();
    session.load("a.html", DOC_A.as_bytes());
    assert!(matches!(
        session.export(),
        Err(ExportError::UnknownRegion(_))
    ));
}

#[test]
fn test_new_file_resets_registry() {
    let mut session = Session::new();
    session.load("a.html", DOC_A.as_bytes());
    session.open_regions();
    assert_eq!(session.registry().map(SessionRegistry::len), Some(3));

    let ticket = session.begin_load("b.html");
    assert!(session.registry().is_none());
    assert!(session.model().is_none());
    assert!(session.finish_load(ticket, DOC_B.as_bytes()));
    assert_eq!(session.registry().map(SessionRegistry::len), Some(0));
    assert_eq!(session.open_regions(), 1);
    assert_eq!(session.file_name(), Some("b.html"));
}

#[test]
fn test_last_chosen_file_wins() {
    let mut session = Session::new();
    let first = session.begin_load("a.html");
    let second = session.begin_load("b.html");

    assert!(!session.finish_load(first, DOC_A.as_bytes()));
    assert!(matches!(session.state(), LoadState::Loading { .. }));

    assert!(session.finish_load(second, DOC_B.as_bytes()));
    assert_eq!(session.file_name(), Some("b.html"));
    assert_eq!(session.model().map(SectionModel::len), Some(1));

    // A late result for the first file changes nothing.
    assert!(!session.finish_load(first, DOC_A.as_bytes()));
    assert_eq!(session.file_name(), Some("b.html"));
}

#[test]
fn test_unreadable_file_fails_visibly() {
    let mut session = Session::new();
    session.load("bad.html", &[0xff, 0xfe, 0x00]);
    assert!(matches!(
        session.state(),
        LoadState::Failed { file_name, error: ParseError::Encoding(_) } if file_name == "bad.html"
    ));
    assert_eq!(session.open_regions(), 0);
    assert_eq!(session.export(), Err(ExportError::NotReady));
}

#[test]
fn test_write_to_dir_uses_same_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new();
    session.load("problems.html", DOC_A.as_bytes());
    session.open_regions();
    let file = session.export().unwrap();

    let out_dir = dir.path().join("exported");
    let path = file.write_to_dir(&out_dir).unwrap();
    assert_eq!(path, out_dir.join("problems.html"));
    assert_eq!(fs::read_to_string(&path).unwrap(), file.contents);
}

#[test]
fn test_load_path_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.html");
    fs::write(&path, DOC_A).unwrap();

    let mut session = Session::new();
    session.load_path(&path).unwrap();
    assert_eq!(session.file_name(), Some("doc.html"));
    assert_eq!(session.model().map(SectionModel::len), Some(2));
}

#[test]
fn test_load_path_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new();
    session.load("a.html", DOC_A.as_bytes());
    let err = session.load_path(&dir.path().join("nope.html")).unwrap_err();
    assert!(matches!(err, SessionError::Io(_)));
    assert!(matches!(session.state(), LoadState::Unresolved));
}
