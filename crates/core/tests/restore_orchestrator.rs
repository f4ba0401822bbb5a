//! Restore orchestration against a scripted control plane.

mod support;

use std::sync::Arc;

use support::{FakeDocumentLocator, ScriptedControlPlane};
use worksnap_core::{DocumentOutcome, RestoreOrchestrator};
use worksnap_domain::{
    AppSnapshot, DocumentRef, RestoreTimings, WindowRect, WorksnapError, WorkspaceSnapshot,
};

fn orchestrator(
    control: Arc<ScriptedControlPlane>,
    locator: FakeDocumentLocator,
) -> RestoreOrchestrator {
    RestoreOrchestrator::new(control, Arc::new(locator), RestoreTimings::immediate())
}

fn word(documents: Vec<DocumentRef>) -> WorkspaceSnapshot {
    WorkspaceSnapshot::new(
        "Writing",
        vec![AppSnapshot::DocumentEditor {
            app: "Microsoft Word".to_string(),
            documents,
            window_positions: Vec::new(),
        }],
    )
}

fn doc(name: &str, path: &str) -> DocumentRef {
    DocumentRef { name: name.to_string(), path: path.to_string() }
}

#[tokio::test]
async fn browser_windows_are_reopened_before_geometry() {
    let control = Arc::new(ScriptedControlPlane::new().with_window_count("Safari", 1));
    let snapshot = WorkspaceSnapshot::new(
        "Work",
        vec![AppSnapshot::Browser {
            app: "Safari".to_string(),
            windows: vec![vec!["https://a.com".to_string(), "https://b.com".to_string()]],
            window_positions: vec![WindowRect::new(0, 0, 800, 600)],
        }],
    );

    let report =
        orchestrator(control.clone(), FakeDocumentLocator::default()).restore(&snapshot).await;

    let close = control.first_index_of(&["close every window"]).unwrap();
    let open = control
        .first_index_of(&[r#"make new document with properties {URL:"https://a.com"}"#])
        .unwrap();
    let geometry = control.first_index_of(&["set position of targetWindow to {0, 0}"]).unwrap();
    assert!(close < open);
    assert!(open < geometry);

    let opened = &control.calls()[open];
    assert!(opened.contains("activate"));
    assert!(opened.contains(
        r#"make new tab at end of tabs of currentWindow with properties {URL:"https://b.com"}"#
    ));
    assert!(control.calls()[geometry].contains("set size of targetWindow to {800, 600}"));

    assert_eq!(report.apps_restored, vec!["Safari".to_string()]);
    assert_eq!(report.windows_positioned, 1);
    assert!(report.is_clean());
}

#[tokio::test]
async fn only_first_browser_window_activates() {
    let control = Arc::new(ScriptedControlPlane::new());
    let snapshot = WorkspaceSnapshot::new(
        "Research",
        vec![AppSnapshot::Browser {
            app: "Safari".to_string(),
            windows: vec![vec!["https://a.com".to_string()], vec!["https://c.com".to_string()]],
            window_positions: Vec::new(),
        }],
    );

    orchestrator(control.clone(), FakeDocumentLocator::default()).restore(&snapshot).await;

    let opens = control.calls_matching(&["make new document"]);
    assert_eq!(opens.len(), 2);
    assert!(opens[0].contains("activate"));
    assert!(!opens[1].contains("activate"));
}

#[tokio::test]
async fn geometry_never_targets_more_windows_than_are_live() {
    let control = Arc::new(ScriptedControlPlane::new().with_window_count("Notes", 1));
    let snapshot = WorkspaceSnapshot::new(
        "Notes",
        vec![AppSnapshot::Generic {
            app: "Notes".to_string(),
            window_positions: vec![
                WindowRect::new(0, 0, 400, 300),
                WindowRect::new(50, 50, 400, 300),
                WindowRect::new(100, 100, 400, 300),
            ],
        }],
    );

    let report =
        orchestrator(control.clone(), FakeDocumentLocator::default()).restore(&snapshot).await;

    assert_eq!(control.calls_matching(&["set targetWindow to window 1"]).len(), 1);
    assert!(control.calls_matching(&["set targetWindow to window 2"]).is_empty());
    assert!(control.calls_matching(&["set targetWindow to window 3"]).is_empty());
    assert_eq!(report.windows_positioned, 1);
    assert_eq!(report.windows_skipped, 2);
}

#[tokio::test]
async fn window_error_output_counts_as_failed() {
    let control = Arc::new(
        ScriptedControlPlane::new()
            .with_window_count("Notes", 2)
            .on(&["set targetWindow to window 1"], "ERROR: window is not resizable"),
    );
    let snapshot = WorkspaceSnapshot::new(
        "Notes",
        vec![AppSnapshot::Generic {
            app: "Notes".to_string(),
            window_positions: vec![
                WindowRect::new(0, 0, 400, 300),
                WindowRect::new(50, 50, 400, 300),
            ],
        }],
    );

    let report =
        orchestrator(control.clone(), FakeDocumentLocator::default()).restore(&snapshot).await;

    assert_eq!(report.windows_failed, 1);
    assert_eq!(report.windows_positioned, 1);
    assert!(!report.is_clean());
}

#[tokio::test]
async fn missing_document_is_skipped_and_next_one_opens() {
    let control = Arc::new(
        ScriptedControlPlane::new()
            .on(&[r#"POSIX path of "Mac:Users:me:gone.docx""#], "/Users/me/gone.docx")
            .on(&[r#"POSIX path of "Mac:Users:me:draft.docx""#], "/Users/me/draft.docx"),
    );
    let snapshot = word(vec![
        doc("gone.docx", "Mac:Users:me:gone.docx"),
        doc("draft.docx", "Mac:Users:me:draft.docx"),
    ]);
    let locator = FakeDocumentLocator::with_paths(&["/Users/me/draft.docx"]);

    let report = orchestrator(control.clone(), locator).restore(&snapshot).await;

    assert!(control.calls_matching(&[r#"open POSIX file "/Users/me/gone.docx""#]).is_empty());
    assert_eq!(control.calls_matching(&[r#"open POSIX file "/Users/me/draft.docx""#]).len(), 1);
    assert_eq!(report.documents_skipped, 1);
    assert_eq!(report.documents_opened, 1);
    assert_eq!(report.apps_restored, vec!["Microsoft Word".to_string()]);
}

#[tokio::test]
async fn already_open_document_is_not_reopened() {
    let control = Arc::new(
        ScriptedControlPlane::new()
            .on(&[r#"POSIX path of "/Users/me/draft.docx""#], "/Users/me/draft.docx")
            .on(&["name of every document"], "notes.docx, draft.docx"),
    );
    let orchestrator =
        orchestrator(control.clone(), FakeDocumentLocator::with_paths(&["/Users/me/draft.docx"]));

    let outcome = orchestrator
        .restore_document("Microsoft Word", &doc("draft.docx", "/Users/me/draft.docx"))
        .await;

    assert_eq!(outcome, DocumentOutcome::Skipped);
    assert!(control.calls_matching(&["open POSIX file"]).is_empty());
}

#[tokio::test]
async fn document_without_path_is_skipped_without_queries() {
    let control = Arc::new(ScriptedControlPlane::new());
    let orchestrator = orchestrator(control.clone(), FakeDocumentLocator::default());

    let outcome = orchestrator.restore_document("Microsoft Word", &doc("Untitled", "")).await;

    assert_eq!(outcome, DocumentOutcome::Skipped);
    assert!(control.calls().is_empty());
}

#[tokio::test]
async fn open_failure_is_reported_per_document() {
    let control = Arc::new(
        ScriptedControlPlane::new()
            .on(&[r#"POSIX path of "/Users/me/a.docx""#], "/Users/me/a.docx")
            .fail(&["open POSIX file"], WorksnapError::InterpreterError("locked".to_string())),
    );
    let snapshot = word(vec![doc("a.docx", "/Users/me/a.docx")]);
    let locator = FakeDocumentLocator::with_paths(&["/Users/me/a.docx"]);

    let report = orchestrator(control, locator).restore(&snapshot).await;

    assert_eq!(report.documents_failed, 1);
    assert_eq!(report.apps_restored, vec!["Microsoft Word".to_string()]);
}

#[tokio::test]
async fn app_failure_does_not_stop_remaining_apps() {
    let control = Arc::new(
        ScriptedControlPlane::new()
            .fail(
                &[r#"tell application "Broken" to activate"#],
                WorksnapError::InterpreterError("Application isn't running".to_string()),
            )
            .with_window_count("Zotero", 1),
    );
    let snapshot = WorkspaceSnapshot::new(
        "Mixed",
        vec![
            AppSnapshot::Generic { app: "Broken".to_string(), window_positions: Vec::new() },
            AppSnapshot::ReferenceManager {
                app: "Zotero".to_string(),
                window_positions: vec![WindowRect::new(10, 10, 500, 400)],
            },
        ],
    );

    let report =
        orchestrator(control.clone(), FakeDocumentLocator::default()).restore(&snapshot).await;

    assert_eq!(report.apps_failed.len(), 1);
    assert_eq!(report.apps_failed[0].0, "Broken");
    assert_eq!(report.apps_restored, vec!["Zotero".to_string()]);
    assert_eq!(report.windows_positioned, 1);
}

#[tokio::test]
async fn bible_layout_is_invoked_after_activation() {
    let control = Arc::new(ScriptedControlPlane::new());
    let snapshot = WorkspaceSnapshot::new(
        "Study",
        vec![AppSnapshot::BibleSoftware {
            app: "Logos".to_string(),
            current_layout: "Sermon Prep".to_string(),
            window_positions: Vec::new(),
        }],
    );

    orchestrator(control.clone(), FakeDocumentLocator::default()).restore(&snapshot).await;

    let activate = control.first_index_of(&[r#"tell application "Logos" to activate"#]).unwrap();
    let layout = control.first_index_of(&[r#"click menu item "Sermon Prep""#]).unwrap();
    assert!(activate < layout);
}
