//! Tests for the close-regions, delete-meta and scan-meta operations

mod common;

use common::{Call, RecordingCluster};
use regiontools::admin::{
    close_regions, delete_meta, run_operation, scan_meta, AdminError, BatchAction, Outcome,
    PROCEED_PROMPT,
};
use regiontools::cli::Operation;
use regiontools::cluster::ClusterError;
use regiontools::config::ClusterConfig;

fn yes() -> impl FnMut(&str) -> bool {
    |_: &str| true
}

fn answer(response: &'static str) -> impl FnMut(&str) -> bool {
    move |_: &str| regiontools::cli::is_affirmative(response)
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

// ============================================================================
// close-regions
// ============================================================================

#[test]
fn test_close_regions_confirmed() {
    let mut cluster = RecordingCluster::new().with_table("t1", &["r1", "r2"]);
    let mut out = Vec::new();

    let outcome =
        close_regions(&mut cluster, &ClusterConfig::default(), "t1", &mut yes(), &mut out)
            .unwrap();

    assert_eq!(
        cluster.calls,
        vec![Call::Close("r1".to_string()), Call::Close("r2".to_string())]
    );
    match outcome {
        Outcome::Completed(report) => {
            assert_eq!(report.action, BatchAction::CloseRegions);
            assert_eq!(report.processed, vec!["r1", "r2"]);
            assert!(report.is_complete());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(
        output(out),
        "table t1 exists\n\
         This will close the following regions: \n    r1\n    r2\n\
         finished closing regions\n"
    );
}

#[test]
fn test_close_regions_missing_table() {
    let mut cluster = RecordingCluster::new().with_table("other", &["r1"]);
    let mut asked = false;
    let mut out = Vec::new();

    let outcome = close_regions(
        &mut cluster,
        &ClusterConfig::default(),
        "t1",
        &mut |_: &str| {
            asked = true;
            true
        },
        &mut out,
    )
    .unwrap();

    assert_eq!(outcome, Outcome::TableMissing);
    assert_eq!(cluster.mutating_calls(), 0);
    assert!(!asked, "no confirmation for a missing table");
    assert_eq!(output(out), "table t1 doesn't exist; returning\n");
}

#[test]
fn test_close_regions_declined_inputs_issue_no_calls() {
    for response in ["", "n", "N", "yes", "no", " y", "x"] {
        let mut cluster = RecordingCluster::new().with_table("t1", &["r1", "r2"]);
        let mut out = Vec::new();

        let outcome = close_regions(
            &mut cluster,
            &ClusterConfig::default(),
            "t1",
            &mut answer(response),
            &mut out,
        )
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::Declined {
                regions: vec!["r1".to_string(), "r2".to_string()]
            },
            "response {:?}",
            response
        );
        assert_eq!(cluster.mutating_calls(), 0, "response {:?}", response);
        assert!(output(out).ends_with("returning without closing regions\n"));
    }
}

#[test]
fn test_close_regions_uppercase_y_proceeds() {
    let mut cluster = RecordingCluster::new().with_table("t1", &["r1"]);
    let mut out = Vec::new();

    close_regions(
        &mut cluster,
        &ClusterConfig::default(),
        "t1",
        &mut answer("Y"),
        &mut out,
    )
    .unwrap();

    assert_eq!(cluster.calls, vec![Call::Close("r1".to_string())]);
}

#[test]
fn test_close_regions_asks_once_with_prompt() {
    let mut cluster = RecordingCluster::new().with_table("t1", &["r1", "r2", "r3"]);
    let mut prompts = Vec::new();
    let mut out = Vec::new();

    close_regions(
        &mut cluster,
        &ClusterConfig::default(),
        "t1",
        &mut |prompt: &str| {
            prompts.push(prompt.to_string());
            true
        },
        &mut out,
    )
    .unwrap();

    assert_eq!(prompts, vec![PROCEED_PROMPT.to_string()]);
    assert_eq!(cluster.mutating_calls(), 3);
}

#[test]
fn test_close_regions_duplicate_listing_closed_once() {
    let mut cluster = RecordingCluster::new().with_table("t1", &["r1", "r2", "r1"]);
    let mut out = Vec::new();

    close_regions(&mut cluster, &ClusterConfig::default(), "t1", &mut yes(), &mut out).unwrap();

    assert_eq!(
        cluster.calls,
        vec![Call::Close("r1".to_string()), Call::Close("r2".to_string())]
    );
}

#[test]
fn test_close_regions_interrupted_reports_progress() {
    let mut cluster = RecordingCluster::new()
        .with_table("t1", &["r1", "r2", "r3", "r4"])
        .failing_on("r2");
    let mut out = Vec::new();

    let err = close_regions(&mut cluster, &ClusterConfig::default(), "t1", &mut yes(), &mut out)
        .unwrap_err();

    match err {
        AdminError::Interrupted { report, source } => {
            assert_eq!(report.processed, vec!["r1"]);
            assert_eq!(report.failed.as_deref(), Some("r2"));
            assert_eq!(report.pending, vec!["r3", "r4"]);
            assert!(matches!(source, ClusterError::RegionNotOnline(_)));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(cluster.calls, vec![Call::Close("r1".to_string())]);
    assert!(!output(out).contains("finished closing regions"));
}

#[test]
fn test_interrupted_error_message() {
    let mut cluster = RecordingCluster::new()
        .with_table("t1", &["r1", "r2"])
        .failing_on("r1");
    let mut out = Vec::new();

    let err = delete_meta(&mut cluster, &ClusterConfig::default(), "t1", &mut yes(), &mut out)
        .unwrap_err();

    assert_eq!(err.to_string(), "delete-meta on t1 stopped at region r1");
}

#[test]
fn test_close_regions_empty_table_still_asks() {
    let mut cluster = RecordingCluster::new().with_table("t1", &[]);
    let mut out = Vec::new();

    let outcome =
        close_regions(&mut cluster, &ClusterConfig::default(), "t1", &mut yes(), &mut out)
            .unwrap();

    assert!(matches!(outcome, Outcome::Completed(ref report) if report.processed.is_empty()));
    assert_eq!(cluster.mutating_calls(), 0);
}

// ============================================================================
// delete-meta
// ============================================================================

#[test]
fn test_delete_meta_confirmed() {
    let mut cluster = RecordingCluster::new().with_table("t1", &["r1", "r2"]);
    let mut out = Vec::new();

    delete_meta(&mut cluster, &ClusterConfig::default(), "t1", &mut yes(), &mut out).unwrap();

    assert_eq!(
        cluster.calls,
        vec![
            Call::DeleteRow("r1".to_string()),
            Call::DeleteRow("r2".to_string())
        ]
    );
    assert_eq!(
        output(out),
        "table t1 exists\n\
         This will delete the following regions from .META.: \n    r1\n    r2\n\
         finished deleting regions from .META.\n"
    );
}

#[test]
fn test_delete_meta_declined() {
    let mut cluster = RecordingCluster::new().with_table("t1", &["r1"]);
    let mut out = Vec::new();

    let outcome = delete_meta(
        &mut cluster,
        &ClusterConfig::default(),
        "t1",
        &mut answer(""),
        &mut out,
    )
    .unwrap();

    assert!(matches!(outcome, Outcome::Declined { .. }));
    assert_eq!(cluster.mutating_calls(), 0);
    assert!(output(out).ends_with("returning without deleting regions from .META.\n"));
}

#[test]
fn test_delete_meta_missing_table() {
    let mut cluster = RecordingCluster::new();
    let mut out = Vec::new();

    let outcome =
        delete_meta(&mut cluster, &ClusterConfig::default(), "t1", &mut yes(), &mut out).unwrap();

    assert_eq!(outcome, Outcome::TableMissing);
    assert_eq!(cluster.mutating_calls(), 0);
    assert_eq!(output(out), "table t1 doesn't exist; returning\n");
}

#[test]
fn test_delete_meta_uses_configured_catalog_name() {
    let mut cluster = RecordingCluster::new().with_table("t1", &["r1"]);
    let config = ClusterConfig {
        catalog_table: "hbase:meta".to_string(),
        ..ClusterConfig::default()
    };
    let mut out = Vec::new();

    delete_meta(&mut cluster, &config, "t1", &mut yes(), &mut out).unwrap();

    let text = output(out);
    assert!(text.contains("This will delete the following regions from hbase:meta: "));
    assert!(text.ends_with("finished deleting regions from hbase:meta\n"));
}

// ============================================================================
// scan-meta
// ============================================================================

#[test]
fn test_scan_meta_prints_rows_in_order() {
    let cluster = RecordingCluster::new().with_catalog_rows(&["r1", "r2", "r3"]);
    let mut out = Vec::new();

    let outcome = scan_meta(&cluster, &ClusterConfig::default(), &mut out).unwrap();

    assert_eq!(outcome, Outcome::Scanned { rows: 3 });
    assert_eq!(
        output(out),
        "Scanning .META.\nFound row: r1\nFound row: r2\nFound row: r3\n"
    );
    assert_eq!(cluster.mutating_calls(), 0);
}

#[test]
fn test_scan_meta_empty_catalog() {
    let cluster = RecordingCluster::new();
    let mut out = Vec::new();

    let outcome = scan_meta(&cluster, &ClusterConfig::default(), &mut out).unwrap();

    assert_eq!(outcome, Outcome::Scanned { rows: 0 });
    assert_eq!(output(out), "Scanning .META.\n");
}

// ============================================================================
// dispatch
// ============================================================================

#[test]
fn test_run_operation_dispatches() {
    let mut cluster = RecordingCluster::new()
        .with_table("t1", &["r1"])
        .with_catalog_rows(&["r1"]);
    let config = ClusterConfig::default();
    let mut confirm = yes();

    let mut out = Vec::new();
    run_operation(&Operation::ScanMeta, &mut cluster, &config, &mut confirm, &mut out).unwrap();
    assert_eq!(cluster.mutating_calls(), 0);

    run_operation(
        &Operation::DeleteMeta("t1".to_string()),
        &mut cluster,
        &config,
        &mut confirm,
        &mut out,
    )
    .unwrap();
    run_operation(
        &Operation::CloseRegions("t1".to_string()),
        &mut cluster,
        &config,
        &mut confirm,
        &mut out,
    )
    .unwrap();

    assert_eq!(
        cluster.calls,
        vec![
            Call::DeleteRow("r1".to_string()),
            Call::Close("r1".to_string())
        ]
    );
}
