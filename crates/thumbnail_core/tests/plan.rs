use pretty_assertions::assert_eq;
use thumbnail_core::{filename_from_url, plan_downloads, DownloadTask, RejectReason};

#[test]
fn filename_is_last_path_segment() {
    assert_eq!(filename_from_url("http://x/a.jpg").unwrap(), "a.jpg");
    assert_eq!(
        filename_from_url("https://cdn.example.com/img/2024/cat.png?size=large#top").unwrap(),
        "cat.png"
    );
    // Trailing slash falls back to the previous segment.
    assert_eq!(
        filename_from_url("http://x/photos/dog.gif/").unwrap(),
        "dog.gif"
    );
    assert_eq!(filename_from_url("http://x/photos/").unwrap(), "photos");
}

#[test]
fn filename_rejects_unusable_urls() {
    assert!(matches!(
        filename_from_url("not a url"),
        Err(RejectReason::InvalidUrl(_))
    ));
    assert_eq!(
        filename_from_url("http://x/"),
        Err(RejectReason::NoFilename)
    );
    assert_eq!(filename_from_url("http://x"), Err(RejectReason::NoFilename));
    assert_eq!(
        filename_from_url("   "),
        Err(RejectReason::InvalidUrl("empty url".to_string()))
    );
}

#[test]
fn filename_replaces_forbidden_characters() {
    assert_eq!(
        filename_from_url("http://x/a:b*c.jpg").unwrap(),
        "a_b_c.jpg"
    );
}

#[test]
fn plan_keeps_order_and_reports_blank_entries() {
    let plan = plan_downloads(["http://x/a.jpg", "  ", "http://x/b.png "]);
    assert_eq!(
        plan.tasks,
        vec![
            DownloadTask {
                url: "http://x/a.jpg".to_string(),
                filename: "a.jpg".to_string(),
            },
            DownloadTask {
                url: "http://x/b.png".to_string(),
                filename: "b.png".to_string(),
            },
        ]
    );
    assert_eq!(plan.rejected.len(), 1);
    assert_eq!(plan.rejected[0].url, "");
    assert_eq!(
        plan.rejected[0].reason,
        RejectReason::InvalidUrl("empty url".to_string())
    );
}

#[test]
fn plan_rejects_colliding_filenames() {
    let plan = plan_downloads([
        "http://one.example/a.jpg",
        "http://two.example/other/A.JPG",
        "ftp://",
    ]);
    assert_eq!(plan.tasks.len(), 1);
    assert_eq!(plan.rejected.len(), 2);
    assert_eq!(
        plan.rejected[0].reason,
        RejectReason::DuplicateFilename {
            filename: "A.JPG".to_string(),
            claimed_by: "http://one.example/a.jpg".to_string(),
        }
    );
    assert_eq!(plan.rejected[1].url, "ftp://");
}

#[test]
fn empty_input_gives_empty_plan() {
    let plan = plan_downloads(Vec::<String>::new());
    assert!(plan.tasks.is_empty());
    assert!(plan.rejected.is_empty());
}
