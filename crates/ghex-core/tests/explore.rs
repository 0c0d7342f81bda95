mod common;

use common::{lines, octocat, FakeCatalog};
use ghex_core::{explore, ExploreError, ExploreOptions, ExplorePlan, FilterOptions};
use serde_json::{json, Value};

fn plan(options: ExploreOptions) -> ExplorePlan {
    ExplorePlan::build(&options).expect("valid plan")
}

fn target(raw: &str) -> ExploreOptions {
    ExploreOptions {
        target: raw.to_string(),
        ..ExploreOptions::default()
    }
}

async fn run(catalog: &FakeCatalog, options: ExploreOptions) -> Result<Vec<u8>, ExploreError> {
    let mut out = Vec::new();
    explore(catalog, &plan(options), &mut out).await?;
    Ok(out)
}

#[tokio::test]
async fn owner_stream_emits_gists_then_repositories() {
    let catalog = octocat();
    let out = run(&catalog, target("octocat/")).await.unwrap();

    let records: Vec<Value> = lines(&out)
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0]["id"], "aa11");
    assert_eq!(records[1]["id"], "bb22");
    assert_eq!(records[2]["name"], "Hello-World");
    assert_eq!(records[4]["name"], "linguist");
    assert_eq!(records[2], common::repo("Hello-World", Some("Rust"), 2));

    assert_eq!(
        catalog.calls(),
        vec!["profile octocat", "gists octocat", "repositories octocat"]
    );
}

#[tokio::test]
async fn single_repository_ignores_kind_selector() {
    for kind in [None, Some("r"), Some("g")] {
        let catalog = octocat();
        let options = ExploreOptions {
            kind: kind.map(str::to_string),
            ..target("octocat/Spoon-Knife")
        };
        let out = run(&catalog, options).await.unwrap();
        let records = lines(&out);
        assert_eq!(records.len(), 1, "kind {kind:?}");
        assert!(records[0].contains("\"Spoon-Knife\""));
        assert_eq!(
            catalog.calls(),
            vec!["profile octocat", "repository octocat/Spoon-Knife"]
        );
    }
}

#[tokio::test]
async fn type_selector_restricts_listings() {
    let catalog = octocat();
    let options = ExploreOptions {
        kind: Some("gist".to_string()),
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    assert_eq!(lines(&out).len(), 2);
    assert!(!catalog.calls().iter().any(|c| c.starts_with("repositories")));

    let catalog = octocat();
    let options = ExploreOptions {
        kind: Some("repo".to_string()),
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    assert_eq!(lines(&out).len(), 3);
    assert!(!catalog.calls().iter().any(|c| c.starts_with("gists")));
}

#[tokio::test]
async fn has_issues_on_single_repository() {
    let catalog = octocat();
    let options = ExploreOptions {
        filters: FilterOptions {
            has_issues: true,
            ..FilterOptions::default()
        },
        ..target("octocat/Spoon-Knife")
    };
    assert!(run(&catalog, options.clone()).await.unwrap().is_empty());

    let options = ExploreOptions {
        target: "octocat/Hello-World".to_string(),
        ..options
    };
    let out = run(&catalog, options).await.unwrap();
    let records = lines(&out);
    assert_eq!(records.len(), 1);
    assert!(records[0].contains("Hello-World"));
}

#[tokio::test]
async fn has_issues_over_owner_drops_gists() {
    let catalog = octocat();
    let options = ExploreOptions {
        filters: FilterOptions {
            has_issues: true,
            ..FilterOptions::default()
        },
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    let names: Vec<Value> = lines(&out)
        .iter()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Hello-World"), json!("linguist")]);
}

#[tokio::test]
async fn pattern_filters_are_order_stable_and_lenient_for_gists() {
    let catalog = FakeCatalog::new().with_owner(
        json!({"login": "octocat", "public_repos": 3, "public_gists": 1}),
        vec![
            common::repo("foobar", Some("Rust"), 0),
            common::repo("barfoo", Some("Rust"), 0),
            common::repo("Foo", Some("Rust"), 0),
        ],
        vec![common::gist("cc33")],
    );
    let options = ExploreOptions {
        filters: FilterOptions {
            name: Some("^foo".to_string()),
            ..FilterOptions::default()
        },
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    let records = lines(&out);
    assert_eq!(records.len(), 2);
    assert!(records[0].contains("cc33"), "gists have no name and pass");
    assert!(records[1].contains("\"foobar\""));
}

#[tokio::test]
async fn language_filter() {
    let catalog = octocat();
    let options = ExploreOptions {
        kind: Some("r".to_string()),
        filters: FilterOptions {
            language: Some("R".to_string()),
            ..FilterOptions::default()
        },
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    let records = lines(&out);
    assert_eq!(records.len(), 1);
    assert!(records[0].contains("Hello-World"));
}

#[tokio::test]
async fn null_terminated_records() {
    let catalog = octocat();
    let options = ExploreOptions {
        null_terminated: true,
        kind: Some("g".to_string()),
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    assert!(!out.contains(&b'\n'));
    let records: Vec<&[u8]> = out.split(|b| *b == 0).collect();
    // Trailing terminator leaves an empty tail.
    assert_eq!(records.len(), 3);
    assert!(records[2].is_empty());
    assert!(out.ends_with(b"\0"));
}

#[tokio::test]
async fn repr_format() {
    let catalog = octocat();
    let options = ExploreOptions {
        repr: true,
        ..target("octocat/Hello-World")
    };
    let out = run(&catalog, options).await.unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Repository(full_name=\"octocat/Hello-World\")\n"
    );
}

#[tokio::test]
async fn count_mode_uses_profile_counters_only() {
    let catalog = FakeCatalog::new().with_owner(
        json!({
            "login": "me",
            "public_repos": 4,
            "total_public_repos": 6,
            "total_private_repos": 9,
            "public_gists": 2,
            "private_gists": 1
        }),
        vec![],
        vec![],
    );
    let options = ExploreOptions {
        count: true,
        ..target("me")
    };
    let out = run(&catalog, options).await.unwrap();
    let value: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value, json!({"total_repos": 10, "total_gists": 3}));
    assert_eq!(catalog.calls(), vec!["profile me"]);
}

#[tokio::test]
async fn count_mode_without_private_counters() {
    let catalog = octocat();
    let options = ExploreOptions {
        count: true,
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"total_repos\":3,\"total_gists\":2}\n"
    );
}

#[tokio::test]
async fn sum_mode_tallies_survivors_without_per_item_output() {
    let catalog = octocat();
    let options = ExploreOptions {
        sum: true,
        filters: FilterOptions {
            language: Some("Rust|HTML".to_string()),
            ..FilterOptions::default()
        },
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    let records = lines(&out);
    assert_eq!(records.len(), 1);

    let tally: Value = serde_json::from_str(&records[0]).unwrap();
    assert_eq!(tally, json!({"repository": 2, "gist": 2}));
    let total: u64 = tally
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(total, 4);
}

#[tokio::test]
async fn sum_mode_with_no_survivors() {
    let catalog = octocat();
    let options = ExploreOptions {
        sum: true,
        kind: Some("r".to_string()),
        filters: FilterOptions {
            name: Some("zzz".to_string()),
            ..FilterOptions::default()
        },
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "{}\n");
}

#[tokio::test]
async fn unknown_owner_is_an_error_not_an_empty_stream() {
    let catalog = octocat();
    let err = run(&catalog, target("ghost")).await.unwrap_err();
    assert!(matches!(err, ExploreError::Remote(ref e) if e.is_not_found()));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn unknown_repository_is_an_error() {
    let catalog = octocat();
    let err = run(&catalog, target("octocat/missing")).await.unwrap_err();
    assert!(matches!(err, ExploreError::Remote(_)));
    assert!(err.to_string().contains("octocat/missing"));
}

#[test]
fn validation_happens_before_any_fetch() {
    for options in [
        target("a/b/c"),
        ExploreOptions {
            count: true,
            sum: true,
            ..target("octocat")
        },
        ExploreOptions {
            kind: Some("g".to_string()),
            filters: FilterOptions {
                has_issues: true,
                ..FilterOptions::default()
            },
            ..target("octocat")
        },
        ExploreOptions {
            filters: FilterOptions {
                name: Some("[".to_string()),
                ..FilterOptions::default()
            },
            ..target("octocat")
        },
    ] {
        let err = ExplorePlan::build(&options).unwrap_err();
        assert!(err.is_validation(), "{err}");
        assert_eq!(err.exit_code(), 1);
    }
}

#[cfg(unix)]
#[tokio::test]
async fn exec_output_becomes_the_record() {
    let catalog = octocat();
    let options = ExploreOptions {
        kind: Some("r".to_string()),
        repr: true,
        exec: Some("echo found: {}".to_string()),
        ..target("octocat")
    };
    let out = run(&catalog, options).await.unwrap();
    assert_eq!(
        lines(&out),
        vec![
            "found: Repository(full_name=\"octocat/Hello-World\")",
            "found: Repository(full_name=\"octocat/Spoon-Knife\")",
            "found: Repository(full_name=\"octocat/linguist\")",
        ]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn failing_exec_aborts_the_stream() {
    let catalog = octocat();
    let options = ExploreOptions {
        kind: Some("r".to_string()),
        exec: Some("sh -c 'exit 3' {}".to_string()),
        ..target("octocat")
    };
    let mut out = Vec::new();
    let err = explore(&catalog, &plan(options), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, ExploreError::CommandFailed { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(out.is_empty());
}
