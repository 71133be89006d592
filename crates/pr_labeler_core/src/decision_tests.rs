use super::*;

fn files(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_decide_single_string_rule_matches() {
    let rules = RuleMapping::from_pairs([("docs", vec!["*.md"])]).unwrap();

    let labels = decide(&files(&["README.md"]), &rules);

    assert_eq!(labels, BTreeSet::from(["docs".to_string()]));
}

#[test]
fn test_decide_no_match_is_empty() {
    let rules =
        RuleMapping::from_pairs([("backend", vec!["src/**/*.go", "src/**/*.rs"])]).unwrap();

    let labels = decide(&files(&["web/app.tsx"]), &rules);

    assert!(labels.is_empty());
}

#[test]
fn test_decide_multiple_labels() {
    let rules = RuleMapping::from_pairs([
        ("docs", vec!["**/*.md"]),
        ("backend", vec!["src/**/*.rs"]),
        ("frontend", vec!["web/**"]),
    ])
    .unwrap();

    let labels = decide(&files(&["src/lib.rs", "docs/guide.md"]), &rules);

    assert_eq!(
        labels,
        BTreeSet::from(["backend".to_string(), "docs".to_string()])
    );
}

#[test]
fn test_decide_is_subset_of_rule_keys() {
    let rules = RuleMapping::from_pairs([("a", vec!["**"]), ("b", vec!["*.txt"])]).unwrap();
    let keys: BTreeSet<&str> = rules.labels().collect();

    for changed in [
        files(&[]),
        files(&["x.txt"]),
        files(&["dir/y.rs", "z.txt"]),
    ] {
        let labels = decide(&changed, &rules);
        assert!(labels.iter().all(|l| keys.contains(l.as_str())));
    }
}

#[test]
fn test_decide_with_no_changed_files_or_rules() {
    let rules = RuleMapping::from_pairs([("docs", vec!["*.md"])]).unwrap();

    assert!(decide::<String>(&[], &rules).is_empty());
    assert!(decide(&files(&["README.md"]), &RuleMapping::default()).is_empty());
}

#[test]
fn test_decide_is_order_independent_and_repeatable() {
    let rules = RuleMapping::from_pairs([
        ("docs", vec!["*.txt", "*.md"]),
        ("ci", vec![".github/**"]),
    ])
    .unwrap();
    let forward = files(&["README.md", ".github/workflows/ci.yml", "main.rs"]);
    let mut backward = forward.clone();
    backward.reverse();

    let first = decide(&forward, &rules);

    assert_eq!(first, decide(&backward, &rules));
    assert_eq!(first, decide(&forward, &rules));
}

#[test]
fn test_fold_label_name() {
    assert_eq!(fold_label_name("Bug"), "bug");
    assert_eq!(fold_label_name("BÜG"), "bug");
    assert_eq!(fold_label_name("Résumé"), "resume");
    assert_eq!(fold_label_name("good first issue"), "good first issue");
}

#[test]
fn test_is_subset_of_existing_ignores_case_and_accents() {
    assert!(is_subset_of_existing(["docs"], ["Docs", "bug"]));
    assert!(is_subset_of_existing(["resume"], ["Résumé"]));
    assert!(is_subset_of_existing(Vec::<&str>::new(), Vec::<&str>::new()));

    assert!(!is_subset_of_existing(["docs", "backend"], ["docs"]));
    assert!(!is_subset_of_existing(["docs"], Vec::<&str>::new()));
}
