use logsieve::structure;

#[test]
fn four_word_run_yields_no_phrase() {
    assert!(structure::extract_phrases("alpha beta gamma delta", 5, 20).is_empty());
}

#[test]
fn five_word_run_yields_exactly_one_phrase() {
    let phrases = structure::extract_phrases("alpha beta gamma delta epsilon", 5, 20);
    assert_eq!(phrases, vec!["alpha beta gamma delta epsilon"]);
}

#[test]
fn upper_bound_is_inclusive() {
    let twenty = vec!["word"; 20].join(" ");
    let twenty_one = vec!["word"; 21].join(" ");
    assert_eq!(structure::extract_phrases(&twenty, 5, 20).len(), 1);
    assert!(structure::extract_phrases(&twenty_one, 5, 20).is_empty());
}

#[test]
fn digits_split_runs() {
    let phrases = structure::extract_phrases(
        "alpha beta gamma delta epsilon 42 one two three four five six",
        5,
        20,
    );
    assert_eq!(phrases, vec!["alpha beta gamma delta epsilon ", " one two three four five six"]);
}

#[test]
fn repeated_phrases_share_one_counter() {
    let cleaned = vec![
        "disk quota exceeded for user account",
        "disk quota exceeded for user account",
        "42 disk quota exceeded for user account",
        "short one",
    ];
    let counts = structure::count_structures(&cleaned);
    assert_eq!(counts.get("disk quota exceeded for user account"), Some(&2));
    assert_eq!(counts.get(" disk quota exceeded for user account"), Some(&1));
    assert_eq!(counts.len(), 2);
}

#[test]
fn discovery_order_does_not_change_counts() {
    let mut cleaned = vec![
        "connection pool has no free slots",
        "order could not be routed to market",
        "connection pool has no free slots",
    ];
    let forward = structure::count_structures(&cleaned);
    cleaned.reverse();
    let backward = structure::count_structures(&cleaned);
    assert_eq!(forward, backward);
}

#[test]
fn custom_bounds_are_respected() {
    let cleaned = vec!["one two three", "one two three four five six seven"];
    let counts = structure::count_structures_bounded(&cleaned, 2, 3);
    assert_eq!(counts.len(), 1);
    assert_eq!(counts.get("one two three"), Some(&1));
}

#[test]
fn ranked_sorts_by_count_then_phrase() {
    let cleaned = vec![
        "b phrase with five words",
        "a phrase with five words",
        "b phrase with five words",
    ];
    let ranked = structure::ranked(&structure::count_structures(&cleaned));
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].phrase, "b phrase with five words");
    assert_eq!(ranked[0].count, 2);
    assert_eq!(ranked[0].words, 5);
    assert_eq!(ranked[1].phrase, "a phrase with five words");
}

#[test]
fn merge_counts_accumulates() {
    let mut a = structure::count_structures(&["alpha beta gamma delta epsilon"]);
    let b = structure::count_structures(&["alpha beta gamma delta epsilon", "zeta eta theta iota kappa"]);
    structure::merge_counts(&mut a, &b);
    assert_eq!(a.get("alpha beta gamma delta epsilon"), Some(&2));
    assert_eq!(a.get("zeta eta theta iota kappa"), Some(&1));
}
