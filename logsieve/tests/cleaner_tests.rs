use logsieve::cleaner;

const SAMPLES: &[&str] = &[
    "Kullanici kodu: ABC123 something",
    "[WEBGATE] Order failed [ref-9] at com.x.Y.run",
    "Login rejected SessionID: abc123\nsecond line",
    "Value {0} is not allowed",
    "{Risk durumu: 3:0}",
    "Stok yetersiz Satılabilir stok : 10,5 adet",
    "Portfoyno: 42 bulunamadi",
    "[TimesTen][TimesTen 11.2.2.8.0 ODBC Driver][TimesTen]TT0802: Data store space exhausted",
    "Insert failed java.sql.SQLException: ORA-00001",
    "Islem hatasi EYSException : limit asildi",
    "EmirNo: 123 iptal edildi",
    "   padded   ",
    "",
];

#[test]
fn user_code_clause_is_removed_and_trimmed() {
    assert_eq!(cleaner::clean_description("Kullanici kodu: ABC123 something"), "something");
}

#[test]
fn gateway_tag_brackets_and_stack_tail_are_removed() {
    assert_eq!(
        cleaner::clean_description("[WEBGATE] Order failed [ref-9] at com.x.Y.run"),
        "Order failed"
    );
}

#[test]
fn session_id_clause_runs_to_end_of_text() {
    assert_eq!(
        cleaner::clean_description("Login rejected SessionID: abc123\nsecond line"),
        "Login rejected"
    );
}

#[test]
fn placeholder_token_is_removed() {
    assert_eq!(cleaner::clean_description("Value {0} is not allowed"), "Value  is not allowed");
}

#[test]
fn business_clauses_are_removed() {
    assert_eq!(cleaner::clean_description("Stok yetersiz Satılabilir stok : 10,5 adet"), "Stok yetersiz  adet");
    assert_eq!(cleaner::clean_description("Portfoyno: 42 bulunamadi"), "bulunamadi");
    assert_eq!(cleaner::clean_description("EmirNo: 123 iptal edildi"), "iptal edildi");
    assert_eq!(cleaner::clean_description("Risk durumu: 7: limit"), "limit");
}

#[test]
fn driver_signature_is_removed() {
    assert_eq!(
        cleaner::clean_description(
            "[TimesTen][TimesTen 11.2.2.8.0 ODBC Driver][TimesTen]TT0802: Data store space exhausted"
        ),
        "TT0802: Data store space exhausted"
    );
}

#[test]
fn exception_clauses_run_to_end() {
    assert_eq!(cleaner::clean_description("Insert failed java.sql.SQLException: ORA-00001"), "Insert failed");
    assert_eq!(cleaner::clean_description("Islem hatasi EYSException : limit asildi"), "Islem hatasi");
}

#[test]
fn at_inside_words_is_not_a_stack_trace() {
    assert_eq!(cleaner::clean_description("Data format mismatch"), "Data format mismatch");
    assert_eq!(cleaner::clean_description("Data format x (y)"), "Data format x (y)");
    assert_eq!(cleaner::clean_description("Bekleme saat (10)"), "Bekleme saat (10)");
}

#[test]
fn spliced_fragments_are_cleaned_too() {
    assert_eq!(cleaner::clean_description("{Risk durumu: 3:0}"), "");
}

#[test]
fn cleaning_is_idempotent() {
    for s in SAMPLES {
        let once = cleaner::clean_description(s);
        let twice = cleaner::clean_description(&once);
        assert_eq!(once, twice, "not idempotent for {s:?}");
    }
}

#[test]
fn clean_descriptions_preserves_order_and_length() {
    let out = cleaner::clean_descriptions(SAMPLES);
    assert_eq!(out.len(), SAMPLES.len());
    assert_eq!(out[0], "something");
    assert_eq!(out[SAMPLES.len() - 2], "padded");
    assert_eq!(out[SAMPLES.len() - 1], "");
}

#[test]
fn rules_apply_in_declared_order() {
    let names = cleaner::rule_names();
    assert_eq!(names.len(), 14);
    assert_eq!(names.first(), Some(&"gateway_tag"));
    assert_eq!(names.last(), Some(&"order_number"));
    let bracket = names.iter().position(|n| *n == "bracket_tag").unwrap();
    let driver = names.iter().position(|n| *n == "odbc_driver").unwrap();
    assert!(bracket < driver);
}
