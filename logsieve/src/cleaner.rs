use once_cell::sync::Lazy;
use regex::Regex;

/// Noise removal rules, applied in order. Earlier deletions can expose or hide
/// matches for later ones, so the order is part of the contract.
static CLEAN_RULES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    let rules: [(&'static str, &str); 14] = [
        ("gateway_tag", r"\[WEBGATE\]"),
        ("stack_trace_tail", r"(?s)\bat .*"),
        ("session_id", r"(?s)SessionID:.*"),
        ("placeholder", r"\{0\}"),
        ("bracket_tag", r"\[.*?\]"),
        ("risk_status", r"Risk durumu: \d+:"),
        ("sellable_stock", r"Satılabilir stok : \d+,\d+"),
        ("portfolio_number", r"Portfoyno: \d+"),
        ("odbc_driver", r"\[TimesTen\]\[\w+\s\d+\.\d+\.\d+\.\d+ ODBC Driver\]\[TimesTen\]"),
        ("sql_exception", r"(?s)java\.sql\.SQLException: .*"),
        ("custom_exception", r"(?s)EYSException :.*"),
        ("stack_frame", r"\bat .* \(.*\)\s*"),
        ("user_code", r"Kullanici kodu: \w+"),
        ("order_number", r"EmirNo: \d+"),
    ];
    rules
        .into_iter()
        .map(|(name, pat)| (name, Regex::new(pat).unwrap()))
        .collect()
});

fn apply_rules(input: &str) -> String {
    let mut s = input.to_string();
    for (_name, re) in CLEAN_RULES.iter() {
        if re.is_match(&s) {
            s = re.replace_all(&s, "").into_owned();
        }
    }
    s.trim().to_string()
}

/// Strip known noise from an error description.
///
/// A single pass can splice two fragments into something an earlier rule
/// would have removed (`{Risk durumu: 3:0}` leaves `{0}`), so passes
/// repeat until the text is stable. Each pass only deletes, so this ends.
pub fn clean_description(input: &str) -> String {
    let mut current = apply_rules(input);
    loop {
        let next = apply_rules(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

pub fn clean_descriptions<S: AsRef<str>>(descriptions: &[S]) -> Vec<String> {
    descriptions.iter().map(|d| clean_description(d.as_ref())).collect()
}

/// Rule names in application order.
pub fn rule_names() -> Vec<&'static str> {
    CLEAN_RULES.iter().map(|(name, _)| *name).collect()
}
