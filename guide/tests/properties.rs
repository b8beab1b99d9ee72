//! Property-based tests for the line-level transformations.

use guide::inline::{STRONG, UNDERLINE, link, transform_line};
use guide::sanitize::sanitize;
use proptest::prelude::*;

/// Text with none of the characters the inline passes care about.
fn plain_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,;:!?'#-]{0,60}"
}

/// Printable ASCII without `@` and `\`.
fn safe_ascii() -> impl Strategy<Value = String> {
    r"[a-zA-Z0-9 !#$%&'()*+,./:;<=>?\[\]^_`{|}~-]{0,60}"
}

/// Words joined by single spaces, some of them wrapped in `*`.
fn emphasised_words() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 1..8).prop_map(|words| {
        let marked: Vec<String> = words
            .iter()
            .map(|(w, strong)| if *strong { format!("*{}*", w) } else { w.clone() })
            .collect();
        let bare: Vec<String> = words.iter().map(|(w, _)| w.clone()).collect();
        (marked.join(" "), bare.join(" "))
    })
}

proptest! {
    #[test]
    fn plain_lines_pass_through_unchanged(line in plain_line()) {
        prop_assert_eq!(&link(&line).text, &line);
        prop_assert_eq!(&UNDERLINE.apply(&line).text, &line);
        prop_assert_eq!(&STRONG.apply(&line).text, &line);
        prop_assert_eq!(transform_line(&line), (line.clone(), Vec::new()));
    }

    #[test]
    fn closed_spans_round_trip((marked, bare) in emphasised_words()) {
        let out = STRONG.apply(&marked);
        prop_assert!(!out.unterminated);
        let stripped = out.text.replace("@{b}", "").replace("@{ub}", "");
        prop_assert_eq!(stripped, bare);
    }

    #[test]
    fn sanitize_is_identity_on_safe_ascii(line in safe_ascii()) {
        prop_assert_eq!(&sanitize(&line), &line);
        prop_assert_eq!(sanitize(&sanitize(&line)), line);
    }

    #[test]
    fn sanitize_output_is_bounded_ascii(line in any::<String>()) {
        let out = sanitize(&line);
        prop_assert!(out.len() <= 2 * line.len());
        prop_assert!(out.chars().all(|c| c.is_ascii() && !c.is_control()));
    }

    #[test]
    fn escape_marker_is_never_invented(line in "[a-z ^*_\\[\\]()]{0,40}") {
        let (text, open) = transform_line(&line);
        prop_assert!(open.len() <= 3);
        prop_assert!(!text.contains('^') || line.contains('^'));
    }
}
