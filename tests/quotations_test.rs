use reply_extract::{QuotationMarker, extract_from_plain, mark_lines, preprocess, resolve_quotation};

fn symbols(markers: &[QuotationMarker]) -> String {
    markers.iter().map(|m| m.symbol()).collect()
}

fn markers(encoded: &str) -> Vec<QuotationMarker> {
    encoded
        .chars()
        .map(|c| match c {
            'e' => QuotationMarker::Empty,
            'm' => QuotationMarker::QuoteMark,
            's' => QuotationMarker::Splitter,
            'f' => QuotationMarker::Forwarded,
            _ => QuotationMarker::Text,
        })
        .collect()
}

// --- mark_lines ---

#[test]
fn test_mark_lines_underscored_from_block() {
    let lines = [
        "Hello",
        "",
        // next two lines should be marked as a splitter
        "_____________",
        "From: foo@bar.com",
        "",
        "> Hi",
        "",
        "Signature",
    ];
    assert_eq!(symbols(&mark_lines(&lines)), "tessemet");
}

#[test]
fn test_mark_lines_multiline_splitter() {
    let lines = [
        "Just testing the email reply",
        "",
        "Robert J Samson",
        "Sent from my iPhone",
        "",
        // all 3 next lines should be marked as splitters
        "On Nov 30, 2011, at 12:47 PM, Skapture <",
        "416ffd3258d4d2fa4c85cfa4c44e1721d66e3e8f4@skapture-staging.mailgun.org>",
        "wrote:",
        "",
        "Tarmo Lehtpuu has posted the following message on",
    ];
    assert_eq!(symbols(&mark_lines(&lines)), "tettessset");
}

// --- resolve_quotation ---

#[test]
fn test_resolve_mixed_quotation_and_text() {
    // quotations and the last message lines are mixed:
    // consider all to be the last message
    let lines: Vec<String> = (1..=9).map(|i| i.to_string()).collect();
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    let resolved = resolve_quotation(&lines, &markers("tsemmtetm"));
    assert_eq!(resolved.lines, lines);
    assert_eq!(resolved.removed, None);
}

#[test]
fn test_resolve_no_splitter_means_no_markers() {
    let lines = ["1", "2", "3"];
    let resolved = resolve_quotation(&lines, &markers("tmm"));
    assert_eq!(resolved.lines, lines);
}

#[test]
fn test_resolve_text_after_splitter_is_quotation() {
    let lines = ["1", "2", "3"];
    let resolved = resolve_quotation(&lines, &markers("tst"));
    assert_eq!(resolved.lines, vec!["1"]);
    assert_eq!(resolved.removed, Some(1..3));
}

#[test]
fn test_resolve_message_quotation_signature() {
    let lines = ["1", "2", "3", "4"];
    let resolved = resolve_quotation(&lines, &markers("tsmt"));
    assert_eq!(resolved.lines, vec!["1", "4"]);
    assert_eq!(resolved.removed, Some(1..3));
}

#[test]
fn test_resolve_nested_quotation_after_splitter() {
    let lines = ["1", "2", "3", "4", "5", "6"];
    let resolved = resolve_quotation(&lines, &markers("tstsmt"));
    assert_eq!(resolved.lines, vec!["1"]);
}

#[test]
fn test_resolve_link_wrapped_in_parenthesis_on_marker_line() {
    // the link starts on the quote-marker line
    let lines = [
        "text",
        "splitter",
        ">View (http://example.com",
        "/abc",
        ")",
        "",
        "> quote",
    ];
    let resolved = resolve_quotation(&lines, &markers("tsmttem"));
    assert_eq!(resolved.lines, vec!["text"]);
}

#[test]
fn test_resolve_link_starts_on_new_line() {
    let lines = [
        "text",
        ">",
        ">",
        ">",
        "(http://example.com) >  ",
        "> life is short. (http://example.com)  ",
    ];
    let resolved = resolve_quotation(&lines, &markers("tmmmtm"));
    assert_eq!(resolved.lines, vec!["text"]);
}

#[test]
fn test_resolve_all_inline_replies_are_checked() {
    let lines = [
        "text",
        "splitter",
        ">",
        "(http://example.com)",
        ">",
        "inline  reply",
        ">",
    ];
    let resolved = resolve_quotation(&lines, &markers("tsmtmtm"));
    assert_eq!(resolved.lines, lines);
}

#[test]
fn test_resolve_inline_reply_with_bare_link() {
    let lines = [
        "text",
        "splitter",
        ">",
        "inline reply with link http://example.com",
        ">",
    ];
    let resolved = resolve_quotation(&lines, &markers("tsmtm"));
    assert_eq!(resolved.lines, lines);
}

#[test]
fn test_resolve_inline_reply_with_parenthesis_link() {
    let lines = [
        "text",
        "splitter",
        ">",
        "inline  reply (http://example.com)",
        ">",
    ];
    let resolved = resolve_quotation(&lines, &markers("tsmtm"));
    assert_eq!(resolved.lines, lines);
}

// --- preprocess ---

#[test]
fn test_preprocess_rewrites_link_and_wraps_splitter() {
    let msg = "Hello\n\
               See <http://google.com\n\
               > for more\n\
               information On Nov 30, 2011, at 12:47 PM, Somebody <\n\
               416ffd3258d4d2fa4c85cfa4c44e1721d66e3e8f4\n\
               @example.com>wrote:\n\
               \n\
               > Hi";

    // the link is rewritten and the 'On <date> <person> wrote:' pattern
    // starts from a new line
    let prepared = "Hello\n\
                    See @@http://google.com\n\
                    @@ for more\n\
                    information\n\
                    \u{20}On Nov 30, 2011, at 12:47 PM, Somebody <\n\
                    416ffd3258d4d2fa4c85cfa4c44e1721d66e3e8f4\n\
                    @example.com>wrote:\n\
                    \n\
                    > Hi";
    assert_eq!(preprocess(msg, "\n"), prepared);
}

#[test]
fn test_preprocess_leaves_quoted_links_untouched() {
    let msg = "\n\
        > <http://teemcl.mailgun.org/u/**aD1mZmZiNGU5ODQwMDNkZWZlMTExNm**\n\
        \n\
        > MxNjQ4Y2RmOTNlMCZyPXNlcmdleS5v**YnlraG92JTQwbWFpbGd1bmhxLmNvbS**\n\
        \n\
        > Z0PSUyQSZkPWUwY2U<http://example.org/u/aD1mZmZiNGU5ODQwMDNkZWZlMTExNmMxNjQ4Y>\n\
        \u{20}\u{20}\u{20}\u{20}";
    assert_eq!(preprocess(msg, "\n"), msg);
}

#[test]
fn test_preprocess_splitter_on_too_many_lines() {
    // 'On <date> <person> wrote' shouldn't be spread across too many lines
    let msg = "Hello\n\
               How are you? On Nov 30, 2011, at 12:47 PM,\n\
               Example <\n\
               416ffd3258d4d2fa4c85cfa4c44e1721d66e3e8f4\n\
               @example.org>\n\
               wrote:\n\
               \n\
               > Hi";
    assert_eq!(preprocess(msg, "\n"), msg);
}

#[test]
fn test_preprocess_wraps_only_unbroken_splitters() {
    let msg = "Hello On Nov 30, smb wrote:\n\
               Hi\n\
               On Nov 29, smb wrote:\n\
               hi";

    let prepared = "Hello\n\
                    \u{20}On Nov 30, smb wrote:\n\
                    Hi\n\
                    On Nov 29, smb wrote:\n\
                    hi";
    assert_eq!(preprocess(msg, "\n"), prepared);
}

#[test]
fn test_preprocess_postprocess_two_links() {
    let msg_body = "<http://link1> <http://link2>";
    assert_eq!(extract_from_plain(msg_body), msg_body);
}
