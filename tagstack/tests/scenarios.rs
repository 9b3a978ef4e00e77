//! End-to-end checks of whole documents.

use tagstack_core::{Validator, Verdict, Vocabulary};

fn vocabulary() -> Vocabulary {
    Vocabulary::from_lists("html\nhead\nbody\np\n", "br\nimg\n")
}

fn check(lines: &[&str]) -> Verdict {
    Validator::new(&vocabulary()).validate(lines.iter().copied()).expect("stack discipline holds")
}

#[test]
fn balanced_document_is_valid() {
    let verdict = check(&["<!DOCTYPE html>", "<html><body><p>Hi</p></body></html>"]);
    assert_eq!(verdict, Verdict::Valid { line: 2 });
    assert!(verdict.is_valid());
}

#[test]
fn missing_doctype() {
    let verdict = check(&["<html><body><p>Hi</p></body></html>"]);
    assert_eq!(verdict, Verdict::MissingDoctype);
    assert_eq!(verdict.line(), 1);
}

#[test]
fn closing_a_self_closing_tag() {
    let verdict = check(&["<!DOCTYPE html>", "<html><body><br>", "text", "</br></body></html>"]);
    assert_eq!(verdict, Verdict::SelfClosingTagClosed { line: 4, tag: "br".to_string() });
}

#[test]
fn unknown_tag() {
    let verdict = check(&["<!DOCTYPE html>", "<html><foo></foo></html>"]);
    assert_eq!(verdict, Verdict::InvalidTag { line: 2, tag: "foo".to_string() });
}

#[test]
fn unclosed_tag_reported_at_end_of_input() {
    let verdict = check(&["<!DOCTYPE html>", "<html><body></html>"]);
    // `</html>` does not match the innermost `body`
    assert_eq!(verdict, Verdict::InvalidTag { line: 2, tag: "html".to_string() });

    let verdict = check(&["<!DOCTYPE html>", "<html>", "<body>", "</body>"]);
    assert_eq!(verdict, Verdict::UnclosedTag { line: 4, tag: "html".to_string() });

    let verdict = check(&["<!DOCTYPE html>", "<html><body>", "<p>hi</p>"]);
    assert_eq!(verdict, Verdict::UnclosedTag { line: 3, tag: "body".to_string() });
}

#[test]
fn mismatched_nesting() {
    let verdict = check(&["<!DOCTYPE html>", "<html><body>", "</html></body>"]);
    assert_eq!(verdict, Verdict::InvalidTag { line: 3, tag: "html".to_string() });
}

#[test]
fn tag_in_both_lists_cannot_be_closed() {
    let vocab = Vocabulary::from_lists("html\nbr", "br");
    let validator = Validator::new(&vocab);

    let verdict = validator.validate(["<!DOCTYPE html>", "<html><br></br></html>"]).unwrap();
    assert_eq!(verdict, Verdict::SelfClosingTagClosed { line: 2, tag: "br".to_string() });

    let verdict = validator.validate(["<!DOCTYPE html>", "<html><br></html>"]).unwrap();
    assert!(verdict.is_valid());
}

#[test]
fn owned_lines_are_accepted() {
    let lines: Vec<String> = vec!["<!DOCTYPE html>".into(), "<p>".into(), "</p>".into()];
    assert_eq!(Validator::new(&vocabulary()).validate(lines).unwrap(), Verdict::Valid { line: 3 });
}

#[test]
fn html5_vocabulary_accepts_a_typical_page() {
    let page = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Example</title>
    <link rel="stylesheet" href="style.css">
  </head>
  <body>
    <h1 class="big">Hello</h1>
    <ul>
      <li><a href="/one">one</a></li>
      <li><img src="two.png"><br></li>
    </ul>
  </body>
</html>"#;

    let vocab = Vocabulary::html5();
    assert_eq!(Validator::new(&vocab).validate_str(page).unwrap(), Verdict::Valid { line: 15 });
}
