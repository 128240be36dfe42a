//! End-to-end library tests: decode an exported task, type a comment with
//! the autocomplete controller, and render what comes back.

use focusflow::mention::{AutocompleteController, MentionLookup, TextSegment, TextboxId, source_of, tokenize};
use focusflow::ops::activity_format::{FragmentKind, format_action, plain_text};
use focusflow::ops::comment_ops::prepare_comment;
use focusflow::parse::parse_task;
use pretty_assertions::assert_eq;

const TASK: &str = r#"{
  "data": {
    "_id": "t9",
    "title": "Quarterly review",
    "owner": {"_id": "u1", "username": "Dana", "email": "dana@corp.io"},
    "assignedTo": [
      {"_id": "u2", "username": "eli", "email": "eli@corp.io"},
      {"_id": "u3", "email": "no-name@corp.io"},
      "u4"
    ],
    "comments": []
  }
}"#;

fn type_text(controller: &mut AutocompleteController, task: &focusflow::model::Task, text: &str) {
    controller.on_input(TextboxId::Comment, text, task.participants());
}

#[test]
fn typing_and_accepting_a_mention() {
    let task = parse_task(TASK).unwrap();
    let mut controller = AutocompleteController::new();

    let mut text = String::new();
    for c in "cc @".chars() {
        text.push(c);
        type_text(&mut controller, &task, &text);
    }
    // Bare `@` offers every participant that has a username.
    let names: Vec<_> = controller
        .state()
        .candidates()
        .iter()
        .filter_map(|u| u.username.as_deref())
        .collect();
    assert_eq!(names, vec!["Dana", "eli"]);

    text.push('E');
    type_text(&mut controller, &task, &text);
    assert_eq!(controller.state().candidates().len(), 1);

    let accepted = controller.accept(&text).unwrap();
    assert_eq!(accepted, "cc @eli ");
    assert!(!controller.state().is_open());

    let prepared = prepare_comment(&task, &format!("{accepted}please check")).unwrap();
    assert_eq!(prepared.path, "/t9/comments");
    assert_eq!(prepared.payload.comment, "cc @eli please check");
    // The handle runs on to the end of the text, so nothing resolves here.
    assert!(prepared.mentions.is_empty());

    let prepared = prepare_comment(&task, "please check, @ELI").unwrap();
    assert_eq!(prepared.mentions, vec!["eli"]);
}

#[test]
fn stored_comment_renders_canonical_usernames() {
    let task = parse_task(TASK).unwrap();
    let lookup = MentionLookup::for_task(&task);

    let segments = tokenize("thanks @DANA@corp.io", &lookup);
    assert_eq!(
        segments,
        vec![
            TextSegment::literal("thanks "),
            TextSegment::Mention {
                raw_handle: "DANA".into(),
                resolved_username: "Dana".into(),
                known: true,
            },
            TextSegment::literal("@corp.io"),
        ]
    );
    assert_eq!(source_of(&segments), "thanks @DANA@corp.io");

    // The handle stops at the next `@`.
    let segments = tokenize("@eli@corp.io", &lookup);
    assert_eq!(segments[0].display_text(), "@eli");
}

#[test]
fn activity_feed_line_with_mentions() {
    let task = parse_task(TASK).unwrap();
    let lookup = MentionLookup::for_task(&task);

    let fragments = format_action("eli replied to comment : ok @dana", &lookup);
    assert_eq!(plain_text(&fragments), "eli replied to comment : ok @Dana");
    let mention = fragments.last().unwrap();
    assert_eq!(mention.kind, FragmentKind::Mention);
    assert!(mention.emphasis);

    let fragments = format_action("something nobody planned for", &lookup);
    assert_eq!(plain_text(&fragments), "something nobody planned for");
    assert!(fragments.iter().all(|f| !f.emphasis));
}
