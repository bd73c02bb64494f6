use super::*;

fn question(id: &str) -> Question {
    Question {
        id: id.to_string(),
        question_text: format!("text of {}", id),
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct_answer: None,
    }
}

fn entry(name: &str, score: i64) -> LeaderboardEntry {
    LeaderboardEntry {
        name: name.to_string(),
        total_score: score,
    }
}

// =========================================================
// AnswerSheet
// =========================================================

#[test]
fn test_entries_follow_question_order_not_selection_order() {
    let questions = vec![question("q1"), question("q2")];
    let mut sheet = AnswerSheet::new();
    sheet.select("q2", "B");
    sheet.select("q1", "A");

    let entries = sheet.to_entries(&questions);
    assert_eq!(
        entries,
        vec![
            AnswerEntry {
                question_id: "q1".into(),
                selected_answer: "A".into()
            },
            AnswerEntry {
                question_id: "q2".into(),
                selected_answer: "B".into()
            },
        ]
    );
}

#[test]
fn test_reselecting_replaces_answer() {
    let questions = vec![question("q1")];
    let mut sheet = AnswerSheet::new();
    sheet.select("q1", "A");
    sheet.select("q1", "C");

    assert_eq!(sheet.selected("q1"), Some("C"));
    assert_eq!(sheet.answered(), 1);
    assert_eq!(sheet.to_entries(&questions).len(), 1);
}

#[test]
fn test_unanswered_questions_are_omitted() {
    let questions = vec![question("q1"), question("q2"), question("q3")];
    let mut sheet = AnswerSheet::new();
    sheet.select("q3", "D");

    let entries = sheet.to_entries(&questions);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].question_id, "q3");
}

// =========================================================
// QuestionCursor
// =========================================================

#[test]
fn test_cursor_is_bounded() {
    let mut cursor = QuestionCursor::new(2);
    assert!(cursor.is_first());
    assert!(!cursor.previous());
    assert!(cursor.next());
    assert!(cursor.is_last());
    assert!(!cursor.next());
    assert_eq!(cursor.index(), 1);
    assert_eq!(cursor.label(), "Question 2 of 2");
    assert!(cursor.previous());
    assert_eq!(cursor.index(), 0);
}

#[test]
fn test_cursor_current_question() {
    let questions = vec![question("q1"), question("q2")];
    let mut cursor = QuestionCursor::new(questions.len());
    cursor.next();
    assert_eq!(cursor.current(&questions).map(|q| q.id.as_str()), Some("q2"));
}

#[test]
fn test_empty_cursor_has_no_current() {
    let cursor = QuestionCursor::new(0);
    assert!(cursor.is_empty());
    assert!(cursor.current(&[]).is_none());
}

// =========================================================
// RankBadge
// =========================================================

#[test]
fn test_medals_for_top_three_then_place_numbers() {
    assert_eq!(RankBadge::for_index(0).to_string(), "🥇");
    assert_eq!(RankBadge::for_index(1).to_string(), "🥈");
    assert_eq!(RankBadge::for_index(2).to_string(), "🥉");
    assert_eq!(RankBadge::for_index(3).to_string(), "4");
    assert_eq!(RankBadge::for_index(9), RankBadge::Place(10));
    assert!(RankBadge::for_index(2).is_medal());
    assert!(!RankBadge::for_index(3).is_medal());
}

#[test]
fn test_top_rankers_slices_at_most_n() {
    let entries = vec![entry("a", 9), entry("b", 8), entry("c", 7), entry("d", 6)];
    let top = top_rankers(&entries, TOP_RANKERS);
    assert_eq!(top.len(), 3);
    assert_eq!(top[2].name, "c");

    let short = vec![entry("a", 1)];
    assert_eq!(top_rankers(&short, TOP_RANKERS).len(), 1);
    assert!(top_rankers(&[], TOP_RANKERS).is_empty());
}

// =========================================================
// QuestionSelection
// =========================================================

#[test]
fn test_toggle_twice_restores_selection() {
    let mut selection = QuestionSelection::new();
    selection.toggle("q1");
    selection.toggle("q2");
    let before = selection.clone();

    assert!(selection.toggle("q3"));
    assert!(!selection.toggle("q3"));
    assert_eq!(selection, before);

    assert!(!selection.toggle("q1"));
    assert!(selection.toggle("q1"));
    assert!(selection.contains("q1"));
    assert_eq!(selection.len(), 2);
}

#[test]
fn test_selection_to_request() {
    let mut selection = QuestionSelection::new();
    assert_eq!(
        selection.to_request("Week 1").unwrap_err(),
        FormError::NoQuestionsSelected
    );

    selection.toggle("q2");
    selection.toggle("q1");
    assert_eq!(selection.to_request("  ").unwrap_err(), FormError::BlankTitle);

    let req = selection.to_request(" Week 1 ").unwrap();
    assert_eq!(req.title, "Week 1");
    assert_eq!(req.questions, vec!["q2".to_string(), "q1".to_string()]);
}

#[test]
fn test_retain_known_drops_stale_ids() {
    let mut selection = QuestionSelection::new();
    selection.toggle("q1");
    selection.toggle("gone");
    selection.retain_known(&[question("q1")]);
    assert!(selection.contains("q1"));
    assert!(!selection.contains("gone"));
}

// =========================================================
// NewQuestion 校验
// =========================================================

#[test]
fn test_new_question_validation() {
    let mut draft = NewQuestion::blank();
    assert_eq!(draft.options.len(), OPTION_COUNT);
    assert_eq!(draft.validate(), Err(FormError::EmptyQuestionText));

    draft.question_text = "Which is O(1)?".into();
    draft.options = vec!["push".into(), "".into(), "sort".into(), "scan".into()];
    assert_eq!(draft.validate(), Err(FormError::BlankOption(2)));

    draft.options[1] = "pop".into();
    draft.correct_answer = "Push".into();
    assert_eq!(draft.validate(), Err(FormError::AnswerNotInOptions));

    draft.correct_answer = "push".into();
    assert_eq!(draft.validate(), Ok(()));
}

#[test]
fn test_form_error_messages_are_user_facing() {
    assert_eq!(
        FormError::NoQuestionsSelected.to_string(),
        "Please select at least one question for the test."
    );
    assert_eq!(FormError::BlankOption(3).to_string(), "Option 3 cannot be empty.");
}
