use pretty_assertions::assert_eq;
use reel_core::{extract_bullets, DEFAULT_BULLETS, MAX_BULLETS};

#[test]
fn keyword_sentences_become_clean_bullets_in_order() {
    let script = "First, we gather the raw footage. Then we cut the boring parts! \
                  Next, we add a soundtrack. Finally we export the result? \
                  Additionally, we publish everything online.";

    let bullets = extract_bullets(script);

    assert_eq!(
        bullets,
        vec![
            "We gather the raw footage",
            "We cut the boring parts",
            "We add a soundtrack",
            "We export the result",
        ]
    );
}

#[test]
fn keyword_match_is_case_insensitive() {
    let script = "FIRST the intro plays. SECOND the demo runs. \
                  THIRD, the summary appears. FURTHERMORE, credits roll.";

    let bullets = extract_bullets(script);

    assert_eq!(bullets.len(), MAX_BULLETS);
    assert_eq!(bullets[0], "The intro plays");
    assert_eq!(bullets[3], "Credits roll");
    assert!(bullets
        .iter()
        .all(|b| b.chars().next().is_some_and(char::is_uppercase)));
}

#[test]
fn short_keyword_sentences_are_dropped() {
    // "Then go" is too short, leaving three keyword bullets, so the fallback runs.
    let script = "First we open the editor. Then go. Next we trim the silence. \
                  Finally we render the clip.";

    let bullets = extract_bullets(script);

    assert_eq!(
        bullets,
        vec!["We open the editor", "We trim the silence", "We render the clip"]
    );
}

#[test]
fn fallback_replaces_keyword_pass_entirely() {
    let script = "First we open the editor. Then we trim. \
                  The renderer produces a crisp output file. \
                  Our audience loves short explainer clips.";

    let bullets = extract_bullets(script);

    assert_eq!(
        bullets,
        vec![
            "We open the editor",
            "The renderer produces a crisp output file",
            "Our audience loves short explainer clips",
        ]
    );
}

#[test]
fn fallback_truncates_long_sentences_to_sixty_chars() {
    let long = "x".repeat(65);
    let script = format!("{long}. Short one.");

    let bullets = extract_bullets(&script);

    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].chars().count(), 60);
    assert!(bullets[0].ends_with("..."));
    assert!(bullets[0].starts_with('X'));
}

#[test]
fn fallback_takes_at_most_four_sentences() {
    let script = "Alpha sentence that is long enough. Beta sentence that is long enough. \
                  Gamma sentence that is long enough. Delta sentence that is long enough. \
                  Omega sentence that is long enough.";

    let bullets = extract_bullets(script);

    assert_eq!(bullets.len(), MAX_BULLETS);
    assert_eq!(bullets[3], "Delta sentence that is long enough");
}

#[test]
fn no_qualifying_sentence_yields_defaults() {
    for script in ["", "Hi. Ok! Why?", "   "] {
        assert_eq!(extract_bullets(script), DEFAULT_BULLETS.to_vec());
    }
}
