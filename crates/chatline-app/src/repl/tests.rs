use std::io::Cursor;

use chatline_ai::{Mode, Parameters, Role, Session};
use chatline_common::ChatlineError;

use super::testing::{MapPrompts, StubGenerator};
use super::*;

fn completion() -> Session {
    Session::new(Mode::Completion, Parameters::default())
}

async fn run_script(
    session: Session,
    generator: &StubGenerator,
    prompts: &MapPrompts,
    script: &str,
) -> (Session, String) {
    let mut repl = Repl::new(session, generator, prompts, Cursor::new(script), Vec::new());
    repl.run().await.unwrap();
    assert_eq!(repl.state(), LoopState::Terminated);
    let (session, out) = repl.into_parts();
    (session, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn content_turn_appends_input_and_reply() {
    let generator = StubGenerator::new(vec![vec!["hi there"]]);
    let (session, out) =
        run_script(completion(), &generator, &MapPrompts::default(), "hello\n").await;

    assert_eq!(session.snapshot(), "\n> hello\nhi there");
    assert_eq!(generator.requests()[0].input, "\n> hello");
    assert!(out.contains("hi there\n\n"));
}

#[tokio::test]
async fn reply_is_trimmed_in_transcript() {
    let generator = StubGenerator::new(vec![vec!["\n\n  spaced out  \n"]]);
    let (session, _) =
        run_script(completion(), &generator, &MapPrompts::default(), "hello\n").await;
    assert_eq!(session.snapshot(), "\n> hello\nspaced out");
}

#[tokio::test]
async fn parameter_set_then_query() {
    let generator = StubGenerator::new(vec![]);
    let (session, out) = run_script(
        completion(),
        &generator,
        &MapPrompts::default(),
        "temp 1.3\ntemp\ntokens 64\nmodel text-curie-001\nmodel\n",
    )
    .await;

    assert_eq!(session.parameters().temperature, 1.3);
    assert_eq!(session.parameters().max_tokens, 64);
    assert_eq!(session.parameters().model, "text-curie-001");
    assert!(out.contains("temp is now 1.3\n"));
    assert!(out.contains("temp is set to 1.3\n"));
    assert!(out.contains("model is set to text-curie-001\n"));
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn malformed_number_leaves_parameter_unchanged() {
    let generator = StubGenerator::new(vec![]);
    let (session, out) = run_script(
        completion(),
        &generator,
        &MapPrompts::default(),
        "tokens abc\ntopp 1,5\ntokens\n",
    )
    .await;

    assert_eq!(session.parameters(), &Parameters::default());
    assert!(out.contains("invalid integer \"abc\" for tokens"));
    assert!(out.contains("invalid number \"1,5\" for topp"));
    assert!(out.contains("tokens is set to 1024\n"));
}

#[tokio::test]
async fn chat_model_rejected_in_completion_session() {
    let generator = StubGenerator::new(vec![vec!["ok"]]);
    let (session, out) = run_script(
        completion(),
        &generator,
        &MapPrompts::default(),
        "model gpt-4\nhello\n",
    )
    .await;

    assert!(out.contains(
        "model gpt-4 does not fit a completion session, keeping text-davinci-003\n"
    ));
    assert_eq!(session.mode(), &Mode::Completion);
    assert_eq!(session.parameters().model, "text-davinci-003");
    assert_eq!(generator.requests()[0].params.model, "text-davinci-003");
}

#[tokio::test]
async fn completion_model_rejected_in_chat_session() {
    let params = Parameters {
        model: "gpt-3.5-turbo".into(),
        ..Parameters::default()
    };
    let generator = StubGenerator::new(vec![vec!["ok"]]);
    let (session, out) = run_script(
        Session::new(Mode::Chat, params),
        &generator,
        &MapPrompts::default(),
        "model text-davinci-003\nmodel gpt-4\nhello\n",
    )
    .await;

    assert!(out.contains(
        "model text-davinci-003 does not fit a chat session, keeping gpt-3.5-turbo\n"
    ));
    assert!(out.contains("model is now gpt-4\n"));
    assert_eq!(session.mode(), &Mode::Chat);
    assert_eq!(generator.requests()[0].params.model, "gpt-4");
}

#[tokio::test]
async fn invalid_utf8_line_does_not_end_session() {
    let generator = StubGenerator::new(vec![vec!["ok"]]);
    let prompts = MapPrompts::default();
    let script: &[u8] = b"temp 0.3\ncaf\xe9\ntemp 0.9\n";
    let mut repl = Repl::new(completion(), &generator, &prompts, Cursor::new(script), Vec::new());

    repl.run().await.unwrap();

    assert_eq!(repl.state(), LoopState::Terminated);
    assert_eq!(repl.session().parameters().temperature, 0.9);
    assert_eq!(generator.requests()[0].input, "\n> caf\u{FFFD}");
}

#[tokio::test]
async fn parameters_are_forwarded() {
    let generator = StubGenerator::new(vec![vec!["ok"]]);
    run_script(
        completion(),
        &generator,
        &MapPrompts::default(),
        "pres -1.5\nfreq 0.5\nhello\n",
    )
    .await;

    let params = &generator.requests()[0].params;
    assert_eq!(params.presence_penalty, -1.5);
    assert_eq!(params.frequency_penalty, 0.5);
}

#[tokio::test]
async fn clear_is_idempotent() {
    let mut session = completion();
    session.set_prompt("be nice");
    session.append("\nsome context");
    let generator = StubGenerator::new(vec![]);

    let (once, _) =
        run_script(session.clone(), &generator, &MapPrompts::default(), "clear\n").await;
    let (twice, _) =
        run_script(session, &generator, &MapPrompts::default(), "clear\nclear\n").await;

    assert!(once.is_empty());
    assert_eq!(once.snapshot(), twice.snapshot());
}

#[tokio::test]
async fn context_shows_turns() {
    let generator = StubGenerator::new(vec![vec!["hi there"]]);
    let (_, out) = run_script(
        completion(),
        &generator,
        &MapPrompts::default(),
        "hello\ncontext\n",
    )
    .await;

    assert!(out.contains(
        "\n===== Current Context =====\n\n> hello\nhi there\n===========================\n\n"
    ));
}

#[tokio::test]
async fn selection_retries_until_valid() {
    let generator = StubGenerator::new(vec![vec!["a", "b", "c"]]);
    let (session, out) = run_script(
        completion(),
        &generator,
        &MapPrompts::default(),
        "hello\nx\n5\n1\n",
    )
    .await;

    assert!(out.contains("[0]: a\n\n[1]: b\n\n[2]: c\n\n"));
    assert!(out.contains("invalid choice \"x\""));
    assert!(out.contains("choice must be between 0 and 2"));
    assert_eq!(session.snapshot(), "\n> hello\nb");
    assert_eq!(generator.requests().len(), 1);
}

#[tokio::test]
async fn end_of_input_during_selection_terminates() {
    let generator = StubGenerator::new(vec![vec!["a", "b"]]);
    let (session, _) =
        run_script(completion(), &generator, &MapPrompts::default(), "hello\n").await;
    assert_eq!(session.snapshot(), "\n> hello");
}

#[tokio::test]
async fn single_candidate_skips_selection() {
    let generator = StubGenerator::new(vec![vec!["only"], vec!["second"]]);
    let (session, out) = run_script(
        completion(),
        &generator,
        &MapPrompts::default(),
        "one\ntwo\n",
    )
    .await;

    assert!(!out.contains("[0]:"));
    assert_eq!(session.snapshot(), "\n> one\nonly\n> two\nsecond");
    assert_eq!(generator.requests()[1].input, "\n> one\nonly\n> two");
}

#[tokio::test]
async fn empty_reply_list_appends_empty_response() {
    let generator = StubGenerator::new(vec![vec![]]);
    let (session, _) =
        run_script(completion(), &generator, &MapPrompts::default(), "hello\n").await;
    assert_eq!(session.snapshot(), "\n> hello\n");
}

#[tokio::test]
async fn unknown_prompt_is_used_as_text() {
    let generator = StubGenerator::new(vec![]);
    let (session, out) = run_script(
        completion(),
        &generator,
        &MapPrompts::default(),
        "prompt teacher\n",
    )
    .await;

    assert!(out.contains("no predefined prompt found, using custom text\n"));
    assert!(out.contains("setting prompt to:\nteacher\n"));
    assert_eq!(session.snapshot(), "teacher");
}

#[tokio::test]
async fn prompt_replacement_keeps_conversation() {
    let prompts = MapPrompts::with(&[("cynic", "You are a cynic.")]);
    let generator = StubGenerator::new(vec![vec!["hi"]]);
    let (session, out) = run_script(
        completion(),
        &generator,
        &prompts,
        "prompt answer briefly\nhello\nprompt cynic\n",
    )
    .await;

    assert!(out.contains("setting prompt to:\nYou are a cynic.\n"));
    assert_eq!(session.snapshot(), "You are a cynic.\n> hello\nhi");
}

#[tokio::test]
async fn prompt_list_view_and_usage() {
    let prompts = MapPrompts::with(&[("cynic", "You are a cynic."), ("teacher", "Explain.")]);
    let generator = StubGenerator::new(vec![]);
    let (session, out) = run_script(
        completion(),
        &generator,
        &prompts,
        "prompt\nprompt list\nprompt view:teacher\nprompt view:nope\n",
    )
    .await;

    assert!(out.contains(PROMPT_USAGE));
    assert!(out.contains("cynic\nteacher\n"));
    assert!(out.contains("Explain.\n"));
    assert!(out.contains("no predefined prompt named nope\n"));
    assert!(session.is_empty());
}

#[tokio::test]
async fn blank_lines_do_nothing() {
    let generator = StubGenerator::new(vec![]);
    let (session, _) =
        run_script(completion(), &generator, &MapPrompts::default(), "\n   \n\t\n").await;
    assert!(session.is_empty());
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn quit_stops_reading() {
    for word in ["quit", "q", "exit"] {
        let generator = StubGenerator::new(vec![vec!["ignored"]]);
        let script = format!("{word}\nhello\n");
        let (session, _) =
            run_script(completion(), &generator, &MapPrompts::default(), &script).await;
        assert!(session.is_empty(), "{word}");
        assert!(generator.requests().is_empty(), "{word}");
    }
}

#[tokio::test]
async fn end_of_input_terminates() {
    let generator = StubGenerator::new(vec![]);
    let (session, out) = run_script(completion(), &generator, &MapPrompts::default(), "").await;
    assert!(session.is_empty());
    assert_eq!(out, "> ");
}

#[tokio::test]
async fn generation_failure_ends_loop_with_error() {
    let generator = StubGenerator::failing();
    let prompts = MapPrompts::default();
    let mut repl = Repl::new(
        completion(),
        &generator,
        &prompts,
        Cursor::new("hello\nagain\n"),
        Vec::new(),
    );

    let err = repl.run().await.unwrap_err();
    assert!(matches!(err, ChatlineError::Ai(_)));
    assert_eq!(generator.requests().len(), 1);
}

#[tokio::test]
async fn save_writes_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.txt");
    std::fs::write(&path, "stale").unwrap();

    let generator = StubGenerator::new(vec![vec!["hi there"]]);
    let script = format!("hello\nsave {}\nsave\n", path.display());
    let (session, out) =
        run_script(completion(), &generator, &MapPrompts::default(), &script).await;

    assert_eq!(std::fs::read_to_string(&path).unwrap(), session.snapshot());
    assert!(out.contains(&format!("saving session to {}\n", path.display())));
    assert!(out.contains("save requires a filename\n"));
}

#[tokio::test]
async fn save_failure_keeps_running() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("session.txt");

    let generator = StubGenerator::new(vec![]);
    let script = format!("save {}\ntemp 0.2\n", path.display());
    let (session, out) =
        run_script(completion(), &generator, &MapPrompts::default(), &script).await;

    assert!(out.contains("failed to write"));
    assert_eq!(session.parameters().temperature, 0.2);
}

#[tokio::test]
async fn chat_mode_sends_messages() {
    let mut session = Session::new(Mode::Chat, Parameters::default());
    session.set_prompt("be brief");
    let generator = StubGenerator::new(vec![vec!["hi"]]);

    let (session, _) =
        run_script(session, &generator, &MapPrompts::default(), "hello\n").await;

    assert_eq!(generator.requests()[0].input, "system: be brief\nuser: hello");
    let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::System, Role::User, Role::Assistant]);
    assert_eq!(session.snapshot(), "system: be brief\nuser: hello\nassistant: hi");
}

#[tokio::test]
async fn chat_prompt_replaces_system_message() {
    let mut session = Session::new(Mode::Chat, Parameters::default());
    session.set_prompt("first");
    let generator = StubGenerator::new(vec![vec!["hi"]]);

    let (session, _) = run_script(
        session,
        &generator,
        &MapPrompts::default(),
        "hello\nprompt second\n",
    )
    .await;

    assert_eq!(session.messages().len(), 3);
    assert_eq!(session.messages()[0].content, "second");
}

#[tokio::test]
async fn edit_mode_sends_instruction() {
    let mut session = Session::new(
        Mode::Edit {
            instruction: "fix spelling".into(),
        },
        Parameters::default(),
    );
    session.append("teh cat");
    let generator = StubGenerator::new(vec![vec!["the cat"]]);

    run_script(session, &generator, &MapPrompts::default(), "more\n").await;

    assert_eq!(generator.requests()[0].input, "teh cat\n> more|fix spelling");
}

#[tokio::test]
async fn step_reports_state() {
    let generator = StubGenerator::new(vec![]);
    let prompts = MapPrompts::default();
    let mut repl = Repl::new(
        completion(),
        &generator,
        &prompts,
        Cursor::new("temp 0.1\nquit\nignored\n"),
        Vec::new(),
    );

    assert_eq!(repl.step().await.unwrap(), LoopState::AwaitingInput);
    assert_eq!(repl.session().parameters().temperature, 0.1);
    assert_eq!(repl.step().await.unwrap(), LoopState::Terminated);
    assert_eq!(repl.step().await.unwrap(), LoopState::Terminated);
}

#[test]
fn read_line_replaces_invalid_bytes() {
    let mut input = Cursor::new(&b"caf\xe9\r\nok\n"[..]);
    assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("caf\u{FFFD}"));
    assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("ok"));
}

#[test]
fn read_line_strips_line_endings() {
    let mut input = Cursor::new("one\r\ntwo\nthree");
    assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("one"));
    assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("two"));
    assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("three"));
    assert_eq!(read_line(&mut input).unwrap(), None);
}
