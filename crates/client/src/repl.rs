//! Line-oriented front end driving a [`SessionHandle`].

use std::io::Write as _;
use std::sync::Arc;

use anyhow::{Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use escape_core::{
    Action, ContentOracle, Language, ResetPolicy, Room1Action, Room3Action, StoreAction,
};
use escape_runtime::{Event, SessionHandle, Topic};

use crate::command::{HELP, ReplCommand};
use crate::render;

/// What the loop does after a line was handled.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue(Option<String>),
    Quit,
}

pub struct Repl {
    handle: SessionHandle,
    content: Arc<dyn ContentOracle>,
}

impl Repl {
    pub fn new(handle: SessionHandle, content: Arc<dyn ContentOracle>) -> Self {
        Self { handle, content }
    }

    /// Reads commands from stdin until `quit` or end of input.
    pub async fn run(self) -> Result<()> {
        let printer = spawn_event_printer(self.handle.clone());

        let state = self.handle.query_state().await?;
        println!("{}", render::render_state(&state, self.content.as_ref()));
        println!("type 'help' for commands");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.handle_line(&line).await {
                Ok(Step::Continue(Some(output))) => println!("{output}"),
                Ok(Step::Continue(None)) => {}
                Ok(Step::Quit) => break,
                Err(error) => println!("! {error}"),
            }
        }

        printer.abort();
        Ok(())
    }

    /// Parses and executes one line.
    ///
    /// Navigation rejections produce no output here; their advisory arrives
    /// through the event stream.
    pub async fn handle_line(&self, line: &str) -> Result<Step> {
        let Some(command) = ReplCommand::parse(line)? else {
            return Ok(Step::Continue(None));
        };
        match self.dispatch(command).await {
            Ok(step) => Ok(step),
            Err(error) => match error.downcast_ref::<escape_runtime::RuntimeError>() {
                Some(runtime) if runtime.as_navigation().is_some() => Ok(Step::Continue(None)),
                _ => Err(error),
            },
        }
    }

    async fn dispatch(&self, command: ReplCommand) -> Result<Step> {
        let output = match command {
            ReplCommand::Quit => return Ok(Step::Quit),
            ReplCommand::Help => Some(HELP.to_owned()),

            ReplCommand::State => {
                let state = self.handle.query_state().await?;
                Some(render::render_state(&state, self.content.as_ref()))
            }
            ReplCommand::Codex => Some(render::render_codex(&self.handle.query_state().await?)),
            ReplCommand::Inventory => {
                Some(render::render_inventory(&self.handle.query_state().await?))
            }
            ReplCommand::Read(id) => {
                let state = self.handle.query_state().await?;
                let Some(record) = state.knowledge.get(&id) else {
                    bail!("no knowledge entry '{id}'");
                };
                if !record.found {
                    bail!("'{id}' has not been discovered yet");
                }
                self.handle
                    .execute(StoreAction::SelectKnowledge {
                        id: Some(id.clone()),
                    })
                    .await?;
                let language = state.language;
                Some(format!(
                    "{}\n{}",
                    language.pick(&record.title, &record.title_vi),
                    language.pick(&record.content, &record.content_vi)
                ))
            }

            ReplCommand::Start => self.run_action(StoreAction::StartGame).await?,
            ReplCommand::Intro => self.run_action(StoreAction::ReturnToIntro).await?,
            ReplCommand::Dial { dial, position } => {
                self.run_action(Action::set_dial(dial - 1, position)).await?
            }
            ReplCommand::Manifesto => self.run_action(Room1Action::FindManifesto).await?,
            ReplCommand::Key => self.run_action(Room1Action::ObtainKey).await?,
            ReplCommand::Assemble(core) => self.run_action(Action::assemble_core(core)).await?,
            ReplCommand::Badge => self.run_action(Room3Action::ObtainBadge).await?,
            ReplCommand::Hint => self.run_action(StoreAction::ToggleHint).await?,
            ReplCommand::Sound => self.run_action(StoreAction::ToggleSound).await?,
            ReplCommand::Language(language) => {
                let language = match language {
                    Some(language) => language,
                    None => self.handle.query_state().await?.language.toggled(),
                };
                self.run_action(StoreAction::SetLanguage(language)).await?;
                Some(format!("language: {language}"))
            }
            ReplCommand::Reset { room, revoke } => {
                let policy = if revoke {
                    ResetPolicy::RevokeCompletion
                } else {
                    ResetPolicy::KeepCompletion
                };
                self.run_action(StoreAction::ResetRoom {
                    index: room - 1,
                    policy,
                })
                .await?
            }

            ReplCommand::Navigate(direction) => {
                self.handle.request_navigate(direction).await?;
                None
            }
            ReplCommand::Room(number) => {
                self.handle.select_room(number - 1).await?;
                None
            }

            ReplCommand::Play(core) => {
                let view = self.handle.open_minigame(core).await?;
                Some(render::render_minigame(&view))
            }
            ReplCommand::Answer(input) => {
                let input = self.resolve_option(input).await?;
                let report = self.handle.answer_minigame(input).await?;
                let verdict = if report.feedback.correct {
                    "correct".to_owned()
                } else if report.feedback.penalty_secs > 0 {
                    format!("wrong (-{}s)", report.feedback.penalty_secs)
                } else {
                    "wrong".to_owned()
                };
                let mut out = match &report.feedback.explanation {
                    Some(explanation) => format!("{verdict}: {explanation}"),
                    None => verdict,
                };
                if !report.view.is_finished() {
                    out.push('\n');
                    out.push_str(&render::render_minigame(&report.view));
                }
                Some(out)
            }
            ReplCommand::Retry => Some(render::render_minigame(
                &self.handle.retry_minigame().await?,
            )),
            ReplCommand::Close => {
                self.handle.close_minigame().await?;
                None
            }

            ReplCommand::Save => {
                self.handle.save().await?;
                Some("saved".to_owned())
            }
        };
        Ok(Step::Continue(output))
    }

    async fn run_action(&self, action: impl Into<Action>) -> Result<Option<String>> {
        self.handle.execute(action).await?;
        Ok(None)
    }

    /// Maps `answer 2` to the second listed option of a multiple-choice question.
    async fn resolve_option(&self, input: String) -> Result<String> {
        let Ok(number) = input.trim().parse::<usize>() else {
            return Ok(input);
        };
        let option = self
            .handle
            .minigame()
            .await?
            .filter(|view| !view.timed)
            .and_then(|view| number.checked_sub(1).and_then(|i| view.options.get(i).cloned()));
        Ok(option.unwrap_or(input))
    }
}

/// Prints player-facing events as they arrive.
fn spawn_event_printer(handle: SessionHandle) -> JoinHandle<()> {
    let mut events = handle.subscribe_multiple(&Topic::ALL);
    let mut progress = events.remove(&Topic::Progress);
    let mut navigation = events.remove(&Topic::Navigation);
    let mut minigame = events.remove(&Topic::MiniGame);

    tokio::spawn(async move {
        let mut language = Language::default();
        loop {
            let received = tokio::select! {
                Some(event) = recv(&mut progress) => event,
                Some(event) = recv(&mut navigation) => event,
                Some(event) = recv(&mut minigame) => event,
                else => break,
            };

            let state = match received {
                Event::Progress(_) => handle.query_state().await.ok(),
                _ => None,
            };
            if let Some(state) = &state {
                language = state.language;
            }
            if let Some(line) = render::describe_event(&received, state.as_ref(), language) {
                println!("{line}");
            }
        }
    })
}

/// Next event from an optional receiver. Lagging is skipped; a closed or
/// missing channel yields `None`.
async fn recv(
    receiver: &mut Option<tokio::sync::broadcast::Receiver<Event>>,
) -> Option<Event> {
    let rx = receiver.as_mut()?;
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "event printer lagged");
            }
            Err(RecvError::Closed) => {
                *receiver = None;
                return None;
            }
        }
    }
}
