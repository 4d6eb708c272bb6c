//! Text rendering of session state and runtime events.

use std::fmt::Write as _;

use escape_core::{ContentOracle, CoreBoard, GameState, Language, MiniGameOutcome, RoomIndex};
use escape_runtime::{Event, MiniGameEvent, MiniGameView, NavigationEvent, ProgressEvent};

/// Countdown values announced while a timed game runs.
fn announce_tick(time_left: u32) -> bool {
    time_left <= 5 || time_left % 30 == 0
}

/// One line for the player, or `None` for events the REPL stays quiet about.
pub fn describe_event(
    event: &Event,
    state: Option<&GameState>,
    language: Language,
) -> Option<String> {
    match event {
        Event::Navigation(NavigationEvent::Started { target, .. }) => {
            Some(format!("... heading to {target}"))
        }
        Event::Navigation(NavigationEvent::Finished { room }) => {
            Some(format!("You are in {room}."))
        }
        Event::Navigation(NavigationEvent::Blocked { advisory, .. }) => advisory.clone(),

        Event::MiniGame(MiniGameEvent::Tick { time_left, .. }) if announce_tick(*time_left) => {
            Some(format!("[{time_left}s left]"))
        }
        Event::MiniGame(MiniGameEvent::Finished { core, outcome }) => Some(match outcome {
            MiniGameOutcome::Won => format!("Challenge won, core {core} unlocked!"),
            MiniGameOutcome::Failed { score, required } => {
                format!("Challenge failed ({score}/{required} needed). Type 'retry'.")
            }
            MiniGameOutcome::TimedOut => "Time is up! Type 'retry'.".to_owned(),
        }),
        Event::MiniGame(_) => None,

        Event::Progress(ProgressEvent::ActionExecuted { delta, .. }) => {
            let mut lines = Vec::new();
            for id in &delta.knowledge_found {
                let title = state
                    .and_then(|s| s.knowledge.get(id))
                    .map(|record| language.pick(&record.title, &record.title_vi).to_owned())
                    .unwrap_or_else(|| id.clone());
                lines.push(format!("+ knowledge: {title}"));
            }
            for id in &delta.inventory.added {
                lines.push(format!("+ item: {id}"));
            }
            for latch in &delta.latches {
                lines.push(format!("* {latch}"));
            }
            for room in &delta.rooms_completed {
                lines.push(format!("* {room} complete"));
            }
            if delta.game_completed {
                lines.push("*** You escaped. The Great Transition is complete! ***".to_owned());
            }
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        Event::Progress(_) => None,
    }
}

/// Summary of the current room and overall progress.
pub fn render_state(state: &GameState, content: &dyn ContentOracle) -> String {
    let language = state.language;
    let mut out = String::new();

    let room = state.current_room;
    let name = content
        .room(room)
        .map(|info| format!("{}: {}", info.name(language), info.description(language)))
        .unwrap_or_default();
    let _ = writeln!(out, "[{room}] {name}");
    let done: Vec<String> = RoomIndex::all()
        .map(|r| {
            let mark = if state.is_room_completed(r) { "✓" } else { "·" };
            format!("{}{mark}", r.index() + 1)
        })
        .collect();
    let _ = writeln!(
        out,
        "rooms {}  knowledge {}/{}  items {}",
        done.join(" "),
        state.knowledge.found_count(),
        state.knowledge.records().len(),
        state.inventory.len(),
    );

    match room.index() {
        0 => {
            let r1 = &state.rooms.room1;
            let _ = writeln!(
                out,
                "dials {:?}  manifesto {}  box {}  key {}",
                r1.dial_positions,
                yes_no(r1.manifesto_found),
                if r1.box_opened { "open" } else { "locked" },
                yes_no(r1.key_obtained),
            );
        }
        1 => {
            render_board(&mut out, &state.rooms.room2.cores);
            let active = yes_no(state.rooms.room2.machine_activated);
            let _ = writeln!(out, "machine active: {active}");
        }
        _ => {
            render_board(&mut out, &state.rooms.room3.cores);
            let _ = writeln!(
                out,
                "device powered: {}  badge: {}",
                yes_no(state.rooms.room3.device_powered),
                yes_no(state.rooms.room3.badge_obtained),
            );
        }
    }

    if state.is_transitioning() {
        let _ = writeln!(out, "(moving between rooms)");
    }
    out.trim_end().to_owned()
}

/// Knowledge codex; unfound entries show only their id.
pub fn render_codex(state: &GameState) -> String {
    let language = state.language;
    state
        .knowledge
        .records()
        .iter()
        .map(|record| {
            if record.found {
                format!("[x] {} - {}", record.id, language.pick(&record.title, &record.title_vi))
            } else {
                format!("[ ] {}", record.id)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_inventory(state: &GameState) -> String {
    if state.inventory.is_empty() {
        return "(empty)".to_owned();
    }
    state
        .inventory
        .items()
        .iter()
        .map(|item| format!("- {} ({})", state.language.pick(&item.name, &item.name_vi), item.id))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_minigame(view: &MiniGameView) -> String {
    let mut out = String::new();
    let shown = (view.step + 1).min(view.question_count);
    let _ = write!(out, "== {} ({shown}/{})", view.title, view.question_count);
    if let Some(time_left) = view.time_left {
        let _ = write!(out, "  {time_left}s");
    } else {
        let _ = write!(out, "  score {}", view.score);
    }
    if let Some(prompt) = &view.prompt {
        let _ = write!(out, "\n{prompt}");
    }
    for (i, option) in view.options.iter().enumerate() {
        let _ = write!(out, "\n  {}) {option}", i + 1);
    }
    if let Some(hint) = &view.hint {
        let _ = write!(out, "\n  hint: {hint}");
    }
    out
}

fn render_board(out: &mut String, board: &CoreBoard) {
    for (core, status) in board.iter() {
        let _ = writeln!(out, "  {core:<16} {status}");
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use escape_content::Catalog;
    use escape_core::{Action, GameEngine, GameEnv, NavigationError, Room1Action};

    use super::*;

    #[test]
    fn blocked_navigation_shows_its_advisory_only() {
        let blocked = Event::Navigation(NavigationEvent::Blocked {
            error: NavigationError::CurrentRoomIncomplete { room: RoomIndex::FIRST },
            advisory: Some("Complete this room first before moving forward!".into()),
        });
        assert_eq!(
            describe_event(&blocked, None, Language::En).as_deref(),
            Some("Complete this room first before moving forward!")
        );

        let silent = Event::Navigation(NavigationEvent::Blocked {
            error: NavigationError::AlreadyTransitioning { target: RoomIndex::THEORY },
            advisory: None,
        });
        assert_eq!(describe_event(&silent, None, Language::En), None);
    }

    #[test]
    fn ticks_are_announced_sparingly() {
        let tick = |time_left| {
            Event::MiniGame(MiniGameEvent::Tick {
                core: escape_core::CoreId::Digital,
                time_left,
            })
        };
        assert!(describe_event(&tick(90), None, Language::En).is_some());
        assert!(describe_event(&tick(47), None, Language::En).is_none());
        assert!(describe_event(&tick(3), None, Language::En).is_some());
    }

    #[test]
    fn discoveries_use_localized_titles() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = GameState::from_oracle(&catalog);
        let outcome = GameEngine::new(&mut state)
            .execute(
                GameEnv::with_content(&catalog),
                &Action::Room1(Room1Action::FindManifesto),
            )
            .unwrap();

        let event = Event::Progress(ProgressEvent::ActionExecuted {
            nonce: outcome.delta.nonce,
            action: outcome.delta.action.clone(),
            delta: Box::new(outcome.delta),
        });
        let text = describe_event(&event, Some(&state), Language::En).unwrap();
        assert!(text.contains("+ knowledge:"));
        assert!(text.contains("* manifesto_found"));
        assert!(render_state(&state, &catalog).contains("manifesto yes"));
        assert!(render_codex(&state).contains("[x] manifesto"));
    }
}
