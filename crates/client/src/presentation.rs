//! Text presentation: ASCII level view, event log and run summary.
use anyhow::Result;
use game_core::{Feedback, ItemKind, LevelState, PlayerSprite, Position};
use runtime::{AudioEvent, ControllerEvent, Event, LevelEvent, RunReport, Topic};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

/// Draws the level with the top row first, using the level-file legend.
pub fn render(state: &LevelState) -> String {
    let width = state.grid.width() as i32;
    let height = state.grid.height() as i32;
    let mut out = String::with_capacity(((width + 1) * height) as usize);

    for y in (0..height).rev() {
        for x in 0..width {
            out.push(glyph_at(state, Position::new(x, y)));
        }
        out.push('\n');
    }
    out
}

fn glyph_at(state: &LevelState, position: Position) -> char {
    if state.player.position == position {
        return match state.player.sprite {
            PlayerSprite::Hidden => 'x',
            _ => 'P',
        };
    }
    if state.entities.monsters_at(position).next().is_some() {
        return 'M';
    }
    if let Some(door) = state.entities.doors_at(position).next() {
        return if door.is_open() { 'O' } else { 'D' };
    }
    if let Some(item) = state.entities.items_at(position).next() {
        return item_glyph(item.item.kind);
    }
    if state.grid.is_wall(position) { '#' } else { '.' }
}

fn item_glyph(kind: ItemKind) -> char {
    match kind {
        ItemKind::Sword => 's',
        ItemKind::Key => 'k',
        ItemKind::Gem => 'g',
        ItemKind::Trinket => 't',
    }
}

/// One-line summary printed after the queue finishes.
pub fn report_line(report: &RunReport) -> String {
    let summary = &report.summary;
    format!(
        "{:?}: {} executed, {} without effect, {} skipped{} | treasures {} | monsters {}",
        summary.outcome,
        report.executed,
        report.rejected,
        report.skipped,
        if report.stopped_early { ", stopped early" } else { "" },
        summary.treasures_collected,
        summary.monsters_killed,
    )
}

/// Logs every event of one topic until the bus closes.
pub async fn log_topic(
    topic: Topic,
    mut rx: broadcast::Receiver<Event>,
    json: bool,
) -> Result<()> {
    loop {
        match rx.recv().await {
            Ok(event) if json => println!("{}", serde_json::to_string(&event)?),
            Ok(event) => info!(?topic, "{}", describe(&event)),
            Err(RecvError::Lagged(skipped)) => warn!(?topic, skipped, "event log fell behind"),
            Err(RecvError::Closed) => break,
        }
    }
    Ok(())
}

fn describe(event: &Event) -> String {
    match event {
        Event::Controller(ControllerEvent::ActionExecuted {
            nonce,
            token,
            feedback,
        }) => {
            let details: Vec<String> = feedback.iter().map(describe_feedback).collect();
            format!("[{nonce}] {token}: {}", details.join(", "))
        }
        Event::Controller(ControllerEvent::ActionRejected {
            nonce, token, error, ..
        }) => format!("[{nonce}] {token} had no effect: {error}"),
        Event::Controller(ControllerEvent::UnknownToken { index, token }) => {
            format!("token #{index} `{token}` skipped")
        }
        Event::Controller(ControllerEvent::SwingExpired { nonce }) => {
            format!("swing from action {nonce} faded")
        }
        Event::Controller(ControllerEvent::MotionSettled { position }) => {
            format!("player at ({:.2}, {:.2})", position.x, position.y)
        }
        Event::Audio(AudioEvent { cue, pitch }) => format!("sound {cue} (pitch {pitch:.2})"),
        Event::Level(LevelEvent::Lost(summary)) => {
            format!("level lost after {} actions", summary.actions_executed)
        }
        Event::Level(LevelEvent::WinSequenceStarted) => "exit open".to_string(),
        Event::Level(LevelEvent::Won(summary)) => {
            format!("level won after {} actions", summary.actions_executed)
        }
        Event::Level(LevelEvent::QueueStopped { remaining }) => {
            format!("queue stopped with {remaining} actions left")
        }
    }
}

fn describe_feedback(feedback: &Feedback) -> String {
    match feedback {
        Feedback::MoveStarted { from, to } => format!("move {from} -> {to}"),
        Feedback::Sound(cue) => format!("sound {cue}"),
        Feedback::SwordVisibility(visible) => format!("sword shown: {visible}"),
        Feedback::InventorySlotChanged { slot, item } => match item {
            Some(kind) => format!("slot {} holds {kind}", slot.get()),
            None => format!("slot {} emptied", slot.get()),
        },
        Feedback::ItemRemoved(id) => format!("item {id} taken"),
        Feedback::MonsterRemoved(id) => format!("monster {id} slain"),
        Feedback::SwingSpawned(effect) => format!("swing {:?}", effect.direction),
        Feedback::SpriteChanged(sprite) => format!("sprite {sprite:?}"),
        Feedback::DoorKeysChanged { door, remaining } => {
            format!("door {door} needs {remaining} more")
        }
        Feedback::QueueStopped => "queue stop".to_string(),
        Feedback::WinTriggered { door } => format!("door {door} opened"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_puts_the_top_row_first() {
        let state = LevelState::builder(3, 2)
            .wall(Position::new(0, 1))
            .player(Position::new(1, 0))
            .item(Position::new(2, 0), ItemKind::Key)
            .door(Position::new(2, 1), 0)
            .monster(Position::new(1, 1))
            .build()
            .unwrap();

        assert_eq!(render(&state), "#MO\n.Pk\n");
    }

    #[test]
    fn describes_skipped_tokens() {
        let event = Event::Controller(ControllerEvent::UnknownToken {
            index: 3,
            token: "dance".into(),
        });
        assert_eq!(describe(&event), "token #3 `dance` skipped");
    }
}
