use anyhow::{Context, Result};
use std::io::Write;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

use roleplay_chat_engine_lib::chat::CannedReplies;
use roleplay_chat_engine_lib::character::{find_character, random_character, roster};
use roleplay_chat_engine_lib::{config, ChatSession, SessionEvent};

#[tokio::main]
async fn main() -> Result<()> {
    roleplay_chat_engine_lib::init_logging();

    let config_path = config::default_config_path();
    let config = config::load_config(&config_path);

    let character = match std::env::args().nth(1) {
        Some(id) => find_character(&id).with_context(|| {
            let ids: Vec<&str> = roster().iter().map(|c| c.id.as_str()).collect();
            format!("Unknown character '{}'. Choose one of: {}", id, ids.join(", "))
        })?,
        None => random_character(),
    };

    println!("── {} ({}) ──", character.name, character.personality);
    println!("Type a message, or /quit to leave.\n");

    let mut session = ChatSession::new(character, config);
    let mut replies = CannedReplies::new();
    reveal(&mut session).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_tick = Instant::now();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        // Catch up on timers that ran while waiting for input.
        report(&session.tick(last_tick.elapsed()));

        if let Err(e) = session.submit_user_message(&line) {
            eprintln!("{}", e);
            continue;
        }

        println!("{} is typing...", character.name);
        tokio::time::sleep(session.config().reply_delay()).await;
        session.deliver_reply(&mut replies)?;
        reveal(&mut session).await?;
        last_tick = Instant::now();
    }

    tracing::info!("[Chat] Session ended after {} messages", session.messages().len());
    Ok(())
}

/// Run the typewriter for the latest reply, printing characters as they appear.
async fn reveal(session: &mut ChatSession) -> Result<()> {
    let step = session.config().typing_interval().max(std::time::Duration::from_millis(1));
    let mut ticker = tokio::time::interval(step);
    let mut printed = 0;
    print!("{}: ", session.character().name);

    while session.is_revealing() {
        ticker.tick().await;
        let events = session.tick(step);
        if let Some(visible) = session.revealing_text() {
            print!("{}", &visible[printed..]);
            printed = visible.len();
            std::io::stdout().flush()?;
        }
        report(&events);
    }
    println!();
    println!("[{} looks {}]", session.character().name, session.displayed_emotion());
    Ok(())
}

fn report(events: &[SessionEvent]) {
    for event in events {
        match event {
            SessionEvent::EmotionChanged { transition } => {
                tracing::info!("[Portrait] {} -> {}", transition.from, transition.to);
            }
            SessionEvent::Cue { cue } => {
                tracing::debug!(
                    "[Cue] {:?} {:.0}Hz {}ms gain {:.3}",
                    cue.kind,
                    cue.frequency_hz,
                    cue.duration_ms,
                    cue.gain
                );
            }
            SessionEvent::ReplyRevealed { message_id } => {
                tracing::debug!("[Chat] Revealed {}", message_id);
            }
        }
    }
}
