//! Console front-end standing in for the chat transport.
//! Reads lines from stdin, maps them to conversation events, prints the
//! reply text and renders choices as a numbered menu.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use lexibot::provider::MyMemoryClient;
use lexibot::session::SessionStore;
use lexibot::state_machine::{handle_event, Choice, Event, Reply};

/// The console has exactly one user.
const CHAT_ID: i64 = 0;

fn event_for_input(input: &str, choices: &[Choice]) -> Event {
    // A 1-based menu number or a literal tag picks a choice.
    let picked = input
        .parse::<usize>()
        .ok()
        .and_then(|n| choices.get(n.wrapping_sub(1)))
        .or_else(|| choices.iter().find(|c| c.tag == input));

    match picked.map(|c| c.tag.as_str()) {
        Some("begin") => Event::Begin,
        Some("restart") => Event::Restart,
        Some("retry") => Event::Retry,
        Some(code) => Event::Select(code.to_string()),
        None if input == "/start" => Event::Restart,
        None => Event::Text(input.to_string()),
    }
}

fn print_reply(reply: &Reply) {
    println!("\n{}", reply.text);
    for (i, choice) in reply.choices.iter().enumerate() {
        println!("  {}. {}", i + 1, choice.label);
    }
    print!("> ");
    use std::io::Write;
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lexibot=info".parse().expect("static filter parses")),
        )
        .with_target(true)
        .init();

    info!("lexibot starting");

    let provider = match MyMemoryClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to create provider client: {e}");
            std::process::exit(1);
        }
    };

    let store = SessionStore::new();
    let session = store.session(CHAT_ID);

    // Open the conversation.
    let mut last_reply = {
        let mut guard = session.lock().await;
        handle_event(&mut guard, Event::Restart, &provider).await
    };
    print_reply(&last_reply);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let input = line.trim();
        if input.is_empty() {
            print_reply(&last_reply);
            continue;
        }
        if input == "/quit" {
            break;
        }

        let event = event_for_input(input, &last_reply.choices);
        // Holding the session lock across the pipeline keeps events for
        // this session strictly sequential.
        let reply = {
            let mut guard = session.lock().await;
            handle_event(&mut guard, event, &provider).await
        };
        print_reply(&reply);
        last_reply = reply;
    }

    info!("lexibot shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<Choice> {
        vec![
            Choice {
                label: "🇬🇧 English".to_string(),
                tag: "en".to_string(),
            },
            Choice {
                label: "🔁 Restart".to_string(),
                tag: "restart".to_string(),
            },
        ]
    }

    #[test]
    fn numbered_pick_maps_to_choice() {
        assert_eq!(
            event_for_input("1", &menu()),
            Event::Select("en".to_string())
        );
        assert_eq!(event_for_input("2", &menu()), Event::Restart);
    }

    #[test]
    fn literal_tag_maps_to_choice() {
        assert_eq!(
            event_for_input("en", &menu()),
            Event::Select("en".to_string())
        );
    }

    #[test]
    fn free_text_falls_through() {
        assert_eq!(
            event_for_input("cat", &menu()),
            Event::Text("cat".to_string())
        );
    }

    #[test]
    fn start_command_restarts() {
        assert_eq!(event_for_input("/start", &[]), Event::Restart);
    }
}
