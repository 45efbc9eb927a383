//! # Example: chat_room
//!
//! Demonstrates message routing between named participants.
//!
//! Shows how to:
//! - Implement [`Participant`] as a console mailbox.
//! - Broadcast to everyone except the sender.
//! - Deliver privately to one named recipient.
//! - Handle the non-fatal `recipient_not_found` / `sender_not_registered`
//!   outcomes.
//!
//! ## Run
//! ```bash
//! cargo run --example chat_room
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use dispatchkit::{Config, Message, NotifyError, Participant, ParticipantRef, Router};

/// Prints received messages, marking private ones.
struct ConsoleUser {
    name: &'static str,
}

#[async_trait]
impl Participant for ConsoleUser {
    async fn receive(
        &self,
        sender: &str,
        message: &Message,
        private: bool,
    ) -> Result<(), NotifyError> {
        if private {
            println!("[private] {} got from {sender}: {message}", self.name);
        } else {
            println!("{} got from {sender}: {message}", self.name);
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let chat = Router::new(Config::default());

    chat.join("Nika", Arc::new(ConsoleUser { name: "Nika" }) as ParticipantRef)
        .await;
    chat.join("Niusha", Arc::new(ConsoleUser { name: "Niusha" }) as ParticipantRef)
        .await;
    println!("Nika and Niusha joined the chat\n");

    // Broadcast: everyone except the sender receives it.
    chat.route("Nika", Message::new("Hello everyone!"), None)
        .await
        .expect("Nika has joined");
    chat.route("Niusha", Message::new("Hi Nika!"), None)
        .await
        .expect("Niusha has joined");

    // Private: exactly one recipient, flagged private.
    chat.route("Nika", Message::new("How are you?"), Some("Niusha"))
        .await
        .expect("Niusha is in the directory");

    // Non-fatal outcomes come back as structured errors.
    if let Err(err) = chat
        .route("Nika", Message::new("anyone home?"), Some("Ghost"))
        .await
    {
        println!("\nroute failed: {err}");
    }
    if let Err(err) = chat.route("Stranger", Message::new("hello?"), None).await {
        println!("route failed: {err}");
    }
}
