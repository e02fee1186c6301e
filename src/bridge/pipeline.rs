//! The bridging pipeline.
//!
//! Outbound (game to Discord): resolve the destination to a chat endpoint,
//! link the endpoint to a Discord channel, format, deliver. Inbound (Discord
//! to game): console channel or reverse link, then post into the chat.
//!
//! Every hop hands its result to a [`Callback`]; no call here waits on I/O.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::bridge::context::BridgeContext;
use crate::bridge::endpoint::{ChatEndpoint, ChatMessage};
use crate::bridge::remote::RemoteNetwork;
use crate::common::callback::{Callback, Named, Outcome};
use crate::common::error::BridgeError;
use crate::common::types::{Player, RemoteChannel, RemoteUser};
use crate::platform::events::MessageChannel;

/// Cheap handle to the shared [`BridgeContext`].
#[derive(Clone)]
pub struct Bridge {
    context: Arc<BridgeContext>,
}

impl Bridge {
    pub fn new(context: Arc<BridgeContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &BridgeContext {
        &self.context
    }

    /// Bridge a platform message to Discord and log the outcome.
    pub fn send(&self, destination: MessageChannel, text: String, subject: Option<Player>) {
        self.send_with(destination, text, subject, Callback::new(report_outbound));
    }

    /// Bridge a platform message to Discord.
    ///
    /// `done` receives `Some(())` once every chunk was delivered, `None` when
    /// no chat endpoint owns the destination, or the failure that stopped it.
    pub fn send_with(
        &self,
        destination: MessageChannel,
        text: String,
        subject: Option<Player>,
        done: Callback<()>,
    ) {
        let context = Arc::clone(&self.context);

        self.context.executor().spawn(async move {
            let resolver = Arc::clone(&context);
            let wanted = destination.clone();
            resolver.registry().resolve(
                &destination,
                Callback::new(move |outcome| match outcome {
                    Ok(Some(endpoint)) => link(context, endpoint, text, subject, done),
                    Ok(None) => done.success(None),
                    Err(e) => {
                        debug!("No chat endpoint for {:?}: {}", wanted, e);
                        done.success(None);
                    }
                }),
            );
        });
    }

    /// Relay a Discord message into the game and log the outcome.
    pub fn receive(&self, channel: RemoteChannel, author: RemoteUser, text: String) {
        self.receive_with(channel, author, text, Callback::new(report_inbound));
    }

    /// Relay a Discord message into the game.
    ///
    /// Messages in the console channel run as console commands. Otherwise
    /// `done` receives `None` when the channel's chat has not been seen yet.
    pub fn receive_with(
        &self,
        channel: RemoteChannel,
        author: RemoteUser,
        text: String,
        done: Callback<()>,
    ) {
        if self.context.console_channel() == Some(channel) {
            match self.context.console().invoke(&text) {
                Ok(()) => done.success(Some(())),
                Err(e) => done.failure(e),
            }
            return;
        }

        let context = Arc::clone(&self.context);
        self.context.chat_channel_linker().reverse(
            &channel,
            Callback::new(move |outcome: Outcome<String>| match outcome {
                Ok(Some(chat_id)) => match context.known_chats().get(&chat_id) {
                    Some(endpoint) => post_inbound(&context, endpoint, author, text, done),
                    None => {
                        debug!("Chat {} has not been seen yet", chat_id);
                        done.success(None);
                    }
                },
                Ok(None) => done.success(None),
                Err(e) => done.failure(e),
            }),
        );
    }
}

fn link(
    context: Arc<BridgeContext>,
    endpoint: ChatEndpoint,
    text: String,
    subject: Option<Player>,
    done: Callback<()>,
) {
    context.known_chats().record(&endpoint);

    let chat = endpoint.display_name().to_string();
    let linker = Arc::clone(&context);
    linker.chat_channel_linker().translate(
        &endpoint,
        Callback::new(move |outcome| match outcome {
            Ok(Some(remote)) => attribute(context, chat, remote, text, subject, done),
            Ok(None) => done.success(None),
            Err(e) => done.failure(e),
        }),
    );
}

fn attribute(
    context: Arc<BridgeContext>,
    chat: String,
    remote: RemoteChannel,
    text: String,
    subject: Option<Player>,
    done: Callback<()>,
) {
    let Some(player) = subject else {
        return deliver(&context, &chat, remote, &text, None, done);
    };

    player.name(Callback::new(move |outcome| {
        let name = match outcome {
            Ok(name) => name,
            Err(e) => {
                debug!("No display name for subject: {}", e);
                None
            }
        };
        deliver(&context, &chat, remote, &text, name.as_deref(), done);
    }));
}

fn deliver(
    context: &BridgeContext,
    chat: &str,
    remote: RemoteChannel,
    text: &str,
    subject: Option<&str>,
    done: Callback<()>,
) {
    let chunks: VecDeque<String> = context.formatter().render(text, subject, chat).into();
    if chunks.is_empty() {
        debug!("Nothing to send to {} after formatting", remote);
        return done.success(None);
    }

    send_chunks(Arc::clone(context.remote()), remote, chunks, done);
}

/// Deliver chunks one after another, stopping at the first failure.
fn send_chunks(
    network: Arc<dyn RemoteNetwork>,
    channel: RemoteChannel,
    mut chunks: VecDeque<String>,
    done: Callback<()>,
) {
    let Some(chunk) = chunks.pop_front() else {
        return done.success(Some(()));
    };

    let next = Arc::clone(&network);
    network.send(
        &channel,
        chunk,
        Callback::new(move |outcome| match outcome {
            Ok(_) => send_chunks(next, channel, chunks, done),
            Err(e) => done.failure(e),
        }),
    );
}

fn post_inbound(
    context: &BridgeContext,
    endpoint: ChatEndpoint,
    author: RemoteUser,
    text: String,
    done: Callback<()>,
) {
    let fallback = author.name.clone();
    context.player_user_linker().player_for_user(
        &author,
        Callback::new(move |outcome: Outcome<Player>| {
            let sender = match outcome {
                Ok(Some(player)) => player.name,
                _ => fallback,
            };
            endpoint.send(ChatMessage { sender, text }, done);
        }),
    );
}

fn report_outbound(outcome: Outcome<()>) {
    match outcome {
        Ok(Some(())) => {}
        Ok(None) => debug!("Platform message was not bridged"),
        Err(e @ BridgeError::Unmapped { .. }) => debug!("{}", e),
        Err(e) => error!("Failed to deliver message to Discord: {}", e),
    }
}

fn report_inbound(outcome: Outcome<()>) {
    match outcome {
        Ok(Some(())) => {}
        Ok(None) => debug!("Discord message was not relayed"),
        Err(e @ BridgeError::UnmappedRemote { .. }) => debug!("{}", e),
        Err(e) => warn!("Failed to relay Discord message: {}", e),
    }
}
