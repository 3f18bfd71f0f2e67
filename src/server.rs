//! HTTP server receiving Slack slash commands.
//!
//! This module provides the [`Server`] which exposes the single slash command
//! endpoint and hands every invocation to the [`Commander`].
//!
//! # Request Flow
//!
//! ```text
//! POST / (form or JSON) → SlashCommand → Commander::handle() → {"response_type": "in_channel", "text": ...}
//! ```
//!
//! Slack sends slash commands as `application/x-www-form-urlencoded`; JSON
//! bodies with the same fields are accepted too.
//!
//! For `add`, the JSON response only carries an acknowledgement, the result is
//! posted to the `response_url` of the invocation once the name lookup is done.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing::post,
};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    commands::{ClockRandom, CommandContext, CommandResult, Commander, RandomSource},
    config::Config,
    roster::RosterStore,
    slack::{Requester, SlackRequester},
};

/// Fields of a slash command invocation used by the bot.
#[derive(Debug, Deserialize)]
pub struct SlashCommand {
    /// Text typed after the slash command
    #[serde(default)]
    pub text: String,
    pub channel_id: String,
    #[serde(default)]
    pub channel_name: String,
    pub user_id: String,
    pub response_url: String,
}

impl SlashCommand {
    fn context(&self) -> CommandContext {
        CommandContext {
            channel_id: self.channel_id.clone(),
            channel_name: self.channel_name.clone(),
            user_id: self.user_id.clone(),
            response_url: self.response_url.clone(),
        }
    }
}

/// Response envelope of the slash command endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlashResponse {
    pub response_type: String,
    pub text: String,
}

impl SlashResponse {
    fn in_channel(text: String) -> Self {
        SlashResponse {
            response_type: "in_channel".to_owned(),
            text,
        }
    }
}

/// Main server structure.
///
/// Owns the [`RosterStore`] for the lifetime of the process, shared with the
/// [`Commander`] behind a mutex.
pub struct Server {
    /// Port to listen on
    port: u16,
    /// Command parser and executor, shared with every request
    commander: Arc<Commander<SlackRequester, ClockRandom>>,
}

impl Server {
    /// Creates a new Server from configuration, with an empty store.
    pub fn new(config: Config) -> Self {
        let store = Arc::new(Mutex::new(RosterStore::new()));
        let requester = Arc::new(SlackRequester::new(
            &config.slack.api_url,
            &config.slack.token,
        ));
        let commander = Arc::new(Commander::new(store, requester, ClockRandom));

        Server {
            port: config.server.port,
            commander,
        }
    }

    /// Listens on every interface and serves slash commands until the process
    /// is terminated.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let listener = TcpListener::bind(("0.0.0.0", self.port)).await?;
        info!("listening at http://{}", listener.local_addr()?);

        axum::serve(listener, router(self.commander)).await?;

        Ok(())
    }
}

/// Builds the router of the slash command endpoint.
pub fn router<R, S>(commander: Arc<Commander<R, S>>) -> Router
where
    R: Requester + Send + Sync + 'static,
    S: RandomSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(handle_slash_command::<R, S>))
        .with_state(commander)
}

async fn handle_slash_command<R, S>(
    State(commander): State<Arc<Commander<R, S>>>,
    request: Request,
) -> Result<Json<SlashResponse>, Response>
where
    R: Requester + Send + Sync + 'static,
    S: RandomSource + Send + Sync + 'static,
{
    let slash_command = extract_slash_command(request).await?;
    let context = slash_command.context();

    let text = match commander.handle(&context, &slash_command.text).await {
        CommandResult::Immediate(text) => text,
        CommandResult::Deferred {
            acknowledgement, ..
        } => {
            info!("response of {:?} deferred", slash_command.text);
            acknowledgement
        }
    };

    Ok(Json(SlashResponse::in_channel(text)))
}

/// Reads the body as JSON when announced so, as a form otherwise.
async fn extract_slash_command(request: Request) -> Result<SlashCommand, Response> {
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if is_json {
        let Json(slash_command) = Json::<SlashCommand>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(slash_command)
    } else {
        let Form(slash_command) = Form::<SlashCommand>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(slash_command)
    }
}
