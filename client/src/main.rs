//! chatgate CLI
//!
//! Terminal front-end for the chatgate endpoints. Each invocation restores the
//! session from the session file, runs one command and exits.
//!
//! User-facing output uses writeln! to stdout; diagnostics go through tracing.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use chatgate_client::entities::{ExpiryLabel, InviteStatus, User};
use chatgate_client::{
    ApiClient, ApiError, ChatsResource, ClientConfig, Endpoints, FileTokenStore, InvitesResource,
    MessagesResource, Navigator, SessionController, TokenStore, UsersResource, init_tracing,
};

#[derive(Parser, Debug)]
#[command(name = "chatgate")]
#[command(version, about = "Invite-only chat from the terminal", long_about = None)]
struct Cli {
    /// Base URL of the chatgate endpoints
    #[arg(long, env = "CHATGATE_API_URL")]
    api_url: Option<String>,

    /// Session file (defaults to ~/.chatgate/session.json)
    #[arg(long, env = "CHATGATE_STORAGE")]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show whether the deployment has users yet.
    Init {
        /// Create the first administrator invite.
        #[arg(long)]
        bootstrap: bool,
    },
    /// Create an account with an invite token.
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        display_name: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        invite: String,
    },
    /// Sign in.
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget the stored tokens.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List the users you can chat with.
    Users,
    /// List your chats.
    Chats,
    /// Open the direct chat with a user.
    Open { user_id: String },
    /// Show the messages of a chat.
    Messages { chat_id: String },
    /// Send a message to a chat.
    Send { chat_id: String, body: String },
    /// Manage invites (admins only).
    Invites {
        #[command(subcommand)]
        action: InviteAction,
    },
}

#[derive(Subcommand, Debug)]
enum InviteAction {
    List,
    Create {
        #[arg(long, default_value_t = 1)]
        max_uses: i64,
        #[arg(long, default_value_t = 7)]
        days_valid: i64,
    },
    Revoke { invite_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing("chatgate_client=info");

    let mut config = ClientConfig::from_env().map_err(anyhow::Error::msg)?;
    if let Some(url) = &cli.api_url {
        config.endpoints = Endpoints::from_base(url);
        config.origin = url.trim_end_matches('/').to_string();
    }
    if let Some(path) = cli.storage {
        config.storage_path = Some(path);
    }
    let path = config
        .storage_path
        .clone()
        .context("No session file location, pass --storage <path>")?;
    debug!(path = %path.display(), "using session file");

    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(path));
    let api = ApiClient::new(config, store, Navigator::default());
    let session = SessionController::new(api);
    session.init();

    run(cli.command, &session).await
}

async fn run(command: Command, session: &SessionController) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let api = session.api().clone();

    match command {
        Command::Init { bootstrap } => {
            let status = api.check_init().await?;
            if status.initialized {
                writeln!(out, "Initialized ({} users)", status.user_count.unwrap_or(0))?;
                if bootstrap {
                    writeln!(out, "Already initialized, nothing to bootstrap")?;
                }
            } else if bootstrap {
                let invite = api.bootstrap().await?;
                writeln!(out, "Register the first administrator with:")?;
                writeln!(out, "  {}", api.invite_link(&invite.token))?;
            } else {
                writeln!(out, "Not initialized. Run `chatgate init --bootstrap`")?;
            }
        }
        Command::Register {
            username,
            display_name,
            password,
            invite,
        } => {
            let user = session
                .register(&username, &display_name, &password, &invite)
                .await?;
            writeln!(out, "Registered as {}", describe(&user))?;
        }
        Command::Login { username, password } => {
            let user = session.login(&username, &password).await?;
            writeln!(out, "Logged in as {}", describe(&user))?;
        }
        Command::Logout => {
            session.logout();
            writeln!(out, "Logged out")?;
        }
        Command::Whoami => match session.verify().await {
            Ok(Some(user)) => writeln!(out, "{}", describe(&user))?,
            Ok(None) => writeln!(out, "Not logged in")?,
            Err(ApiError::Unauthenticated) => writeln!(out, "Session expired, log in again")?,
            Err(e) => {
                warn!("could not verify session: {e}");
                let user = require_user(session)?;
                writeln!(out, "{} (unverified)", describe(&user))?;
            }
        },
        Command::Users => {
            require_user(session)?;
            let users = UsersResource::new(api);
            users.refetch().await?;
            for user in users.items() {
                let online = if user.is_online.unwrap_or(false) {
                    "online"
                } else {
                    "offline"
                };
                writeln!(out, "{}\t{}\t{}", user.id, describe(&user), online)?;
            }
        }
        Command::Chats => {
            let me = require_user(session)?;
            let chats = ChatsResource::new(api);
            chats.refetch().await?;
            for chat in chats.items() {
                let with = chat
                    .counterpart(&me.id)
                    .map(|user| user.display_name.clone())
                    .unwrap_or_else(|| "?".to_string());
                let last = chat
                    .last_message
                    .as_ref()
                    .map(|message| message.body.as_str())
                    .unwrap_or("");
                writeln!(out, "{}\t{}\t{} unread\t{}", chat.id, with, chat.unread_count, last)?;
            }
        }
        Command::Open { user_id } => {
            require_user(session)?;
            let chats = ChatsResource::new(api);
            let chat_id = chats.open_direct(&user_id).await?;
            writeln!(out, "Chat {chat_id}")?;
        }
        Command::Messages { chat_id } => {
            let me = require_user(session)?;
            let messages = MessagesResource::new(api);
            messages.select_chat(Some(chat_id)).await?;
            for message in messages.items() {
                let sender = if message.sender_id == me.id {
                    "you"
                } else {
                    message.sender_id.as_str()
                };
                writeln!(
                    out,
                    "[{}] {}: {}",
                    message.created_at.format("%Y-%m-%d %H:%M"),
                    sender,
                    message.body
                )?;
            }
        }
        Command::Send { chat_id, body } => {
            require_user(session)?;
            let messages = MessagesResource::new(api);
            messages.select_chat(Some(chat_id)).await?;
            let message = messages.send(&body).await?;
            writeln!(out, "Sent message {}", message.id)?;
        }
        Command::Invites { action } => {
            let me = require_user(session)?;
            if !me.is_admin {
                bail!("Invites are managed by administrators");
            }
            run_invites(action, api).await?;
        }
    }

    Ok(())
}

async fn run_invites(action: InviteAction, api: ApiClient) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let invites = InvitesResource::new(api.clone());

    match action {
        InviteAction::List => {
            invites.refetch().await?;
            let now = Utc::now();
            for invite in invites.items() {
                writeln!(
                    out,
                    "{}\t{}\t{}/{} used\t{}\t{}",
                    invite.id,
                    status_label(invite.status_at(now)),
                    invite.used_count,
                    invite.max_uses,
                    expiry_text(invite.expiry_label(now)),
                    api.invite_link(&invite.token)
                )?;
            }
        }
        InviteAction::Create {
            max_uses,
            days_valid,
        } => {
            let invite = invites.create(max_uses, days_valid).await?;
            writeln!(out, "Invite {} created", invite.id)?;
            writeln!(out, "  {}", api.invite_link(&invite.token))?;
        }
        InviteAction::Revoke { invite_id } => {
            invites.revoke(&invite_id).await?;
            writeln!(out, "Invite {invite_id} revoked")?;
        }
    }
    Ok(())
}

fn require_user(session: &SessionController) -> anyhow::Result<User> {
    session
        .current_user()
        .context("Not logged in. Run `chatgate login` first")
}

fn describe(user: &User) -> String {
    let role = if user.is_admin { " [admin]" } else { "" };
    format!(
        "{} {} (@{}){}",
        user.initials(),
        user.display_name,
        user.username,
        role
    )
}

fn status_label(status: InviteStatus) -> &'static str {
    match status {
        InviteStatus::Active => "active",
        InviteStatus::Expired => "expired",
        InviteStatus::UsedUp => "used up",
        InviteStatus::Revoked => "revoked",
    }
}

fn expiry_text(label: ExpiryLabel) -> String {
    match label {
        ExpiryLabel::Expired => "expired".to_string(),
        ExpiryLabel::Today => "expires today".to_string(),
        ExpiryLabel::Tomorrow => "expires tomorrow".to_string(),
        ExpiryLabel::InDays(days) => format!("expires in {days} days"),
    }
}
