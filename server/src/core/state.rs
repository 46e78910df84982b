//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository e le impostazioni dei token
//! necessarie per gestire le richieste.

use crate::core::Config;
use crate::repositories::{ChatRepository, InviteRepository, MessageRepository, UserRepository};
use chrono::Duration;
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per la gestione delle chat
    pub chat: ChatRepository,

    /// Repository per la gestione dei messaggi
    pub msg: MessageRepository,

    /// Repository per la gestione degli inviti
    pub invite: InviteRepository,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Durata dell'access token
    pub access_ttl: Duration,

    /// Durata del refresh token
    pub refresh_ttl: Duration,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e la JWT secret.
    /// Le durate dei token partono dai default (60 minuti, 30 giorni).
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            chat: ChatRepository::new(pool.clone()),
            msg: MessageRepository::new(pool.clone()),
            invite: InviteRepository::new(pool),
            jwt_secret,
            access_ttl: Duration::minutes(60),
            refresh_ttl: Duration::days(30),
        }
    }

    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        Self {
            access_ttl: Duration::minutes(config.access_token_ttl_minutes),
            refresh_ttl: Duration::days(config.refresh_token_ttl_days),
            ..Self::new(pool, config.jwt_secret.clone())
        }
    }
}
