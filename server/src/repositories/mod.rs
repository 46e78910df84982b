//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SU SQLX ************************* //

/*
   Le query usano la forma verificata a run-time (query_as::<_, T> + FromRow) invece
   delle macro query!/query_as!: così il crate compila senza un database raggiungibile
   e i test girano su SQLite in memoria.
   Promemoria sui metodi di fetch:
   .execute(...)         -> INSERT/UPDATE/DELETE, si legge rows_affected / last_insert_rowid
   .fetch_optional(...)  -> zero o una riga
   .fetch_one(...)       -> esattamente una riga (aggregati come COUNT)
   .fetch_all(...)       -> Vec di righe
   Le operazioni che toccano più tabelle passano da una transazione (pool.begin()).
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod chat;
pub mod invite;
pub mod message;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Read};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use chat::ChatRepository;
pub use invite::{InviteRepository, InviteWithCreator};
pub use message::MessageRepository;
pub use user::UserRepository;
