//! Operazioni comuni dei repository

/// Inserisce una riga a partire dal DTO e restituisce l'entità con l'id assegnato da SQLite
pub trait Create<Entity, CreateDTO> {
    async fn create(&self, data: &CreateDTO) -> Result<Entity, sqlx::Error>;
}

/// Lettura per chiave primaria; `Ok(None)` se la riga non esiste
pub trait Read<Entity, Id> {
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}
