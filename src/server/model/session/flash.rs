use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{
    model::api::{FlashDto, FlashLevel},
    server::error::Error,
};

pub const SESSION_FLASH_KEY: &str = "branchdesk:flash";

/// Messages queued by a write and shown once by the next listing
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionFlash(pub Vec<FlashDto>);

impl SessionFlash {
    /// Append a message to the pending messages
    pub async fn push(
        session: &Session,
        level: FlashLevel,
        message: impl Into<String>,
    ) -> Result<(), Error> {
        let mut pending = session
            .get::<SessionFlash>(SESSION_FLASH_KEY)
            .await?
            .unwrap_or_default();

        pending.0.push(FlashDto {
            level,
            message: message.into(),
        });

        session.insert(SESSION_FLASH_KEY, pending).await?;

        Ok(())
    }

    pub async fn success(session: &Session, message: impl Into<String>) -> Result<(), Error> {
        Self::push(session, FlashLevel::Success, message).await
    }

    pub async fn warning(session: &Session, message: impl Into<String>) -> Result<(), Error> {
        Self::push(session, FlashLevel::Warning, message).await
    }

    /// Remove and return every pending message
    pub async fn take(session: &Session) -> Result<Vec<FlashDto>, Error> {
        let pending = session.remove::<SessionFlash>(SESSION_FLASH_KEY).await?;

        Ok(pending.map(|SessionFlash(messages)| messages).unwrap_or_default())
    }
}
