//! Signed-in context shared by every command.

use tracing::info;

use fieldwork_client::auth::AuthClient;
use fieldwork_client::config::{Credentials, SupabaseConfig};
use fieldwork_client::store::SupabaseStore;
use fieldwork_core::ActorId;

/// An authorized store plus the actor it is scoped to.
pub struct Context {
    pub store: SupabaseStore,
    pub actor: ActorId,
}

impl Context {
    /// Load configuration, sign in, and build an actor-scoped store.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or the auth service
    /// rejects the credentials.
    pub async fn sign_in() -> Result<Self, Box<dyn std::error::Error>> {
        let config = SupabaseConfig::from_env()?;
        let credentials = Credentials::from_env()?;

        let session = AuthClient::new(&config)
            .sign_in(&credentials.email, &credentials.password)
            .await?;
        info!(actor = %session.actor(), "signed in");

        let store = SupabaseStore::new(&config).authorized(&session);

        Ok(Self {
            store,
            actor: session.actor(),
        })
    }
}
