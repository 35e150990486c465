use tracing::{debug, warn};

#[derive(Clone)]
pub struct UserService {
    user_pool_id: Option<String>,
}

impl UserService {
    pub fn new(user_pool_id: Option<String>) -> Self {
        Self { user_pool_id }
    }

    /// Confirms a profile update. Nothing is written to the user directory.
    pub fn update_profile(&self, name: &str) -> String {
        debug!(user_pool_id = ?self.user_pool_id, "Profile update received");
        // TODO: write the name to the user pool as the `name` attribute once the handler is given directory credentials.
        warn!("Profile update for {:?} is not persisted", name);
        format!("User updated: {}", name)
    }
}
