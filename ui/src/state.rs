use accounts_business::{BusinessConfig, ConfigError, Session, build_state_ctx};
use accounts_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::new(BusinessConfig::default(), Session::default())
    }
}

impl State {
    pub fn new(config: BusinessConfig, session: Session) -> Self {
        Self {
            ctx: build_state_ctx(config, session),
        }
    }

    /// Reads `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let (config, session) = BusinessConfig::from_env()?;
        Ok(Self::new(config, session))
    }

    pub fn test(base_url: impl Into<String>, token: Option<&str>) -> Self {
        Self::new(
            BusinessConfig::new(base_url),
            Session::new(token.map(str::to_owned)),
        )
    }

    /// Replaces the session token, e.g. with the one from persistent storage.
    pub fn sign_in(&mut self, token: impl Into<String>) {
        let session = Session::with_token(token);
        self.ctx.update::<Session>(|s| *s = session);
    }

    pub fn token(&self) -> Option<&str> {
        self.ctx.state::<Session>().token()
    }
}
