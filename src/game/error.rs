/// Errors raised while constructing a game.
///
/// Nothing that happens during play is an error: illegal moves
/// are resolved as eliminations so every game reaches an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    PlayerCount(usize),
    Token(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerCount(n) => write!(
                f,
                "unsupported player count {} (expected {}..={})",
                n,
                crate::MIN_PLAYERS,
                crate::MAX_PLAYERS
            ),
            Self::Token(s) => write!(f, "invalid game token: {}", s),
        }
    }
}

impl std::error::Error for GameError {}
