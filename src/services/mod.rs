// All service modules
pub mod game;
pub mod mpl_core;
pub mod onchain;
pub mod play;

// Re-export for convenience
pub use game::RandomChoice;
pub use onchain::SolanaRpcClient;
