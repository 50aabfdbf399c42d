/// Application constants

// Network
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEVNET_BLOCKCHAIN_ID: &str = "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1";
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

// Programs
pub const MPL_CORE_PROGRAM_ID: &str = "CoREENxT6tW1HoK8ypY1SxRMZTcVPm7R94rH4PZNhX7d";

// Game collection
pub const GAME_COLLECTION_ADDRESS: &str = "5GFo42AMrH5PdEge5DYQZN2ih98UK8iv4PYtGk6kCiHr";
pub const GAME_ASSET_NAME: &str = "Nuke Foot Cockroach";
pub const GAME_ASSET_URI: &str = "https://death.breadheads.io/nuke-foot-cockroach.json";
pub const DEAD_ASSET_NAME: &str = "Dead";
pub const DEAD_ASSET_URI: &str = "https://death.breadheads.io/ded.json";
pub const WINS_ATTRIBUTE_KEY: &str = "Wins";

// Cost of a single play, paid by the player to the authority.
pub const PLAY_FEE_LAMPORTS: u64 = LAMPORTS_PER_SOL / 10_000; // 0.0001 SOL

// Action descriptor
pub const ACTION_PATH: &str = "/api/actions/play";
pub const ACTION_TITLE: &str = "Play Nuke Foot Cockroach";
pub const ACTION_ICON_PATH: &str = "/nuke-foot-cockroach.png";
pub const ACTION_DESCRIPTION: &str = "Mint an NFT to participate in this deadly twist on Rock Paper Scissors. If you win, you get to play again. If you lose, you die and the NFT is burned.";
pub const ACTION_LABEL: &str = "Mint";
pub const ACTION_POST_MESSAGE: &str = "Play Nuke Foot Cockroach";
pub const ACTION_VERSION: &str = "2.1.3";

// DAS
pub const DAS_PAGE_LIMIT: u32 = 1000;
pub const DAS_MAX_PAGES: u32 = 50;
