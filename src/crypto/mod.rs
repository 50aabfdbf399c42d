pub mod keypair;

pub use keypair::{keypair_from_json, parse_account, parse_address};
