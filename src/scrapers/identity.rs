//! Client identity rotation.
//!
//! Each outbound request carries a `User-Agent` picked at random from a
//! fixed pool of real desktop and mobile browsers, which makes repeated
//! requests from the same process look less uniform to the upstream.

use rand::rng;
use rand::seq::IndexedRandom;

/// Browser identities covering Windows, Linux, macOS and iOS.
pub const USER_AGENTS: [&str; 6] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:117.0) Gecko/20100101 Firefox/117.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 11_1_0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.82 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15A372 Safari/604.1",
];

/// Pick one identity uniformly at random.
pub fn next_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}
