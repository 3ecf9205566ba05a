// src/config/consts.rs

// Net config
pub const EVENTS_URL: &str = "https://leekduck.com/events/";
pub const SITE_ROOT: &str = "https://leekduck.com/";
pub const EVENTS_PATH_PREFIX: &str = "/events/";
pub const IMG_CDN_PREFIX: &str = "/cdn-cgi/image/fit=scale-down,height=95,quality=100,format=webp/";
pub const USER_AGENT: &str = concat!("pogo_cal/", env!("CARGO_PKG_VERSION"));
pub const FETCH_TIMEOUT_SECS: u64 = 15;

// Local cache
pub const DEFAULT_CACHE_FILE: &str = "events.json";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const NEXT_UPDATE_FALLBACK_HOURS: i64 = 24;

// Dates
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%#z";

// Scrape
pub const MAX_SIBLING_DEPTH: usize = 8;

// Export
pub const DEFAULT_CALENDAR_FILE: &str = "cal.ics";
pub const REMINDER_MINUTES: [i64; 3] = [30, 60, 180];

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
