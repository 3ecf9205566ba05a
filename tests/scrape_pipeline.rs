// tests/scrape_pipeline.rs
use std::collections::HashMap;
use std::path::Path;

use pogo_cal::config::consts::EVENTS_URL;
use pogo_cal::config::options::{AppOptions, CacheOptions, ScrapeOptions};
use pogo_cal::core::net::Fetcher;
use pogo_cal::event::{BONUSES_KEY, FEATURED_KEY, SHINY_KEY};
use pogo_cal::progress::NullProgress;
use pogo_cal::{ics, CacheState, ContentValue, Error, EventType, Moment, Refresher, Result};

struct Pages(HashMap<String, String>);

impl Fetcher for Pages {
    fn fetch_text(&self, url: &str) -> Result<String> {
        self.0.get(url).cloned().ok_or_else(|| Error::Fetch { url: url.into(), reason: "HTTP 404".into() })
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.fetch_text(url).map(String::into_bytes)
    }
}

fn entry(slug: &str, label: &str, name: &str, start: &str, end: &str, local: bool) -> String {
    format!(r#"
        <span class="event-header-item-wrapper">
          <h5 data-event-start-date="{start}" data-event-end-date="{end}" data-event-local-time="{local}"></h5>
          <a class="event-item-link hide-event" href="/events/{slug}/">
            <div class="event-item-wrapper">
              <p>{label}</p>
              <img src="/cdn-cgi/image/fit=scale-down,height=95,quality=100,format=webp/assets/img/events/{slug}.jpg">
              <h2>{name}</h2>
            </div>
          </a>
        </span>"#)
}

fn site() -> Pages {
    let upcoming = [
        entry("pikachu-raids", "Raid Battles", "Pikachu in Raids", "2024-03-08 10:00:00", "2024-03-12 20:00:00", true),
        entry("bulbasaur-cd", "Community Day", "Bulbasaur Community Day", "2024-03-09 14:00:00", "2024-03-09 17:00:00", true),
        entry("eevee-spotlight", "Pokémon Spotlight Hour", "Eevee Spotlight Hour", "2024-03-12 18:00:00", "2024-03-12 19:00:00", true),
        entry("gbl", "GO Battle League", "Battle Week", "2024-03-13T00:00:00+0000", "2024-03-20T00:00:00+0000", false),
    ]
    .concat();
    let index = format!(
        r#"<html><body><div class="page-content">
             <div class="current-events"></div>
             <div class="upcoming-events">{upcoming}</div>
           </div></body></html>"#
    );

    let mut pages = HashMap::new();
    pages.insert(EVENTS_URL.to_string(), index);
    pages.insert(
        format!("{EVENTS_URL}pikachu-raids/"),
        r##"<div class="event-toc"><a class="event-toc-graphic" href="#g">G</a><a href="#shiny">Shiny</a></div>
            <h2 id="raids">Raids</h2><p>Five-star</p>
            <ul class="pkmn-list-flex">
              <li><div class="pkmn-name">Pikachu (Flying)</div></li>
              <li><div class="pkmn-name">Raichu</div></li>
            </ul>"##
            .to_string(),
    );
    pages.insert(
        format!("{EVENTS_URL}bulbasaur-cd/"),
        r#"<article class="event-page"><h1 class="page-title">Bulbasaur Community Day</h1>
             <div class="bonus-text">2x Candy*</div><div class="bonus-text">3x Stardust</div></article>"#
            .to_string(),
    );
    // eevee-spotlight is missing: that event is skipped
    Pages(pages)
}

fn options(cache: &Path) -> AppOptions {
    AppOptions {
        scrape: ScrapeOptions { request_pause_ms: 0, ..ScrapeOptions::default() },
        cache: CacheOptions { path: cache.to_path_buf() },
        ..AppOptions::default()
    }
}

fn now() -> Moment {
    Moment::parse_canonical("2024-03-01 00:00:00").unwrap()
}

#[test]
fn scrape_to_cache_to_calendar() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(&dir.path().join("events.json"));
    let fetcher = site();
    let mut progress = NullProgress;
    let mut refresher = Refresher::new(&fetcher, &opts, &mut progress);

    let events = refresher.load_at(now()).unwrap();
    assert_eq!(refresher.state(), CacheState::LoadedFresh);
    assert!(refresher.transitions().contains(&CacheState::Persisted));

    let names: Vec<_> = events.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["Battle Week", "Bulbasaur Community Day", "Pikachu in Raids"]);

    let raids = events.raid_battles();
    assert_eq!(raids[0].featured_pokemons(), ["FLYING_PIKACHU", "RAICHU"]);
    assert_eq!(raids[0].content().get(SHINY_KEY), Some(&ContentValue::Flag(true)));

    let cd = events.of_types(&[EventType::CommunityDay]);
    assert_eq!(cd[0].featured_pokemons(), ["BULBASAUR"]);
    assert_eq!(
        cd[0].content().get(BONUSES_KEY),
        Some(&ContentValue::List(vec!["2x Candy".into(), "3x Stardust".into()]))
    );
    assert_eq!(cd[0].img_url(), "https://leekduck.com/assets/img/events/bulbasaur-cd.jpg");
    assert!(events.featuring(&["raichu"], false).len() == 1);
    assert!(events.with_name_like("battle")[0].content().get(FEATURED_KEY).is_none());

    let out = dir.path().join("cal.ics");
    let categorized = events.of_types(&EventType::all());
    ics::export(&out, &categorized, now()).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.matches("BEGIN:VEVENT").count(), 2);
    assert_eq!(text.matches("BEGIN:VALARM").count(), 6);
    assert!(!text.contains("Battle Week"));
}

#[test]
fn second_load_uses_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(&dir.path().join("events.json"));
    let mut progress = NullProgress;
    let first = Refresher::new(&site(), &opts, &mut progress).load_at(now()).unwrap();

    // an empty site would fail any scrape
    let offline = Pages(HashMap::new());
    let mut progress = NullProgress;
    let mut refresher = Refresher::new(&offline, &opts, &mut progress);
    let cached = refresher.load_at(now()).unwrap();
    assert_eq!(refresher.transitions(), [CacheState::Uninitialized, CacheState::LoadedFresh]);
    assert_eq!(cached, first);
}

#[test]
fn images_land_in_the_assets_dir() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(&dir.path().join("events.json"));
    opts.scrape.download_images = true;
    opts.scrape.assets_dir = dir.path().join("assets");

    let mut fetcher = site();
    fetcher.0.insert("https://leekduck.com/assets/img/events/bulbasaur-cd.jpg".into(), "jpg".into());
    let mut progress = NullProgress;
    Refresher::new(&fetcher, &opts, &mut progress).load_at(now()).unwrap();

    assert!(dir.path().join("assets").join("bulbasaur-cd.jpg").is_file());
    assert!(!dir.path().join("assets").join("pikachu-raids.jpg").exists());
}
