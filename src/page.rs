use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::criteria::SearchCriteria;
use crate::error::{ProbeError, Result, ResultExt};
use crate::locator::{Element, ElementLocator, Readiness};
use crate::selectors::{xpath, Selector};

pub const DEFAULT_SITE_URL: &str = "https://www.kinopoisk.ru";

/// Deadline for form controls to become clickable.
pub const CONTROL_TIMEOUT: Duration = Duration::from_secs(10);
/// Default deadline for the movie results container.
pub const RESULTS_TIMEOUT: Duration = Duration::from_secs(15);
/// Deadline for the country label and the results counter.
pub const LABEL_TIMEOUT: Duration = Duration::from_secs(5);
/// Deadline for each stage of the actor lookup.
pub const ACTOR_STAGE_TIMEOUT: Duration = Duration::from_secs(10);

const FILM_TITLE_INPUT: &str = "find_film";
const COUNTRY_SELECT: &str = "country";
const YEAR_INPUT: &str = "year";
const GENRE_SELECT: &str = "m_act[genre]";
const ACTOR_INPUT: &str = "find_people";
const MOVIE_SEARCH_BUTTON: &str = "//input[@class='el_18 submit nice_button' and @value='поиск']";
const ACTOR_SEARCH_BUTTON: &str = "//input[@class='el_8 submit nice_button' and @value='поиск']";
const RESULTS_CONTAINER: &str = "div.search_results";
const RESULT_ITEMS: &str = "div.search_results div.element";
const RESULTS_COUNTER: &str = "font[color='#0000555']";
const ACTOR_PROFILE_HEADING: &str =
    "h1.styles_primaryName__LB_CC.styles_root__krgW7.styles_rootInLight__8xmQ4[data-tid='f22e0093']";
const ACTOR_RESULTS_SUMMARY: &str = "span.search_results_topText";

fn count_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\((\d+)\)$").expect("static regex"))
}

/// Parse a results counter of the form `(N)`.
pub fn parse_results_count(text: &str) -> Option<u64> {
    count_pattern()
        .captures(text.trim())
        .and_then(|caps| caps[1].parse().ok())
}

fn country_label(country: &str) -> Selector {
    Selector::xpath(format!(
        "//span[@class='text-blue' and text()={}]",
        xpath::literal(&format!("«{}»", country))
    ))
}

/// Page object for the advanced search forms.
///
/// Every operation waits for its control with a bounded deadline before
/// touching it. Result fetching ([`Self::wait_for_movie_results`],
/// [`Self::get_movie_results_count`]) propagates timeouts. Label checks
/// (country label, results counter, actor name) turn any failure into
/// `false`, `0` or `""`, since a missing label is the outcome being checked.
pub struct ExtendedSearchPage<L> {
    locator: L,
    site_url: String,
}

impl<L: ElementLocator> ExtendedSearchPage<L> {
    pub fn new(locator: L) -> Self {
        Self::with_site_url(locator, DEFAULT_SITE_URL)
    }

    pub fn with_site_url(locator: L, site_url: impl Into<String>) -> Self {
        Self {
            locator,
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    // ── Navigation ──────────────────────────────────────────────────────

    #[tracing::instrument(skip(self))]
    pub async fn open_advanced_search(&self) -> Result<()> {
        self.locator
            .navigate(&format!("{}/s/advanced/", self.site_url))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn open_people_search(&self) -> Result<()> {
        self.locator
            .navigate(&format!("{}/s/people/", self.site_url))
            .await
    }

    pub async fn page_source(&self) -> Result<String> {
        self.locator.page_source().await
    }

    // ── Form input ──────────────────────────────────────────────────────

    #[tracing::instrument(skip(self))]
    pub async fn set_film_title(&self, title: &str) -> Result<()> {
        self.type_into(&Selector::id(FILM_TITLE_INPUT), title).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn select_country(&self, country: &str) -> Result<()> {
        let select = self.clickable(&Selector::id(COUNTRY_SELECT)).await?;
        self.locator.select_by_visible_text(&select, country).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_year(&self, year: &str) -> Result<()> {
        self.type_into(&Selector::id(YEAR_INPUT), year).await
    }

    /// Add each genre to the selection, in order. Earlier selections stay.
    #[tracing::instrument(skip(self))]
    pub async fn select_genres<S: AsRef<str> + std::fmt::Debug>(&self, genres: &[S]) -> Result<()> {
        let select = self.clickable(&Selector::id(GENRE_SELECT)).await?;
        for genre in genres {
            self.locator
                .select_by_visible_text(&select, genre.as_ref())
                .await?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_actor_name(&self, name: &str) -> Result<()> {
        self.type_into(&Selector::id(ACTOR_INPUT), name).await
    }

    /// Apply every filter that is set: title, country, year, genres, actor.
    pub async fn fill(&self, criteria: &SearchCriteria) -> Result<()> {
        if let Some(title) = &criteria.title {
            self.set_film_title(title).await?;
        }
        if let Some(country) = &criteria.country {
            self.select_country(country).await?;
        }
        if let Some(year) = &criteria.year {
            self.set_year(year).await?;
        }
        if !criteria.genres.is_empty() {
            self.select_genres(criteria.genres.as_slice()).await?;
        }
        if let Some(actor) = &criteria.actor {
            self.set_actor_name(actor).await?;
        }
        Ok(())
    }

    // ── Submit ──────────────────────────────────────────────────────────

    #[tracing::instrument(skip(self))]
    pub async fn click_search_movies(&self) -> Result<()> {
        let button = self.clickable(&Selector::xpath(MOVIE_SEARCH_BUTTON)).await?;
        self.locator.click(&button).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn click_search_actors(&self) -> Result<()> {
        let button = self.clickable(&Selector::xpath(ACTOR_SEARCH_BUTTON)).await?;
        self.locator.click(&button).await
    }

    // ── Results ─────────────────────────────────────────────────────────

    /// Wait for the results container, then return every result item in it.
    /// A container that never shows up is an error, not an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn wait_for_movie_results(&self, timeout: Duration) -> Result<Vec<Element>> {
        self.locator
            .wait_until(&Selector::css(RESULTS_CONTAINER), Readiness::Present, timeout)
            .await?;
        self.locator.find_all(&Selector::css(RESULT_ITEMS)).await
    }

    pub async fn get_movie_results_count(&self) -> Result<usize> {
        Ok(self.wait_for_movie_results(RESULTS_TIMEOUT).await?.len())
    }

    #[tracing::instrument(skip(self))]
    pub async fn is_country_displayed(&self, country: &str) -> bool {
        self.locator
            .wait_until(&country_label(country), Readiness::Visible, LABEL_TIMEOUT)
            .await
            .map(|label| label.displayed)
            .value_or(false)
    }

    /// Number from the `(N)` counter, `0` when it is missing or malformed.
    #[tracing::instrument(skip(self))]
    pub async fn get_results_count(&self) -> u64 {
        self.read_counter()
            .await
            .and_then(|text| parse_results_count(&text).ok_or(ProbeError::UnparsableCount(text)))
            .value_or(0)
    }

    /// The `(N)` counter text, `""` when it is missing or malformed.
    #[tracing::instrument(skip(self))]
    pub async fn get_results_count_text(&self) -> String {
        self.read_counter()
            .await
            .and_then(|text| {
                if count_pattern().is_match(&text) {
                    Ok(text)
                } else {
                    Err(ProbeError::UnparsableCount(text))
                }
            })
            .value_or_default()
    }

    /// Look for the actor on a profile page heading first, then in the
    /// search results summary. Both checks ignore case.
    #[tracing::instrument(skip(self))]
    pub async fn is_actor_in_results(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        let stages = [
            Selector::css(ACTOR_PROFILE_HEADING),
            Selector::css(ACTOR_RESULTS_SUMMARY),
        ];

        for selector in &stages {
            let matched = self
                .locator
                .wait_until(selector, Readiness::Present, ACTOR_STAGE_TIMEOUT)
                .await
                .map(|element| element.text.to_lowercase().contains(&needle))
                .value_or(false);
            if matched {
                return true;
            }
        }
        false
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    async fn clickable(&self, selector: &Selector) -> Result<Element> {
        self.locator
            .wait_until(selector, Readiness::Clickable, CONTROL_TIMEOUT)
            .await
    }

    async fn type_into(&self, selector: &Selector, text: &str) -> Result<()> {
        let input = self.clickable(selector).await?;
        self.locator.clear_and_type(&input, text).await
    }

    async fn read_counter(&self) -> Result<String> {
        self.locator
            .wait_until(&Selector::css(RESULTS_COUNTER), Readiness::Visible, LABEL_TIMEOUT)
            .await
            .map(|counter| counter.text.trim().to_string())
    }
}
