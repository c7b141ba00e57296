use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kinoprobe::browser::{BrowserSession, LaunchOptions};
use kinoprobe::locator::{CdpLocator, ElementLocator};
use kinoprobe::{ExtendedSearchPage, ProbeError};

async fn launch_test_session() -> BrowserSession {
    let options = LaunchOptions {
        sandbox: false,
        ..LaunchOptions::default()
    };
    BrowserSession::launch(&options)
        .await
        .expect("Failed to launch browser")
}

fn fixture_url(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = PathBuf::from(manifest_dir).join("fixtures").join(name);
    format!("file://{}", path.display())
}

async fn open(session: &BrowserSession, fixture: &str) -> ExtendedSearchPage<CdpLocator> {
    let locator = session.locator();
    locator.navigate(&fixture_url(fixture)).await.unwrap();
    ExtendedSearchPage::new(locator)
}

async fn selected_labels(page: &ExtendedSearchPage<CdpLocator>, select_id: &str) -> Vec<String> {
    let js = format!(
        "Array.from(document.getElementById({}).selectedOptions).map(o => o.text)",
        serde_json::to_string(select_id).unwrap()
    );
    page.locator()
        .page()
        .evaluate(js)
        .await
        .unwrap()
        .into_value()
        .unwrap()
}

// ── Movie search ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_by_title() {
    let session = launch_test_session().await;
    let page = open(&session, "advanced.html").await;

    page.set_film_title("Матрица").await.unwrap();
    page.click_search_movies().await.unwrap();

    let results = page.wait_for_movie_results(Duration::from_secs(15)).await.unwrap();
    assert_eq!(results.len(), 3);
    assert!(results[0].text.starts_with("Матрица 1"));
    assert_eq!(page.get_movie_results_count().await.unwrap(), 3);

    let source = page.page_source().await.unwrap().to_lowercase();
    assert!(source.contains("матрица"));

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_set_title_clears_previous_text() {
    let session = launch_test_session().await;
    let page = open(&session, "advanced.html").await;

    page.set_film_title("Брат").await.unwrap();
    page.set_film_title("Матрица").await.unwrap();

    let value: String = page
        .locator()
        .page()
        .evaluate("document.getElementById('find_film').value")
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(value, "Матрица");

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_select_genres_keeps_both() {
    let session = launch_test_session().await;
    let page = open(&session, "advanced.html").await;

    page.select_genres(&["фантастика", "приключения"]).await.unwrap();

    let mut selected = selected_labels(&page, "m_act[genre]").await;
    selected.sort();
    assert_eq!(selected, vec!["приключения", "фантастика"]);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_select_genres_second_call_adds_to_first() {
    let session = launch_test_session().await;
    let page = open(&session, "advanced.html").await;

    page.select_genres(&["драма"]).await.unwrap();
    page.select_genres(&["комедия"]).await.unwrap();

    let mut selected = selected_labels(&page, "m_act[genre]").await;
    selected.sort();
    assert_eq!(selected, vec!["драма", "комедия"]);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_select_unknown_label_fails() {
    let session = launch_test_session().await;
    let page = open(&session, "advanced.html").await;

    let err = page.select_country("Атлантида").await.unwrap_err();
    assert!(matches!(err, ProbeError::NoMatchingOption { .. }));
    assert_eq!(selected_labels(&page, "country").await, vec!["-"]);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_search_by_country_shows_label_and_counter() {
    let session = launch_test_session().await;
    let page = open(&session, "advanced.html").await;

    page.select_country("Россия").await.unwrap();
    page.click_search_movies().await.unwrap();

    assert!(page.is_country_displayed("Россия").await);
    assert_eq!(page.get_results_count().await, 34192);
    assert_eq!(page.get_results_count_text().await, "(34192)");

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_search_by_year_and_genre() {
    let session = launch_test_session().await;
    let page = open(&session, "advanced.html").await;

    page.set_year("2020").await.unwrap();
    page.select_genres(&["фантастика", "приключения"]).await.unwrap();
    page.click_search_movies().await.unwrap();

    assert!(page.get_movie_results_count().await.unwrap() > 0);
    let source = page.page_source().await.unwrap().to_lowercase();
    assert!(source.contains("2020"));
    assert!(source.contains("фантастика"));
    assert!(source.contains("приключения"));

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_missing_results_container_times_out() {
    let session = launch_test_session().await;
    let page = open(&session, "people.html").await;

    let start = std::time::Instant::now();
    let err = page
        .wait_for_movie_results(Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(err.is_timeout());
    assert!(start.elapsed() >= Duration::from_secs(1));

    session.close().await.unwrap();
}

// ── People search ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_actor_on_profile_heading() {
    let session = launch_test_session().await;
    let page = open(&session, "profile.html").await;

    assert!(page.is_actor_in_results("ТОМ ХЭНКС").await);
    assert!(page.is_actor_in_results("том хэнкс").await);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_hidden_counter_reads_as_zero() {
    let session = launch_test_session().await;
    let page = open(&session, "profile.html").await;

    assert_eq!(page.get_results_count().await, 0);
    assert_eq!(page.get_results_count_text().await, "");

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_actor_in_results_summary() {
    let session = launch_test_session().await;
    let page = open(&session, "people.html").await;

    page.set_actor_name("Киану Ривз").await.unwrap();
    page.click_search_actors().await.unwrap();

    // No profile heading here, so this goes through the summary line
    assert!(page.is_actor_in_results("киану ривз").await);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_scoped_session_closes_browser_after_failure() {
    let options = LaunchOptions {
        sandbox: false,
        ..LaunchOptions::default()
    };
    let url = fixture_url("people.html");
    let kept: Arc<Mutex<Option<CdpLocator>>> = Arc::new(Mutex::new(None));
    let slot = kept.clone();

    let result: kinoprobe::Result<()> = BrowserSession::scoped(&options, |locator| async move {
        *slot.lock().unwrap() = Some(locator.clone());
        locator.navigate(&url).await?;
        let page = ExtendedSearchPage::new(locator);
        page.set_film_title("Матрица").await
    })
    .await;

    // people.html has no film title input
    assert!(result.unwrap_err().is_timeout());

    // The page handed to the scenario must be unusable once scoped returns
    let locator = kept.lock().unwrap().take().unwrap();
    let after = tokio::time::timeout(Duration::from_secs(10), locator.page_source())
        .await
        .expect("CDP call on a closed session hung instead of failing");
    assert!(after.is_err());
}

#[tokio::test]
async fn test_scoped_session_closes_browser_after_success() {
    let options = LaunchOptions {
        sandbox: false,
        ..LaunchOptions::default()
    };
    let url = fixture_url("people.html");

    let (locator, source) = BrowserSession::scoped(&options, |locator| async move {
        locator.navigate(&url).await?;
        let source = locator.page_source().await?;
        Ok((locator, source))
    })
    .await
    .unwrap();

    assert!(source.contains("find_people"));
    let after = tokio::time::timeout(Duration::from_secs(10), locator.page_source())
        .await
        .expect("CDP call on a closed session hung instead of failing");
    assert!(after.is_err());
}
