use crate::criteria::SearchCriteria;
use crate::error::{ProbeError, Result};
use crate::locator::ElementLocator;
use crate::page::ExtendedSearchPage;

pub const ACTORS: &[&str] = &["Киану Ривз", "Александр Устюгов", "Том Хэнкс"];

/// One advanced-search check, run against its own browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiScenario {
    SearchByTitle,
    SearchByCountry,
    SearchByYear,
    SearchByGenre,
    SearchByActor(&'static str),
}

impl UiScenario {
    pub fn all() -> Vec<UiScenario> {
        let mut all = vec![
            UiScenario::SearchByTitle,
            UiScenario::SearchByCountry,
            UiScenario::SearchByYear,
            UiScenario::SearchByGenre,
        ];
        all.extend(ACTORS.iter().copied().map(UiScenario::SearchByActor));
        all
    }

    pub fn name(&self) -> String {
        match self {
            UiScenario::SearchByTitle => "search_by_title".into(),
            UiScenario::SearchByCountry => "search_by_country".into(),
            UiScenario::SearchByYear => "search_by_year".into(),
            UiScenario::SearchByGenre => "search_by_genre".into(),
            UiScenario::SearchByActor(name) => format!("search_by_actor[{}]", name),
        }
    }

    pub async fn run<L: ElementLocator>(&self, page: &ExtendedSearchPage<L>) -> Result<()> {
        match self {
            UiScenario::SearchByTitle => search_by_title(page).await,
            UiScenario::SearchByCountry => search_by_country(page).await,
            UiScenario::SearchByYear => search_by_year(page).await,
            UiScenario::SearchByGenre => search_by_genre(page).await,
            UiScenario::SearchByActor(name) => search_by_actor(page, name).await,
        }
    }
}

fn check(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ProbeError::Assertion(message()))
    }
}

async fn search_movies<L: ElementLocator>(
    page: &ExtendedSearchPage<L>,
    criteria: &SearchCriteria,
) -> Result<usize> {
    page.open_advanced_search().await?;
    page.fill(criteria).await?;
    page.click_search_movies().await?;
    let count = page.get_movie_results_count().await?;
    check(count > 0, || "No results for the query".into())?;
    Ok(count)
}

#[tracing::instrument(skip_all)]
pub async fn search_by_title<L: ElementLocator>(page: &ExtendedSearchPage<L>) -> Result<()> {
    search_movies(page, &SearchCriteria::new().title("Матрица")).await?;
    let source = page.page_source().await?.to_lowercase();
    check(source.contains("матрица"), || {
        "Film title not found in results".into()
    })
}

#[tracing::instrument(skip_all)]
pub async fn search_by_country<L: ElementLocator>(page: &ExtendedSearchPage<L>) -> Result<()> {
    page.open_advanced_search().await?;
    page.select_country("Россия").await?;
    page.click_search_movies().await?;

    check(page.is_country_displayed("Россия").await, || {
        "Country «Россия» is not shown in the results".into()
    })?;

    let count = page.get_results_count().await;
    check(count > 0, || format!("Results count is {}, expected > 0", count))?;

    let text = page.get_results_count_text().await;
    let expected = format!("({})", count);
    check(text == expected, || {
        format!("Counter format mismatch: got {:?}, expected {:?}", text, expected)
    })
}

#[tracing::instrument(skip_all)]
pub async fn search_by_year<L: ElementLocator>(page: &ExtendedSearchPage<L>) -> Result<()> {
    search_movies(page, &SearchCriteria::new().year("2020")).await?;
    let source = page.page_source().await?;
    check(source.contains("2020"), || "Year not found in results".into())
}

#[tracing::instrument(skip_all)]
pub async fn search_by_genre<L: ElementLocator>(page: &ExtendedSearchPage<L>) -> Result<()> {
    let genres = ["фантастика", "приключения"];
    search_movies(page, &SearchCriteria::new().genres(genres)).await?;
    let source = page.page_source().await?.to_lowercase();
    for genre in genres {
        check(source.contains(genre), || format!("Genre «{}» not found", genre))?;
    }
    Ok(())
}

#[tracing::instrument(skip(page))]
pub async fn search_by_actor<L: ElementLocator>(page: &ExtendedSearchPage<L>, name: &str) -> Result<()> {
    page.open_people_search().await?;
    page.set_actor_name(name).await?;
    page.click_search_actors().await?;
    check(page.is_actor_in_results(name).await, || {
        format!("Actor «{}» not found in search results", name)
    })
}
