use mockito::{Matcher, Server, ServerGuard};
use recipe_finder::render::{self, html};
use recipe_finder::{App, DietTag, EdamamClient, FavoritesStore, MemoryStore, ResultsState};
use scraper::{Html, Selector};
use std::time::Duration;

fn hits_body(labels: &[&str]) -> String {
    let hits: Vec<String> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            format!(
                r#"{{"recipe": {{
                    "uri": "http://www.edamam.com/ontologies/edamam.owl#recipe_{i}",
                    "label": "{label}",
                    "image": "https://img.example.com/{i}.jpg",
                    "url": "https://example.com/recipes/{i}",
                    "yield": 4.0,
                    "calories": 640.4,
                    "ingredientLines": ["200 g pasta", "1 tbsp olive oil"],
                    "totalNutrients": {{
                        "PROCNT": {{"label": "Protein", "quantity": 22.6, "unit": "g"}}
                    }}
                }}}}"#
            )
        })
        .collect();
    format!(r#"{{"from": 1, "to": {}, "hits": [{}]}}"#, labels.len(), hits.join(","))
}

fn app_for(server: &ServerGuard) -> App<EdamamClient, MemoryStore> {
    let client = EdamamClient::with_credentials(
        server.url(),
        "app-id".to_string(),
        "app-key".to_string(),
        "user".to_string(),
        Duration::from_secs(5),
    )
    .unwrap();
    App::new(client, FavoritesStore::load(MemoryStore::new()))
}

fn results_html(app: &App<EdamamClient, MemoryStore>) -> Html {
    let page = render::page_view(app);
    Html::parse_fragment(&html::render_results(&page.results))
}

fn texts(document: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect()
}

#[tokio::test]
async fn test_search_with_no_hits() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/recipes/v2")
        .match_query(Matcher::UrlEncoded("q".into(), "chicken".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(hits_body(&[]))
        .create_async()
        .await;

    let mut app = app_for(&server);
    assert!(app.submit_search("chicken").await);

    let document = results_html(&app);
    assert_eq!(
        texts(&document, "#resultsInfo"),
        vec!["No recipes found for \"chicken\".".to_string()]
    );
    assert!(texts(&document, ".card").is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_with_three_hits_keeps_api_order() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/recipes/v2")
        .match_query(Matcher::UrlEncoded("q".into(), "pasta".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(hits_body(&["Pesto Pasta", "Aglio e Olio", "Cacio e Pepe"]))
        .create_async()
        .await;

    let mut app = app_for(&server);
    app.submit_search("pasta").await;

    let document = results_html(&app);
    assert_eq!(
        texts(&document, "#resultsInfo"),
        vec!["Found 3 recipes for \"pasta\"".to_string()]
    );
    assert_eq!(
        texts(&document, ".card .card-title"),
        vec!["Pesto Pasta", "Aglio e Olio", "Cacio e Pepe"]
    );
    assert_eq!(texts(&document, ".card .meta")[0], "640 kcal • 4 servings");
}

#[tokio::test]
async fn test_diet_filter_without_query_does_not_fetch() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/recipes/v2")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut app = app_for(&server);
    assert!(!app.select_diet(DietTag::Balanced).await);
    assert_eq!(app.search().diet, Some(DietTag::Balanced));
    assert!(matches!(app.results(), ResultsState::Idle));

    let page = render::page_view(&app);
    let active: Vec<_> = page
        .diet_buttons
        .iter()
        .filter(|b| b.active)
        .map(|b| b.value)
        .collect();
    assert_eq!(active, vec!["balanced"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_diet_filter_refetches_existing_query() {
    let mut server = Server::new_async().await;
    let plain = server
        .mock("GET", "/api/recipes/v2")
        .match_query(Matcher::UrlEncoded("q".into(), "salad".into()))
        .with_status(200)
        .with_body(hits_body(&["Greek Salad"]))
        .expect(1)
        .create_async()
        .await;

    let mut app = app_for(&server);
    app.submit_search("salad").await;
    plain.assert_async().await;
    plain.remove_async().await;

    let filtered = server
        .mock("GET", "/api/recipes/v2")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "salad".into()),
            Matcher::UrlEncoded("diet".into(), "high-protein".into()),
        ]))
        .with_status(200)
        .with_body(hits_body(&["Chicken Salad", "Tuna Salad"]))
        .expect(1)
        .create_async()
        .await;

    assert!(app.select_diet(DietTag::HighProtein).await);
    assert_eq!(app.results().recipes().len(), 2);
    filtered.assert_async().await;
}

#[tokio::test]
async fn test_error_status_replaces_previous_cards() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("GET", "/api/recipes/v2")
        .match_query(Matcher::UrlEncoded("q".into(), "pasta".into()))
        .with_status(200)
        .with_body(hits_body(&["A", "B"]))
        .create_async()
        .await;
    let failing = server
        .mock("GET", "/api/recipes/v2")
        .match_query(Matcher::UrlEncoded("q".into(), "soup".into()))
        .with_status(429)
        .with_body(r#"{"status": "error", "message": "Usage limits are exceeded"}"#)
        .create_async()
        .await;

    let mut app = app_for(&server);
    app.submit_search("pasta").await;
    assert_eq!(texts(&results_html(&app), ".card").len(), 2);

    app.submit_search("soup").await;
    let document = results_html(&app);
    assert_eq!(
        texts(&document, "#resultsInfo.error"),
        vec!["Error fetching recipes.".to_string()]
    );
    assert!(texts(&document, ".card").is_empty());

    ok.assert_async().await;
    failing.assert_async().await;
}

#[tokio::test]
async fn test_malformed_response_is_an_error_state() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/recipes/v2")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let mut app = app_for(&server);
    app.submit_search("bread").await;
    assert!(matches!(app.results(), ResultsState::Failed { .. }));
}
