mod common;

use common::{catalogue, engine, settle_within, url, ScriptedProvider};
use gifscout::{ErrorKind, Gif, ProviderError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn query_is_sent_once_after_the_debounce() {
    let provider = Arc::new(ScriptedProvider::new(catalogue(10)));
    let mut engine = engine(&provider, 5);

    engine.set_query("cats");
    assert_eq!(engine.state().query, "cats");
    assert!(engine.state().is_loading);

    sleep(Duration::from_millis(1499)).await;
    assert!(provider.calls().is_empty());

    let state = engine.settle().await;
    assert_eq!(provider.queries(), vec!["cats"]);
    assert_eq!(provider.calls()[0].limit, 5);
    assert_eq!(state.results.len(), 5);
    assert!(!state.is_loading);
    assert!(state.can_load_more);
    assert_eq!(state.error, None);
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_only_searches_the_last_query() {
    let provider = Arc::new(ScriptedProvider::new(catalogue(10)));
    let mut engine = engine(&provider, 5);

    engine.set_query("c");
    sleep(Duration::from_millis(500)).await;
    engine.set_query("ca");
    sleep(Duration::from_millis(500)).await;
    engine.set_query("cats");

    let state = engine.settle().await;
    assert_eq!(provider.queries(), vec!["cats"]);
    assert_eq!(state.query, "cats");
    assert_eq!(state.results[0], url("cats", 0));
}

#[tokio::test(start_paused = true)]
async fn clearing_the_query_cancels_the_pending_search() {
    let provider = Arc::new(ScriptedProvider::new(catalogue(10)));
    let mut engine = engine(&provider, 5);

    engine.set_query("cats");
    engine.set_query("");

    let state = engine.state();
    assert_eq!(state.query, "");
    assert!(state.results.is_empty());
    assert!(!state.is_loading);
    assert!(state.can_load_more);

    assert!(settle_within(&mut engine, Duration::from_secs(5)).await.is_none());
    assert!(provider.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn whitespace_query_is_blank() {
    let provider = Arc::new(ScriptedProvider::new(catalogue(10)));
    let mut engine = engine(&provider, 5);

    engine.set_query("cats");
    engine.settle().await;
    engine.set_query("  \t ");

    assert!(engine.state().results.is_empty());
    assert!(!engine.state().is_loading);
    assert!(!engine.load_more());
    assert!(settle_within(&mut engine, Duration::from_secs(5)).await.is_none());
    assert_eq!(provider.queries(), vec!["cats"]);
}

#[tokio::test(start_paused = true)]
async fn in_flight_fetch_is_cancelled_by_a_new_query() {
    let provider = Arc::new(
        ScriptedProvider::new(catalogue(10)).delay("cats", 0, Duration::from_secs(10)),
    );
    let mut engine = engine(&provider, 5);

    engine.set_query("cats");
    sleep(Duration::from_millis(1600)).await;
    assert_eq!(provider.queries(), vec!["cats"]);

    engine.set_query("dogs");
    let state = engine.settle().await;
    assert_eq!(state.query, "dogs");
    assert_eq!(state.results[0], url("dogs", 0));

    sleep(Duration::from_secs(20)).await;
    assert!(settle_within(&mut engine, Duration::from_secs(1)).await.is_none());
    assert_eq!(engine.state().results[0], url("dogs", 0));
}

#[tokio::test(start_paused = true)]
async fn completion_of_a_superseded_query_is_discarded() {
    let provider = Arc::new(ScriptedProvider::new(catalogue(10)));
    let mut engine = engine(&provider, 5);

    engine.set_query("cats");
    // The "cats" fetch finishes and queues its completion without being applied.
    sleep(Duration::from_millis(2000)).await;
    assert_eq!(provider.queries(), vec!["cats"]);

    engine.set_query("dogs");
    let state = engine.settle().await;

    assert_eq!(state.query, "dogs");
    assert!(state.results.iter().all(|u| u.contains("/dogs/")));
    assert_eq!(provider.queries(), vec!["cats", "dogs"]);
}

#[tokio::test(start_paused = true)]
async fn load_more_for_an_old_query_is_discarded() {
    let provider = Arc::new(
        ScriptedProvider::new(catalogue(10)).delay("cats", 3, Duration::from_secs(5)),
    );
    let mut engine = engine(&provider, 3);

    engine.set_query("cats");
    engine.settle().await;
    assert!(engine.load_more());

    engine.set_query("dogs");
    let state = engine.settle().await;
    assert_eq!(state.results.len(), 3);

    sleep(Duration::from_secs(10)).await;
    assert!(settle_within(&mut engine, Duration::from_secs(1)).await.is_none());

    let state = engine.state();
    assert_eq!(state.query, "dogs");
    assert_eq!(state.results.len(), 3);
    assert!(state.results.iter().all(|u| u.contains("/dogs/")));
    assert_eq!(engine.offset(), 3);
}

#[tokio::test(start_paused = true)]
async fn single_result_ends_pagination() {
    let provider = Arc::new(ScriptedProvider::new(|query, _, _| {
        Ok(if query == "cats" {
            vec![Gif::new("1", "Cat", "http://cat.gif")]
        } else {
            Vec::new()
        })
    }));
    let mut engine = engine(&provider, 50);

    engine.set_query("cats");
    let state = engine.settle().await;

    assert_eq!(state.results.to_vec(), vec!["http://cat.gif".to_string()]);
    assert!(!state.can_load_more);
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert!(!engine.load_more());
}

#[tokio::test(start_paused = true)]
async fn empty_fresh_search_reports_no_results() {
    let provider = Arc::new(ScriptedProvider::new(|_, _, _| Ok(Vec::new())));
    let mut engine = engine(&provider, 5);

    engine.set_query("weird_query");
    let state = engine.settle().await;

    assert_eq!(state.error, Some(ErrorKind::NoResults));
    assert!(state.results.is_empty());
    assert!(!state.can_load_more);
    assert!(!state.is_loading);
}

#[tokio::test(start_paused = true)]
async fn load_more_is_ignored_while_loading() {
    let provider = Arc::new(ScriptedProvider::new(catalogue(10)));
    let mut engine = engine(&provider, 5);

    engine.set_query("cats");
    let before = engine.state();

    assert!(!engine.load_more());
    assert!(Arc::ptr_eq(&before, &engine.state()));

    engine.settle().await;
    assert_eq!(provider.offsets(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn second_load_more_is_ignored_while_the_first_is_in_flight() {
    let provider = Arc::new(
        ScriptedProvider::new(catalogue(10)).delay("cats", 3, Duration::from_secs(5)),
    );
    let mut engine = engine(&provider, 3);

    engine.set_query("cats");
    engine.settle().await;
    assert!(engine.load_more());

    sleep(Duration::from_secs(1)).await;
    let before = engine.state();
    assert!(before.is_loading);

    assert!(!engine.load_more());
    assert!(Arc::ptr_eq(&before, &engine.state()));

    let state = engine.settle().await;
    assert_eq!(state.results.len(), 6);
    assert_eq!(provider.offsets(), vec![0, 3]);
}

#[tokio::test(start_paused = true)]
async fn pages_accumulate_until_a_short_page() {
    let provider = Arc::new(ScriptedProvider::new(catalogue(7)));
    let mut engine = engine(&provider, 3);

    engine.set_query("cats");
    let state = engine.settle().await;
    assert_eq!(state.results.len(), 3);
    assert_eq!(engine.offset(), 3);
    assert!(state.can_load_more);

    assert!(engine.load_more());
    assert!(engine.state().is_loading);
    let state = engine.settle().await;
    assert_eq!(state.results.len(), 6);
    assert_eq!(engine.offset(), 6);
    assert!(state.can_load_more);

    assert!(engine.load_more());
    let state = engine.settle().await;
    assert_eq!(state.results.len(), 7);
    assert!(!state.can_load_more);

    assert!(!engine.load_more());
    assert_eq!(provider.offsets(), vec![0, 3, 6]);

    let expected: Vec<String> = (0..7).map(|i| url("cats", i)).collect();
    assert_eq!(state.results.to_vec(), expected);
}

#[tokio::test(start_paused = true)]
async fn duplicate_results_are_kept_in_order() {
    let provider = Arc::new(ScriptedProvider::new(|_, _, offset| {
        Ok(vec![
            Gif::new("a", "A", "http://same.gif"),
            Gif::new("b", "B", format!("http://{offset}.gif")),
        ])
    }));
    let mut engine = engine(&provider, 2);

    engine.set_query("cats");
    engine.settle().await;
    engine.load_more();
    let state = engine.settle().await;

    assert_eq!(
        state.results.to_vec(),
        vec!["http://same.gif", "http://0.gif", "http://same.gif", "http://2.gif"]
    );
}

#[tokio::test(start_paused = true)]
async fn failed_load_more_keeps_existing_results() {
    let provider = Arc::new(ScriptedProvider::new(|query, limit, offset| {
        if offset > 0 {
            Err(ProviderError::Status {
                code: 503,
                message: "Service Unavailable".into(),
            })
        } else {
            catalogue(10)(query, limit, offset)
        }
    }));
    let mut engine = engine(&provider, 3);

    engine.set_query("cats");
    engine.settle().await;
    assert!(engine.load_more());
    let state = engine.settle().await;

    assert_eq!(state.error, Some(ErrorKind::ServerError(503)));
    assert_eq!(state.results.len(), 3);
    assert!(!state.is_loading);
    assert_eq!(engine.offset(), 3);
}

#[tokio::test(start_paused = true)]
async fn failed_fresh_search_clears_results_and_allows_retry() {
    let provider = Arc::new(ScriptedProvider::new(|query, limit, offset| {
        if query == "down" {
            Err(ProviderError::Timeout("deadline elapsed".into()))
        } else {
            catalogue(10)(query, limit, offset)
        }
    }));
    let mut engine = engine(&provider, 3);

    engine.set_query("cats");
    engine.settle().await;
    engine.set_query("down");
    let state = engine.settle().await;

    assert_eq!(state.error, Some(ErrorKind::Timeout));
    assert!(state.results.is_empty());
    assert!(state.can_load_more);

    assert!(engine.load_more());
    engine.settle().await;
    assert_eq!(provider.offsets(), vec![0, 0, 0]);
}

#[tokio::test(start_paused = true)]
async fn failures_are_classified() {
    let cases = [
        (
            ProviderError::Connect("connection refused".into()),
            ErrorKind::NetworkError,
        ),
        (
            ProviderError::Status {
                code: 429,
                message: "Too Many Requests".into(),
            },
            ErrorKind::ServerError(429),
        ),
        (
            ProviderError::Status {
                code: 404,
                message: "Not Found".into(),
            },
            ErrorKind::Unknown("HTTP 404: Not Found".into()),
        ),
        (
            ProviderError::Decode("expected value".into()),
            ErrorKind::Unknown("invalid response body: expected value".into()),
        ),
    ];

    for (error, expected) in cases {
        let provider = Arc::new(ScriptedProvider::new(move |_, _, _| Err(error.clone())));
        let mut engine = engine(&provider, 3);

        engine.set_query("cats");
        let state = engine.settle().await;

        assert_eq!(state.error, Some(expected));
    }
}

#[tokio::test(start_paused = true)]
async fn new_query_clears_previous_error() {
    let provider = Arc::new(ScriptedProvider::new(|query, limit, offset| {
        if query == "down" {
            Err(ProviderError::Connect("offline".into()))
        } else {
            catalogue(10)(query, limit, offset)
        }
    }));
    let mut engine = engine(&provider, 3);

    engine.set_query("down");
    engine.settle().await;
    assert_eq!(engine.state().error, Some(ErrorKind::NetworkError));

    engine.set_query("cats");
    assert_eq!(engine.state().error, None);
    assert!(engine.state().is_loading);
    let state = engine.settle().await;
    assert_eq!(state.error, None);
    assert_eq!(state.results.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn subscribers_observe_published_snapshots() {
    let provider = Arc::new(ScriptedProvider::new(catalogue(10)));
    let mut engine = engine(&provider, 5);
    let mut updates = engine.subscribe();

    engine.set_query("cats");
    assert!(updates.has_changed().unwrap());
    assert!(updates.borrow_and_update().is_loading);

    engine.settle().await;
    assert!(updates.has_changed().unwrap());
    let latest = Arc::clone(&updates.borrow_and_update());
    assert!(Arc::ptr_eq(&latest, &engine.state()));
}
