use httpmock::prelude::*;
use pi_verify::domain::model::{ParserKind, SourceSpec};
use pi_verify::domain::ports::ConfigProvider;
use pi_verify::utils::error::VerifyError;
use pi_verify::{CachingFetcher, FileCache, VerifyEngine, VerifyPipeline};
use tempfile::TempDir;

struct TestConfig {
    sources: Vec<SourceSpec>,
    places: usize,
    cache_dir: String,
    reference: Option<String>,
}

impl ConfigProvider for TestConfig {
    fn sources(&self) -> Vec<SourceSpec> {
        self.sources.clone()
    }

    fn target_places(&self) -> usize {
        self.places
    }

    fn cache_dir(&self) -> &str {
        &self.cache_dir
    }

    fn reference_path(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn json_report(&self) -> bool {
        false
    }
}

fn source(name: &str, url: String) -> SourceSpec {
    SourceSpec {
        name: name.to_string(),
        url,
        parser: ParserKind::HtmlContinuous,
    }
}

/// Digit-only stand-in for the real expansion, starting with the genuine
/// first ten decimals so the anchored parser accepts it.
fn synthetic_decimals(places: usize) -> String {
    let mut decimals = String::from("1415926535");
    while decimals.len() < places {
        decimals.push(char::from_digit((decimals.len() % 10) as u32, 10).unwrap());
    }
    decimals.truncate(places);
    decimals
}

fn pi_page(decimals: &str) -> String {
    format!(
        "<html><head><title>Digits of Pi</title></head><body><p>3.{}</p></body></html>",
        decimals
    )
}

fn engine_for(
    sources: Vec<SourceSpec>,
    places: usize,
    cache_dir: &str,
    reference: Option<String>,
) -> VerifyEngine<VerifyPipeline<CachingFetcher<FileCache>, TestConfig>> {
    let config = TestConfig {
        sources,
        places,
        cache_dir: cache_dir.to_string(),
        reference,
    };
    let fetcher = CachingFetcher::new(FileCache::new(cache_dir)).unwrap();
    VerifyEngine::new(VerifyPipeline::new(fetcher, config))
}

#[tokio::test]
async fn two_agreeing_sources_verify_end_to_end() {
    let cache = TempDir::new().unwrap();
    let server = MockServer::start();
    let decimals = synthetic_decimals(10_000);
    let body = pi_page(&decimals);

    let first = server.mock(|when, then| {
        when.method(GET).path("/first");
        then.status(200).body(&body);
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/second");
        then.status(200).body(&body);
    });

    let engine = engine_for(
        vec![
            source("first", server.url("/first")),
            source("second", server.url("/second")),
        ],
        10_000,
        cache.path().to_str().unwrap(),
        None,
    );

    let summary = engine.run().await.unwrap();

    first.assert();
    second.assert();
    assert_eq!(summary, "10000 decimal places verified from 2 source(s)");
}

#[tokio::test]
async fn disagreeing_sources_fail_with_the_first_differing_index() {
    let cache = TempDir::new().unwrap();
    let server = MockServer::start();
    let left = synthetic_decimals(10_000);
    let mut right = left.clone().into_bytes();
    right[42] = if right[42] == b'0' { b'1' } else { b'0' };
    let right = String::from_utf8(right).unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/left");
        then.status(200).body(pi_page(&left));
    });
    server.mock(|when, then| {
        when.method(GET).path("/right");
        then.status(200).body(pi_page(&right));
    });

    let engine = engine_for(
        vec![
            source("left", server.url("/left")),
            source("right", server.url("/right")),
        ],
        10_000,
        cache.path().to_str().unwrap(),
        None,
    );

    match engine.run().await {
        Err(VerifyError::SourceMismatch { index, .. }) => assert_eq!(index, 42),
        other => panic!("expected SourceMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn a_failing_source_degrades_to_a_single_source_run() {
    let cache = TempDir::new().unwrap();
    let server = MockServer::start();
    let decimals = synthetic_decimals(10_000);

    server.mock(|when, then| {
        when.method(GET).path("/good");
        then.status(200).body(pi_page(&decimals));
    });
    server.mock(|when, then| {
        when.method(GET).path("/down");
        then.status(500);
    });

    let engine = engine_for(
        vec![
            source("good", server.url("/good")),
            source("down", server.url("/down")),
        ],
        10_000,
        cache.path().to_str().unwrap(),
        None,
    );

    let summary = engine.run().await.unwrap();
    assert_eq!(summary, "10000 decimal places verified from 1 source(s)");
}

#[tokio::test]
async fn all_sources_failing_fails_the_run() {
    let cache = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/down");
        then.status(500);
    });

    let engine = engine_for(
        vec![source("down", server.url("/down"))],
        10_000,
        cache.path().to_str().unwrap(),
        None,
    );

    assert!(matches!(
        engine.run().await,
        Err(VerifyError::NoValidSources)
    ));
}

#[tokio::test]
async fn a_populated_cache_avoids_any_network_fetch() {
    let cache = TempDir::new().unwrap();
    let server = MockServer::start();
    let decimals = synthetic_decimals(10_000);
    let body = pi_page(&decimals);

    let first = server.mock(|when, then| {
        when.method(GET).path("/first");
        then.status(200).body(&body);
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/second");
        then.status(200).body(&body);
    });

    let sources = vec![
        source("first", server.url("/first")),
        source("second", server.url("/second")),
    ];
    let cache_dir = cache.path().to_str().unwrap();

    let initial = engine_for(sources.clone(), 10_000, cache_dir, None)
        .run()
        .await
        .unwrap();

    // One cache file per source was written.
    assert_eq!(std::fs::read_dir(cache.path()).unwrap().count(), 2);

    let rerun = engine_for(sources, 10_000, cache_dir, None)
        .run()
        .await
        .unwrap();

    // The second run served both sources from the cache.
    first.assert_hits(1);
    second.assert_hits(1);
    assert_eq!(initial, rerun);
}

#[tokio::test]
async fn a_matching_reference_table_is_reported_and_benign() {
    let cache = TempDir::new().unwrap();
    let reference_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let decimals = synthetic_decimals(10_000);

    let entries: Vec<String> = decimals.chars().map(|c| c.to_string()).collect();
    let reference_path = reference_dir.path().join("decimals.rs");
    std::fs::write(
        &reference_path,
        format!(
            "pub const PI_DECIMALS: [u8; 10_000] = [\n    {},\n];\n",
            entries.join(", ")
        ),
    )
    .unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/pi");
        then.status(200).body(pi_page(&decimals));
    });

    let engine = engine_for(
        vec![source("pi", server.url("/pi"))],
        10_000,
        cache.path().to_str().unwrap(),
        Some(reference_path.to_str().unwrap().to_string()),
    );

    assert!(engine.run().await.is_ok());
}

#[tokio::test]
async fn a_reference_mismatch_does_not_fail_the_run() {
    let cache = TempDir::new().unwrap();
    let reference_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let decimals = synthetic_decimals(10_000);

    let reference_path = reference_dir.path().join("decimals.rs");
    std::fs::write(
        &reference_path,
        "pub const PI_DECIMALS: [u8; 5] = [9, 9, 9, 9, 9];",
    )
    .unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/pi");
        then.status(200).body(pi_page(&decimals));
    });

    let engine = engine_for(
        vec![source("pi", server.url("/pi"))],
        10_000,
        cache.path().to_str().unwrap(),
        Some(reference_path.to_str().unwrap().to_string()),
    );

    assert!(engine.run().await.is_ok());
}

#[tokio::test]
async fn a_missing_reference_file_is_skipped_with_a_note() {
    let cache = TempDir::new().unwrap();
    let server = MockServer::start();
    let decimals = synthetic_decimals(10_000);

    server.mock(|when, then| {
        when.method(GET).path("/pi");
        then.status(200).body(pi_page(&decimals));
    });

    let engine = engine_for(
        vec![source("pi", server.url("/pi"))],
        10_000,
        cache.path().to_str().unwrap(),
        Some("/nonexistent/decimals.rs".to_string()),
    );

    assert!(engine.run().await.is_ok());
}
