//! Subtitle finder: language selection, outcomes, and the detached mode

use std::sync::Arc;
use std::time::Duration;
use subit_client_core::retrieval::RetrievalPipeline;
use subit_client_core::{
    LanguagePreference, LookupOutcome, NotFoundReason, SearchClient, SubtitleFinder,
};
use subit_test_utils::{
    MockSubtitleService, StubService, SubtitleArchiveBuilder, SubtitleRecordBuilder,
    VideoFileBuilder,
};
use tempfile::TempDir;

fn finder(service: MockSubtitleService) -> (SubtitleFinder, Arc<MockSubtitleService>) {
    let service = Arc::new(service);
    let delay = Duration::from_millis(10);
    let search = SearchClient::new(service.clone()).with_login_retry_delay(delay);
    let retrieval = RetrievalPipeline::new(reqwest::Client::new(), "srt");
    (SubtitleFinder::new(search, retrieval), service)
}

fn dir_listing(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_requested_language_order_wins() {
    let stub = StubService::start().await;
    for (name, body) in [("a.zip", "A"), ("b.zip", "B"), ("c.zip", "C")] {
        let archive = SubtitleArchiveBuilder::new()
            .with_entry("movie.srt", body.as_bytes())
            .build();
        stub.serve_archive(name, archive).await;
    }

    let records = [("en", "a.zip"), ("fr", "b.zip"), ("en", "c.zip")]
        .into_iter()
        .map(|(lang, name)| {
            SubtitleRecordBuilder::new(lang)
                .with_download_url(&stub.archive_url(name))
                .build()
        })
        .collect();
    let (finder, _) = finder(MockSubtitleService::new().with_fingerprint_results(records));

    let dir = TempDir::new().unwrap();
    let video = VideoFileBuilder::new(dir.path())
        .with_name("film.mkv")
        .build();
    let outcome = finder
        .find_subtitle(&video, &LanguagePreference::parse("fr,en").unwrap())
        .await
        .unwrap();

    let path = outcome.into_path().unwrap();
    assert_eq!(path, dir.path().join("film.srt"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "B");
    assert_eq!(dir_listing(&dir), vec!["film.mkv", "film.srt"]);
}

#[tokio::test]
async fn test_no_results_is_not_found() {
    let (finder, service) = finder(MockSubtitleService::new());
    let dir = TempDir::new().unwrap();
    let video = VideoFileBuilder::new(dir.path()).build();

    let outcome = finder
        .find_subtitle(&video, &LanguagePreference::parse("eng").unwrap())
        .await
        .unwrap();

    assert_eq!(outcome, LookupOutcome::NotFound(NotFoundReason::NoResults));
    assert_eq!(service.logout_calls(), 1);
    assert_eq!(dir_listing(&dir), vec!["movie.mkv"]);
}

#[tokio::test]
async fn test_results_in_other_languages_is_not_found() {
    let record = SubtitleRecordBuilder::new("spa").build();
    let service = MockSubtitleService::new().with_fingerprint_results(vec![record]);
    let (finder, _) = finder(service);
    let dir = TempDir::new().unwrap();
    let video = VideoFileBuilder::new(dir.path()).build();

    let outcome = finder
        .find_subtitle(&video, &LanguagePreference::parse("eng,fre").unwrap())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        LookupOutcome::NotFound(NotFoundReason::NoLanguageMatch)
    );
}

#[tokio::test]
async fn test_service_failure_is_error_not_outcome() {
    let (finder, _) = finder(MockSubtitleService::new().with_login_failures(2));
    let dir = TempDir::new().unwrap();
    let video = VideoFileBuilder::new(dir.path()).build();

    let err = finder
        .find_subtitle(&video, &LanguagePreference::parse("eng").unwrap())
        .await
        .unwrap_err();

    assert!(err.is_service_error());
}

#[tokio::test]
async fn test_spawned_lookup_matches_synchronous_result() {
    let stub = StubService::start().await;
    stub.serve_archive(
        "sub.zip",
        SubtitleArchiveBuilder::new()
            .with_entry("Movie & Co.srt", b"spawned")
            .build(),
    )
    .await;
    let record = SubtitleRecordBuilder::new("eng")
        .with_download_url(&stub.archive_url("sub.zip"))
        .with_file_name("Movie & Co.srt")
        .build();
    let (finder, service) = finder(MockSubtitleService::new().with_title_results(vec![record]));

    let dir = TempDir::new().unwrap();
    let video = VideoFileBuilder::new(dir.path()).with_size(1024).build();
    let languages = LanguagePreference::parse("eng").unwrap();
    let handle = finder.spawn(video.clone(), languages);

    let outcome = handle.join().await.unwrap();

    assert_eq!(outcome, LookupOutcome::Found(dir.path().join("movie.srt")));
    let written = std::fs::read_to_string(dir.path().join("movie.srt")).unwrap();
    assert_eq!(written, "spawned");
    assert_eq!(service.logout_calls(), 1);
    assert_eq!(dir_listing(&dir), vec!["movie.mkv", "movie.srt"]);
}
