use chrono::{TimeZone, Utc};
use viral_scout::{
    compute_viral_score, filter_by_min_score, rank, AnalysisReport, Config, DurationFilter,
    Error, VideoRecord, YouTubeClient,
};

fn record(id: &str, score: f64) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        title: format!("video {}", id),
        thumbnail_url: "https://i.ytimg.com/thumb.jpg".to_string(),
        channel_title: "Some Channel".to_string(),
        channel_id: "UC123".to_string(),
        published_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        view_count: 0,
        like_count: 0,
        comment_count: 0,
        subscriber_count: 0,
        viral_score: score,
    }
}

#[test]
fn test_score_identities() {
    assert_eq!(compute_viral_score(120_000, 40_000), 3.0);
    assert_eq!(compute_viral_score(7, 0), 1.0);
    assert_eq!(compute_viral_score(0, 0), 0.0);
    assert_eq!(compute_viral_score(0, 500), 0.0);
}

#[test]
fn test_rank_then_filter_threshold_change() {
    // The dashboard re-runs the filter against the full ranked list whenever
    // the slider moves, never against a previously filtered subset.
    let ranked = rank(vec![
        record("a", 0.2),
        record("b", 0.9),
        record("c", 1.8),
        record("d", 3.0),
    ]);

    let at_half = filter_by_min_score(&ranked, 0.5);
    assert_eq!(
        at_half.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec!["d", "c", "b"]
    );

    let raised = filter_by_min_score(&ranked, 1.5);
    assert_eq!(
        raised.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec!["d", "c"]
    );

    // Lowering the threshold again restores records a stacked filter would
    // have lost
    let lowered = filter_by_min_score(&ranked, 0.0);
    assert_eq!(lowered.len(), 4);
}

#[test]
fn test_rank_keeps_tied_records_in_input_order() {
    let ranked = rank(vec![record("x", 1.0), record("y", 1.0), record("z", 1.0)]);
    assert_eq!(
        ranked.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec!["x", "y", "z"]
    );
}

#[tokio::test]
async fn test_search_with_empty_credential_fails_fast() {
    let client = YouTubeClient::new();
    let result = client.search("rust tutorial", "", DurationFilter::Any).await;
    assert!(matches!(result, Err(Error::MissingCredential)));
}

#[tokio::test]
async fn test_comment_fetch_with_empty_credential_fails_fast() {
    let client = YouTubeClient::new();
    let result = client.fetch_comments("dQw4w9WgXcQ", "").await;
    assert!(matches!(result, Err(Error::MissingCredential)));
}

#[test]
fn test_config_round_trips_through_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viral-scout.toml");

    let mut config = Config::default();
    config.youtube.api_key = "yt-key".to_string();
    config.analysis.api_key = "gemini-key".to_string();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.youtube.api_key, "yt-key");
    assert_eq!(loaded.analysis.api_key, "gemini-key");
    assert_eq!(loaded.youtube.timeout_seconds, config.youtube.timeout_seconds);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_missing_config_file_reports_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_analysis_report_parses_collaborator_output() {
    let report: AnalysisReport = serde_json::from_str(
        r#"{
            "sentiment": "positive",
            "positivePoints": ["good pacing", "clear visuals"],
            "negativePoints": ["intro too long"],
            "userNeeds": ["part two"],
            "contentIdeas": ["behind the scenes", "gear breakdown", "q&a"],
            "recommendedKeywords": ["one", "two", "three", "four", "five"]
        }"#,
    )
    .unwrap();

    assert_eq!(report.positive_points.len(), 2);
    assert_eq!(report.content_ideas.len(), 3);
    assert_eq!(report.recommended_keywords.len(), 5);
}

#[test]
fn test_error_messages_distinguish_precondition_from_upstream() {
    let missing = Error::MissingCredential.to_string();
    let upstream = Error::UpstreamApi {
        stage: viral_scout::Stage::Statistics,
        message: "quota exceeded".to_string(),
    }
    .to_string();

    assert!(missing.contains("credential"));
    assert!(upstream.contains("statistics"));
    assert!(upstream.contains("quota exceeded"));
}
