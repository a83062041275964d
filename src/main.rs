use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use placement_ai::config::AppConfig;
use placement_ai::error::AppError;
use placement_ai::telemetry;
use placement_ai::workflows::placement::matching::{
    CandidateFilterPipeline, FilterPolicy, FilterStats, InMemoryContactLog, MatchWeights,
    ScoredMatch, ShortlistService,
};
use placement_ai::workflows::placement::screening::{EligibilityEngine, EligibilityResult};
use placement_ai::workflows::placement::{
    CandidateProfile, CountryCode, JobPosting, MatchCandidate, RosterImporter,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Clone)]
struct ApiState {
    engine: Arc<EligibilityEngine>,
    shortlist: Arc<ShortlistService<InMemoryContactLog>>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Teacher Placement Screener",
    about = "Run visa screening and candidate shortlisting for the placement board",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Screen a candidate profile against destination visa catalogs
    Screen(ScreenArgs),
    /// Build a ranked shortlist for a posting from an ATS roster export
    Shortlist(ShortlistArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScreenArgs {
    /// Candidate profile as exported JSON
    #[arg(long)]
    candidate: PathBuf,
    /// Limit the check to one destination code (defaults to the full matrix)
    #[arg(long)]
    country: Option<String>,
    /// Evaluation date for age thresholds (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Include improvement suggestions for failed requirements
    #[arg(long)]
    recommendations: bool,
}

#[derive(Args, Debug)]
struct ShortlistArgs {
    /// Roster CSV exported from the ATS
    #[arg(long)]
    roster: PathBuf,
    /// Destination code of the posting
    #[arg(long)]
    country: String,
    /// Subject taught in the posting
    #[arg(long)]
    subject: String,
    /// Offered monthly salary in USD
    #[arg(long)]
    salary_usd: u32,
    /// Minimum years of teaching experience for the posting
    #[arg(long, default_value_t = 0)]
    min_years: u8,
    /// School name shown in the rendered shortlist
    #[arg(long)]
    school: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScreeningCheckRequest {
    candidate: CandidateProfile,
    country: String,
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct ScreeningCheckResponse {
    result: EligibilityResult,
    summary: String,
    recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScreeningMatrixRequest {
    candidate: CandidateProfile,
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct ScreeningMatrixResponse {
    results: BTreeMap<CountryCode, EligibilityResult>,
    eligible_countries: Vec<CountryCode>,
}

#[derive(Debug, Deserialize)]
struct ShortlistRequest {
    job: JobPosting,
    candidates: Vec<MatchCandidate>,
    #[serde(default)]
    now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct ShortlistResponse {
    entries: Vec<ScoredMatch>,
    stats: FilterStats,
    recontact_suppressed: usize,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Screen(args) => run_screen(args),
        Command::Shortlist(args) => run_shortlist(args).await,
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let engine = Arc::new(EligibilityEngine::standard());
    let pipeline = CandidateFilterPipeline::new(
        EligibilityEngine::standard(),
        FilterPolicy::from(&config.screening),
    );
    let shortlist = Arc::new(ShortlistService::new(
        pipeline,
        MatchWeights::default(),
        Arc::new(InMemoryContactLog::default()),
        &config.screening,
    ));
    let api = api_router(ApiState { engine, shortlist });

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(api)
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "placement screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        candidate,
        country,
        today,
        recommendations,
    } = args;

    let raw = std::fs::read_to_string(candidate)?;
    let profile: CandidateProfile = serde_json::from_str(&raw)
        .map_err(|err| AppError::Input(format!("candidate profile JSON: {err}")))?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let engine = EligibilityEngine::standard();

    match country {
        Some(code) => {
            let result = engine.check(&profile, &code, today);
            render_check(&profile, &result, recommendations);
        }
        None => {
            let matrix = engine.check_all(&profile, today);
            render_matrix(&engine, &profile, &matrix, today, recommendations);
        }
    }

    Ok(())
}

async fn run_shortlist(args: ShortlistArgs) -> Result<(), AppError> {
    let ShortlistArgs {
        roster,
        country,
        subject,
        salary_usd,
        min_years,
        school,
    } = args;

    let config = AppConfig::load()?;
    let candidates = RosterImporter::from_path(roster)?;

    let contacts = Arc::new(InMemoryContactLog::default());
    for candidate in &candidates {
        if let Some(contacted_at) = candidate.last_contacted_at {
            contacts.record(candidate.profile.teacher_id.clone(), contacted_at);
        }
    }

    let job = JobPosting {
        job_id: "cli-run".to_string(),
        school_name: school.unwrap_or_else(|| "(unspecified school)".to_string()),
        country,
        subject,
        salary_usd,
        min_years_experience: min_years,
    };

    let pipeline = CandidateFilterPipeline::new(
        EligibilityEngine::standard(),
        FilterPolicy::from(&config.screening),
    );
    let service = ShortlistService::new(
        pipeline,
        MatchWeights::default(),
        contacts,
        &config.screening,
    );

    let shortlist = service.shortlist(candidates, &job, Utc::now()).await?;
    render_shortlist(&job, &shortlist.entries, &shortlist.stats, shortlist.recontact_suppressed);

    Ok(())
}

fn api_router(api_state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/screening/check", post(screening_check_endpoint))
        .route("/api/v1/screening/matrix", post(screening_matrix_endpoint))
        .route(
            "/api/v1/matching/shortlist",
            post(matching_shortlist_endpoint),
        )
        .with_state(api_state)
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn screening_check_endpoint(
    State(api): State<ApiState>,
    Json(payload): Json<ScreeningCheckRequest>,
) -> Json<ScreeningCheckResponse> {
    let ScreeningCheckRequest {
        candidate,
        country,
        today,
    } = payload;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let result = api.engine.check(&candidate, &country, today);

    Json(ScreeningCheckResponse {
        summary: result.summary(),
        recommendations: result.recommendations(),
        result,
    })
}

async fn screening_matrix_endpoint(
    State(api): State<ApiState>,
    Json(payload): Json<ScreeningMatrixRequest>,
) -> Json<ScreeningMatrixResponse> {
    let ScreeningMatrixRequest { candidate, today } = payload;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let results = api.engine.check_all(&candidate, today);
    let eligible_countries = results
        .iter()
        .filter(|(_, result)| result.eligible)
        .map(|(country, _)| *country)
        .collect();

    Json(ScreeningMatrixResponse {
        results,
        eligible_countries,
    })
}

async fn matching_shortlist_endpoint(
    State(api): State<ApiState>,
    Json(payload): Json<ShortlistRequest>,
) -> Result<Json<ShortlistResponse>, AppError> {
    let ShortlistRequest {
        job,
        candidates,
        now,
    } = payload;

    let now = now.unwrap_or_else(Utc::now);
    let shortlist = api.shortlist.shortlist(candidates, &job, now).await?;

    Ok(Json(ShortlistResponse {
        entries: shortlist.entries,
        stats: shortlist.stats,
        recontact_suppressed: shortlist.recontact_suppressed,
    }))
}

fn render_check(profile: &CandidateProfile, result: &EligibilityResult, recommendations: bool) {
    println!("Visa screening for {}", profile.full_name);
    println!("Destination: {}", result.country);
    println!("Verdict: {}", result.summary());

    if !result.failed_requirements.is_empty() {
        println!("\nFailed requirements");
        for failure in &result.failed_requirements {
            println!("- [{}] {}", failure.priority.label(), failure.message);
        }
    }

    if recommendations {
        render_recommendations(result);
    }
}

fn render_matrix(
    engine: &EligibilityEngine,
    profile: &CandidateProfile,
    matrix: &BTreeMap<CountryCode, EligibilityResult>,
    today: NaiveDate,
    recommendations: bool,
) {
    println!("Visa screening matrix for {}", profile.full_name);
    println!("Evaluated {}\n", today);

    for (country, result) in matrix {
        println!(
            "- {} {}: {}",
            country.code(),
            country.label(),
            result.summary()
        );
    }

    let preferred = engine.eligible_preferred_countries(profile, today);
    if preferred.is_empty() {
        println!("\nEligible preferred destinations: none");
    } else {
        let codes: Vec<&str> = preferred.iter().map(|country| country.code()).collect();
        println!("\nEligible preferred destinations: {}", codes.join(", "));
    }

    if recommendations {
        for result in matrix.values() {
            if !result.eligible {
                render_recommendations(result);
                break;
            }
        }
    }
}

fn render_recommendations(result: &EligibilityResult) {
    let suggestions = result.recommendations();
    if suggestions.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for suggestion in &suggestions {
            println!("- {}", suggestion);
        }
    }
}

fn render_shortlist(
    job: &JobPosting,
    entries: &[ScoredMatch],
    stats: &FilterStats,
    recontact_suppressed: usize,
) {
    println!(
        "Shortlist for {} ({}, {})",
        job.school_name, job.country, job.subject
    );
    println!(
        "Pipeline: {} in, {} after visa, {} after experience, {} after salary, {} suppressed for recent contact",
        stats.initial, stats.after_visa, stats.after_experience, stats.after_salary,
        recontact_suppressed
    );

    if entries.is_empty() {
        println!("\nNo candidates survived the filters");
        return;
    }

    println!("\nRanked candidates");
    for (rank, entry) in entries.iter().enumerate() {
        let subject_note = if entry.candidate.subject_match {
            " subject match,"
        } else {
            ""
        };
        println!(
            "{:>2}. {} | score {:.1} ({}) |{} similarity {:.2}",
            rank + 1,
            entry.candidate.profile.full_name,
            entry.score,
            entry.quality.label(),
            subject_note,
            entry.candidate.similarity
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use placement_ai::workflows::placement::domain::{DegreeLevel, TeacherId};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_api_state() -> ApiState {
        ApiState {
            engine: Arc::new(EligibilityEngine::standard()),
            shortlist: Arc::new(ShortlistService::new(
                CandidateFilterPipeline::standard(),
                MatchWeights::default(),
                Arc::new(InMemoryContactLog::default()),
                &placement_ai::config::ScreeningConfig::default(),
            )),
        }
    }

    fn sample_candidate() -> CandidateProfile {
        CandidateProfile {
            teacher_id: TeacherId("t-100".to_string()),
            full_name: "Dana Whitfield".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1993, 3, 15),
            citizenship: Some("US".to_string()),
            highest_degree: Some(DegreeLevel::Bachelors),
            years_experience: Some(4),
            has_teaching_certification: true,
            background_check_cleared: true,
            has_criminal_record: false,
            preferred_countries: vec!["KR".to_string()],
            min_salary_usd: Some(2200),
            subjects: vec!["English".to_string()],
            video_quality_score: Some(0.8),
        }
    }

    fn sample_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
    }

    #[tokio::test]
    async fn screening_check_endpoint_returns_verdict_and_advice() {
        let mut candidate = sample_candidate();
        candidate.has_teaching_certification = false;
        let request = ScreeningCheckRequest {
            candidate,
            country: "KR".to_string(),
            today: Some(sample_today()),
        };

        let Json(body) =
            screening_check_endpoint(State(test_api_state()), Json(request)).await;

        assert!(!body.result.eligible);
        assert!(body.summary.starts_with("Ineligible:"));
        assert!(body
            .recommendations
            .iter()
            .any(|suggestion| suggestion.contains("TEFL")));
    }

    #[tokio::test]
    async fn screening_matrix_endpoint_covers_all_destinations() {
        let request = ScreeningMatrixRequest {
            candidate: sample_candidate(),
            today: Some(sample_today()),
        };

        let Json(body) =
            screening_matrix_endpoint(State(test_api_state()), Json(request)).await;

        assert_eq!(body.results.len(), CountryCode::ordered().len());
        assert!(body.eligible_countries.contains(&CountryCode::SouthKorea));
    }

    #[tokio::test]
    async fn screening_check_route_accepts_payloads() {
        let router = api_router(test_api_state());
        let payload = json!({
            "candidate": serde_json::to_value(sample_candidate()).expect("profile serializes"),
            "country": "KR",
            "today": "2025-06-02",
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/screening/check")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds");

        let response = router.oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["result"]["eligible"], Value::Bool(true));
        assert_eq!(body["summary"], Value::String("Eligible".to_string()));
    }

    #[tokio::test]
    async fn matching_shortlist_endpoint_ranks_candidates() {
        let job = JobPosting {
            job_id: "job-7".to_string(),
            school_name: "Gangnam Language Academy".to_string(),
            country: "KR".to_string(),
            subject: "English".to_string(),
            salary_usd: 2400,
            min_years_experience: 1,
        };
        let mut low = MatchCandidate::new(sample_candidate(), 0.2);
        low.profile.teacher_id = TeacherId("t-low".to_string());
        let high = MatchCandidate::new(sample_candidate(), 0.9);

        let request = ShortlistRequest {
            job,
            candidates: vec![low, high],
            now: None,
        };

        let Json(body) = matching_shortlist_endpoint(State(test_api_state()), Json(request))
            .await
            .expect("shortlist builds");

        assert_eq!(body.stats.initial, 2);
        assert_eq!(body.entries.len(), 2);
        assert!(body.entries[0].score >= body.entries[1].score);
        assert_eq!(body.recontact_suppressed, 0);
    }
}
