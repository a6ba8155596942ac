//! Integration tests for the tailoring pipeline.
//!
//! These tests drive the public API end to end:
//! 1. Profiles are seeded from JSON into the in-memory store
//! 2. Resumes are created and tailored through the command handlers
//! 3. Backends are the scripted one or `LlmResumeAI` over a mock provider

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use resume_tailor::adapters::ai::{
    LlmResumeAI, MockAIProvider, MockResponse, ResilientResumeAI, RetryPolicy, ScriptedResumeAI,
};
use resume_tailor::adapters::memory::{
    InMemoryProfileStore, InMemoryResumeRepository, ProfileDocument,
};
use resume_tailor::application::{
    CreateResumeCommand, CreateResumeHandler, DeleteBulletCommand, DeleteBulletHandler,
    ResumeTailor, TailorResumeCommand, TailorResumeHandler,
};
use resume_tailor::domain::foundation::{BulletId, ResumeId, UserId};
use resume_tailor::domain::resume::{ResumeError, ResumeStatus, TAILORING_FAILED_MESSAGE};
use resume_tailor::domain::tailoring::TailoringOptions;
use resume_tailor::ports::{AIError, ExperienceRepository, ProfileReader, ResumeAI, ResumeRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

const JOB: &str = "Senior Go Engineer, needs Kubernetes and PostgreSQL experience";

const PROFILE: &str = r#"{
    "user_id": "ada",
    "full_name": "Ada Lovelace",
    "headline": "Backend engineer",
    "skills": [
        { "name": "Go", "proficiency": 90 },
        { "name": "Photoshop", "proficiency": 40 }
    ],
    "experiences": [{
        "type": "work",
        "title": "Backend Engineer",
        "organization": "Acme",
        "start_date": "2020-01-01",
        "bullets": [
            { "content": "Built Go services on PostgreSQL serving 10k requests per second", "impact_score": 80 },
            { "content": "Designed marketing banners in Photoshop", "impact_score": 60 }
        ]
    }]
}"#;

struct World {
    profiles: InMemoryProfileStore,
    resumes: Arc<InMemoryResumeRepository>,
    user_id: UserId,
    go_bullet: BulletId,
    photoshop_bullet: BulletId,
}

impl World {
    async fn new() -> Self {
        let profiles = InMemoryProfileStore::new();
        let user_id = ProfileDocument::from_json(PROFILE)
            .unwrap()
            .seed(&profiles)
            .await
            .unwrap();

        let experiences = profiles.list_experiences(&user_id).await.unwrap();
        let bullets = experiences[0].bullets();
        let go_bullet = *bullets[0].id();
        let photoshop_bullet = *bullets[1].id();

        Self {
            profiles,
            resumes: Arc::new(InMemoryResumeRepository::new()),
            user_id,
            go_bullet,
            photoshop_bullet,
        }
    }

    async fn draft(&self) -> ResumeId {
        let result = CreateResumeHandler::new(self.resumes.clone())
            .handle(CreateResumeCommand::new(self.user_id.clone(), JOB))
            .await
            .unwrap();
        *result.resume.id()
    }

    fn handler(&self, ai: Arc<dyn ResumeAI>) -> TailorResumeHandler {
        let tailor = ResumeTailor::new(ai, Arc::new(self.profiles.clone()));
        TailorResumeHandler::new(self.resumes.clone(), Arc::new(tailor))
    }

    fn command(&self, resume_id: ResumeId, options: TailoringOptions) -> TailorResumeCommand {
        TailorResumeCommand {
            resume_id,
            user_id: self.user_id.clone(),
            options,
        }
    }
}

fn analysis_json() -> String {
    r#"Here is the analysis:
```json
{
  "title": "Senior Go Engineer",
  "required_skills": ["Go", "Kubernetes", "PostgreSQL"],
  "keywords": ["Go", "Kubernetes", "PostgreSQL"],
  "seniority": "senior",
  "summary": "Backend role on Go and PostgreSQL"
}
```"#
        .to_string()
}

fn selection_json(ids: &[String]) -> String {
    let quoted: Vec<String> = ids.iter().map(|id| format!("\"{}\"", id)).collect();
    format!(
        "Reasoning first... {{\"bullet_ids\": [{}], \"reasoning\": \"Direct Go and PostgreSQL match\"}} done",
        quoted.join(", ")
    )
}

fn tailor_json() -> String {
    r#"{"tailored_content": "Built Go services on PostgreSQL serving 10k requests per second", "keywords_used": ["Go", "PostgreSQL"]}"#.to_string()
}

fn summary_json() -> String {
    r#"{"summary": "Ada is a backend engineer. She builds Go services on PostgreSQL. She ships reliable systems."}"#.to_string()
}

fn score_json() -> String {
    "```json\n{\"draft\": true}\n```\nFinal:\n```json\n{\"score\": 84.6, \"matched_keywords\": [\"Go\", \"PostgreSQL\"], \"missing_keywords\": [\"Kubernetes\"]}\n```".to_string()
}

fn llm_backend(provider: Arc<MockAIProvider>) -> Arc<dyn ResumeAI> {
    Arc::new(
        ResilientResumeAI::new(LlmResumeAI::new(provider))
            .with_policy(RetryPolicy::new(3, Duration::from_millis(100))),
    )
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn selects_the_relevant_bullet_with_one_slot() {
    let world = World::new().await;
    let resume_id = world.draft().await;
    let handler = world.handler(Arc::new(ScriptedResumeAI::new()));

    let result = handler
        .handle(
            world.command(resume_id, TailoringOptions::default().with_max_bullets(1)),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.resume.selected_bullets(), &[world.go_bullet]);
    assert!(!result.resume.selected_bullets().contains(&world.photoshop_bullet));
    assert_eq!(result.resume.status(), ResumeStatus::Generated);
    assert!(result.resume.match_score().value() <= 100);

    let stored = world.resumes.find_by_id(&resume_id).await.unwrap().unwrap();
    assert_eq!(stored, result.resume);
}

#[tokio::test]
async fn tailoring_twice_is_idempotent() {
    let world = World::new().await;
    let resume_id = world.draft().await;
    let handler = world.handler(Arc::new(ScriptedResumeAI::new()));

    let first = handler
        .handle(world.command(resume_id, TailoringOptions::default()), CancellationToken::new())
        .await
        .unwrap();
    let second = handler
        .handle(world.command(resume_id, TailoringOptions::default()), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(first.resume.content(), second.resume.content());
    assert_eq!(first.resume.match_score(), second.resume.match_score());
    assert_eq!(first.resume.selected_bullets(), second.resume.selected_bullets());
}

#[tokio::test(start_paused = true)]
async fn recovers_from_rate_limits_through_the_llm_backend() {
    let world = World::new().await;
    let resume_id = world.draft().await;
    let provider = Arc::new(
        MockAIProvider::new()
            .with_error(AIError::rate_limited(1))
            .with_error(AIError::rate_limited(1))
            .with_response(analysis_json())
            .with_response(selection_json(&[world.go_bullet.to_string()]))
            .with_response(tailor_json())
            .with_response(summary_json())
            .with_response(score_json()),
    );
    let handler = world.handler(llm_backend(provider.clone()));

    let result = handler
        .handle(
            world.command(resume_id, TailoringOptions::default().with_max_bullets(1)),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(provider.call_count(), 7);
    assert_eq!(result.resume.selected_bullets(), &[world.go_bullet]);
    assert_eq!(result.resume.match_score().value(), 85);
    let content = result.resume.content().unwrap();
    let analysis = content.analysis.as_ref().unwrap();
    assert_eq!(analysis.missing_keywords, vec!["Kubernetes"]);
}

#[tokio::test(start_paused = true)]
async fn exhausted_backend_surfaces_one_error_and_keeps_storage() {
    let world = World::new().await;
    let resume_id = world.draft().await;
    let before = world.resumes.find_by_id(&resume_id).await.unwrap().unwrap();
    let provider = Arc::new(MockAIProvider::always_failing(AIError::unavailable("overloaded")));
    let handler = world.handler(llm_backend(provider.clone()));

    let err = handler
        .handle(world.command(resume_id, TailoringOptions::default()), CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ResumeError::ServiceUnavailable(_)));
    assert_eq!(err.user_message(), TAILORING_FAILED_MESSAGE);
    assert!(!err.user_message().contains("overloaded"));
    assert_eq!(provider.call_count(), 4);
    assert_eq!(world.resumes.write_count(), 1);
    let after = world.resumes.find_by_id(&resume_id).await.unwrap().unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn foreign_ids_from_the_backend_never_reach_the_resume() {
    let world = World::new().await;
    let resume_id = world.draft().await;
    let foreign = BulletId::new();
    let provider = Arc::new(
        MockAIProvider::new()
            .with_response(analysis_json())
            .with_response(selection_json(&[
                foreign.to_string(),
                "not-a-uuid".to_string(),
                world.go_bullet.to_string(),
            ]))
            .with_response(tailor_json())
            .with_response(summary_json())
            .with_response(score_json()),
    );
    let handler = world.handler(llm_backend(provider));

    let result = handler
        .handle(world.command(resume_id, TailoringOptions::default()), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.resume.selected_bullets(), &[world.go_bullet]);
    assert_eq!(result.outcome.dropped_ids, vec![foreign]);
}

#[tokio::test]
async fn malformed_output_is_not_retried() {
    let world = World::new().await;
    let resume_id = world.draft().await;
    let provider = Arc::new(
        MockAIProvider::new().with_fallback(MockResponse::text("I'd rather not answer in JSON.")),
    );
    let handler = world.handler(llm_backend(provider.clone()));

    let err = handler
        .handle(world.command(resume_id, TailoringOptions::default()), CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ResumeError::MalformedOutput(_)));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn deleting_a_selected_bullet_cascades_into_the_resume() {
    let world = World::new().await;
    let resume_id = world.draft().await;
    world
        .handler(Arc::new(ScriptedResumeAI::new()))
        .handle(world.command(resume_id, TailoringOptions::default()), CancellationToken::new())
        .await
        .unwrap();

    let result = DeleteBulletHandler::new(Arc::new(world.profiles.clone()), world.resumes.clone())
        .handle(DeleteBulletCommand {
            bullet_id: world.go_bullet,
            user_id: world.user_id.clone(),
        })
        .await
        .unwrap();

    assert_eq!(result.affected_resumes, vec![resume_id]);
    assert!(world.profiles.find_by_bullet(&world.go_bullet).await.unwrap().is_none());
    let stored = world.resumes.find_by_id(&resume_id).await.unwrap().unwrap();
    assert!(!stored.selected_bullets().contains(&world.go_bullet));
    assert!(!stored.content().unwrap().bullet_ids().contains(&world.go_bullet));
}
