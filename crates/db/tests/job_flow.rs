//! Integration tests for the job lifecycle against a real database:
//! - Stringing jobs get a detail row in the same transaction; other job
//!   types do not
//! - The guarded advance walks the four-state chain, keeps
//!   `completed_date` idempotent, and loses cleanly when the row moved
//! - The last-known-specification provider prefers structured history and
//!   falls back to parsing stringing notes

use sqlx::PgPool;
use uuid::Uuid;

use restring_core::catalog::CatalogIndex;
use restring_core::lifecycle::{self, plan_advance};
use restring_db::models::client::CreateClient;
use restring_db::models::job::{CreateJob, CreateStringingDetail};
use restring_db::models::racquet::{CreateRacquet, Racquet};
use restring_db::models::status::{JobStatus, JobType};
use restring_db::repositories::{CatalogRepo, ClientRepo, JobRepo, RacquetRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    stringer_id: Uuid,
    client_id: Uuid,
    racquet: Racquet,
    strings: CatalogIndex,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let stringer_id = Uuid::new_v4();
    let client = ClientRepo::create(
        pool,
        &CreateClient {
            stringer_id,
            full_name: "Lena Fischer".to_string(),
            email: None,
            phone: None,
            notes: None,
            default_tension_main: None,
            default_tension_cross: None,
            preferred_main_brand_id: None,
            preferred_main_model_id: None,
            preferred_cross_brand_id: None,
            preferred_cross_model_id: None,
        },
    )
    .await
    .unwrap();

    let racquets = CatalogRepo::load_racquet_catalog(pool).await.unwrap();
    let brand = racquets
        .brands()
        .find(|b| b.name == "Yonex")
        .expect("seeded brand")
        .id;
    let model = racquets
        .models_for_brand(brand)
        .find(|m| m.name == "EZONE 98")
        .expect("seeded model")
        .id;
    let racquet = RacquetRepo::create(
        pool,
        &CreateRacquet {
            client_id: client.id,
            brand_id: brand,
            model_id: model,
            head_size: Some(98.0),
            string_pattern: Some("16x19".to_string()),
            weight_grams: None,
            balance_point: None,
            stiffness_rating: None,
            length_cm: None,
            notes: None,
            stringing_notes: None,
        },
    )
    .await
    .unwrap();

    let strings = CatalogRepo::load_string_catalog(pool).await.unwrap();

    Fixture {
        stringer_id,
        client_id: client.id,
        racquet,
        strings,
    }
}

fn string_model(catalog: &CatalogIndex, brand: &str, model: &str) -> i64 {
    let brand = catalog
        .brands()
        .find(|b| b.name == brand)
        .expect("seeded brand")
        .id;
    catalog
        .models_for_brand(brand)
        .find(|m| m.name == model)
        .expect("seeded model")
        .id
}

fn stringing_job(fx: &Fixture, detail: Option<CreateStringingDetail>) -> CreateJob {
    CreateJob {
        client_id: fx.client_id,
        racquet_id: fx.racquet.id,
        stringer_id: fx.stringer_id,
        job_type: JobType::Stringing,
        job_notes: None,
        due_date: None,
        stringing_detail: detail,
    }
}

/// Advance a job one step through the repository, panicking on a lost
/// guard. Returns the updated row.
async fn advance_once(pool: &PgPool, job_id: Uuid) -> restring_db::models::job::Job {
    let job = JobRepo::find_by_id(pool, job_id).await.unwrap().unwrap();
    let plan = plan_advance(job.job_status.into(), job.completed_date.is_some()).unwrap();
    JobRepo::advance(pool, job.id, job.job_status, &plan)
        .await
        .unwrap()
        .expect("guard should hold")
}

// ---------------------------------------------------------------------------
// Test: stringing jobs carry a detail row, others do not
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_stringing_job_creates_detail_row(pool: PgPool) {
    let fx = fixture(&pool).await;
    let rpm = string_model(&fx.strings, "Babolat", "RPM Blast");

    let created = JobRepo::create(
        &pool,
        &stringing_job(
            &fx,
            Some(CreateStringingDetail {
                main_string_model_id: Some(rpm),
                tension_main: Some(24.0),
                ..Default::default()
            }),
        ),
    )
    .await
    .unwrap();

    assert_eq!(created.job.job_status, JobStatus::Pending);
    let detail = created.stringing_detail.expect("stringing jobs get a detail");
    assert_eq!(detail.main_string_model_id, Some(rpm));
    // Only explicit choices are stored; nothing was resolved in.
    assert_eq!(detail.cross_string_model_id, None);
    assert_eq!(detail.price, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_stringing_job_detail_defaults_to_empty(pool: PgPool) {
    let fx = fixture(&pool).await;
    let created = JobRepo::create(&pool, &stringing_job(&fx, None)).await.unwrap();
    let detail = created.stringing_detail.expect("detail row exists even when empty");
    assert_eq!(detail.main_string_model_id, None);
    assert_eq!(detail.tension_main, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_regrip_job_has_no_detail_row(pool: PgPool) {
    let fx = fixture(&pool).await;
    let created = JobRepo::create(
        &pool,
        &CreateJob {
            job_type: JobType::Regrip,
            stringing_detail: None,
            ..stringing_job(&fx, None)
        },
    )
    .await
    .unwrap();
    assert!(created.stringing_detail.is_none());
    assert!(JobRepo::find_detail(&pool, created.job.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: advance walks the chain and keeps completed_date idempotent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_advance_walks_the_full_chain(pool: PgPool) {
    let fx = fixture(&pool).await;
    let created = JobRepo::create(&pool, &stringing_job(&fx, None)).await.unwrap();

    let job = advance_once(&pool, created.job.id).await;
    assert_eq!(job.job_status, JobStatus::InProgress);
    assert!(job.completed_date.is_none());

    let job = advance_once(&pool, created.job.id).await;
    assert_eq!(job.job_status, JobStatus::Completed);
    let completed_date = job.completed_date.expect("completion stamps the date");

    let job = advance_once(&pool, created.job.id).await;
    assert_eq!(job.job_status, JobStatus::PickedUp);
    // Leaving completed never touches the date.
    assert_eq!(job.completed_date, Some(completed_date));

    // Terminal: the planner refuses before any write happens.
    assert!(plan_advance(job.job_status.into(), true).is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_stale_advance_loses_the_guard(pool: PgPool) {
    let fx = fixture(&pool).await;
    let created = JobRepo::create(&pool, &stringing_job(&fx, None)).await.unwrap();

    // Another device already advanced the job.
    advance_once(&pool, created.job.id).await;

    // Our plan was computed from the stale pending snapshot.
    let stale_plan = plan_advance(lifecycle::JobStatus::Pending, false).unwrap();
    let result = JobRepo::advance(&pool, created.job.id, JobStatus::Pending, &stale_plan)
        .await
        .unwrap();
    assert!(result.is_none(), "stale guard must not double-apply");

    let job = JobRepo::find_by_id(&pool, created.job.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.job_status, JobStatus::InProgress);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reentering_completed_preserves_the_date(pool: PgPool) {
    let fx = fixture(&pool).await;
    let created = JobRepo::create(&pool, &stringing_job(&fx, None)).await.unwrap();
    advance_once(&pool, created.job.id).await;
    let completed = advance_once(&pool, created.job.id).await;
    let first_date = completed.completed_date.unwrap();

    // A retried update replays the same transition; the plan sees the date
    // already set and must not overwrite it.
    let replay = plan_advance(lifecycle::JobStatus::InProgress, true).unwrap();
    assert!(!replay.set_completed_date);
    // Force the row back to make the replay applicable.
    sqlx::query("UPDATE jobs SET job_status = 'in_progress' WHERE id = $1")
        .bind(created.job.id)
        .execute(&pool)
        .await
        .unwrap();
    let job = JobRepo::advance(&pool, created.job.id, JobStatus::InProgress, &replay)
        .await
        .unwrap()
        .expect("guard holds");
    assert_eq!(job.job_status, JobStatus::Completed);
    assert_eq!(job.completed_date, Some(first_date));
}

// ---------------------------------------------------------------------------
// Test: last-known-specification provider
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_latest_recorded_spec_wins_over_notes(pool: PgPool) {
    let fx = fixture(&pool).await;
    let rpm = string_model(&fx.strings, "Babolat", "RPM Blast");
    let alu = string_model(&fx.strings, "Luxilon", "ALU Power");

    // Racquet notes describe an old setup.
    let racquet = RacquetRepo::update(
        &pool,
        fx.racquet.id,
        &restring_db::models::racquet::UpdateRacquet {
            stringing_notes: Some("Wilson NXT @ 25".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let older = JobRepo::create(
        &pool,
        &stringing_job(
            &fx,
            Some(CreateStringingDetail {
                main_string_model_id: Some(rpm),
                tension_main: Some(23.0),
                ..Default::default()
            }),
        ),
    )
    .await
    .unwrap();
    // Pin the ordering; two inserts in the same millisecond would tie.
    sqlx::query("UPDATE jobs SET created_at = created_at - INTERVAL '1 hour' WHERE id = $1")
        .bind(older.job.id)
        .execute(&pool)
        .await
        .unwrap();
    let newer = JobRepo::create(
        &pool,
        &stringing_job(
            &fx,
            Some(CreateStringingDetail {
                main_string_model_id: Some(alu),
                tension_main: Some(24.5),
                price: Some(40.0),
                ..Default::default()
            }),
        ),
    )
    .await
    .unwrap();

    let spec = JobRepo::last_known_spec(&pool, &racquet, &fx.strings)
        .await
        .unwrap()
        .expect("structured history exists");
    assert_eq!(spec.job_id, Some(newer.job.id));
    assert_eq!(spec.main_model_id, Some(alu));
    assert_eq!(spec.tension_main, Some(24.5));
    assert_eq!(spec.price, Some(40.0));

    // Excluding the newest job falls back to the older record, not notes.
    let prior = JobRepo::last_known_spec_before(
        &pool,
        &racquet,
        &fx.strings,
        Some(newer.job.id),
        Some(newer.job.created_at),
    )
    .await
    .unwrap()
    .expect("older record exists");
    assert_eq!(prior.job_id, Some(older.job.id));
    assert_eq!(prior.main_model_id, Some(rpm));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_notes_fallback_when_no_structured_history(pool: PgPool) {
    let fx = fixture(&pool).await;
    let nxt = string_model(&fx.strings, "Wilson", "NXT");

    let racquet = RacquetRepo::update(
        &pool,
        fx.racquet.id,
        &restring_db::models::racquet::UpdateRacquet {
            stringing_notes: Some("Wilson NXT @ 25".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let spec = JobRepo::last_known_spec(&pool, &racquet, &fx.strings)
        .await
        .unwrap()
        .expect("notes are parseable");
    assert_eq!(spec.job_id, None, "text-parsed specs carry no job id");
    assert_eq!(spec.main_model_id, Some(nxt));
    assert_eq!(spec.tension_main, Some(25.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_no_history_at_all_yields_none(pool: PgPool) {
    let fx = fixture(&pool).await;
    let spec = JobRepo::last_known_spec(&pool, &fx.racquet, &fx.strings)
        .await
        .unwrap();
    assert!(spec.is_none());
}
