//! Print job lifecycle integration tests over an embedded throwaway database
//! Run: cargo test -p print-server --test print_job_lifecycle

use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use print_server::db::define_schema;
use print_server::db::models::{
    JobState, PrintJobCreate, PrintJobUpdate, PrinterCreate, RECEIPT_PRINTER_TYPE,
};
use print_server::db::repository::{
    PrintJobRepository, PrintTimeFilter, PrinterRepository, RepoError,
};

struct TestDb {
    db: Surreal<Db>,
    _tmp: tempfile::TempDir,
}

async fn test_db() -> TestDb {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("spool").use_db("spool").await.unwrap();
    define_schema(&db).await.unwrap();
    TestDb { db, _tmp: tmp }
}

async fn create_receipt_printer(db: &Surreal<Db>, name: &str) -> String {
    let repo = PrinterRepository::new(db.clone());
    let printer = repo
        .create(PrinterCreate {
            printer_type_id: RECEIPT_PRINTER_TYPE.to_string(),
            name: name.to_string(),
            external_id: None,
        })
        .await
        .unwrap();
    print_server::db::models::serde_helpers::record_key(printer.id.as_ref().unwrap())
}

fn sample_document() -> serde_json::Value {
    json!([{
        "$type": "alignment",
        "alignment": "center",
        "children": [
            { "$type": "text", "value": "Hello" },
            { "$type": "cut" },
        ],
    }])
}

#[tokio::test]
async fn create_job_persists_job_and_document_together() {
    let harness = test_db().await;
    let printer_id = create_receipt_printer(&harness.db, "Front desk").await;
    let repo = PrintJobRepository::new(harness.db.clone());

    let (job, data) = repo
        .create_receipt_job(
            &printer_id,
            PrintJobCreate {
                external_id: Some("order-1".to_string()),
                data: sample_document(),
            },
        )
        .await
        .unwrap();

    assert_eq!(job.printer_id, printer_id);
    assert_eq!(job.print_job_type_id, "receipt");
    assert_eq!(job.external_id.as_deref(), Some("order-1"));
    assert_eq!(job.state(), JobState::Created);
    assert!(job.collection_time.is_none());
    assert!(job.print_time.is_none());
    // 文档按提交原样回显
    assert_eq!(data.unwrap(), sample_document());
}

#[tokio::test]
async fn create_job_for_unknown_printer_is_not_found_even_with_bad_document() {
    let harness = test_db().await;
    let repo = PrintJobRepository::new(harness.db.clone());

    // 存在性检查先于文档校验
    let err = repo
        .create_receipt_job(
            "00000000-0000-0000-0000-000000000000",
            PrintJobCreate {
                external_id: None,
                data: json!({ "$type": "bogus" }),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)), "{err}");
}

#[tokio::test]
async fn create_job_for_non_receipt_printer_is_unsupported() {
    let harness = test_db().await;
    harness
        .db
        .query("UPSERT printer_type:laser SET name = 'Laser'")
        .await
        .unwrap();

    let printer_repo = PrinterRepository::new(harness.db.clone());
    let printer = printer_repo
        .create(PrinterCreate {
            printer_type_id: "laser".to_string(),
            name: "Office laser".to_string(),
            external_id: None,
        })
        .await
        .unwrap();
    let printer_id =
        print_server::db::models::serde_helpers::record_key(printer.id.as_ref().unwrap());

    let repo = PrintJobRepository::new(harness.db.clone());
    // 文档本身合法，错误完全由打印机类型决定
    let err = repo
        .create_receipt_job(
            &printer_id,
            PrintJobCreate {
                external_id: None,
                data: sample_document(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Unsupported(_)), "{err}");
}

#[tokio::test]
async fn invalid_document_rejected_and_nothing_persisted() {
    let harness = test_db().await;
    let printer_id = create_receipt_printer(&harness.db, "Front desk").await;
    let repo = PrintJobRepository::new(harness.db.clone());

    let err = repo
        .create_receipt_job(
            &printer_id,
            PrintJobCreate {
                external_id: None,
                data: json!({ "$type": "bogus" }),
            },
        )
        .await
        .unwrap_err();
    match err {
        RepoError::Validation(msg) => {
            assert!(msg.contains("bogus"), "{msg}");
        }
        other => panic!("expected Validation error, got {other}"),
    }

    let jobs = repo
        .list_jobs(&printer_id, PrintTimeFilter::All)
        .await
        .unwrap();
    assert!(jobs.is_empty());
}

#[tokio::test]
async fn list_jobs_newest_first_with_documents() {
    let harness = test_db().await;
    let printer_id = create_receipt_printer(&harness.db, "Front desk").await;
    let repo = PrintJobRepository::new(harness.db.clone());

    for i in 0..3 {
        repo.create_receipt_job(
            &printer_id,
            PrintJobCreate {
                external_id: Some(format!("order-{i}")),
                data: sample_document(),
            },
        )
        .await
        .unwrap();
        // creation_time 以毫秒为粒度，拉开间隔保证排序可断言
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let jobs = repo
        .list_jobs(&printer_id, PrintTimeFilter::All)
        .await
        .unwrap();
    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[0].0.external_id.as_deref(), Some("order-2"));
    assert_eq!(jobs[2].0.external_id.as_deref(), Some("order-0"));
    for (_, data) in &jobs {
        assert_eq!(data.as_ref().unwrap(), &sample_document());
    }
}

#[tokio::test]
async fn unprinted_filter_returns_only_jobs_without_print_time() {
    let harness = test_db().await;
    let printer_id = create_receipt_printer(&harness.db, "Front desk").await;
    let repo = PrintJobRepository::new(harness.db.clone());

    let (first, _) = repo
        .create_receipt_job(
            &printer_id,
            PrintJobCreate {
                external_id: Some("printed".to_string()),
                data: sample_document(),
            },
        )
        .await
        .unwrap();
    repo.create_receipt_job(
        &printer_id,
        PrintJobCreate {
            external_id: Some("pending".to_string()),
            data: sample_document(),
        },
    )
    .await
    .unwrap();

    let first_id = print_server::db::models::serde_helpers::record_key(first.id.as_ref().unwrap());
    repo.update_job(
        &printer_id,
        &first_id,
        PrintJobUpdate {
            collection_time: None,
            print_time: Some(Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())),
        },
    )
    .await
    .unwrap();

    let unprinted = repo
        .list_jobs(&printer_id, PrintTimeFilter::Unprinted)
        .await
        .unwrap();
    assert_eq!(unprinted.len(), 1);
    assert_eq!(unprinted[0].0.external_id.as_deref(), Some("pending"));

    let all = repo
        .list_jobs(&printer_id, PrintTimeFilter::All)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn update_job_writes_only_supplied_fields() {
    let harness = test_db().await;
    let printer_id = create_receipt_printer(&harness.db, "Front desk").await;
    let repo = PrintJobRepository::new(harness.db.clone());

    let (job, _) = repo
        .create_receipt_job(
            &printer_id,
            PrintJobCreate {
                external_id: None,
                data: sample_document(),
            },
        )
        .await
        .unwrap();
    let job_id = print_server::db::models::serde_helpers::record_key(job.id.as_ref().unwrap());

    let collected_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    let (job, _) = repo
        .update_job(
            &printer_id,
            &job_id,
            PrintJobUpdate {
                collection_time: Some(Some(collected_at)),
                print_time: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(job.collection_time, Some(collected_at.timestamp_millis()));
    assert!(job.print_time.is_none());
    assert_eq!(job.state(), JobState::Collected);

    // printTime 单独设置，collectionTime 保持原值
    let printed_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 35, 0).unwrap();
    let (job, data) = repo
        .update_job(
            &printer_id,
            &job_id,
            PrintJobUpdate {
                collection_time: None,
                print_time: Some(Some(printed_at)),
            },
        )
        .await
        .unwrap();
    assert_eq!(job.collection_time, Some(collected_at.timestamp_millis()));
    assert_eq!(job.print_time, Some(printed_at.timestamp_millis()));
    assert_eq!(job.state(), JobState::CollectedAndPrinted);
    assert_eq!(data.unwrap(), sample_document());
}

#[tokio::test]
async fn empty_patch_returns_job_unchanged() {
    let harness = test_db().await;
    let printer_id = create_receipt_printer(&harness.db, "Front desk").await;
    let repo = PrintJobRepository::new(harness.db.clone());

    let (job, _) = repo
        .create_receipt_job(
            &printer_id,
            PrintJobCreate {
                external_id: None,
                data: sample_document(),
            },
        )
        .await
        .unwrap();
    let job_id = print_server::db::models::serde_helpers::record_key(job.id.as_ref().unwrap());

    let (unchanged, data) = repo
        .update_job(&printer_id, &job_id, PrintJobUpdate::default())
        .await
        .unwrap();
    assert_eq!(unchanged.creation_time, job.creation_time);
    assert!(unchanged.collection_time.is_none());
    assert!(unchanged.print_time.is_none());
    assert_eq!(data.unwrap(), sample_document());
}

#[tokio::test]
async fn explicit_null_clears_a_timestamp() {
    let harness = test_db().await;
    let printer_id = create_receipt_printer(&harness.db, "Front desk").await;
    let repo = PrintJobRepository::new(harness.db.clone());

    let (job, _) = repo
        .create_receipt_job(
            &printer_id,
            PrintJobCreate {
                external_id: None,
                data: sample_document(),
            },
        )
        .await
        .unwrap();
    let job_id = print_server::db::models::serde_helpers::record_key(job.id.as_ref().unwrap());

    repo.update_job(
        &printer_id,
        &job_id,
        PrintJobUpdate {
            collection_time: None,
            print_time: Some(Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())),
        },
    )
    .await
    .unwrap();

    // 状态机没有终态：清空 printTime 让任务回到未打印
    let (job, _) = repo
        .update_job(
            &printer_id,
            &job_id,
            PrintJobUpdate {
                collection_time: None,
                print_time: Some(None),
            },
        )
        .await
        .unwrap();
    assert!(job.print_time.is_none());
    assert_eq!(job.state(), JobState::Created);

    let unprinted = repo
        .list_jobs(&printer_id, PrintTimeFilter::Unprinted)
        .await
        .unwrap();
    assert_eq!(unprinted.len(), 1);
}

#[tokio::test]
async fn update_job_scoped_to_owning_printer() {
    let harness = test_db().await;
    let printer_a = create_receipt_printer(&harness.db, "Printer A").await;
    let printer_b = create_receipt_printer(&harness.db, "Printer B").await;
    let repo = PrintJobRepository::new(harness.db.clone());

    let (job, _) = repo
        .create_receipt_job(
            &printer_a,
            PrintJobCreate {
                external_id: None,
                data: sample_document(),
            },
        )
        .await
        .unwrap();
    let job_id = print_server::db::models::serde_helpers::record_key(job.id.as_ref().unwrap());

    // 任务存在但归属另一台打印机
    let err = repo
        .update_job(&printer_b, &job_id, PrintJobUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)), "{err}");

    let err = repo
        .update_job(&printer_a, "not-a-job", PrintJobUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)), "{err}");
}

#[tokio::test]
async fn soft_deleted_printer_is_gone_for_jobs() {
    let harness = test_db().await;
    let printer_id = create_receipt_printer(&harness.db, "Front desk").await;

    let printer_repo = PrinterRepository::new(harness.db.clone());
    printer_repo.delete(&printer_id).await.unwrap();

    let repo = PrintJobRepository::new(harness.db.clone());
    let err = repo
        .create_receipt_job(
            &printer_id,
            PrintJobCreate {
                external_id: None,
                data: sample_document(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)), "{err}");
}
