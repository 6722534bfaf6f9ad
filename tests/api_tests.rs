mod common;

use chrono::{Datelike, Duration, TimeZone, Utc};
use reqwest::StatusCode;
use serde_json::json;

macro_rules! spawn_or_skip {
    () => {
        match common::spawn_app().await {
            Some(app) => app,
            None => return,
        }
    };
}

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = spawn_or_skip!();

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

// ── Admin token ─────────────────────────────────────────────────

#[tokio::test]
async fn admin_routes_require_token() {
    let app = spawn_or_skip!();

    let resp = app
        .client
        .post(app.url("/api/v1/admin/companies"))
        .json(&json!({ "name": "Acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .client
        .post(app.url("/api/v1/admin/companies"))
        .bearer_auth("not-the-admin-token")
        .json(&json!({ "name": "Acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .client
        .get(app.url("/admin/education/upload"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.text().await.unwrap().contains("admin_token"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn admin_cookie_is_accepted() {
    let app = spawn_or_skip!();

    let resp = app
        .client
        .get(app.url("/admin/education/bulk"))
        .header("cookie", format!("admin_token={}", common::ADMIN_TOKEN))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Bulk upload"));

    common::cleanup(app).await;
}

// ── Companies ───────────────────────────────────────────────────

#[tokio::test]
async fn create_and_show_company() {
    let app = spawn_or_skip!();

    let company = app
        .create_company(&json!({
            "name": "Acme Corp",
            "email": "hr@acme.test",
            "languages": ["en", "nl"],
            "en_slogan": "We build things",
            "nl_slogan": "Wij bouwen dingen",
        }))
        .await;
    assert_eq!(company["slug_name"], "acme-corp");
    assert_eq!(company["number_of_jobs"], 0);

    let (body, status) = app.get("/api/v1/companies/acme-corp").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme Corp");
    assert_eq!(body["translations"]["nl"]["slogan"], "Wij bouwen dingen");
    assert_eq!(body["translations"]["en"]["slogan"], "We build things");

    let (list, status) = app.get("/api/v1/companies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn unknown_company_is_not_found() {
    let app = spawn_or_skip!();

    let (_, status) = app.get("/api/v1/companies/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let resp = app.client.get(app.url("/company/nobody")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.text().await.unwrap().contains("Company not found"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let app = spawn_or_skip!();

    app.create_company(&json!({ "name": "Acme", "slugName": "acme" }))
        .await;
    let (_, status) = app
        .post_admin(
            "/api/v1/admin/companies",
            &json!({ "name": "Other", "slugName": "acme" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    common::cleanup(app).await;
}

#[tokio::test]
async fn invalid_flat_input_is_rejected() {
    let app = spawn_or_skip!();

    let (_, status) = app
        .post_admin(
            "/api/v1/admin/companies",
            &json!({ "name": "Acme", "languages": ["EN"] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, status) = app.post_admin("/api/v1/admin/companies", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn malformed_scalars_keep_current_values() {
    let app = spawn_or_skip!();

    app.create_company(&json!({ "name": "Acme", "phone": "040", "hidden": true }))
        .await;

    let (body, status) = app
        .put_admin(
            "/api/v1/admin/companies/acme",
            &json!({ "hidden": "sometimes", "phone": ["06"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["hidden"], true);
    assert_eq!(body["phone"], "040");

    common::cleanup(app).await;
}

#[tokio::test]
async fn flat_form_round_trip_and_language_removal() {
    let app = spawn_or_skip!();

    app.create_company(&json!({
        "name": "Acme",
        "languages": ["en", "nl"],
        "en_description": "English",
        "nl_description": "Nederlands",
    }))
    .await;

    let (form, status) = app.get_admin("/api/v1/admin/companies/acme/form").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["languages"], json!(["en", "nl"]));
    assert_eq!(form["nl_description"], "Nederlands");
    assert_eq!(form["en_logo"], "");

    // Submitting the snapshot unchanged keeps everything
    let (body, status) = app.put_admin("/api/v1/admin/companies/acme", &form).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["translations"]["nl"]["description"], "Nederlands");

    // Urlencoded submission that drops a language
    let resp = app
        .client
        .put(app.url("/api/v1/admin/companies/acme"))
        .bearer_auth(common::ADMIN_TOKEN)
        .form(&[
            ("languages[]", "en"),
            ("en_description", "Updated"),
            ("phone", "040-1234567"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (body, _) = app.get("/api/v1/companies/acme").await;
    assert_eq!(body["phone"], "040-1234567");
    assert_eq!(body["translations"]["en"]["description"], "Updated");
    assert!(body["translations"].get("nl").is_none());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM company_i18n")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn hidden_companies_are_not_listed() {
    let app = spawn_or_skip!();

    app.create_company(&json!({ "name": "Visible" })).await;
    app.create_company(&json!({ "name": "Secret", "hidden": true }))
        .await;

    let (list, _) = app.get("/api/v1/companies").await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Visible"]);

    common::cleanup(app).await;
}

// ── Packets & jobs ──────────────────────────────────────────────

#[tokio::test]
async fn jobs_in_active_packets() {
    let app = spawn_or_skip!();

    app.create_company(&json!({ "name": "Acme" })).await;
    let packet = app
        .create_packet(
            "acme",
            &json!({ "starts": "2020-01-01", "expires": "2099-12-31", "published": true }),
        )
        .await;
    assert_eq!(packet["published"], true);
    let packet_id = packet["id"].as_str().unwrap();

    let job = app
        .create_job(
            packet_id,
            &json!({ "name": "Backend Engineer", "active": true, "language": "en" }),
        )
        .await;
    assert_eq!(job["ascii_name"], "backend-engineer");

    app.create_job(packet_id, &json!({ "name": "Intern" })).await;

    let (body, status) = app.get("/api/v1/companies/acme/jobs/backend-engineer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"]["name"], "Backend Engineer");

    let (body, _) = app.get("/api/v1/companies/acme/jobs/unknown").await;
    assert!(body["job"].is_null());

    let (body, status) = app.get("/api/v1/companies/nobody/jobs/backend-engineer").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["job"].is_null());

    let (body, _) = app.get("/api/v1/companies/acme").await;
    assert_eq!(body["number_of_jobs"], 2);

    // Only the active job of the active packet
    let (body, _) = app.get("/api/v1/jobs/active").await;
    let active = body.as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["company_slug"], "acme");

    let (body, _) = app.get("/api/v1/jobs").await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    common::cleanup(app).await;
}

#[tokio::test]
async fn packet_window_is_validated() {
    let app = spawn_or_skip!();

    app.create_company(&json!({ "name": "Acme" })).await;
    let (_, status) = app
        .post_admin(
            "/api/v1/admin/companies/acme/packets",
            &json!({ "starts": "2024-02-01", "expires": "2024-01-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let packet = app
        .create_packet(
            "acme",
            &json!({ "startingDate": "2024-01-01", "expirationDate": "2024-02-01" }),
        )
        .await;
    assert_eq!(packet["starts"], "2024-01-01");
    assert_eq!(packet["expires"], "2024-02-01");
    assert_eq!(packet["published"], false);
    let id = packet["id"].as_str().unwrap();

    let (_, status) = app
        .put_admin(&format!("/api/v1/admin/packets/{id}"), &json!({ "starts": "2024-03-01" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn expire_sweep_unpublishes_old_packets() {
    let app = spawn_or_skip!();

    app.create_company(&json!({ "name": "Acme" })).await;
    let old = app
        .create_packet(
            "acme",
            &json!({ "starts": "2020-01-01", "expires": "2020-06-30", "published": true }),
        )
        .await;
    app.create_packet(
        "acme",
        &json!({ "starts": "2020-01-01", "expires": "2099-12-31", "published": true }),
    )
    .await;

    let (body, status) = app
        .post_admin("/api/v1/admin/packets/expire", &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expired"], 1);

    let published: bool = sqlx::query_scalar("SELECT published FROM company_packets WHERE id = $1")
        .bind(uuid::Uuid::parse_str(old["id"].as_str().unwrap()).unwrap())
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert!(!published);

    // A second sweep finds nothing left to do
    let (body, _) = app
        .post_admin("/api/v1/admin/packets/expire", &json!({}))
        .await;
    assert_eq!(body["expired"], 0);

    let (events, _) = app.get_admin("/api/v1/admin/audit").await;
    assert!(events
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["action"] == "packet.expired" && e["actor"] == "sweeper"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn expire_sweep_only_writes_the_published_flag() {
    let app = spawn_or_skip!();

    app.create_company(&json!({ "name": "Acme" })).await;
    let lapsed = app
        .create_packet(
            "acme",
            &json!({ "starts": "2020-01-01", "expires": "2020-06-30", "published": true }),
        )
        .await;
    let extended = app
        .create_packet(
            "acme",
            &json!({ "starts": "2020-01-01", "expires": "2020-06-30", "published": true }),
        )
        .await;
    let extended_id = extended["id"].as_str().unwrap();

    let (_, status) = app
        .put_admin(
            &format!("/api/v1/admin/packets/{extended_id}"),
            &json!({ "expires": "2099-12-31" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let boundary = Utc.with_ymd_and_hms(2020, 6, 30, 0, 0, 0).unwrap();
    let swept = memberweb::worker::sweep_expired(&app.pool, boundary)
        .await
        .unwrap();
    assert_eq!(swept, 0);

    let swept = memberweb::worker::sweep_expired(&app.pool, boundary + Duration::seconds(1))
        .await
        .unwrap();
    assert_eq!(swept, 1);

    let lapsed_id = uuid::Uuid::parse_str(lapsed["id"].as_str().unwrap()).unwrap();
    let row = memberweb::db::packets::find_by_id(&app.pool, lapsed_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!row.published);
    assert_eq!(row.expires.to_string(), "2020-06-30");

    let extended_id = uuid::Uuid::parse_str(extended_id).unwrap();
    let row = memberweb::db::packets::find_by_id(&app.pool, extended_id)
        .await
        .unwrap()
        .unwrap();
    assert!(row.published);
    assert_eq!(row.expires.to_string(), "2099-12-31");

    common::cleanup(app).await;
}

#[tokio::test]
async fn deleting_a_company_removes_its_jobs() {
    let app = spawn_or_skip!();

    app.create_company(&json!({ "name": "Acme" })).await;
    let packet = app
        .create_packet("acme", &json!({ "starts": "2020-01-01", "expires": "2099-12-31" }))
        .await;
    app.create_job(packet["id"].as_str().unwrap(), &json!({ "name": "Engineer" }))
        .await;

    let resp = app
        .client
        .delete(app.url("/api/v1/admin/companies/acme"))
        .bearer_auth(common::ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(jobs, 0);

    common::cleanup(app).await;
}

// ── Front page ──────────────────────────────────────────────────

#[tokio::test]
async fn frontpage_payload() {
    let app = spawn_or_skip!();

    let today = Utc::now().date_naive();
    let birth = today.with_year(today.year() - 24).unwrap();
    sqlx::query("INSERT INTO members (lidnr, full_name, birth) VALUES (1, 'Jane Doe', $1)")
        .bind(birth)
        .execute(&app.pool)
        .await
        .unwrap();

    let soon = Utc::now() + Duration::hours(2);
    sqlx::query(
        "INSERT INTO activities (name, begin_time, end_time) VALUES ('Lunch lecture', $1, $2)",
    )
    .bind(soon)
    .bind(soon + Duration::hours(1))
    .execute(&app.pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO news_items (title, date) VALUES ('Old news', $1), ('Fresh news', $2)")
        .bind(Utc::now() - Duration::days(30))
        .bind(Utc::now() - Duration::hours(1))
        .execute(&app.pool)
        .await
        .unwrap();

    let (body, status) = app.get("/api/v1/frontpage").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["birthdays"][0]["member"]["full_name"], "Jane Doe");
    assert_eq!(body["birthdays"][0]["age"], 24);
    assert!(body["birthdayTag"].is_null());
    assert!(body["poll"].is_null());
    assert!(body["weeklyPhoto"].is_null());
    assert_eq!(body["activities"][0]["name"], "Lunch lecture");

    // news_count is 2: the fresh item and the activity beat the old item
    let news = body["news"].as_array().unwrap();
    assert_eq!(news.len(), 2);
    assert!(news.iter().all(|item| item["title"] != "Old news"));
    assert!(news.iter().any(|item| item["type"] == "activity"));

    let resp = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Jane Doe (24)"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn frontpage_poll_totals() {
    let app = spawn_or_skip!();

    let poll_id: i32 = sqlx::query_scalar(
        "INSERT INTO polls (question, expiry_date) VALUES ('Pizza?', $1) RETURNING id",
    )
    .bind(Utc::now() + Duration::days(7))
    .fetch_one(&app.pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO poll_options (poll_id, text, votes) VALUES ($1, 'Yes', 7), ($1, 'No', 3)",
    )
    .bind(poll_id)
    .execute(&app.pool)
    .await
    .unwrap();

    let (body, _) = app.get("/api/v1/frontpage").await;
    assert_eq!(body["poll"]["poll"]["question"], "Pizza?");
    assert_eq!(body["poll"]["total_votes"], 10);
    assert_eq!(body["poll"]["options"].as_array().unwrap().len(), 2);

    common::cleanup(app).await;
}

// ── Education ───────────────────────────────────────────────────

#[tokio::test]
async fn exam_upload_stores_file_and_metadata() {
    let app = spawn_or_skip!();

    let form = reqwest::multipart::Form::new()
        .text("course", "2IT60")
        .text("date", "2024-01-30")
        .text("examType", "answers")
        .part(
            "file",
            reqwest::multipart::Part::bytes(b"%PDF-1.4 logic exam".to_vec())
                .file_name("logic.pdf")
                .mime_str("application/pdf")
                .unwrap(),
        );

    let resp = app
        .client
        .post(app.url("/api/v1/admin/education/upload"))
        .bearer_auth(common::ADMIN_TOKEN)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let filename = body["exam"]["filename"].as_str().unwrap();
    assert!(app.upload_dir.join("exams").join(filename).exists());

    let (exams, _) = app.get("/api/v1/education/exams?course=2IT60").await;
    assert_eq!(exams[0]["exam_type"], "answers");
    assert_eq!(exams[0]["language"], "en");

    common::cleanup(app).await;
}

#[tokio::test]
async fn exam_upload_rejects_non_pdf() {
    let app = spawn_or_skip!();

    let form = reqwest::multipart::Form::new()
        .text("course", "2IT60")
        .text("date", "2024-01-30")
        .part(
            "file",
            reqwest::multipart::Part::bytes(b"plain text".to_vec()).file_name("notes.txt"),
        );

    let resp = app
        .client
        .post(app.url("/api/v1/admin/education/upload"))
        .bearer_auth(common::ADMIN_TOKEN)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);

    common::cleanup(app).await;
}

#[tokio::test]
async fn bulk_upload_goes_to_temp() {
    let app = spawn_or_skip!();

    let form = reqwest::multipart::Form::new()
        .part(
            "file[]",
            reqwest::multipart::Part::bytes(b"%PDF-1.4 one".to_vec()).file_name("one.pdf"),
        )
        .part(
            "file[]",
            reqwest::multipart::Part::bytes(b"%PDF-1.4 two".to_vec()).file_name("two.pdf"),
        );

    let resp = app
        .client
        .post(app.url("/api/v1/admin/education/bulk"))
        .bearer_auth(common::ADMIN_TOKEN)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["original"], "one.pdf");
    assert!(app
        .upload_dir
        .join("temp")
        .join(files[1]["stored"].as_str().unwrap())
        .exists());

    common::cleanup(app).await;
}
