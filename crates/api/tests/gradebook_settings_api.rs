//! HTTP-level integration tests for the gradebook settings endpoint.
//!
//! Covers the merge semantics, strong-parameter filtering, validation
//! failures and the authentication/authorization guards.

mod common;

use axum::http::StatusCode;
use common::{body_json, enroll, put_json, put_json_auth, seed_course, seed_user, token_for};
use lms_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

fn settings_uri(course_id: i64) -> String {
    format!("/api/v1/courses/{course_id}/gradebook_settings")
}

/// A teacher enrolled in a fresh course. Returns `(user_id, course_id, token)`.
async fn teacher_in_course(pool: &PgPool) -> (i64, i64, String) {
    let user_id = seed_user(pool, "teacher", None).await;
    let course_id = seed_course(pool, "BIO-101").await;
    enroll(pool, user_id, course_id, "teacher").await;
    (user_id, course_id, token_for(user_id, "user"))
}

// ---------------------------------------------------------------------------
// Success paths
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_returns_course_settings_and_colors(pool: PgPool) {
    let (user_id, course_id, token) = teacher_in_course(&pool).await;
    let app = common::build_test_app(pool.clone());

    let body = json!({
        "gradebook_settings": {
            "show_concluded_enrollments": "true",
            "filter_rows_by": {"section_id": "7"},
            "colors": {"late": "#ff0000"}
        }
    });
    let response = put_json_auth(app, &settings_uri(course_id), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let key = course_id.to_string();
    assert_eq!(
        json["gradebook_settings"][&key]["show_concluded_enrollments"],
        "true"
    );
    assert_eq!(json["gradebook_settings"][&key]["filter_rows_by"]["section_id"], "7");
    assert_eq!(json["gradebook_settings"]["colors"]["late"], "#ff0000");

    let saved = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(
        saved.preferences["gradebook_settings"]["colors"],
        json!({"late": "#ff0000"})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_merge_keeps_sibling_keys(pool: PgPool) {
    let (user_id, course_id, token) = teacher_in_course(&pool).await;
    let key = course_id.to_string();

    UserRepo::update_preferences(
        &pool,
        user_id,
        &json!({
            "theme": "dark",
            "gradebook_settings": {
                "999": {"sort_rows_by_direction": "ascending"},
                &key: {
                    "filter_columns_by": {"grading_period_id": "1"},
                    "student_column_display_as": "first_last"
                },
                "colors": {"missing": "#111111"}
            }
        }),
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let body = json!({
        "gradebook_settings": {
            "filter_columns_by": {"context_module_id": "3"},
            "colors": {"late": "#222222"}
        }
    });
    let response = put_json_auth(app, &settings_uri(course_id), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["gradebook_settings"][&key]["filter_columns_by"],
        json!({"grading_period_id": "1", "context_module_id": "3"})
    );
    assert_eq!(
        json["gradebook_settings"][&key]["student_column_display_as"],
        "first_last"
    );
    assert_eq!(
        json["gradebook_settings"]["colors"],
        json!({"missing": "#111111", "late": "#222222"})
    );
    // Other courses are not part of the response.
    assert!(json["gradebook_settings"].get("999").is_none());

    let saved = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(saved.preferences["theme"], "dark");
    assert_eq!(
        saved.preferences["gradebook_settings"]["999"]["sort_rows_by_direction"],
        "ascending"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_fields_are_dropped(pool: PgPool) {
    let (user_id, course_id, token) = teacher_in_course(&pool).await;
    let app = common::build_test_app(pool.clone());

    let body = json!({
        "gradebook_settings": {
            "show_inactive_enrollments": "false",
            "is_admin": true,
            "filter_rows_by": {"section_id": "1", "student_id": "2"},
            "colors": {"late": "#abc", "urgent": "#fff"}
        }
    });
    let response = put_json_auth(app, &settings_uri(course_id), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let settings = &json["gradebook_settings"][course_id.to_string()];
    assert!(settings.get("is_admin").is_none());
    assert_eq!(settings["filter_rows_by"], json!({"section_id": "1"}));
    assert_eq!(json["gradebook_settings"]["colors"], json!({"late": "#abc"}));

    let saved = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert!(!saved.preferences.to_string().contains("is_admin"));
    assert!(!saved.preferences.to_string().contains("urgent"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_colors_default_to_empty_object(pool: PgPool) {
    let (_user_id, course_id, token) = teacher_in_course(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({"gradebook_settings": {"sort_rows_by_column_id": "student"}});
    let response = put_json_auth(app, &settings_uri(course_id), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["gradebook_settings"]["colors"], json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_site_admin_needs_no_enrollment(pool: PgPool) {
    let admin_id = seed_user(&pool, "admin", Some("admin")).await;
    let course_id = seed_course(&pool, "ADM").await;
    let app = common::build_test_app(pool);

    let body = json!({"gradebook_settings": {"show_unpublished_assignments": "true"}});
    let response = put_json_auth(
        app,
        &settings_uri(course_id),
        body,
        &token_for(admin_id, "admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_color_returns_422_and_saves_nothing(pool: PgPool) {
    let (user_id, course_id, token) = teacher_in_course(&pool).await;
    let app = common::build_test_app(pool.clone());

    let body = json!({
        "gradebook_settings": {
            "show_concluded_enrollments": "true",
            "colors": {"dropped": "not-a-color"}
        }
    });
    let response = put_json_auth(app, &settings_uri(course_id), body, &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNPROCESSABLE_ENTITY");
    assert!(json["errors"]["gradebook_settings.colors.dropped"].is_array());

    let saved = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(saved.preferences, json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_oversized_preferences_return_422(pool: PgPool) {
    let (_user_id, course_id, token) = teacher_in_course(&pool).await;
    let app = common::build_test_app(pool);

    let filters: Vec<String> = (0..8_000).map(|i| format!("filter-{i}")).collect();
    let body = json!({"gradebook_settings": {"selected_view_options_filters": filters}});
    let response = put_json_auth(app, &settings_uri(course_id), body, &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert!(json["errors"]["preferences"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_gradebook_settings_returns_400(pool: PgPool) {
    let (_user_id, course_id, token) = teacher_in_course(&pool).await;
    let app = common::build_test_app(pool);

    let response =
        put_json_auth(app, &settings_uri(course_id), json!({"other": 1}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_requires_authentication(pool: PgPool) {
    let course_id = seed_course(&pool, "X").await;
    let app = common::build_test_app(pool);

    let body = json!({"gradebook_settings": {"show_concluded_enrollments": "true"}});
    let response = put_json(app, &settings_uri(course_id), body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_is_forbidden(pool: PgPool) {
    let user_id = seed_user(&pool, "student", None).await;
    let course_id = seed_course(&pool, "S").await;
    enroll(&pool, user_id, course_id, "student").await;
    let app = common::build_test_app(pool);

    let body = json!({"gradebook_settings": {"show_concluded_enrollments": "true"}});
    let response = put_json_auth(
        app,
        &settings_uri(course_id),
        body,
        &token_for(user_id, "user"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_designer_may_view_grades_and_save(pool: PgPool) {
    let user_id = seed_user(&pool, "designer", None).await;
    let course_id = seed_course(&pool, "D").await;
    enroll(&pool, user_id, course_id, "designer").await;
    let app = common::build_test_app(pool);

    let body = json!({"gradebook_settings": {"student_column_secondary_info": "sis_id"}});
    let response = put_json_auth(
        app,
        &settings_uri(course_id),
        body,
        &token_for(user_id, "user"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_course_returns_404(pool: PgPool) {
    let user_id = seed_user(&pool, "ghost", None).await;
    let app = common::build_test_app(pool);

    let body = json!({"gradebook_settings": {"show_concluded_enrollments": "true"}});
    let response =
        put_json_auth(app, &settings_uri(424_242), body, &token_for(user_id, "user")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
