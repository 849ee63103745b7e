mod common;

use axum::http::{header, Method, StatusCode};
use common::TestApp;
use roomescape::{
    parse::format_date,
    reservations::{repo::ReservationRepository, repo_types::NewReservation},
};
use serde_json::json;
use time::Duration;

const FUTURE_DATE: &str = "2099-01-01";

#[tokio::test]
async fn reservation_lifecycle() {
    let app = TestApp::spawn().await;
    let admin = app.admin_cookie().await;
    let time_id = app.create_time(&admin, "10:00").await;
    let theme_id = app.create_theme(&admin, "temple").await;

    let body = json!({ "name": "brown", "date": FUTURE_DATE, "timeId": time_id, "themeId": theme_id });
    let created = app
        .send(Method::POST, "/reservations", Some(body.clone()), None)
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().unwrap();
    assert_eq!(
        created.headers.get(header::LOCATION).unwrap(),
        &format!("/reservations/{}", id)
    );
    assert_eq!(created.body["name"], "brown");
    assert_eq!(created.body["date"], FUTURE_DATE);
    assert_eq!(created.body["time"]["startAt"], "10:00");
    assert_eq!(created.body["theme"]["name"], "temple");

    let listed = app.send(Method::GET, "/reservations", None, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([created.body.clone()]));

    let duplicate = app
        .send(Method::POST, "/reservations", Some(body), None)
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let uri = format!("/reservations/{}", id);
    let deleted = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let again = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_time_or_theme_is_not_found() {
    let app = TestApp::spawn().await;
    let admin = app.admin_cookie().await;
    let time_id = app.create_time(&admin, "10:00").await;
    let theme_id = app.create_theme(&admin, "temple").await;

    for (t, th) in [(time_id + 1, theme_id), (time_id, theme_id + 1)] {
        let res = app
            .send(
                Method::POST,
                "/reservations",
                Some(json!({ "name": "brown", "date": FUTURE_DATE, "timeId": t, "themeId": th })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{:?}", res.body);
        assert!(res.body["error"].is_string());
    }
}

#[tokio::test]
async fn past_slot_and_malformed_input_are_bad_requests() {
    let app = TestApp::spawn().await;
    let admin = app.admin_cookie().await;
    let time_id = app.create_time(&admin, "10:00").await;
    let theme_id = app.create_theme(&admin, "temple").await;

    for (name, date) in [("brown", "2000-01-01"), ("   ", FUTURE_DATE), ("brown", "01/01/2099")] {
        let res = app
            .send(
                Method::POST,
                "/reservations",
                Some(json!({ "name": name, "date": date, "timeId": time_id, "themeId": theme_id })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{name:?} {date}");
    }
}

#[tokio::test]
async fn referenced_time_and_theme_cannot_be_deleted() {
    let app = TestApp::spawn().await;
    let admin = app.admin_cookie().await;
    let time_id = app.create_time(&admin, "10:00").await;
    let theme_id = app.create_theme(&admin, "temple").await;
    let created = app
        .send(
            Method::POST,
            "/reservations",
            Some(json!({ "name": "brown", "date": FUTURE_DATE, "timeId": time_id, "themeId": theme_id })),
            None,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let time = app
        .send(Method::DELETE, &format!("/times/{}", time_id), None, Some(&admin))
        .await;
    assert_eq!(time.status, StatusCode::CONFLICT);
    let theme = app
        .send(Method::DELETE, &format!("/themes/{}", theme_id), None, Some(&admin))
        .await;
    assert_eq!(theme.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn available_times_flag_booked_slots() {
    let app = TestApp::spawn().await;
    let admin = app.admin_cookie().await;
    let ten = app.create_time(&admin, "10:00").await;
    let eleven = app.create_time(&admin, "11:00").await;
    let theme_id = app.create_theme(&admin, "temple").await;
    let other_theme = app.create_theme(&admin, "castle").await;
    app.send(
        Method::POST,
        "/reservations",
        Some(json!({ "name": "brown", "date": FUTURE_DATE, "timeId": ten, "themeId": theme_id })),
        None,
    )
    .await;

    let uri = format!("/times/available?date={}&themeId={}", FUTURE_DATE, theme_id);
    let res = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!([
            { "id": ten, "startAt": "10:00", "alreadyBooked": true },
            { "id": eleven, "startAt": "11:00", "alreadyBooked": false },
        ])
    );

    let uri = format!("/times/available?date={}&themeId={}", FUTURE_DATE, other_theme);
    let res = app.send(Method::GET, &uri, None, None).await;
    assert!(res.body.as_array().unwrap().iter().all(|t| t["alreadyBooked"] == false));
}

#[tokio::test]
async fn popular_themes_rank_recent_reservations() {
    let app = TestApp::spawn().await;
    let admin = app.admin_cookie().await;
    let time_id = app.create_time(&admin, "10:00").await;
    let quiet = app.create_theme(&admin, "quiet").await;
    let busy = app.create_theme(&admin, "busy").await;

    // Past reservations cannot go through the API, so seed them directly.
    let today = app.state.now().date();
    let repo = ReservationRepository::new(&app.state.db);
    for (days_ago, theme_id) in [(1, busy), (2, busy), (3, quiet)] {
        repo.save(&NewReservation {
            name: "guest".into(),
            date: today - Duration::days(days_ago),
            time_id,
            theme_id,
        })
        .await
        .unwrap();
    }

    let res = app
        .send(Method::GET, "/themes/popular?days=7&limit=10", None, None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let ids: Vec<i64> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![busy, quiet]);

    let top = app
        .send(Method::GET, "/themes/popular?days=7&limit=1", None, None)
        .await;
    assert_eq!(top.body.as_array().unwrap().len(), 1);

    let invalid = app
        .send(Method::GET, "/themes/popular?days=0&limit=10", None, None)
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let listed = app.send(Method::GET, "/reservations", None, None).await;
    assert_eq!(listed.body[0]["date"], format_date(today - Duration::days(1)));
}

#[tokio::test]
async fn malformed_input_is_a_json_bad_request() {
    let app = TestApp::spawn().await;

    let cases = [
        (
            Method::POST,
            "/reservations",
            Some(json!({ "name": "brown", "date": FUTURE_DATE, "timeId": "x", "themeId": 1 })),
        ),
        (Method::POST, "/reservations", Some(json!({ "name": "brown" }))),
        (Method::DELETE, "/reservations/abc", None),
        (Method::GET, "/themes/popular?days=abc&limit=10", None),
        (Method::GET, "/themes/popular", None),
        (Method::GET, "/times/available?date=2099-01-01", None),
    ];

    for (method, uri, body) in cases {
        let res = app.send(method.clone(), uri, body, None).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(
            res.headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json",
            "{method} {uri}"
        );
        assert!(res.body["error"].is_string(), "{method} {uri}: {:?}", res.body);
    }
}
